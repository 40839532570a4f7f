use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create result directory '{path}': {source}", path = path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}", from = from.display(), to = to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub copied: usize,
    pub skipped_optional: usize,
}

/// Copies the per-ligand artifacts (`<id><suffix>`) of selected ligands into a result
/// directory.
///
/// Mandatory artifacts must exist; a missing optional artifact is skipped.
#[derive(Debug, Clone)]
pub struct ArtifactExporter {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    mandatory: Vec<String>,
    optional: Vec<String>,
}

impl ArtifactExporter {
    /// Exporter for the docked pose and the docking log.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            mandatory: vec![".pdbqt".to_string(), ".log".to_string()],
            optional: Vec::new(),
        }
    }

    pub fn with_mandatory_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.mandatory = suffixes;
        self
    }

    pub fn with_optional_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.optional = suffixes;
        self
    }

    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// # Errors
    ///
    /// Fails on the first mandatory artifact that cannot be copied, or when the destination
    /// directory cannot be created.
    pub fn export<'a, I>(&self, ids: I) -> Result<ExportSummary, ExportError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fs::create_dir_all(&self.dest_dir).map_err(|source| ExportError::CreateDir {
            path: self.dest_dir.clone(),
            source,
        })?;

        let mut summary = ExportSummary::default();
        for id in ids {
            for suffix in &self.mandatory {
                self.copy_artifact(id, suffix)?;
                summary.copied += 1;
            }
            for suffix in &self.optional {
                match self.copy_artifact(id, suffix) {
                    Ok(()) => summary.copied += 1,
                    Err(e) => {
                        debug!("Skipping optional artifact: {}", e);
                        summary.skipped_optional += 1;
                    }
                }
            }
        }
        info!(
            copied = summary.copied,
            skipped_optional = summary.skipped_optional,
            dest = %self.dest_dir.display(),
            "Artifact export finished."
        );
        Ok(summary)
    }

    fn copy_artifact(&self, id: &str, suffix: &str) -> Result<(), ExportError> {
        let file_name = format!("{}{}", id, suffix);
        let from = self.source_dir.join(&file_name);
        let to = self.dest_dir.join(&file_name);
        fs::copy(&from, &to)
            .map(|_| ())
            .map_err(|source| ExportError::Copy { from, to, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_mandatory_and_present_optional_artifacts() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        for name in ["a.pdbqt", "a.log", "a.terms", "b.pdbqt", "b.log"] {
            fs::write(src.path().join(name), name).unwrap();
        }

        let exporter = ArtifactExporter::new(src.path(), dst.path().join("hits"))
            .with_optional_suffixes(vec![".terms".to_string()]);
        let summary = exporter.export(["a", "b"]).unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                copied: 5,
                skipped_optional: 1
            }
        );
        let copied = fs::read_to_string(dst.path().join("hits").join("a.terms")).unwrap();
        assert_eq!(copied, "a.terms");
        assert!(!dst.path().join("hits").join("b.terms").exists());
    }

    #[test]
    fn missing_mandatory_artifact_fails() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        fs::write(src.path().join("a.log"), "log").unwrap();

        let err = ArtifactExporter::new(src.path(), dst.path())
            .export(["a"])
            .unwrap_err();
        match err {
            ExportError::Copy { from, .. } => assert!(from.ends_with("a.pdbqt")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
