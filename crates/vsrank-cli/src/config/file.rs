use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileScanConfig {
    pub concurrency: Option<usize>,
    pub min_score: Option<f32>,
    pub log_suffix: Option<String>,
    pub structure_suffix: Option<String>,
    pub lenient_score_parse: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSelectionConfig {
    pub sort_by: Option<String>,
    pub min_heavy_atoms: Option<u8>,
    pub max_heavy_atoms: Option<u8>,
    pub include_borderline: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileExportConfig {
    pub copy: Option<bool>,
    pub optional_suffixes: Option<Vec<String>>,
    pub report_file: Option<String>,
    pub table_file: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub scan: Option<FileScanConfig>,
    pub selection: Option<FileSelectionConfig>,
    pub export: Option<FileExportConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }
}
