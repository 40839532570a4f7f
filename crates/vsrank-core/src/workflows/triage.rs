use crate::core::io::export::{ArtifactExporter, ExportSummary};
use crate::core::io::table::write_score_table;
use crate::core::models::histogram::OutcomeHistogram;
use crate::core::models::record::Record;
use crate::engine::config::{InclusionPolicy, ScanConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scan::scan_directory;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_TABLE_FILE: &str = "vs_scores.txt";
pub const DEFAULT_OPTIONAL_SUFFIX: &str = ".terms";

#[derive(Debug, Clone, PartialEq)]
pub struct TriageConfig {
    pub scan: ScanConfig,
    /// File name of the score table, created inside the destination directory.
    pub table_file: String,
    /// Artifacts copied when present; the structure and log files are always required.
    pub optional_suffixes: Vec<String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            table_file: DEFAULT_TABLE_FILE.to_string(),
            optional_suffixes: vec![DEFAULT_OPTIONAL_SUFFIX.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriageResult {
    pub histogram: OutcomeHistogram,
    /// Every scanned record, sorted by ligand id.
    pub records: Vec<Record>,
    pub hits: Vec<String>,
    pub export: ExportSummary,
    pub table_path: PathBuf,
}

/// A ligand is a hit when it produced a score at or below the cutoff.
pub fn is_hit(record: &Record, min_score: f32) -> bool {
    record.status.carries_data() && record.heavy_atoms > 0 && record.score <= min_score
}

/// Scans `dir`, copies the artifacts of every hit into `dest` and writes the score table of
/// all ligands next to them.
///
/// The table is written only after the export succeeded.
#[instrument(skip_all, name = "triage_workflow", fields(dir = %dir.display(), dest = %dest.display()))]
pub fn run(
    dir: &Path,
    dest: &Path,
    config: &TriageConfig,
    reporter: &ProgressReporter,
) -> Result<TriageResult, EngineError> {
    // === Phase 1: Scan ===
    reporter.report(Progress::PhaseStart {
        name: "Scanning Logs",
    });
    let outcome = scan_directory(dir, &config.scan, InclusionPolicy::Borderline, reporter)?;
    reporter.report(Progress::PhaseFinish);
    info!("Outcome histogram:\n{}", outcome.histogram);

    let histogram = outcome.histogram;
    let mut records = outcome.records;
    records.sort_by(|a, b| a.id.cmp(&b.id));

    let hits: Vec<String> = records
        .iter()
        .filter(|r| is_hit(r, config.scan.min_score))
        .map(|r| r.id.clone())
        .collect();

    // === Phase 2: Export ===
    reporter.report(Progress::PhaseStart {
        name: "Copying Hits",
    });
    let exporter = ArtifactExporter::new(dir, dest)
        .with_mandatory_suffixes(vec![
            config.scan.structure_suffix.clone(),
            config.scan.log_suffix.clone(),
        ])
        .with_optional_suffixes(config.optional_suffixes.clone());
    let export = exporter.export(hits.iter().map(String::as_str))?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Score table ===
    let table_path = dest.join(&config.table_file);
    let file = fs::File::create(&table_path).map_err(|source| EngineError::TableFile {
        path: table_path.clone(),
        source,
    })?;
    write_score_table(BufWriter::new(file), &records)?;

    info!(
        scanned = records.len(),
        hits = hits.len(),
        table = %table_path.display(),
        "Triage complete."
    );
    Ok(TriageResult {
        histogram,
        records,
        hits,
        export,
        table_path,
    })
}
