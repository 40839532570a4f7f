use crate::core::io::report::render_report;
use crate::core::models::histogram::OutcomeHistogram;
use crate::core::models::record::Record;
use crate::engine::config::{HeavyAtomRange, ScanConfig, SelectionCriteria};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::ranking::rank;
use crate::engine::scan::scan_directory;
use crate::engine::selection::{describe, select};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub scan: ScanConfig,
    pub selection: SelectionCriteria,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenResult {
    pub histogram: OutcomeHistogram,
    pub files_scanned: usize,
    /// Number of records admitted by the inclusion policy and ranked.
    pub ranked: usize,
    pub selected: Vec<Record>,
    pub effective_range: Option<HeavyAtomRange>,
    pub description: String,
    /// Rendered report; empty when nothing was selected.
    pub report: String,
}

impl ScreenResult {
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected.iter().map(|r| r.id.as_str())
    }
}

/// Scans `dir`, ranks the eligible records and selects the hits.
///
/// Nothing is written to disk; exporting artifacts and persisting the report are left to the
/// caller so that a failed export never leaves a partial report behind.
#[instrument(skip_all, name = "screen_workflow", fields(dir = %dir.display()))]
pub fn run(
    dir: &Path,
    config: &ScreenConfig,
    reporter: &ProgressReporter,
) -> Result<ScreenResult, EngineError> {
    // === Phase 1: Scan ===
    reporter.report(Progress::PhaseStart {
        name: "Scanning Logs",
    });
    let outcome = scan_directory(dir, &config.scan, config.selection.inclusion, reporter)?;
    reporter.report(Progress::PhaseFinish);
    info!("Outcome histogram:\n{}", outcome.histogram);

    let histogram = outcome.histogram.clone();
    let files_scanned = outcome.files_scanned();
    let observed = outcome.observed;

    // === Phase 2: Rank and select ===
    reporter.report(Progress::PhaseStart {
        name: "Ranking",
    });
    let ranked = rank(outcome.into_eligible(), config.selection.sort_by);
    let selection = select(&ranked, observed, &config.selection);
    reporter.report(Progress::PhaseFinish);

    let description = describe(&config.selection, &selection);
    let report = render_report(&description, &selection.records);

    info!(
        ranked = ranked.len(),
        selected = selection.records.len(),
        "Screening complete."
    );
    Ok(ScreenResult {
        histogram,
        files_scanned,
        ranked: ranked.len(),
        selected: selection.records,
        effective_range: selection.effective_range,
        description,
        report,
    })
}
