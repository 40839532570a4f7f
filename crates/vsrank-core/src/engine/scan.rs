use super::collector::{ParseOutcome, ScanCollector, ScanOutcome};
use super::config::{InclusionPolicy, ScanConfig};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use tracing::{info, instrument, warn};

/// Names of the regular files in `dir` ending with `suffix`, sorted.
///
/// # Errors
///
/// Any failure to read the directory is fatal.
pub fn list_log_files(dir: &Path, suffix: &str) -> Result<Vec<String>, EngineError> {
    let listing_error = |source| EngineError::DirectoryListing {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        if entry.file_type().map_err(listing_error)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(suffix) => names.push(name),
            Ok(_) => {}
            Err(raw) => warn!("Skipping non UTF-8 file name {:?}.", raw),
        }
    }
    names.sort_unstable();
    Ok(names)
}

/// Parses every log file of `dir` on a pool of `config.concurrency` workers.
///
/// Each worker reads and parses one ligand and sends the outcome over a channel; the calling
/// thread is the only consumer and folds the outcomes into a [`ScanCollector`]. The function
/// returns only after every dispatched file has been collected.
///
/// # Errors
///
/// Fails when the directory cannot be listed, the worker pool cannot be started, or (unless
/// lenient parsing is enabled) any log carries a malformed score.
#[instrument(skip_all, name = "scan_task", fields(dir = %dir.display()))]
pub fn scan_directory(
    dir: &Path,
    config: &ScanConfig,
    inclusion: InclusionPolicy,
    reporter: &ProgressReporter,
) -> Result<ScanOutcome, EngineError> {
    config.validate()?;
    let parser = config.parser();
    let log_files = list_log_files(dir, parser.log_suffix())?;
    info!(
        files = log_files.len(),
        workers = config.concurrency,
        "Scanning docking logs."
    );

    reporter.report(Progress::ScanStart {
        total_files: log_files.len() as u64,
    });

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency)
        .thread_name(|i| format!("vsrank-scan-{}", i))
        .build()?;

    let (sender, receiver) = mpsc::channel::<ParseOutcome>();
    let mut collector = ScanCollector::new(inclusion);

    pool.in_place_scope(|scope| {
        for file_name in &log_files {
            let sender = sender.clone();
            let parser = &parser;
            scope.spawn(move |_| {
                let outcome = parser.parse(dir, file_name);
                if sender.send(outcome).is_err() {
                    warn!(file = %file_name, "Collector went away before the scan finished.");
                }
            });
        }
        // The receiver below ends once the last worker drops its sender.
        drop(sender);

        for outcome in receiver.iter() {
            if let Ok(record) = &outcome {
                reporter.report(Progress::FileScanned {
                    status: record.status,
                });
            }
            collector.absorb(outcome);
        }
    });

    reporter.report(Progress::ScanFinish);

    let outcome = collector.finish()?;
    info!(
        files = outcome.files_scanned(),
        eligible = outcome.eligible().count(),
        "Scan complete."
    );
    Ok(outcome)
}
