use crate::cli::ScreenArgs;
use crate::config::build_screen_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use std::fs;
use tracing::{info, warn};
use vsrank::core::io::export::ArtifactExporter;
use vsrank::core::metrics::efficiency::FORMULA;
use vsrank::engine::config::SortMetric;
use vsrank::engine::error::EngineError;
use vsrank::engine::progress::ProgressReporter;
use vsrank::workflows::screen;

pub async fn run(args: ScreenArgs, threads: Option<usize>) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_screen_config(&args, threads)?;
    let scan = &app.core_config.scan;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Scanning docking results in {} ({} workers)...",
        app.score_dir.display(),
        scan.concurrency
    );
    if app.core_config.selection.sort_by == SortMetric::Efficiency {
        println!("Sorting ligands by ligand efficiency ({}).", FORMULA);
    }
    info!("Invoking the core screening workflow...");
    let result = tokio::task::block_in_place(|| {
        screen::run(&app.score_dir, &app.core_config, &reporter)
    })?;

    println!("\n{}", result.histogram);
    if result.selected.is_empty() {
        warn!("No ligand matched the selection criteria.");
        println!("Warning: no ligand matched the selection criteria.");
    }

    if let Some(result_dir) = &app.result_dir {
        let exporter = ArtifactExporter::new(&app.score_dir, result_dir)
            .with_mandatory_suffixes(vec![
                scan.structure_suffix.clone(),
                scan.log_suffix.clone(),
            ])
            .with_optional_suffixes(app.optional_suffixes.clone());
        let summary = tokio::task::block_in_place(|| exporter.export(result.selected_ids()))
            .map_err(EngineError::from)?;
        println!(
            "✓ Copied {} file(s) of {} ligand(s) to {}",
            summary.copied,
            result.selected.len(),
            exporter.dest_dir().display()
        );
    }

    if app.print_report {
        println!("\n{}", result.report);
    }

    fs::write(&app.report_path, &result.report)?;
    info!(
        "Report with {} ligand(s) written to {:?}",
        result.selected.len(),
        &app.report_path
    );
    println!("✓ Report written to: {}", app.report_path.display());

    Ok(())
}
