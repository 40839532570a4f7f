use crate::cli::TriageArgs;
use crate::config::build_triage_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use vsrank::engine::progress::ProgressReporter;
use vsrank::workflows::triage;

pub async fn run(args: TriageArgs, threads: Option<usize>) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_triage_config(&args, threads)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Triaging docking results in {} (cutoff {:.1})...",
        app.score_dir.display(),
        app.core_config.scan.min_score
    );
    info!("Invoking the core triage workflow...");
    let result = tokio::task::block_in_place(|| {
        triage::run(&app.score_dir, &app.dest_dir, &app.core_config, &reporter)
    })?;

    println!("\n{}", result.histogram);
    println!(
        "✓ {} of {} ligand(s) at or below the cutoff copied to {}",
        result.hits.len(),
        result.records.len(),
        app.dest_dir.display()
    );
    println!("✓ Score table written to: {}", result.table_path.display());

    Ok(())
}
