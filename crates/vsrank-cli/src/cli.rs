use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vsrank::engine::config::SortMetric;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "vsrank - scan, rank and select the docking results of a virtual screen.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Number of docking logs parsed concurrently (default: 5)
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the docked ligands and report (and copy) the best hits.
    Screen(ScreenArgs),
    /// Tabulate every docking score and copy all ligands at or below the score cutoff.
    Triage(TriageArgs),
}

/// Property used to rank ligands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Raw docking score
    Score,
    /// Ligand efficiency (10 * score / heavy atoms)
    Le,
}

impl From<SortKey> for SortMetric {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Score => SortMetric::Score,
            SortKey::Le => SortMetric::Efficiency,
        }
    }
}

/// Exactly one selection strategy must be given.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = true, multiple = false)]
pub struct StrategyArgs {
    /// Select the N ligands with the lowest values
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Select the N ligands with the lowest values per heavy-atom count
    #[arg(long, value_name = "N")]
    pub topha: Option<usize>,

    /// Select the ligands whose value is at most this (negative) cutoff
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub maxval: Option<f32>,

    /// List every ligand; implies --include-borderline and --no-copy
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `screen` subcommand.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    // --- Core Arguments ---
    /// Directory with the docking logs and poses.
    #[arg(required = true, value_name = "SCORE_DIR")]
    pub score_dir: PathBuf,

    /// Directory receiving the artifacts of the selected ligands.
    #[arg(value_name = "RESULT_DIR")]
    pub result_dir: Option<PathBuf>,

    #[command(flatten)]
    pub strategy: StrategyArgs,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Where the report is written.
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    // --- Selection Overrides ---
    /// Property by which the ligands are ranked.
    #[arg(long, value_enum, visible_alias = "sortby", value_name = "KEY")]
    pub sort_by: Option<SortKey>,

    /// Exclude ligands with fewer heavy atoms.
    #[arg(long, visible_alias = "minha", value_name = "INT")]
    pub min_ha: Option<u8>,

    /// Exclude ligands with more heavy atoms.
    #[arg(long, visible_alias = "maxha", value_name = "INT")]
    pub max_ha: Option<u8>,

    /// Also rank ligands above the score cutoff or with implausible scores.
    #[arg(long)]
    pub include_borderline: bool,

    // --- Scan Overrides ---
    /// Scores above this value are classified as low.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min_score: Option<f32>,

    /// Record malformed scores per ligand instead of aborting the run.
    #[arg(long)]
    pub lenient: bool,

    /// Do not copy the selected ligands to the result directory.
    #[arg(long, visible_alias = "nocopy")]
    pub no_copy: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.sort-by=le
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `triage` subcommand.
#[derive(Args, Debug)]
pub struct TriageArgs {
    /// Directory with the docking logs and poses.
    #[arg(required = true, value_name = "SCORE_DIR")]
    pub score_dir: PathBuf,

    /// Directory receiving the score table and the artifacts of every hit.
    #[arg(default_value = ".", value_name = "DEST_DIR")]
    pub dest_dir: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ligands scoring at or below this value are copied.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min_score: Option<f32>,

    /// Record malformed scores per ligand instead of aborting the run.
    #[arg(long)]
    pub lenient: bool,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
