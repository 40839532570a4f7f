use std::path::PathBuf;
use vsrank::workflows::screen::ScreenConfig;
use vsrank::workflows::triage::TriageConfig;

pub struct ScreenAppConfig {
    pub score_dir: PathBuf,
    /// `None` when copying is disabled.
    pub result_dir: Option<PathBuf>,
    pub report_path: PathBuf,
    pub optional_suffixes: Vec<String>,
    pub print_report: bool,
    pub core_config: ScreenConfig,
}

pub struct TriageAppConfig {
    pub score_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub core_config: TriageConfig,
}
