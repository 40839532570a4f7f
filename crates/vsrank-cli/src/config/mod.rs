pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{build_screen_config, build_triage_config};
pub use models::{ScreenAppConfig, TriageAppConfig};
