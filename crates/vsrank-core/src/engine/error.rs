use super::config::ConfigError;
use crate::core::io::export::ExportError;
use crate::core::io::log::ScoreFieldError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to list directory '{path}': {source}", path = path.display())]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ScoreParse(#[from] ScoreFieldError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Artifact export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to create score table '{path}': {source}", path = path.display())]
    TableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write score table: {0}")]
    ScoreTable(#[from] csv::Error),

    #[error("Failed to start scan workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
