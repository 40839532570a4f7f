use super::pdbqt::count_heavy_atoms_in;
use crate::core::metrics::tolerance::tolerant_less;
use crate::core::models::record::{Record, Status};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// Text that opens the row of the best-ranked pose in a docking log's results table.
pub const FIRST_POSE_MARKER: &str = "1    ";

pub const DEFAULT_LOG_SUFFIX: &str = ".log";
pub const DEFAULT_STRUCTURE_SUFFIX: &str = ".pdbqt";
pub const DEFAULT_MIN_SCORE: f32 = -8.5;

/// Scores below this are physically implausible for a small-molecule ligand.
pub const IMPLAUSIBLE_BELOW: f32 = -20.0;
/// Scores above this indicate a failed or meaningless docking.
pub const IMPLAUSIBLE_ABOVE: f32 = -1.0;

/// The score column of a log could not be read as a number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Malformed score field '{field}' in docking log of ligand '{id}'")]
pub struct ScoreFieldError {
    pub id: String,
    pub field: String,
}

/// Turns the artifacts of one ligand into a classified [`Record`].
#[derive(Debug, Clone)]
pub struct RecordParser {
    log_suffix: String,
    structure_suffix: String,
    min_score: f32,
    lenient_score_parse: bool,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self {
            log_suffix: DEFAULT_LOG_SUFFIX.to_string(),
            structure_suffix: DEFAULT_STRUCTURE_SUFFIX.to_string(),
            min_score: DEFAULT_MIN_SCORE,
            lenient_score_parse: false,
        }
    }
}

impl RecordParser {
    pub fn new(
        log_suffix: impl Into<String>,
        structure_suffix: impl Into<String>,
        min_score: f32,
        lenient_score_parse: bool,
    ) -> Self {
        Self {
            log_suffix: log_suffix.into(),
            structure_suffix: structure_suffix.into(),
            min_score,
            lenient_score_parse,
        }
    }

    pub fn log_suffix(&self) -> &str {
        &self.log_suffix
    }

    pub fn ligand_id<'a>(&self, log_file_name: &'a str) -> &'a str {
        log_file_name
            .strip_suffix(self.log_suffix.as_str())
            .unwrap_or(log_file_name)
    }

    pub fn structure_path(&self, dir: &Path, id: &str) -> PathBuf {
        dir.join(format!("{}{}", id, self.structure_suffix))
    }

    /// Parses `dir/log_file_name` and its companion structure file.
    ///
    /// Every soft failure is reported through the record's status.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreFieldError`] when the score column is not a number and lenient parsing
    /// is disabled.
    pub fn parse(&self, dir: &Path, log_file_name: &str) -> Result<Record, ScoreFieldError> {
        let id = self.ligand_id(log_file_name);

        let content = match fs::read(dir.join(log_file_name)) {
            Ok(bytes) => bytes,
            Err(e) => {
                trace!(ligand = id, error = %e, "Docking log unreadable.");
                return Ok(Record::failed(id, Status::ReadError));
            }
        };
        let text = String::from_utf8_lossy(&content);

        let field = match extract_score_field(&text) {
            Ok(field) => field,
            Err(status) => return Ok(Record::failed(id, status)),
        };

        let score: f32 = match field.parse() {
            Ok(score) => score,
            Err(_) if self.lenient_score_parse => {
                return Ok(Record::failed(id, Status::ScoreParseError));
            }
            Err(_) => {
                return Err(ScoreFieldError {
                    id: id.to_string(),
                    field: field.to_string(),
                });
            }
        };

        let heavy_atoms = count_heavy_atoms_in(&self.structure_path(dir, id));
        if heavy_atoms == 0 {
            return Ok(Record::failed(id, Status::AtomCountError));
        }

        Ok(Record::new(
            id,
            score,
            heavy_atoms,
            classify_score(score, self.min_score),
        ))
    }
}

/// Locates the score column of the best pose.
///
/// The returned error is the status describing which step failed.
pub fn extract_score_field(text: &str) -> Result<&str, Status> {
    let start = text
        .find(FIRST_POSE_MARKER)
        .ok_or(Status::StartMarkerNotFound)?;
    let rest = &text[start..];
    let stop = rest.find('\n').ok_or(Status::LineEndNotFound)?;
    rest[..stop]
        .split_whitespace()
        .nth(1)
        .ok_or(Status::FieldsMissing)
}

/// Plausibility and cutoff policy for a parsed score with a valid atom count.
pub fn classify_score(score: f32, min_score: f32) -> Status {
    if !score.is_finite()
        || tolerant_less(score, IMPLAUSIBLE_BELOW)
        || tolerant_less(IMPLAUSIBLE_ABOVE, score)
    {
        Status::ImplausibleScore
    } else if tolerant_less(min_score, score) {
        Status::LowScore
    } else {
        Status::Ok
    }
}
