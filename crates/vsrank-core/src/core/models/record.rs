use crate::core::metrics::efficiency::{EfficiencyError, ligand_efficiency};
use serde::Serialize;
use std::fmt;

/// Outcome of parsing the artifacts of a single ligand.
///
/// The taxonomy is flat: every scanned log file ends up in exactly one of these buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Status {
    Ok,
    LowScore,
    ReadError,
    StartMarkerNotFound,
    LineEndNotFound,
    FieldsMissing,
    AtomCountError,
    ImplausibleScore,
    /// Only produced when lenient score parsing is enabled; otherwise a malformed
    /// score field aborts the scan.
    ScoreParseError,
}

impl Status {
    pub const ALL: [Status; 9] = [
        Status::Ok,
        Status::LowScore,
        Status::ReadError,
        Status::StartMarkerNotFound,
        Status::LineEndNotFound,
        Status::FieldsMissing,
        Status::AtomCountError,
        Status::ImplausibleScore,
        Status::ScoreParseError,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Status::Ok => "Ok",
            Status::LowScore => "LowScore",
            Status::ReadError => "ReadError",
            Status::StartMarkerNotFound => "StartMarkerNotFound",
            Status::LineEndNotFound => "LineEndNotFound",
            Status::FieldsMissing => "FieldsMissing",
            Status::AtomCountError => "AtomCountError",
            Status::ImplausibleScore => "ImplausibleScore",
            Status::ScoreParseError => "ScoreParseError",
        }
    }

    /// Whether a record with this status holds a parsed score and a non-zero heavy-atom count.
    pub fn carries_data(self) -> bool {
        matches!(
            self,
            Status::Ok | Status::LowScore | Status::ImplausibleScore
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ligand of the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub score: f32,
    pub heavy_atoms: u8,
    pub status: Status,
}

impl Record {
    pub fn new(id: impl Into<String>, score: f32, heavy_atoms: u8, status: Status) -> Self {
        Self {
            id: id.into(),
            score,
            heavy_atoms,
            status,
        }
    }

    /// A record whose artifacts could not be interpreted; score and atom count are zeroed.
    pub fn failed(id: impl Into<String>, status: Status) -> Self {
        Self::new(id, 0.0, 0, status)
    }

    pub fn efficiency(&self) -> Result<f32, EfficiencyError> {
        ligand_efficiency(self.score, self.heavy_atoms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_scored_statuses_carry_data() {
        let with_data: Vec<_> = Status::ALL
            .iter()
            .copied()
            .filter(|s| s.carries_data())
            .collect();
        assert_eq!(
            with_data,
            vec![Status::Ok, Status::LowScore, Status::ImplausibleScore]
        );
    }

    #[test]
    fn failed_record_has_zeroed_fields() {
        let record = Record::failed("lig_7", Status::ReadError);
        assert_eq!(record.score, 0.0);
        assert_eq!(record.heavy_atoms, 0);
        assert!(record.efficiency().is_err());
    }

    #[test]
    fn status_display_uses_label() {
        assert_eq!(Status::StartMarkerNotFound.to_string(), "StartMarkerNotFound");
    }
}
