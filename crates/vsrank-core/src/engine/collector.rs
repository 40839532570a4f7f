use super::config::{HeavyAtomRange, InclusionPolicy};
use crate::core::io::log::ScoreFieldError;
use crate::core::models::histogram::OutcomeHistogram;
use crate::core::models::record::{Record, Status};
use tracing::{debug, warn};

/// What a scan worker hands to the collector for one log file.
pub type ParseOutcome = Result<Record, ScoreFieldError>;

/// Aggregate of a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// One record per scanned log file, in completion order.
    pub records: Vec<Record>,
    pub histogram: OutcomeHistogram,
    /// Heavy-atom span of the records admitted by the inclusion policy.
    pub observed: Option<HeavyAtomRange>,
    pub inclusion: InclusionPolicy,
}

impl ScanOutcome {
    pub fn files_scanned(&self) -> usize {
        self.records.len()
    }

    pub fn eligible(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(|r| self.inclusion.admits(r))
    }

    pub fn into_eligible(self) -> Vec<Record> {
        let inclusion = self.inclusion;
        self.records
            .into_iter()
            .filter(|r| inclusion.admits(r))
            .collect()
    }
}

/// Single consumer merging worker outcomes.
///
/// Workers never touch shared state; they send [`ParseOutcome`]s and this collector folds
/// them in arrival order.
#[derive(Debug)]
pub struct ScanCollector {
    inclusion: InclusionPolicy,
    records: Vec<Record>,
    histogram: OutcomeHistogram,
    observed: Option<HeavyAtomRange>,
    fatal: Option<ScoreFieldError>,
}

impl ScanCollector {
    pub fn new(inclusion: InclusionPolicy) -> Self {
        Self {
            inclusion,
            records: Vec::new(),
            histogram: OutcomeHistogram::new(),
            observed: None,
            fatal: None,
        }
    }

    pub fn absorb(&mut self, outcome: ParseOutcome) {
        match outcome {
            Ok(record) => self.absorb_record(record),
            Err(e) => {
                warn!("{}", e);
                // Keep the lexically first offender so repeated runs report the same ligand.
                let replace = self
                    .fatal
                    .as_ref()
                    .is_none_or(|current| e.id < current.id);
                if replace {
                    self.fatal = Some(e);
                }
            }
        }
    }

    fn absorb_record(&mut self, record: Record) {
        self.histogram.record(record.status);
        if record.status != Status::Ok {
            debug!(ligand = %record.id, status = %record.status, "Ligand not usable as-is.");
        }
        if self.inclusion.admits(&record) {
            let heavy_atoms = record.heavy_atoms;
            self.observed = Some(match self.observed {
                Some(range) => range.widen(heavy_atoms),
                None => HeavyAtomRange::single(heavy_atoms),
            });
        }
        self.records.push(record);
    }

    pub fn records_seen(&self) -> usize {
        self.records.len()
    }

    /// Closes the collection.
    ///
    /// # Errors
    ///
    /// Returns the malformed score field if any worker reported one.
    pub fn finish(self) -> Result<ScanOutcome, ScoreFieldError> {
        if let Some(e) = self.fatal {
            return Err(e);
        }
        Ok(ScanOutcome {
            records: self.records,
            histogram: self.histogram,
            observed: self.observed,
            inclusion: self.inclusion,
        })
    }
}
