use crate::core::io::log::{
    DEFAULT_LOG_SUFFIX, DEFAULT_MIN_SCORE, DEFAULT_STRUCTURE_SUFFIX, RecordParser,
};
use crate::core::metrics::efficiency::EfficiencyError;
use crate::core::models::record::{Record, Status};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CONCURRENCY: usize = 5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Conflicting selection strategies: '{0}' and '{1}' cannot be combined")]
    ConflictingStrategies(&'static str, &'static str),

    #[error("Count for '{0}' must be at least 1")]
    ZeroCount(&'static str),

    #[error("Threshold cutoff must be negative (got {0})")]
    NonNegativeThreshold(f32),

    #[error("Heavy-atom range is empty: minimum {min} exceeds maximum {max}")]
    EmptyHeavyAtomRange { min: u8, max: u8 },

    #[error("Scan concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Unknown sort property '{0}'. Expected 'score' or 'le'.")]
    UnknownSortMetric(String),
}

/// Property by which records are ranked; lower is better for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMetric {
    #[default]
    Score,
    Efficiency,
}

impl SortMetric {
    pub fn label(self) -> &'static str {
        match self {
            SortMetric::Score => "score",
            SortMetric::Efficiency => "ligand efficiency",
        }
    }

    pub fn value_of(self, record: &Record) -> Result<f32, EfficiencyError> {
        match self {
            SortMetric::Score => Ok(record.score),
            SortMetric::Efficiency => record.efficiency(),
        }
    }
}

impl FromStr for SortMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(SortMetric::Score),
            "le" | "efficiency" | "ligand-efficiency" => Ok(SortMetric::Efficiency),
            other => Err(ConfigError::UnknownSortMetric(other.to_string())),
        }
    }
}

impl fmt::Display for SortMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive range of heavy-atom counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeavyAtomRange {
    pub min: u8,
    pub max: u8,
}

impl Default for HeavyAtomRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: u8::MAX,
        }
    }
}

impl HeavyAtomRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn single(value: u8) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, heavy_atoms: u8) -> bool {
        (self.min..=self.max).contains(&heavy_atoms)
    }

    /// Smallest range covering `self` and `value`.
    pub fn widen(self, value: u8) -> Self {
        Self::new(self.min.min(value), self.max.max(value))
    }

    /// Overlap of two ranges, `None` when disjoint.
    pub fn intersect(self, other: HeavyAtomRange) -> Option<HeavyAtomRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(HeavyAtomRange::new(min, max))
    }
}

/// Which statuses make a record eligible for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InclusionPolicy {
    /// Only `Ok` records.
    #[default]
    Strict,
    /// `Ok`, `LowScore` and `ImplausibleScore` records.
    Borderline,
}

impl InclusionPolicy {
    pub fn admits(self, record: &Record) -> bool {
        if record.heavy_atoms == 0 {
            return false;
        }
        match self {
            InclusionPolicy::Strict => record.status == Status::Ok,
            InclusionPolicy::Borderline => record.status.carries_data(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionStrategy {
    /// The first `n` ranked records.
    TopN(usize),
    /// Up to `n` ranked records per heavy-atom count.
    TopNPerBucket(usize),
    /// Ranked records whose metric is at most the cutoff.
    Threshold(f32),
    /// Every eligible record, in ranked order.
    All,
}

impl SelectionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionStrategy::TopN(_) => "top",
            SelectionStrategy::TopNPerBucket(_) => "topha",
            SelectionStrategy::Threshold(_) => "maxval",
            SelectionStrategy::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    pub sort_by: SortMetric,
    pub heavy_atoms: HeavyAtomRange,
    pub strategy: SelectionStrategy,
    pub inclusion: InclusionPolicy,
}

#[derive(Default)]
pub struct SelectionCriteriaBuilder {
    sort_by: Option<SortMetric>,
    min_heavy_atoms: Option<u8>,
    max_heavy_atoms: Option<u8>,
    strategies: Vec<SelectionStrategy>,
    include_borderline: Option<bool>,
}

impl SelectionCriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort_by(mut self, metric: SortMetric) -> Self {
        self.sort_by = Some(metric);
        self
    }
    pub fn min_heavy_atoms(mut self, min: u8) -> Self {
        self.min_heavy_atoms = Some(min);
        self
    }
    pub fn max_heavy_atoms(mut self, max: u8) -> Self {
        self.max_heavy_atoms = Some(max);
        self
    }
    pub fn top_n(mut self, n: usize) -> Self {
        self.strategies.push(SelectionStrategy::TopN(n));
        self
    }
    pub fn top_n_per_bucket(mut self, n: usize) -> Self {
        self.strategies.push(SelectionStrategy::TopNPerBucket(n));
        self
    }
    pub fn threshold(mut self, cutoff: f32) -> Self {
        self.strategies.push(SelectionStrategy::Threshold(cutoff));
        self
    }
    pub fn all(mut self) -> Self {
        self.strategies.push(SelectionStrategy::All);
        self
    }
    pub fn include_borderline(mut self, include: bool) -> Self {
        self.include_borderline = Some(include);
        self
    }

    pub fn build(self) -> Result<SelectionCriteria, ConfigError> {
        let strategy = match self.strategies.as_slice() {
            [] => return Err(ConfigError::MissingParameter("selection strategy")),
            [single] => *single,
            [first, second, ..] => {
                return Err(ConfigError::ConflictingStrategies(
                    first.name(),
                    second.name(),
                ));
            }
        };
        match strategy {
            SelectionStrategy::TopN(0) | SelectionStrategy::TopNPerBucket(0) => {
                return Err(ConfigError::ZeroCount(strategy.name()));
            }
            SelectionStrategy::Threshold(cutoff) if cutoff.is_nan() || cutoff >= 0.0 => {
                return Err(ConfigError::NonNegativeThreshold(cutoff));
            }
            _ => {}
        }

        let defaults = HeavyAtomRange::default();
        let heavy_atoms = HeavyAtomRange::new(
            self.min_heavy_atoms.unwrap_or(defaults.min),
            self.max_heavy_atoms.unwrap_or(defaults.max),
        );
        if heavy_atoms.min > heavy_atoms.max {
            return Err(ConfigError::EmptyHeavyAtomRange {
                min: heavy_atoms.min,
                max: heavy_atoms.max,
            });
        }

        // Listing every ligand only makes sense with the borderline records included.
        let include_borderline =
            strategy == SelectionStrategy::All || self.include_borderline.unwrap_or(false);

        Ok(SelectionCriteria {
            sort_by: self.sort_by.unwrap_or_default(),
            heavy_atoms,
            strategy,
            inclusion: if include_borderline {
                InclusionPolicy::Borderline
            } else {
                InclusionPolicy::Strict
            },
        })
    }
}

/// Settings of the directory scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub concurrency: usize,
    pub min_score: f32,
    pub log_suffix: String,
    pub structure_suffix: String,
    pub lenient_score_parse: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            min_score: DEFAULT_MIN_SCORE,
            log_suffix: DEFAULT_LOG_SUFFIX.to_string(),
            structure_suffix: DEFAULT_STRUCTURE_SUFFIX.to_string(),
            lenient_score_parse: false,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.log_suffix.is_empty() {
            return Err(ConfigError::MissingParameter("log_suffix"));
        }
        if self.structure_suffix.is_empty() {
            return Err(ConfigError::MissingParameter("structure_suffix"));
        }
        Ok(())
    }

    pub fn parser(&self) -> RecordParser {
        RecordParser::new(
            self.log_suffix.clone(),
            self.structure_suffix.clone(),
            self.min_score,
            self.lenient_score_parse,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_strategy_is_required() {
        assert_eq!(
            SelectionCriteriaBuilder::new().build(),
            Err(ConfigError::MissingParameter("selection strategy"))
        );
        assert_eq!(
            SelectionCriteriaBuilder::new().top_n(5).threshold(-9.0).build(),
            Err(ConfigError::ConflictingStrategies("top", "maxval"))
        );
    }

    #[test]
    fn zero_counts_and_non_negative_cutoffs_are_rejected() {
        assert_eq!(
            SelectionCriteriaBuilder::new().top_n(0).build(),
            Err(ConfigError::ZeroCount("top"))
        );
        assert_eq!(
            SelectionCriteriaBuilder::new().top_n_per_bucket(0).build(),
            Err(ConfigError::ZeroCount("topha"))
        );
        assert_eq!(
            SelectionCriteriaBuilder::new().threshold(0.0).build(),
            Err(ConfigError::NonNegativeThreshold(0.0))
        );
    }

    #[test]
    fn defaults_cover_full_range_sorted_by_score() {
        let criteria = SelectionCriteriaBuilder::new().top_n(10).build().unwrap();
        assert_eq!(criteria.sort_by, SortMetric::Score);
        assert_eq!(criteria.heavy_atoms, HeavyAtomRange::new(0, 255));
        assert_eq!(criteria.inclusion, InclusionPolicy::Strict);
    }

    #[test]
    fn all_strategy_implies_borderline_inclusion() {
        let criteria = SelectionCriteriaBuilder::new().all().build().unwrap();
        assert_eq!(criteria.inclusion, InclusionPolicy::Borderline);
    }

    #[test]
    fn inverted_heavy_atom_range_is_rejected() {
        let result = SelectionCriteriaBuilder::new()
            .top_n(1)
            .min_heavy_atoms(30)
            .max_heavy_atoms(10)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::EmptyHeavyAtomRange { min: 30, max: 10 })
        );
    }

    #[test]
    fn sort_metric_parses_short_and_long_names() {
        assert_eq!("score".parse::<SortMetric>(), Ok(SortMetric::Score));
        assert_eq!("LE".parse::<SortMetric>(), Ok(SortMetric::Efficiency));
        assert!("mass".parse::<SortMetric>().is_err());
    }

    #[test]
    fn inclusion_policy_never_admits_zero_atoms() {
        let zero_atoms = Record::new("odd", -9.0, 0, Status::Ok);
        assert!(!InclusionPolicy::Strict.admits(&zero_atoms));
        assert!(!InclusionPolicy::Borderline.admits(&zero_atoms));

        let low = Record::new("low", -7.0, 12, Status::LowScore);
        assert!(!InclusionPolicy::Strict.admits(&low));
        assert!(InclusionPolicy::Borderline.admits(&low));
    }

    #[test]
    fn ranges_intersect_and_widen() {
        let observed = HeavyAtomRange::single(20).widen(14).widen(33);
        assert_eq!(observed, HeavyAtomRange::new(14, 33));
        assert_eq!(
            observed.intersect(HeavyAtomRange::new(0, 25)),
            Some(HeavyAtomRange::new(14, 25))
        );
        assert_eq!(observed.intersect(HeavyAtomRange::new(40, 50)), None);
    }

    #[test]
    fn scan_config_rejects_zero_concurrency() {
        let config = ScanConfig {
            concurrency: 0,
            ..ScanConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));
    }
}
