use vsrank::core::io::log::{DEFAULT_LOG_SUFFIX, DEFAULT_MIN_SCORE, DEFAULT_STRUCTURE_SUFFIX};
use vsrank::engine::config::{DEFAULT_CONCURRENCY, HeavyAtomRange, SortMetric};
use vsrank::workflows::triage::{DEFAULT_OPTIONAL_SUFFIX, DEFAULT_TABLE_FILE};

pub const DEFAULT_REPORT_FILE: &str = "scores.txt";

pub struct DefaultsConfig {
    pub concurrency: usize,
    pub min_score: f32,
    pub log_suffix: String,
    pub structure_suffix: String,
    pub lenient_score_parse: bool,
    pub sort_by: SortMetric,
    pub min_heavy_atoms: u8,
    pub max_heavy_atoms: u8,
    pub include_borderline: bool,
    pub copy: bool,
    pub optional_suffixes: Vec<String>,
    pub report_file: String,
    pub table_file: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let range = HeavyAtomRange::default();
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            min_score: DEFAULT_MIN_SCORE,
            log_suffix: DEFAULT_LOG_SUFFIX.to_string(),
            structure_suffix: DEFAULT_STRUCTURE_SUFFIX.to_string(),
            lenient_score_parse: false,
            sort_by: SortMetric::Score,
            min_heavy_atoms: range.min,
            max_heavy_atoms: range.max,
            include_borderline: false,
            copy: true,
            optional_suffixes: vec![DEFAULT_OPTIONAL_SUFFIX.to_string()],
            report_file: DEFAULT_REPORT_FILE.to_string(),
            table_file: DEFAULT_TABLE_FILE.to_string(),
        }
    }
}
