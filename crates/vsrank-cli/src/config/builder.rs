use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileScanConfig};
use super::models::{ScreenAppConfig, TriageAppConfig};
use crate::cli::{ScreenArgs, TriageArgs};
use crate::error::{CliError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use vsrank::engine::config::{ScanConfig, SelectionCriteriaBuilder, SortMetric};
use vsrank::workflows::screen::ScreenConfig;
use vsrank::workflows::triage::TriageConfig;

/// Command-line values shared by both subcommands that feed the scan settings.
struct ScanOverrides {
    threads: Option<usize>,
    min_score: Option<f32>,
    lenient: bool,
}

pub fn build_screen_config(args: &ScreenArgs, threads: Option<usize>) -> Result<ScreenAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let scan = merge_scan(
        file_config.scan.take().unwrap_or_default(),
        ScanOverrides {
            threads,
            min_score: args.min_score,
            lenient: args.lenient,
        },
        &defaults,
    );

    let selection_file = file_config.selection.take().unwrap_or_default();
    let sort_by = match (args.sort_by, selection_file.sort_by.as_deref()) {
        (Some(key), _) => key.into(),
        (None, Some(name)) => SortMetric::from_str(name)?,
        (None, None) => defaults.sort_by,
    };

    let mut builder = SelectionCriteriaBuilder::new()
        .sort_by(sort_by)
        .min_heavy_atoms(
            args.min_ha
                .or(selection_file.min_heavy_atoms)
                .unwrap_or(defaults.min_heavy_atoms),
        )
        .max_heavy_atoms(
            args.max_ha
                .or(selection_file.max_heavy_atoms)
                .unwrap_or(defaults.max_heavy_atoms),
        )
        .include_borderline(
            args.include_borderline
                || selection_file
                    .include_borderline
                    .unwrap_or(defaults.include_borderline),
        );
    let strategy = args.strategy;
    if let Some(n) = strategy.top {
        builder = builder.top_n(n);
    }
    if let Some(n) = strategy.topha {
        builder = builder.top_n_per_bucket(n);
    }
    if let Some(cutoff) = strategy.maxval {
        builder = builder.threshold(cutoff);
    }
    if strategy.all {
        builder = builder.all();
    }
    let selection = builder.build()?;

    let export_file = file_config.export.take().unwrap_or_default();
    let copy = !args.no_copy && !strategy.all && export_file.copy.unwrap_or(defaults.copy);
    let result_dir = if copy {
        let dir = args.result_dir.clone().ok_or_else(|| {
            CliError::Argument(
                "A result directory is required unless --no-copy or --all is given.".to_string(),
            )
        })?;
        Some(dir)
    } else {
        None
    };
    let report_path = args.report.clone().unwrap_or_else(|| {
        PathBuf::from(export_file.report_file.unwrap_or(defaults.report_file))
    });

    Ok(ScreenAppConfig {
        score_dir: args.score_dir.clone(),
        result_dir,
        report_path,
        optional_suffixes: export_file
            .optional_suffixes
            .unwrap_or(defaults.optional_suffixes),
        print_report: !strategy.all,
        core_config: ScreenConfig { scan, selection },
    })
}

pub fn build_triage_config(args: &TriageArgs, threads: Option<usize>) -> Result<TriageAppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::load(args.config.as_deref())?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let scan = merge_scan(
        file_config.scan.take().unwrap_or_default(),
        ScanOverrides {
            threads,
            min_score: args.min_score,
            lenient: args.lenient,
        },
        &defaults,
    );
    let export_file = file_config.export.take().unwrap_or_default();

    Ok(TriageAppConfig {
        score_dir: args.score_dir.clone(),
        dest_dir: args.dest_dir.clone(),
        core_config: TriageConfig {
            scan,
            table_file: export_file.table_file.unwrap_or(defaults.table_file),
            optional_suffixes: export_file
                .optional_suffixes
                .unwrap_or(defaults.optional_suffixes),
        },
    })
}

fn merge_scan(file: FileScanConfig, cli: ScanOverrides, defaults: &DefaultsConfig) -> ScanConfig {
    ScanConfig {
        concurrency: cli
            .threads
            .or(file.concurrency)
            .unwrap_or(defaults.concurrency),
        min_score: cli
            .min_score
            .or(file.min_score)
            .unwrap_or(defaults.min_score),
        log_suffix: file
            .log_suffix
            .unwrap_or_else(|| defaults.log_suffix.clone()),
        structure_suffix: file
            .structure_suffix
            .unwrap_or_else(|| defaults.structure_suffix.clone()),
        lenient_score_parse: cli.lenient
            || file
                .lenient_score_parse
                .unwrap_or(defaults.lenient_score_parse),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "scan.concurrency" => {
                config.scan.get_or_insert_with(Default::default).concurrency =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "scan.min-score" => {
                config.scan.get_or_insert_with(Default::default).min_score =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scan.log-suffix" => {
                config.scan.get_or_insert_with(Default::default).log_suffix =
                    Some(value_str.to_string());
            }
            "scan.structure-suffix" => {
                config
                    .scan
                    .get_or_insert_with(Default::default)
                    .structure_suffix = Some(value_str.to_string());
            }
            "scan.lenient-score-parse" => {
                config
                    .scan
                    .get_or_insert_with(Default::default)
                    .lenient_score_parse = Some(parse_value(key, value_str, "boolean")?);
            }
            "selection.sort-by" => {
                config.selection.get_or_insert_with(Default::default).sort_by =
                    Some(value_str.to_string());
            }
            "selection.min-heavy-atoms" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .min_heavy_atoms = Some(parse_value(key, value_str, "integer")?);
            }
            "selection.max-heavy-atoms" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .max_heavy_atoms = Some(parse_value(key, value_str, "integer")?);
            }
            "selection.include-borderline" => {
                config
                    .selection
                    .get_or_insert_with(Default::default)
                    .include_borderline = Some(parse_value(key, value_str, "boolean")?);
            }
            "export.copy" => {
                config.export.get_or_insert_with(Default::default).copy =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "export.optional-suffixes" => {
                config
                    .export
                    .get_or_insert_with(Default::default)
                    .optional_suffixes = Some(
                    value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "export.report-file" => {
                config.export.get_or_insert_with(Default::default).report_file =
                    Some(value_str.to_string());
            }
            "export.table-file" => {
                config.export.get_or_insert_with(Default::default).table_file =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
