use super::config::{HeavyAtomRange, SelectionCriteria, SelectionStrategy};
use crate::core::models::record::Record;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub records: Vec<Record>,
    /// Observed heavy-atom span clamped to the configured bounds; `None` when they do not
    /// overlap or nothing was observed.
    pub effective_range: Option<HeavyAtomRange>,
}

/// Observed span clamped to the configured one.
pub fn effective_range(
    observed: Option<HeavyAtomRange>,
    configured: HeavyAtomRange,
) -> Option<HeavyAtomRange> {
    observed.and_then(|range| range.intersect(configured))
}

/// Applies the heavy-atom filter and the configured strategy to `ranked`, which must already
/// be in ranked order.
#[instrument(skip_all, name = "selection_task", fields(strategy = criteria.strategy.name()))]
pub fn select(
    ranked: &[Record],
    observed: Option<HeavyAtomRange>,
    criteria: &SelectionCriteria,
) -> Selection {
    let Some(range) = effective_range(observed, criteria.heavy_atoms) else {
        debug!("No heavy-atom overlap between observed and configured bounds.");
        return Selection {
            records: Vec::new(),
            effective_range: None,
        };
    };

    let in_range = || ranked.iter().filter(move |r| range.contains(r.heavy_atoms));

    let records: Vec<Record> = match criteria.strategy {
        SelectionStrategy::TopN(n) => in_range().take(n).cloned().collect(),
        SelectionStrategy::TopNPerBucket(n) => (range.min..=range.max)
            .rev()
            .flat_map(|heavy_atoms| {
                ranked
                    .iter()
                    .filter(move |r| r.heavy_atoms == heavy_atoms)
                    .take(n)
            })
            .cloned()
            .collect(),
        SelectionStrategy::Threshold(cutoff) => in_range()
            .take_while(|r| {
                criteria
                    .sort_by
                    .value_of(r)
                    .is_ok_and(|value| value <= cutoff)
            })
            .cloned()
            .collect(),
        SelectionStrategy::All => in_range().cloned().collect(),
    };

    debug!(
        selected = records.len(),
        min_heavy_atoms = range.min,
        max_heavy_atoms = range.max,
        "Selection applied."
    );
    Selection {
        records,
        effective_range: Some(range),
    }
}

/// Human-readable description of what was selected, used as the report intro.
pub fn describe(criteria: &SelectionCriteria, selection: &Selection) -> String {
    let property = criteria.sort_by.label();
    let mut text = match criteria.strategy {
        SelectionStrategy::All => return "Scores of all ligands".to_string(),
        SelectionStrategy::TopN(n) => format!(
            "{} compounds with lowest {} values (lower is better)",
            n, property
        ),
        SelectionStrategy::TopNPerBucket(n) => format!(
            "{} compounds with lowest {} values per heavy atom (lower is better; {} compounds in total)",
            n,
            property,
            selection.records.len()
        ),
        SelectionStrategy::Threshold(cutoff) => format!(
            "{} compounds with {} values <= {:.6} (lower is better)",
            selection.records.len(),
            property,
            cutoff
        ),
    };

    let per_bucket = matches!(criteria.strategy, SelectionStrategy::TopNPerBucket(_));
    let defaults = HeavyAtomRange::default();
    let effective = selection.effective_range.unwrap_or(criteria.heavy_atoms);
    if per_bucket || criteria.heavy_atoms.min > defaults.min {
        text.push_str(&format!(
            "\nMinimum number of heavy atoms: {}",
            effective.min
        ));
    }
    if per_bucket || criteria.heavy_atoms.max < defaults.max {
        text.push_str(&format!(
            "\nMaximum number of heavy atoms: {}",
            effective.max
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::Status;
    use crate::engine::config::{SelectionCriteriaBuilder, SortMetric};

    fn ranked_records() -> Vec<Record> {
        vec![
            Record::new("a", -9.2, 20, Status::Ok),
            Record::new("b", -8.7, 19, Status::Ok),
            Record::new("c", -8.4, 20, Status::Ok),
            Record::new("d", -7.1, 18, Status::Ok),
        ]
    }

    fn ids(selection: &Selection) -> Vec<&str> {
        selection.records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn top_n_takes_leading_records() {
        let criteria = SelectionCriteriaBuilder::new().top_n(3).build().unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(ids(&selection), vec!["a", "b", "c"]);
    }

    #[test]
    fn top_n_larger_than_input_returns_everything_in_range() {
        let criteria = SelectionCriteriaBuilder::new().top_n(50).build().unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(selection.records.len(), 4);
    }

    #[test]
    fn per_bucket_keeps_best_of_each_heavy_atom_count() {
        let criteria = SelectionCriteriaBuilder::new()
            .top_n_per_bucket(1)
            .build()
            .unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(ids(&selection), vec!["a", "b", "d"]);
    }

    #[test]
    fn threshold_stops_at_first_record_above_cutoff() {
        let criteria = SelectionCriteriaBuilder::new()
            .threshold(-8.5)
            .build()
            .unwrap();
        let mut ranked = ranked_records();
        // A better record after the cutoff is never reached.
        ranked.push(Record::new("e", -11.0, 20, Status::Ok));

        let selection = select(&ranked, Some(HeavyAtomRange::new(18, 20)), &criteria);
        assert_eq!(ids(&selection), vec!["a", "b"]);
    }

    #[test]
    fn threshold_on_efficiency_uses_derived_metric() {
        let criteria = SelectionCriteriaBuilder::new()
            .sort_by(SortMetric::Efficiency)
            .threshold(-4.5)
            .build()
            .unwrap();
        let ranked = vec![
            Record::new("a", -9.2, 20, Status::Ok),
            Record::new("b", -8.7, 19, Status::Ok),
            Record::new("c", -8.4, 20, Status::Ok),
        ];
        // Efficiencies: a -4.600, b -4.579, c -4.200.
        let selection = select(&ranked, Some(HeavyAtomRange::new(19, 20)), &criteria);
        assert_eq!(ids(&selection), vec!["a", "b"]);
    }

    #[test]
    fn configured_bounds_clamp_observed_range() {
        let criteria = SelectionCriteriaBuilder::new()
            .top_n(10)
            .min_heavy_atoms(19)
            .build()
            .unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(selection.effective_range, Some(HeavyAtomRange::new(19, 20)));
        assert_eq!(ids(&selection), vec!["a", "b", "c"]);
    }

    #[test]
    fn selection_never_leaves_effective_range() {
        let ranked = ranked_records();
        let observed = Some(HeavyAtomRange::new(18, 20));
        let bounds = [(0, 255), (0, 18), (19, 19), (20, 255), (21, 40), (0, 17)];
        for (min, max) in bounds {
            for criteria in [
                SelectionCriteriaBuilder::new().top_n(10),
                SelectionCriteriaBuilder::new().top_n_per_bucket(10),
                SelectionCriteriaBuilder::new().threshold(-0.5),
                SelectionCriteriaBuilder::new().all(),
            ] {
                let criteria = criteria
                    .min_heavy_atoms(min)
                    .max_heavy_atoms(max)
                    .build()
                    .unwrap();
                let selection = select(&ranked, observed, &criteria);
                let expected = effective_range(observed, criteria.heavy_atoms);
                assert_eq!(selection.effective_range, expected);
                match expected {
                    Some(range) => assert!(
                        selection
                            .records
                            .iter()
                            .all(|r| range.contains(r.heavy_atoms))
                    ),
                    None => assert!(selection.records.is_empty()),
                }
            }
        }
    }

    #[test]
    fn nothing_observed_selects_nothing() {
        let criteria = SelectionCriteriaBuilder::new().top_n(5).build().unwrap();
        let selection = select(&ranked_records(), None, &criteria);
        assert!(selection.records.is_empty());
        assert_eq!(selection.effective_range, None);
    }

    #[test]
    fn description_matches_strategy() {
        let criteria = SelectionCriteriaBuilder::new().top_n(3).build().unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(
            describe(&criteria, &selection),
            "3 compounds with lowest score values (lower is better)"
        );

        let criteria = SelectionCriteriaBuilder::new()
            .top_n_per_bucket(1)
            .sort_by(SortMetric::Efficiency)
            .build()
            .unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(
            describe(&criteria, &selection),
            "1 compounds with lowest ligand efficiency values per heavy atom \
             (lower is better; 3 compounds in total)\n\
             Minimum number of heavy atoms: 18\n\
             Maximum number of heavy atoms: 20"
        );
    }

    #[test]
    fn description_mentions_non_default_bounds_only() {
        let criteria = SelectionCriteriaBuilder::new()
            .threshold(-8.5)
            .max_heavy_atoms(19)
            .build()
            .unwrap();
        let selection = select(
            &ranked_records(),
            Some(HeavyAtomRange::new(18, 20)),
            &criteria,
        );
        assert_eq!(
            describe(&criteria, &selection),
            "1 compounds with score values <= -8.500000 (lower is better)\n\
             Maximum number of heavy atoms: 19"
        );
    }
}
