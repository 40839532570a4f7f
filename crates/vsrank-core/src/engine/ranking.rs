use super::config::SortMetric;
use crate::core::models::record::Record;
use std::cmp::Ordering;
use tracing::{instrument, warn};

/// Orders metric values ascending; records whose metric could not be computed go last and
/// compare equal among themselves.
pub fn compare_metric(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts `records` ascending by `metric` (best first). The sort is stable, so records with
/// identical metric values keep their input order.
#[instrument(skip_all, name = "ranking_task", fields(metric = %metric, records = records.len()))]
pub fn rank(records: Vec<Record>, metric: SortMetric) -> Vec<Record> {
    let mut keyed: Vec<(Option<f32>, Record)> = records
        .into_iter()
        .map(|record| {
            let key = match metric.value_of(&record) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(ligand = %record.id, "Cannot rank by {}: {}", metric, e);
                    None
                }
            };
            (key, record)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_metric(*a, *b));
    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::Status;

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            Record::new("first", -9.0, 20, Status::Ok),
            Record::new("middle", -7.0, 20, Status::Ok),
            Record::new("last", -9.0, 20, Status::Ok),
        ];
        let ranked = rank(records, SortMetric::Score);
        assert_eq!(ids(&ranked), vec!["first", "last", "middle"]);
        let scores: Vec<_> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![-9.0, -9.0, -7.0]);
    }

    #[test]
    fn efficiency_ranking_normalizes_by_size() {
        let records = vec![
            Record::new("big", -12.0, 40, Status::Ok),
            Record::new("small", -8.0, 16, Status::Ok),
        ];
        let ranked = rank(records, SortMetric::Efficiency);
        assert_eq!(ids(&ranked), vec!["small", "big"]);
    }

    #[test]
    fn failed_efficiency_sorts_last_and_stays_stable() {
        let records = vec![
            Record::failed("broken_1", Status::AtomCountError),
            Record::new("ok", -9.0, 20, Status::Ok),
            Record::failed("broken_2", Status::AtomCountError),
        ];
        let ranked = rank(records, SortMetric::Efficiency);
        assert_eq!(ids(&ranked), vec!["ok", "broken_1", "broken_2"]);
    }

    #[test]
    fn missing_metrics_compare_equal() {
        assert_eq!(compare_metric(None, None), Ordering::Equal);
        assert_eq!(compare_metric(Some(5.0), None), Ordering::Less);
        assert_eq!(compare_metric(None, Some(-5.0)), Ordering::Greater);
        assert_eq!(compare_metric(Some(-5.0), Some(5.0)), Ordering::Less);
    }
}
