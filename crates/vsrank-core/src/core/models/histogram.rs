use super::record::Status;
use std::collections::BTreeMap;
use std::fmt;

/// Per-status tally of a scan. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeHistogram {
    counts: BTreeMap<Status, usize>,
}

impl OutcomeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: Status) {
        *self.counts.entry(status).or_insert(0) += 1;
    }

    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        Status::ALL.iter().map(|&status| (status, self.count(status)))
    }
}

impl fmt::Display for OutcomeHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20}{:>6}", "Logfiles scanned:", self.total())?;
        for (status, count) in self.iter() {
            // Lenient parsing is opt-in; keep the table quiet when it never fired.
            if status == Status::ScoreParseError && count == 0 {
                continue;
            }
            writeln!(f, "{:<20}{:>6}", format!("{}:", status.label()), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_status() {
        let mut histogram = OutcomeHistogram::new();
        histogram.record(Status::Ok);
        histogram.record(Status::Ok);
        histogram.record(Status::ReadError);

        assert_eq!(histogram.count(Status::Ok), 2);
        assert_eq!(histogram.count(Status::ReadError), 1);
        assert_eq!(histogram.count(Status::LowScore), 0);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn display_renders_fixed_width_lines() {
        let mut histogram = OutcomeHistogram::new();
        histogram.record(Status::Ok);
        histogram.record(Status::AtomCountError);

        let rendered = histogram.to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "Logfiles scanned:        2");
        assert_eq!(lines[1], "Ok:                      1");
        assert!(lines.contains(&"AtomCountError:          1"));
        assert_eq!(lines.len(), 9);
        assert!(!rendered.contains("ScoreParseError"));
    }

    #[test]
    fn display_includes_score_parse_errors_when_present() {
        let mut histogram = OutcomeHistogram::new();
        histogram.record(Status::ScoreParseError);
        assert!(histogram.to_string().contains("ScoreParseError:         1"));
    }
}
