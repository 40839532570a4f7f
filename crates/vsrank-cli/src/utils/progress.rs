use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;
use vsrank::core::models::record::Status;
use vsrank::engine::progress::{Progress, ProgressCallback};

const SPINNER_TICK_MS: u64 = 80;
const SCAN_TEMPLATE: &str = "{prefix:<14} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix} {msg}";

/// Running tally of the files seen during one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ScanTally {
    usable: u64,
    unusable: u64,
}

impl ScanTally {
    fn record(&mut self, status: Status) {
        if status.carries_data() {
            self.usable += 1;
        } else {
            self.unusable += 1;
        }
    }

    fn summary(&self) -> String {
        format!("{} usable, {} unusable", self.usable, self.unusable)
    }
}

struct ScanDisplay {
    bar: ProgressBar,
    phase: &'static str,
    tally: Option<ScanTally>,
}

impl ScanDisplay {
    fn start_phase(&mut self, name: &'static str) {
        self.phase = name;
        self.tally = None;
        self.bar.reset();
        self.bar.set_style(spinner_style());
        self.bar.set_prefix(name);
        self.bar.set_message("");
        self.bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    }

    fn start_scan(&mut self, total_files: u64) {
        self.tally = Some(ScanTally::default());
        self.bar.disable_steady_tick();
        self.bar.reset();
        self.bar.set_length(total_files);
        self.bar.set_style(scan_style());
        self.bar.set_message(ScanTally::default().summary());
    }

    fn file_scanned(&mut self, status: Status) {
        let tally = self.tally.get_or_insert_with(ScanTally::default);
        tally.record(status);
        self.bar.set_message(tally.summary());
        self.bar.inc(1);
    }

    fn finish_scan(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
    }

    fn finish_phase(&self) {
        self.bar.disable_steady_tick();
        let message = match &self.tally {
            Some(tally) => format!("✓ {}: {}", self.phase, tally.summary()),
            None => format!("✓ {}", self.phase),
        };
        self.bar.finish_with_message(message);
    }
}

/// Renders workflow progress on stderr: a spinner per phase and, while logs are scanned, a bar
/// that keeps count of the ligands that yielded no usable score.
#[derive(Clone)]
pub struct CliProgressHandler {
    display: Arc<Mutex<ScanDisplay>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.finish_and_clear();
        Self {
            display: Arc::new(Mutex::new(ScanDisplay {
                bar,
                phase: "",
                tally: None,
            })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let display = self.display.clone();
        Box::new(move |event: Progress| {
            let Ok(mut display) = display.lock() else {
                warn!("Progress display mutex was poisoned; dropping event.");
                return;
            };
            match event {
                Progress::PhaseStart { name } => display.start_phase(name),
                Progress::ScanStart { total_files } => display.start_scan(total_files),
                Progress::FileScanned { status } => display.file_scanned(status),
                Progress::ScanFinish => display.finish_scan(),
                Progress::PhaseFinish => display.finish_phase(),
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn scan_style() -> ProgressStyle {
    ProgressStyle::with_template(SCAN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn tally_separates_usable_from_failed_ligands() {
        let mut tally = ScanTally::default();
        for status in [
            Status::Ok,
            Status::LowScore,
            Status::ImplausibleScore,
            Status::ReadError,
            Status::AtomCountError,
        ] {
            tally.record(status);
        }
        assert_eq!(tally, ScanTally { usable: 3, unusable: 2 });
        assert_eq!(tally.summary(), "3 usable, 2 unusable");
    }

    #[test]
    fn scan_bar_counts_failures_as_files_arrive() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Scanning Logs",
        });
        callback(Progress::ScanStart { total_files: 4 });
        callback(Progress::FileScanned { status: Status::Ok });
        callback(Progress::FileScanned {
            status: Status::StartMarkerNotFound,
        });
        {
            let display = handler.display.lock().unwrap();
            assert_eq!(display.bar.length(), Some(4));
            assert_eq!(display.bar.position(), 2);
            assert_eq!(display.bar.prefix(), "Scanning Logs");
            assert_eq!(display.bar.message(), "1 usable, 1 unusable");
        }

        callback(Progress::ScanFinish);
        callback(Progress::PhaseFinish);
        let display = handler.display.lock().unwrap();
        assert_eq!(display.bar.position(), 4);
        assert!(display.bar.is_finished());
        assert_eq!(display.bar.message(), "✓ Scanning Logs: 1 usable, 1 unusable");
    }

    #[test]
    fn phases_without_a_scan_finish_plainly() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Scanning Logs",
        });
        callback(Progress::ScanStart { total_files: 1 });
        callback(Progress::FileScanned { status: Status::Ok });
        callback(Progress::PhaseFinish);
        callback(Progress::PhaseStart { name: "Ranking" });
        callback(Progress::PhaseFinish);

        let display = handler.display.lock().unwrap();
        assert_eq!(display.bar.message(), "✓ Ranking");
    }

    #[test]
    fn callback_can_run_on_another_thread() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Copying Hits",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let display = handler.display.lock().unwrap();
        assert!(display.bar.is_finished());
        assert_eq!(display.bar.message(), "✓ Copying Hits");
    }
}
