use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Returns a formatted string of elapsed time, e.g.
/// `1min 34.852s`
pub fn get_formatted_elapsed_time(instant: Instant) -> String {
    let dur = instant.elapsed();
    let minutes = dur.as_secs() / 60;
    let sub_sec = dur.as_secs() % 60;
    let sub_milli = dur.subsec_millis();
    if minutes > 0 {
        return format!("{}min {}.{:03}s", minutes, sub_sec, sub_milli);
    }
    format!("{}.{:03}s", sub_sec, sub_milli)
}

/// Whole-percentage progress for a fixed number of work items. Safe to share
/// between worker threads; each percentage step is logged once.
pub struct Progress {
    label: String,
    total: usize,
    completed: AtomicUsize,
    last_reported: AtomicUsize,
    verbose: bool,
}

impl Progress {
    pub fn new(label: &str, total: usize, verbose: bool) -> Progress {
        Progress {
            label: label.to_string(),
            total,
            completed: AtomicUsize::new(0),
            last_reported: AtomicUsize::new(usize::MAX),
            verbose,
        }
    }

    /// Marks one item as done and returns the current percentage.
    pub fn increment(&self) -> usize {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        let percent = if self.total == 0 {
            100
        } else {
            (100 * done.min(self.total)) / self.total
        };
        if self.verbose && self.last_reported.swap(percent, Ordering::SeqCst) != percent {
            info!("{}: {}%", self.label, percent);
        }
        percent
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}
