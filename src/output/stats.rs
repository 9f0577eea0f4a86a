//! Walk statistics
//!
//! Diagnostic counters collected by the walker while it runs. The caller gets
//! them back, read-only, when the walk ends.

use crate::state::StopReason;
use chrono::{DateTime, Utc};

/// Statistics of one walk
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Pages fetched and parsed successfully
    pub pages_visited: u32,

    /// Pages that failed to fetch or parse, or were disallowed
    pub pages_skipped: u32,

    /// Records handed to the sink
    pub records_accepted: u64,

    /// Entries discarded for lack of a title
    pub records_discarded: u64,

    /// Optional fields left absent across all accepted records
    pub fields_absent: u64,

    /// Why the walk stopped
    pub stop_reason: Option<StopReason>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStats {
    /// Creates empty statistics for a walk starting now
    pub fn new() -> Self {
        Self {
            pages_visited: 0,
            pages_skipped: 0,
            records_accepted: 0,
            records_discarded: 0,
            fields_absent: 0,
            stop_reason: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Marks the walk as finished
    pub fn finish(&mut self, reason: Option<StopReason>) {
        self.stop_reason = reason;
        self.finished_at = Some(Utc::now());
    }

    /// Total number of page requests made
    pub fn pages_attempted(&self) -> u32 {
        self.pages_visited + self.pages_skipped
    }

    /// Total number of entries found on visited pages
    pub fn entries_seen(&self) -> u64 {
        self.records_accepted + self.records_discarded
    }

    /// Returns true if the walk lost any page, record or field
    pub fn is_degraded(&self) -> bool {
        self.pages_skipped > 0
            || self.records_discarded > 0
            || self.fields_absent > 0
            || !self.stop_reason.is_some_and(|reason| reason.is_complete())
    }

    /// Wall-clock duration of the walk in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at.map(|finished| {
            (finished - self.started_at).num_milliseconds() as f64 / 1000.0
        })
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints the walk summary to stdout in a formatted manner
pub fn print_summary(stats: &RunStats) {
    println!("=== Walk Summary ===\n");

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Skipped: {}", stats.pages_skipped);
    println!();

    println!("Records:");
    println!("  Accepted: {}", stats.records_accepted);
    println!("  Discarded (no title): {}", stats.records_discarded);
    println!("  Absent fields: {}", stats.fields_absent);
    println!();

    match stats.stop_reason {
        Some(reason) => println!("Stopped: {}", reason),
        None => println!("Stopped: unknown"),
    }

    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {:.1}s", seconds);
    }

    let seen = stats.entries_seen();
    let acceptance = if seen > 0 {
        (stats.records_accepted as f64 / seen as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Acceptance Rate: {:.1}% ({} / {} entries)",
        acceptance, stats.records_accepted, seen
    );
}
