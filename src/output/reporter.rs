//! Progress reporting
//!
//! The dispatcher emits events through [`ProgressReporter`]; the binary
//! prints them with [`ConsoleReporter`].

use crate::probe::FetchError;
use crate::state::{RunSummary, TaskOutcome};
use crate::storage::NewRecord;
use std::time::Duration;

/// Receives progress events from the dispatcher
///
/// Called concurrently from many tasks.
pub trait ProgressReporter: Send + Sync {
    /// A profile was committed to the store
    fn processed(&self, record: &NewRecord);

    /// A lookup exceeded its deadline; the task now sleeps for `backoff`
    fn timed_out(&self, profile_link: &str, backoff: Duration);

    /// A lookup failed at the connection level; the task now sleeps for `backoff`
    fn network_failed(&self, profile_link: &str, error: &FetchError, backoff: Duration);

    /// Every task has finished
    fn finished(&self, summary: &RunSummary);
}

/// `Processed: <link> - <name> - <level>`
pub fn processed_line(record: &NewRecord) -> String {
    format!(
        "Processed: {} - {} - {}",
        record.profile_link, record.name, record.level
    )
}

/// `Timeout error for <link>. Waiting for <n> seconds...`
pub fn timeout_line(profile_link: &str, backoff: Duration) -> String {
    format!(
        "Timeout error for {}. Waiting for {} seconds...",
        profile_link,
        backoff_seconds(backoff)
    )
}

/// `Network error for <link>: <error>. Waiting for <n> seconds...`
pub fn network_failure_line(profile_link: &str, error: &FetchError, backoff: Duration) -> String {
    let reason = match error {
        FetchError::Network { message, .. } => message.clone(),
        FetchError::Timeout { .. } => "timeout".to_string(),
    };
    format!(
        "Network error for {}: {}. Waiting for {} seconds...",
        profile_link,
        reason,
        backoff_seconds(backoff)
    )
}

/// One-line run summary for the log
pub fn summary_line(summary: &RunSummary) -> String {
    format!(
        "Sweep started {} finished: {} dispatched, {} stored, {} not found, {} dropped ({} timed out, {} network failures, {} store failures, {} aborted) in {:?} ({:.2} ids/sec)",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        summary.dispatched,
        summary.count(TaskOutcome::Stored),
        summary.count(TaskOutcome::NotFound),
        summary.dropped(),
        summary.count(TaskOutcome::TimedOut),
        summary.count(TaskOutcome::NetworkFailed),
        summary.count(TaskOutcome::StoreFailed),
        summary.count(TaskOutcome::Aborted),
        summary.elapsed,
        summary.rate()
    )
}

/// Final line printed once the sweep has finished
pub fn completion_line() -> &'static str {
    "Parsing and data insertion complete."
}

/// Whole seconds, or fractional seconds for sub-second backoffs
fn backoff_seconds(backoff: Duration) -> String {
    if backoff.subsec_nanos() == 0 {
        backoff.as_secs().to_string()
    } else {
        format!("{}", backoff.as_secs_f64())
    }
}

/// Prints progress lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn processed(&self, record: &NewRecord) {
        println!("{}", processed_line(record));
    }

    fn timed_out(&self, profile_link: &str, backoff: Duration) {
        println!("{}", timeout_line(profile_link, backoff));
    }

    fn network_failed(&self, profile_link: &str, error: &FetchError, backoff: Duration) {
        println!("{}", network_failure_line(profile_link, error, backoff));
    }

    fn finished(&self, summary: &RunSummary) {
        tracing::info!("{}", summary_line(summary));
        println!("{}", completion_line());
    }
}
