//! Output module for console reporting and statistics
//!
//! This module handles:
//! - The per-match, per-timeout and completion lines printed during a sweep
//! - Statistics over the stored profiles (`--stats`)

mod reporter;
pub mod stats;

pub use reporter::{
    completion_line, network_failure_line, processed_line, summary_line, timeout_line,
    ConsoleReporter, ProgressReporter,
};
pub use stats::{load_statistics, print_statistics, StoreStatistics};
