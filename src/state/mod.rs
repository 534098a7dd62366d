//! State module for tracking sweep progress
//!
//! # Components
//!
//! - `TaskOutcome`: how a single identifier's task finished
//! - `RunSummary`: per-outcome counts for a whole dispatcher run

mod outcome;
mod run_summary;

// Re-export main types
pub use outcome::TaskOutcome;
pub use run_summary::RunSummary;
