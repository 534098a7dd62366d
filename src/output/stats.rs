//! Statistics generation from the profile store
//!
//! This module provides functionality for extracting and displaying
//! statistics about stored profiles.

use crate::storage::{ProfileStore, StoredRecord};
use crate::SweepError;

/// Number of latest rows shown by `print_statistics`
const RECENT_ROWS: usize = 10;

/// Store statistics summary
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Total number of rows
    pub total_records: u64,

    /// Number of distinct profile links
    pub distinct_links: u64,

    /// Rows whose name could not be extracted
    pub unknown_names: u64,

    /// Rows whose level could not be extracted
    pub unknown_levels: u64,

    /// Latest rows, newest first
    pub recent: Vec<StoredRecord>,
}

impl StoreStatistics {
    /// Rows beyond the first for each link (left by repeated sweeps)
    pub fn duplicate_records(&self) -> u64 {
        self.total_records.saturating_sub(self.distinct_links)
    }
}

/// Loads statistics from the store
///
/// # Arguments
///
/// * `store` - The store to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(SweepError)` - Failed to query statistics
pub fn load_statistics(store: &dyn ProfileStore) -> Result<StoreStatistics, SweepError> {
    Ok(StoreStatistics {
        total_records: store.count_records()?,
        distinct_links: store.count_distinct_links()?,
        unknown_names: store.count_unknown_names()?,
        unknown_levels: store.count_unknown_levels()?,
        recent: store.recent_records(RECENT_ROWS)?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Profile Store Statistics ===\n");

    println!("Overview:");
    println!("  Total rows: {}", stats.total_records);
    println!("  Distinct profile links: {}", stats.distinct_links);
    println!("  Duplicate rows: {}", stats.duplicate_records());
    println!();

    println!("Extraction Gaps:");
    println!(
        "  Unknown name: {} ({:.1}%)",
        stats.unknown_names,
        percentage(stats.unknown_names, stats.total_records)
    );
    println!(
        "  Unknown level: {} ({:.1}%)",
        stats.unknown_levels,
        percentage(stats.unknown_levels, stats.total_records)
    );
    println!();

    if !stats.recent.is_empty() {
        println!("Latest Rows ({}):", stats.recent.len());
        for record in &stats.recent {
            println!(
                "  #{} {} - {} - {}",
                record.id, record.profile_link, record.name, record.level
            );
        }
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
