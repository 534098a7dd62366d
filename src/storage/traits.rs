//! Storage traits and error types
//!
//! This module defines the trait interface for the result store and
//! associated error types.

use crate::storage::{NewRecord, StoredRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for result store implementations
///
/// The store is append-only. Implementations are driven from many tasks
/// through a mutex held by the dispatcher, so each call must finish its
/// work (including the commit) before returning.
pub trait ProfileStore {
    // ===== Writes =====

    /// Appends one row and commits it
    ///
    /// # Arguments
    ///
    /// * `record` - The profile link and extracted fields
    ///
    /// # Returns
    ///
    /// The auto-assigned id of the new row
    fn insert(&mut self, record: &NewRecord) -> StorageResult<i64>;

    // ===== Reads =====

    /// Counts all rows
    fn count_records(&self) -> StorageResult<u64>;

    /// Counts distinct profile links
    fn count_distinct_links(&self) -> StorageResult<u64>;

    /// Counts rows whose name resolved to the unknown placeholder
    fn count_unknown_names(&self) -> StorageResult<u64>;

    /// Counts rows whose level resolved to the unknown placeholder
    fn count_unknown_levels(&self) -> StorageResult<u64>;

    /// Gets every row stored for a profile link, oldest first
    fn records_for_link(&self, profile_link: &str) -> StorageResult<Vec<StoredRecord>>;

    /// Gets the most recently inserted rows, newest first
    fn recent_records(&self, limit: usize) -> StorageResult<Vec<StoredRecord>>;
}
