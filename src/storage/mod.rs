//! Storage module for persisting matched profiles
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Appending matched profiles with an immediate commit
//! - Read queries used for statistics

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ProfileStore, StorageError, StorageResult};

use crate::SweepError;
use std::path::Path;

/// Placeholder stored when a profile field could not be extracted
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Opens or creates a store database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized store
/// * `Err(SweepError)` - Failed to open the database or create the schema
pub fn open_store(path: &Path) -> Result<SqliteStore, SweepError> {
    SqliteStore::new(path)
}

/// A row about to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub profile_link: String,
    pub name: String,
    pub level: String,
}

/// A row read back from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: i64,
    pub profile_link: String,
    pub name: String,
    pub level: String,
}
