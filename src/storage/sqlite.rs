//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ProfileStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProfileStore, StorageError, StorageResult};
use crate::storage::{NewRecord, StoredRecord, UNKNOWN_FIELD};
use crate::SweepError;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(SweepError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, SweepError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, SweepError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn count(&self, sql: &str, value: Option<&str>) -> StorageResult<u64> {
        let count: i64 = match value {
            Some(value) => self.conn.query_row(sql, params![value], |row| row.get(0))?,
            None => self.conn.query_row(sql, [], |row| row.get(0))?,
        };
        Ok(count as u64)
    }
}

/// Maps a users row; NULL columns written by other tools read back as empty
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<StoredRecord> {
    Ok(StoredRecord {
        id: row.get(0)?,
        profile_link: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        level: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

/// Surfaces constraint failures as their own error kind
fn classify_write_error(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StorageError::ConstraintViolation(
                message.clone().unwrap_or_else(|| failure.to_string()),
            )
        }
        _ => StorageError::Sqlite(err),
    }
}

impl ProfileStore for SqliteStore {
    // ===== Writes =====

    fn insert(&mut self, record: &NewRecord) -> StorageResult<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO users (profile_link, name, level) VALUES (?1, ?2, ?3)",
            params![record.profile_link, record.name, record.level],
        )
        .map_err(classify_write_error)?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
    }

    // ===== Reads =====

    fn count_records(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM users", None)
    }

    fn count_distinct_links(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(DISTINCT profile_link) FROM users", None)
    }

    fn count_unknown_names(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM users WHERE name = ?1", Some(UNKNOWN_FIELD))
    }

    fn count_unknown_levels(&self) -> StorageResult<u64> {
        self.count(
            "SELECT COUNT(*) FROM users WHERE level = ?1",
            Some(UNKNOWN_FIELD),
        )
    }

    fn records_for_link(&self, profile_link: &str) -> StorageResult<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, profile_link, name, level FROM users WHERE profile_link = ?1 ORDER BY id",
        )?;

        let records = stmt
            .query_map(params![profile_link], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn recent_records(&self, limit: usize) -> StorageResult<Vec<StoredRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, profile_link, name, level FROM users ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = stmt
            .query_map(params![limit], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
