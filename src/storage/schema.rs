//! Database schema definitions
//!
//! This module contains the SQL schema for the Profile Sweep database.

/// SQL schema for the database
///
/// No uniqueness constraint on `profile_link`: each run appends its matches.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_link TEXT,
    name TEXT,
    level TEXT
);

CREATE INDEX IF NOT EXISTS idx_users_profile_link ON users(profile_link);
"#;

/// Creates the `users` table and its index if they do not exist yet
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
