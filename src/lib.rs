//! Profile Sweep: an exhaustive short-identifier profile prober
//!
//! This crate enumerates every identifier over a small alphabet, probes a
//! profile-hosting service for each one under a global concurrency cap,
//! extracts the display name and level from the returned page, and appends
//! every match to a SQLite store.

pub mod config;
pub mod ident;
pub mod output;
pub mod probe;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Profile Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Concurrency gate closed while waiting for a slot")]
    SlotsClosed,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Base URL must end with '/': {0}")]
    MissingTrailingSlash(String),
}

/// Result type alias for Profile Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use ident::{Identifier, IdentifierSpace};
pub use state::TaskOutcome;
pub use url::ProfileBase;
