use crate::ident::{DEFAULT_ALPHABET, DEFAULT_LENGTH};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Profile Sweep
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: ProbeConfig,
    pub dispatch: DispatchConfig,
    pub extractor: ExtractorConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// What to probe: the profile base URL and the identifier space
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Profile links are `base-url` followed by the identifier
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Identifier symbols in generation order
    pub alphabet: String,

    /// Identifier length
    pub length: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://steamcommunity.com/id/".to_string(),
            alphabet: DEFAULT_ALPHABET.to_string(),
            length: DEFAULT_LENGTH,
        }
    }
}

/// Dispatcher behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum number of tasks holding a slot at once
    #[serde(rename = "max-concurrent")]
    pub max_concurrent: u32,

    /// Deadline for one fetch + extract (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Delay after a timeout before the slot is released (milliseconds)
    #[serde(rename = "timeout-backoff")]
    pub timeout_backoff: u64,
}

impl DispatchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout)
    }

    pub fn timeout_backoff(&self) -> Duration {
        Duration::from_millis(self.timeout_backoff)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 50,
            request_timeout: 30_000,
            timeout_backoff: 5_000,
        }
    }
}

/// Profile page extraction rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Substring whose presence means the profile does not exist
    #[serde(rename = "not-found-marker")]
    pub not_found_marker: String,

    /// CSS selector for the display name element
    #[serde(rename = "name-selector")]
    pub name_selector: String,

    /// CSS selector for the level element
    #[serde(rename = "level-selector")]
    pub level_selector: String,

    /// Label removed from the level element text
    #[serde(rename = "level-label")]
    pub level_label: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            not_found_marker: "Указанный профиль не найден.".to_string(),
            name_selector: "span.actual_persona_name".to_string(),
            level_selector: "div.persona_name.persona_level".to_string(),
            level_label: "Уровень".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Optional User-Agent header; the client default is used when unset
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "user_data.db".to_string(),
        }
    }
}
