use crate::config::types::{Config, DispatchConfig, ExtractorConfig, OutputConfig, ProbeConfig};
use crate::ident::IdentifierSpace;
use crate::probe::compile_selector;
use crate::url::ProfileBase;
use crate::ConfigError;

/// Upper bound on the concurrency cap
const MAX_CONCURRENT_LIMIT: u32 = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_config(&config.probe)?;
    validate_dispatch_config(&config.dispatch)?;
    validate_extractor_config(&config.extractor)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the base URL and identifier space
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    ProfileBase::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    IdentifierSpace::new(&config.alphabet, config.length)?;

    // Identifiers are appended to the link verbatim
    if let Some(c) = config
        .alphabet
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
    {
        return Err(ConfigError::Validation(format!(
            "alphabet symbol '{}' cannot appear in a URL path segment",
            c.escape_default()
        )));
    }

    Ok(())
}

/// Validates dispatcher configuration
fn validate_dispatch_config(config: &DispatchConfig) -> Result<(), ConfigError> {
    if config.max_concurrent < 1 || config.max_concurrent > MAX_CONCURRENT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-concurrent must be between 1 and {}, got {}",
            MAX_CONCURRENT_LIMIT, config.max_concurrent
        )));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "request-timeout must be > 0ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates extractor configuration
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.not_found_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "not-found-marker cannot be empty".to_string(),
        ));
    }

    compile_selector(&config.name_selector)?;
    compile_selector(&config.level_selector)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
