//! Configuration module for Profile Sweep
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a sweep with no
//! configuration file probes the default identifier space with a cap of 50
//! in-flight requests, a 30 second deadline and a 5 second timeout backoff.
//!
//! # Example
//!
//! ```no_run
//! use profile_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Probing {}", config.probe.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DispatchConfig, ExtractorConfig, HttpConfig, OutputConfig, ProbeConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
