//! URL handling module for Profile Sweep
//!
//! This module validates the configured profile base URL and derives the
//! profile link probed for each identifier.

mod base;

pub use base::ProfileBase;
