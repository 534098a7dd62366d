//! Integration tests for Profile Sweep
//!
//! These tests use wiremock to stand in for the profile service and run the
//! fetcher and the full sweep against it.

mod common;
mod fetcher_tests;
mod sweep_tests;
