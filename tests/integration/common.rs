//! Shared fixtures for the integration tests

use profile_sweep::config::{Config, DispatchConfig, ExtractorConfig, OutputConfig, ProbeConfig};
use profile_sweep::output::{network_failure_line, processed_line, timeout_line, ProgressReporter};
use profile_sweep::probe::FetchError;
use profile_sweep::state::RunSummary;
use profile_sweep::storage::NewRecord;
use std::sync::Mutex;
use std::time::Duration;

pub const NOT_FOUND_MARKER: &str = "The specified profile could not be found.";

pub fn not_found_page() -> String {
    format!(
        r#"<html><body><div id="message"><h3>{}</h3></div></body></html>"#,
        NOT_FOUND_MARKER
    )
}

pub fn profile_page(name: &str, level: &str) -> String {
    format!(
        r#"<html><body>
            <div class="profile_header">
                <span class="actual_persona_name">{}</span>
                <div class="persona_name persona_level">Level <span class="friendPlayerLevelNum">{}</span></div>
            </div>
        </body></html>"#,
        name, level
    )
}

/// Creates a test configuration probing `base_url` over `alphabet` at length 1
pub fn create_test_config(base_url: &str, alphabet: &str, db_path: &str) -> Config {
    Config {
        probe: ProbeConfig {
            base_url: base_url.to_string(),
            alphabet: alphabet.to_string(),
            length: 1,
        },
        dispatch: DispatchConfig {
            max_concurrent: 2,
            request_timeout: 500,  // Short deadline for testing
            timeout_backoff: 100,
        },
        extractor: ExtractorConfig {
            not_found_marker: NOT_FOUND_MARKER.to_string(),
            level_label: "Level".to_string(),
            ..ExtractorConfig::default()
        },
        http: Default::default(),
        output: OutputConfig {
            database_path: db_path.to_string(),
        },
    }
}

/// Collects the console lines a sweep would print
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
    summaries: Mutex<Vec<RunSummary>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn lines_starting_with(&self, prefix: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.starts_with(prefix))
            .collect()
    }

    pub fn finished_count(&self) -> usize {
        self.summaries.lock().unwrap().len()
    }
}

impl ProgressReporter for RecordingReporter {
    fn processed(&self, record: &NewRecord) {
        self.lines.lock().unwrap().push(processed_line(record));
    }

    fn timed_out(&self, profile_link: &str, backoff: Duration) {
        self.lines
            .lock()
            .unwrap()
            .push(timeout_line(profile_link, backoff));
    }

    fn network_failed(&self, profile_link: &str, error: &FetchError, backoff: Duration) {
        self.lines
            .lock()
            .unwrap()
            .push(network_failure_line(profile_link, error, backoff));
    }

    fn finished(&self, summary: &RunSummary) {
        self.summaries.lock().unwrap().push(summary.clone());
    }
}
