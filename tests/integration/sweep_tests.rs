//! End-to-end sweep tests: mock profile service, real HTTP client, SQLite file

use crate::common::{create_test_config, not_found_page, profile_page, RecordingReporter};
use profile_sweep::config::load_config;
use profile_sweep::output::load_statistics;
use profile_sweep::probe::run_sweep;
use profile_sweep::storage::{open_store, ProfileStore};
use profile_sweep::TaskOutcome;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts: `a` not found, `b` is Bob at level 7, `c` never answers in time
async fn mount_profiles(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/id/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(not_found_page()))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/id/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("Bob", "7")))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/id/c"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(profile_page("Carol", "9"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_sweep_stores_only_found_profiles() {
    let mock_server = MockServer::start().await;
    mount_profiles(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("profiles.db");
    let base_url = format!("{}/id/", mock_server.uri());
    let config = create_test_config(&base_url, "abc", db_path.to_str().unwrap());

    let reporter = Arc::new(RecordingReporter::default());
    let summary = run_sweep(&config, reporter.clone()).await.unwrap();

    assert_eq!(summary.dispatched, 3);
    assert_eq!(summary.count(TaskOutcome::NotFound), 1);
    assert_eq!(summary.count(TaskOutcome::Stored), 1);
    assert_eq!(summary.count(TaskOutcome::TimedOut), 1);
    assert_eq!(reporter.finished_count(), 1);

    // Every identifier was requested exactly once
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    let store = open_store(&db_path).unwrap();
    assert_eq!(store.count_records().unwrap(), 1);

    let rows = store
        .records_for_link(&format!("{}b", base_url))
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bob");
    assert_eq!(rows[0].level, "7");

    assert_eq!(
        reporter.lines_starting_with("Processed:"),
        vec![format!("Processed: {}b - Bob - 7", base_url)]
    );
    assert_eq!(
        reporter.lines_starting_with("Timeout error for"),
        vec![format!(
            "Timeout error for {}c. Waiting for 0.1 seconds...",
            base_url
        )]
    );
}

#[tokio::test]
async fn test_repeated_sweeps_append_duplicates() {
    let mock_server = MockServer::start().await;
    mount_profiles(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("profiles.db");
    let base_url = format!("{}/id/", mock_server.uri());
    // Skip the slow identifier to keep the run short
    let config = create_test_config(&base_url, "ab", db_path.to_str().unwrap());

    for _ in 0..2 {
        let summary = run_sweep(&config, Arc::new(RecordingReporter::default()))
            .await
            .unwrap();
        assert_eq!(summary.count(TaskOutcome::Stored), 1);
    }

    let store = open_store(&db_path).unwrap();
    let stats = load_statistics(&store).unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.distinct_links, 1);
    assert_eq!(stats.duplicate_records(), 1);
    assert_eq!(stats.unknown_names, 0);
}

#[tokio::test]
async fn test_unreachable_service_drops_every_identifier() {
    // Bind and drop a listener to get a port with nothing behind it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("profiles.db");
    let base_url = format!("http://127.0.0.1:{}/id/", port);
    let config = create_test_config(&base_url, "ab", db_path.to_str().unwrap());

    let reporter = Arc::new(RecordingReporter::default());
    let summary = run_sweep(&config, reporter.clone()).await.unwrap();

    assert_eq!(summary.completed(), 2);
    assert_eq!(
        summary.count(TaskOutcome::NetworkFailed) + summary.count(TaskOutcome::TimedOut),
        2
    );
    assert_eq!(open_store(&db_path).unwrap().count_records().unwrap(), 0);
    assert!(reporter.lines_starting_with("Processed:").is_empty());
}

#[tokio::test]
async fn test_sweep_from_config_file() {
    let mock_server = MockServer::start().await;
    mount_profiles(&mock_server).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("from_file.db");
    let config_path = temp_dir.path().join("sweep.toml");

    let mut file = std::fs::File::create(&config_path).unwrap();
    write!(
        file,
        r#"
[probe]
base-url = "{}/id/"
alphabet = "b"
length = 1

[dispatch]
max-concurrent = 1
request-timeout = 1000
timeout-backoff = 10

[extractor]
not-found-marker = "The specified profile could not be found."
level-label = "Level"

[output]
database-path = "{}"
"#,
        mock_server.uri(),
        db_path.display()
    )
    .unwrap();
    drop(file);

    let config = load_config(&config_path).unwrap();
    let summary = run_sweep(&config, Arc::new(RecordingReporter::default()))
        .await
        .unwrap();

    assert_eq!(summary.count(TaskOutcome::Stored), 1);
    let store = open_store(Path::new(&config.output.database_path)).unwrap();
    let recent = store.recent_records(10).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name, "Bob");
    assert_eq!(recent[0].level, "7");
}

#[tokio::test]
async fn test_unopenable_database_is_startup_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("missing").join("dir").join("profiles.db");
    let config = create_test_config("http://127.0.0.1:9/id/", "a", db_path.to_str().unwrap());

    let result = run_sweep(&config, Arc::new(RecordingReporter::default())).await;
    assert!(result.is_err());
}
