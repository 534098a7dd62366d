//! Probe module - fetch, extract and dispatch
//!
//! This module contains the sweep pipeline:
//! - `fetcher`: one GET per profile link over a pooled HTTP client
//! - `extractor`: turns a profile page into a name and level, or nothing
//! - `dispatcher`: runs every identifier through both under a concurrency cap

mod dispatcher;
mod extractor;
mod fetcher;

pub use dispatcher::{DispatchSettings, Dispatcher};
pub use extractor::{compile_selector, ExtractedProfile, ProfileExtractor};
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};

use crate::config::Config;
use crate::ident::IdentifierSpace;
use crate::output::ProgressReporter;
use crate::state::RunSummary;
use crate::storage::open_store;
use crate::url::ProfileBase;
use crate::SweepError;
use std::path::Path;
use std::sync::Arc;

/// Runs a full sweep as described by `config`
///
/// Builds every component from the configuration, probes the whole
/// identifier space and reports the summary through `reporter` once the
/// last task has finished.
///
/// # Errors
///
/// Only startup failures are returned: an invalid identifier space, base
/// URL or selector, an HTTP client that cannot be built, or a database that
/// cannot be opened. Per-identifier failures are counted in the summary.
pub async fn run_sweep(
    config: &Config,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<RunSummary, SweepError> {
    let space = IdentifierSpace::new(&config.probe.alphabet, config.probe.length)?;
    let base = ProfileBase::parse(&config.probe.base_url)?;
    let extractor = ProfileExtractor::new(&config.extractor)?;
    let fetcher = HttpFetcher::from_config(&config.http, &config.dispatch)?;
    let store = open_store(Path::new(&config.output.database_path))?;

    tracing::info!(
        "Sweeping {} identifiers of length {} under {}",
        space.len(),
        space.length(),
        base
    );
    tracing::info!("Writing matches to {}", config.output.database_path);

    let dispatcher = Dispatcher::new(
        fetcher,
        extractor,
        store,
        base,
        DispatchSettings::from(&config.dispatch),
    )
    .with_reporter(Arc::clone(&reporter));

    let summary = dispatcher.run(space.iter()).await;
    reporter.finished(&summary);

    Ok(summary)
}
