//! Dispatcher - bounded-concurrency sweep orchestration
//!
//! This module drives every identifier through fetch → extract → store:
//! - One task per identifier, all spawned up front into a `JoinSet`
//! - A global semaphore caps how many tasks hold a slot at once
//! - Each fetch + extract runs under a deadline; on timeout the task keeps
//!   its slot through a fixed backoff before finishing
//! - Store writes go through a mutex, one insert + commit per lock scope

use crate::config::DispatchConfig;
use crate::ident::Identifier;
use crate::output::{ConsoleReporter, ProgressReporter};
use crate::probe::extractor::{ExtractedProfile, ProfileExtractor};
use crate::probe::fetcher::{FetchError, PageFetcher};
use crate::state::{RunSummary, TaskOutcome};
use crate::storage::{NewRecord, ProfileStore};
use crate::url::ProfileBase;
use crate::SweepError;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Completed tasks between progress log lines
const PROGRESS_INTERVAL: usize = 1_000;

/// Timing and concurrency limits for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Maximum number of tasks holding a slot at once
    pub max_concurrent: usize,

    /// Deadline for one fetch + extract
    pub request_timeout: Duration,

    /// Sleep after a timeout, with the slot still held
    pub timeout_backoff: Duration,
}

impl From<&DispatchConfig> for DispatchSettings {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent as usize,
            request_timeout: config.request_timeout(),
            timeout_backoff: config.timeout_backoff(),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from(&DispatchConfig::default())
    }
}

/// Runs the fetch → extract → store pipeline for a set of identifiers
pub struct Dispatcher<F, S> {
    fetcher: Arc<F>,
    extractor: Arc<ProfileExtractor>,
    store: Arc<Mutex<S>>,
    slots: Arc<Semaphore>,
    reporter: Arc<dyn ProgressReporter>,
    base: ProfileBase,
    settings: DispatchSettings,
}

impl<F, S> Clone for Dispatcher<F, S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            store: Arc::clone(&self.store),
            slots: Arc::clone(&self.slots),
            reporter: Arc::clone(&self.reporter),
            base: self.base.clone(),
            settings: self.settings,
        }
    }
}

impl<F, S> Dispatcher<F, S>
where
    F: PageFetcher + 'static,
    S: ProfileStore + Send + 'static,
{
    /// Creates a dispatcher
    ///
    /// The concurrency gate is a fresh semaphore with
    /// `settings.max_concurrent` permits and progress goes to the console;
    /// use [`Dispatcher::with_slots`] and [`Dispatcher::with_reporter`] to
    /// inject either.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page fetcher shared by all tasks
    /// * `extractor` - Profile extractor shared by all tasks
    /// * `store` - Result store; owned by the dispatcher from here on
    /// * `base` - Profile links are `base` + identifier
    /// * `settings` - Concurrency cap, deadline and backoff
    pub fn new(
        fetcher: F,
        extractor: ProfileExtractor,
        store: S,
        base: ProfileBase,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            store: Arc::new(Mutex::new(store)),
            slots: Arc::new(Semaphore::new(settings.max_concurrent)),
            reporter: Arc::new(ConsoleReporter),
            base,
            settings,
        }
    }

    /// Replaces the concurrency gate
    pub fn with_slots(mut self, slots: Arc<Semaphore>) -> Self {
        self.slots = slots;
        self
    }

    /// Replaces the progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns a handle to the store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Runs every identifier through the pipeline
    ///
    /// All tasks are spawned before any is awaited; the semaphore bounds how
    /// many execute at once. Returns once every task has finished. Task
    /// failures (timeouts, network errors, store errors, panics) are
    /// counted in the summary and never abort the run.
    pub async fn run<I>(&self, identifiers: I) -> RunSummary
    where
        I: IntoIterator<Item = Identifier>,
    {
        let mut summary = RunSummary::start();
        let mut tasks = JoinSet::new();

        for identifier in identifiers {
            let dispatcher = self.clone();
            tasks.spawn(async move { dispatcher.process(identifier).await });
        }
        summary.dispatched = tasks.len();

        tracing::info!(
            "Dispatched {} identifiers ({} slots, {:?} deadline, {:?} timeout backoff)",
            summary.dispatched,
            self.settings.max_concurrent,
            self.settings.request_timeout,
            self.settings.timeout_backoff
        );

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    tracing::error!("Task failed: {}", e);
                    TaskOutcome::Aborted
                }
                Err(e) => {
                    tracing::error!("Task did not complete: {}", e);
                    TaskOutcome::Aborted
                }
            };
            summary.record(outcome);

            let completed = summary.completed();
            if completed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {}/{} identifiers, {} stored",
                    completed,
                    summary.dispatched,
                    summary.count(TaskOutcome::Stored)
                );
            }
        }

        summary.finish();
        summary
    }

    /// Processes one identifier while holding a slot
    async fn process(&self, identifier: Identifier) -> Result<TaskOutcome, SweepError> {
        let profile_link = self.base.link_for(&identifier);

        // Held until this function returns, backoff included
        let _permit = self
            .slots
            .acquire()
            .await
            .map_err(|_| SweepError::SlotsClosed)?;

        let lookup =
            tokio::time::timeout(self.settings.request_timeout, self.lookup(&profile_link)).await;

        let outcome = match lookup {
            Ok(Ok(Some(profile))) => self.store_profile(profile_link, profile),

            Ok(Ok(None)) => {
                tracing::debug!("No profile at {}", profile_link);
                TaskOutcome::NotFound
            }

            Ok(Err(FetchError::Timeout { .. })) | Err(_) => {
                self.reporter
                    .timed_out(&profile_link, self.settings.timeout_backoff);
                TaskOutcome::TimedOut
            }

            Ok(Err(error)) => {
                tracing::warn!("{}", error);
                self.reporter
                    .network_failed(&profile_link, &error, self.settings.timeout_backoff);
                TaskOutcome::NetworkFailed
            }
        };

        if outcome.applies_backoff() {
            tokio::time::sleep(self.settings.timeout_backoff).await;
        }

        Ok(outcome)
    }

    /// Fetches and extracts one profile page
    async fn lookup(&self, profile_link: &str) -> Result<Option<ExtractedProfile>, FetchError> {
        let body = self.fetcher.fetch(profile_link).await?;
        Ok(self.extractor.extract(&body))
    }

    /// Appends a profile to the store
    ///
    /// The insert and its commit run inside one lock scope with no await.
    fn store_profile(&self, profile_link: String, profile: ExtractedProfile) -> TaskOutcome {
        let record = NewRecord {
            profile_link,
            name: profile.display_name,
            level: profile.level,
        };

        // Every insert commits on its own, so a poisoned guard holds no partial write
        let inserted = self
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(&record);

        match inserted {
            Ok(id) => {
                tracing::trace!("Stored row {} for {}", id, record.profile_link);
                self.reporter.processed(&record);
                TaskOutcome::Stored
            }
            Err(e) => {
                tracing::error!("Failed to store {}: {}", record.profile_link, e);
                TaskOutcome::StoreFailed
            }
        }
    }
}
