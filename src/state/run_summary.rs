use crate::state::TaskOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-outcome counts for one dispatcher run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,

    /// Number of tasks dispatched
    pub dispatched: usize,

    /// Count of finished tasks by outcome
    pub outcomes: HashMap<TaskOutcome, usize>,

    /// Time from the first spawn to the last task finishing
    pub elapsed: Duration,

    started: Instant,
}

impl RunSummary {
    /// Starts a new summary clock
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            dispatched: 0,
            outcomes: HashMap::new(),
            elapsed: Duration::ZERO,
            started: Instant::now(),
        }
    }

    /// Records one finished task
    pub fn record(&mut self, outcome: TaskOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Stops the clock
    pub fn finish(&mut self) {
        self.elapsed = self.started.elapsed();
    }

    /// Returns the count for one outcome
    pub fn count(&self, outcome: TaskOutcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Returns the number of finished tasks
    pub fn completed(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Returns the number of tasks dropped without a definite answer
    pub fn dropped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_dropped())
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns finished tasks per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.completed() as f64 / secs
        } else {
            0.0
        }
    }
}
