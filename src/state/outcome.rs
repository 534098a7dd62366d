/// Task outcome definitions
///
/// Every dispatched identifier ends in exactly one of these outcomes.
use std::fmt;

/// How a single identifier's fetch-extract-store task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    // ===== Success =====
    /// Profile existed and a row was committed to the store
    Stored,

    /// The page carried the not-found marker; nothing written
    NotFound,

    // ===== Dropped =====
    /// Fetch + extract exceeded the deadline; slot held through the backoff
    TimedOut,

    /// Connection-level failure; handled like a timeout
    NetworkFailed,

    /// Profile existed but the store write failed
    StoreFailed,

    /// The task panicked or was cancelled before reporting an outcome
    Aborted,
}

impl TaskOutcome {
    /// Returns true if the identifier was fully processed
    ///
    /// A not-found profile counts as processed: the remote service answered.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Stored | Self::NotFound)
    }

    /// Returns true if the identifier was dropped without a definite answer
    pub fn is_dropped(&self) -> bool {
        !self.is_success()
    }

    /// Returns true if the task slept through the timeout backoff
    pub fn applies_backoff(&self) -> bool {
        matches!(self, Self::TimedOut | Self::NetworkFailed)
    }

    /// Short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::NotFound => "not_found",
            Self::TimedOut => "timed_out",
            Self::NetworkFailed => "network_failed",
            Self::StoreFailed => "store_failed",
            Self::Aborted => "aborted",
        }
    }

    /// Returns all possible outcomes
    pub fn all_outcomes() -> [Self; 6] {
        [
            Self::Stored,
            Self::NotFound,
            Self::TimedOut,
            Self::NetworkFailed,
            Self::StoreFailed,
            Self::Aborted,
        ]
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
