//! Error types for retry execution and policy configuration.

use std::time::Duration;
use thiserror::Error;

/// The error channel of a finished retry run.
///
/// The operation's own error is passed through untouched in
/// [`RetryError::Operation`]. The remaining variants are synthetic: they are
/// only produced when a budget ran out and the last attempt left no real
/// error behind (for example when a custom predicate keeps retrying
/// successful results).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError<E> {
    /// Error reported by the wrapped operation.
    #[error(transparent)]
    Operation(E),

    /// The attempt budget ran out without a real error to report.
    #[error("max attempts exceeded after {attempts} attempts")]
    MaxAttemptsExceeded {
        /// Number of attempts made.
        attempts: u32,
    },

    /// The time budget ran out without a real error to report.
    #[error("max duration exceeded after {elapsed:?}")]
    MaxDurationExceeded {
        /// Wall-clock time spent when the run stopped.
        elapsed: Duration,
    },

    /// The run state was converted before the operation was ever invoked.
    #[error("operation was never attempted")]
    NotAttempted,
}

impl<E> RetryError<E> {
    /// Borrow the operation's error, if this is one.
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::Operation(err) => Some(err),
            _ => None,
        }
    }

    /// Take the operation's error out, discarding synthetic variants.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(err) => Some(err),
            _ => None,
        }
    }

    /// True for the synthetic budget variants.
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(
            self,
            Self::MaxAttemptsExceeded { .. } | Self::MaxDurationExceeded { .. }
        )
    }
}

/// Errors raised while turning a [`RetryConfig`](crate::config::RetryConfig)
/// into a policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Exponential factor is NaN, infinite, or below 1.0.
    #[error("invalid backoff factor {0}: must be finite and at least 1.0")]
    InvalidFactor(f64),
}
