//! Immutable retry configuration shared by any number of runs.

use super::sleeper::{Sleeper, TokioSleeper};
use super::strategy::Backoff;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Classifies the last attempt: `true` means "try again".
///
/// Receives `None` when the attempt succeeded.
pub type RetryPredicate<E> = Arc<dyn Fn(Option<&E>) -> bool + Send + Sync>;

/// Retry budget, predicate and backoff for wrapping a fallible operation.
///
/// A policy is read-only once built. Cloning is cheap and clones share the
/// predicate, strategy and sleeper, so one policy can drive concurrent runs
/// from different tasks; each run gets its own [`RunState`](super::RunState).
///
/// # Budgets
///
/// - `max_attempts == 0` disables the attempt limit.
/// - `max_duration == Duration::ZERO` disables the time limit.
///
/// Both limits trigger once reached, not only once exceeded: with
/// `max_attempts(3)` the operation runs at most three times. With both
/// limits disabled the run only ends when the predicate declines to retry.
///
/// # Examples
///
/// ```rust
/// use retrykit::retry::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy: RetryPolicy<std::io::Error> = RetryPolicy::builder()
///     .max_attempts(5)
///     .max_duration(Duration::from_secs(30))
///     .backoff(Backoff::exponential(Duration::from_millis(100), 2.0))
///     .retry_on(|err: &std::io::Error| err.kind() != std::io::ErrorKind::NotFound)
///     .build();
///
/// assert_eq!(policy.max_attempts(), 5);
/// ```
pub struct RetryPolicy<E> {
    pub(crate) max_attempts: u32,
    pub(crate) max_duration: Duration,
    pub(crate) retry_predicate: RetryPredicate<E>,
    pub(crate) backoff: Backoff,
    pub(crate) sleeper: Arc<dyn Sleeper>,
}

impl<E: 'static> RetryPolicy<E> {
    /// Create a new builder for configuring a retry policy.
    pub fn builder() -> RetryPolicyBuilder<E> {
        RetryPolicyBuilder::default()
    }
}

impl<E> RetryPolicy<E> {
    /// Upper bound on invocations; 0 means unbounded.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Upper bound on elapsed time; zero means unbounded.
    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// The strategy consulted between attempts.
    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// The sleeper used by the async executor.
    pub fn sleeper(&self) -> &Arc<dyn Sleeper> {
        &self.sleeper
    }

    /// Run the retry predicate against an attempt's error.
    pub fn should_retry(&self, error: Option<&E>) -> bool {
        (self.retry_predicate)(error)
    }
}

impl<E: 'static> Default for RetryPolicy<E> {
    /// Defaults:
    /// - `max_attempts`: 3
    /// - `max_duration`: unbounded
    /// - predicate: retry iff the attempt failed
    /// - backoff: fixed 100ms
    /// - sleeper: tokio timer
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            max_duration: self.max_duration,
            retry_predicate: Arc::clone(&self.retry_predicate),
            backoff: self.backoff.clone(),
            sleeper: Arc::clone(&self.sleeper),
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("max_duration", &self.max_duration)
            .field("retry_predicate", &"<predicate>")
            .field("backoff", &self.backoff)
            .field("sleeper", &self.sleeper)
            .finish()
    }
}

/// Builder for configuring a [`RetryPolicy`].
///
/// Unset fields fall back to the [`RetryPolicy::default`] values.
pub struct RetryPolicyBuilder<E> {
    max_attempts: Option<u32>,
    max_duration: Option<Duration>,
    retry_predicate: Option<RetryPredicate<E>>,
    backoff: Option<Backoff>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl<E> Default for RetryPolicyBuilder<E> {
    fn default() -> Self {
        Self {
            max_attempts: None,
            max_duration: None,
            retry_predicate: None,
            backoff: None,
            sleeper: None,
        }
    }
}

impl<E: 'static> RetryPolicyBuilder<E> {
    /// Set the maximum number of invocations. 0 disables the limit.
    ///
    /// Default: 3
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set the time budget measured from the first attempt. Zero disables
    /// the limit.
    ///
    /// Default: unbounded
    pub fn max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// Replace the retry predicate. It sees `None` after a successful
    /// attempt, so a predicate returning `true` there keeps retrying
    /// successes until a budget runs out.
    ///
    /// Default: retry iff the attempt returned an error
    pub fn retry_if<P>(mut self, predicate: P) -> Self
    where
        P: Fn(Option<&E>) -> bool + Send + Sync + 'static,
    {
        self.retry_predicate = Some(Arc::new(predicate));
        self
    }

    /// Retry only the errors `predicate` accepts; successes always stop.
    pub fn retry_on<P>(self, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.retry_if(move |err: Option<&E>| err.is_some_and(|err| predicate(err)))
    }

    /// Set the backoff strategy.
    ///
    /// Default: fixed 100ms
    pub fn backoff(mut self, backoff: impl Into<Backoff>) -> Self {
        self.backoff = Some(backoff.into());
        self
    }

    /// Set the sleeper the async executor awaits between attempts.
    ///
    /// Default: [`TokioSleeper`]
    pub fn sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Some(Arc::new(sleeper));
        self
    }

    /// Build the `RetryPolicy` instance.
    pub fn build(self) -> RetryPolicy<E> {
        let retry_predicate: RetryPredicate<E> = match self.retry_predicate {
            Some(predicate) => predicate,
            None => Arc::new(|err: Option<&E>| err.is_some()),
        };
        let sleeper: Arc<dyn Sleeper> = match self.sleeper {
            Some(sleeper) => sleeper,
            None => Arc::new(TokioSleeper),
        };

        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or(3),
            max_duration: self.max_duration.unwrap_or(Duration::ZERO),
            retry_predicate,
            backoff: self.backoff.unwrap_or_default(),
            sleeper,
        }
    }
}
