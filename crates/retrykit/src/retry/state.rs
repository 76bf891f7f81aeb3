//! Per-run bookkeeping: attempt counters, timing, stop reason and the last outcome.

use crate::error::RetryError;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Why a retry run ended.
///
/// `Success` and `NonRetryableError` come out of the same predicate check:
/// the predicate declined to retry, and the run is a success only if the
/// last attempt left no error. Custom predicates that decline to retry a
/// real error therefore always report `NonRetryableError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The predicate declined to retry and the last attempt had no error.
    Success,
    /// The predicate declined to retry the last attempt's error.
    NonRetryableError,
    /// The attempt budget was reached while still retryable.
    MaxAttemptsExceeded,
    /// The time budget was reached while still retryable.
    MaxDurationExceeded,
}

impl StopReason {
    /// True only for [`StopReason::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    /// True when the run gave up because a budget ran out.
    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::MaxAttemptsExceeded | Self::MaxDurationExceeded)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::NonRetryableError => write!(f, "non-retryable error"),
            Self::MaxAttemptsExceeded => write!(f, "max attempts exceeded"),
            Self::MaxDurationExceeded => write!(f, "max duration exceeded"),
        }
    }
}

/// Read-only snapshot of a run's progress.
///
/// Handed to the operation at the start of every attempt and to the backoff
/// strategy before every pause. `number` is 1-based: the first invocation
/// sees `number() == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    start_time: Instant,
    number: u32,
    last_backoff: Duration,
}

impl Attempt {
    /// Build a snapshot by hand, mostly useful for driving a
    /// [`BackoffStrategy`](super::BackoffStrategy) outside the executor.
    pub fn new(start_time: Instant, number: u32, last_backoff: Duration) -> Self {
        Self {
            start_time,
            number,
            last_backoff,
        }
    }

    /// When the run started.
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// How many times the operation has been invoked, this attempt included.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The most recently applied delay, zero before the first backoff.
    pub fn last_backoff(&self) -> Duration {
        self.last_backoff
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// True on the very first invocation.
    pub fn is_first(&self) -> bool {
        self.number <= 1
    }
}

/// Mutable record of one retry run.
///
/// Created fresh by every call to
/// [`RetryPolicy::execute`](super::RetryPolicy::execute) and handed back to
/// the caller once the loop terminates. It is never shared between runs.
#[derive(Debug)]
pub struct RunState<T, E> {
    start_time: Instant,
    finished_at: Option<Instant>,
    attempts: u32,
    last_backoff: Duration,
    stop_reason: Option<StopReason>,
    result: Option<T>,
    last_error: Option<RetryError<E>>,
}

impl<T, E> RunState<T, E> {
    /// Start a new run now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            finished_at: None,
            attempts: 0,
            last_backoff: Duration::ZERO,
            stop_reason: None,
            result: None,
            last_error: None,
        }
    }

    /// When the run started.
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Number of operation invocations so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The most recently applied delay.
    pub fn last_backoff(&self) -> Duration {
        self.last_backoff
    }

    /// Time spent so far, frozen once the run stops.
    pub fn elapsed(&self) -> Duration {
        match self.finished_at {
            Some(finished_at) => finished_at.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Why the run stopped; `None` while it is still going.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// True once a stop reason has been recorded.
    pub fn is_finished(&self) -> bool {
        self.stop_reason.is_some()
    }

    /// The last attempt's success value.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// The last error, real or synthetic.
    pub fn last_error(&self) -> Option<&RetryError<E>> {
        self.last_error.as_ref()
    }

    /// The last attempt's own error, ignoring synthetic budget errors.
    pub fn operation_error(&self) -> Option<&E> {
        self.last_error.as_ref().and_then(RetryError::operation_error)
    }

    /// Snapshot of the current progress.
    pub fn attempt(&self) -> Attempt {
        Attempt::new(self.start_time, self.attempts, self.last_backoff)
    }

    /// Payload-free copy of the bookkeeping fields.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            start_time: self.start_time,
            elapsed: self.elapsed(),
            attempts: self.attempts,
            last_backoff: self.last_backoff,
            stop_reason: self.stop_reason,
        }
    }

    /// Collapse into a `Result`, preferring the error channel.
    ///
    /// A budget-exhausted run whose last attempt succeeded still yields the
    /// synthetic budget error here; use [`RunState::into_parts`] to get at
    /// both values.
    pub fn into_result(self) -> Result<T, RetryError<E>> {
        match (self.last_error, self.result) {
            (Some(err), _) => Err(err),
            (None, Some(value)) => Ok(value),
            (None, None) => Err(RetryError::NotAttempted),
        }
    }

    /// Split into the result, error and summary triple.
    pub fn into_parts(self) -> (Option<T>, Option<RetryError<E>>, RunSummary) {
        let summary = self.summary();
        (self.result, self.last_error, summary)
    }

    pub(crate) fn begin_attempt(&mut self) -> Attempt {
        self.attempts = self.attempts.saturating_add(1);
        self.attempt()
    }

    pub(crate) fn record(&mut self, outcome: Result<T, E>) {
        match outcome {
            Ok(value) => {
                self.result = Some(value);
                self.last_error = None;
            }
            Err(err) => {
                self.result = None;
                self.last_error = Some(RetryError::Operation(err));
            }
        }
    }

    pub(crate) fn record_backoff(&mut self, delay: Duration) {
        self.last_backoff = delay;
    }

    /// Record the terminal reason. A synthetic budget error is attached only
    /// when the last attempt left no error of its own.
    pub(crate) fn stop(&mut self, reason: StopReason) {
        debug_assert!(self.stop_reason.is_none(), "stop reason written twice");

        self.finished_at = Some(Instant::now());
        self.stop_reason = Some(reason);

        if self.last_error.is_none() {
            self.last_error = match reason {
                StopReason::MaxAttemptsExceeded => Some(RetryError::MaxAttemptsExceeded {
                    attempts: self.attempts,
                }),
                StopReason::MaxDurationExceeded => Some(RetryError::MaxDurationExceeded {
                    elapsed: self.elapsed(),
                }),
                StopReason::Success | StopReason::NonRetryableError => None,
            };
        }
    }
}

impl<T, E> Default for RunState<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bookkeeping of a run without its result or error payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// When the run started.
    pub start_time: Instant,
    /// Time spent, measured when the summary was taken.
    pub elapsed: Duration,
    /// Number of operation invocations.
    pub attempts: u32,
    /// The last delay applied between attempts.
    pub last_backoff: Duration,
    /// Why the run ended, if it has.
    pub stop_reason: Option<StopReason>,
}
