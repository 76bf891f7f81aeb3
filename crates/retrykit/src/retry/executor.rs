//! The retry loop, in async and blocking flavours.

use super::policy::RetryPolicy;
use super::state::{Attempt, RunState, StopReason};
use super::stop::StopDecision;
use super::strategy::BackoffStrategy;
use std::future::Future;
use std::time::Duration;

impl<E> RetryPolicy<E> {
    /// Run `operation` until it succeeds, the predicate declines to retry, or
    /// a budget runs out.
    ///
    /// The operation receives an [`Attempt`] snapshot on every call. Between
    /// attempts the policy's [`Sleeper`](super::Sleeper) is awaited for the
    /// delay the backoff strategy computes. Nothing is raised by the loop
    /// itself: the returned [`RunState`] carries the last result or error and
    /// the [`StopReason`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrykit::retry::{Backoff, RetryPolicy, StopReason};
    /// use std::time::Duration;
    ///
    /// # async fn example() {
    /// let policy = RetryPolicy::builder()
    ///     .max_attempts(10)
    ///     .backoff(Backoff::exponential(Duration::from_millis(10), 2.0))
    ///     .build();
    ///
    /// let state = policy
    ///     .execute(|attempt| async move {
    ///         if attempt.number() < 4 {
    ///             Err(std::io::Error::other("not yet"))
    ///         } else {
    ///             Ok(attempt.number())
    ///         }
    ///     })
    ///     .await;
    ///
    /// assert_eq!(state.stop_reason(), Some(StopReason::Success));
    /// assert_eq!(state.into_result().unwrap(), 4);
    /// # }
    /// ```
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> RunState<T, E>
    where
        F: FnMut(Attempt) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut state = RunState::new();
        loop {
            let attempt = state.begin_attempt();
            let outcome = operation(attempt).await;

            let Some(delay) = self.settle(&mut state, outcome) else {
                return state;
            };

            self.sleeper.sleep(delay).await;
            state.record_backoff(delay);
        }
    }

    /// Blocking counterpart of [`RetryPolicy::execute`].
    ///
    /// Pauses the current thread with [`std::thread::sleep`] and ignores the
    /// policy's sleeper. Do not call this from inside an async runtime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrykit::retry::{RetryPolicy, StopReason};
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::builder()
    ///     .max_attempts(3)
    ///     .backoff(retrykit::retry::Backoff::fixed(Duration::from_millis(1)))
    ///     .build();
    ///
    /// let state = policy.execute_blocking(|_| Err::<(), _>("always fails"));
    ///
    /// assert_eq!(state.attempts(), 3);
    /// assert_eq!(state.stop_reason(), Some(StopReason::MaxAttemptsExceeded));
    /// ```
    pub fn execute_blocking<T, F>(&self, mut operation: F) -> RunState<T, E>
    where
        F: FnMut(Attempt) -> Result<T, E>,
    {
        let mut state = RunState::new();
        loop {
            let attempt = state.begin_attempt();
            let outcome = operation(attempt);

            let Some(delay) = self.settle(&mut state, outcome) else {
                return state;
            };

            std::thread::sleep(delay);
            state.record_backoff(delay);
        }
    }

    /// Record an attempt's outcome and either stop the run (returning `None`)
    /// or compute the next delay.
    fn settle<T>(&self, state: &mut RunState<T, E>, outcome: Result<T, E>) -> Option<Duration> {
        state.record(outcome);

        match self.evaluate(state) {
            StopDecision::Stop(reason) => {
                let reason = match reason {
                    StopReason::NonRetryableError if state.last_error().is_none() => {
                        StopReason::Success
                    }
                    reason => reason,
                };
                state.stop(reason);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    attempts = state.attempts(),
                    elapsed = ?state.elapsed(),
                    reason = %reason,
                    "retry run finished"
                );

                None
            }
            StopDecision::Continue => {
                let delay = self.backoff.compute_backoff(&state.attempt());

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    attempt = state.attempts(),
                    delay = ?delay,
                    "attempt failed, backing off"
                );

                Some(delay)
            }
        }
    }
}
