//! Stop-condition evaluation after each attempt.

use super::policy::RetryPolicy;
use super::state::{RunState, StopReason};

/// Outcome of evaluating a run after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopDecision {
    /// Back off and invoke the operation again.
    Continue,
    /// End the run for the given reason.
    Stop(StopReason),
}

impl StopDecision {
    /// True if the loop should go on.
    pub fn should_continue(self) -> bool {
        matches!(self, Self::Continue)
    }

    /// The stop reason, if the loop should end.
    pub fn reason(self) -> Option<StopReason> {
        match self {
            Self::Continue => None,
            Self::Stop(reason) => Some(reason),
        }
    }
}

impl<E> RetryPolicy<E> {
    /// Decide whether `state` warrants another attempt.
    ///
    /// Checks run in order and the first match wins:
    ///
    /// 1. the predicate declines the last error (or success): `NonRetryableError`
    /// 2. the attempt budget is reached: `MaxAttemptsExceeded`
    /// 3. the time budget is reached: `MaxDurationExceeded`
    ///
    /// Success is not a separate check. The executor turns a
    /// `NonRetryableError` decision into [`StopReason::Success`] when the last
    /// attempt carried no error, so custom predicates and the success path
    /// can never disagree.
    pub fn evaluate<T>(&self, state: &RunState<T, E>) -> StopDecision {
        if !self.should_retry(state.operation_error()) {
            return StopDecision::Stop(StopReason::NonRetryableError);
        }

        if self.max_attempts > 0 && state.attempts() >= self.max_attempts {
            return StopDecision::Stop(StopReason::MaxAttemptsExceeded);
        }

        if !self.max_duration.is_zero() && state.elapsed() >= self.max_duration {
            return StopDecision::Stop(StopReason::MaxDurationExceeded);
        }

        StopDecision::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn failed_state(attempts: u32) -> RunState<(), &'static str> {
        let mut state = RunState::new();
        for _ in 0..attempts {
            state.begin_attempt();
            state.record(Err("transient"));
        }
        state
    }

    #[test]
    fn test_success_stops_as_non_retryable() {
        let policy: RetryPolicy<&str> = RetryPolicy::default();
        let mut state = RunState::new();
        state.begin_attempt();
        state.record(Ok(()));

        assert_eq!(
            policy.evaluate(&state),
            StopDecision::Stop(StopReason::NonRetryableError)
        );
    }

    #[test]
    fn test_retryable_error_continues() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder().max_attempts(3).build();
        let decision = policy.evaluate(&failed_state(2));

        assert!(decision.should_continue());
        assert_eq!(decision.reason(), None);
    }

    #[test]
    fn test_attempt_budget_reached() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder().max_attempts(3).build();

        assert_eq!(
            policy.evaluate(&failed_state(3)),
            StopDecision::Stop(StopReason::MaxAttemptsExceeded)
        );
    }

    #[test]
    fn test_predicate_checked_before_budget() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder()
            .max_attempts(1)
            .retry_if(|_: Option<&&str>| false)
            .build();

        assert_eq!(
            policy.evaluate(&failed_state(1)),
            StopDecision::Stop(StopReason::NonRetryableError)
        );
    }

    #[test]
    fn test_zero_max_attempts_is_unbounded() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder().max_attempts(0).build();

        assert!(policy.evaluate(&failed_state(10_000)).should_continue());
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_budget_reached() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder()
            .max_attempts(0)
            .max_duration(Duration::from_secs(1))
            .build();
        let state = failed_state(1);

        assert!(policy.evaluate(&state).should_continue());

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(
            policy.evaluate(&state),
            StopDecision::Stop(StopReason::MaxDurationExceeded)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_budget_checked_before_time_budget() {
        let policy: RetryPolicy<&str> = RetryPolicy::builder()
            .max_attempts(2)
            .max_duration(Duration::from_millis(10))
            .build();
        let state = failed_state(2);

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(
            policy.evaluate(&state),
            StopDecision::Stop(StopReason::MaxAttemptsExceeded)
        );
    }
}
