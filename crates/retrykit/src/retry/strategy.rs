//! The backoff abstraction and the closed set of strategies a policy can hold.

use super::exponential::ExponentialBackoff;
use super::fixed::FixedBackoff;
use super::state::Attempt;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Computes the pause to insert before the next attempt.
///
/// Implementations are pure with respect to the run: they may read the
/// [`Attempt`] snapshot (in practice `last_backoff`) but never change it. The
/// executor records whatever is returned as the new `last_backoff`, and
/// always sleeps for it, zero included.
///
/// # Examples
///
/// Capping another strategy:
///
/// ```rust
/// use retrykit::retry::{Attempt, BackoffStrategy, ExponentialBackoff};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// struct Capped {
///     inner: ExponentialBackoff,
///     max: Duration,
/// }
///
/// impl BackoffStrategy for Capped {
///     fn compute_backoff(&self, attempt: &Attempt) -> Duration {
///         self.inner.compute_backoff(attempt).min(self.max)
///     }
/// }
/// ```
pub trait BackoffStrategy: Send + Sync + fmt::Debug {
    /// Delay to apply before the next attempt.
    fn compute_backoff(&self, attempt: &Attempt) -> Duration;
}

/// The strategy a [`RetryPolicy`](super::RetryPolicy) consults between attempts.
///
/// Fixed and exponential delays are built in; anything else goes through
/// [`Backoff::Custom`].
#[derive(Debug, Clone)]
pub enum Backoff {
    /// Same delay every time.
    Fixed(FixedBackoff),
    /// Delay multiplied by a factor each time.
    Exponential(ExponentialBackoff),
    /// Caller-supplied strategy.
    Custom(Arc<dyn BackoffStrategy>),
}

impl Backoff {
    /// Constant delay between attempts.
    pub fn fixed(delay: Duration) -> Self {
        Self::Fixed(FixedBackoff::new(delay))
    }

    /// Exponentially growing delay seeded with `initial_delay`.
    pub fn exponential(initial_delay: Duration, factor: f64) -> Self {
        Self::Exponential(ExponentialBackoff::new(initial_delay, factor))
    }

    /// Wrap a caller-supplied strategy.
    pub fn custom(strategy: impl BackoffStrategy + 'static) -> Self {
        Self::Custom(Arc::new(strategy))
    }
}

impl Default for Backoff {
    /// Fixed 100ms.
    fn default() -> Self {
        Self::Fixed(FixedBackoff::default())
    }
}

impl BackoffStrategy for Backoff {
    fn compute_backoff(&self, attempt: &Attempt) -> Duration {
        match self {
            Self::Fixed(fixed) => fixed.compute_backoff(attempt),
            Self::Exponential(exponential) => exponential.compute_backoff(attempt),
            Self::Custom(custom) => custom.compute_backoff(attempt),
        }
    }
}

impl From<FixedBackoff> for Backoff {
    fn from(fixed: FixedBackoff) -> Self {
        Self::Fixed(fixed)
    }
}

impl From<ExponentialBackoff> for Backoff {
    fn from(exponential: ExponentialBackoff) -> Self {
        Self::Exponential(exponential)
    }
}

impl From<Arc<dyn BackoffStrategy>> for Backoff {
    fn from(custom: Arc<dyn BackoffStrategy>) -> Self {
        Self::Custom(custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn attempt_after(last_backoff: Duration) -> Attempt {
        Attempt::new(Instant::now(), 1, last_backoff)
    }

    #[derive(Debug)]
    struct Capped {
        inner: Backoff,
        max: Duration,
    }

    impl BackoffStrategy for Capped {
        fn compute_backoff(&self, attempt: &Attempt) -> Duration {
            self.inner.compute_backoff(attempt).min(self.max)
        }
    }

    #[test]
    fn test_default_is_fixed_100ms() {
        let backoff = Backoff::default();
        assert!(matches!(backoff, Backoff::Fixed(_)));
        assert_eq!(
            backoff.compute_backoff(&attempt_after(Duration::from_secs(9))),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn test_enum_dispatches_to_variant() {
        let exponential = Backoff::exponential(Duration::from_millis(10), 3.0);
        assert_eq!(
            exponential.compute_backoff(&attempt_after(Duration::ZERO)),
            Duration::from_millis(10)
        );
        assert_eq!(
            exponential.compute_backoff(&attempt_after(Duration::from_millis(10))),
            Duration::from_millis(30)
        );

        let fixed = Backoff::fixed(Duration::from_millis(7));
        assert_eq!(
            fixed.compute_backoff(&attempt_after(Duration::from_millis(10))),
            Duration::from_millis(7)
        );
    }

    #[test]
    fn test_custom_wrapper_caps_growth() {
        let backoff = Backoff::custom(Capped {
            inner: Backoff::exponential(Duration::from_millis(100), 2.0),
            max: Duration::from_millis(300),
        });

        let mut last = Duration::ZERO;
        let mut seen = Vec::new();
        for _ in 0..5 {
            last = backoff.compute_backoff(&attempt_after(last));
            seen.push(last.as_millis());
        }

        assert_eq!(seen, vec![100, 200, 300, 300, 300]);
    }

    #[test]
    fn test_from_conversions() {
        let backoff: Backoff = FixedBackoff::new(Duration::from_millis(1)).into();
        assert!(matches!(backoff, Backoff::Fixed(_)));

        let backoff: Backoff = ExponentialBackoff::default().into();
        assert!(matches!(backoff, Backoff::Exponential(_)));
    }
}
