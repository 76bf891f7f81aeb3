//! Exponential backoff seeded from the previous delay.

use super::state::Attempt;
use super::strategy::BackoffStrategy;
use std::time::Duration;

/// Exponential backoff strategy.
///
/// Each delay is derived from the one applied before it rather than from the
/// attempt number:
///
/// ```text
/// last_backoff == 0  ->  initial_delay
/// otherwise          ->  trunc(last_backoff * factor)   (whole nanoseconds)
/// ```
///
/// With `initial_delay = 5ns` and `factor = 2.0` the sequence is 5, 10, 20,
/// 40, ... There is no upper bound; wrap the strategy in a
/// [`Backoff::Custom`](super::Backoff::Custom) to cap it. Growth saturates at
/// [`Duration::MAX`] instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use retrykit::retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .initial_delay(Duration::from_millis(100))
///     .factor(2.0)
///     .build();
///
/// assert_eq!(backoff.delay_after(Duration::ZERO), Duration::from_millis(100));
/// assert_eq!(backoff.delay_after(Duration::from_millis(100)), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    factor: f64,
}

impl ExponentialBackoff {
    /// Create an exponential backoff from its two parameters.
    pub fn new(initial_delay: Duration, factor: f64) -> Self {
        Self {
            initial_delay,
            factor,
        }
    }

    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// The delay used for the first backoff.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// The growth factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// The delay that follows `last_backoff`.
    pub fn delay_after(&self, last_backoff: Duration) -> Duration {
        if last_backoff.is_zero() {
            return self.initial_delay;
        }

        let nanos = (last_backoff.as_nanos() as f64 * self.factor).trunc();
        if nanos.is_nan() || nanos <= 0.0 {
            Duration::ZERO
        } else if nanos < u64::MAX as f64 {
            Duration::from_nanos(nanos as u64)
        } else {
            Duration::try_from_secs_f64(nanos / 1e9).unwrap_or(Duration::MAX)
        }
    }
}

impl Default for ExponentialBackoff {
    /// Defaults:
    /// - `initial_delay`: 100ms
    /// - `factor`: 2.0 (doubles each time)
    fn default() -> Self {
        Self::new(Duration::from_millis(100), 2.0)
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn compute_backoff(&self, attempt: &Attempt) -> Duration {
        self.delay_after(attempt.last_backoff())
    }
}

/// Builder for configuring [`ExponentialBackoff`].
///
/// # Examples
///
/// ```rust
/// use retrykit::retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .initial_delay(Duration::from_millis(50))
///     .factor(1.5)
///     .build();
/// assert_eq!(backoff.factor(), 1.5);
/// ```
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Option<Duration>,
    factor: Option<f64>,
}

impl ExponentialBackoffBuilder {
    /// Set the delay before the first retry.
    ///
    /// Default: 100ms
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the growth factor. Values above 1.0 grow the delay.
    ///
    /// Default: 2.0
    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = Some(factor);
        self
    }

    /// Build the `ExponentialBackoff` instance.
    ///
    /// Uses default values for any unset parameters.
    pub fn build(self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_delay: self.initial_delay.unwrap_or(Duration::from_millis(100)),
            factor: self.factor.unwrap_or(2.0),
        }
    }
}
