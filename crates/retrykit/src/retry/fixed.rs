//! Constant delay between attempts.

use super::state::Attempt;
use super::strategy::BackoffStrategy;
use std::time::Duration;

/// Waits the same amount of time before every retry, regardless of how many
/// attempts have been made.
///
/// # Examples
///
/// ```rust
/// use retrykit::retry::FixedBackoff;
/// use std::time::Duration;
///
/// let backoff = FixedBackoff::new(Duration::from_millis(250));
/// assert_eq!(backoff.delay(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBackoff {
    delay: Duration,
}

impl FixedBackoff {
    /// Create a fixed backoff of `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedBackoff {
    /// 100ms.
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl BackoffStrategy for FixedBackoff {
    fn compute_backoff(&self, _attempt: &Attempt) -> Duration {
        self.delay
    }
}
