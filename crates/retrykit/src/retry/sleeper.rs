//! The pause primitive awaited between attempts.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Suspends the async executor for a backoff delay.
///
/// The default [`TokioSleeper`] sleeps on the tokio timer. Swap it out to make
/// the pause cancellable, or to record delays in tests.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use retrykit::retry::Sleeper;
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// struct NoSleep;
///
/// #[async_trait]
/// impl Sleeper for NoSleep {
///     async fn sleep(&self, _delay: Duration) {}
/// }
/// ```
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    /// Wait for `delay`. Called for every backoff, zero included.
    async fn sleep(&self, delay: Duration);
}

/// Sleeps with [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
