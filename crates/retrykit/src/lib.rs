#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry-with-backoff execution for fallible operations.
//!
//! This crate repeatedly invokes an operation until it succeeds, the retry
//! predicate declines to retry, or an attempt or time budget runs out, so
//! callers never re-implement the loop, the pause between attempts, or the
//! bookkeeping of why it stopped.
//!
//! - **Backoff strategies** via the `BackoffStrategy` trait
//!   - Fixed delay
//!   - Exponential delay seeded from the previous pause
//!   - Custom strategies (e.g. a capped wrapper)
//! - **Budgets** on attempt count and elapsed time
//! - **Retry predicates** classifying errors as retryable or not
//! - **Run state** reporting attempts, last backoff and the stop reason
//! - **Serializable configuration** via `RetryConfig`
//!
//! Enable the `tracing` feature to get `debug!` events for each backoff and
//! for the end of every run. Nothing is logged otherwise.
//!
//! # Examples
//!
//! Using the prelude for convenient imports:
//!
//! ```rust
//! use retrykit::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetryPolicy::builder()
//!     .max_attempts(3)
//!     .backoff(ExponentialBackoff::new(Duration::from_millis(100), 2.0))
//!     .build();
//!
//! let state = policy
//!     .execute(|_attempt| async { Ok::<_, std::io::Error>(42) })
//!     .await;
//!
//! match state.stop_reason() {
//!     Some(StopReason::Success) => println!("done after {} attempts", state.attempts()),
//!     other => println!("gave up: {:?}", other),
//! }
//! let _value = state.into_result()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod retry;

/// Convenient re-exports of commonly used items.
///
/// Import all core types with:
///
/// ```rust
/// use retrykit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{BackoffConfig, RetryConfig};
    pub use crate::error::{ConfigError, RetryError};
    pub use crate::retry::{
        Attempt, Backoff, BackoffStrategy, ExponentialBackoff, FixedBackoff, RetryPolicy,
        RunState, StopReason,
    };
}
