//! Retry execution and backoff strategies.
//!
//! A [`RetryPolicy`] holds the budgets, the retry predicate and the
//! [`Backoff`] strategy. Calling [`RetryPolicy::execute`] (or
//! [`RetryPolicy::execute_blocking`]) runs the loop and returns a
//! [`RunState`] describing how the run ended.
//!
//! # Key Types
//!
//! - [`BackoffStrategy`] - Core trait for computing delays
//! - [`Backoff`] - Fixed, exponential or custom strategy held by a policy
//! - [`RetryPolicy`] - Budgets, predicate, backoff, sleeper
//! - [`RunState`] / [`StopReason`] - Per-run record and why it ended
//!
//! # Examples
//!
//! ```rust
//! use retrykit::retry::{Backoff, RetryPolicy, StopReason};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = RetryPolicy::builder()
//!     .max_attempts(3)
//!     .backoff(Backoff::exponential(Duration::from_millis(100), 2.0))
//!     .build();
//!
//! let state = policy
//!     .execute(|_attempt| async {
//!         // Your operation here
//!         Ok::<_, std::io::Error>(42)
//!     })
//!     .await;
//!
//! assert_eq!(state.stop_reason(), Some(StopReason::Success));
//! let _value = state.into_result()?;
//! # Ok(())
//! # }
//! ```

mod executor;
mod exponential;
mod fixed;
mod policy;
mod sleeper;
mod state;
mod stop;
mod strategy;

pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};
pub use fixed::FixedBackoff;
pub use policy::{RetryPolicy, RetryPolicyBuilder, RetryPredicate};
pub use sleeper::{Sleeper, TokioSleeper};
pub use state::{Attempt, RunState, RunSummary, StopReason};
pub use stop::StopDecision;
pub use strategy::{Backoff, BackoffStrategy};
