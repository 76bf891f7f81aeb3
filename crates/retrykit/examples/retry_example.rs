//! Example: Retrying a flaky operation with retrykit
//!
//! This example demonstrates:
//! 1. Exponential backoff until success
//! 2. Custom retry predicate (only retry network errors)
//! 3. Telling success apart from an exhausted budget
//!
//! Run with:
//! ```bash
//! cargo run -p retrykit --example retry_example
//! ```

use retrykit::prelude::*;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// A simulated API that fails the first few times
struct UnreliableApi {
    calls: Arc<AtomicU32>,
    fail_count: u32,
}

impl UnreliableApi {
    fn new(fail_count: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail_count,
        }
    }

    async fn call(&self, attempt: Attempt) -> Result<String, std::io::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if attempt.number() <= self.fail_count {
            println!(
                "  Attempt {} (after {:?} backoff): FAILED",
                attempt.number(),
                attempt.last_backoff()
            );
            Err(std::io::Error::other(format!(
                "network error on attempt {}",
                attempt.number()
            )))
        } else {
            println!("  Attempt {}: SUCCESS", attempt.number());
            Ok("API response data".to_string())
        }
    }

    fn total_calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Example 1: Exponential backoff until the API recovers
async fn example_simple_retry() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Exponential Backoff ===\n");

    let policy = RetryPolicy::builder()
        .max_attempts(10)
        .backoff(ExponentialBackoff::new(Duration::from_millis(100), 2.0))
        .build();

    let api = UnreliableApi::new(3);

    println!("Calling unreliable API (will fail 3 times before succeeding)...");
    let start = Instant::now();

    let state = policy.execute(|attempt| api.call(attempt)).await;

    println!("\nStop reason: {:?}", state.stop_reason());
    println!("Attempts: {}", state.attempts());
    println!("Last backoff: {:?}", state.last_backoff());
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 100ms + 200ms + 400ms = ~700ms");

    let result = state.into_result()?;
    println!("Result: {}", result);
    println!("Total calls: {}", api.total_calls());

    Ok(())
}

/// Example 2: Custom retry predicate (only retry network errors)
async fn example_custom_predicate() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Custom Retry Predicate (Network Errors Only) ===\n");

    let policy = RetryPolicy::builder()
        .max_attempts(5)
        .backoff(Backoff::fixed(Duration::from_millis(10)))
        .retry_on(|err: &std::io::Error| err.to_string().to_lowercase().contains("network"))
        .build();

    println!("Test 1: Auth error (should NOT retry)");
    let state = policy
        .execute(|_| async {
            Err::<(), _>(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "auth failed",
            ))
        })
        .await;
    println!(
        "  Stopped after {} attempt(s): {:?}",
        state.attempts(),
        state.stop_reason()
    );
    assert_eq!(state.stop_reason(), Some(StopReason::NonRetryableError));

    println!("\nTest 2: Network error (should retry)");
    let api = UnreliableApi::new(2);
    let state = policy.execute(|attempt| api.call(attempt)).await;
    assert_eq!(state.stop_reason(), Some(StopReason::Success));
    println!("Total calls: {}", api.total_calls());

    Ok(())
}

/// Example 3: Exhausting the attempt budget
async fn example_exhausted_budget() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 3: Exhausted Budget ===\n");

    let policy = RetryPolicy::builder()
        .max_attempts(3)
        .max_duration(Duration::from_secs(5))
        .backoff(Backoff::fixed(Duration::from_millis(20)))
        .build();

    let api = UnreliableApi::new(u32::MAX);
    let state = policy.execute(|attempt| api.call(attempt)).await;

    match state.stop_reason() {
        Some(reason) if reason.is_exhausted() => {
            println!("Gave up ({}) after {} attempts", reason, state.attempts());
        }
        other => println!("Unexpected stop: {:?}", other),
    }

    if let Err(err) = state.into_result() {
        println!("Last error: {}", err);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    println!("==============================================");
    println!("   retrykit: Retry Examples");
    println!("==============================================");

    example_simple_retry().await?;
    example_custom_predicate().await?;
    example_exhausted_budget().await?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
