//! Retry with exponential backoff for fallible async operations.
//!
//! Attempts run strictly one after another. The wait after failed attempt `n`
//! (1-based) is `multiplier * 2^(n-1)` seconds, clamped to `[min_backoff, max_backoff]`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

/// Configuration for retry behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Policy for the review call: 3 attempts, waits of 4s clamped to at most 10s.
    pub fn analysis() -> Self {
        Self {
            max_attempts: 3,
            multiplier: 1.0,
            min_backoff: Duration::from_secs(4),
            max_backoff: Duration::from_secs(10),
        }
    }

    /// Wait before the next attempt, given the 1-based number of the attempt that just failed.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(63) as i32;
        let secs = self.multiplier * 2f64.powi(exponent);
        let secs = secs.clamp(
            self.min_backoff.as_secs_f64(),
            self.max_backoff.as_secs_f64(),
        );
        Duration::from_secs_f64(secs)
    }
}

/// Runs `f` until it succeeds or `policy.max_attempts` is reached, returning
/// the first success or the last error.
///
/// ```ignore
/// let text = retry(&RetryPolicy::analysis(), "review", || async {
///     llm.generate(&prompt).await
/// })
/// .await?;
/// ```
pub async fn retry<F, Fut, T, E>(policy: &RetryPolicy, operation_name: &str, f: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(operation = operation_name, attempt, "call succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if attempt >= max_attempts => {
                warn!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    "call failed, no attempts left"
                );
                return Err(err);
            }
            Err(err) => {
                let backoff = policy.backoff_after(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    error = %err,
                    backoff_ms = backoff.as_millis() as u64,
                    "call failed, retrying after backoff"
                );
                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
