/*!
 * Retry-with-backoff combinator.
 *
 * Runs an async operation up to a maximum number of attempts, waiting a
 * fixed interval after each retryable failure. A caller-supplied predicate
 * decides whether an error is worth another attempt; the first
 * non-retryable error ends the sequence immediately.
 */

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Attempt budget and wait interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Wait between a retryable failure and the next attempt
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Create a new policy
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self { max_attempts, backoff }
    }

    /// Attempts actually made; a zero budget still runs the operation once
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    /// Three attempts, two seconds apart
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

/// Final error of a retry sequence
#[derive(Debug, Clone, PartialEq)]
pub struct RetryFailure<E> {
    /// Error returned by the last attempt
    pub error: E,
    /// Number of attempts made
    pub attempts: u32,
}

/// Execute an async operation with retries, using a predicate to determine
/// if a failed attempt may be retried
pub async fn with_retry_if<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
    is_retryable: P,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = policy.effective_attempts();
    let mut attempt = 0;

    loop {
        attempt += 1;

        let error = match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{}: succeeded on attempt {}/{}", operation_name, attempt, max_attempts);
                }
                return Ok(result);
            }
            Err(error) => error,
        };

        if !is_retryable(&error) {
            warn!("{}: non-retryable error, giving up: {}", operation_name, error);
            return Err(RetryFailure { error, attempts: attempt });
        }

        if attempt >= max_attempts {
            warn!(
                "{}: all {} attempts failed. Last error: {}",
                operation_name, max_attempts, error
            );
            return Err(RetryFailure { error, attempts: attempt });
        }

        warn!(
            "{}: attempt {}/{} failed ({}), retrying in {:?}",
            operation_name, attempt, max_attempts, error, policy.backoff
        );
        if !policy.backoff.is_zero() {
            sleep(policy.backoff).await;
        }
    }
}
