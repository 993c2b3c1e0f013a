//! Bounded exponential-backoff retry for transient service overload.
//!
//! The generation service signals overload with 5xx/429 statuses or an
//! overload marker in the error body. Those failures are worth waiting out;
//! everything else (bad requests, malformed bodies, missing image parts)
//! is permanent and propagates immediately. Classification lives on the
//! error type via [`RetryableError`]; this module only schedules attempts.

use hachikoma_error::RetryableError;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::ExponentialBackoff;
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Backoff schedule for retrying transient failures.
///
/// The defaults give 4 total attempts with delays of 1s, 2s, 4s between
/// them.
///
/// # Examples
///
/// ```
/// use hachikoma_models::RetryPolicy;
/// use std::time::Duration;
///
/// let delays: Vec<Duration> = RetryPolicy::default().schedule().collect();
/// assert_eq!(
///     delays,
///     vec![
///         Duration::from_millis(1000),
///         Duration::from_millis(2000),
///         Duration::from_millis(4000),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries after the initial attempt
    pub max_retries: usize,
    /// Delay before the first retry; doubles each retry
    pub initial_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// The delay sequence this policy produces, one entry per retry.
    ///
    /// `ExponentialBackoff::from_millis(2)` doubles on each step; the
    /// factor scales the sequence so the first delay equals
    /// `initial_backoff_ms`.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor(self.initial_backoff_ms / 2)
            .take(self.max_retries)
    }
}

/// Run an operation, retrying transient failures per the policy.
///
/// Permanent errors propagate on the first attempt without delay. When all
/// retries are exhausted the last error is returned unchanged.
pub async fn retry_transient<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: RetryableError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::spawn(policy.schedule(), || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(err) if err.is_retryable() => {
                    warn!(error = %err, "Transient service error, will retry");
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
                Err(err) => Err(RetryError::Permanent(err)),
            }
        }
    })
    .await
}
