//! Retry with exponential backoff
//!
//! A free combinator so any idempotent call can be wrapped, not just the
//! ones the HTTP client knows about. The wait before attempt `i + 1` is
//! `2^i` seconds with no jitter, so two retries wait one second and then
//! two.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::SdkResult;

/// Execute `operation` up to `max_retries + 1` times.
///
/// Another attempt is made only when [`SdkError::is_retryable`] holds
/// (network failures, timeouts, 5xx responses); anything else propagates
/// immediately. Once attempts are exhausted the last error is returned
/// unchanged. Waits use [`tokio::time::sleep`], so the task yields
/// between attempts.
///
/// [`SdkError::is_retryable`]: crate::error::SdkError::is_retryable
pub async fn with_retry<T, F, Fut>(max_retries: u32, mut operation: F) -> SdkResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SdkResult<T>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_retries => {
                let delay = backoff_delay(attempt);
                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt + 1,
                    max_retries + 1,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Wait after the 0-indexed `attempt` fails
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}
