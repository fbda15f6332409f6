// Retry logic with Retry-After hint support
// Author: kelexine (https://github.com/kelexine)

use backoff::{backoff::Backoff, ExponentialBackoff};
use std::time::Duration;
use tracing::debug;

/// Upper bound for any single wait, whatever the upstream asks for.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// A failed upstream attempt as seen by the retry loop.
#[derive(Debug, Clone)]
pub struct UpstreamFailure {
    /// HTTP status, or 500 for transport-level failures.
    pub status: u16,
    pub body: String,
    /// Delay requested by the upstream via `Retry-After`.
    pub retry_after: Option<Duration>,
}

impl UpstreamFailure {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

/// Parse a `Retry-After` header given in whole or fractional seconds
/// (e.g. "40", "1.5"). Returns the delay capped at 60 seconds.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    let millis = (seconds * 1000.0) as u64;
    Some(Duration::from_millis(millis).min(MAX_RETRY_DELAY))
}

/// Create exponential backoff configuration for retries
pub fn create_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: Duration::from_millis(500),     // Start at 500ms
        initial_interval: Duration::from_millis(500),
        randomization_factor: 0.3,                         // Add jitter
        multiplier: 2.0,                                  // Double each time
        max_interval: Duration::from_secs(30),            // Cap at 30s
        max_elapsed_time: Some(Duration::from_secs(120)), // Give up after 2 minutes
        ..Default::default()
    }
}

/// Determine if an HTTP status code is retryable
pub fn is_retryable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Execute operation with retry logic
/// - Uses the upstream Retry-After hint if available
/// - Falls back to exponential backoff
/// - Gives up after `max_retries` additional attempts
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    max_retries: u32,
    mut operation: F,
) -> Result<T, UpstreamFailure>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, UpstreamFailure>>,
{
    let mut backoff = create_backoff();
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(failure) => {
                if !is_retryable(failure.status) || attempt > max_retries {
                    // Non-retryable error or retries exhausted
                    return Err(failure);
                }

                let delay = match failure.retry_after {
                    Some(hint) => {
                        debug!(
                            "{} failed with {} (attempt {}), upstream asks to wait {}ms",
                            operation_name,
                            failure.status,
                            attempt,
                            hint.as_millis()
                        );
                        hint
                    }
                    None => {
                        let Some(backoff_delay) = backoff.next_backoff() else {
                            return Err(failure);
                        };
                        debug!(
                            "{} failed with {} (attempt {}), retrying after {}ms",
                            operation_name,
                            failure.status,
                            attempt,
                            backoff_delay.as_millis()
                        );
                        backoff_delay
                    }
                };

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("40").unwrap().as_secs(), 40);
        assert_eq!(parse_retry_after("1.5").unwrap().as_millis(), 1500);
        assert_eq!(parse_retry_after(" 0.123 ").unwrap().as_millis(), 123);

        // Test cap at 60s
        assert_eq!(parse_retry_after("120").unwrap().as_secs(), 60);

        assert!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT").is_none());
        assert!(parse_retry_after("-1").is_none());
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(429));
        assert!(is_retryable(500));
        assert!(is_retryable(502));
        assert!(is_retryable(503));
        assert!(!is_retryable(400));
        assert!(!is_retryable(401));
        assert!(!is_retryable(404));
    }

    #[tokio::test]
    async fn test_non_retryable_fails_immediately() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", 3, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(UpstreamFailure::new(400, "bad")) }
        })
        .await;

        assert_eq!(result.unwrap_err().status, 400);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_with_hint_then_succeeds() {
        let attempts = AtomicU32::new(0);
        let result = with_retry("test", 3, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(UpstreamFailure::new(503, "busy")
                        .with_retry_after(Some(Duration::from_millis(1))))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_gives_up() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", 0, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(UpstreamFailure::new(429, "slow down")) }
        })
        .await;

        assert_eq!(result.unwrap_err().status, 429);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
