//! Bounded exponential backoff for rate-limited API calls.

use crate::constants::{RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY, RETRY_MIN_DELAY};
use crate::error::{ExportError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retries only rate-limit failures; every other error is returned at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_delay: RETRY_MIN_DELAY,
            max_delay: RETRY_MAX_DELAY,
            max_attempts: RETRY_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): min, 2*min, 4*min, ... capped at max
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.min_delay.saturating_mul(factor).min(self.max_delay)
    }

    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() => {
                    if attempt >= self.max_attempts {
                        return Err(ExportError::RetriesExhausted { attempts: attempt });
                    }
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Rate limit exceeded, retrying in {:?} (attempt {}/{})",
                        delay, attempt, self.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            max_attempts,
        }
    }

    fn rate_limited() -> ExportError {
        ExportError::Api {
            status: 429,
            message: "Quota exceeded".to_string(),
        }
    }

    #[test]
    fn test_delay_growth_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(5), Duration::from_secs(16));
        assert_eq!(policy.delay_for(8), Duration::from_secs(100));
        assert_eq!(policy.delay_for(40), Duration::from_secs(100));
    }

    #[tokio::test]
    async fn test_retries_rate_limits_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = fast_policy(5)
            .run(move || async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = fast_policy(5)
            .run(move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ExportError::Api {
                    status: 403,
                    message: "forbidden".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(ExportError::Api { status: 403, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = fast_policy(3)
            .run(move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            })
            .await;

        assert!(matches!(
            result,
            Err(ExportError::RetriesExhausted { attempts: 3 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
