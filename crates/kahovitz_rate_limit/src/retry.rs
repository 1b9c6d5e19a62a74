//! Retry for posting calls rejected by a provider rate limit.
//!
//! Only rate-limit errors (HTTP 403/429 from the posting service) are retried.
//! Delays double from the base delay, except when the provider reported an
//! exhausted quota with a reset time: then the next attempt waits for the reset.

use crate::PostingSettings;
use kahovitz_error::{KahovitzError, KahovitzErrorKind, KahovitzResult};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// Attempt budget and backoff for posting.
///
/// # Examples
///
/// ```
/// use kahovitz_rate_limit::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// let delays: Vec<Duration> = policy.delays().collect();
/// assert_eq!(delays, vec![Duration::from_secs(1), Duration::from_secs(2)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Policy with an attempt budget (first attempt included) and base delay.
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Attempts including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Delays between attempts: base, 2x base, 4x base, ...
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let base = self.base_delay;
        (0..self.max_attempts.saturating_sub(1) as u32)
            .map(move |n| base.saturating_mul(2u32.saturating_pow(n)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl From<&PostingSettings> for RetryPolicy {
    fn from(settings: &PostingSettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_millis(settings.base_delay_ms),
        )
    }
}

/// How long to wait before retrying a posting error.
///
/// Returns `None` when the error is not a rate limit. For a rate limit with an
/// exhausted quota and a reset timestamp, the duration until the reset; for
/// any other rate limit, `Some(Duration::ZERO)` meaning "use the backoff".
pub fn rate_limit_delay(err: &KahovitzError) -> Option<Duration> {
    let KahovitzErrorKind::Posting(posting) = err.kind() else {
        return None;
    };

    if !posting.kind.is_rate_limit() {
        return None;
    }

    match posting.kind.exhausted_until() {
        Some(reset) => {
            let now = chrono::Utc::now().timestamp();
            let secs = u64::try_from(reset.saturating_sub(now)).unwrap_or(0);
            Some(Duration::from_secs(secs))
        }
        None => Some(Duration::ZERO),
    }
}

/// Run a posting operation, retrying rate-limit failures.
///
/// Non-rate-limit errors are returned immediately; the last rate-limit error
/// is returned once the attempt budget is spent.
///
/// # Example
///
/// ```
/// use kahovitz_rate_limit::{RetryPolicy, post_with_retry};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let id = post_with_retry(&RetryPolicy::default(), || async {
///     Ok::<_, kahovitz_error::KahovitzError>("12345".to_string())
/// })
/// .await?;
/// assert_eq!(id, "12345");
/// # Ok(())
/// # }
/// ```
pub async fn post_with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> KahovitzResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = KahovitzResult<T>>,
{
    let operation = &operation;
    Retry::spawn(policy.delays(), move || async move {
        match operation().await {
            Ok(value) => Ok(value),
            Err(err) => match rate_limit_delay(&err) {
                Some(wait) if wait > Duration::ZERO => {
                    warn!(wait_secs = wait.as_secs(), error = %err, "Quota exhausted, waiting for reset");
                    Err(RetryError::Transient {
                        err,
                        retry_after: Some(wait),
                    })
                }
                Some(_) => {
                    warn!(error = %err, "Rate limited, backing off");
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
                None => {
                    debug!(error = %err, "Permanent posting error");
                    Err(RetryError::Permanent(err))
                }
            },
        }
    })
    .await
}
