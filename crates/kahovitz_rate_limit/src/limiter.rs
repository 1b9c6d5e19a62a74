//! Rate limiter implementation using governor and Tokio Semaphore.
//!
//! RPM and RPD are enforced with governor's GCRA limiters, concurrency with a
//! semaphore whose permit is held by the returned guard.

use crate::Tier;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use kahovitz_error::{GenerationError, GenerationErrorKind, KahovitzResult};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, instrument};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter that enforces a tier's quotas.
///
/// # Example
///
/// ```
/// use kahovitz_rate_limit::{RateLimiter, TierConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = RateLimiter::new(TierConfig::new("Free", Some(30), None, Some(1)));
/// let guard = limiter.acquire().await?;
/// assert!(limiter.try_acquire().is_none());
/// drop(guard);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RateLimiter<T: Tier> {
    inner: T,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    rpd_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl<T: Tier> std::fmt::Debug for RateLimiter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("tier", &self.inner.name())
            .field("rpm", &self.inner.rpm())
            .field("rpd", &self.inner.rpd())
            .field("max_concurrent", &self.inner.max_concurrent())
            .finish()
    }
}

impl<T: Tier> RateLimiter<T> {
    /// Create a limiter enforcing every non-`None` limit of the tier.
    pub fn new(tier: T) -> Self {
        let rpm_limiter = tier
            .rpm()
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        // Daily quota as a full-day burst refilled over 24 hours.
        let rpd_limiter = tier.rpd().and_then(NonZeroU32::new).and_then(|n| {
            Quota::with_period(std::time::Duration::from_secs(86_400) / n.get())
                .map(|quota| Arc::new(GovernorRateLimiter::direct(quota.allow_burst(n))))
        });

        let max_concurrent = tier.max_concurrent().unwrap_or(u32::MAX) as usize;
        let concurrent_semaphore = Arc::new(Semaphore::new(
            max_concurrent.clamp(1, Semaphore::MAX_PERMITS),
        ));

        Self {
            inner: tier,
            rpm_limiter,
            rpd_limiter,
            concurrent_semaphore,
        }
    }

    /// The tier this limiter enforces.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Wait until every limit allows one more request.
    ///
    /// The returned guard releases the concurrency slot when dropped.
    ///
    /// # Errors
    ///
    /// Returns error if the concurrency semaphore was closed.
    #[instrument(skip(self), fields(tier = %self.inner.name()))]
    pub async fn acquire(&self) -> KahovitzResult<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.until_ready().await;
        }

        // Concurrency slot last so waiting on quota does not hold it.
        let permit = self
            .concurrent_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::RateLimit(format!(
                    "limiter closed: {}",
                    e
                )))
            })?;

        debug!("Rate limit permission acquired");
        Ok(RateLimiterGuard { _permit: permit })
    }

    /// Acquire without waiting; `None` if any limit would block.
    pub fn try_acquire(&self) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.check().ok()?;
        }

        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;

        Some(RateLimiterGuard { _permit: permit })
    }
}

/// RAII guard holding one concurrency slot.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TierConfig;

    #[tokio::test]
    async fn unlimited_tier_never_blocks() {
        let limiter = RateLimiter::new(TierConfig::new("Unlimited", None, None, None));
        let _a = limiter.try_acquire().expect("first");
        let _b = limiter.try_acquire().expect("second");
    }

    #[tokio::test]
    async fn rpm_limit_blocks_burst() {
        let limiter = RateLimiter::new(TierConfig::new("Tiny", Some(1), None, None));
        let first = limiter.try_acquire();
        assert!(first.is_some());
        assert!(limiter.try_acquire().is_none());
    }

    #[tokio::test]
    async fn concurrency_slot_released_on_drop() {
        let limiter = RateLimiter::new(TierConfig::new("Serial", None, None, Some(1)));
        let guard = limiter.acquire().await.expect("acquire");
        assert!(limiter.try_acquire().is_none());
        drop(guard);
        assert!(limiter.try_acquire().is_some());
    }
}
