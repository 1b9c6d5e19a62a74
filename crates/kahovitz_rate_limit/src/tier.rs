//! Tier trait for representing API rate limit constraints.

/// Rate limiting constraints for an API tier.
///
/// All methods return `Option<T>` where `None` means unlimited.
///
/// # Example
///
/// ```
/// use kahovitz_rate_limit::Tier;
///
/// struct FreeTier;
///
/// impl Tier for FreeTier {
///     fn rpm(&self) -> Option<u32> { Some(30) }
///     fn rpd(&self) -> Option<u32> { Some(1_000) }
///     fn max_concurrent(&self) -> Option<u32> { Some(2) }
///     fn name(&self) -> &str { "Free" }
/// }
///
/// assert_eq!(FreeTier.rpm(), Some(30));
/// ```
pub trait Tier: Send + Sync {
    /// Requests per minute limit.
    fn rpm(&self) -> Option<u32>;

    /// Requests per day limit.
    fn rpd(&self) -> Option<u32>;

    /// Maximum concurrent requests.
    fn max_concurrent(&self) -> Option<u32>;

    /// Human-readable tier name.
    fn name(&self) -> &str;
}
