use crate::domain::ports::RateSourceRef;
use crate::error::Result;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// How long a fetched rate stays valid.
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    fetched_at: Instant,
}

/// Caches the externally sourced base rate for a bounded interval.
///
/// The lock only guards the value/timestamp pair; the source is queried
/// with no lock held, so a slow feed never blocks readers of a fresh value.
pub struct RateCache {
    source: RateSourceRef,
    ttl: Duration,
    cached: RwLock<Option<CachedRate>>,
}

impl RateCache {
    pub fn new(source: RateSourceRef) -> Self {
        Self::with_ttl(source, DEFAULT_RATE_TTL)
    }

    pub fn with_ttl(source: RateSourceRef, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cached: RwLock::new(None),
        }
    }

    /// Returns the cached rate while it is younger than the TTL, otherwise
    /// fetches a new one and replaces the cached pair.
    ///
    /// A failed fetch leaves the cache as it was and is returned to the
    /// caller, which decides on a fallback.
    pub async fn get_rate(&self) -> Result<Decimal> {
        if let Some(rate) = self.fresh_rate().await {
            tracing::debug!(%rate, "Using cached key rate");
            return Ok(rate);
        }

        let rate = self.source.fetch_rate().await?;
        *self.cached.write().await = Some(CachedRate {
            rate,
            fetched_at: Instant::now(),
        });
        Ok(rate)
    }

    async fn fresh_rate(&self) -> Option<Decimal> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RateSource;
    use crate::error::BankError;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RateSource for CountingSource {
        async fn fetch_rate(&self) -> Result<Decimal> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(dec!(16.0) + Decimal::from(n))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RateSource for FailingSource {
        async fn fetch_rate(&self) -> Result<Decimal> {
            Err(BankError::Internal("feed unavailable".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_is_cached_within_ttl() {
        let source = Arc::new(CountingSource::default());
        let cache = RateCache::new(source.clone());

        let first = cache.get_rate().await.unwrap();
        tokio::time::advance(Duration::from_secs(59 * 60)).await;
        let second = cache.get_rate().await.unwrap();

        assert_eq!(first, dec!(16.0));
        assert_eq!(second, first);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_is_refetched_after_ttl() {
        let source = Arc::new(CountingSource::default());
        let cache = RateCache::new(source.clone());

        cache.get_rate().await.unwrap();
        tokio::time::advance(DEFAULT_RATE_TTL + Duration::from_secs(1)).await;
        let refreshed = cache.get_rate().await.unwrap();

        assert_eq!(refreshed, dec!(17.0));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_and_not_cached() {
        let cache = RateCache::new(Arc::new(FailingSource));
        assert!(cache.get_rate().await.is_err());
        assert!(cache.fresh_rate().await.is_none());
    }
}
