use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::core::config::ExchangeRateConfig;
use crate::features::exchange_rates::clients::RateSource;
use crate::features::exchange_rates::models::ExchangeRate;

/// Upper bound on how long a quote stays fresh, so the expiry instant cannot
/// overflow for absurd TTL settings
const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Last successful quote together with the instant it goes stale.
///
/// Both live under one lock so a reader never pairs a new rate with an old
/// expiry.
struct CachedRate {
    rate: ExchangeRate,
    expires_at: Instant,
}

/// Process-wide USD exchange rate cache.
///
/// Staleness is checked lazily on every read. A failed or timed-out refresh
/// leaves the cache untouched and hands the caller the fallback rate, so the
/// next read tries the source again. Refreshes run on their own task and
/// finish even if the request that triggered them goes away.
pub struct RateCache {
    source: Arc<dyn RateSource>,
    cache: Arc<RwLock<Option<CachedRate>>>,
    cache_ttl: Duration,
    fetch_timeout: Duration,
    fallback_rate: Decimal,
    target_currency: String,
}

impl std::fmt::Debug for RateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateCache")
            .field("source", &self.source.name())
            .field("cache_ttl", &self.cache_ttl)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("fallback_rate", &self.fallback_rate)
            .field("target_currency", &self.target_currency)
            .finish()
    }
}

impl RateCache {
    pub fn new(source: Arc<dyn RateSource>, config: &ExchangeRateConfig) -> Self {
        if config.cache_ttl > MAX_CACHE_TTL {
            tracing::warn!(
                "Exchange rate cache TTL of {} seconds clamped to {} seconds",
                config.cache_ttl.as_secs(),
                MAX_CACHE_TTL.as_secs()
            );
        }

        Self {
            source,
            cache: Arc::new(RwLock::new(None)),
            cache_ttl: config.cache_ttl.min(MAX_CACHE_TTL),
            fetch_timeout: config.fetch_timeout,
            fallback_rate: config.fallback_rate,
            target_currency: config.target_currency.clone(),
        }
    }

    pub fn target_currency(&self) -> &str {
        &self.target_currency
    }

    /// Current rate: cached while fresh, refreshed otherwise. Never fails.
    pub async fn get_rates(&self) -> ExchangeRate {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if Instant::now() < cached.expires_at {
                    tracing::debug!(
                        "Using cached exchange rate (expires in {} seconds)",
                        (cached.expires_at - Instant::now()).as_secs()
                    );
                    return cached.rate.clone();
                }
            }
        }

        self.refresh().await
    }

    /// Convert a USD amount into the target currency. No rounding is applied.
    pub async fn convert(&self, amount_usd: Decimal) -> Decimal {
        let rates = self.get_rates().await;
        amount_usd.saturating_mul(rates.target_rate)
    }

    async fn refresh(&self) -> ExchangeRate {
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let cache_ttl = self.cache_ttl;
        let fetch_timeout = self.fetch_timeout;
        let target_currency = self.target_currency.clone();

        // dropping the handle detaches the task, it is not cancelled
        let handle = tokio::spawn(async move {
            tracing::debug!("Fetching exchange rates from {} source", source.name());

            match tokio::time::timeout(fetch_timeout, source.fetch_rates()).await {
                Ok(Ok(rate)) => {
                    let mut cache = cache.write().await;
                    *cache = Some(CachedRate {
                        rate: rate.clone(),
                        expires_at: Instant::now() + cache_ttl,
                    });

                    tracing::info!(
                        "Fetched exchange rate USD->{} = {}, cached for {} seconds",
                        target_currency,
                        rate.target_rate,
                        cache_ttl.as_secs()
                    );
                    Some(rate)
                }
                Ok(Err(e)) => {
                    tracing::warn!("Exchange rate refresh failed, using fallback: {}", e);
                    None
                }
                Err(_) => {
                    tracing::warn!(
                        "Exchange rate refresh timed out after {:?}, using fallback",
                        fetch_timeout
                    );
                    None
                }
            }
        });

        match handle.await {
            Ok(Some(rate)) => rate,
            Ok(None) => self.fallback(),
            Err(e) => {
                tracing::error!("Exchange rate refresh task failed: {}", e);
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> ExchangeRate {
        ExchangeRate::per_dollar(self.fallback_rate)
    }

    #[cfg(test)]
    pub(crate) async fn cached_entry(&self) -> Option<(ExchangeRate, Instant)> {
        self.cache
            .read()
            .await
            .as_ref()
            .map(|c| (c.rate.clone(), c.expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::exchange_rates::clients::{FixedRateSource, RateSourceError};
    use async_trait::async_trait;
    use rust_decimal::prelude::ToPrimitive;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    const TTL: Duration = Duration::from_secs(30 * 60);

    fn config() -> ExchangeRateConfig {
        ExchangeRateConfig {
            target_currency: "COP".to_string(),
            source_value: Decimal::from(3683),
            fallback_rate: Decimal::from(4000),
            cache_ttl: TTL,
            fetch_timeout: Duration::from_secs(5),
        }
    }

    /// Quotes `1000 + n` on the n-th successful fetch and can be switched to fail
    #[derive(Default)]
    struct ScriptedSource {
        calls: AtomicUsize,
        failing: AtomicBool,
        fetched_at: Mutex<Vec<Instant>>,
    }

    impl ScriptedSource {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_rates(&self) -> Result<ExchangeRate, RateSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // give concurrent readers a chance to interleave with the refresh
            tokio::task::yield_now().await;

            if self.failing.load(Ordering::SeqCst) {
                return Err(RateSourceError::FetchError("upstream down".to_string()));
            }

            let mut fetched_at = self.fetched_at.lock().unwrap();
            fetched_at.push(Instant::now());
            let index = fetched_at.len() - 1;
            Ok(ExchangeRate::per_dollar(Decimal::from(1000 + index)))
        }
    }

    struct StalledSource;

    #[async_trait]
    impl RateSource for StalledSource {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn fetch_rates(&self) -> Result<ExchangeRate, RateSourceError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ExchangeRate::per_dollar(Decimal::from(1)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_convert_multiplies_by_target_rate() {
        let cache = RateCache::new(Arc::new(FixedRateSource::new(Decimal::from(3683))), &config());

        let amount = Decimal::new(1050, 2); // 10.50
        assert_eq!(cache.convert(amount).await, Decimal::new(3867150, 2));
        assert_eq!(cache.convert(Decimal::ZERO).await, Decimal::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_within_window_are_identical() {
        let source = Arc::new(ScriptedSource::default());
        let cache = RateCache::new(source.clone(), &config());

        let first = cache.get_rates().await;
        let (_, first_expiry) = cache.cached_entry().await.unwrap();
        tokio::time::advance(Duration::from_secs(60)).await;
        let second = cache.get_rates().await;
        let (_, second_expiry) = cache.cached_entry().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first_expiry, second_expiry);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_refresh_before_ttl_elapses() {
        let source = Arc::new(ScriptedSource::default());
        let cache = RateCache::new(source.clone(), &config());

        cache.get_rates().await;
        tokio::time::advance(TTL - Duration::from_secs(1)).await;
        cache.get_rates().await;
        assert_eq!(source.calls(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        let refreshed = cache.get_rates().await;
        assert_eq!(source.calls(), 2);
        assert_eq!(refreshed.target_rate, Decimal::from(1001));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_returns_fallback_and_retries() {
        let source = Arc::new(ScriptedSource::default());
        source.set_failing(true);
        let cache = RateCache::new(source.clone(), &config());

        let rate = cache.get_rates().await;
        assert_eq!(rate.target_rate, Decimal::from(4000));
        assert!(cache.cached_entry().await.is_none());

        // the fallback was not cached, so the next read goes upstream again
        cache.get_rates().await;
        assert_eq!(source.calls(), 2);

        source.set_failing(false);
        let rate = cache.get_rates().await;
        assert_eq!(rate.target_rate, Decimal::from(1000));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_stale_entry_and_expiry() {
        let source = Arc::new(ScriptedSource::default());
        let cache = RateCache::new(source.clone(), &config());

        cache.get_rates().await;
        let (stale_rate, stale_expiry) = cache.cached_entry().await.unwrap();

        tokio::time::advance(TTL).await;
        source.set_failing(true);
        let rate = cache.get_rates().await;
        assert_eq!(rate.target_rate, Decimal::from(4000));

        let (kept_rate, kept_expiry) = cache.cached_entry().await.unwrap();
        assert_eq!(kept_rate, stale_rate);
        assert_eq!(kept_expiry, stale_expiry);

        cache.get_rates().await;
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_source_times_out_to_fallback() {
        let cache = RateCache::new(Arc::new(StalledSource), &config());

        let started = Instant::now();
        let rate = cache.get_rates().await;

        assert_eq!(rate.target_rate, Decimal::from(4000));
        assert!(started.elapsed() < Duration::from_secs(3600));
        assert!(cache.cached_entry().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_reads_never_see_torn_entry() {
        let source = Arc::new(ScriptedSource::default());
        let cache = Arc::new(RateCache::new(source.clone(), &config()));

        for _round in 0..4 {
            let mut handles = Vec::new();
            for _ in 0..16 {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    let mut seen = Vec::new();
                    for _ in 0..8 {
                        let rate = cache.get_rates().await;
                        let entry = cache.cached_entry().await;
                        seen.push((rate, entry));
                        tokio::task::yield_now().await;
                    }
                    seen
                }));
            }

            for handle in handles {
                for (rate, entry) in handle.await.unwrap() {
                    assert!(rate.target_rate >= Decimal::from(1000));

                    let (cached, expires_at) = entry.expect("entry present after refresh");
                    let index = cached.target_rate.to_usize().unwrap() - 1000;
                    let fetched_at = source.fetched_at.lock().unwrap()[index];
                    assert_eq!(expires_at, fetched_at + TTL);
                }
            }

            // step across the expiry boundary
            tokio::time::advance(TTL).await;
        }

        assert!(source.calls() >= 4);
    }

    /// Quotes 2000 after a one second delay
    struct SlowSource;

    #[async_trait]
    impl RateSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch_rates(&self) -> Result<ExchangeRate, RateSourceError> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(ExchangeRate::per_dollar(Decimal::from(2000)))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completes_when_caller_is_cancelled() {
        let cache = Arc::new(RateCache::new(Arc::new(SlowSource), &config()));

        let caller = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_rates().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        tokio::time::sleep(Duration::from_secs(3)).await;

        let (rate, _) = cache.cached_entry().await.expect("refresh finished");
        assert_eq!(rate.target_rate, Decimal::from(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_ttl_is_clamped() {
        let mut config = config();
        config.cache_ttl = Duration::from_secs(u64::MAX);
        let source = Arc::new(ScriptedSource::default());
        let cache = RateCache::new(source.clone(), &config);

        let started = Instant::now();
        cache.get_rates().await;
        let (_, expires_at) = cache.cached_entry().await.unwrap();
        assert_eq!(expires_at, started + MAX_CACHE_TTL);

        tokio::time::advance(Duration::from_secs(24 * 60 * 60)).await;
        cache.get_rates().await;
        assert_eq!(source.calls(), 1);
    }
}
