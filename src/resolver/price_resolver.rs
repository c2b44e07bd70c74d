use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use reqwest::Client;
use rust_decimal::Decimal;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::chain::ChainId;
use crate::providers::CoinGeckoOracle;
use crate::registry::chain_info;
use crate::traits::price_oracle::PriceOracle;

/// A cached USD unit price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCacheEntry {
    pub chain: ChainId,
    pub unit_price_usd: Decimal,
    pub fetched_at: Instant,
    pub fetched_at_utc: DateTime<Utc>,
}

impl PriceCacheEntry {
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    /// Fresh iff strictly younger than the cache window
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }

    pub fn fetched_at_epoch_ms(&self) -> i64 {
        self.fetched_at_utc.timestamp_millis()
    }
}

/// Price cache keyed by chain. Clones share the same entries.
///
/// Bounded by the fixed chain set, so entries are overwritten but never evicted.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    entries: Arc<DashMap<ChainId, PriceCacheEntry>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `chain` regardless of age
    pub fn get(&self, chain: ChainId) -> Option<PriceCacheEntry> {
        self.entries.get(&chain).map(|entry| *entry)
    }

    /// Entry for `chain` only if it is still inside `window`
    pub fn get_fresh(&self, chain: ChainId, window: Duration) -> Option<PriceCacheEntry> {
        self.get(chain).filter(|entry| entry.is_fresh(window))
    }

    pub fn insert(&self, chain: ChainId, unit_price_usd: Decimal) -> PriceCacheEntry {
        let entry = PriceCacheEntry {
            chain,
            unit_price_usd,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        };
        self.entries.insert(chain, entry);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves USD unit prices through a price oracle with a time-boxed cache
#[derive(Clone)]
pub struct PriceResolver {
    oracle: Arc<dyn PriceOracle>,
    cache: PriceCache,
    cache_duration: Duration,
}

impl PriceResolver {
    pub fn new(oracle: Arc<dyn PriceOracle>, cache_duration: Duration) -> Self {
        Self::with_cache(oracle, PriceCache::new(), cache_duration)
    }

    pub fn with_cache(oracle: Arc<dyn PriceOracle>, cache: PriceCache, cache_duration: Duration) -> Self {
        Self {
            oracle,
            cache,
            cache_duration,
        }
    }

    /// Resolver backed by CoinGecko
    pub fn from_config(config: &Config, client: &Client) -> Self {
        let oracle = CoinGeckoOracle::new(
            client.clone(),
            &config.coingecko_api_url,
            config.coingecko_api_key.clone(),
        );
        Self::new(Arc::new(oracle), config.price_cache_duration)
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    /// USD price of one display unit of `chain`'s native asset.
    ///
    /// Served from cache while fresh. Any failure yields zero and leaves the
    /// cache untouched, so the next call retries.
    pub async fn resolve_price(&self, chain: ChainId) -> Decimal {
        if let Some(entry) = self.cache.get_fresh(chain, self.cache_duration) {
            debug!("Cached {} price: ${} (age {:?})", chain, entry.unit_price_usd, entry.age());
            return entry.unit_price_usd;
        }

        let price_id = chain_info(chain).price_id;
        match self.oracle.fetch_usd_price(price_id).await {
            Ok(price) => {
                self.cache.insert(chain, price);
                price
            }
            Err(e) => {
                warn!("Price lookup for {} failed [{}]: {}", chain, e.kind(), e);
                Decimal::ZERO
            }
        }
    }

    /// Whether the oracle answers at all
    pub async fn ping(&self) -> bool {
        self.oracle.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::errors::ProviderError;
    use crate::providers::scripted::ScriptedOracle;

    const WINDOW: Duration = Duration::from_secs(5 * 60);

    fn resolver(oracle: &Arc<ScriptedOracle>) -> PriceResolver {
        PriceResolver::new(oracle.clone(), WINDOW)
    }

    #[tokio::test(start_paused = true)]
    async fn second_call_within_window_hits_cache() {
        let oracle = Arc::new(ScriptedOracle::new().with_price("ethereum", dec!(2000)));
        let prices = resolver(&oracle);

        assert_eq!(prices.resolve_price(ChainId::Ethereum).await, dec!(2000));
        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(prices.resolve_price(ChainId::Ethereum).await, dec!(2000));

        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_refetched() {
        let oracle = Arc::new(ScriptedOracle::new().with_price("bitcoin", dec!(60000)));
        let prices = resolver(&oracle);

        prices.resolve_price(ChainId::Bitcoin).await;
        oracle.set("bitcoin", Ok(dec!(61000)));
        tokio::time::advance(WINDOW).await;

        assert_eq!(prices.resolve_price(ChainId::Bitcoin).await, dec!(61000));
        assert_eq!(oracle.calls(), 2);
        assert_eq!(prices.cache().get(ChainId::Bitcoin).unwrap().unit_price_usd, dec!(61000));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_returns_zero_and_does_not_cache() {
        let oracle = Arc::new(ScriptedOracle::new());
        oracle.set("solana", Err(ProviderError::Transport("connection refused".to_string())));
        let prices = resolver(&oracle);

        assert_eq!(prices.resolve_price(ChainId::Solana).await, Decimal::ZERO);
        assert!(prices.cache().get(ChainId::Solana).is_none());

        // Still inside the window, but nothing was cached so it retries
        oracle.set("solana", Ok(dec!(150)));
        assert_eq!(prices.resolve_price(ChainId::Solana).await, dec!(150));
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_field_is_not_cached_as_zero() {
        let oracle = Arc::new(ScriptedOracle::new());
        let prices = resolver(&oracle);

        assert_eq!(prices.resolve_price(ChainId::Ethereum).await, Decimal::ZERO);
        assert!(prices.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_stale_entry_but_reports_zero() {
        let oracle = Arc::new(ScriptedOracle::new().with_price("ethereum", dec!(2000)));
        let prices = resolver(&oracle);
        prices.resolve_price(ChainId::Ethereum).await;
        let first = prices.cache().get(ChainId::Ethereum).unwrap();

        tokio::time::advance(WINDOW + Duration::from_secs(1)).await;
        oracle.set("ethereum", Err(ProviderError::Transport("HTTP 429".to_string())));

        assert_eq!(prices.resolve_price(ChainId::Ethereum).await, Decimal::ZERO);
        assert_eq!(prices.cache().get(ChainId::Ethereum), Some(first));
    }

    #[tokio::test(start_paused = true)]
    async fn caches_are_per_chain_and_per_instance() {
        let oracle = Arc::new(
            ScriptedOracle::new()
                .with_price("ethereum", dec!(2000))
                .with_price("bitcoin", dec!(60000)),
        );
        let a = resolver(&oracle);
        let b = resolver(&oracle);

        a.resolve_price(ChainId::Ethereum).await;
        a.resolve_price(ChainId::Bitcoin).await;
        b.resolve_price(ChainId::Ethereum).await;

        assert_eq!(oracle.calls(), 3);
        assert_eq!(a.cache().len(), 2);
        assert_eq!(b.cache().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shared_cache_is_reused_across_clones() {
        let oracle = Arc::new(ScriptedOracle::new().with_price("solana", dec!(150)));
        let prices = resolver(&oracle);
        let clone = prices.clone();

        prices.resolve_price(ChainId::Solana).await;
        clone.resolve_price(ChainId::Solana).await;

        assert_eq!(oracle.calls(), 1);
    }
}
