use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;

/// Trait for USD price feeds
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Get the USD unit price for an oracle coin id (e.g. "bitcoin")
    async fn fetch_usd_price(&self, price_id: &str) -> Result<Decimal, ProviderError>;

    /// Check that the oracle is reachable
    async fn ping(&self) -> bool {
        true
    }
}
