use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::units::RawBalance;

/// Core trait for fetching a native balance from one upstream service
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Which upstream this client talks to
    fn id(&self) -> ProviderId;

    /// Chain whose balances this client answers for
    fn chain(&self) -> ChainId;

    /// Fetch the balance of `address` in the chain's smallest unit.
    ///
    /// Issues exactly one request and never retries.
    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError>;
}
