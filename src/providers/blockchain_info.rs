use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::units::{parse_raw_amount, RawBalance};
use super::http::send_for_text;

/// `GET {base}/q/addressbalance/{addr}`, answers a plain-text satoshi count
pub struct BlockchainInfoProvider {
    client: Client,
    base_url: String,
}

impl BlockchainInfoProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BalanceProvider for BlockchainInfoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::BlockchainInfo
    }

    fn chain(&self) -> ChainId {
        ChainId::Bitcoin
    }

    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError> {
        let url = format!("{}/q/addressbalance/{}", self.base_url.trim_end_matches('/'), address);
        let body = send_for_text(self.client.get(&url)).await?;
        parse_raw_amount(&body)
    }
}
