use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::units::RawBalance;
use super::http::send_for_text;

/// `GET {base}/btc/main/addrs/{addr}/balance`, answers `{"balance": <satoshis>, ...}`
pub struct BlockCypherProvider {
    client: Client,
    base_url: String,
}

impl BlockCypherProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

pub(crate) fn parse_address_balance(body: &str) -> Result<RawBalance, ProviderError> {
    let response: Value = serde_json::from_str(body)?;

    if let Some(error) = response.get("error").and_then(Value::as_str) {
        return Err(ProviderError::UpstreamDomain(error.to_string()));
    }

    response
        .get("balance")
        .and_then(Value::as_u64)
        .map(RawBalance::from)
        .ok_or_else(|| ProviderError::MalformedResponse("missing integer `balance`".to_string()))
}

#[async_trait]
impl BalanceProvider for BlockCypherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::BlockCypher
    }

    fn chain(&self) -> ChainId {
        ChainId::Bitcoin
    }

    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError> {
        let url = format!(
            "{}/btc/main/addrs/{}/balance",
            self.base_url.trim_end_matches('/'),
            address
        );
        let body = send_for_text(self.client.get(&url)).await?;
        parse_address_balance(&body)
    }
}
