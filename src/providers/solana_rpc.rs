use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::units::RawBalance;
use super::http::json_rpc_call;

/// Solana JSON-RPC `getBalance`; result is `{"context": {...}, "value": <lamports>}`
pub struct SolanaRpcProvider {
    client: Client,
    rpc_url: String,
}

impl SolanaRpcProvider {
    pub fn new(client: Client, rpc_url: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
        }
    }
}

#[async_trait]
impl BalanceProvider for SolanaRpcProvider {
    fn id(&self) -> ProviderId {
        ProviderId::SolanaRpc
    }

    fn chain(&self) -> ChainId {
        ChainId::Solana
    }

    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError> {
        let result = json_rpc_call(&self.client, &self.rpc_url, "getBalance", json!([address])).await?;

        result
            .get("value")
            .and_then(Value::as_u64)
            .map(RawBalance::from)
            .ok_or_else(|| ProviderError::MalformedResponse("getBalance result has no value".to_string()))
    }
}
