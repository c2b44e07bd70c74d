use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::units::{parse_hex_quantity, RawBalance};
use super::http::json_rpc_call;

/// Public Ethereum JSON-RPC node (`eth_getBalance`), no API key needed
pub struct EvmRpcProvider {
    client: Client,
    rpc_url: String,
}

impl EvmRpcProvider {
    pub fn new(client: Client, rpc_url: impl Into<String>) -> Self {
        Self {
            client,
            rpc_url: rpc_url.into(),
        }
    }
}

#[async_trait]
impl BalanceProvider for EvmRpcProvider {
    fn id(&self) -> ProviderId {
        ProviderId::EthereumRpc
    }

    fn chain(&self) -> ChainId {
        ChainId::Ethereum
    }

    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError> {
        let result = json_rpc_call(
            &self.client,
            &self.rpc_url,
            "eth_getBalance",
            json!([address, "latest"]),
        )
        .await?;

        match result {
            Value::String(hex) => parse_hex_quantity(&hex),
            other => Err(ProviderError::MalformedResponse(format!(
                "eth_getBalance returned {}",
                other
            ))),
        }
    }
}
