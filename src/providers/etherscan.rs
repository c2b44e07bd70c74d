use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::units::{parse_raw_amount, RawBalance};
use super::http::send_for_text;

/// Block-explorer balance query (`module=account&action=balance`)
pub struct EtherscanProvider {
    client: Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Value,
}

impl EtherscanProvider {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// The explorer answers HTTP 200 even for errors; `status` must be "1".
pub(crate) fn parse_explorer_balance(body: &str) -> Result<RawBalance, ProviderError> {
    let response: ExplorerResponse = serde_json::from_str(body)?;

    if response.status != "1" {
        let detail = match (&response.message, response.result.as_str()) {
            (Some(message), Some(result)) => format!("{}: {}", message, result),
            (Some(message), None) => message.clone(),
            (None, Some(result)) => result.to_string(),
            (None, None) => format!("status {}", response.status),
        };
        return Err(ProviderError::UpstreamDomain(detail));
    }

    match response.result.as_str() {
        Some(wei) => parse_raw_amount(wei),
        None => Err(ProviderError::MalformedResponse(
            "explorer result is not a string".to_string(),
        )),
    }
}

#[async_trait]
impl BalanceProvider for EtherscanProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Etherscan
    }

    fn chain(&self) -> ChainId {
        ChainId::Ethereum
    }

    async fn fetch_raw_balance(&self, address: &str) -> Result<RawBalance, ProviderError> {
        debug!("Querying explorer balance for {}", address);
        let request = self.client.get(&self.api_url).query(&[
            ("module", "account"),
            ("action", "balance"),
            ("address", address),
            ("tag", "latest"),
            ("apikey", self.api_key.as_str()),
        ]);
        let body = send_for_text(request).await?;
        parse_explorer_balance(&body)
    }
}
