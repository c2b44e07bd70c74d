use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::errors::ProviderError;
use crate::traits::price_oracle::PriceOracle;
use super::http::send_for_json;

/// CoinGecko `simple/price` price oracle
pub struct CoinGeckoOracle {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl CoinGeckoOracle {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), endpoint)
    }
}

/// Pull `{id: {usd: n}}` out of a `simple/price` response
pub(crate) fn extract_usd_price(response: &Value, price_id: &str) -> Result<Decimal, ProviderError> {
    let usd = response
        .get(price_id)
        .and_then(|coin| coin.get("usd"))
        .ok_or_else(|| ProviderError::MalformedResponse(format!("no usd price for {}", price_id)))?;

    json_number_to_decimal(usd)
        .ok_or_else(|| ProviderError::MalformedResponse(format!("usd price for {} is not a number: {}", price_id, usd)))
}

/// Convert through the JSON text form so `0.1` stays `0.1` rather than its binary expansion
fn json_number_to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn fetch_usd_price(&self, price_id: &str) -> Result<Decimal, ProviderError> {
        let mut request = self
            .client
            .get(self.url("simple/price"))
            .query(&[("ids", price_id), ("vs_currencies", "usd")]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("x_cg_demo_api_key", key.as_str())]);
        }

        let response = send_for_json(request).await?;
        let price = extract_usd_price(&response, price_id)?;
        debug!("Oracle price for {}: ${}", price_id, price);
        Ok(price)
    }

    async fn ping(&self) -> bool {
        match send_for_json(self.client.get(self.url("ping"))).await {
            Ok(body) => body.get("gecko_says").is_some(),
            Err(e) => {
                debug!("Price oracle ping failed: {}", e);
                false
            }
        }
    }
}
