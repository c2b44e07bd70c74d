use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chain::ProviderId;

/// Outcome of one balance resolution. Built fresh per call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResult {
    pub amount: Decimal,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_used: Option<ProviderId>,
}

impl BalanceResult {
    pub fn resolved(amount: Decimal, provider: ProviderId) -> Self {
        Self {
            amount,
            success: true,
            provider_used: Some(provider),
        }
    }

    /// Sentinel returned when every provider failed
    pub fn unavailable() -> Self {
        Self {
            amount: Decimal::ZERO,
            success: false,
            provider_used: None,
        }
    }
}
