use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::BalanceResult;
use super::chain::ChainId;
use crate::utils::helper::percent_change;

/// A tracked wallet address. Owned by the wallet store; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub chain: ChainId,
    pub address: String,
    #[serde(default)]
    pub label: String,
}

impl TrackedEntry {
    pub fn new(chain: ChainId, address: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            chain,
            address: address.into(),
            label: label.into(),
        }
    }

    /// Label for display, falling back to "<Chain> Wallet"
    pub fn display_label(&self) -> String {
        if self.label.trim().is_empty() {
            self.chain.default_wallet_label()
        } else {
            self.label.clone()
        }
    }
}

/// Valuation of a single tracked entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryValuation {
    pub entry: TrackedEntry,
    pub balance: BalanceResult,
    pub unit_price_usd: Decimal,
    pub value_usd: Decimal,
}

/// Result of valuing a list of entries. `entries` is aligned with the input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub entries: Vec<EntryValuation>,
    pub total_value_usd: Decimal,
    pub valued_at: DateTime<Utc>,
}

/// Entry annotated with its computed value, as returned by ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub entry: TrackedEntry,
    pub value_usd: Decimal,
}

/// Share of the portfolio held by one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub chain: ChainId,
    pub label: String,
    pub value_usd: Decimal,
    pub percentage: Decimal,
}

impl PortfolioValuation {
    pub fn new(entries: Vec<EntryValuation>) -> Self {
        let total_value_usd = entries
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.checked_add(e.value_usd).unwrap_or(Decimal::MAX));
        Self {
            entries,
            total_value_usd,
            valued_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Per-entry USD values in input order
    pub fn per_entry_values(&self) -> Vec<Decimal> {
        self.entries.iter().map(|e| e.value_usd).collect()
    }

    /// Entries sorted by value. The sort is stable: ties keep input order.
    pub fn ranked(&self, descending: bool) -> Vec<RankedEntry> {
        let mut ranked: Vec<RankedEntry> = self
            .entries
            .iter()
            .map(|e| RankedEntry {
                entry: e.entry.clone(),
                value_usd: e.value_usd,
            })
            .collect();

        if descending {
            ranked.sort_by(|a, b| b.value_usd.cmp(&a.value_usd));
        } else {
            ranked.sort_by(|a, b| a.value_usd.cmp(&b.value_usd));
        }
        ranked
    }

    /// Percentage of the total held by each entry, rounded to 2 places.
    /// Empty when the total is zero.
    pub fn distribution(&self) -> Vec<Allocation> {
        if self.total_value_usd.is_zero() {
            return Vec::new();
        }

        self.entries
            .iter()
            .map(|e| Allocation {
                chain: e.entry.chain,
                label: e.entry.display_label(),
                value_usd: e.value_usd,
                percentage: (e.value_usd / self.total_value_usd * Decimal::ONE_HUNDRED).round_dp(2),
            })
            .collect()
    }

    /// Number of entries whose balance could not be resolved
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.balance.success).count()
    }
}

/// Emitted by the polling loop after each valuation
#[derive(Debug, Clone)]
pub struct PortfolioUpdate {
    pub valuation: PortfolioValuation,
    pub previous_total_usd: Option<Decimal>,
}

impl PortfolioUpdate {
    /// Percent change of the total since the previous poll
    pub fn total_change_percent(&self) -> Option<Decimal> {
        self.previous_total_usd
            .map(|old| percent_change(old, self.valuation.total_value_usd))
    }
}
