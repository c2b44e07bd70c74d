use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::portfolio::PortfolioUpdate;
use crate::registry::chain_info;
use crate::traits::event_handler::PortfolioEventHandler;
use crate::utils::helper::{format_address, format_crypto, format_large_number, format_usd};

/// Console logging event handler
pub struct ConsoleEventHandler;

impl ConsoleEventHandler {
    /// Create a new console event handler
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioEventHandler for ConsoleEventHandler {
    async fn handle_update(&self, update: PortfolioUpdate) {
        let valuation = &update.valuation;

        info!("{}", "=".repeat(80));
        info!(
            "PORTFOLIO VALUATION ({})",
            valuation.valued_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        info!("{}", "-".repeat(80));

        if valuation.is_empty() {
            info!("No wallets tracked");
            info!("{}", "=".repeat(80));
            return;
        }

        for (i, ranked) in valuation.ranked(true).iter().enumerate() {
            let entry = &ranked.entry;
            info!(
                "{}. {} [{}] {}",
                i + 1,
                entry.display_label(),
                entry.chain,
                format_address(&entry.address, 6, 4)
            );
            info!("   Value: {}", format_usd(ranked.value_usd));
        }

        for detail in &valuation.entries {
            let symbol = chain_info(detail.entry.chain).symbol;
            if detail.balance.success {
                info!(
                    "   {}: {} {} @ {}",
                    detail.entry.display_label(),
                    format_crypto(detail.balance.amount, 6),
                    symbol,
                    format_usd(detail.unit_price_usd)
                );
            } else {
                warn!(
                    "   {}: balance unavailable, counted as 0 {}",
                    detail.entry.display_label(),
                    symbol
                );
            }
        }

        let allocation = valuation.distribution();
        if !allocation.is_empty() {
            info!("  Allocation:");
            for share in &allocation {
                info!("    {} ({}): {}%", share.label, share.chain, share.percentage);
            }
        }

        info!("{}", "-".repeat(80));
        info!(
            "➤ Total Portfolio Value: {} ({})",
            format_usd(valuation.total_value_usd),
            format_large_number(valuation.total_value_usd)
        );
        if let Some(change) = update.total_change_percent() {
            let sign = if change.is_sign_negative() { "" } else { "+" };
            info!("  Change since last poll: {}{:.2}%", sign, change);
        }
        info!("{}", "=".repeat(80));
    }

    async fn handle_error(&self, error: &anyhow::Error) {
        warn!("Portfolio valuation error: {:#}", error);
    }
}
