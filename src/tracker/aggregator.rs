//src/tracker/aggregator.rs
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use rust_decimal::Decimal;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::ResolveError;
use crate::models::portfolio::{
    EntryValuation, PortfolioUpdate, PortfolioValuation, RankedEntry, TrackedEntry,
};
use crate::providers::build_http_client;
use crate::resolver::{BalanceResolver, PriceResolver};
use crate::traits::{event_handler::PortfolioEventHandler, wallet_store::WalletStore};

/// Combines balances and prices into portfolio valuations
#[derive(Clone)]
pub struct PortfolioAggregator {
    balances: BalanceResolver,
    prices: PriceResolver,
    concurrency: usize,
}

impl PortfolioAggregator {
    /// Create an aggregator that values entries one after another
    pub fn new(balances: BalanceResolver, prices: PriceResolver) -> Self {
        Self {
            balances,
            prices,
            concurrency: 1,
        }
    }

    /// Wire up HTTP providers, the price oracle and a fresh price cache
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = build_http_client(config.request_timeout)?;
        Ok(Self::new(
            BalanceResolver::from_config(config, &client),
            PriceResolver::from_config(config, &client),
        )
        .with_concurrency(config.fetch_concurrency))
    }

    /// Value up to `limit` entries at once. Output order is unaffected.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn balances(&self) -> &BalanceResolver {
        &self.balances
    }

    pub fn prices(&self) -> &PriceResolver {
        &self.prices
    }

    async fn valuate_entry(&self, entry: &TrackedEntry) -> Result<EntryValuation, ResolveError> {
        let balance = self.balances.resolve_balance(entry.chain, &entry.address).await?;
        let unit_price_usd = self.prices.resolve_price(entry.chain).await;
        let value_usd = balance.amount.checked_mul(unit_price_usd).unwrap_or_else(|| {
            warn!(
                "{} ({}): value of {} x ${} overflows, counting it as 0",
                entry.display_label(),
                entry.chain,
                balance.amount,
                unit_price_usd
            );
            Decimal::ZERO
        });

        debug!(
            "{} ({}): {} x ${} = ${}",
            entry.display_label(),
            entry.chain,
            balance.amount,
            unit_price_usd,
            value_usd
        );

        Ok(EntryValuation {
            entry: entry.clone(),
            balance,
            unit_price_usd,
            value_usd,
        })
    }

    /// Value every entry and sum the total.
    ///
    /// Per-entry results come back in input order. Only an entry on a chain
    /// without providers fails the call; provider and price failures show up
    /// as zero values instead.
    pub async fn valuate(&self, entries: &[TrackedEntry]) -> Result<PortfolioValuation, ResolveError> {
        let valued: Vec<EntryValuation> = stream::iter(entries.iter().cloned())
            .map(|entry| {
                let this = self.clone();
                async move { this.valuate_entry(&entry).await }
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let valuation = PortfolioValuation::new(valued);
        info!(
            "Valued {} entries: ${} total ({} unresolved)",
            valuation.entries.len(),
            valuation.total_value_usd,
            valuation.failed_count()
        );
        Ok(valuation)
    }

    /// Value the entries and return them sorted by value (stable for ties)
    pub async fn rank(&self, entries: &[TrackedEntry], descending: bool) -> Result<Vec<RankedEntry>, ResolveError> {
        Ok(self.valuate(entries).await?.ranked(descending))
    }

    /// Poll the wallet store every `tick_interval`, value it and hand the
    /// result to `handler`. Runs until the task is dropped.
    pub async fn start_tracking_polling(
        &self,
        store: Arc<dyn WalletStore>,
        handler: Arc<dyn PortfolioEventHandler>,
        tick_interval: Duration,
    ) -> anyhow::Result<()> {
        info!("Starting polling-based valuation with interval: {:?}", tick_interval);

        let mut previous_total: Option<Decimal> = None;

        loop {
            let started = Instant::now();

            match self.poll_once(store.as_ref()).await {
                Ok(valuation) => {
                    let total = valuation.total_value_usd;
                    handler
                        .handle_update(PortfolioUpdate {
                            valuation,
                            previous_total_usd: previous_total,
                        })
                        .await;
                    previous_total = Some(total);
                }
                Err(e) => {
                    handler.handle_error(&e).await;
                }
            }

            let elapsed = started.elapsed();
            if elapsed < tick_interval {
                tokio::time::sleep(tick_interval - elapsed).await;
            }
        }
    }

    async fn poll_once(&self, store: &dyn WalletStore) -> anyhow::Result<PortfolioValuation> {
        let entries = store.list().await?;
        Ok(self.valuate(&entries).await?)
    }
}
