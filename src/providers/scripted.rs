//! In-memory providers with scripted outcomes and call counters, for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ProviderError;
use crate::models::chain::{ChainId, ProviderId};
use crate::traits::balance_provider::BalanceProvider;
use crate::traits::price_oracle::PriceOracle;
use crate::units::RawBalance;

pub(crate) struct ScriptedProvider {
    id: ProviderId,
    chain: ChainId,
    outcome: Result<RawBalance, ProviderError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn ok(id: ProviderId, chain: ChainId, raw: u128) -> Self {
        Self {
            id,
            chain,
            outcome: Ok(RawBalance(raw)),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(id: ProviderId, chain: ChainId, error: ProviderError) -> Self {
        Self {
            id,
            chain,
            outcome: Err(error),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn chain(&self) -> ChainId {
        self.chain
    }

    async fn fetch_raw_balance(&self, _address: &str) -> Result<RawBalance, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

#[derive(Default)]
pub(crate) struct ScriptedOracle {
    prices: Mutex<HashMap<String, Result<Decimal, ProviderError>>>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, price_id: &str, outcome: Result<Decimal, ProviderError>) {
        self.prices
            .lock()
            .unwrap()
            .insert(price_id.to_string(), outcome);
    }

    pub(crate) fn with_price(self, price_id: &str, price: Decimal) -> Self {
        self.set(price_id, Ok(price));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for ScriptedOracle {
    async fn fetch_usd_price(&self, price_id: &str) -> Result<Decimal, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .lock()
            .unwrap()
            .get(price_id)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::MalformedResponse(format!("no usd price for {}", price_id))))
    }
}
