use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ResolveError;
use crate::models::balance::BalanceResult;
use crate::models::chain::ChainId;
use crate::providers::{build_balance_providers, ProviderMap};
use crate::registry::chain_info;
use crate::traits::balance_provider::BalanceProvider;
use crate::units::to_display_units;

/// Resolves native balances by walking each chain's provider list in order
#[derive(Clone)]
pub struct BalanceResolver {
    providers: Arc<ProviderMap>,
}

impl BalanceResolver {
    pub fn new(providers: ProviderMap) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }

    /// Resolver backed by every registered HTTP provider
    pub fn from_config(config: &Config, client: &Client) -> Self {
        Self::new(build_balance_providers(config, client))
    }

    /// Providers configured for `chain`, in the order they are tried
    pub fn providers_for(&self, chain: ChainId) -> &[Arc<dyn BalanceProvider>] {
        self.providers
            .get(&chain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve the balance of `address` in display units.
    ///
    /// Providers are tried one at a time; the first success wins. When every
    /// provider fails the zero sentinel (`success == false`) is returned. The
    /// only error is a chain with no configured providers.
    pub async fn resolve_balance(&self, chain: ChainId, address: &str) -> Result<BalanceResult, ResolveError> {
        let providers = self.providers_for(chain);
        if providers.is_empty() {
            return Err(ResolveError::UnsupportedChain(chain.to_string()));
        }

        let info = chain_info(chain);

        for provider in providers {
            debug!("Fetching {} balance for {} via {}", chain, address, provider.id());

            let fetched = provider
                .fetch_raw_balance(address)
                .await
                .and_then(|raw| Ok((raw, to_display_units(raw, info.decimals)?)));

            match fetched {
                Ok((raw, amount)) => {
                    debug!(
                        "{} balance for {}: {} {} (raw {}) via {}",
                        chain,
                        address,
                        amount,
                        info.symbol,
                        raw.value(),
                        provider.id()
                    );
                    return Ok(BalanceResult::resolved(amount, provider.id()));
                }
                Err(e) => {
                    warn!(
                        "{} balance via {} failed [{}]: {}",
                        chain,
                        provider.id(),
                        e.kind(),
                        e
                    );
                }
            }
        }

        warn!("All {} balance providers failed for {}", chain, address);
        Ok(BalanceResult::unavailable())
    }

    /// Same as [`resolve_balance`](Self::resolve_balance) for a chain given by name
    pub async fn resolve_balance_by_name(&self, chain: &str, address: &str) -> Result<BalanceResult, ResolveError> {
        let chain: ChainId = chain.parse()?;
        self.resolve_balance(chain, address).await
    }
}
