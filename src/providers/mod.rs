//! Upstream clients for balances and prices

pub mod http;
pub mod etherscan;
pub mod evm_rpc;
pub mod blockchain_info;
pub mod blockcypher;
pub mod solana_rpc;
pub mod coingecko;

#[cfg(test)]
pub(crate) mod scripted;

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::warn;

use crate::config::Config;
use crate::models::chain::{ChainId, ProviderId};
use crate::registry::chain_info;
use crate::traits::balance_provider::BalanceProvider;

// Re-export for convenience
pub use etherscan::EtherscanProvider;
pub use evm_rpc::EvmRpcProvider;
pub use blockchain_info::BlockchainInfoProvider;
pub use blockcypher::BlockCypherProvider;
pub use solana_rpc::SolanaRpcProvider;
pub use coingecko::CoinGeckoOracle;
pub use http::build_http_client;

/// Ordered balance providers per chain
pub type ProviderMap = HashMap<ChainId, Vec<Arc<dyn BalanceProvider>>>;

/// Instantiate every registered provider, in registry order, sharing one HTTP client
pub fn build_balance_providers(config: &Config, client: &Client) -> ProviderMap {
    ChainId::ALL
        .iter()
        .map(|chain| {
            let providers = chain_info(*chain)
                .providers
                .iter()
                .filter_map(|id| build_provider(*id, config, client))
                .collect();
            (*chain, providers)
        })
        .collect()
}

fn build_provider(id: ProviderId, config: &Config, client: &Client) -> Option<Arc<dyn BalanceProvider>> {
    let provider: Arc<dyn BalanceProvider> = match id {
        ProviderId::Etherscan => match &config.etherscan_api_key {
            Some(key) => Arc::new(EtherscanProvider::new(
                client.clone(),
                &config.etherscan_api_url,
                key,
            )),
            None => {
                warn!("Etherscan disabled. Set ETHERSCAN_API_KEY to use it ahead of the public RPC.");
                return None;
            }
        },
        ProviderId::EthereumRpc => Arc::new(EvmRpcProvider::new(client.clone(), &config.ethereum_rpc_url)),
        ProviderId::BlockchainInfo => Arc::new(BlockchainInfoProvider::new(
            client.clone(),
            &config.blockchain_info_url,
        )),
        ProviderId::BlockCypher => Arc::new(BlockCypherProvider::new(client.clone(), &config.blockcypher_url)),
        ProviderId::SolanaRpc => Arc::new(SolanaRpcProvider::new(client.clone(), &config.solana_rpc_url)),
    };
    Some(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(map: &ProviderMap, chain: ChainId) -> Vec<ProviderId> {
        map[&chain].iter().map(|p| p.id()).collect()
    }

    #[test]
    fn follows_registry_order() {
        let config = Config {
            etherscan_api_key: Some("KEY".to_string()),
            ..Config::default()
        };
        let map = build_balance_providers(&config, &Client::new());

        assert_eq!(ids(&map, ChainId::Ethereum), vec![ProviderId::Etherscan, ProviderId::EthereumRpc]);
        assert_eq!(ids(&map, ChainId::Bitcoin), vec![ProviderId::BlockchainInfo, ProviderId::BlockCypher]);
        assert_eq!(ids(&map, ChainId::Solana), vec![ProviderId::SolanaRpc]);
        for chain in ChainId::ALL {
            assert!(map[&chain].iter().all(|p| p.chain() == chain));
        }
    }

    #[test]
    fn explorer_skipped_without_api_key() {
        let map = build_balance_providers(&Config::default(), &Client::new());
        assert_eq!(ids(&map, ChainId::Ethereum), vec![ProviderId::EthereumRpc]);
    }
}
