//! Static per-chain metadata: display symbol, price oracle id, unit scale and
//! the order in which balance providers are tried.

use crate::models::chain::{ChainId, ProviderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub chain: ChainId,
    pub symbol: &'static str,
    pub price_id: &'static str,
    pub decimals: u32,
    pub providers: &'static [ProviderId],
}

static ETHEREUM: ChainInfo = ChainInfo {
    chain: ChainId::Ethereum,
    symbol: "ETH",
    price_id: "ethereum",
    decimals: 18,
    providers: &[ProviderId::Etherscan, ProviderId::EthereumRpc],
};

static BITCOIN: ChainInfo = ChainInfo {
    chain: ChainId::Bitcoin,
    symbol: "BTC",
    price_id: "bitcoin",
    decimals: 8,
    providers: &[ProviderId::BlockchainInfo, ProviderId::BlockCypher],
};

static SOLANA: ChainInfo = ChainInfo {
    chain: ChainId::Solana,
    symbol: "SOL",
    price_id: "solana",
    decimals: 9,
    providers: &[ProviderId::SolanaRpc],
};

/// Registry entry for a chain. Total over `ChainId`.
pub fn chain_info(chain: ChainId) -> &'static ChainInfo {
    match chain {
        ChainId::Ethereum => &ETHEREUM,
        ChainId::Bitcoin => &BITCOIN,
        ChainId::Solana => &SOLANA,
    }
}
