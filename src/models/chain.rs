use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ResolveError;

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Ethereum,
    Bitcoin,
    Solana,
}

impl ChainId {
    pub const ALL: [ChainId; 3] = [ChainId::Ethereum, ChainId::Bitcoin, ChainId::Solana];

    /// Lowercase identifier, as used in wallet files
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Ethereum => "ethereum",
            ChainId::Bitcoin => "bitcoin",
            ChainId::Solana => "solana",
        }
    }

    /// Default label for a wallet on this chain
    pub fn default_wallet_label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Wallet", first.to_ascii_uppercase(), chars.as_str()),
            None => "Wallet".to_string(),
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" | "eth" => Ok(ChainId::Ethereum),
            "bitcoin" | "btc" => Ok(ChainId::Bitcoin),
            "solana" | "sol" => Ok(ChainId::Solana),
            _ => Err(ResolveError::UnsupportedChain(s.to_string())),
        }
    }
}

/// Upstream services able to answer a balance query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Etherscan,
    EthereumRpc,
    BlockchainInfo,
    BlockCypher,
    SolanaRpc,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Etherscan => "etherscan",
            ProviderId::EthereumRpc => "ethereum_rpc",
            ProviderId::BlockchainInfo => "blockchain_info",
            ProviderId::BlockCypher => "blockcypher",
            ProviderId::SolanaRpc => "solana_rpc",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_tickers() {
        assert_eq!("ethereum".parse::<ChainId>().unwrap(), ChainId::Ethereum);
        assert_eq!("BTC".parse::<ChainId>().unwrap(), ChainId::Bitcoin);
        assert_eq!(" Sol ".parse::<ChainId>().unwrap(), ChainId::Solana);
    }

    #[test]
    fn unknown_chain_is_unsupported() {
        let err = "dogecoin".parse::<ChainId>().unwrap_err();
        assert_eq!(err, ResolveError::UnsupportedChain("dogecoin".to_string()));
    }

    #[test]
    fn default_label_is_capitalized() {
        assert_eq!(ChainId::Bitcoin.default_wallet_label(), "Bitcoin Wallet");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ChainId::Solana).unwrap();
        assert_eq!(json, "\"solana\"");
        let chain: ChainId = serde_json::from_str("\"ethereum\"").unwrap();
        assert_eq!(chain, ChainId::Ethereum);
    }
}
