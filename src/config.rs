// Configuration loading and settings
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PRICE_CACHE_SECS: u64 = 5 * 60;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 5 * 60 * 1000;

#[derive(Debug, Clone)]
pub struct Config {
    pub etherscan_api_url: String,
    pub etherscan_api_key: Option<String>,
    pub ethereum_rpc_url: String,
    pub blockchain_info_url: String,
    pub blockcypher_url: String,
    pub solana_rpc_url: String,
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
    pub request_timeout: Duration,
    pub price_cache_duration: Duration,
    pub tick_interval: Duration,
    pub fetch_concurrency: usize,
    pub wallets_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            etherscan_api_url: "https://api.etherscan.io/api".to_string(),
            etherscan_api_key: None,
            ethereum_rpc_url: "https://eth.llamarpc.com".to_string(),
            blockchain_info_url: "https://blockchain.info".to_string(),
            blockcypher_url: "https://api.blockcypher.com/v1".to_string(),
            solana_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            coingecko_api_url: "https://api.coingecko.com/api/v3".to_string(),
            coingecko_api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            price_cache_duration: Duration::from_secs(DEFAULT_PRICE_CACHE_SECS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            fetch_concurrency: 1,
            wallets_file: PathBuf::from("wallets.json"),
        }
    }
}

impl Config {
    /// Build from environment variables, reading `.env` first if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            etherscan_api_url: env_or("ETHERSCAN_API_URL", defaults.etherscan_api_url),
            etherscan_api_key: env_opt("ETHERSCAN_API_KEY"),
            ethereum_rpc_url: env_or("ETHEREUM_RPC_URL", defaults.ethereum_rpc_url),
            blockchain_info_url: env_or("BLOCKCHAIN_INFO_URL", defaults.blockchain_info_url),
            blockcypher_url: env_or("BLOCKCYPHER_URL", defaults.blockcypher_url),
            solana_rpc_url: env_or("SOLANA_RPC_URL", defaults.solana_rpc_url),
            coingecko_api_url: env_or("COINGECKO_API_URL", defaults.coingecko_api_url),
            coingecko_api_key: env_opt("COINGECKO_API_KEY"),
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            price_cache_duration: Duration::from_secs(env_parse(
                "PRICE_CACHE_SECS",
                DEFAULT_PRICE_CACHE_SECS,
            )?),
            tick_interval: Duration::from_millis(env_parse(
                "TICK_INTERVAL_MS",
                DEFAULT_TICK_INTERVAL_MS,
            )?),
            fetch_concurrency: env_parse::<usize>("FETCH_CONCURRENCY", 1)?.max(1),
            wallets_file: env::var("WALLETS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.wallets_file),
        })
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

/// Unset and empty values both count as absent
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.price_cache_duration, Duration::from_secs(300));
        assert_eq!(config.fetch_concurrency, 1);
        assert!(config.etherscan_api_key.is_none());
    }

    #[test]
    fn parse_rejects_garbage() {
        env::set_var("CHAIN_PORTFOLIO_TEST_NUMBER", "ten");
        let result = env_parse::<u64>("CHAIN_PORTFOLIO_TEST_NUMBER", 1);
        env::remove_var("CHAIN_PORTFOLIO_TEST_NUMBER");
        assert!(result.is_err());
    }

    #[test]
    fn parse_falls_back_to_default_when_unset() {
        let value = env_parse::<u64>("CHAIN_PORTFOLIO_TEST_UNSET", 7).unwrap();
        assert_eq!(value, 7);
    }
}
