//! Multi-chain Portfolio Library
//!
//! Resolves native balances on several blockchains through ordered provider
//! fallback, prices them in USD through a cached price oracle, and combines
//! the results into a portfolio valuation.

// Public modules - these are the API surface
pub mod config;
pub mod errors;
pub mod units;
pub mod registry;
pub mod models;
pub mod traits;
pub mod providers;
pub mod resolver;
pub mod tracker;
pub mod handlers;
pub mod wallets;
pub mod utils;

// Re-export commonly used items for easier access
pub use config::Config;
pub use errors::{ProviderError, ResolveError};
pub use units::{to_display_units, RawBalance};
pub use registry::{chain_info, ChainInfo};
pub use models::{
    chain::{ChainId, ProviderId},
    balance::BalanceResult,
    portfolio::{EntryValuation, PortfolioUpdate, PortfolioValuation, RankedEntry, TrackedEntry},
};
pub use traits::{
    balance_provider::BalanceProvider,
    price_oracle::PriceOracle,
    wallet_store::WalletStore,
    event_handler::PortfolioEventHandler,
};
pub use resolver::{BalanceResolver, PriceCache, PriceResolver};
pub use tracker::PortfolioAggregator;
pub use handlers::ConsoleEventHandler;
pub use wallets::{InMemoryWalletStore, JsonFileWalletStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for library functions
pub type Result<T> = std::result::Result<T, anyhow::Error>;
