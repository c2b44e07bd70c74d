//! Core traits for the portfolio engine

pub mod balance_provider;
pub mod price_oracle;
pub mod wallet_store;
pub mod event_handler;

// Re-export for convenience
pub use balance_provider::BalanceProvider;
pub use price_oracle::PriceOracle;
pub use wallet_store::WalletStore;
pub use event_handler::PortfolioEventHandler;
