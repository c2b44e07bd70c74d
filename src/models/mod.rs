//! Data models for balances, prices and portfolio valuations

pub mod chain;
pub mod balance;
pub mod portfolio;

// Re-export for convenience
pub use chain::{ChainId, ProviderId};
pub use balance::BalanceResult;
pub use portfolio::{
    Allocation, EntryValuation, PortfolioUpdate, PortfolioValuation, RankedEntry, TrackedEntry,
};
