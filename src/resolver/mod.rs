//! Balance and price resolution with provider fallback and price caching

pub mod balance_resolver;
pub mod price_resolver;

pub use balance_resolver::BalanceResolver;
pub use price_resolver::{PriceCache, PriceCacheEntry, PriceResolver};
