//! Portfolio aggregation and polling

pub mod aggregator;

pub use aggregator::PortfolioAggregator;
