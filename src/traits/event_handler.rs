use async_trait::async_trait;

use crate::models::portfolio::PortfolioUpdate;

/// Handler for portfolio valuation events
#[async_trait]
pub trait PortfolioEventHandler: Send + Sync {
    /// Handle a fresh valuation
    async fn handle_update(&self, update: PortfolioUpdate);

    /// Handle error
    async fn handle_error(&self, error: &anyhow::Error);
}
