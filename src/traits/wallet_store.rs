use async_trait::async_trait;

use crate::models::portfolio::TrackedEntry;

/// Source of tracked wallet addresses
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// All tracked entries, in display order
    async fn list(&self) -> anyhow::Result<Vec<TrackedEntry>>;
}
