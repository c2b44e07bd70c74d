//! Wallet store implementations

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::models::portfolio::TrackedEntry;
use crate::traits::wallet_store::WalletStore;

/// Fixed list of entries held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryWalletStore {
    entries: Vec<TrackedEntry>,
}

impl InMemoryWalletStore {
    pub fn new(entries: Vec<TrackedEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn list(&self) -> anyhow::Result<Vec<TrackedEntry>> {
        Ok(self.entries.clone())
    }
}

/// JSON array of `{id?, chain, address, label?}` read from disk on every `list()`,
/// so edits are picked up on the next poll
#[derive(Debug, Clone)]
pub struct JsonFileWalletStore {
    path: PathBuf,
}

impl JsonFileWalletStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn parse_wallets(json: &str) -> anyhow::Result<Vec<TrackedEntry>> {
    let entries: Vec<TrackedEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .map(|mut entry| {
            if entry.label.trim().is_empty() {
                entry.label = entry.chain.default_wallet_label();
            }
            entry
        })
        .collect())
}

#[async_trait]
impl WalletStore for JsonFileWalletStore {
    async fn list(&self) -> anyhow::Result<Vec<TrackedEntry>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read wallet file {}", self.path.display()))?;
        let entries = parse_wallets(&raw)
            .with_context(|| format!("Invalid wallet file {}", self.path.display()))?;
        debug!("Loaded {} wallets from {}", entries.len(), self.path.display());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chain::ChainId;

    #[test]
    fn parses_wallet_list() {
        let entries = parse_wallets(
            r#"[
                {"id": "1700000000000", "chain": "ethereum", "address": "0xabc", "label": "Main"},
                {"chain": "bitcoin", "address": "bc1q"}
            ]"#,
        )
        .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_deref(), Some("1700000000000"));
        assert_eq!(entries[0].label, "Main");
        assert_eq!(entries[1].chain, ChainId::Bitcoin);
        assert_eq!(entries[1].label, "Bitcoin Wallet");
    }

    #[test]
    fn rejects_unknown_chain() {
        assert!(parse_wallets(r#"[{"chain": "dogecoin", "address": "D1"}]"#).is_err());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let store = JsonFileWalletStore::new("/nonexistent/wallets.json");
        let err = store.list().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read wallet file"));
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("chain-portfolio-wallets-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"chain": "solana", "address": "So1ana", "label": "Hot"}]"#)
            .await
            .unwrap();

        let entries = JsonFileWalletStore::new(&path).list().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(entries, vec![TrackedEntry::new(ChainId::Solana, "So1ana", "Hot")]);
    }
}
