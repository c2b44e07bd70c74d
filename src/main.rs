use std::sync::Arc;

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};

use chain_portfolio::{
    Config, ConsoleEventHandler, JsonFileWalletStore, PortfolioAggregator, PortfolioEventHandler,
    WalletStore,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_level(true)
        .with_target(false)
        .with_max_level(LevelFilter::INFO)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env()?;

    tokio::runtime::Runtime::new()?.block_on(async {
        info!("Initializing portfolio aggregator v{}...", chain_portfolio::VERSION);
        info!("Wallet file: {}", config.wallets_file.display());
        info!("Price cache window: {:?}", config.price_cache_duration);

        let aggregator = PortfolioAggregator::from_config(&config)
            .context("Failed to build HTTP client")?;

        if !aggregator.prices().ping().await {
            warn!("Price oracle did not answer ping; prices may resolve to 0");
        }

        let store: Arc<dyn WalletStore> = Arc::new(JsonFileWalletStore::new(&config.wallets_file));
        let handler: Arc<dyn PortfolioEventHandler> = Arc::new(ConsoleEventHandler::new());

        let poller = aggregator.clone();
        let tick_interval = config.tick_interval;
        let tracking = tokio::spawn(async move {
            if let Err(e) = poller
                .start_tracking_polling(store, handler, tick_interval)
                .await
            {
                error!("Tracking error: {}", e);
            }
        });

        info!("Portfolio aggregator is running. Press Ctrl+C to stop.");

        tokio::signal::ctrl_c().await?;
        tracking.abort();

        info!("Shutting down...");

        Ok(())
    })
}
