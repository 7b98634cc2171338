//! CLI Serve Command
//!
//! Validates config, wires the Telegram adapter, and runs the gateway.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use pricefeed_channels::{
    BotApiSender, ChannelAdapter, ConversationFlow, ImageCatalog, InMemorySessionStore,
    TelegramAdapter, TelegramConfig,
};
use pricefeed_config::{redacted, validate, Config};

use crate::handoff_secrets;

pub async fn run(config: Config) -> Result<()> {
    let report = validate(&config);
    for w in &report.warnings {
        warn!(path = %w.path, "{}", w.message);
    }
    if !report.is_valid() {
        for e in &report.errors {
            error!(path = %e.path, "{}", e.message);
        }
        anyhow::bail!("invalid configuration: {} error(s)", report.errors.len());
    }

    info!(config = %redacted(&config), "Starting PriceFeed bot");

    let flow = ConversationFlow::new(
        Arc::new(InMemorySessionStore::new()),
        handoff_secrets(&config),
        config.app_url.clone(),
        ImageCatalog::new(config.image_paths.clone()),
    );
    let sender = BotApiSender::new(config.bot_token.clone());
    let telegram = TelegramAdapter::new(
        TelegramConfig {
            webhook_path: config.webhook_path.clone(),
            webhook_secret: config.webhook_secret.clone(),
        },
        Arc::new(flow),
        Arc::new(sender),
    );

    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.socket_addr()))?;

    let adapters: Vec<Arc<dyn ChannelAdapter>> = vec![Arc::new(telegram)];
    pricefeed_gateway::start_server(addr, adapters).await
}
