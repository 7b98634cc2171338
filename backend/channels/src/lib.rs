use async_trait::async_trait;

pub mod catalog;
pub mod flow;
pub mod session;
pub mod telegram;
pub mod telegram_commands;
pub mod telegram_media;

pub use flow::{ConversationFlow, Outbound};
pub use session::InMemorySessionStore;
pub use telegram::{BotApiSender, TelegramAdapter, TelegramConfig};
pub use telegram_media::ImageCatalog;

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Build an optional Axum sub-router for inbound webhook endpoints.
    /// Adapters that use polling/long-connections return an empty router.
    fn build_router(&self) -> axum::Router {
        axum::Router::new()
    }

    /// Start the adapter's background work, if it has any.
    async fn start(&self) -> anyhow::Result<()>;
}
