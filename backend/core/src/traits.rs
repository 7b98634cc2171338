use anyhow::Result;
use async_trait::async_trait;

use crate::message::Reply;
use crate::types::Session;

/// Delivers replies through a messaging transport (the Telegram Bot API in production).
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Human-readable transport name for logging.
    fn name(&self) -> &str;

    /// Send a reply into the given chat.
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<()>;

    /// Stop the client-side spinner for a pressed inline button.
    async fn answer_callback(&self, _callback_id: &str) -> Result<()> {
        Ok(())
    }
}

/// A change applied to one chat's session.
pub type SessionUpdate = Box<dyn FnOnce(&mut Session) + Send>;

/// Conversation state storage keyed by chat id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session or a fresh default one.
    async fn load(&self, chat_id: i64) -> Session;

    /// Applies `change` atomically, starting from the default session for
    /// unknown chats, and returns the stored result.
    async fn update(&self, chat_id: i64, change: SessionUpdate) -> Session;
}
