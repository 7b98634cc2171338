//! Telegram Bot API update wire types.
//!
//! Only the fields the bot reads are modelled; everything else in the
//! incoming JSON is ignored by serde.

use serde::{Deserialize, Serialize};

/// A single update delivered to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// The message carrying the pressed button. Absent for inline-mode messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Zero when Telegram omits it; the handoff rejects such users.
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Update {
    /// The chat this update belongs to, if any.
    pub fn chat_id(&self) -> Option<i64> {
        if let Some(msg) = &self.message {
            return Some(msg.chat.id);
        }
        self.callback_query
            .as_ref()
            .and_then(|q| q.message.as_ref())
            .map(|m| m.chat.id)
    }

    /// The bot command (`/start`, `/help@SomeBot`, ...) carried by a text message.
    pub fn command(&self) -> Option<&str> {
        let text = self.message.as_ref()?.text.as_deref()?;
        let first = text.split_whitespace().next()?;
        if !first.starts_with('/') {
            return None;
        }
        Some(first.split('@').next().unwrap_or(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_callback_query_update() {
        let raw = r#"{
            "update_id": 10,
            "callback_query": {
                "id": "4382bfdwdsb323b2d9",
                "chat_instance": "-8344523",
                "from": {"id": 42, "is_bot": false, "first_name": "Ann", "username": "ann_w", "language_code": "en"},
                "message": {"message_id": 7, "date": 1700000000, "chat": {"id": 42, "type": "private"}, "text": "pick"},
                "data": "lang_en"
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        let query = update.callback_query.as_ref().unwrap();
        assert_eq!(query.data.as_deref(), Some("lang_en"));
        assert_eq!(query.from.first_name, "Ann");
        assert_eq!(query.from.username.as_deref(), Some("ann_w"));
        assert_eq!(update.chat_id(), Some(42));
        assert!(update.command().is_none());
    }

    #[test]
    fn extracts_command_without_bot_suffix() {
        let raw = r#"{
            "update_id": 11,
            "message": {"message_id": 1, "chat": {"id": -100}, "text": "/start@PriceFeedsbot payload"}
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.command(), Some("/start"));
        assert_eq!(update.chat_id(), Some(-100));
    }

    #[test]
    fn user_without_id_still_parses() {
        let raw = r#"{"update_id": 13, "callback_query": {"id": "cb", "from": {"first_name": "Ann"}, "data": "lang_en"}}"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        let from = &update.callback_query.unwrap().from;
        assert_eq!(from.id, 0);
        assert_eq!(from.first_name, "Ann");
    }

    #[test]
    fn plain_text_is_not_a_command() {
        let raw = r#"{"update_id": 12, "message": {"message_id": 1, "chat": {"id": 5}, "text": "hello"}}"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(update.command().is_none());
    }
}
