/// Telegram channel adapter for the PriceFeed bot.
///
/// Receives Bot API updates on a webhook and answers through `teloxide`.
///
/// Required env vars:
///   TELEGRAM_BOT_TOKEN       — Bot API token, also the handoff secret
///   TELEGRAM_WEBHOOK_PATH    — path to mount the webhook (default: /api/telegram)
///   TELEGRAM_WEBHOOK_SECRET  — optional, checked against X-Telegram-Bot-Api-Secret-Token
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use url::Url;
use teloxide::payloads::{SendMessageSetters, SendPhotoSetters, SetWebhookSetters};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile};
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use pricefeed_core::{ButtonAction, InlineKeyboard, PriceFeedError, Reply, ReplySender, Update};
use pricefeed_logging::redact_sensitive_data;

use crate::ChannelAdapter;
use crate::flow::ConversationFlow;

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TelegramConfig {
    pub webhook_path: String,
    pub webhook_secret: Option<String>,
}

// ---------------------------------------------------------------------------
// Axum state
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct AppState {
    webhook_secret: Option<String>,
    flow: Arc<ConversationFlow>,
    sender: Arc<dyn ReplySender>,
}

// ---------------------------------------------------------------------------
// Adapter struct
// ---------------------------------------------------------------------------

pub struct TelegramAdapter {
    config: TelegramConfig,
    flow: Arc<ConversationFlow>,
    sender: Arc<dyn ReplySender>,
}

impl TelegramAdapter {
    pub fn new(
        config: TelegramConfig,
        flow: Arc<ConversationFlow>,
        sender: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            config,
            flow,
            sender,
        }
    }

    fn state(&self) -> AppState {
        AppState {
            webhook_secret: self.config.webhook_secret.clone(),
            flow: self.flow.clone(),
            sender: self.sender.clone(),
        }
    }
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn name(&self) -> &str {
        "telegram"
    }

    fn build_router(&self) -> Router {
        Router::new()
            .route(&self.config.webhook_path, post(handle_telegram_update))
            .with_state(self.state())
    }

    async fn start(&self) -> Result<()> {
        info!(
            path = %self.config.webhook_path,
            secret_check = self.config.webhook_secret.is_some(),
            "[Telegram] Adapter ready (webhook-based)"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Webhook handler
// ---------------------------------------------------------------------------

async fn handle_telegram_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    // 1. Verify the secret token Telegram echoes back on every delivery
    if !verify_secret_token(&headers, state.webhook_secret.as_deref()) {
        warn!("[Telegram] Invalid secret token — rejecting webhook");
        return (StatusCode::UNAUTHORIZED, "invalid_secret").into_response();
    }

    // 2. Parse JSON
    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(err) => {
            error!("[Telegram] Failed to parse update: {}", err);
            return (StatusCode::BAD_REQUEST, "bad_json").into_response();
        }
    };

    // 3. Stop the button spinner before doing any work
    if let Some(query) = &update.callback_query {
        if let Err(e) = state.sender.answer_callback(&query.id).await {
            warn!(callback_id = %query.id, error = %e, "[Telegram] answerCallbackQuery failed");
        }
    }

    // 4. Run the conversation flow and deliver its reply
    let Some(out) = state.flow.handle(&update).await else {
        return (StatusCode::OK, "OK").into_response();
    };
    match state.sender.send(out.chat_id, &out.reply).await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(e) => {
            error!(
                update_id = update.update_id,
                transport = state.sender.name(),
                error = %redact_sensitive_data(&e.to_string()),
                "Error handling Telegram webhook"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Error").into_response()
        }
    }
}

fn verify_secret_token(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|got| bool::from(got.as_bytes().ct_eq(expected.as_bytes())))
}

// ---------------------------------------------------------------------------
// Bot API sender
// ---------------------------------------------------------------------------

pub struct BotApiSender {
    bot: Bot,
}

impl BotApiSender {
    pub fn new(token: String) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Point Telegram at `url`, optionally with a secret token it must echo back.
    pub async fn register_webhook(&self, url: &str, secret: Option<&str>) -> Result<()> {
        let url = Url::parse(url).with_context(|| format!("invalid webhook url: {url}"))?;
        let mut req = self.bot.set_webhook(url.clone());
        if let Some(secret) = secret {
            req = req.secret_token(secret.to_string());
        }
        req.await.map_err(transport_error)?;
        info!(url = %url, "[Telegram] Webhook registered");
        Ok(())
    }
}

fn transport_error(err: teloxide::RequestError) -> PriceFeedError {
    PriceFeedError::transport(redact_sensitive_data(&err.to_string()))
}

fn to_markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in &keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for b in row {
            buttons.push(match &b.action {
                ButtonAction::Callback(data) => {
                    InlineKeyboardButton::callback(b.text.clone(), data.clone())
                }
                ButtonAction::Url(url) => InlineKeyboardButton::url(
                    b.text.clone(),
                    Url::parse(url).with_context(|| format!("invalid button url: {url}"))?,
                ),
            });
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl ReplySender for BotApiSender {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let markup = to_markup(reply.keyboard())?;
        match reply {
            Reply::Text { text, keyboard } => {
                let mut req = self.bot.send_message(ChatId(chat_id), text.clone());
                if !keyboard.is_empty() {
                    req = req.reply_markup(markup);
                }
                req.await.map_err(transport_error)?;
            }
            Reply::Photo { url, caption, keyboard } => {
                let photo = Url::parse(url).with_context(|| format!("invalid photo url: {url}"))?;
                let mut req = self
                    .bot
                    .send_photo(ChatId(chat_id), InputFile::url(photo))
                    .caption(caption.clone());
                if !keyboard.is_empty() {
                    req = req.reply_markup(markup);
                }
                req.await.map_err(transport_error)?;
            }
        }
        info!("[Telegram] Sent reply to chat {}", chat_id);
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::texts;
    use crate::session::InMemorySessionStore;
    use crate::telegram_media::ImageCatalog;
    use pricefeed_core::{InlineButton, Language};
    use pricefeed_security::HandoffSecrets;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(i64, Reply)>>,
        answered: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ReplySender for RecordingSender {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, chat_id: i64, reply: &Reply) -> Result<()> {
            if self.fail {
                return Err(PriceFeedError::transport("transport down").into());
            }
            self.sent.lock().await.push((chat_id, reply.clone()));
            Ok(())
        }

        async fn answer_callback(&self, callback_id: &str) -> Result<()> {
            self.answered.lock().await.push(callback_id.to_string());
            Ok(())
        }
    }

    fn state(sender: Arc<RecordingSender>, secret: Option<&str>) -> AppState {
        let flow = ConversationFlow::new(
            Arc::new(InMemorySessionStore::new()),
            HandoffSecrets::shared("S"),
            "https://x.test",
            ImageCatalog::default(),
        );
        AppState {
            webhook_secret: secret.map(str::to_string),
            flow: Arc::new(flow),
            sender,
        }
    }

    const START: &str = r#"{"update_id":1,"message":{"message_id":1,"chat":{"id":9,"type":"private"},"from":{"id":42,"is_bot":false,"first_name":"Ann"},"text":"/start"}}"#;
    const LANG_EN_WITHOUT_USER_ID: &str = r#"{"update_id":3,"callback_query":{"id":"cb-9","from":{"is_bot":false,"first_name":"Ann"},"message":{"message_id":4,"chat":{"id":9}},"data":"lang_en"}}"#;
    const LANG_EN: &str = r#"{"update_id":2,"callback_query":{"id":"cb-7","from":{"id":42,"is_bot":false,"first_name":"Ann"},"message":{"message_id":3,"chat":{"id":9}},"data":"lang_en"}}"#;

    async fn post(state: AppState, headers: HeaderMap, body: &str) -> StatusCode {
        handle_telegram_update(State(state), headers, Bytes::from(body.to_string()))
            .await
            .into_response()
            .status()
    }

    #[tokio::test]
    async fn start_update_is_answered() {
        let sender = Arc::new(RecordingSender::default());
        let status = post(state(sender.clone(), None), HeaderMap::new(), START).await;
        assert_eq!(status, StatusCode::OK);
        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 9);
    }

    #[tokio::test]
    async fn callback_is_acknowledged_and_menu_sent() {
        let sender = Arc::new(RecordingSender::default());
        let status = post(state(sender.clone(), None), HeaderMap::new(), LANG_EN).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(*sender.answered.lock().await, vec!["cb-7".to_string()]);
        assert!(matches!(sender.sent.lock().await[0].1, Reply::Photo { .. }));
    }

    #[tokio::test]
    async fn callback_without_user_id_gets_generic_reply() {
        let sender = Arc::new(RecordingSender::default());
        let status = post(
            state(sender.clone(), None),
            HeaderMap::new(),
            LANG_EN_WITHOUT_USER_ID,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(*sender.answered.lock().await, vec!["cb-9".to_string()]);
        assert_eq!(
            *sender.sent.lock().await,
            vec![(9, Reply::text(texts(Language::En).failure))]
        );
    }

    #[tokio::test]
    async fn rejects_wrong_secret_token() {
        let sender = Arc::new(RecordingSender::default());
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, "nope".parse().unwrap());
        let status = post(state(sender.clone(), Some("hook-secret")), headers, START).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn accepts_matching_secret_token() {
        let sender = Arc::new(RecordingSender::default());
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, "hook-secret".parse().unwrap());
        let status = post(state(sender, Some("hook-secret")), headers, START).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn secret_token_must_match_exactly() {
        let mut headers = HeaderMap::new();
        assert!(verify_secret_token(&headers, None));
        assert!(!verify_secret_token(&headers, Some("hook-secret")));
        headers.insert(SECRET_TOKEN_HEADER, "hook-secre".parse().unwrap());
        assert!(!verify_secret_token(&headers, Some("hook-secret")));
        headers.insert(SECRET_TOKEN_HEADER, "hook-secret-".parse().unwrap());
        assert!(!verify_secret_token(&headers, Some("hook-secret")));
        headers.insert(SECRET_TOKEN_HEADER, "hook-secret".parse().unwrap());
        assert!(verify_secret_token(&headers, Some("hook-secret")));
    }

    #[tokio::test]
    async fn bad_json_is_rejected() {
        let sender = Arc::new(RecordingSender::default());
        let status = post(state(sender, None), HeaderMap::new(), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn transport_failure_is_a_server_error() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let status = post(state(sender, None), HeaderMap::new(), START).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn markup_rejects_invalid_urls() {
        let keyboard = InlineKeyboard::column([InlineButton::url("App", "not a url")]);
        assert!(to_markup(&keyboard).is_err());
        let keyboard = InlineKeyboard::column([
            InlineButton::callback("Token Price", "token_price"),
            InlineButton::url("App", "https://x.test/?telegramAuthToken=a.b.c"),
        ]);
        assert_eq!(to_markup(&keyboard).unwrap().inline_keyboard.len(), 2);
    }
}
