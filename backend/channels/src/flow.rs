//! Menu conversation flow.
//!
//! `/start` asks for a language; choosing one moves the conversation to the
//! main menu and is the only step that issues a signed handoff link.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use pricefeed_core::{
    CallbackQuery, FlowState, InlineButton, InlineKeyboard, Language, Reply, Session, SessionStore,
    Update, User,
};
use pricefeed_security::{HandoffSecrets, issue_handoff};

use crate::catalog::{CB_TOKEN_PRICE, texts};
use crate::telegram_commands::{BotCommand, TelegramCommands};
use crate::telegram_media::ImageCatalog;

/// A reply addressed to a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub chat_id: i64,
    pub reply: Reply,
}

pub struct ConversationFlow {
    sessions: Arc<dyn SessionStore>,
    secrets: HandoffSecrets,
    app_url: String,
    images: ImageCatalog,
}

impl ConversationFlow {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        secrets: HandoffSecrets,
        app_url: impl Into<String>,
        images: ImageCatalog,
    ) -> Self {
        Self {
            sessions,
            secrets,
            app_url: app_url.into(),
            images,
        }
    }

    /// Process one update and return the reply to send, if any.
    pub async fn handle(&self, update: &Update) -> Option<Outbound> {
        let Some(chat_id) = update.chat_id() else {
            warn!(update_id = update.update_id, "Update without a chat; ignoring");
            return None;
        };
        if let Some(query) = &update.callback_query {
            return self.handle_callback(chat_id, query).await;
        }

        let (cmd, reply) = TelegramCommands::dispatch(update.command()?, chat_id)?;
        if cmd == BotCommand::Start {
            let start_over = |s: &mut Session| s.state = FlowState::AwaitingLanguage;
            self.sessions.update(chat_id, Box::new(start_over)).await;
        }
        Some(Outbound { chat_id, reply })
    }

    async fn handle_callback(&self, chat_id: i64, query: &CallbackQuery) -> Option<Outbound> {
        let data = query.data.as_deref().unwrap_or_default();
        debug!(chat_id, data, "Callback query received");

        if let Some(lang) = Language::from_callback(data) {
            return Some(Outbound {
                chat_id,
                reply: self.select_language(chat_id, &query.from, lang).await,
            });
        }

        match data {
            CB_TOKEN_PRICE => {
                let lang = self.sessions.load(chat_id).await.language_or_default();
                Some(Outbound {
                    chat_id,
                    reply: Reply::text(texts(lang).token_price_message),
                })
            }
            _ => {
                debug!(chat_id, data, "Unhandled callback data");
                None
            }
        }
    }

    /// `AwaitingLanguage -> AwaitingMenuChoice`, issuing the handoff link.
    async fn select_language(&self, chat_id: i64, user: &User, lang: Language) -> Reply {
        let (reply, advanced) = match self.main_menu(user, lang) {
            Ok(reply) => {
                info!(chat_id, user_id = user.id, lang = %lang, "Language selected");
                (reply, true)
            }
            Err(e) => {
                error!(chat_id, user_id = user.id, error = %e, "Failed to issue handoff link");
                (Reply::text(texts(lang).failure), false)
            }
        };
        self.sessions
            .update(
                chat_id,
                Box::new(move |s: &mut Session| {
                    s.language = Some(lang);
                    if advanced {
                        s.state = FlowState::AwaitingMenuChoice;
                    }
                }),
            )
            .await;
        reply
    }

    fn main_menu(&self, user: &User, lang: Language) -> pricefeed_core::error::Result<Reply> {
        let handoff = issue_handoff(
            user,
            Utc::now().timestamp_millis(),
            &self.secrets,
            &self.app_url,
        )?;
        let t = texts(lang);
        let keyboard = InlineKeyboard::column([
            InlineButton::callback(t.token_price, CB_TOKEN_PRICE),
            InlineButton::url(t.token_app, handoff.link),
        ]);
        Ok(match self.images.pick(&self.app_url) {
            Some(url) => Reply::Photo {
                url,
                caption: t.welcome.to_string(),
                keyboard,
            },
            None => Reply::Text {
                text: t.welcome.to_string(),
                keyboard,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use pricefeed_core::{ButtonAction, Chat, IncomingMessage};
    use pricefeed_security::verify_token;

    const CHAT: i64 = 777;

    fn ann() -> User {
        User {
            id: 42,
            is_bot: false,
            first_name: "Ann".into(),
            last_name: None,
            username: Some("ann_w".into()),
        }
    }

    fn message(text: &str) -> Update {
        Update {
            update_id: 1,
            message: Some(IncomingMessage {
                message_id: 1,
                chat: Chat { id: CHAT },
                from: Some(ann()),
                text: Some(text.into()),
            }),
            callback_query: None,
        }
    }

    fn callback(data: &str) -> Update {
        Update {
            update_id: 2,
            message: None,
            callback_query: Some(CallbackQuery {
                id: "cb-1".into(),
                from: ann(),
                data: Some(data.into()),
                message: Some(IncomingMessage {
                    message_id: 5,
                    chat: Chat { id: CHAT },
                    from: None,
                    text: None,
                }),
            }),
        }
    }

    fn flow(store: &InMemorySessionStore, secret: &str, app_url: &str) -> ConversationFlow {
        ConversationFlow::new(
            Arc::new(store.clone()),
            HandoffSecrets::shared(secret),
            app_url,
            ImageCatalog::new(vec!["/images/onChainFeeds.png".into()]),
        )
    }

    fn app_link(reply: &Reply) -> String {
        reply
            .keyboard()
            .buttons()
            .find_map(|b| match &b.action {
                ButtonAction::Url(u) => Some(u.clone()),
                _ => None,
            })
            .expect("menu has a url button")
    }

    #[tokio::test]
    async fn start_prompts_for_language() {
        let store = InMemorySessionStore::new();
        let out = flow(&store, "S", "https://x.test").handle(&message("/start")).await.unwrap();
        assert_eq!(out.chat_id, CHAT);
        assert_eq!(out.reply, TelegramCommands::language_prompt());
        assert_eq!(store.load(CHAT).await.state, FlowState::AwaitingLanguage);
    }

    #[tokio::test]
    async fn language_choice_sends_menu_with_verifiable_link() {
        let store = InMemorySessionStore::new();
        let flow = flow(&store, "S", "https://x.test");
        flow.handle(&message("/start")).await;

        let out = flow.handle(&callback("lang_en")).await.unwrap();
        let Reply::Photo { url, caption, .. } = &out.reply else {
            panic!("expected photo reply, got {:?}", out.reply);
        };
        assert_eq!(url, "https://x.test/images/onChainFeeds.png");
        assert_eq!(caption, texts(Language::En).welcome);

        let claims = verify_token(&app_link(&out.reply), "S", "S").unwrap();
        assert_eq!(claims.assertion.id, 42);
        assert_eq!(claims.assertion.first_name, "Ann");
        assert_eq!(claims.assertion.username.as_deref(), Some("ann_w"));

        assert_eq!(
            store.load(CHAT).await,
            Session {
                language: Some(Language::En),
                state: FlowState::AwaitingMenuChoice,
            }
        );
    }

    #[tokio::test]
    async fn token_price_uses_stored_language() {
        let store = InMemorySessionStore::new();
        let flow = flow(&store, "S", "https://x.test");
        flow.handle(&callback("lang_en")).await;
        let out = flow.handle(&callback(CB_TOKEN_PRICE)).await.unwrap();
        assert_eq!(out.reply, Reply::text(texts(Language::En).token_price_message));
    }

    #[tokio::test]
    async fn token_price_defaults_to_spanish() {
        let store = InMemorySessionStore::new();
        let out = flow(&store, "S", "https://x.test")
            .handle(&callback(CB_TOKEN_PRICE))
            .await
            .unwrap();
        assert_eq!(out.reply, Reply::text(texts(Language::Es).token_price_message));
    }

    #[tokio::test]
    async fn missing_app_url_yields_generic_failure() {
        let store = InMemorySessionStore::new();
        let out = flow(&store, "S", "").handle(&callback("lang_es")).await.unwrap();
        assert_eq!(out.reply, Reply::text(texts(Language::Es).failure));
        let session = store.load(CHAT).await;
        assert_eq!(session.language, Some(Language::Es));
        assert_eq!(session.state, FlowState::AwaitingLanguage);
    }

    #[tokio::test]
    async fn missing_secret_yields_generic_failure() {
        let store = InMemorySessionStore::new();
        let out = flow(&store, "", "https://x.test").handle(&callback("lang_en")).await.unwrap();
        assert_eq!(out.reply, Reply::text(texts(Language::En).failure));
    }

    #[tokio::test]
    async fn other_updates_are_ignored() {
        let store = InMemorySessionStore::new();
        let flow = flow(&store, "S", "https://x.test");
        assert!(flow.handle(&message("hello")).await.is_none());
        assert!(flow.handle(&callback("investment_recommendations")).await.is_none());
        assert_eq!(store.len().await, 0);
    }
}
