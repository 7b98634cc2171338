//! Telegram Bot Commands
//!
//! Routes slash commands to their replies. Only `/start` is understood.

use tracing::{debug, info};

use pricefeed_core::{InlineButton, InlineKeyboard, Language, Reply};

use crate::catalog::texts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
}

impl BotCommand {
    pub fn parse(command: &str) -> Option<Self> {
        match command {
            "/start" => Some(Self::Start),
            _ => None,
        }
    }
}

pub struct TelegramCommands;

impl TelegramCommands {
    /// Reply for a command, or `None` for commands the bot ignores.
    pub fn dispatch(command: &str, chat_id: i64) -> Option<(BotCommand, Reply)> {
        info!("Handling Telegram command: {} for chat_id: {}", command, chat_id);

        match BotCommand::parse(command) {
            Some(BotCommand::Start) => Some((BotCommand::Start, Self::language_prompt())),
            None => {
                debug!("Unknown command: {}", command);
                None
            }
        }
    }

    /// The bilingual prompt asking the user to pick a language.
    pub fn language_prompt() -> Reply {
        let es = texts(Language::Es);
        let en = texts(Language::En);
        Reply::Text {
            text: es.language_selection.to_string(),
            keyboard: InlineKeyboard::column([
                InlineButton::callback(en.spanish, Language::Es.callback_data()),
                InlineButton::callback(en.english, Language::En.callback_data()),
            ]),
        }
    }
}
