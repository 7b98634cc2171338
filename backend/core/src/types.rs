use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the bot can talk in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Fallback when a conversation never picked one.
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Maps a `lang_xx` callback payload to a language.
    pub fn from_callback(data: &str) -> Option<Self> {
        data.strip_prefix("lang_").and_then(|c| c.parse().ok())
    }

    pub fn callback_data(self) -> String {
        format!("lang_{}", self.code())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Where a conversation is in the menu flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    AwaitingLanguage,
    AwaitingMenuChoice,
}

/// Per-conversation state, keyed by chat id in a session store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub language: Option<Language>,
    pub state: FlowState,
}

impl Session {
    pub fn language_or_default(&self) -> Language {
        self.language.unwrap_or_default()
    }
}
