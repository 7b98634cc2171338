use serde::{Deserialize, Serialize};

pub const DEFAULT_WEBHOOK_PATH: &str = "/api/telegram";
pub const DEFAULT_IMAGE: &str = "/images/onChainFeeds.png";

/// PriceFeed bot runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Directory for rolling NDJSON logs
    pub log_dir: String,

    // Telegram
    /// Bot API token. Also seeds the assertion HMAC key.
    pub bot_token: String,
    /// Separate JWT signing key. When unset the bot token signs tokens too.
    pub auth_token_secret: Option<String>,
    pub webhook_path: String,
    pub webhook_secret: Option<String>,

    // Companion app
    /// Base URL of the web app that receives the handoff link.
    pub app_url: String,
    /// Menu banner paths, resolved against `app_url`.
    pub image_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
            bot_token: String::new(),
            auth_token_secret: None,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            webhook_secret: None,
            app_url: String::new(),
            image_paths: vec![DEFAULT_IMAGE.to_string(), DEFAULT_IMAGE.to_string()],
        }
    }
}

impl Config {
    /// Key used to sign handoff tokens.
    pub fn signing_secret(&self) -> &str {
        self.auth_token_secret.as_deref().unwrap_or(&self.bot_token)
    }

    /// True when one secret serves as both HMAC seed and JWT key.
    pub fn reuses_bot_token_for_signing(&self) -> bool {
        self.auth_token_secret.is_none()
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
