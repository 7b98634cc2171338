//! Environment-sourced configuration.
//!
//! Empty variables count as unset. The `NEXT_PUBLIC_*` names are read as
//! fallbacks so existing deployments keep working.

use std::collections::HashMap;

use crate::schema::Config;

/// Load configuration from the process environment.
pub fn from_env() -> Config {
    from_vars(&std::env::vars().collect())
}

/// Load configuration from a provided map (useful for testing).
pub fn from_vars(vars: &HashMap<String, String>) -> Config {
    let get = |key: &str| {
        vars.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let defaults = Config::default();

    Config {
        bind_address: get("PRICEFEED_BIND").unwrap_or(defaults.bind_address),
        port: get("PRICEFEED_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
        log_dir: get("PRICEFEED_LOG_DIR").unwrap_or(defaults.log_dir),
        bot_token: get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("NEXT_PUBLIC_TELEGRAM_BOT_TOKEN"))
            .unwrap_or_default(),
        auth_token_secret: get("AUTH_TOKEN_SECRET"),
        webhook_path: get("TELEGRAM_WEBHOOK_PATH").unwrap_or(defaults.webhook_path),
        webhook_secret: get("TELEGRAM_WEBHOOK_SECRET"),
        app_url: get("APP_URL")
            .or_else(|| get("NEXT_PUBLIC_APP_URL"))
            .unwrap_or_default(),
        image_paths: get("PRICEFEED_IMAGES")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.image_paths),
    }
}
