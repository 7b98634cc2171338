//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::Config;

static SENSITIVE_KEYS: &[&str] = &[
    "bot_token",
    "auth_token_secret",
    "webhook_secret",
];

fn mask(s: &str) -> String {
    // Preserve a hint: Telegram tokens start with the numeric bot id.
    match s.split_once(':') {
        Some((bot_id, _)) if !bot_id.is_empty() => format!("{bot_id}:***"),
        _ => "***".to_string(),
    }
}

/// JSON snapshot of the config with all secrets replaced.
pub fn redacted(config: &Config) -> Value {
    let mut value = serde_json::to_value(config).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        for key in SENSITIVE_KEYS {
            let masked = match map.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => mask(s),
                _ => continue,
            };
            map.insert((*key).to_string(), Value::String(masked));
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets_but_keeps_bot_id() {
        let cfg = Config {
            bot_token: "1234567890:AAFsecretsecret".into(),
            webhook_secret: Some("hook-secret".into()),
            app_url: "https://prices.example.com".into(),
            ..Default::default()
        };
        let v = redacted(&cfg);
        assert_eq!(v["bot_token"], "1234567890:***");
        assert_eq!(v["webhook_secret"], "***");
        assert_eq!(v["auth_token_secret"], Value::Null);
        assert_eq!(v["app_url"], "https://prices.example.com");
        assert!(!v.to_string().contains("secretsecret"));
    }
}
