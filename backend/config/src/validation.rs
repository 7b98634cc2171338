//! Config validation with user-friendly error messages.

use crate::schema::Config;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &Config) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_telegram(config, &mut report);
    validate_app(config, &mut report);
    report
}

fn validate_telegram(config: &Config, report: &mut ValidationReport) {
    if config.bot_token.is_empty() {
        report.error(
            "TELEGRAM_BOT_TOKEN",
            "Bot token is required to answer updates and sign handoff links",
        );
    }
    if !config.webhook_path.starts_with('/') {
        report.error("TELEGRAM_WEBHOOK_PATH", "Webhook path must start with '/'");
    }
    if config.webhook_secret.is_none() {
        report.warn(
            "TELEGRAM_WEBHOOK_SECRET",
            "No webhook secret set; any caller can post updates",
        );
    }
    if config.reuses_bot_token_for_signing() {
        report.warn(
            "AUTH_TOKEN_SECRET",
            "Bot token doubles as the JWT signing key",
        );
    }
}

fn validate_app(config: &Config, report: &mut ValidationReport) {
    if config.app_url.is_empty() {
        report.warn("APP_URL", "No app URL set; language selection will fail");
    } else if !(config.app_url.starts_with("https://") || config.app_url.starts_with("http://")) {
        report.error("APP_URL", "App URL must be an http(s) URL");
    }
    if config.image_paths.iter().any(|p| !p.starts_with('/')) {
        report.error("PRICEFEED_IMAGES", "Image paths must start with '/'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Config {
        Config {
            bot_token: "123:abc".into(),
            auth_token_secret: Some("jwt-key".into()),
            webhook_secret: Some("hook".into()),
            app_url: "https://prices.example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_config_is_clean() {
        let report = validate(&complete());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn missing_bot_token_is_error() {
        let report = validate(&Config::default());
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "TELEGRAM_BOT_TOKEN");
    }

    #[test]
    fn missing_app_url_is_only_a_warning() {
        let cfg = Config {
            app_url: String::new(),
            ..complete()
        };
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.path == "APP_URL"));
    }

    #[test]
    fn non_http_app_url_is_error() {
        let cfg = Config {
            app_url: "t.me/PriceFeedsbot".into(),
            ..complete()
        };
        assert!(!validate(&cfg).is_valid());
    }
}
