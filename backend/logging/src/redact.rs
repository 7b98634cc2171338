//! Log Redaction Layer
//!
//! Scrubs Telegram bot tokens, JWTs, and bearer credentials from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BOT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{5,}):[A-Za-z0-9_-]{30,}").unwrap());
static JWT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+").unwrap()
});
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = input.to_string();

    // Keep the bot id, it identifies the bot without granting access
    redacted = BOT_TOKEN_RE.replace_all(&redacted, "$1:[REDACTED]").to_string();

    redacted = JWT_RE.replace_all(&redacted, "[REDACTED_JWT]").to_string();

    redacted = BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string();

    redacted
}
