//! Structured logging for the PriceFeed bot.
//!
//! Console plus rolling NDJSON file output, and redaction of bot tokens and
//! handoff JWTs before they reach a log line.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
