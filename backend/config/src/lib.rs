//! `pricefeed-config` — PriceFeed bot runtime configuration.
//!
//! Provides:
//! - Typed config with defaults
//! - Environment loading (with legacy `NEXT_PUBLIC_*` fallbacks)
//! - Validation report (errors and warnings)
//! - Redacted snapshots for safe logging

pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use env::{from_env, from_vars};
pub use redact::redacted;
pub use schema::Config;
pub use validation::{validate, ConfigValidationError, ValidationReport};
