//! Authenticated handoff from the Telegram bot to the companion web app.
//!
//! - `assertion`: canonical data-check string and its HMAC-SHA256 hash
//! - `token`: HS256 token issuing, deep-link construction, and verification
//! - `handoff`: both steps for one user in one call
//!
//! Everything here is synchronous and stateless.

pub mod assertion;
pub mod handoff;
pub mod token;

pub use assertion::{UserAssertion, compute_hash, verify_hash};
pub use handoff::{Handoff, HandoffSecrets, issue_handoff};
pub use token::{
    AUTH_TOKEN_PARAM, AssertionClaims, build_deep_link, decode_token, encode_for_url,
    extract_token, issue_token, issue_token_at, verify_token,
};
