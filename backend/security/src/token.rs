//! Signed handoff tokens and the deep links that carry them.
//!
//! Tokens are compact HS256 JWTs with no `exp`; the companion app treats
//! them as single-use bearer credentials.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pricefeed_core::{PriceFeedError, error::Result};

use crate::assertion::{UserAssertion, verify_hash};

/// Query parameter the companion app reads the token from.
pub const AUTH_TOKEN_PARAM: &str = "telegramAuthToken";

/// JWT payload: the assertion fields, the assertion hash, and issue time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    #[serde(flatten)]
    pub assertion: UserAssertion,
    pub hash: String,
    /// Seconds since the epoch, per JWT convention.
    pub iat: i64,
}

/// Sign the assertion and its hash into a compact token.
pub fn issue_token(assertion: &UserAssertion, hash: &str, signing_secret: &str) -> Result<String> {
    issue_token_at(assertion, hash, signing_secret, Utc::now().timestamp())
}

pub fn issue_token_at(
    assertion: &UserAssertion,
    hash: &str,
    signing_secret: &str,
    issued_at: i64,
) -> Result<String> {
    if signing_secret.is_empty() {
        return Err(PriceFeedError::config("token signing secret is not configured"));
    }
    let claims = AssertionClaims {
        assertion: assertion.clone(),
        hash: hash.to_string(),
        iat: issued_at,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_secret.as_bytes()),
    )
    .map_err(|e| PriceFeedError::token(format!("signing failed: {e}")))?;
    debug!(user_id = assertion.id, "Issued handoff token");
    Ok(token)
}

/// Percent-encode a token for use as a single query value.
pub fn encode_for_url(token: &str) -> String {
    urlencoding::encode(token).into_owned()
}

/// `<base>/?telegramAuthToken=<encoded token>`.
///
/// A trailing slash on the base URL is dropped so the path never doubles up.
pub fn build_deep_link(base_url: &str, token: &str) -> Result<String> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(PriceFeedError::config("application base URL is not configured"));
    }
    Ok(format!("{base}/?{AUTH_TOKEN_PARAM}={}", encode_for_url(token)))
}

/// Pull the compact token out of a deep link, a percent-encoded value, or a bare token.
pub fn extract_token(input: &str) -> Result<String> {
    let input = input.trim();
    let needle = format!("{AUTH_TOKEN_PARAM}=");
    let raw = match input.find(&needle) {
        Some(pos) => {
            let rest = &input[pos + needle.len()..];
            rest.split(['&', '#']).next().unwrap_or(rest)
        }
        None => input,
    };
    let decoded = urlencoding::decode(raw)
        .map_err(|e| PriceFeedError::token(format!("token is not valid UTF-8: {e}")))?;
    if decoded.split('.').count() != 3 {
        return Err(PriceFeedError::token("token is not a compact JWS"));
    }
    Ok(decoded.into_owned())
}

/// Check the token signature and return its claims, without requiring `exp`.
pub fn decode_token(token: &str, signing_secret: &str) -> Result<AssertionClaims> {
    if signing_secret.is_empty() {
        return Err(PriceFeedError::config("token signing secret is not configured"));
    }
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    let data = decode::<AssertionClaims>(
        token,
        &DecodingKey::from_secret(signing_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| PriceFeedError::token(format!("signature check failed: {e}")))?;
    Ok(data.claims)
}

/// Full downstream check: signature first, then the embedded assertion hash.
pub fn verify_token(input: &str, signing_secret: &str, hmac_secret: &str) -> Result<AssertionClaims> {
    let token = extract_token(input)?;
    let claims = decode_token(&token, signing_secret)?;
    if !verify_hash(&claims.assertion, &claims.hash, hmac_secret)? {
        return Err(PriceFeedError::token("assertion hash does not match"));
    }
    Ok(claims)
}
