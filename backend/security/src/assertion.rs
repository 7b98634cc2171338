//! Identity assertions built from Telegram user fields.
//!
//! The hash follows the Telegram Login Widget scheme: a data-check string of
//! sorted `key=value` lines, authenticated with HMAC-SHA256 keyed by
//! SHA-256 of the shared secret. Unlike the widget, `auth_date` is carried in
//! milliseconds; verifiers that assume seconds will misjudge freshness.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use pricefeed_core::{PriceFeedError, User, error::Result};

type HmacSha256 = Hmac<Sha256>;

/// The identity claim handed to the companion web app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssertion {
    /// Milliseconds since the Unix epoch, captured when the update was handled.
    pub auth_date: i64,
    pub first_name: String,
    /// Always empty in the menu flow.
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub id: u64,
    /// Always empty in the menu flow.
    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
}

impl UserAssertion {
    /// Build an assertion for the user who triggered an update.
    ///
    /// Fails with `MalformedUpdate` when the platform left out the user id or first name.
    pub fn from_user(user: &User, auth_date_ms: i64) -> Result<Self> {
        if user.id == 0 {
            return Err(PriceFeedError::malformed("user id is missing"));
        }
        if user.first_name.is_empty() {
            return Err(PriceFeedError::malformed(format!(
                "user {} has no first name",
                user.id
            )));
        }
        Ok(Self {
            auth_date: auth_date_ms,
            first_name: user.first_name.clone(),
            last_name: String::new(),
            username: user.username.clone(),
            id: user.id,
            photo_url: String::new(),
        })
    }

    /// Non-empty fields under their wire names, sorted by name.
    ///
    /// Zero numbers and empty strings count as absent and are dropped.
    pub fn wire_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(6);
        if self.auth_date != 0 {
            fields.push(("auth_date", self.auth_date.to_string()));
        }
        if !self.first_name.is_empty() {
            fields.push(("first_name", self.first_name.clone()));
        }
        if self.id != 0 {
            fields.push(("id", self.id.to_string()));
        }
        if !self.last_name.is_empty() {
            fields.push(("last_name", self.last_name.clone()));
        }
        if !self.photo_url.is_empty() {
            fields.push(("photo_url", self.photo_url.clone()));
        }
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            fields.push(("username", username.to_string()));
        }
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }

    /// The canonical string the hash is computed over.
    pub fn data_check_string(&self) -> String {
        self.wire_fields()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn keyed_mac(secret: &str) -> Result<HmacSha256> {
    if secret.is_empty() {
        return Err(PriceFeedError::config("shared secret is not configured"));
    }
    let key = Sha256::digest(secret.as_bytes());
    HmacSha256::new_from_slice(&key).map_err(|e| PriceFeedError::config(e.to_string()))
}

/// Compute the lowercase hex HMAC-SHA256 of the assertion's data-check string.
pub fn compute_hash(assertion: &UserAssertion, secret: &str) -> Result<String> {
    let mut mac = keyed_mac(secret)?;
    mac.update(assertion.data_check_string().as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a hex hash against the assertion in constant time.
pub fn verify_hash(assertion: &UserAssertion, hash_hex: &str, secret: &str) -> Result<bool> {
    let mut mac = keyed_mac(secret)?;
    mac.update(assertion.data_check_string().as_bytes());
    let Ok(expected) = hex::decode(hash_hex) else {
        return Ok(false);
    };
    Ok(mac.verify_slice(&expected).is_ok())
}
