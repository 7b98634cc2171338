//! One-shot identity handoff: assertion, hash, token, and deep link for a
//! single user at a single instant.

use tracing::info;

use pricefeed_core::{PriceFeedError, User, error::Result};

use crate::assertion::{UserAssertion, compute_hash};
use crate::token::{build_deep_link, issue_token};

/// Keys used by the handoff.
///
/// Deployments that predate `AUTH_TOKEN_SECRET` reuse the bot token for both
/// roles, which the existing companion verifier expects.
#[derive(Clone)]
pub struct HandoffSecrets {
    /// Seed for the assertion HMAC key.
    pub hmac_secret: String,
    /// HS256 key for the JWT.
    pub signing_secret: String,
}

impl HandoffSecrets {
    pub fn shared(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            hmac_secret: secret.clone(),
            signing_secret: secret,
        }
    }

    pub fn split(hmac_secret: impl Into<String>, signing_secret: impl Into<String>) -> Self {
        Self {
            hmac_secret: hmac_secret.into(),
            signing_secret: signing_secret.into(),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.hmac_secret == self.signing_secret
    }

    fn check(&self) -> Result<()> {
        if self.hmac_secret.is_empty() {
            return Err(PriceFeedError::config("shared secret is not configured"));
        }
        if self.signing_secret.is_empty() {
            return Err(PriceFeedError::config("token signing secret is not configured"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for HandoffSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandoffSecrets")
            .field("hmac_secret", &"***")
            .field("signing_secret", &"***")
            .field("shared", &self.is_shared())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Handoff {
    pub assertion: UserAssertion,
    pub hash: String,
    pub token: String,
    pub link: String,
}

/// Build the signed deep link for `user`, stamped with `auth_date_ms`.
///
/// Either every piece is produced or nothing is.
pub fn issue_handoff(
    user: &User,
    auth_date_ms: i64,
    secrets: &HandoffSecrets,
    base_url: &str,
) -> Result<Handoff> {
    secrets.check()?;
    if base_url.trim().is_empty() {
        return Err(PriceFeedError::config("application base URL is not configured"));
    }
    let assertion = UserAssertion::from_user(user, auth_date_ms)?;
    let hash = compute_hash(&assertion, &secrets.hmac_secret)?;
    let token = issue_token(&assertion, &hash, &secrets.signing_secret)?;
    let link = build_deep_link(base_url, &token)?;
    info!(user_id = user.id, auth_date = auth_date_ms, "Issued handoff link");
    Ok(Handoff {
        assertion,
        hash,
        token,
        link,
    })
}
