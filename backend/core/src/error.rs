use thiserror::Error;

/// Top-level error type for the PriceFeed bot.
#[derive(Debug, Error)]
pub enum PriceFeedError {
    /// A required secret or URL is missing or empty.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The triggering update lacks user fields the handoff needs.
    #[error("malformed update: {0}")]
    MalformedUpdate(String),

    #[error("token error: {0}")]
    TokenError(String),

    /// The Bot API rejected or never received a reply.
    #[error("transport error: {0}")]
    TransportError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PriceFeedError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedUpdate(msg.into())
    }

    pub fn token(msg: impl Into<String>) -> Self {
        Self::TokenError(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// True for errors that originate from deployment configuration rather than input.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::ConfigError(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }
}

pub type Result<T> = std::result::Result<T, PriceFeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_survive_anyhow() {
        let err: anyhow::Error = PriceFeedError::transport("chat not found").into();
        assert_eq!(err.to_string(), "transport error: chat not found");
        let inner = err.downcast_ref::<PriceFeedError>().unwrap();
        assert!(inner.is_transport());
        assert!(!inner.is_config());
    }
}
