use http::StatusCode;
use thiserror::Error;

/// Failures surfaced by the token provider and the notification sender.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("OAuth2 token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("OAuth2 token endpoint returned {0}")]
    TokenStatus(StatusCode),

    #[error("malformed OAuth2 token response: {0}")]
    TokenBody(String),

    /// returned to callers that waited on an exchange which failed
    #[error("concurrent OAuth2 token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("notification request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Notification API error: {0}")]
    Status(StatusCode),

    #[error("token cache error: {0}")]
    Cache(String),
}

impl From<redis::RedisError> for NotifyError {
    fn from(err: redis::RedisError) -> Self {
        NotifyError::Cache(err.to_string())
    }
}
