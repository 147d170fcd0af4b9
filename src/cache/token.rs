use serde::Deserialize;

/// Access token as issued by the OAuth2 token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// lifetime in seconds, used as the cache TTL
    pub expires_in: u64,
}
