use std::fmt;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_NOTIFICATION_BASE_URL, ENV_OAUTH_CLIENT_ID,
    ENV_OAUTH_CLIENT_SECRET, ENV_OAUTH_TOKEN_URL, NOTIFICATION_SCOPE, TOKEN_CACHE_KEY,
};

/// ================================
/// Root config
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub oauth: OAuthConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// OAuth2 client credentials
/// ================================
#[derive(Deserialize, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    pub fn new(client_id: String, client_secret: String, token_url: String) -> Self {
        Self { client_id, client_secret, token_url, scopes: default_scopes() }
    }

    /// Read `OAUTH_CLIENT_ID`, `OAUTH_CLIENT_SECRET` and `OAUTH_TOKEN_URL`
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).map_err(|_| anyhow!("env variable '{}' is not set", name));
        Ok(Self::new(
            var(ENV_OAUTH_CLIENT_ID)?,
            var(ENV_OAUTH_CLIENT_SECRET)?,
            var(ENV_OAUTH_TOKEN_URL)?,
        ))
    }
}

// keep the secret out of logs
impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// ================================
/// Notification API
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// applies to both the token exchange and the send request
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_ms: default_timeout_ms() }
    }
}

/// ================================
/// Token cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(rename = "type", default)]
    pub cache_type: CacheType,
    /// redis connection url, required for `redis`
    pub url: Option<String>,
    #[serde(default = "default_cache_key")]
    pub key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { cache_type: CacheType::default(), url: None, key: default_cache_key() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    #[default]
    Memory,
    Redis,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_scopes() -> Vec<String> {
    vec![NOTIFICATION_SCOPE.to_owned()]
}

fn default_base_url() -> String {
    DEFAULT_NOTIFICATION_BASE_URL.to_owned()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_cache_key() -> String {
    TOKEN_CACHE_KEY.to_owned()
}
