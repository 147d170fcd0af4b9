use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::store::TokenStore;
use crate::cache::token::Token;
use crate::config::settings::OAuthConfig;
use crate::error::NotifyError;
use crate::utils::constants::{GRANT_TYPE_CLIENT_CREDENTIALS, TOKEN_CACHE_KEY};

/// Hands out a bearer token for the notification API, exchanging client
/// credentials only when the cache has none.
///
/// Cache misses are serialized per provider: callers that arrive while an
/// exchange is running wait for it and then take its outcome, the token from
/// the cache or the failure, without exchanging again.
#[derive(Debug)]
pub struct TokenProvider<S> {
    store: S,
    cfg: OAuthConfig,
    cache_key: String,
    client: Client,
    /// finished exchanges, bumped while `exchange_lock` is held
    exchanges: AtomicU64,
    /// holds the reason of the last failed exchange
    exchange_lock: Mutex<Option<String>>,
}

impl<S: TokenStore> TokenProvider<S> {
    pub fn new(store: S, cfg: OAuthConfig, client: Client) -> Self {
        Self {
            store,
            cfg,
            cache_key: TOKEN_CACHE_KEY.to_owned(),
            client,
            exchanges: AtomicU64::new(0),
            exchange_lock: Mutex::new(None),
        }
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Cached or freshly exchanged token; `None` when the exchange failed.
    pub async fn fetch_token(&self) -> Option<String> {
        self.try_fetch_token()
            .await
            .map_err(|e| error!("fetching notification token failed: {}", e))
            .ok()
    }

    pub async fn try_fetch_token(&self) -> Result<String, NotifyError> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let seen = self.exchanges.load(Ordering::Acquire);
        let mut last_failure = self.exchange_lock.lock().await;
        // another caller may have filled the cache while we waited
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }
        if self.exchanges.load(Ordering::Acquire) != seen {
            if let Some(reason) = last_failure.as_ref() {
                return Err(NotifyError::TokenExchangeFailed(reason.clone()));
            }
        }

        let result = self.exchange().await;
        self.exchanges.fetch_add(1, Ordering::Release);
        let token = match result {
            Ok(token) => {
                *last_failure = None;
                token
            }
            Err(e) => {
                *last_failure = Some(e.to_string());
                return Err(e);
            }
        };
        if token.expires_in == 0 {
            debug!("token has no lifetime, not caching");
        } else if let Err(e) = self.store.set(&self.cache_key, &token.access_token, token.expires_in).await {
            warn!("storing token under '{}' failed: {}", self.cache_key, e);
        }
        Ok(token.access_token)
    }

    async fn cached_token(&self) -> Option<String> {
        match self.store.get(&self.cache_key).await {
            Ok(Some(token)) => {
                debug!("token cache hit for '{}'", self.cache_key);
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("token cache read for '{}' failed, exchanging credentials: {}", self.cache_key, e);
                None
            }
        }
    }

    async fn exchange(&self) -> Result<Token, NotifyError> {
        let scope = self.cfg.scopes.join(" ");
        let form = [
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ("scope", scope.as_str()),
            ("client_id", self.cfg.client_id.as_str()),
            ("client_secret", self.cfg.client_secret.as_str()),
        ];

        info!("requesting client-credentials token from {}", self.cfg.token_url);
        let response = self
            .client
            .post(&self.cfg.token_url)
            .form(&form)
            .send()
            .await
            .map_err(NotifyError::TokenRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::TokenStatus(status));
        }

        let body = response.text().await.map_err(NotifyError::TokenRequest)?;
        let token: Token =
            serde_json::from_str(&body).map_err(|e| NotifyError::TokenBody(e.to_string()))?;
        if token.access_token.is_empty() {
            return Err(NotifyError::TokenBody("empty access_token".to_owned()));
        }

        info!("received token, expires in {}s", token.expires_in);
        Ok(token)
    }
}
