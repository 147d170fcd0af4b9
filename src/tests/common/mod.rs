// tests/common/mod.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;
use reqwest::Client;

use crate::cache::memory::MemoryTokenStore;
use crate::cache::store::TokenStore;
use crate::config::settings::{NotificationConfig, OAuthConfig};
use crate::error::NotifyError;
use crate::notify::sender::NotificationSender;
use crate::sources::oauth2::TokenProvider;

pub const TOKEN_PATH: &str = "/oauth2/token";
pub const NOTIFICATION_PATH: &str = "/notification";
pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn oauth_config(server: &MockServer) -> OAuthConfig {
    OAuthConfig::new(CLIENT_ID.to_owned(), CLIENT_SECRET.to_owned(), server.url(TOKEN_PATH))
}

pub fn notification_config(server: &MockServer) -> NotificationConfig {
    NotificationConfig {
        base_url: server.url(NOTIFICATION_PATH),
        ..NotificationConfig::default()
    }
}

pub fn memory_provider(server: &MockServer) -> TokenProvider<MemoryTokenStore> {
    TokenProvider::new(MemoryTokenStore::new(), oauth_config(server), build_reqwest_client())
}

/// Token endpoint and notification endpoint served by the same mock server
pub fn memory_sender(server: &MockServer) -> NotificationSender<MemoryTokenStore> {
    NotificationSender::new(
        Arc::new(memory_provider(server)),
        &notification_config(server),
        build_reqwest_client(),
    )
}

/// Store whose backend is unreachable
#[derive(Debug, Default)]
pub struct UnreachableStore {
    pub writes: AtomicUsize,
}

impl TokenStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, NotifyError> {
        Err(NotifyError::Cache("connection refused".to_owned()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), NotifyError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Cache("connection refused".to_owned()))
    }
}
