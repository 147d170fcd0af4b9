pub mod record;
pub mod sender;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use crate::cache::{build_store, CacheBackend};
use crate::config::settings::{NotificationConfig, ServiceConfig};
use crate::sources::oauth2::TokenProvider;
pub use record::{Notification, NotificationRecord};
pub use sender::NotificationSender;

pub fn build_client(cfg: &NotificationConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()?)
}

/// Wire a sender and its token provider from a loaded config.
pub fn build_sender(cfg: &ServiceConfig) -> Result<NotificationSender<CacheBackend>> {
    let client = build_client(&cfg.notification)?;
    let store = build_store(&cfg.cache)?;
    let tokens = TokenProvider::new(store, cfg.oauth.clone(), client.clone())
        .with_cache_key(cfg.cache.key.clone());

    Ok(NotificationSender::new(Arc::new(tokens), &cfg.notification, client))
}
