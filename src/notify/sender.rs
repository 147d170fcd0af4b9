use std::sync::Arc;

use reqwest::Client;
use tracing::{error, info};

use crate::cache::store::TokenStore;
use crate::config::settings::NotificationConfig;
use crate::error::NotifyError;
use crate::notify::record::{Notification, NotificationRecord};
use crate::sources::oauth2::TokenProvider;
use crate::utils::constants::SEND_PATH;

/// Posts notification batches to the MetaBrainz notification API.
///
/// `send_*` methods log and swallow every failure; `try_send_*` report it.
/// Nothing is retried.
#[derive(Debug)]
pub struct NotificationSender<S> {
    tokens: Arc<TokenProvider<S>>,
    client: Client,
    send_url: String,
}

impl<S: TokenStore> NotificationSender<S> {
    pub fn new(tokens: Arc<TokenProvider<S>>, cfg: &NotificationConfig, client: Client) -> Self {
        let send_url = format!("{}{}", cfg.base_url.trim_end_matches('/'), SEND_PATH);
        Self { tokens, client, send_url }
    }

    pub fn tokens(&self) -> &Arc<TokenProvider<S>> {
        &self.tokens
    }

    pub async fn send_notification(&self, notification: Notification) {
        self.send_multiple_notifications(&[notification.into()]).await
    }

    pub async fn send_multiple_notifications(&self, notifications: &[NotificationRecord]) {
        if let Err(e) = self.try_send_multiple_notifications(notifications).await {
            error!("sending {} notification(s) failed: {}", notifications.len(), e);
        }
    }

    pub async fn try_send_notification(&self, notification: Notification) -> Result<(), NotifyError> {
        self.try_send_multiple_notifications(&[notification.into()]).await
    }

    pub async fn try_send_multiple_notifications(
        &self,
        notifications: &[NotificationRecord],
    ) -> Result<(), NotifyError> {
        let token = self.tokens.try_fetch_token().await?;

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(token)
            .json(notifications)
            .send()
            .await
            .map_err(NotifyError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }

        info!("sent {} notification(s), status {}", notifications.len(), status);
        Ok(())
    }
}
