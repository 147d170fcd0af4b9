use anyhow::{bail, Result};

use crate::config::settings::{CacheType, ServiceConfig};

pub fn validate_service_config(cfg: &ServiceConfig) -> Result<()> {
    let oauth = &cfg.oauth;
    if oauth.client_id.trim().is_empty() {
        bail!("oauth.client_id must not be empty");
    }
    if oauth.client_secret.trim().is_empty() {
        bail!("oauth.client_secret must not be empty");
    }
    validate_url("oauth.token_url", &oauth.token_url)?;
    if oauth.scopes.is_empty() {
        bail!("oauth.scopes must contain at least one scope");
    }

    validate_url("notification.base_url", &cfg.notification.base_url)?;
    if cfg.notification.timeout_ms == 0 {
        bail!("notification.timeout_ms must be greater than 0");
    }

    if cfg.cache.key.trim().is_empty() {
        bail!("cache.key must not be empty");
    }
    if cfg.cache.cache_type == CacheType::Redis {
        match cfg.cache.url.as_deref() {
            Some(url) if url.starts_with("redis://") || url.starts_with("rediss://") => {}
            Some(url) => bail!("cache.url '{}' is not a redis url", url),
            None => bail!("cache.url is required for redis cache"),
        }
    }

    Ok(())
}

fn validate_url(field: &str, url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("{} '{}' must be an http(s) url", field, url);
    }
    Ok(())
}
