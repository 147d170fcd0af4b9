pub mod memory;
pub mod redis_store;
pub mod store;
pub mod token;

use crate::config::settings::{CacheConfig, CacheType};
use crate::error::NotifyError;
use memory::MemoryTokenStore;
use redis_store::RedisTokenStore;
use store::TokenStore;

/// Token store selected by configuration
#[derive(Debug, Clone)]
pub enum CacheBackend {
    Memory(MemoryTokenStore),
    Redis(RedisTokenStore),
}

impl TokenStore for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, NotifyError> {
        match self {
            CacheBackend::Memory(s) => s.get(key).await,
            CacheBackend::Redis(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), NotifyError> {
        match self {
            CacheBackend::Memory(s) => s.set(key, value, ttl_secs).await,
            CacheBackend::Redis(s) => s.set(key, value, ttl_secs).await,
        }
    }
}

pub fn build_store(cfg: &CacheConfig) -> Result<CacheBackend, NotifyError> {
    match cfg.cache_type {
        CacheType::Memory => Ok(CacheBackend::Memory(MemoryTokenStore::new())),
        CacheType::Redis => {
            let url = cfg
                .url
                .as_deref()
                .ok_or_else(|| NotifyError::Cache("redis cache requires 'url'".to_owned()))?;
            Ok(CacheBackend::Redis(RedisTokenStore::open(url)?))
        }
    }
}
