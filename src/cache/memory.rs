use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cache::store::TokenStore;
use crate::error::NotifyError;
use crate::helpers::time::now_millis;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at_ms: i64,
}

/// In-process token cache: key -> value with expiration
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Expiration of a live entry, unix millis
    pub async fn expires_at_ms(&self, key: &str) -> Option<i64> {
        let map = self.inner.read().await;
        map.get(key)
            .filter(|e| now_millis() < e.expires_at_ms)
            .map(|e| e.expires_at_ms)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NotifyError> {
        let map = self.inner.read().await;
        Ok(map.get(key)
            .filter(|e| now_millis() < e.expires_at_ms)
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), NotifyError> {
        let ttl_ms = i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        let entry = Entry {
            value: value.to_owned(),
            expires_at_ms: now_millis().saturating_add(ttl_ms),
        };
        let mut map = self.inner.write().await;
        // drop whatever already expired while we hold the write lock
        let now = now_millis();
        map.retain(|_, e| now < e.expires_at_ms);
        map.insert(key.to_owned(), entry);
        Ok(())
    }
}
