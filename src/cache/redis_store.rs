use std::fmt;
use std::sync::Arc;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::cache::store::TokenStore;
use crate::error::NotifyError;

/// Token cache backed by a shared Redis instance.
///
/// Values are stored JSON-encoded so other consumers of the same key read
/// a JSON string rather than a raw one. The multiplexed connection is opened
/// on first use and shared by all clones of the store.
#[derive(Clone)]
pub struct RedisTokenStore {
    client: Client,
    conn: Arc<OnceCell<MultiplexedConnection>>,
}

impl RedisTokenStore {
    pub fn open(url: &str) -> Result<Self, NotifyError> {
        let client = Client::open(url)?;
        Ok(Self { client, conn: Arc::new(OnceCell::new()) })
    }

    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }

    async fn connection(&self) -> Result<MultiplexedConnection, NotifyError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                debug!("opening redis connection");
                self.client.get_multiplexed_async_connection().await
            })
            .await?;
        Ok(conn.clone())
    }
}

impl fmt::Debug for RedisTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisTokenStore")
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl TokenStore for RedisTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, NotifyError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key).await?;

        raw.map(|json| {
            serde_json::from_str::<String>(&json)
                .map_err(|e| NotifyError::Cache(format!("decode '{}': {}", key, e)))
        })
        .transpose()
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), NotifyError> {
        let json = serde_json::to_string(value)
            .map_err(|e| NotifyError::Cache(format!("encode '{}': {}", key, e)))?;

        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, json, ttl_secs).await?;
        debug!("cached '{}' in redis for {}s", key, ttl_secs);
        Ok(())
    }
}
