use std::future::Future;

use crate::error::NotifyError;

/// Key-value collaborator holding the bearer token between calls.
///
/// `get` returns `None` for missing or expired entries; `set` stores the
/// value for `ttl_secs` seconds.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, NotifyError>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
