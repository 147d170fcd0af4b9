//! # MetaBrainz notification client
//!
//! Obtains an OAuth2 client-credentials token, caches it for the lifetime
//! the token endpoint reports, and posts notification batches to the
//! MetaBrainz notification API.
//!
//! Modules:
//! - `config` — YAML config, env expansion and validation
//! - `cache` — token store trait with in-memory and Redis backends
//! - `sources` — OAuth2 token provider
//! - `notify` — notification records and the sender

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod notify;
pub mod sources;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::cache::store::TokenStore;
pub use crate::config::settings::{OAuthConfig, ServiceConfig};
pub use crate::error::NotifyError;
pub use crate::notify::{Notification, NotificationRecord, NotificationSender};
pub use crate::sources::oauth2::TokenProvider;
