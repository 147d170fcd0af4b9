//! Shared constants and defaults

pub const DEFAULT_CONFIG_PATH: &str = "metabrainz-notify.yaml";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// OAuth2
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const NOTIFICATION_SCOPE: &str = "notification";
pub const TOKEN_CACHE_KEY: &str = "metabrainz_notification_token";

// Notification API
pub const DEFAULT_NOTIFICATION_BASE_URL: &str = "https://metabrainz.org/notification";
pub const SEND_PATH: &str = "/send";

// Notification record defaults
pub const DEFAULT_FROM_ADDR: &str = "BookBrainz <noreply@bookbrainz.org>";
pub const DEFAULT_PROJECT: &str = "bookbrainz";
pub const DEFAULT_EXPIRE_AGE: u32 = 7;

// Env variables for credentials
pub const ENV_OAUTH_CLIENT_ID: &str = "OAUTH_CLIENT_ID";
pub const ENV_OAUTH_CLIENT_SECRET: &str = "OAUTH_CLIENT_SECRET";
pub const ENV_OAUTH_TOKEN_URL: &str = "OAUTH_TOKEN_URL";
