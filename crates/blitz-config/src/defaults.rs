//! Default value functions for serde deserialization.

/// Listen address of the original auth service; kept for drop-in deployment.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:28262";
/// HTTP path the upstream proxy posts authorization requests to.
pub const DEFAULT_AUTH_PATH: &str = "/auth";
/// Fixed delay applied on credential mismatch (seconds).
pub const DEFAULT_MISMATCH_DELAY_SECS: u64 = 5;
/// Store lookup deadline (seconds).
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;
/// Database pool sizing.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

pub(crate) fn default_auth_path() -> String {
    DEFAULT_AUTH_PATH.to_string()
}

pub(crate) fn default_mismatch_delay_secs() -> u64 {
    DEFAULT_MISMATCH_DELAY_SECS
}

pub(crate) fn default_lookup_timeout_secs() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

pub(crate) fn default_db_max_connections() -> u32 {
    DEFAULT_DB_MAX_CONNECTIONS
}

pub(crate) fn default_db_min_connections() -> u32 {
    DEFAULT_DB_MIN_CONNECTIONS
}

pub(crate) fn default_db_connect_timeout_secs() -> u64 {
    DEFAULT_DB_CONNECT_TIMEOUT_SECS
}
