//! Configuration validation logic.

use crate::loader::ConfigError;
use crate::Config;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Validation("server.listen is empty".into()));
    }
    if !config.server.auth_path.starts_with('/') {
        return Err(ConfigError::Validation(
            "server.auth_path must start with '/'".into(),
        ));
    }
    if config.auth.accounts.is_empty() && config.auth.database_url.is_none() {
        return Err(ConfigError::Validation(
            "auth: at least one of 'accounts' or 'database_url' must be set".into(),
        ));
    }
    if let Some(url) = &config.auth.database_url {
        if url.trim().is_empty() {
            return Err(ConfigError::Validation("auth.database_url is empty".into()));
        }
    }
    if config.auth.lookup_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "auth.lookup_timeout_secs must be > 0".into(),
        ));
    }
    if config.auth.db_max_connections == 0 {
        return Err(ConfigError::Validation(
            "auth.db_max_connections must be > 0".into(),
        ));
    }
    for entry in &config.auth.accounts {
        if entry.identity.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.accounts: identity is empty".into(),
            ));
        }
        if entry.max_usage_bytes < 0 || entry.expiration_days < 0 {
            return Err(ConfigError::Validation(format!(
                "auth.accounts: negative limit for '{}'",
                entry.identity
            )));
        }
    }
    Ok(())
}
