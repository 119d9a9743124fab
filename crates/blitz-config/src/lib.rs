//! Configuration loading and CLI definitions for blitz-gate.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{apply_overrides, CliOverrides};
pub use loader::{load_config, ConfigError};
pub use types::{
    AccountEntry, AuthConfig, Config, LoggingConfig, MetricsConfig, ServerConfig,
};
pub use validate::validate_config;
