//! Gateway error types.

use blitz_auth::AuthError;
use blitz_metrics::{ERROR_AUTH, ERROR_CONFIG, ERROR_IO};

/// Gateway error type.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("auth: {0}")]
    Auth(#[from] AuthError),
    #[error("config: {0}")]
    Config(String),
}

impl GatewayError {
    /// Get the error type string for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            GatewayError::Io(_) => ERROR_IO,
            GatewayError::Auth(_) => ERROR_AUTH,
            GatewayError::Config(_) => ERROR_CONFIG,
        }
    }
}
