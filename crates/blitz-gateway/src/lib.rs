//! Blitz-gate HTTP gateway library.
//!
//! This module exposes the gateway implementation for use by integration
//! tests and potential embedding scenarios.

pub mod cli;
mod error;
mod handler;
mod server;
mod state;

pub use cli::GatewayArgs;
pub use error::GatewayError;
pub use handler::{AuthRequest, AuthResponse};
pub use server::{run_with_shutdown, serve};
pub use state::AppState;
pub use tokio_util::sync::CancellationToken;
