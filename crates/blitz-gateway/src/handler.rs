//! Authorization endpoint handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use blitz_metrics::{
    record_auth_accepted, record_auth_rejected, record_auth_request, record_decision_duration,
};

use crate::state::AppState;

/// Authorization request, as posted by the upstream proxy.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    /// Caller-supplied source address. Informational only, unused by policy.
    #[serde(default)]
    pub addr: String,
    /// Combined `identity:secret` credential pair.
    pub auth: String,
    /// Usage delta for this admission attempt. Accepted but not enforced
    /// against the quota; accounting runs through a separate write path.
    #[serde(default)]
    pub tx: u64,
}

/// Authorization response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub ok: bool,
    /// Resolved identity; empty when `ok` is false.
    pub id: String,
}

/// POST handler for the authorization endpoint.
///
/// Every outcome is an HTTP 200 with `ok` true or false — failure causes are
/// indistinguishable on the wire. Only malformed request framing surfaces as
/// a protocol-level error (400), handled by axum's JSON extractor.
pub async fn handle_auth(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> Json<AuthResponse> {
    record_auth_request();
    debug!(addr = %req.addr, tx = req.tx, "authorization request");

    let start = Instant::now();
    let decision = state.engine.authorize(&req.auth).await;
    record_decision_duration(start.elapsed().as_secs_f64());

    match decision.identity() {
        Some(identity) => {
            record_auth_accepted();
            debug!(%identity, "request accepted");
            Json(AuthResponse {
                ok: true,
                id: identity.to_string(),
            })
        }
        None => {
            record_auth_rejected();
            Json(AuthResponse {
                ok: false,
                id: String::new(),
            })
        }
    }
}
