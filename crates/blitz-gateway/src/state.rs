//! Gateway state shared across requests.

use std::sync::Arc;

use blitz_auth::{DecisionEngine, ReloadableStore};

/// The engine type used by the gateway: decision logic over a hot-swappable
/// account store.
pub type GatewayEngine = DecisionEngine<Arc<ReloadableStore>>;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<GatewayEngine>,
}
