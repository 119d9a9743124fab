//! Hot-reloadable account store wrapper.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::AuthError;
use crate::record::AccountRecord;
use crate::traits::AccountStore;

/// A wrapper that allows hot-swapping the underlying account store.
///
/// This is useful for reloading config-file accounts on SIGHUP without
/// restarting the gateway. Uses `parking_lot::RwLock` which doesn't poison
/// on panic.
///
/// # Example
/// ```
/// use blitz_auth::{AccountRecord, MemoryStore, ReloadableStore};
///
/// let store = ReloadableStore::new(MemoryStore::from_records([
///     AccountRecord::new("alice", "initial"),
/// ]));
///
/// // Later, reload with a fresh account table
/// store.reload(MemoryStore::from_records([
///     AccountRecord::new("alice", "rotated"),
/// ]));
/// ```
pub struct ReloadableStore {
    inner: RwLock<Arc<dyn AccountStore>>,
}

impl ReloadableStore {
    /// Create a new reloadable store with the given initial backend.
    pub fn new<S: AccountStore + 'static>(store: S) -> Self {
        Self {
            inner: RwLock::new(Arc::new(store)),
        }
    }

    /// Replace the store with a new one.
    ///
    /// This is an atomic swap: in-flight lookups complete against the old
    /// store, new lookups see the new one.
    pub fn reload<S: AccountStore + 'static>(&self, store: S) {
        let mut inner = self.inner.write();
        *inner = Arc::new(store);
    }

    /// Replace the store with a pre-wrapped Arc.
    pub fn reload_arc(&self, store: Arc<dyn AccountStore>) {
        let mut inner = self.inner.write();
        *inner = store;
    }

    /// Get a clone of the current store Arc.
    #[inline]
    pub fn get(&self) -> Arc<dyn AccountStore> {
        self.inner.read().clone()
    }
}

// Cannot derive Debug due to dyn AccountStore
impl std::fmt::Debug for ReloadableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadableStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl AccountStore for ReloadableStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<AccountRecord>, AuthError> {
        // Clone the Arc so we don't hold the lock across await
        let store = self.get();
        store.find_by_identity(identity).await
    }
}
