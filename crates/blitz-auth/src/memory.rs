//! In-memory account store.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::record::AccountRecord;
use crate::traits::AccountStore;

/// Simple in-memory account store backed by a hash map.
///
/// This is suitable for small deployments with accounts declared in the
/// config file, and for tests. For dynamic account management or large
/// account bases, use [`SqlStore`](crate::SqlStore).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: HashMap<String, AccountRecord>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a set of records, keyed by identity.
    ///
    /// # Example
    /// ```
    /// use blitz_auth::{AccountRecord, MemoryStore};
    ///
    /// let store = MemoryStore::from_records([
    ///     AccountRecord::new("alice", "s3cret"),
    ///     AccountRecord::new("bob", "hunter2"),
    /// ]);
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AccountRecord>,
    {
        let accounts = records
            .into_iter()
            .map(|r| (r.identity.clone(), r))
            .collect();
        Self { accounts }
    }

    /// Insert a record, replacing any existing one with the same identity.
    #[inline]
    pub fn insert(&mut self, record: AccountRecord) {
        self.accounts.insert(record.identity.clone(), record);
    }

    /// Remove a record by identity.
    #[inline]
    pub fn remove(&mut self, identity: &str) -> bool {
        self.accounts.remove(identity).is_some()
    }

    /// Get the number of stored accounts.
    #[inline]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if no accounts are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Check if an identity is present.
    #[inline]
    pub fn contains(&self, identity: &str) -> bool {
        self.accounts.contains_key(identity)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self.accounts.get(identity).cloned())
    }
}
