//! Authorization decision engine for blitz-gate.
//!
//! This crate owns all admission policy: credential comparison with timing
//! mitigation, account lifecycle (blocked / expired), and quota accounting.
//! Storage is abstracted behind [`AccountStore`] so the engine can run
//! against SQL, an in-memory table, or a test fake without changes.
//!
//! # Example
//!
//! ```
//! use blitz_auth::{AccountRecord, DecisionEngine, MemoryStore};
//!
//! # async fn example() {
//! let store = MemoryStore::from_records([AccountRecord::new("alice", "s3cret")]);
//! let engine = DecisionEngine::new(store);
//!
//! let decision = engine.authorize("alice:s3cret").await;
//! assert_eq!(decision.identity(), Some("alice"));
//! # }
//! ```

mod credential;
mod decision;
mod engine;
mod error;
mod memory;
mod record;
mod reloadable;
pub mod sql;
mod traits;

pub use credential::{split_pair, PAIR_DELIMITER};
pub use decision::Decision;
pub use engine::{DecisionEngine, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MISMATCH_DELAY};
pub use error::AuthError;
pub use memory::MemoryStore;
pub use record::{AccountRecord, CREATED_ON_FORMAT};
pub use reloadable::ReloadableStore;
pub use sql::{SqlStore, SqlStoreConfig};
pub use traits::AccountStore;
