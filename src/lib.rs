//! # txkv
//!
//! An in-memory key-value store with nested transactions.
//!
//! ## Core Concepts
//!
//! - **Snapshots**: One layer of local writes per open transaction, stacked
//!   over the base layer
//! - **Tombstones**: Deletions recorded per layer so enclosing values stay
//!   hidden
//! - **Transaction logs**: Operations recorded per transaction and replayed
//!   onto the enclosing layer at commit
//!
//! ## Example
//!
//! ```
//! use txkv::Store;
//!
//! let mut store = Store::default();
//! store.set("a", "10");
//!
//! store.begin();
//! store.delete("a");
//! assert_eq!(store.get("a"), None);
//!
//! store.begin();
//! store.set("a", "20");
//! assert!(store.commit());
//! assert_eq!(store.get("a"), Some("20"));
//!
//! assert!(store.rollback());
//! assert_eq!(store.get("a"), Some("10"));
//! assert!(!store.rollback());
//! ```

pub mod config;
pub mod error;
pub mod shell;
pub mod state;
pub mod store;
pub mod transactions;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Result, StoreError};
pub use shell::{Command, Output, Shell, ShellConfig};
pub use state::{apply_operation, Snapshot, StateChain};
pub use store::{SharedStore, Store, StoreConfig};
pub use transactions::{TransactionChain, TransactionLog};
pub use types::*;
