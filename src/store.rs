//! Main Store struct tying the state chain and transaction logs together.

use crate::state::StateChain;
use crate::transactions::TransactionChain;
use crate::types::{Operation, StoreStats};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Store configuration.
///
/// Both values are allocation hints and never change behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Nested snapshot layers to preallocate.
    pub snapshot_capacity: usize,

    /// Operations to preallocate in each new transaction log.
    pub log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_capacity: 8,
            log_capacity: 16,
        }
    }
}

/// In-memory key-value store with nested transactions.
///
/// Writes always land in the innermost snapshot. While a transaction is open
/// they are also recorded in its log; committing discards the transaction's
/// snapshot and replays the log onto the enclosing one.
#[derive(Debug)]
pub struct Store {
    /// Snapshot per open transaction, plus the base.
    state: StateChain,

    /// Operation log per open transaction.
    transactions: TransactionChain,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    /// Create an empty store.
    pub fn new(config: StoreConfig) -> Self {
        let state = StateChain::new(config.snapshot_capacity);
        let transactions = TransactionChain::new(config.log_capacity);

        Self {
            state,
            transactions,
        }
    }

    // --- Transaction Lifecycle ---

    /// Open a nested transaction.
    pub fn begin(&mut self) {
        let depth = self.transactions.begin();
        let snapshot = self.state.push();
        debug!(depth, snapshot = ?snapshot, "begin transaction");
        self.check_depth();
    }

    /// Commit the innermost transaction into its enclosing scope.
    ///
    /// The transaction's snapshot is discarded and its recorded operations
    /// are replayed, in order, against the enclosing snapshot. If another
    /// transaction is still open, the replayed operations join its log so a
    /// later commit carries them further out.
    ///
    /// Returns `false` if no transaction is open.
    pub fn commit(&mut self) -> bool {
        let Some(log) = self.transactions.pop() else {
            debug!("commit with no open transaction");
            return false;
        };

        let popped = self.state.pop();
        debug_assert!(popped.is_some(), "open transaction without a snapshot");
        for operation in log.operations() {
            self.state.apply(operation);
        }

        let operations = log.len();
        if let Some(parent) = self.transactions.current_mut() {
            parent.extend(log);
        }

        debug!(
            depth = self.transactions.depth(),
            operations, "commit transaction"
        );
        self.check_depth();
        true
    }

    /// Discard the innermost transaction and everything it wrote.
    ///
    /// Returns `false` if no transaction is open.
    pub fn rollback(&mut self) -> bool {
        let Some(log) = self.transactions.pop() else {
            debug!("rollback with no open transaction");
            return false;
        };

        let popped = self.state.pop();
        debug_assert!(popped.is_some(), "open transaction without a snapshot");

        debug!(
            depth = self.transactions.depth(),
            discarded = log.len(),
            "rollback transaction"
        );
        self.check_depth();
        true
    }

    /// Whether any transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.transactions.is_open()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.transactions.depth()
    }

    // --- Operations ---

    /// Record an operation in the innermost transaction's log.
    ///
    /// Does nothing outside a transaction. Recording does not apply the
    /// operation; see [`Store::apply`] and [`Store::execute`].
    pub fn append_operation(&mut self, operation: Operation) {
        if self.transactions.record(operation) {
            trace!(
                pending = self.transactions.current().map_or(0, |log| log.len()),
                "recorded operation"
            );
        }
    }

    /// Apply an operation to the innermost snapshot without recording it.
    pub fn apply(&mut self, operation: &Operation) {
        trace!(key = operation.key(), "apply operation");
        self.state.apply(operation);
    }

    /// Record an operation and apply it immediately.
    pub fn execute(&mut self, operation: Operation) {
        self.apply(&operation);
        self.append_operation(operation);
    }

    /// Set `key` to `value` in the current scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.execute(Operation::set(key, value));
    }

    /// Delete `key` in the current scope.
    pub fn delete(&mut self, key: impl Into<String>) {
        self.execute(Operation::delete(key));
    }

    // --- Queries ---

    /// Visible value of `key`, or `None` if it is unset or deleted.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.state.get(key)
    }

    /// Number of distinct visible keys whose value equals `value`.
    pub fn count(&self, value: &str) -> usize {
        self.state.count(value)
    }

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            depth: self.state.depth(),
            open_transactions: self.transactions.depth(),
            pending_operations: self.transactions.pending_operations(),
            visible_keys: self.state.visible_keys(),
        }
    }

    fn check_depth(&self) {
        debug_assert_eq!(self.state.depth(), self.transactions.depth() + 1);
    }
}

/// Thread-safe handle to a [`Store`].
///
/// Every call takes one exclusive lock over the whole store, so each method
/// is a single atomic transition and no caller can observe a chain
/// mid-update. Clones share the same store.
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Store::new(config))),
        }
    }

    /// Run several calls under one lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    pub fn commit(&self) -> bool {
        self.inner.lock().commit()
    }

    pub fn rollback(&self) -> bool {
        self.inner.lock().rollback()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).map(str::to_string)
    }

    pub fn count(&self, value: &str) -> usize {
        self.inner.lock().count(value)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.lock().set(key, value);
    }

    pub fn delete(&self, key: impl Into<String>) {
        self.inner.lock().delete(key);
    }

    pub fn execute(&self, operation: Operation) {
        self.inner.lock().execute(operation);
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.lock().stats()
    }
}
