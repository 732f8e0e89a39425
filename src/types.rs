//! Core types for the key-value store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a snapshot in the state chain.
///
/// The base snapshot is `SnapshotId(0)`; each `begin` pushes the next id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnapshotId(pub usize);

impl SnapshotId {
    /// The always-present base snapshot.
    pub const BASE: SnapshotId = SnapshotId(0);

    pub fn parent(self) -> Option<Self> {
        if self.0 > 0 {
            Some(SnapshotId(self.0 - 1))
        } else {
            None
        }
    }

    pub fn is_base(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotId({})", self.0)
    }
}

/// A mutating operation on the store.
///
/// Operations are recorded in the active transaction's log and replayed
/// against the enclosing snapshot when that transaction commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Bind a key to a value in the current layer.
    Set { key: String, value: String },

    /// Remove a key, shadowing any value held by enclosing layers.
    Delete { key: String },
}

impl Operation {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Operation::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Operation::Delete { key: key.into() }
    }

    /// The key this operation touches.
    pub fn key(&self) -> &str {
        match self {
            Operation::Set { key, .. } | Operation::Delete { key } => key,
        }
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of snapshots in the state chain (open transactions + 1).
    pub depth: usize,
    /// Number of begun but not yet committed or rolled back transactions.
    pub open_transactions: usize,
    /// Operations recorded across all open transaction logs.
    pub pending_operations: usize,
    /// Distinct keys currently visible to readers.
    pub visible_keys: usize,
}
