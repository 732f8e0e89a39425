//! Snapshot chain implementation.

use crate::state::apply_operation;
use crate::types::{Operation, SnapshotId};
use std::collections::{HashMap, HashSet};

/// One layer of local state.
///
/// Holds only what was written at this layer: values set here and keys
/// deleted here. Everything else is inherited from the enclosing snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) entries: HashMap<String, String>,
    pub(crate) tombstones: HashSet<String>,
}

/// What a single layer says about a key.
enum Resolution<'a> {
    Value(&'a str),
    Deleted,
    Inherited,
}

impl Snapshot {
    /// Value set at this layer, ignoring ancestors.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` was deleted at this layer.
    pub fn is_tombstoned(&self, key: &str) -> bool {
        self.tombstones.contains(key)
    }

    /// Number of entries local to this layer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was written or deleted at this layer.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.tombstones.is_empty()
    }

    fn resolve(&self, key: &str) -> Resolution<'_> {
        // Entries and tombstones are disjoint within a layer.
        if let Some(value) = self.entries.get(key) {
            Resolution::Value(value)
        } else if self.tombstones.contains(key) {
            Resolution::Deleted
        } else {
            Resolution::Inherited
        }
    }
}

/// Stack of snapshots, one per open transaction plus the base.
///
/// Snapshots live in an arena indexed by [`SnapshotId`]; the parent of a
/// snapshot is the one directly below it, and only the head is ever pushed
/// or popped. The base snapshot is never popped.
#[derive(Clone, Debug)]
pub struct StateChain {
    layers: Vec<Snapshot>,
}

impl Default for StateChain {
    fn default() -> Self {
        Self::new(0)
    }
}

impl StateChain {
    /// Create a chain holding only an empty base snapshot.
    ///
    /// `capacity` preallocates room for that many nested layers.
    pub fn new(capacity: usize) -> Self {
        let mut layers = Vec::with_capacity(capacity + 1);
        layers.push(Snapshot::default());
        Self { layers }
    }

    /// Id of the innermost snapshot.
    pub fn head(&self) -> SnapshotId {
        SnapshotId(self.layers.len() - 1)
    }

    /// Number of snapshots, including the base.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// The innermost snapshot, where writes land.
    pub fn current(&self) -> &Snapshot {
        // The base layer is never popped, so the arena is never empty.
        &self.layers[self.layers.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Snapshot {
        let head = self.layers.len() - 1;
        &mut self.layers[head]
    }

    /// Apply an operation to the innermost snapshot.
    ///
    /// The base has no ancestors to hide, so a delete there leaves no
    /// tombstone behind.
    pub fn apply(&mut self, operation: &Operation) {
        let on_base = self.head().is_base();
        let snapshot = self.current_mut();
        apply_operation(snapshot, operation);

        if let (true, Operation::Delete { key }) = (on_base, operation) {
            snapshot.tombstones.remove(key);
        }
    }

    /// Push an empty snapshot on top of the current head.
    pub fn push(&mut self) -> SnapshotId {
        self.layers.push(Snapshot::default());
        self.head()
    }

    /// Pop the innermost snapshot, returning it.
    ///
    /// Returns `None` when only the base remains.
    pub fn pop(&mut self) -> Option<Snapshot> {
        if self.head().is_base() {
            return None;
        }
        self.layers.pop()
    }

    /// Walk the chain from the head to the base, following parent links.
    pub fn iter_from_head(&self) -> impl Iterator<Item = (SnapshotId, &Snapshot)> + '_ {
        std::iter::successors(Some(self.head()), |id| id.parent())
            .map(move |id| (id, &self.layers[id.0]))
    }

    /// Resolve the visible value of `key`.
    ///
    /// The nearest layer with an opinion about the key decides: an entry is
    /// returned, a tombstone hides everything further out.
    pub fn get(&self, key: &str) -> Option<&str> {
        for (_, snapshot) in self.iter_from_head() {
            match snapshot.resolve(key) {
                Resolution::Value(value) => return Some(value),
                Resolution::Deleted => return None,
                Resolution::Inherited => {}
            }
        }
        None
    }

    /// Count distinct visible keys whose visible value equals `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.visible(|value| value == needle)
    }

    /// Count all distinct visible keys.
    pub fn visible_keys(&self) -> usize {
        self.visible(|_| true)
    }

    fn visible(&self, mut matches: impl FnMut(&str) -> bool) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut result = 0;

        for (_, snapshot) in self.iter_from_head() {
            for (key, value) in &snapshot.entries {
                if seen.insert(key.as_str()) && matches(value.as_str()) {
                    result += 1;
                }
            }
            // Deleted keys are claimed so ancestor values stay hidden.
            for key in &snapshot.tombstones {
                seen.insert(key.as_str());
            }
        }

        result
    }
}
