//! Operation application.

use crate::state::Snapshot;
use crate::types::Operation;

/// Apply an operation to a snapshot in place.
///
/// Both variants are idempotent, and a layer never holds a key as both an
/// entry and a tombstone.
pub fn apply_operation(snapshot: &mut Snapshot, operation: &Operation) {
    match operation {
        Operation::Set { key, value } => {
            snapshot.tombstones.remove(key);
            snapshot.entries.insert(key.clone(), value.clone());
        }

        Operation::Delete { key } => {
            snapshot.entries.remove(key);
            snapshot.tombstones.insert(key.clone());
        }
    }
}
