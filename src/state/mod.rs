//! Layered state with per-transaction snapshots.
//!
//! Each open transaction owns one snapshot layered over its parent's. Reads
//! walk the chain from the innermost layer outward, so an inner entry or
//! tombstone always shadows whatever the enclosing layers hold.

mod chain;
mod operations;

pub use chain::{Snapshot, StateChain};
pub use operations::apply_operation;
