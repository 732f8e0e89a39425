//! Transaction logs.
//!
//! Every open transaction keeps the ordered list of operations issued since
//! its `begin`. Commit replays that list onto the enclosing scope.

mod log;

pub use log::{TransactionChain, TransactionLog};
