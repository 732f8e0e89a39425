//! Transaction log chain.

use crate::types::Operation;

/// Ordered record of the mutating operations issued in one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionLog {
    operations: Vec<Operation>,
}

impl TransactionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            operations: Vec::with_capacity(capacity),
        }
    }

    /// Recorded operations in issue order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Append another log's operations after this one's.
    pub fn extend(&mut self, other: TransactionLog) {
        self.operations.extend(other.operations);
    }
}

/// Stack of transaction logs mirroring transaction nesting.
///
/// The log below the head belongs to the enclosing transaction. An empty
/// chain means no transaction is open.
#[derive(Clone, Debug, Default)]
pub struct TransactionChain {
    logs: Vec<TransactionLog>,
    log_capacity: usize,
}

impl TransactionChain {
    /// Create an empty chain.
    ///
    /// `log_capacity` preallocates each new transaction's operation list.
    pub fn new(log_capacity: usize) -> Self {
        Self {
            logs: Vec::new(),
            log_capacity,
        }
    }

    /// Open a nested transaction. Returns the new nesting depth.
    pub fn begin(&mut self) -> usize {
        self.logs.push(TransactionLog::with_capacity(self.log_capacity));
        self.logs.len()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.logs.len()
    }

    pub fn is_open(&self) -> bool {
        !self.logs.is_empty()
    }

    /// Log of the innermost transaction.
    pub fn current(&self) -> Option<&TransactionLog> {
        self.logs.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut TransactionLog> {
        self.logs.last_mut()
    }

    /// Record an operation in the innermost transaction.
    ///
    /// Returns `false` without recording when no transaction is open.
    pub fn record(&mut self, operation: Operation) -> bool {
        match self.current_mut() {
            Some(log) => {
                log.push(operation);
                true
            }
            None => false,
        }
    }

    /// Close the innermost transaction, handing back its log.
    pub fn pop(&mut self) -> Option<TransactionLog> {
        self.logs.pop()
    }

    /// Total operations recorded across every open transaction.
    pub fn pending_operations(&self) -> usize {
        self.logs.iter().map(TransactionLog::len).sum()
    }
}
