//! FILENAME: core/engine/src/undo.rs
//! PURPOSE: Undo/Redo history for merge and unmerge actions (Command Pattern).
//! CONTEXT: Entries reference arena slots by `RegionId`, never by position in
//! the live list, so they stay valid across unrelated removals. Regions loaded
//! from configuration are never recorded here.

use std::collections::VecDeque;

use crate::collection::{MergedCellsCollection, RegionId};
use crate::coord::GridSize;
use crate::error::MergeError;

/// Maximum number of undo operations to keep in history.
const MAX_HISTORY_SIZE: usize = 100;

/// A single reversible change to the merged-cells collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeChange {
    /// The region in this slot was created by a merge.
    Merged { id: RegionId },
    /// The region in this slot was dissolved by an unmerge.
    Unmerged { id: RegionId },
}

impl MergeChange {
    /// The change that reverts this one.
    pub fn inverse(&self) -> MergeChange {
        match *self {
            MergeChange::Merged { id } => MergeChange::Unmerged { id },
            MergeChange::Unmerged { id } => MergeChange::Merged { id },
        }
    }

    /// Replays this change on `merged`.
    /// Returns `Ok(false)` when the slot can no longer be brought back or was
    /// already in the requested state.
    pub fn apply(&self, merged: &mut MergedCellsCollection, bounds: GridSize) -> Result<bool, MergeError> {
        match *self {
            MergeChange::Merged { id } => {
                if merged.get(id).is_some() {
                    return Ok(false);
                }
                merged.revive(id, bounds)
            }
            MergeChange::Unmerged { id } => Ok(merged.remove(id).is_some()),
        }
    }
}

/// A transaction groups multiple changes into one undoable action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Human-readable description (e.g., "Merge B2:C3", "Unmerge all")
    pub description: String,
    /// The individual changes in this transaction (in order applied)
    pub changes: Vec<MergeChange>,
}

impl Transaction {
    pub fn new(description: impl Into<String>) -> Self {
        Transaction {
            description: description.into(),
            changes: Vec::new(),
        }
    }

    pub fn add_change(&mut self, change: MergeChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Receiver of reversible actions. Hosts with their own undo engine can
/// implement this; `UndoStack` is the built-in implementation.
pub trait UndoRegistrar {
    fn register(&mut self, description: &str, change: MergeChange);
}

/// The history stack for undo/redo operations.
#[derive(Debug)]
pub struct UndoStack {
    /// Completed transactions that can be undone (most recent at back)
    undo_stack: VecDeque<Transaction>,
    /// Transactions that were undone and can be redone (most recent at back)
    redo_stack: VecDeque<Transaction>,
    /// Currently open transaction being built (for batching)
    current_transaction: Option<Transaction>,
    max_size: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack::with_max_size(MAX_HISTORY_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        UndoStack {
            undo_stack: VecDeque::with_capacity(max_size),
            redo_stack: VecDeque::with_capacity(max_size),
            current_transaction: None,
            max_size,
        }
    }

    /// Begin a new transaction for batching multiple changes.
    /// If a transaction is already open, this is a no-op (nested calls ignored).
    pub fn begin_transaction(&mut self, description: impl Into<String>) {
        if self.current_transaction.is_none() {
            self.current_transaction = Some(Transaction::new(description));
        }
    }

    /// Commit the current transaction to the undo stack.
    /// Empty transactions are discarded.
    pub fn commit_transaction(&mut self) {
        if let Some(transaction) = self.current_transaction.take() {
            if !transaction.is_empty() {
                self.push_transaction(transaction);
            }
        }
    }

    pub fn cancel_transaction(&mut self) {
        self.current_transaction = None;
    }

    /// Record a change. If a transaction is open, add to it.
    /// Otherwise, create a single-change transaction.
    pub fn record(&mut self, description: &str, change: MergeChange) {
        if let Some(ref mut transaction) = self.current_transaction {
            transaction.add_change(change);
        } else {
            let mut transaction = Transaction::new(description);
            transaction.add_change(change);
            self.push_transaction(transaction);
        }
    }

    fn push_transaction(&mut self, transaction: Transaction) {
        // A new action invalidates everything that was undone
        self.redo_stack.clear();

        while self.undo_stack.len() >= self.max_size {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(transaction);
    }

    /// Push a transaction to undo stack without clearing redo.
    /// Used by the redo operation.
    pub fn push_undo_for_redo(&mut self, transaction: Transaction) {
        while self.undo_stack.len() >= self.max_size {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(transaction);
    }

    pub fn pop_undo(&mut self) -> Option<Transaction> {
        self.undo_stack.pop_back()
    }

    pub fn push_redo(&mut self, transaction: Transaction) {
        while self.redo_stack.len() >= self.max_size {
            self.redo_stack.pop_front();
        }
        self.redo_stack.push_back(transaction);
    }

    pub fn pop_redo(&mut self) -> Option<Transaction> {
        self.redo_stack.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get description of next undo action (for UI).
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|t| t.description.as_str())
    }

    /// Get description of next redo action (for UI).
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|t| t.description.as_str())
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_transaction = None;
    }

    /// Current (undo, redo) stack sizes.
    pub fn stack_sizes(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRegistrar for UndoStack {
    fn register(&mut self, description: &str, change: MergeChange) {
        self.record(description, change);
    }
}
