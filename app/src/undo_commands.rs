// FILENAME: app/src/undo_commands.rs
// PURPOSE: Commands for undo/redo of merge and unmerge actions.

use crate::{log_debug, log_info, log_warn, AppState};
use merge_engine::{MergeChange, MergeRegion, Transaction};
use serde::Serialize;

/// Result of an undo/redo operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoResult {
    /// Whether a transaction was replayed
    pub success: bool,
    /// Description of what was undone/redone
    pub description: Option<String>,
    /// Number of changes that could be applied
    pub applied: usize,
    pub merged_regions: Vec<MergeRegion>,
    /// Whether more undo operations are available
    pub can_undo: bool,
    /// Whether more redo operations are available
    pub can_redo: bool,
}

/// Get current undo/redo state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_description: Option<String>,
    pub redo_description: Option<String>,
}

/// Begin a transaction for batching multiple merges.
pub fn begin_undo_transaction(state: &mut AppState, description: String) {
    state.undo_stack.begin_transaction(description);
}

/// Commit the current transaction.
pub fn commit_undo_transaction(state: &mut AppState) {
    state.undo_stack.commit_transaction();
}

/// Cancel the current transaction.
pub fn cancel_undo_transaction(state: &mut AppState) {
    state.undo_stack.cancel_transaction();
}

/// Forget all undo/redo history. With nothing left to revive, unmerged and
/// dropped regions are released from the collection.
pub fn clear_undo_history(state: &mut AppState) {
    state.undo_stack.clear();
    state.merged_regions.compact();
    log_debug!("UNDO", "History cleared ({} regions kept)", state.merged_regions.len());
}

/// Get current undo/redo state for UI.
pub fn get_undo_state(state: &AppState) -> UndoState {
    UndoState {
        can_undo: state.undo_stack.can_undo(),
        can_redo: state.undo_stack.can_redo(),
        undo_description: state.undo_stack.undo_description().map(String::from),
        redo_description: state.undo_stack.redo_description().map(String::from),
    }
}

/// Apply `changes` in the given order, skipping the ones that no longer fit.
fn replay<'a>(state: &mut AppState, changes: impl Iterator<Item = &'a MergeChange>) -> usize {
    let mut applied = 0;
    for change in changes {
        match change.apply(&mut state.merged_regions, state.grid_size) {
            Ok(true) => applied += 1,
            Ok(false) => log_debug!("UNDO", "Skipped {:?}: region no longer exists", change),
            Err(e) => log_warn!("UNDO", "Skipped {:?}: {}", change, e),
        }
    }
    applied
}

fn finish(state: &mut AppState, description: String, applied: usize) -> UndoResult {
    // The collection changed under the cursor
    state.navigation.reset();
    UndoResult {
        success: true,
        description: Some(description),
        applied,
        merged_regions: state.merged_regions.regions(),
        can_undo: state.undo_stack.can_undo(),
        can_redo: state.undo_stack.can_redo(),
    }
}

fn nothing_to_do(state: &AppState) -> UndoResult {
    UndoResult {
        success: false,
        description: None,
        applied: 0,
        merged_regions: state.merged_regions.regions(),
        can_undo: state.undo_stack.can_undo(),
        can_redo: state.undo_stack.can_redo(),
    }
}

/// Perform undo operation.
pub fn undo(state: &mut AppState) -> UndoResult {
    let transaction = match state.undo_stack.pop_undo() {
        Some(t) => t,
        None => return nothing_to_do(state),
    };

    // Revert changes in REVERSE order
    let inverses: Vec<MergeChange> = transaction.changes.iter().rev().map(|c| c.inverse()).collect();
    let applied = replay(state, inverses.iter());
    log_info!(
        "UNDO",
        "Undo '{}' ({}/{} changes)",
        transaction.description,
        applied,
        transaction.changes.len()
    );

    let description = transaction.description.clone();
    state.undo_stack.push_redo(transaction);
    finish(state, description, applied)
}

/// Perform redo operation.
pub fn redo(state: &mut AppState) -> UndoResult {
    let transaction: Transaction = match state.undo_stack.pop_redo() {
        Some(t) => t,
        None => return nothing_to_do(state),
    };

    let applied = replay(state, transaction.changes.iter());
    log_info!(
        "UNDO",
        "Redo '{}' ({}/{} changes)",
        transaction.description,
        applied,
        transaction.changes.len()
    );

    let description = transaction.description.clone();
    state.undo_stack.push_undo_for_redo(transaction);
    finish(state, description, applied)
}
