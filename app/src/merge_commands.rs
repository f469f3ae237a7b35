//! FILENAME: app/src/merge_commands.rs
// PURPOSE: Commands for cell merge operations.
// CONTEXT: Every runtime merge and unmerge is registered with the undo stack.
// Regions loaded from settings never are.

use crate::api_types::MergeResult;
use crate::{log_debug, log_info, AppState};
use merge_engine::{
    expand_to_merges, CellCoord, CellRange, MergeChange, MergeError, MergeRegion, RegionId,
    UndoRegistrar,
};

fn result(state: &AppState, success: bool) -> MergeResult {
    MergeResult {
        success,
        merged_regions: state.merged_regions.regions(),
    }
}

/// Merge the rectangle anchored at (row, col).
pub fn merge_cells(
    state: &mut AppState,
    row: u32,
    col: u32,
    rowspan: u32,
    colspan: u32,
) -> Result<MergeResult, String> {
    merge_region(state, MergeRegion::new(row, col, rowspan, colspan))
}

/// Merge the rectangle spanned by two corners (in any order).
pub fn merge_range(state: &mut AppState, range: CellRange) -> Result<MergeResult, String> {
    merge_region(state, MergeRegion::from_range(&range))
}

/// Merge the current selection.
pub fn merge_selection(state: &mut AppState) -> Result<MergeResult, String> {
    let selection = state
        .selection
        .ok_or_else(|| "Cannot merge: nothing is selected".to_string())?;
    merge_range(state, selection.range())
}

fn merge_region(state: &mut AppState, region: MergeRegion) -> Result<MergeResult, String> {
    if !state.enabled {
        return Err(MergeError::Disabled.to_string());
    }

    let id = state
        .merged_regions
        .add(region, state.grid_size)
        .map_err(|e| e.to_string())?;
    state
        .undo_stack
        .register(&format!("Merge {}", region.to_range()), MergeChange::Merged { id });

    log_info!("MERGE", "Merged {}", region);
    Ok(result(state, true))
}

/// Unmerge the region covering (row, col).
/// `success` is false when the cell is not part of a merge.
pub fn unmerge_cells(state: &mut AppState, row: u32, col: u32) -> Result<MergeResult, String> {
    match state.merged_regions.remove_at(row, col) {
        Some((id, region)) => {
            state
                .undo_stack
                .register(&format!("Unmerge {}", region.to_range()), MergeChange::Unmerged { id });
            log_info!("MERGE", "Unmerged {}", region);
            Ok(result(state, true))
        }
        None => {
            log_debug!("MERGE", "Nothing to unmerge at ({}, {})", row, col);
            Ok(result(state, false))
        }
    }
}

/// Unmerge every region touching the current selection, as one undo step.
pub fn unmerge_selection(state: &mut AppState) -> Result<MergeResult, String> {
    let range = state
        .selection
        .map(|s| s.range())
        .ok_or_else(|| "Cannot unmerge: nothing is selected".to_string())?;
    Ok(unmerge_within(state, &range, format!("Unmerge {}", range)))
}

/// Unmerge every region, as one undo step.
pub fn unmerge_all(state: &mut AppState) -> MergeResult {
    let ids: Vec<_> = state.merged_regions.iter().map(|(id, _)| id).collect();
    unmerge_ids(state, ids, "Unmerge all".to_string())
}

fn unmerge_within(state: &mut AppState, range: &CellRange, description: String) -> MergeResult {
    let ids = state
        .merged_regions
        .regions_intersecting(range)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    unmerge_ids(state, ids, description)
}

fn unmerge_ids(state: &mut AppState, ids: Vec<RegionId>, description: String) -> MergeResult {
    if ids.is_empty() {
        return result(state, false);
    }

    state.undo_stack.begin_transaction(description.clone());
    for id in ids {
        if state.merged_regions.remove(id).is_some() {
            state.undo_stack.register(&description, MergeChange::Unmerged { id });
        }
    }
    state.undo_stack.commit_transaction();

    log_info!("MERGE", "{} ({} regions left)", description, state.merged_regions.len());
    result(state, true)
}

/// Whether (row, col) belongs to any merged region.
pub fn is_merged(state: &AppState, row: u32, col: u32) -> bool {
    state.merged_regions.is_merged(row, col)
}

/// The merged region covering (row, col), if any.
pub fn get_merge_info(state: &AppState, row: u32, col: u32) -> Option<MergeRegion> {
    state.merged_regions.region_covering(row, col).map(|(_, region)| *region)
}

/// Get all merged regions, in insertion order.
pub fn get_merged_regions(state: &AppState) -> Vec<MergeRegion> {
    state.merged_regions.regions()
}

/// The cell that holds the value shown at (row, col).
pub fn get_cell_anchor(state: &AppState, row: u32, col: u32) -> CellCoord {
    get_merge_info(state, row, col)
        .map(|region| region.anchor())
        .unwrap_or((row, col))
}

/// Whether `range` could be merged as-is.
pub fn can_merge_range(state: &AppState, range: CellRange) -> bool {
    state.enabled && state.merged_regions.can_merge_range(&range, state.grid_size)
}

/// The rectangle the renderer must draw so that merges cut by `viewport`
/// are painted whole.
pub fn render_extent(state: &AppState, viewport: CellRange) -> CellRange {
    expand_to_merges(&state.merged_regions, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_app_state, MergeCellsSettings};
    use merge_engine::GridSize;

    fn enabled_state() -> AppState {
        create_app_state(GridSize::new(10, 10), &MergeCellsSettings::enabled())
    }

    #[test]
    fn test_merge_and_unmerge() {
        let mut state = enabled_state();
        let result = merge_cells(&mut state, 1, 1, 2, 2).unwrap();
        assert!(result.success);
        assert_eq!(result.merged_regions, vec![MergeRegion::new(1, 1, 2, 2)]);

        let result = unmerge_cells(&mut state, 2, 2).unwrap();
        assert!(result.success);
        assert!(result.merged_regions.is_empty());
    }

    #[test]
    fn test_merge_rejected_when_disabled() {
        let mut state = create_app_state(GridSize::new(10, 10), &MergeCellsSettings::default());
        let err = merge_cells(&mut state, 0, 0, 2, 2).unwrap_err();
        assert_eq!(err, "Merged cells are disabled");
    }

    #[test]
    fn test_unmerge_outside_merge_reports_no_success() {
        let mut state = enabled_state();
        let result = unmerge_cells(&mut state, 5, 5).unwrap();
        assert!(!result.success);
        assert!(!state.undo_stack.can_undo());
    }

    #[test]
    fn test_anchor_lookup() {
        let mut state = enabled_state();
        merge_cells(&mut state, 2, 3, 3, 2).unwrap();
        assert_eq!(get_cell_anchor(&state, 4, 4), (2, 3));
        assert_eq!(get_cell_anchor(&state, 0, 0), (0, 0));
    }
}
