//! FILENAME: core/engine/src/shift.rs
//! PURPOSE: Keeps merged regions aligned with the grid when rows or columns
//! are inserted or removed.
//! CONTEXT: Only the edited axis of a region is recomputed. Removed (unmerged)
//! slots are shifted as well so that undoing an unmerge later restores the
//! region at its current position.

use serde::{Deserialize, Serialize};

use crate::collection::{MergedCellsCollection, RegionId, SlotState};
use crate::coord::GridSize;
use crate::region::MergeRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Col,
}

/// A row/column insert or remove, as issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StructuralEdit {
    Insert { axis: Axis, index: u32, amount: u32 },
    Remove { axis: Axis, index: u32, amount: u32 },
}

impl StructuralEdit {
    pub fn axis(&self) -> Axis {
        match self {
            StructuralEdit::Insert { axis, .. } | StructuralEdit::Remove { axis, .. } => *axis,
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            StructuralEdit::Insert { amount, .. } | StructuralEdit::Remove { amount, .. } => *amount,
        }
    }

    /// Grid extent after the edit has been applied to `grid`.
    pub fn resize(&self, grid: GridSize) -> GridSize {
        let apply = |len: u32| match *self {
            StructuralEdit::Insert { amount, .. } => len.saturating_add(amount),
            StructuralEdit::Remove { index, amount, .. } => {
                len - amount.min(len.saturating_sub(index))
            }
        };
        match self.axis() {
            Axis::Row => GridSize::new(apply(grid.rows), grid.cols),
            Axis::Col => GridSize::new(grid.rows, apply(grid.cols)),
        }
    }
}

/// Recomputes (start, span) on the edited axis.
/// Returns None when the edit eliminates the whole span.
pub fn shift_span(start: u32, span: u32, edit: &StructuralEdit) -> Option<(u32, u32)> {
    if span == 0 {
        return None;
    }
    let end = start.saturating_add(span - 1);

    match *edit {
        StructuralEdit::Insert { index, amount, .. } => {
            if index <= start {
                Some((start.saturating_add(amount), span))
            } else if index > end {
                Some((start, span))
            } else {
                // Inserted inside the region: the new cells join the merge
                Some((start, span.saturating_add(amount)))
            }
        }
        StructuralEdit::Remove { index, amount, .. } => {
            if amount == 0 {
                return Some((start, span));
            }
            let last = index.saturating_add(amount - 1);

            if last < start {
                Some((start - amount, span))
            } else if index > end {
                Some((start, span))
            } else if index <= start && last >= end {
                None
            } else {
                let overlap = end.min(last) - start.max(index) + 1;
                let new_start = if index <= start { index } else { start };
                Some((new_start, span - overlap))
            }
        }
    }
}

/// Applies `edit` to one region. Returns None when the region is eliminated.
pub fn shift_region(region: &MergeRegion, edit: &StructuralEdit) -> Option<MergeRegion> {
    match edit.axis() {
        Axis::Row => shift_span(region.row, region.rowspan, edit).map(|(row, rowspan)| MergeRegion {
            row,
            rowspan,
            ..*region
        }),
        Axis::Col => shift_span(region.col, region.colspan, edit).map(|(col, colspan)| MergeRegion {
            col,
            colspan,
            ..*region
        }),
    }
}

/// Trims a region to the grid. None if nothing of a real merge is left.
fn clip_to_grid(region: MergeRegion, bounds: GridSize) -> Option<MergeRegion> {
    if region.row >= bounds.rows || region.col >= bounds.cols {
        return None;
    }
    let clipped = MergeRegion {
        rowspan: region.rowspan.min(bounds.rows - region.row),
        colspan: region.colspan.min(bounds.cols - region.col),
        ..region
    };
    if clipped.is_degenerate() {
        None
    } else {
        Some(clipped)
    }
}

impl MergedCellsCollection {
    /// Shifts every region for `edit`. `bounds` is the grid size after the edit.
    ///
    /// Regions whose span is eliminated, that end up outside the grid, or that
    /// collapse to a single cell are dropped for good. Returns the live regions
    /// that were dropped, with their pre-edit coordinates.
    pub fn apply_structural_edit(
        &mut self,
        edit: &StructuralEdit,
        bounds: GridSize,
    ) -> Vec<(RegionId, MergeRegion)> {
        let mut dropped = Vec::new();
        if edit.amount() == 0 {
            return dropped;
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.state == SlotState::Dropped {
                continue;
            }
            match shift_region(&slot.region, edit).and_then(|r| clip_to_grid(r, bounds)) {
                Some(region) => slot.region = region,
                None => {
                    if slot.state == SlotState::Live {
                        dropped.push((RegionId(index), slot.region));
                    }
                    slot.state = SlotState::Dropped;
                }
            }
        }

        for (_, region) in &dropped {
            log::debug!("dropped merged region {} after {:?}", region, edit);
        }
        dropped
    }

    /// Trims every region to `bounds` after the grid was resized without a
    /// row/column edit. Returns the live regions that no longer fit.
    pub fn clip_to_bounds(&mut self, bounds: GridSize) -> Vec<(RegionId, MergeRegion)> {
        let mut dropped = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.state == SlotState::Dropped {
                continue;
            }
            match clip_to_grid(slot.region, bounds) {
                Some(region) => slot.region = region,
                None => {
                    if slot.state == SlotState::Live {
                        dropped.push((RegionId(index), slot.region));
                    }
                    slot.state = SlotState::Dropped;
                }
            }
        }

        for (_, region) in &dropped {
            log::debug!("dropped merged region {} outside {} grid", region, bounds);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insert(axis: Axis, index: u32, amount: u32) -> StructuralEdit {
        StructuralEdit::Insert { axis, index, amount }
    }

    fn remove(axis: Axis, index: u32, amount: u32) -> StructuralEdit {
        StructuralEdit::Remove { axis, index, amount }
    }

    #[test]
    fn test_insert_before_shifts() {
        assert_eq!(shift_span(5, 2, &insert(Axis::Row, 3, 2)), Some((7, 2)));
        // Inserting exactly at the start also shifts
        assert_eq!(shift_span(5, 2, &insert(Axis::Row, 5, 2)), Some((7, 2)));
    }

    #[test]
    fn test_insert_after_unchanged() {
        assert_eq!(shift_span(1, 2, &insert(Axis::Col, 3, 2)), Some((1, 2)));
    }

    #[test]
    fn test_insert_inside_grows() {
        assert_eq!(shift_span(1, 3, &insert(Axis::Col, 2, 4)), Some((1, 7)));
        assert_eq!(shift_span(1, 3, &insert(Axis::Col, 3, 1)), Some((1, 4)));
    }

    #[test]
    fn test_remove_before_shifts_back() {
        assert_eq!(shift_span(5, 2, &remove(Axis::Row, 3, 2)), Some((3, 2)));
    }

    #[test]
    fn test_remove_after_unchanged() {
        assert_eq!(shift_span(1, 2, &remove(Axis::Row, 3, 2)), Some((1, 2)));
    }

    #[test]
    fn test_remove_covering_eliminates() {
        assert_eq!(shift_span(3, 2, &remove(Axis::Row, 3, 2)), None);
        assert_eq!(shift_span(3, 2, &remove(Axis::Row, 1, 10)), None);
    }

    #[test]
    fn test_remove_partial_overlaps() {
        // Removal starts before and ends inside: re-anchors at the removal index
        assert_eq!(shift_span(4, 4, &remove(Axis::Row, 2, 4)), Some((2, 2)));
        // Removal strictly inside
        assert_eq!(shift_span(4, 4, &remove(Axis::Row, 5, 2)), Some((4, 2)));
        // Removal starts inside and runs past the end
        assert_eq!(shift_span(4, 4, &remove(Axis::Row, 6, 5)), Some((4, 2)));
        // Removal starts exactly at the start
        assert_eq!(shift_span(4, 4, &remove(Axis::Row, 4, 1)), Some((4, 3)));
    }

    #[test]
    fn test_other_axis_untouched() {
        let region = MergeRegion::new(2, 5, 2, 2);
        let shifted = shift_region(&region, &insert(Axis::Col, 3, 2)).unwrap();
        assert_eq!(shifted, MergeRegion::new(2, 7, 2, 2));
        let shifted = shift_region(&region, &remove(Axis::Row, 0, 1)).unwrap();
        assert_eq!(shifted, MergeRegion::new(1, 5, 2, 2));
    }

    #[test]
    fn test_resize_grid() {
        let grid = GridSize::new(20, 10);
        assert_eq!(insert(Axis::Row, 3, 2).resize(grid), GridSize::new(22, 10));
        assert_eq!(remove(Axis::Col, 3, 2).resize(grid), GridSize::new(20, 8));
        assert_eq!(remove(Axis::Col, 8, 5).resize(grid), GridSize::new(20, 8));
    }

    #[test]
    fn test_collection_insert_columns_scenario() {
        let grid = GridSize::new(20, 20);
        let mut merged = MergedCellsCollection::new();
        merged.add(MergeRegion::new(1, 1, 2, 2), grid).unwrap();
        merged.add(MergeRegion::new(2, 5, 2, 2), grid).unwrap();

        let edit = insert(Axis::Col, 3, 2);
        let dropped = merged.apply_structural_edit(&edit, edit.resize(grid));

        assert!(dropped.is_empty());
        assert_eq!(
            merged.regions(),
            vec![MergeRegion::new(1, 1, 2, 2), MergeRegion::new(2, 7, 2, 2)]
        );
    }

    #[test]
    fn test_collection_remove_rows_scenario() {
        let grid = GridSize::new(20, 20);
        let mut merged = MergedCellsCollection::new();
        merged.add(MergeRegion::new(1, 1, 2, 2), grid).unwrap();
        merged.add(MergeRegion::new(5, 5, 2, 2), grid).unwrap();

        let edit = remove(Axis::Row, 3, 2);
        merged.apply_structural_edit(&edit, edit.resize(grid));

        assert_eq!(
            merged.regions(),
            vec![MergeRegion::new(1, 1, 2, 2), MergeRegion::new(3, 5, 2, 2)]
        );
    }

    #[test]
    fn test_collection_drops_eliminated_and_collapsed() {
        let grid = GridSize::new(20, 20);
        let mut merged = MergedCellsCollection::new();
        let gone = merged.add(MergeRegion::new(2, 0, 2, 2), grid).unwrap();
        let collapsed = merged.add(MergeRegion::new(6, 0, 2, 1), grid).unwrap();
        merged.add(MergeRegion::new(10, 0, 3, 3), grid).unwrap();

        let edit = remove(Axis::Row, 2, 2);
        let grid = edit.resize(grid);
        let dropped = merged.apply_structural_edit(&edit, grid);
        let edit = remove(Axis::Row, 4, 1);
        let dropped_again = merged.apply_structural_edit(&edit, edit.resize(grid));

        assert_eq!(dropped, vec![(gone, MergeRegion::new(2, 0, 2, 2))]);
        assert_eq!(dropped_again, vec![(collapsed, MergeRegion::new(4, 0, 2, 1))]);
        assert_eq!(merged.regions(), vec![MergeRegion::new(7, 0, 3, 3)]);
    }

    #[test]
    fn test_removed_slot_is_shifted_too() {
        let grid = GridSize::new(20, 20);
        let mut merged = MergedCellsCollection::new();
        let id = merged.add(MergeRegion::new(5, 5, 2, 2), grid).unwrap();
        merged.remove(id);

        let edit = insert(Axis::Row, 0, 3);
        let grid = edit.resize(grid);
        merged.apply_structural_edit(&edit, grid);

        assert_eq!(merged.revive(id, grid), Ok(true));
        assert_eq!(merged.get(id), Some(&MergeRegion::new(8, 5, 2, 2)));
    }

    #[test]
    fn test_dropped_slot_cannot_be_revived() {
        let grid = GridSize::new(20, 20);
        let mut merged = MergedCellsCollection::new();
        let id = merged.add(MergeRegion::new(5, 5, 2, 2), grid).unwrap();
        merged.remove(id);

        let edit = remove(Axis::Col, 5, 2);
        merged.apply_structural_edit(&edit, edit.resize(grid));

        assert_eq!(merged.revive(id, grid), Ok(false));
    }

    #[test]
    fn test_clip_to_bounds_after_shrink() {
        let grid = GridSize::new(10, 10);
        let mut merged = MergedCellsCollection::new();
        let kept = merged.add(MergeRegion::new(0, 0, 2, 2), grid).unwrap();
        let trimmed = merged.add(MergeRegion::new(3, 3, 4, 4), grid).unwrap();
        let gone = merged.add(MergeRegion::new(7, 7, 3, 3), grid).unwrap();
        let collapsed = merged.add(MergeRegion::new(0, 4, 5, 1), grid).unwrap();

        let dropped = merged.clip_to_bounds(GridSize::new(5, 5));
        assert_eq!(
            dropped,
            vec![(gone, MergeRegion::new(7, 7, 3, 3))],
        );
        assert_eq!(merged.get(kept), Some(&MergeRegion::new(0, 0, 2, 2)));
        assert_eq!(merged.get(trimmed), Some(&MergeRegion::new(3, 3, 2, 2)));
        assert_eq!(merged.get(collapsed), Some(&MergeRegion::new(0, 4, 5, 1)));

        // A region cut down to one cell is gone too
        assert_eq!(merged.clip_to_bounds(GridSize::new(4, 4)).len(), 2);
        assert_eq!(merged.regions(), vec![MergeRegion::new(0, 0, 2, 2)]);
    }
}
