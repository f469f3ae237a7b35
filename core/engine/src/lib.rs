//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the merged-cells engine.
//! CONTEXT: Pure data model and algorithms; no I/O. The `app` crate wraps
//! these types into a per-grid session with settings, commands and logging.

pub mod collection;
pub mod coord;
pub mod error;
pub mod navigation;
pub mod region;
pub mod selection;
pub mod shift;
pub mod undo;

// Re-export commonly used types at the crate root
pub use collection::{MergedCellsCollection, RegionId};
pub use coord::{coord_to_a1, index_to_col, CellCoord, CellDelta, CellRange, GridSize};
pub use error::MergeError;
pub use navigation::NavigationTransformer;
pub use region::MergeRegion;
pub use selection::{
    expand_to_merges, is_whole_axis, SelectionDirection, SelectionNormalizer, SelectionRange,
    WholeAxisPolicy,
};
pub use shift::{shift_region, shift_span, Axis, StructuralEdit};
pub use undo::{MergeChange, Transaction, UndoRegistrar, UndoStack};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_test_merge_shift_select_navigate() {
        let mut grid = GridSize::new(10, 10);
        let mut merged = MergedCellsCollection::new();
        let id = merged.add(MergeRegion::new(1, 1, 2, 2), grid).unwrap();

        // Insert two rows above the merge
        let edit = StructuralEdit::Insert { axis: Axis::Row, index: 0, amount: 2 };
        grid = edit.resize(grid);
        merged.apply_structural_edit(&edit, grid);
        assert_eq!(merged.get(id), Some(&MergeRegion::new(3, 1, 2, 2)));

        // A click inside the merge selects all of it
        let selection = SelectionNormalizer::default().normalize(
            &merged,
            SelectionRange::single((4, 2)),
            false,
        );
        assert_eq!(selection.range(), CellRange::new(3, 1, 4, 2));
        assert!(!selection.is_area(&merged));

        // Leaving it to the right crosses the whole span
        let mut nav = NavigationTransformer::new();
        let delta = nav.transform_step(&merged, (3, 2), CellDelta::new(0, 1));
        assert_eq!(delta, CellDelta::new(0, 2));
    }
}
