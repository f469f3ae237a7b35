//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for merged-cells integration tests.

#![allow(dead_code)]

use app_lib::{create_app_state, merge_commands, AppState, MergeCellsSettings};
use merge_engine::{CellCoord, CellDelta, GridSize, MergeRegion, SelectionRange};

/// Test harness for creating and managing plugin state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Enabled plugin on a 10x10 grid with no merges.
    pub fn new() -> Self {
        Self::with_settings(GridSize::new(10, 10), MergeCellsSettings::enabled())
    }

    /// Enabled plugin on a 10x10 grid starting with `regions` as baseline.
    pub fn with_regions(regions: Vec<MergeRegion>) -> Self {
        Self::with_settings(GridSize::new(10, 10), MergeCellsSettings::with_regions(regions))
    }

    pub fn with_settings(grid: GridSize, settings: MergeCellsSettings) -> Self {
        TestHarness {
            state: create_app_state(grid, &settings),
        }
    }

    /// Merge through the command layer, panicking on rejection.
    pub fn merge(&mut self, row: u32, col: u32, rowspan: u32, colspan: u32) {
        merge_commands::merge_cells(&mut self.state, row, col, rowspan, colspan)
            .expect("merge should be accepted");
    }

    /// Select from `from` to `to` as a drag gesture would.
    pub fn select(&mut self, from: CellCoord, to: CellCoord) -> SelectionRange {
        self.state
            .after_selection_requested(SelectionRange::new(from, to), false)
    }

    pub fn step(&mut self, coord: CellCoord, row: i32, col: i32) -> CellDelta {
        self.state.before_step_navigation(coord, CellDelta::new(row, col))
    }

    pub fn regions(&self) -> Vec<MergeRegion> {
        self.state.merged_regions.regions()
    }
}

/// Assert the live regions, in insertion order.
pub fn assert_regions(harness: &TestHarness, expected: &[MergeRegion]) {
    pretty_assertions::assert_eq!(harness.regions(), expected.to_vec());
}
