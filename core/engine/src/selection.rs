//! FILENAME: core/engine/src/selection.rs
//! PURPOSE: Grows a requested selection until it fully covers every merge it touches.
//! CONTEXT: A selection keeps three coordinates: `highlight` is the cell the
//! user selected first, `from` is the corner on the anchor side and `to` is
//! the opposite (moving) corner. After normalization `from`/`to` are corners
//! of the expanded rectangle, oriented the way the user was dragging.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::MergedCellsCollection;
use crate::coord::{CellCoord, CellRange, GridSize};

/// Which way the selection was dragged, from `from` towards `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    NwSe,
    NeSw,
    SeNw,
    SwNe,
}

impl fmt::Display for SelectionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SelectionDirection::NwSe => "NW-SE",
            SelectionDirection::NeSw => "NE-SW",
            SelectionDirection::SeNw => "SE-NW",
            SelectionDirection::SwNe => "SW-NE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRange {
    pub highlight: CellCoord,
    pub from: CellCoord,
    pub to: CellCoord,
}

impl SelectionRange {
    pub fn new(from: CellCoord, to: CellCoord) -> Self {
        SelectionRange { highlight: from, from, to }
    }

    pub fn single(coord: CellCoord) -> Self {
        SelectionRange::new(coord, coord)
    }

    /// The rectangle spanned by `from` and `to`.
    pub fn range(&self) -> CellRange {
        CellRange::from_coords(self.from, self.to)
    }

    pub fn direction(&self) -> SelectionDirection {
        let (from_row, from_col) = self.from;
        let (to_row, to_col) = self.to;
        if from_row <= to_row && from_col <= to_col {
            SelectionDirection::NwSe
        } else if from_row <= to_row && from_col >= to_col {
            SelectionDirection::NeSw
        } else if from_row >= to_row && from_col >= to_col {
            SelectionDirection::SeNw
        } else {
            SelectionDirection::SwNe
        }
    }

    /// Whether the renderer should treat this as a multi-cell area.
    /// A single cell, or exactly one merged region, is not an area.
    pub fn is_area(&self, merged: &MergedCellsCollection) -> bool {
        let range = self.range();
        if range.is_single_cell() {
            return false;
        }
        match merged.region_covering(range.start_row, range.start_col) {
            Some((_, region)) => region.to_range() != range,
            None => true,
        }
    }
}

/// What to do with selections that cover whole rows or whole columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WholeAxisPolicy {
    /// Leave them untouched; growing them would make them partial selections.
    #[default]
    Exempt,
    /// Expand them around merges like any other selection.
    Expand,
}

/// True when `range` spans every row or every column of `grid`.
pub fn is_whole_axis(range: &CellRange, grid: GridSize) -> bool {
    if grid.rows == 0 || grid.cols == 0 {
        return false;
    }
    let all_rows = range.start_row == 0 && range.end_row >= grid.rows - 1;
    let all_cols = range.start_col == 0 && range.end_col >= grid.cols - 1;
    all_rows || all_cols
}

/// Smallest rectangle containing `range` and every merge it intersects.
/// Growing can pull in further merges, so this iterates to a fixed point.
pub fn expand_to_merges(merged: &MergedCellsCollection, range: CellRange) -> CellRange {
    let mut current = range;
    loop {
        let expanded = merged
            .regions_intersecting(&current)
            .iter()
            .fold(current, |acc, (_, region)| acc.union(&region.to_range()));
        if expanded == current {
            return current;
        }
        current = expanded;
    }
}

/// Picks (from, to) on one axis of the expanded rectangle.
fn orient(anchor: u32, target: u32, start: u32, end: u32, no_movement: bool) -> (u32, u32) {
    let anchor_at_start = if no_movement || target > anchor {
        true
    } else if target < anchor {
        false
    } else {
        anchor - start <= end - anchor
    };
    if anchor_at_start {
        (start, end)
    } else {
        (end, start)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionNormalizer {
    pub policy: WholeAxisPolicy,
}

impl SelectionNormalizer {
    pub fn new(policy: WholeAxisPolicy) -> Self {
        SelectionNormalizer { policy }
    }

    pub fn normalize(
        &self,
        merged: &MergedCellsCollection,
        request: SelectionRange,
        whole_axis: bool,
    ) -> SelectionRange {
        if whole_axis && self.policy == WholeAxisPolicy::Exempt {
            return request;
        }

        let expanded = expand_to_merges(merged, request.range());
        let (anchor_row, anchor_col) = request.from;
        let (target_row, target_col) = request.to;
        let no_movement = request.from == request.to;

        let (from_row, to_row) = orient(anchor_row, target_row, expanded.start_row, expanded.end_row, no_movement);
        let (from_col, to_col) = orient(anchor_col, target_col, expanded.start_col, expanded.end_col, no_movement);

        SelectionRange {
            highlight: request.highlight,
            from: (from_row, from_col),
            to: (to_row, to_col),
        }
    }
}
