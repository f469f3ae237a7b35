//! FILENAME: core/engine/src/coord.rs
//! PURPOSE: Coordinate, range and size primitives shared by the merge components.
//! CONTEXT: All indices are 0-based (row, col). A1-style notation is only
//! produced for human-readable output (log lines, error messages):
//! column 0 = "A", 25 = "Z", 26 = "AA"; row 0 = "1".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate as (row, col) with 0-based indices.
pub type CellCoord = (u32, u32);

/// Converts a 0-based column index to a column string.
/// 0 -> "A", 1 -> "B", ..., 25 -> "Z", 26 -> "AA", 27 -> "AB", etc.
pub fn index_to_col(mut col_index: u32) -> String {
    let mut result = String::new();
    loop {
        let remainder = col_index % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }
    result
}

/// Converts a 0-based (row, col) coordinate to an A1-style reference string.
/// (0, 0) -> "A1", (1, 1) -> "B2", (99, 26) -> "AA100"
pub fn coord_to_a1(coord: CellCoord) -> String {
    let (row, col) = coord;
    format!("{}{}", index_to_col(col), u64::from(row) + 1)
}

/// An inclusive rectangle of cells.
/// Constructors normalize the corners so `start_* <= end_*` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRange {
    /// Builds a range from two arbitrary corners.
    pub fn new(row_a: u32, col_a: u32, row_b: u32, col_b: u32) -> Self {
        CellRange {
            start_row: row_a.min(row_b),
            start_col: col_a.min(col_b),
            end_row: row_a.max(row_b),
            end_col: col_a.max(col_b),
        }
    }

    pub fn from_coords(a: CellCoord, b: CellCoord) -> Self {
        CellRange::new(a.0, a.1, b.0, b.1)
    }

    pub fn single(row: u32, col: u32) -> Self {
        CellRange::new(row, col, row, col)
    }

    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn col_count(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    /// True when both the row ranges and the column ranges intersect.
    pub fn intersects(&self, other: &CellRange) -> bool {
        !(other.end_row < self.start_row
            || other.start_row > self.end_row
            || other.end_col < self.start_col
            || other.start_col > self.end_col)
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange {
            start_row: self.start_row.min(other.start_row),
            start_col: self.start_col.min(other.start_col),
            end_row: self.end_row.max(other.end_row),
            end_col: self.end_col.max(other.end_col),
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            coord_to_a1((self.start_row, self.start_col)),
            coord_to_a1((self.end_row, self.end_col))
        )
    }
}

/// Current extent of the host grid (number of rows and columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub fn new(rows: u32, cols: u32) -> Self {
        GridSize { rows, cols }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    /// True when the whole range lies inside the grid.
    pub fn contains_range(&self, range: &CellRange) -> bool {
        range.end_row < self.rows && range.end_col < self.cols
    }

    /// The range covering every cell, or None for an empty grid.
    pub fn full_range(&self) -> Option<CellRange> {
        if self.rows == 0 || self.cols == 0 {
            return None;
        }
        Some(CellRange::new(0, 0, self.rows - 1, self.cols - 1))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A signed cursor step. Arrow-key navigation moves along exactly one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellDelta {
    pub row: i32,
    pub col: i32,
}

impl CellDelta {
    pub fn new(row: i32, col: i32) -> Self {
        CellDelta { row, col }
    }

    /// Exactly one component is non-zero.
    pub fn is_single_axis(&self) -> bool {
        (self.row == 0) != (self.col == 0)
    }
}
