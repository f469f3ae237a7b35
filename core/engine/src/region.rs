//! FILENAME: core/engine/src/region.rs
//! PURPOSE: The MergeRegion value type (anchor + span).
//! CONTEXT: This is also the wire format of the `mergeCells` setting:
//! `{"row": 1, "col": 1, "rowspan": 2, "colspan": 2}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coord::{CellCoord, CellRange};

/// One merged block of cells. The anchor (row, col) is the top-left cell and
/// the only one that owns content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRegion {
    pub row: u32,
    pub col: u32,
    pub rowspan: u32,
    pub colspan: u32,
}

impl MergeRegion {
    pub fn new(row: u32, col: u32, rowspan: u32, colspan: u32) -> Self {
        MergeRegion { row, col, rowspan, colspan }
    }

    /// Builds the region covering `range` exactly.
    pub fn from_range(range: &CellRange) -> Self {
        MergeRegion {
            row: range.start_row,
            col: range.start_col,
            rowspan: range.row_count(),
            colspan: range.col_count(),
        }
    }

    /// Last row covered. Only meaningful when `rowspan >= 1`.
    /// Saturates at `u32::MAX` for regions that run past the coordinate space.
    pub fn row_end(&self) -> u32 {
        self.row.saturating_add(self.rowspan.saturating_sub(1))
    }

    /// Last column covered. Only meaningful when `colspan >= 1`.
    pub fn col_end(&self) -> u32 {
        self.col.saturating_add(self.colspan.saturating_sub(1))
    }

    pub fn anchor(&self) -> CellCoord {
        (self.row, self.col)
    }

    /// A zero span, or a single cell, does not describe a merge.
    pub fn is_degenerate(&self) -> bool {
        self.rowspan == 0 || self.colspan == 0 || (self.rowspan == 1 && self.colspan == 1)
    }

    pub fn to_range(&self) -> CellRange {
        CellRange::new(self.row, self.col, self.row_end(), self.col_end())
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row && row <= self.row_end() && col >= self.col && col <= self.col_end()
    }

    pub fn intersects_range(&self, range: &CellRange) -> bool {
        self.to_range().intersects(range)
    }

    /// Two regions overlap iff their row ranges and column ranges both intersect.
    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        self.intersects_range(&other.to_range())
    }
}

impl fmt::Display for MergeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_range())
    }
}
