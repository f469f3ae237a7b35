//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

use crate::coord::GridSize;
use crate::region::MergeRegion;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("Cannot merge {region}: overlaps existing merged region {existing}")]
    Overlap {
        region: MergeRegion,
        existing: MergeRegion,
    },

    #[error("Cannot merge {region}: a merge must span at least two cells")]
    Degenerate { region: MergeRegion },

    #[error("Cannot merge {region}: outside of the {grid} grid")]
    OutOfBounds { region: MergeRegion, grid: GridSize },

    #[error("Merged cells are disabled")]
    Disabled,
}
