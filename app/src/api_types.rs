//! FILENAME: app/src/api_types.rs
// PURPOSE: Serializable results returned by commands and hooks.

use merge_engine::{GridSize, MergeRegion};
use serde::{Deserialize, Serialize};

/// Result of a merge or unmerge command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    pub success: bool,
    /// All live merged regions after the command, in insertion order.
    pub merged_regions: Vec<MergeRegion>,
}

/// Result of the structural-edit hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralEditResult {
    /// Grid size after the edit
    pub grid_size: GridSize,
    /// Regions eliminated by the edit, with their coordinates before it
    pub dropped: Vec<MergeRegion>,
    pub merged_regions: Vec<MergeRegion>,
}
