//! FILENAME: app/src/settings.rs
// PURPOSE: The `mergeCells` configuration of a grid.
// CONTEXT: `mergeCells` is `true`, `false` or a list of regions to start with.
// A list (even an empty one) enables the plugin.

use merge_engine::{MergeRegion, WholeAxisPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MergeCellsSetting {
    Enabled(bool),
    Regions(Vec<MergeRegion>),
}

impl Default for MergeCellsSetting {
    fn default() -> Self {
        MergeCellsSetting::Enabled(false)
    }
}

impl MergeCellsSetting {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, MergeCellsSetting::Enabled(false))
    }

    /// Regions to load as baseline; empty unless a list was given.
    pub fn regions(&self) -> &[MergeRegion] {
        match self {
            MergeCellsSetting::Regions(regions) => regions,
            MergeCellsSetting::Enabled(_) => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeCellsSettings {
    pub merge_cells: MergeCellsSetting,
    pub whole_axis_selection: WholeAxisPolicy,
}

impl MergeCellsSettings {
    /// Plugin switched on with no starting regions.
    pub fn enabled() -> Self {
        MergeCellsSettings {
            merge_cells: MergeCellsSetting::Enabled(true),
            ..Default::default()
        }
    }

    pub fn with_regions(regions: Vec<MergeRegion>) -> Self {
        MergeCellsSettings {
            merge_cells: MergeCellsSetting::Regions(regions),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid mergeCells settings: {}", e))
    }
}
