//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the merged-cells plugin.
// CONTEXT: One `AppState` per grid instance. The host owns it, calls the
// hooks below from its event loop and exposes the command functions from
// `merge_commands` and `undo_commands` to the UI.

use merge_engine::{
    CellCoord, CellDelta, GridSize, MergeRegion, MergedCellsCollection, NavigationTransformer,
    SelectionNormalizer, SelectionRange, StructuralEdit, UndoStack,
};

pub mod api_types;
pub mod logging;
pub mod merge_commands;
pub mod settings;
pub mod undo_commands;

pub use api_types::{MergeResult, StructuralEditResult};
pub use logging::{get_log_path, init_log_file, init_logger, next_seq, write_log};
pub use settings::{MergeCellsSetting, MergeCellsSettings};

/// Plugin state of one grid.
#[derive(Debug)]
pub struct AppState {
    /// Current grid dimensions, kept in sync by structural edits
    pub grid_size: GridSize,
    pub merged_regions: MergedCellsCollection,
    pub undo_stack: UndoStack,
    pub navigation: NavigationTransformer,
    pub normalizer: SelectionNormalizer,
    /// Last normalized selection
    pub selection: Option<SelectionRange>,
    pub enabled: bool,
}

/// Create plugin state for a grid and load the configured regions.
pub fn create_app_state(grid_size: GridSize, settings: &MergeCellsSettings) -> AppState {
    log_info!("SYS", "Creating AppState for {} grid", grid_size);
    let mut state = AppState {
        grid_size,
        merged_regions: MergedCellsCollection::new(),
        undo_stack: UndoStack::new(),
        navigation: NavigationTransformer::new(),
        normalizer: SelectionNormalizer::new(settings.whole_axis_selection),
        selection: None,
        enabled: settings.merge_cells.is_enabled(),
    };
    state.load_baseline(settings.merge_cells.regions());
    state
}

impl AppState {
    /// Replace every region with `regions`, without touching history.
    /// Invalid entries are skipped.
    fn load_baseline(&mut self, regions: &[MergeRegion]) {
        self.merged_regions.clear();
        for region in regions {
            if let Err(e) = self.merged_regions.add_baseline(*region, self.grid_size) {
                log_warn!("MERGE", "Skipping configured region {}: {}", region, e);
            }
        }
        log_debug!(
            "MERGE",
            "Loaded {} of {} configured regions",
            self.merged_regions.len(),
            regions.len()
        );
    }

    /// Apply new settings. A region list replaces the whole set, `false`
    /// clears and disables, `true` enables and keeps what is there.
    pub fn update_settings(&mut self, settings: &MergeCellsSettings) {
        self.normalizer = SelectionNormalizer::new(settings.whole_axis_selection);

        match &settings.merge_cells {
            MergeCellsSetting::Enabled(true) => {
                self.enabled = true;
            }
            MergeCellsSetting::Enabled(false) => {
                self.enabled = false;
                self.reset();
            }
            MergeCellsSetting::Regions(regions) => {
                self.enabled = true;
                self.load_baseline(regions);
                self.undo_stack.clear();
                self.navigation.reset();
            }
        }
        log_info!("MERGE", "Settings updated (enabled: {})", self.enabled);
    }

    /// Drop every region and all history.
    pub fn reset(&mut self) {
        self.merged_regions.clear();
        self.undo_stack.clear();
        self.navigation.reset();
        self.selection = None;
    }

    /// Host-side resize that is not a row/column insert or removal.
    /// Regions are trimmed to the new size; the ones left outside are
    /// returned.
    pub fn set_grid_size(&mut self, grid_size: GridSize) -> Vec<MergeRegion> {
        self.grid_size = grid_size;
        let dropped: Vec<MergeRegion> = self
            .merged_regions
            .clip_to_bounds(grid_size)
            .into_iter()
            .map(|(_, region)| region)
            .collect();
        if !dropped.is_empty() {
            self.navigation.reset();
            log_info!("STRUCT", "{} merged region(s) outside {} grid", dropped.len(), grid_size);
        }
        dropped
    }

    /// Called when the host inserts or removes rows or columns.
    /// The shift is applied before any later query observes the collection.
    pub fn before_structural_edit(&mut self, edit: StructuralEdit) -> StructuralEditResult {
        log_enter!("STRUCT", "before_structural_edit", "{:?}", edit);
        self.grid_size = edit.resize(self.grid_size);

        let dropped: Vec<MergeRegion> = self
            .merged_regions
            .apply_structural_edit(&edit, self.grid_size)
            .into_iter()
            .map(|(_, region)| region)
            .collect();
        self.navigation.reset();

        if !dropped.is_empty() {
            log_info!("STRUCT", "{} merged region(s) eliminated", dropped.len());
        }
        log_exit!("STRUCT", "before_structural_edit", "grid={}", self.grid_size);

        StructuralEditResult {
            grid_size: self.grid_size,
            dropped,
            merged_regions: self.merged_regions.regions(),
        }
    }

    /// Called after the host computed a selection from a pointer or keyboard
    /// gesture. Returns the selection grown to cover every merge it touches.
    pub fn after_selection_requested(&mut self, request: SelectionRange, whole_axis: bool) -> SelectionRange {
        let selection = if self.enabled {
            self.normalizer.normalize(&self.merged_regions, request, whole_axis)
        } else {
            request
        };
        if selection != request {
            log_debug!(
                "SELECT",
                "{} ({}) -> {} ({})",
                request.range(),
                request.direction(),
                selection.range(),
                selection.direction()
            );
        }
        self.navigation.reset();
        self.selection = Some(selection);
        selection
    }

    /// Called before the cursor moves by `delta` from `coord`.
    pub fn before_step_navigation(&mut self, coord: CellCoord, delta: CellDelta) -> CellDelta {
        if !self.enabled {
            return delta;
        }
        let adjusted = self.navigation.transform_step(&self.merged_regions, coord, delta);
        if adjusted != delta {
            log_debug!("NAV", "step from {:?}: {:?} -> {:?}", coord, delta, adjusted);
        }
        adjusted
    }
}
