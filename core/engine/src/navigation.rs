//! FILENAME: core/engine/src/navigation.rs
//! PURPOSE: Arrow-key stepping across merged regions.
//! CONTEXT: A merge behaves like one cell. Entering a merge from the side snaps
//! the cursor to the merge's anchor row (or column) and remembers where the
//! cursor came from; leaving the merge on the far side jumps over its span
//! and returns the cursor to the remembered row (or column).

use crate::collection::{MergedCellsCollection, RegionId};
use crate::coord::{CellCoord, CellDelta};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CrossAxisMemory {
    /// The merge that was entered when this was recorded.
    region: RegionId,
    desired: u32,
}

/// Returns the remembered coordinate if it belongs to `id`, clearing it.
fn take_memory(slot: &mut Option<CrossAxisMemory>, id: RegionId) -> Option<u32> {
    match *slot {
        Some(memory) if memory.region == id => {
            *slot = None;
            Some(memory.desired)
        }
        _ => None,
    }
}

/// Signed distance from `from` to `to`, if it fits a step.
fn offset(from: u32, to: u32) -> Option<i32> {
    i32::try_from(i64::from(to) - i64::from(from)).ok()
}

/// A unit step grown by `span - 1` in its own direction.
fn exit_step(step: i32, span: u32) -> Option<i32> {
    let extra = i64::from(span) - 1;
    let grown = if step > 0 { i64::from(step) + extra } else { i64::from(step) - extra };
    i32::try_from(grown).ok()
}

#[derive(Debug, Clone, Default)]
pub struct NavigationTransformer {
    /// Row to return to after crossing a merge horizontally.
    desired_row: Option<CrossAxisMemory>,
    /// Column to return to after crossing a merge vertically.
    desired_col: Option<CrossAxisMemory>,
}

impl NavigationTransformer {
    pub fn new() -> Self {
        NavigationTransformer::default()
    }

    /// Forgets any remembered coordinate.
    pub fn reset(&mut self) {
        self.desired_row = None;
        self.desired_col = None;
    }

    pub fn remembered_row(&self) -> Option<u32> {
        self.desired_row.map(|m| m.desired)
    }

    pub fn remembered_col(&self) -> Option<u32> {
        self.desired_col.map(|m| m.desired)
    }

    /// Drops memories whose merge is gone or whose band the cursor has left.
    fn invalidate_stale(&mut self, merged: &MergedCellsCollection, coord: CellCoord) {
        let (row, col) = coord;
        if let Some(memory) = self.desired_row {
            let in_band = merged
                .get(memory.region)
                .map(|r| row >= r.row && row <= r.row_end())
                .unwrap_or(false);
            if !in_band {
                self.desired_row = None;
            }
        }
        if let Some(memory) = self.desired_col {
            let in_band = merged
                .get(memory.region)
                .map(|r| col >= r.col && col <= r.col_end())
                .unwrap_or(false);
            if !in_band {
                self.desired_col = None;
            }
        }
    }

    /// Adjusts a single-axis step starting at `coord` so merges act as one cell.
    /// Steps along both axes (or none) are returned unchanged.
    pub fn transform_step(
        &mut self,
        merged: &MergedCellsCollection,
        coord: CellCoord,
        delta: CellDelta,
    ) -> CellDelta {
        if !delta.is_single_axis() {
            return delta;
        }
        self.invalidate_stale(merged, coord);

        let (row, col) = coord;
        let horizontal = delta.col != 0;

        // Leaving through the far edge of the current merge
        if let Some((id, region)) = merged.region_covering(row, col) {
            let on_exit_edge = match (horizontal, delta.row > 0 || delta.col > 0) {
                (true, true) => col == region.col_end(),
                (true, false) => col == region.col,
                (false, true) => row == region.row_end(),
                (false, false) => row == region.row,
            };

            if on_exit_edge {
                let adjusted = if horizontal {
                    let desired = take_memory(&mut self.desired_row, id);
                    exit_step(delta.col, region.colspan).map(|col| CellDelta {
                        row: desired.and_then(|d| offset(row, d)).unwrap_or(delta.row),
                        col,
                    })
                } else {
                    let desired = take_memory(&mut self.desired_col, id);
                    exit_step(delta.row, region.rowspan).map(|row| CellDelta {
                        row,
                        col: desired.and_then(|d| offset(col, d)).unwrap_or(delta.col),
                    })
                };
                let adjusted = adjusted.unwrap_or(delta);
                log::debug!("leaving {} at {:?}: {:?} -> {:?}", region, coord, delta, adjusted);
                return adjusted;
            }
        }

        // Entering a merge from outside
        let dest_row = i64::from(row) + i64::from(delta.row);
        let dest_col = i64::from(col) + i64::from(delta.col);
        let (dest_row, dest_col) = match (u32::try_from(dest_row), u32::try_from(dest_col)) {
            (Ok(r), Ok(c)) => (r, c),
            _ => return delta,
        };

        if let Some((id, target)) = merged.region_covering(dest_row, dest_col) {
            if !target.contains(row, col) {
                let mut adjusted = delta;
                if horizontal {
                    let Some(snap) = offset(row, target.row) else { return delta };
                    self.desired_row = Some(CrossAxisMemory { region: id, desired: row });
                    adjusted.row = snap;
                } else {
                    let Some(snap) = offset(col, target.col) else { return delta };
                    self.desired_col = Some(CrossAxisMemory { region: id, desired: col });
                    adjusted.col = snap;
                }
                log::debug!("entering {} from {:?}: {:?} -> {:?}", target, coord, delta, adjusted);
                return adjusted;
            }
        }

        delta
    }
}
