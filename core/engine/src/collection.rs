//! FILENAME: core/engine/src/collection.rs
//! PURPOSE: The set of merged regions of one grid.
//! CONTEXT: Regions live in an append-only arena. Removing a region only
//! tombstones its slot, so a `RegionId` held by an undo record keeps pointing
//! at the same region no matter what happens to other slots. Iteration order
//! is slot order, which is insertion order.

use crate::coord::{CellRange, GridSize};
use crate::error::MergeError;
use crate::region::MergeRegion;

/// Stable handle to a slot of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

impl RegionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotState {
    Live,
    /// Unmerged explicitly; may come back through undo/redo.
    Removed,
    /// Eliminated by a structural edit; can never come back.
    Dropped,
}

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) region: MergeRegion,
    pub(crate) state: SlotState,
    /// Loaded from configuration rather than merged during the session.
    pub(crate) baseline: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MergedCellsCollection {
    pub(crate) slots: Vec<Slot>,
}

impl MergedCellsCollection {
    pub fn new() -> Self {
        MergedCellsCollection { slots: Vec::new() }
    }

    /// Number of live regions.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.state == SlotState::Live).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|s| s.state == SlotState::Live)
    }

    /// Live regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &MergeRegion)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state == SlotState::Live)
            .map(|(i, s)| (RegionId(i), &s.region))
    }

    /// Snapshot of the live regions in insertion order.
    pub fn regions(&self) -> Vec<MergeRegion> {
        self.iter().map(|(_, r)| *r).collect()
    }

    pub fn get(&self, id: RegionId) -> Option<&MergeRegion> {
        self.slots
            .get(id.0)
            .filter(|s| s.state == SlotState::Live)
            .map(|s| &s.region)
    }

    pub fn is_baseline(&self, id: RegionId) -> bool {
        self.slots.get(id.0).map(|s| s.baseline).unwrap_or(false)
    }

    /// Checks that `region` could be inserted: not degenerate, inside the grid,
    /// and disjoint from every live region other than `ignore`.
    pub fn validate(
        &self,
        region: &MergeRegion,
        bounds: GridSize,
        ignore: Option<RegionId>,
    ) -> Result<(), MergeError> {
        if region.is_degenerate() {
            return Err(MergeError::Degenerate { region: *region });
        }
        // Check the far edges before building a range from them
        let fits = |start: u32, span: u32, len: u32| start.checked_add(span).map_or(false, |end| end <= len);
        if !fits(region.row, region.rowspan, bounds.rows) || !fits(region.col, region.colspan, bounds.cols) {
            return Err(MergeError::OutOfBounds {
                region: *region,
                grid: bounds,
            });
        }
        if let Some((_, existing)) = self
            .iter()
            .find(|(id, existing)| Some(*id) != ignore && existing.overlaps(region))
        {
            return Err(MergeError::Overlap {
                region: *region,
                existing: *existing,
            });
        }
        Ok(())
    }

    /// Adds a runtime region. The collection is unchanged on error.
    pub fn add(&mut self, region: MergeRegion, bounds: GridSize) -> Result<RegionId, MergeError> {
        self.insert_slot(region, bounds, false)
    }

    /// Adds a region coming from configuration.
    pub fn add_baseline(&mut self, region: MergeRegion, bounds: GridSize) -> Result<RegionId, MergeError> {
        self.insert_slot(region, bounds, true)
    }

    fn insert_slot(&mut self, region: MergeRegion, bounds: GridSize, baseline: bool) -> Result<RegionId, MergeError> {
        self.validate(&region, bounds, None)?;
        self.slots.push(Slot {
            region,
            state: SlotState::Live,
            baseline,
        });
        log::debug!("merged {} (baseline: {})", region, baseline);
        Ok(RegionId(self.slots.len() - 1))
    }

    /// Removes the region with the given id. Returns None if it is not live.
    pub fn remove(&mut self, id: RegionId) -> Option<MergeRegion> {
        let slot = self.slots.get_mut(id.0)?;
        if slot.state != SlotState::Live {
            return None;
        }
        slot.state = SlotState::Removed;
        log::debug!("unmerged {}", slot.region);
        Some(slot.region)
    }

    /// Removes the region covering (row, col), if any.
    pub fn remove_at(&mut self, row: u32, col: u32) -> Option<(RegionId, MergeRegion)> {
        let (id, _) = self.region_covering(row, col)?;
        self.remove(id).map(|region| (id, region))
    }

    /// Brings a removed region back in its original slot.
    ///
    /// Returns `Ok(true)` when the region is live afterwards, `Ok(false)` when
    /// the slot no longer exists or was eliminated by a structural edit, and an
    /// error when the region cannot coexist with the current live set.
    pub fn revive(&mut self, id: RegionId, bounds: GridSize) -> Result<bool, MergeError> {
        let (region, state) = match self.slots.get(id.0) {
            Some(slot) => (slot.region, slot.state),
            None => return Ok(false),
        };
        match state {
            SlotState::Live => Ok(true),
            SlotState::Dropped => Ok(false),
            SlotState::Removed => {
                self.validate(&region, bounds, Some(id))?;
                self.slots[id.0].state = SlotState::Live;
                log::debug!("re-merged {}", region);
                Ok(true)
            }
        }
    }

    /// Removes every region, baseline included, and forgets all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of slots, including unmerged and dropped ones.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Forgets unmerged and dropped slots. Live regions keep their order but
    /// get new ids, so this is only valid once no undo entry refers to any id.
    pub fn compact(&mut self) {
        let before = self.slots.len();
        self.slots.retain(|s| s.state == SlotState::Live);
        if self.slots.len() != before {
            log::debug!("compacted {} stale slots", before - self.slots.len());
        }
    }

    /// The region covering (row, col). Interior cells resolve to the same
    /// region (and id) as the anchor; the first-added region wins.
    pub fn region_covering(&self, row: u32, col: u32) -> Option<(RegionId, &MergeRegion)> {
        self.iter().find(|(_, region)| region.contains(row, col))
    }

    pub fn is_merged(&self, row: u32, col: u32) -> bool {
        self.region_covering(row, col).is_some()
    }

    /// All live regions overlapping `range`, in insertion order.
    pub fn regions_intersecting(&self, range: &CellRange) -> Vec<(RegionId, MergeRegion)> {
        self.iter()
            .filter(|(_, region)| region.intersects_range(range))
            .map(|(id, region)| (id, *region))
            .collect()
    }

    /// Whether merging exactly `range` would be accepted.
    pub fn can_merge_range(&self, range: &CellRange, bounds: GridSize) -> bool {
        self.validate(&MergeRegion::from_range(range), bounds, None).is_ok()
    }
}
