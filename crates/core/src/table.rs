//! Page and frame tables.
//!
//! The resident data model of the simulator: one slot per physical frame and
//! one entry per virtual page ever referenced. The two tables are kept as a
//! bijection between present pages and occupied frames. Every mutating
//! operation touches exactly one page entry and at most one frame slot.
//!
//! # Performance
//!
//! - **Lookups and updates:** O(1) (hash map for pages, vector for frames)
//! - **`resident_pages()`:** O(P log P), sorted for presentation

use std::collections::HashMap;

use serde::Serialize;

use crate::common::{FrameIndex, InvariantViolation, PageNumber};

/// Page table entry for one virtual page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VirtualPage {
    /// Frame holding the page, if resident.
    pub frame: Option<FrameIndex>,
    /// Presence bit. True iff `frame` is set.
    pub present: bool,
    /// Reference bit, consumed by the clock policy.
    pub referenced: bool,
}

/// Combined page table and physical frame table.
#[derive(Debug, Clone)]
pub struct PageFrameTable {
    frames: Vec<Option<PageNumber>>,
    pages: HashMap<PageNumber, VirtualPage>,
}

impl PageFrameTable {
    /// Creates a table with `total_frames` free frames and no pages.
    pub fn new(total_frames: usize) -> Self {
        Self {
            frames: vec![None; total_frames],
            pages: HashMap::new(),
        }
    }

    /// Size of the physical frame pool.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether `page` currently occupies a frame.
    pub fn is_resident(&self, page: PageNumber) -> bool {
        self.pages.get(&page).is_some_and(|entry| entry.present)
    }

    /// Frame holding `page`, if resident.
    pub fn frame_of(&self, page: PageNumber) -> Option<FrameIndex> {
        self.pages.get(&page).and_then(|entry| entry.frame)
    }

    /// Page occupying `frame`, if any.
    pub fn page_of(&self, frame: FrameIndex) -> Option<PageNumber> {
        self.frames.get(frame).copied().flatten()
    }

    /// Whether `frame` exists and holds no page.
    pub fn is_free(&self, frame: FrameIndex) -> bool {
        matches!(self.frames.get(frame), Some(None))
    }

    /// Reference bit of `page`; false for unknown pages.
    pub fn is_referenced(&self, page: PageNumber) -> bool {
        self.pages.get(&page).is_some_and(|entry| entry.referenced)
    }

    /// Page table entry for `page`, if it was ever referenced.
    pub fn page(&self, page: PageNumber) -> Option<&VirtualPage> {
        self.pages.get(&page)
    }

    /// Records that `page` has been referenced without loading it.
    ///
    /// Creates the page table entry lazily. Evicted pages keep their entry.
    pub fn touch(&mut self, page: PageNumber) {
        let _ = self.pages.entry(page).or_default();
    }

    /// Places `page` into the free frame `frame`.
    ///
    /// Sets the mapping in both directions, marks the page present and sets
    /// its reference bit.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything if the frame does not exist, is
    /// occupied, or the page is already resident elsewhere.
    pub fn load(&mut self, page: PageNumber, frame: FrameIndex) -> Result<(), InvariantViolation> {
        let slot = self
            .frames
            .get_mut(frame)
            .ok_or(InvariantViolation::FrameOutsideAllocation(frame))?;
        if let Some(occupant) = *slot {
            return Err(InvariantViolation::FrameOccupied { frame, occupant });
        }
        let entry = self.pages.entry(page).or_default();
        if let Some(current) = entry.frame {
            return Err(InvariantViolation::PageAlreadyResident {
                page,
                frame: current,
            });
        }
        *slot = Some(page);
        *entry = VirtualPage {
            frame: Some(frame),
            present: true,
            referenced: true,
        };
        Ok(())
    }

    /// Removes `page` from memory and frees its frame.
    ///
    /// The page table entry survives with `present = false` and no frame.
    /// Returns the frame that was freed.
    ///
    /// # Errors
    ///
    /// Fails if `page` is not resident.
    pub fn evict(&mut self, page: PageNumber) -> Result<FrameIndex, InvariantViolation> {
        let entry = self
            .pages
            .get_mut(&page)
            .filter(|entry| entry.present)
            .ok_or(InvariantViolation::PageNotResident(page))?;
        let frame = entry
            .frame
            .ok_or(InvariantViolation::PageNotResident(page))?;
        let slot = self
            .frames
            .get_mut(frame)
            .ok_or(InvariantViolation::FrameOutsideAllocation(frame))?;
        if *slot != Some(page) {
            return Err(InvariantViolation::TableMismatch {
                frame,
                detail: format!("page {page} maps here but slot holds {slot:?}"),
            });
        }
        *slot = None;
        entry.frame = None;
        entry.present = false;
        Ok(frame)
    }

    /// Sets the reference bit of a resident page.
    pub fn mark_referenced(&mut self, page: PageNumber) -> Result<(), InvariantViolation> {
        self.resident_entry_mut(page)?.referenced = true;
        Ok(())
    }

    /// Clears the reference bit of a resident page.
    pub fn clear_referenced(&mut self, page: PageNumber) -> Result<(), InvariantViolation> {
        self.resident_entry_mut(page)?.referenced = false;
        Ok(())
    }

    fn resident_entry_mut(
        &mut self,
        page: PageNumber,
    ) -> Result<&mut VirtualPage, InvariantViolation> {
        self.pages
            .get_mut(&page)
            .filter(|entry| entry.present)
            .ok_or(InvariantViolation::PageNotResident(page))
    }

    /// Frame occupancy, indexed by frame.
    pub fn frames(&self) -> &[Option<PageNumber>] {
        &self.frames
    }

    /// Resident pages with their entries, sorted by page number.
    pub fn resident_pages(&self) -> Vec<(PageNumber, VirtualPage)> {
        let mut resident: Vec<_> = self
            .pages
            .iter()
            .filter(|(_, entry)| entry.present)
            .map(|(&page, &entry)| (page, entry))
            .collect();
        resident.sort_unstable_by_key(|&(page, _)| page);
        resident
    }

    /// Number of page table entries, resident or not.
    pub fn known_pages(&self) -> usize {
        self.pages.len()
    }

    /// Verifies the bijection between present pages and occupied frames.
    ///
    /// # Errors
    ///
    /// Returns the first disagreement found.
    pub fn check_consistency(&self) -> Result<(), InvariantViolation> {
        let mut occupied = 0;
        for (frame, slot) in self.frames.iter().enumerate() {
            let Some(page) = *slot else { continue };
            occupied += 1;
            match self.pages.get(&page) {
                Some(entry) if entry.present && entry.frame == Some(frame) => {}
                other => {
                    return Err(InvariantViolation::TableMismatch {
                        frame,
                        detail: format!("slot holds page {page} whose entry is {other:?}"),
                    });
                }
            }
        }
        let mut present = 0;
        for (&page, entry) in &self.pages {
            if entry.present != entry.frame.is_some() {
                return Err(InvariantViolation::TableMismatch {
                    frame: entry.frame.unwrap_or_default(),
                    detail: format!("page {page} has inconsistent presence bit"),
                });
            }
            if entry.present {
                present += 1;
            }
        }
        if present != occupied {
            return Err(InvariantViolation::TableMismatch {
                frame: 0,
                detail: format!("{present} present pages but {occupied} occupied frames"),
            });
        }
        Ok(())
    }
}
