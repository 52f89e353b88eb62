//! Clock (Second Chance) Replacement Policy.
//!
//! A pointer sweeps the allocated frames circularly. A frame whose page has
//! its reference bit clear is the victim; a set bit is cleared and the page
//! is skipped once. The pointer survives between faults and always names the
//! next frame to inspect. After a victim is chosen it moves one past it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(F) worst case, at most F + 1 inspections
//! - **Space Complexity:** O(1) beyond the reference bits in the page table

use tracing::trace;

use super::ReplacementPolicy;
use crate::allocation::AllocatedFrameSet;
use crate::common::{FrameIndex, InvariantViolation, PageNumber};
use crate::config::Algorithm;
use crate::table::PageFrameTable;

/// Clock policy state.
#[derive(Debug, Clone)]
pub struct ClockPolicy {
    /// Position of the hand within `frames`.
    hand: usize,
    frames: AllocatedFrameSet,
}

impl ClockPolicy {
    /// Creates a clock whose hand starts at the first allocated frame.
    pub const fn new(frames: AllocatedFrameSet) -> Self {
        Self { hand: 0, frames }
    }

    /// Frame the hand currently points at.
    pub fn hand(&self) -> FrameIndex {
        self.frames.frame_at(self.hand)
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frames.len();
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Clock
    }

    /// Sets the reference bit of the page.
    fn on_hit(&mut self, table: &mut PageFrameTable, page: PageNumber) -> Result<(), InvariantViolation> {
        table.mark_referenced(page)
    }

    fn select_victim(
        &mut self,
        table: &mut PageFrameTable,
        frames: &AllocatedFrameSet,
        _upcoming: &[PageNumber],
    ) -> Result<FrameIndex, InvariantViolation> {
        debug_assert_eq!(frames, &self.frames);
        // One full pass clears every bit, so the second pass must stop.
        let limit = 2 * self.frames.len();
        for _ in 0..limit {
            let frame = self.hand();
            let page = table
                .page_of(frame)
                .ok_or(InvariantViolation::NoVictimCandidate)?;
            if table.is_referenced(page) {
                trace!(page, frame, "clock second chance");
                table.clear_referenced(page)?;
                self.advance();
            } else {
                trace!(page, frame, "clock victim");
                self.advance();
                return Ok(frame);
            }
        }
        Err(InvariantViolation::ClockScanExhausted(limit))
    }

    fn pointer(&self) -> Option<FrameIndex> {
        Some(self.hand())
    }
}
