//! Optimal (Belady) Replacement Policy.
//!
//! Evicts the resident page whose next reference lies farthest in the
//! future. A page that is never referenced again is treated as infinitely
//! far. Ties go to the first frame in allocated-set order.
//!
//! The policy keeps no state: every decision is recomputed from the
//! unprocessed suffix of the reference sequence.
//!
//! # Performance
//!
//! - **Time Complexity:** `select_victim()`: O(F * S), F allocated frames, S remaining references
//! - **Space Complexity:** O(1)

use tracing::trace;

use super::ReplacementPolicy;
use crate::allocation::AllocatedFrameSet;
use crate::common::{FrameIndex, InvariantViolation, PageNumber};
use crate::config::Algorithm;
use crate::table::PageFrameTable;

/// Optimal policy (stateless).
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimalPolicy;

impl OptimalPolicy {
    /// Creates the optimal policy.
    pub const fn new() -> Self {
        Self
    }
}

/// Distance to the next use of `page` in `upcoming`; `None` if never used again.
pub fn next_use(page: PageNumber, upcoming: &[PageNumber]) -> Option<usize> {
    upcoming.iter().position(|&p| p == page)
}

impl ReplacementPolicy for OptimalPolicy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Optimal
    }

    fn select_victim(
        &mut self,
        table: &mut PageFrameTable,
        frames: &AllocatedFrameSet,
        upcoming: &[PageNumber],
    ) -> Result<FrameIndex, InvariantViolation> {
        let mut best: Option<(FrameIndex, usize)> = None;
        for frame in frames.iter() {
            let Some(page) = table.page_of(frame) else {
                continue;
            };
            let distance = next_use(page, upcoming).unwrap_or(usize::MAX);
            trace!(page, frame, distance, "optimal candidate");
            // Strict comparison keeps the earliest frame on ties.
            if best.is_none_or(|(_, farthest)| distance > farthest) {
                best = Some((frame, distance));
            }
        }
        best.map(|(frame, _)| frame)
            .ok_or(InvariantViolation::NoVictimCandidate)
    }
}
