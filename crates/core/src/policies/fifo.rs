//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the resident page that was loaded earliest, regardless
//! of how recently it was referenced. Pages are queued in load order; a page
//! reloaded after eviction is queued again at the tail.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1)
//!   - `select_victim()`: O(1)
//! - **Space Complexity:** O(R) where R is the number of resident pages
//! - **Worst Case:** Workloads with strong temporal locality, and Belady's anomaly

use std::collections::VecDeque;

use tracing::trace;

use super::ReplacementPolicy;
use crate::allocation::AllocatedFrameSet;
use crate::common::{FrameIndex, InvariantViolation, PageNumber};
use crate::config::Algorithm;
use crate::table::PageFrameTable;

/// FIFO policy state.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    /// Resident pages, oldest load at the front.
    queue: VecDeque<PageNumber>,
}

impl FifoPolicy {
    /// Creates a FIFO policy with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in load order, oldest first.
    pub fn queue(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.queue.iter().copied()
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fifo
    }

    /// Queues the page at the tail.
    fn on_load(&mut self, page: PageNumber, _frame: FrameIndex) {
        self.queue.push_back(page);
    }

    /// Dequeues the head.
    ///
    /// The head must be resident inside the allocated set; anything else
    /// means the queue went out of sync with the tables.
    fn select_victim(
        &mut self,
        table: &mut PageFrameTable,
        frames: &AllocatedFrameSet,
        _upcoming: &[PageNumber],
    ) -> Result<FrameIndex, InvariantViolation> {
        let page = self
            .queue
            .pop_front()
            .ok_or(InvariantViolation::EmptyFifoQueue)?;
        let frame = table
            .frame_of(page)
            .ok_or(InvariantViolation::PageNotResident(page))?;
        if !frames.contains(frame) {
            return Err(InvariantViolation::FrameOutsideAllocation(frame));
        }
        trace!(page, frame, queued = self.queue.len(), "fifo head selected");
        Ok(frame)
    }
}
