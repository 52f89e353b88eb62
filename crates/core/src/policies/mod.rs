//! Page Replacement Policies.
//!
//! Implements the algorithms that select a victim frame when a page fault
//! finds every allocated frame occupied.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out (load-order queue).
//! - `Optimal`: Belady's farthest-next-use (reads ahead into the sequence).
//! - `Clock`: Second chance over a circular pointer.

/// Clock (second chance) replacement policy.
pub mod clock;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Belady's optimal replacement policy.
pub mod optimal;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use optimal::OptimalPolicy;

use std::fmt;

use crate::allocation::AllocatedFrameSet;
use crate::common::{FrameIndex, InvariantViolation, PageNumber};
use crate::config::Algorithm;
use crate::table::PageFrameTable;

/// Trait for page replacement policies.
///
/// Defines the hooks the simulator calls on hits and loads, and victim
/// selection on a fault with no free frame. Each implementation owns its
/// private cross-reference state.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Algorithm this policy implements.
    fn algorithm(&self) -> Algorithm;

    /// Updates policy state after `page` hit in memory.
    ///
    /// # Arguments
    ///
    /// * `table` - The page/frame table, for policies that keep state in it.
    /// * `page` - The page that was referenced.
    fn on_hit(&mut self, _table: &mut PageFrameTable, _page: PageNumber) -> Result<(), InvariantViolation> {
        Ok(())
    }

    /// Updates policy state after `page` was loaded into `frame`.
    fn on_load(&mut self, _page: PageNumber, _frame: FrameIndex) {}

    /// Selects the frame whose page will be evicted.
    ///
    /// Called only when every frame of `frames` is occupied. The policy must
    /// not mutate occupancy; it may update reference bits.
    ///
    /// # Arguments
    ///
    /// * `table` - The page/frame table.
    /// * `frames` - Frames eligible for eviction.
    /// * `upcoming` - References after the faulting one, in order.
    ///
    /// # Returns
    ///
    /// The frame index of the victim, always a member of `frames`.
    fn select_victim(
        &mut self,
        table: &mut PageFrameTable,
        frames: &AllocatedFrameSet,
        upcoming: &[PageNumber],
    ) -> Result<FrameIndex, InvariantViolation>;

    /// Current clock pointer, for policies that have one.
    fn pointer(&self) -> Option<FrameIndex> {
        None
    }
}

/// Builds the policy for `algorithm` over the given allocated set.
pub fn build_policy(
    algorithm: Algorithm,
    frames: &AllocatedFrameSet,
) -> Box<dyn ReplacementPolicy> {
    match algorithm {
        Algorithm::Fifo => Box::new(FifoPolicy::new()),
        Algorithm::Optimal => Box::new(OptimalPolicy::new()),
        Algorithm::Clock => Box::new(ClockPolicy::new(frames.clone())),
    }
}
