//! Page Replacement Policy Tests.
//!
//! Verifies the victim selection logic for FIFO, Optimal and Clock in
//! isolation. Each test fills a `PageFrameTable` by hand, informs the policy
//! of the loads, and asks for a victim.

use pagesim_core::allocation::AllocatedFrameSet;
use pagesim_core::common::{InvariantViolation, PageNumber};
use pagesim_core::config::{Algorithm, AllocationMode};
use pagesim_core::policies::{
    ClockPolicy, FifoPolicy, OptimalPolicy, ReplacementPolicy, build_policy,
};
use pagesim_core::table::PageFrameTable;

/// Global frame set of `n` frames.
fn global(n: usize) -> AllocatedFrameSet {
    AllocatedFrameSet::new(n, AllocationMode::Global, None).unwrap()
}

/// Loads `pages[i]` into frame `i` and reports each load to `policy`.
fn fill(policy: &mut dyn ReplacementPolicy, pages: &[PageNumber]) -> PageFrameTable {
    let mut table = PageFrameTable::new(pages.len());
    for (frame, &page) in pages.iter().enumerate() {
        table.load(page, frame).unwrap();
        policy.on_load(page, frame);
    }
    table
}

// ══════════════════════════════════════════════════════════
// 1. FIFO Policy
// ══════════════════════════════════════════════════════════

/// The first page loaded is the first evicted.
#[test]
fn fifo_evicts_in_load_order() {
    let frames = global(3);
    let mut policy = FifoPolicy::new();
    let mut table = fill(&mut policy, &[10, 20, 30]);

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 0);
    let _ = table.evict(10).unwrap();
    table.load(40, 0).unwrap();
    policy.on_load(40, 0);

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 1);
    assert_eq!(policy.queue().collect::<Vec<_>>(), vec![30, 40]);
}

/// Hits do not reorder the queue.
#[test]
fn fifo_ignores_hits() {
    let frames = global(2);
    let mut policy = FifoPolicy::new();
    let mut table = fill(&mut policy, &[1, 2]);
    policy.on_hit(&mut table, 1).unwrap();
    policy.on_hit(&mut table, 1).unwrap();
    assert_eq!(policy.select_victim(&mut table, &frames, &[1, 1]).unwrap(), 0);
}

/// An empty queue with a full memory is an invariant violation.
#[test]
fn fifo_empty_queue_is_violation() {
    let frames = global(1);
    let mut table = PageFrameTable::new(1);
    table.load(1, 0).unwrap();
    let mut policy = FifoPolicy::new();
    assert_eq!(
        policy.select_victim(&mut table, &frames, &[]),
        Err(InvariantViolation::EmptyFifoQueue)
    );
}

/// A queued page that is no longer resident is an invariant violation.
#[test]
fn fifo_stale_head_is_violation() {
    let frames = global(2);
    let mut policy = FifoPolicy::new();
    let mut table = fill(&mut policy, &[1, 2]);
    let _ = table.evict(1).unwrap();
    assert_eq!(
        policy.select_victim(&mut table, &frames, &[]),
        Err(InvariantViolation::PageNotResident(1))
    );
}

/// A queued page outside the local partition is an invariant violation.
#[test]
fn fifo_head_outside_partition_is_violation() {
    let local = AllocatedFrameSet::new(3, AllocationMode::Local, Some(1)).unwrap();
    let mut table = PageFrameTable::new(3);
    table.load(8, 2).unwrap();
    let mut policy = FifoPolicy::new();
    policy.on_load(8, 2);
    assert_eq!(
        policy.select_victim(&mut table, &local, &[]),
        Err(InvariantViolation::FrameOutsideAllocation(2))
    );
}

// ══════════════════════════════════════════════════════════
// 2. Optimal Policy
// ══════════════════════════════════════════════════════════

/// Evicts the page used farthest in the future.
#[test]
fn optimal_evicts_farthest_next_use() {
    let frames = global(3);
    let mut policy = OptimalPolicy::new();
    let mut table = fill(&mut policy, &[1, 2, 3]);
    // Next uses: 1 -> 2, 2 -> 0, 3 -> 4.
    let upcoming = [2, 9, 1, 9, 3];
    assert_eq!(policy.select_victim(&mut table, &frames, &upcoming).unwrap(), 2);
}

/// A page never referenced again beats any finite distance.
#[test]
fn optimal_prefers_never_used_again() {
    let frames = global(3);
    let mut policy = OptimalPolicy::new();
    let mut table = fill(&mut policy, &[1, 2, 3]);
    let upcoming = [3, 1, 3, 1, 3, 1];
    assert_eq!(policy.select_victim(&mut table, &frames, &upcoming).unwrap(), 1);
}

/// Among pages never used again, the lowest frame wins.
#[test]
fn optimal_tie_goes_to_first_frame() {
    let frames = global(4);
    let mut policy = OptimalPolicy::new();
    let mut table = fill(&mut policy, &[5, 6, 7, 8]);
    assert_eq!(policy.select_victim(&mut table, &frames, &[6]).unwrap(), 0);
    assert_eq!(policy.select_victim(&mut table, &frames, &[5, 6]).unwrap(), 2);
    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 0);
}

/// Only frames of the local partition are candidates.
#[test]
fn optimal_respects_local_partition() {
    let local = AllocatedFrameSet::new(3, AllocationMode::Local, Some(2)).unwrap();
    let mut policy = OptimalPolicy::new();
    let mut table = fill(&mut policy, &[1, 2, 3]);
    // Page 3 in frame 2 is never used again but is not ours.
    assert_eq!(policy.select_victim(&mut table, &local, &[1, 2]).unwrap(), 1);
}

/// Optimal keeps no state and does not touch reference bits.
#[test]
fn optimal_is_stateless() {
    let frames = global(2);
    let mut policy = OptimalPolicy::new();
    let mut table = fill(&mut policy, &[1, 2]);
    let first = policy.select_victim(&mut table, &frames, &[1]).unwrap();
    let second = policy.select_victim(&mut table, &frames, &[1]).unwrap();
    assert_eq!(first, second);
    assert!(table.is_referenced(1) && table.is_referenced(2));
    assert_eq!(policy.pointer(), None);
}

// ══════════════════════════════════════════════════════════
// 3. Clock Policy
// ══════════════════════════════════════════════════════════

/// All bits set: one full pass clears them and the hand's start frame goes.
#[test]
fn clock_full_pass_then_first_frame() {
    let frames = global(3);
    let mut policy = ClockPolicy::new(frames.clone());
    let mut table = fill(&mut policy, &[1, 2, 3]);

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 0);
    assert_eq!(policy.hand(), 1);
    assert!(!table.is_referenced(2));
    assert!(!table.is_referenced(3));
}

/// An unreferenced page under the hand is taken immediately.
#[test]
fn clock_takes_unreferenced_page_without_clearing_others() {
    let frames = global(3);
    let mut policy = ClockPolicy::new(frames.clone());
    let mut table = fill(&mut policy, &[1, 2, 3]);
    table.clear_referenced(1).unwrap();

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 0);
    assert!(table.is_referenced(2));
    assert!(table.is_referenced(3));
}

/// Second chance: a referenced page is skipped once.
#[test]
fn clock_skips_referenced_page() {
    let frames = global(3);
    let mut policy = ClockPolicy::new(frames.clone());
    let mut table = fill(&mut policy, &[1, 2, 3]);
    table.clear_referenced(2).unwrap();
    table.clear_referenced(3).unwrap();

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 1);
    assert!(!table.is_referenced(1), "skipped page lost its bit");
    assert_eq!(policy.pointer(), Some(2));
}

/// A hit sets the bit again, so the page survives the next sweep.
#[test]
fn clock_hit_restores_second_chance() {
    let frames = global(2);
    let mut policy = ClockPolicy::new(frames.clone());
    let mut table = fill(&mut policy, &[1, 2]);
    table.clear_referenced(1).unwrap();
    table.clear_referenced(2).unwrap();
    policy.on_hit(&mut table, 1).unwrap();

    assert_eq!(policy.select_victim(&mut table, &frames, &[]).unwrap(), 1);
}

/// The hand wraps around within the local partition only.
#[test]
fn clock_wraps_within_partition() {
    let local = AllocatedFrameSet::new(4, AllocationMode::Local, Some(2)).unwrap();
    let mut policy = ClockPolicy::new(local.clone());
    let mut table = fill(&mut policy, &[1, 2, 3, 4]);

    assert_eq!(policy.select_victim(&mut table, &local, &[]).unwrap(), 0);
    assert_eq!(policy.hand(), 1);
    // Frames 2 and 3 belong to someone else and keep their bits.
    assert!(table.is_referenced(3));
    assert!(table.is_referenced(4));
}

/// An empty slot under the hand means the engine called in too early.
#[test]
fn clock_free_frame_is_violation() {
    let frames = global(2);
    let mut policy = ClockPolicy::new(frames.clone());
    let mut table = PageFrameTable::new(2);
    assert_eq!(
        policy.select_victim(&mut table, &frames, &[]),
        Err(InvariantViolation::NoVictimCandidate)
    );
}

// ══════════════════════════════════════════════════════════
// 4. Factory
// ══════════════════════════════════════════════════════════

#[test]
fn build_policy_matches_algorithm() {
    let frames = global(2);
    for algorithm in Algorithm::ALL {
        let policy = build_policy(algorithm, &frames);
        assert_eq!(policy.algorithm(), algorithm);
        assert_eq!(policy.pointer().is_some(), algorithm == Algorithm::Clock);
    }
}
