//! Allocation Policy Tests.
//!
//! Global allocation grants the whole pool; local allocation grants the
//! prefix `0..partition`. Invalid sizes are configuration errors.

use pagesim_core::allocation::AllocatedFrameSet;
use pagesim_core::common::ConfigError;
use pagesim_core::config::AllocationMode;
use rstest::rstest;

#[rstest]
#[case::global_ignores_partition(AllocationMode::Global, 4, Some(2), vec![0, 1, 2, 3])]
#[case::global_without_partition(AllocationMode::Global, 3, None, vec![0, 1, 2])]
#[case::local_prefix(AllocationMode::Local, 5, Some(2), vec![0, 1])]
#[case::local_whole_pool(AllocationMode::Local, 3, Some(3), vec![0, 1, 2])]
#[case::single_frame(AllocationMode::Local, 1, Some(1), vec![0])]
fn allocated_frames(
    #[case] mode: AllocationMode,
    #[case] total: usize,
    #[case] partition: Option<usize>,
    #[case] expected: Vec<usize>,
) {
    let set = AllocatedFrameSet::new(total, mode, partition).unwrap();
    assert_eq!(set.iter().collect::<Vec<_>>(), expected);
    assert_eq!(set.len(), expected.len());
    assert_eq!(set.total_frames(), total);
    assert!(!set.is_empty());
}

#[test]
fn local_set_excludes_frames_above_partition() {
    let set = AllocatedFrameSet::new(6, AllocationMode::Local, Some(4)).unwrap();
    assert!(set.contains(3));
    assert!(!set.contains(4));
    assert!(!set.contains(5));
}

#[test]
fn zero_frames_rejected_in_both_modes() {
    assert!(matches!(
        AllocatedFrameSet::new(0, AllocationMode::Global, None),
        Err(ConfigError::NoFrames)
    ));
    assert!(matches!(
        AllocatedFrameSet::new(0, AllocationMode::Local, Some(1)),
        Err(ConfigError::NoFrames)
    ));
}

#[rstest]
#[case(0)]
#[case(5)]
#[case(100)]
fn partition_out_of_range(#[case] partition: usize) {
    let err = AllocatedFrameSet::new(4, AllocationMode::Local, Some(partition)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::PartitionOutOfRange { partition: p, total: 4 } if p == partition
    ));
}

#[test]
fn local_without_partition_rejected() {
    assert!(matches!(
        AllocatedFrameSet::new(4, AllocationMode::Local, None),
        Err(ConfigError::MissingPartition)
    ));
}
