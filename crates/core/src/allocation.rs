//! Frame allocation policy.
//!
//! Computes which physical frames a process may use. Global allocation grants
//! the whole pool. Local allocation grants a fixed partition, and that
//! partition is always the contiguous prefix `0..partition_size`: other
//! (unmodeled) processes are assumed to own the frames above it.

use std::ops::Range;

use crate::common::{ConfigError, FrameIndex};
use crate::config::{AllocationMode, Config};

/// Ordered, immutable set of frame indices eligible for one process.
///
/// Every free-frame search, eviction and clock sweep is restricted to this
/// set. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedFrameSet {
    frames: Range<FrameIndex>,
    total: usize,
}

impl AllocatedFrameSet {
    /// Computes the allocated set for a frame pool.
    ///
    /// `partition_size` is only consulted in local mode.
    ///
    /// # Errors
    ///
    /// Fails if `total_frames` is zero, or in local mode if the partition is
    /// missing, zero, or larger than the pool.
    pub fn new(
        total_frames: usize,
        mode: AllocationMode,
        partition_size: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if total_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        let len = match mode {
            AllocationMode::Global => total_frames,
            AllocationMode::Local => {
                let n = partition_size.ok_or(ConfigError::MissingPartition)?;
                if n == 0 || n > total_frames {
                    return Err(ConfigError::PartitionOutOfRange {
                        partition: n,
                        total: total_frames,
                    });
                }
                n
            }
        };
        Ok(Self {
            frames: 0..len,
            total: total_frames,
        })
    }

    /// Computes the allocated set described by a configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.total_frames,
            config.allocation_mode,
            config.partition_size,
        )
    }

    /// Number of eligible frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Size of the whole physical pool, including frames outside the set.
    pub const fn total_frames(&self) -> usize {
        self.total
    }

    /// Whether `frame` belongs to the set.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.frames.contains(&frame)
    }

    /// Eligible frames in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.frames.clone()
    }

    /// Frame at `position` in iteration order, wrapping around.
    pub fn frame_at(&self, position: usize) -> FrameIndex {
        self.frames.start + position % self.frames.len()
    }

    /// Position of `frame` in iteration order.
    pub fn position_of(&self, frame: FrameIndex) -> Option<usize> {
        self.contains(frame).then(|| frame - self.frames.start)
    }
}
