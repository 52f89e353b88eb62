//! Error definitions.
//!
//! This module defines the two error families of the simulator:
//! 1. **Configuration errors:** Rejected before any simulation state exists.
//! 2. **Invariant violations:** Construction bugs detected while processing a
//!    reference. They are fatal for the run and never retried.

use thiserror::Error;

use super::{FrameIndex, PageNumber};

/// Malformed configuration, reported before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The physical frame pool has no frames.
    #[error("total frame count must be positive")]
    NoFrames,

    /// The reference sequence is empty.
    #[error("reference sequence is empty")]
    EmptySequence,

    /// Local allocation was requested without a partition size.
    #[error("local allocation requires a partition size")]
    MissingPartition,

    /// Local partition size is zero or larger than the frame pool.
    #[error("partition size {partition} out of range 1..={total}")]
    PartitionOutOfRange {
        /// Requested partition size.
        partition: usize,
        /// Total number of physical frames.
        total: usize,
    },

    /// Unrecognized replacement algorithm token.
    #[error("unknown replacement algorithm `{0}` (expected FIFO, OPTIMAL or CLOCK)")]
    UnknownAlgorithm(String),

    /// Unrecognized allocation mode token.
    #[error("unknown allocation mode `{0}` (expected GLOBAL or LOCAL)")]
    UnknownAllocationMode(String),

    /// A reference sequence entry is not a non-negative integer.
    #[error("invalid page number `{0}` in reference sequence")]
    InvalidPageNumber(String),

    /// Reading a configuration file failed.
    #[error("failed to read configuration file")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be deserialized.
    #[error("malformed configuration document")]
    Json(#[from] serde_json::Error),
}

/// Broken internal invariant of the page/frame model or a replacement policy.
///
/// A valid configuration and a correct implementation never produce one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Attempted to load into a frame that already holds a page.
    #[error("frame {frame} already holds page {occupant}")]
    FrameOccupied {
        /// Target frame.
        frame: FrameIndex,
        /// Page currently in the frame.
        occupant: PageNumber,
    },

    /// Attempted to load a page that is already resident.
    #[error("page {page} is already resident in frame {frame}")]
    PageAlreadyResident {
        /// Page being loaded.
        page: PageNumber,
        /// Frame it already occupies.
        frame: FrameIndex,
    },

    /// Attempted to evict or inspect a page that is not resident.
    #[error("page {0} is not resident")]
    PageNotResident(PageNumber),

    /// A frame index outside the physical pool or the allocated set.
    #[error("frame {0} lies outside the allocated frame set")]
    FrameOutsideAllocation(FrameIndex),

    /// FIFO had to pick a victim but its queue was empty.
    #[error("FIFO queue is empty while every allocated frame is occupied")]
    EmptyFifoQueue,

    /// Clock swept the allocated set twice without finding a victim.
    #[error("clock scan found no victim after {0} inspections")]
    ClockScanExhausted(usize),

    /// No resident page was available as a victim candidate.
    #[error("no resident page available for eviction")]
    NoVictimCandidate,

    /// The page table and frame table disagree.
    #[error("page/frame tables disagree at frame {frame}: {detail}")]
    TableMismatch {
        /// Frame at which the mismatch was found.
        frame: FrameIndex,
        /// Description of the mismatch.
        detail: String,
    },
}

/// Any error produced by the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected before the run.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fatal invariant violation during the run.
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}
