//! Point-in-time view of simulator state for presentation layers.

use serde::Serialize;

use crate::common::{FrameIndex, PageNumber};

/// Page table row of a resident page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResidentPage {
    /// Page number.
    pub page: PageNumber,
    /// Frame holding it.
    pub frame: FrameIndex,
    /// Presence bit (always true for resident rows).
    pub present: bool,
    /// Reference bit.
    pub referenced: bool,
}

/// Full occupancy and page table state after some number of references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// References processed so far.
    pub position: usize,
    /// Occupancy of every physical frame, `None` when free.
    pub frames: Vec<Option<PageNumber>>,
    /// Number of leading frames allocated to the process.
    pub allocated_frames: usize,
    /// Resident pages sorted by page number.
    pub resident: Vec<ResidentPage>,
    /// Clock hand, for the clock policy only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_pointer: Option<FrameIndex>,
}

impl Snapshot {
    /// Whether `frame` belongs to the process.
    pub const fn is_allocated(&self, frame: FrameIndex) -> bool {
        frame < self.allocated_frames
    }

    /// Number of occupied frames.
    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }
}
