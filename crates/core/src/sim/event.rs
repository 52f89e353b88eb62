//! Per-reference simulation events.

use std::fmt;

use serde::Serialize;

use crate::common::{FrameIndex, PageNumber};

/// Whether a reference found its page in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// The page was resident.
    Hit,
    /// The page had to be loaded.
    Fault,
}

/// What the simulator did to memory while handling a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Nothing changed (hit).
    None,
    /// The page was loaded into a free frame.
    LoadedFree,
    /// A victim was evicted and the page loaded into its frame.
    Evicted,
}

/// Result of processing one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessEvent {
    /// Position of the reference in the sequence.
    pub index: usize,
    /// Referenced page.
    pub page: PageNumber,
    /// Hit or fault.
    pub outcome: Outcome,
    /// Memory action taken.
    pub action: Action,
    /// Evicted page, for [`Action::Evicted`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victim: Option<PageNumber>,
    /// Frame holding `page` after the reference.
    pub frame: FrameIndex,
}

impl AccessEvent {
    /// Event for a reference that hit in `frame`.
    pub const fn hit(index: usize, page: PageNumber, frame: FrameIndex) -> Self {
        Self {
            index,
            page,
            outcome: Outcome::Hit,
            action: Action::None,
            victim: None,
            frame,
        }
    }

    /// Event for a fault served from a free frame.
    pub const fn loaded_free(index: usize, page: PageNumber, frame: FrameIndex) -> Self {
        Self {
            index,
            page,
            outcome: Outcome::Fault,
            action: Action::LoadedFree,
            victim: None,
            frame,
        }
    }

    /// Event for a fault that evicted `victim` from `frame`.
    pub const fn evicted(
        index: usize,
        page: PageNumber,
        victim: PageNumber,
        frame: FrameIndex,
    ) -> Self {
        Self {
            index,
            page,
            outcome: Outcome::Fault,
            action: Action::Evicted,
            victim: Some(victim),
            frame,
        }
    }

    /// Whether this reference faulted.
    pub fn is_fault(&self) -> bool {
        self.outcome == Outcome::Fault
    }
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.action, self.victim) {
            (Action::Evicted, Some(victim)) => write!(
                f,
                "PAGE FAULT: page {} not in memory; evicted page {} from frame {} and loaded page {}",
                self.page, victim, self.frame, self.page
            ),
            (Action::LoadedFree, _) => write!(
                f,
                "PAGE FAULT: page {} not in memory; loaded into free frame {}",
                self.page, self.frame
            ),
            _ => write!(f, "HIT: page {} is in frame {}", self.page, self.frame),
        }
    }
}
