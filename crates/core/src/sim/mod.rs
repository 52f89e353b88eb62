//! Simulation engine.
//!
//! Drives a reference sequence through the page/frame table and the selected
//! replacement policy, one reference per step.

/// Per-reference events.
pub mod event;
/// The replacement engine.
pub mod simulator;
/// State snapshots for presentation.
pub mod snapshot;

pub use event::{AccessEvent, Action, Outcome};
pub use simulator::{SimReport, Simulator, simulate};
pub use snapshot::{ResidentPage, Snapshot};
