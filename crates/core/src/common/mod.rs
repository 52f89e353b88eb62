//! Common types shared by every simulator component.
//!
//! This module provides:
//! 1. **Identifiers:** Virtual page numbers and physical frame indices.
//! 2. **Errors:** Configuration errors and invariant violations.

/// Configuration and invariant error types.
pub mod error;

pub use error::{ConfigError, InvariantViolation, SimError};

/// Virtual page number as it appears in a reference sequence.
pub type PageNumber = u64;

/// Index of a physical frame (`0..total_frames`).
pub type FrameIndex = usize;
