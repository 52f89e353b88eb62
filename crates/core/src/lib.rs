//! Demand-paging virtual memory simulator library.
//!
//! This crate simulates page replacement over a finite physical frame pool:
//! 1. **Allocation:** Global (whole pool) or local (fixed prefix partition) frame sets.
//! 2. **Tables:** Page table and frame table kept as a bijection.
//! 3. **Policies:** FIFO, Optimal (Belady) and Clock (second chance) victim selection.
//! 4. **Simulation:** Per-reference hit/fault engine with events, snapshots and statistics.
//!
//! The library performs no I/O and installs no logging subscriber; it emits
//! `tracing` events for the embedding application to collect.

/// Frame allocation policy (global or local partition).
pub mod allocation;
/// Common identifiers and error types.
pub mod common;
/// Simulator configuration (algorithm, allocation mode, sequence).
pub mod config;
/// Page replacement policies (FIFO, Optimal, Clock).
pub mod policies;
/// Replacement engine, events and snapshots.
pub mod sim;
/// Simulation statistics collection.
pub mod stats;
/// Page table and physical frame table.
pub mod table;

/// Root configuration type; build with `Config::new` or deserialize from JSON.
pub use crate::config::Config;
/// Replacement engine; construct with `Simulator::new`.
pub use crate::sim::Simulator;
