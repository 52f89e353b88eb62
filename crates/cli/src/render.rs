//! Plain-text rendering of simulator state.
//!
//! Everything here reads events, snapshots and counters produced by the core;
//! no simulation decisions are made.

use std::io::{self, Write};

use pagesim_core::common::PageNumber;
use pagesim_core::config::{Algorithm, AllocationMode};
use pagesim_core::sim::{AccessEvent, Snapshot};
use pagesim_core::stats::SimStats;

const RULE: &str = "================ VIRTUAL MEMORY SIMULATOR ================";

/// Writes the reference sequence with the reference at `current` bracketed.
pub fn sequence_line(
    out: &mut impl Write,
    sequence: &[PageNumber],
    current: usize,
) -> io::Result<()> {
    write!(out, "Sequence:")?;
    for (i, page) in sequence.iter().enumerate() {
        if i == current {
            write!(out, " [{page}]")?;
        } else {
            write!(out, " {page}")?;
        }
    }
    writeln!(out)
}

/// Writes the full state view after one reference.
pub fn state(
    out: &mut impl Write,
    sequence: &[PageNumber],
    mode: AllocationMode,
    algorithm: Algorithm,
    snapshot: &Snapshot,
    event: &AccessEvent,
) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    sequence_line(out, sequence, event.index)?;
    writeln!(
        out,
        "Allocation: {mode} | Process frames: {} | Algorithm: {algorithm}\n",
        snapshot.allocated_frames
    )?;

    writeln!(out, "PHYSICAL MEMORY (frames)")?;
    for (frame, slot) in snapshot.frames.iter().enumerate() {
        match slot {
            Some(page) => write!(out, "F{frame}: page {page}")?,
            None => write!(out, "F{frame}: free")?,
        }
        if mode == AllocationMode::Local && !snapshot.is_allocated(frame) {
            write!(out, " (other process)")?;
        }
        if snapshot.clock_pointer == Some(frame) {
            write!(out, "  <-- pointer")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\nPAGE TABLE (P = present, R = referenced)")?;
    writeln!(out, "Page | Frame | P | R")?;
    for row in &snapshot.resident {
        writeln!(
            out,
            "{:<4} | {:<5} | {} | {}",
            row.page,
            row.frame,
            u8::from(row.present),
            u8::from(row.referenced)
        )?;
    }

    writeln!(out, "\nEVENT\n{event}")
}

/// Writes the end-of-run summary.
pub fn summary(out: &mut impl Write, stats: &SimStats) -> io::Result<()> {
    writeln!(out, "\n================== SIMULATION FINISHED ==================")?;
    writeln!(out, "Total accesses: {}", stats.accesses)?;
    writeln!(out, "Total page faults: {}", stats.faults)?;
    if let Some(rate) = stats.fault_rate() {
        writeln!(out, "Page fault rate: {rate:.2}%")?;
    }
    Ok(())
}
