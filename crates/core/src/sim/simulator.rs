//! Simulator: owns the page/frame table and the replacement policy side-by-side.
//!
//! One instance simulates one run. All mutable state (tables, FIFO queue,
//! clock hand, counters) lives here; independent runs use independent
//! instances.

use serde::Serialize;
use tracing::{debug, info};

use super::event::AccessEvent;
use super::snapshot::{ResidentPage, Snapshot};
use crate::allocation::AllocatedFrameSet;
use crate::common::{ConfigError, InvariantViolation, PageNumber, SimError};
use crate::config::{Algorithm, AllocationMode, Config};
use crate::policies::{ReplacementPolicy, build_policy};
use crate::stats::SimStats;
use crate::table::PageFrameTable;

/// Top-level replacement engine for one reference sequence.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    frames: AllocatedFrameSet,
    table: PageFrameTable,
    policy: Box<dyn ReplacementPolicy>,
    cursor: usize,
    stats: SimStats,
    events: Vec<AccessEvent>,
}

/// Final output of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    /// Replacement algorithm used.
    pub algorithm: Algorithm,
    /// Allocation mode used.
    pub allocation_mode: AllocationMode,
    /// Size of the physical pool.
    pub total_frames: usize,
    /// Frames the process was allowed to use.
    pub allocated_frames: usize,
    /// Counters at the end of the run.
    pub stats: SimStats,
    /// Fault rate in percent.
    pub fault_rate: Option<f64>,
    /// One event per reference, in order.
    pub events: Vec<AccessEvent>,
    /// State after the last reference.
    pub final_state: Snapshot,
}

impl Simulator {
    /// Validates `config` and builds a simulator in its initial state.
    ///
    /// All frames start free, the FIFO queue empty and the clock hand at the
    /// first allocated frame.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any malformed configuration. No state is
    /// created in that case.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let frames = AllocatedFrameSet::from_config(&config)?;
        let policy = build_policy(config.algorithm, &frames);
        info!(
            algorithm = %config.algorithm,
            mode = %config.allocation_mode,
            total_frames = config.total_frames,
            allocated = frames.len(),
            references = config.sequence.len(),
            "simulator configured"
        );
        Ok(Self {
            table: PageFrameTable::new(config.total_frames),
            frames,
            policy,
            cursor: 0,
            stats: SimStats::default(),
            events: Vec::with_capacity(config.sequence.len()),
            config,
        })
    }

    /// Processes the next reference.
    ///
    /// # Returns
    ///
    /// The event for the reference, or `None` once the sequence is exhausted.
    ///
    /// # Errors
    ///
    /// An [`InvariantViolation`] means the tables or the policy state are
    /// corrupt. The run must be abandoned.
    pub fn step(&mut self) -> Result<Option<AccessEvent>, InvariantViolation> {
        let Some(&page) = self.config.sequence.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.table.touch(page);

        let event = match self.table.frame_of(page) {
            Some(frame) => {
                self.policy.on_hit(&mut self.table, page)?;
                AccessEvent::hit(index, page, frame)
            }
            None => self.handle_fault(index, page)?,
        };

        self.cursor += 1;
        self.stats.record(&event);
        debug!(
            index,
            page,
            outcome = ?event.outcome,
            action = ?event.action,
            victim = ?event.victim,
            frame = event.frame,
            faults = self.stats.faults,
            "reference processed"
        );
        self.events.push(event.clone());
        Ok(Some(event))
    }

    fn handle_fault(
        &mut self,
        index: usize,
        page: PageNumber,
    ) -> Result<AccessEvent, InvariantViolation> {
        let free = self.frames.iter().find(|&f| self.table.is_free(f));
        if let Some(frame) = free {
            self.table.load(page, frame)?;
            self.policy.on_load(page, frame);
            return Ok(AccessEvent::loaded_free(index, page, frame));
        }

        let upcoming = &self.config.sequence[index + 1..];
        let frame = self
            .policy
            .select_victim(&mut self.table, &self.frames, upcoming)?;
        if !self.frames.contains(frame) {
            return Err(InvariantViolation::FrameOutsideAllocation(frame));
        }
        let victim = self
            .table
            .page_of(frame)
            .ok_or(InvariantViolation::NoVictimCandidate)?;
        let _ = self.table.evict(victim)?;
        self.table.load(page, frame)?;
        self.policy.on_load(page, frame);
        Ok(AccessEvent::evicted(index, page, victim, frame))
    }

    /// Processes every remaining reference.
    ///
    /// # Errors
    ///
    /// Stops at the first [`InvariantViolation`].
    pub fn run_to_end(&mut self) -> Result<(), InvariantViolation> {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Runs to completion and produces the final report.
    pub fn run(mut self) -> Result<SimReport, InvariantViolation> {
        self.run_to_end()?;
        info!(
            accesses = self.stats.accesses,
            faults = self.stats.faults,
            "simulation finished"
        );
        Ok(self.into_report())
    }

    /// Final report of the references processed so far.
    pub fn into_report(self) -> SimReport {
        let final_state = self.snapshot();
        SimReport {
            algorithm: self.config.algorithm,
            allocation_mode: self.config.allocation_mode,
            total_frames: self.config.total_frames,
            allocated_frames: self.frames.len(),
            fault_rate: self.stats.fault_rate(),
            stats: self.stats,
            events: self.events,
            final_state,
        }
    }

    /// Current occupancy, resident pages and clock hand.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.cursor,
            frames: self.table.frames().to_vec(),
            allocated_frames: self.frames.len(),
            resident: self
                .table
                .resident_pages()
                .into_iter()
                .filter_map(|(page, entry)| {
                    entry.frame.map(|frame| ResidentPage {
                        page,
                        frame,
                        present: entry.present,
                        referenced: entry.referenced,
                    })
                })
                .collect(),
            clock_pointer: self.policy.pointer(),
        }
    }

    /// Configuration of this run.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Frames the process may use.
    pub const fn allocated(&self) -> &AllocatedFrameSet {
        &self.frames
    }

    /// Page/frame table.
    pub const fn table(&self) -> &PageFrameTable {
        &self.table
    }

    /// Active replacement policy.
    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }

    /// Counters so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[AccessEvent] {
        &self.events
    }

    /// Number of references processed.
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// References not yet processed.
    pub fn remaining(&self) -> &[PageNumber] {
        &self.config.sequence[self.cursor..]
    }

    /// Whether every reference has been processed.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.config.sequence.len()
    }
}

/// Validates `config`, runs it to completion and returns the report.
///
/// # Examples
///
/// ```
/// use pagesim_core::config::{Algorithm, Config};
/// use pagesim_core::sim::simulate;
///
/// let config = Config::new(3, vec![7, 0, 1, 2, 0, 3, 0, 4], Algorithm::Optimal);
/// let report = simulate(config).unwrap();
/// assert_eq!(report.stats.faults, 6);
/// ```
pub fn simulate(config: Config) -> Result<SimReport, SimError> {
    Ok(Simulator::new(config)?.run()?)
}
