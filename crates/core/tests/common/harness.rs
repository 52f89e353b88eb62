use pagesim_core::common::PageNumber;
use pagesim_core::config::{Algorithm, Config};
use pagesim_core::sim::{AccessEvent, Simulator, Snapshot};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wraps a simulator and records the state before every reference.
#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
    /// Snapshot taken before each processed reference, index-aligned with events.
    pub before: Vec<Snapshot>,
}

impl TestContext {
    pub fn new(config: Config) -> Self {
        init_tracing();
        let sim = Simulator::new(config).unwrap();
        Self {
            sim,
            before: Vec::new(),
        }
    }

    /// Global-mode context.
    pub fn global(frames: usize, sequence: &[PageNumber], algorithm: Algorithm) -> Self {
        Self::new(Config::new(frames, sequence.to_vec(), algorithm))
    }

    /// Local-mode context with the given partition.
    pub fn local(
        frames: usize,
        partition: usize,
        sequence: &[PageNumber],
        algorithm: Algorithm,
    ) -> Self {
        Self::new(Config::new(frames, sequence.to_vec(), algorithm).with_local_partition(partition))
    }

    /// Processes one reference and verifies the page/frame bijection.
    pub fn step(&mut self) -> Option<AccessEvent> {
        let snapshot = self.sim.snapshot();
        let event = self.sim.step().unwrap();
        if event.is_some() {
            self.before.push(snapshot);
        }
        self.sim.table().check_consistency().unwrap();
        event
    }

    /// Processes every remaining reference.
    pub fn run(&mut self) -> Vec<AccessEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step() {
            events.push(event);
        }
        events
    }

    /// Occupancy of every frame right now.
    pub fn frames(&self) -> Vec<Option<PageNumber>> {
        self.sim.table().frames().to_vec()
    }
}
