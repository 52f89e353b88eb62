//! Simulation statistics collection.
//!
//! Tracks reference counters for one run. It provides:
//! 1. **Counters:** Accesses, hits, faults, free-frame loads and evictions.
//! 2. **Derived metrics:** Fault and hit rates as percentages.

use serde::Serialize;

use crate::sim::event::{AccessEvent, Action};

/// Counters for one simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// References processed.
    pub accesses: u64,
    /// References that found their page resident.
    pub hits: u64,
    /// References that faulted.
    pub faults: u64,
    /// Faults served from a free frame.
    pub free_loads: u64,
    /// Faults that evicted a victim.
    pub evictions: u64,
}

impl SimStats {
    /// Accounts for one processed reference.
    pub fn record(&mut self, event: &AccessEvent) {
        self.accesses += 1;
        match event.action {
            Action::None => self.hits += 1,
            Action::LoadedFree => {
                self.faults += 1;
                self.free_loads += 1;
            }
            Action::Evicted => {
                self.faults += 1;
                self.evictions += 1;
            }
        }
    }

    /// Faults per hundred accesses, or `None` before the first access.
    pub fn fault_rate(&self) -> Option<f64> {
        Self::percent(self.faults, self.accesses)
    }

    /// Hits per hundred accesses, or `None` before the first access.
    pub fn hit_rate(&self) -> Option<f64> {
        Self::percent(self.hits, self.accesses)
    }

    fn percent(part: u64, whole: u64) -> Option<f64> {
        (whole > 0).then(|| 100.0 * part as f64 / whole as f64)
    }
}
