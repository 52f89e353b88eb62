//! Configuration system for the paging simulator.
//!
//! This module defines the configuration consumed by the simulator. It provides:
//! 1. **Enums:** Replacement algorithm and frame allocation mode, with token parsing.
//! 2. **Structure:** The run configuration (frames, sequence, policies).
//! 3. **Loading:** JSON deserialization and validation into [`ConfigError`].
//!
//! Configuration is supplied as JSON or built directly (the CLI builds it from flags).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, PageNumber};

/// Default configuration constants.
mod defaults {
    /// Frame count used when a configuration document omits it.
    pub const TOTAL_FRAMES: usize = 3;
}

/// Page replacement algorithms.
///
/// Selects how a victim is chosen when a fault finds no free frame
/// in the allocated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// First In First Out.
    ///
    /// Evicts the resident page that was loaded earliest.
    #[default]
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Belady's optimal algorithm.
    ///
    /// Evicts the resident page whose next use lies farthest in the future.
    #[serde(alias = "Optimal", alias = "optimal", alias = "OPT")]
    Optimal,
    /// Clock (second chance).
    ///
    /// Sweeps a circular pointer, clearing reference bits until it finds
    /// an unreferenced page.
    #[serde(alias = "Clock", alias = "clock")]
    Clock,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Self; 3] = [Self::Fifo, Self::Optimal, Self::Clock];

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Optimal => "OPTIMAL",
            Self::Clock => "CLOCK",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    /// Accepts names case-insensitively, `OPT`, and the menu codes `1`, `2`, `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" | "1" => Ok(Self::Fifo),
            "OPTIMAL" | "OPT" | "2" => Ok(Self::Optimal),
            "CLOCK" | "3" => Ok(Self::Clock),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Frame allocation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllocationMode {
    /// The process may use every physical frame.
    #[default]
    #[serde(alias = "Global", alias = "global")]
    Global,
    /// The process is restricted to the first `partition_size` frames.
    #[serde(alias = "Local", alias = "local")]
    Local,
}

impl AllocationMode {
    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Local => "LOCAL",
        }
    }
}

impl fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AllocationMode {
    type Err = ConfigError;

    /// Accepts names case-insensitively and the menu codes `G` and `L`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GLOBAL" | "G" => Ok(Self::Global),
            "LOCAL" | "L" => Ok(Self::Local),
            _ => Err(ConfigError::UnknownAllocationMode(s.to_string())),
        }
    }
}

/// Root configuration of one simulation run.
///
/// # Examples
///
/// ```
/// use pagesim_core::config::{Algorithm, AllocationMode, Config};
///
/// let json = r#"{
///     "total_frames": 4,
///     "sequence": [1, 2, 3, 4, 1, 2, 5],
///     "algorithm": "CLOCK",
///     "allocation_mode": "LOCAL",
///     "partition_size": 2
/// }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.algorithm, Algorithm::Clock);
/// assert_eq!(config.allocation_mode, AllocationMode::Local);
/// assert_eq!(config.allocated_frames(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of physical frames in the pool.
    #[serde(default = "Config::default_total_frames")]
    pub total_frames: usize,

    /// Virtual page references, in processing order.
    #[serde(default)]
    pub sequence: Vec<PageNumber>,

    /// Replacement algorithm.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Frame allocation policy.
    #[serde(default)]
    pub allocation_mode: AllocationMode,

    /// Frames reserved for the process under [`AllocationMode::Local`].
    /// Ignored in global mode.
    #[serde(default)]
    pub partition_size: Option<usize>,
}

impl Config {
    fn default_total_frames() -> usize {
        defaults::TOTAL_FRAMES
    }

    /// Builds a global-mode configuration.
    pub fn new(total_frames: usize, sequence: Vec<PageNumber>, algorithm: Algorithm) -> Self {
        Self {
            total_frames,
            sequence,
            algorithm,
            allocation_mode: AllocationMode::Global,
            partition_size: None,
        }
    }

    /// Switches to local allocation with the given partition size.
    #[must_use]
    pub fn with_local_partition(mut self, partition_size: usize) -> Self {
        self.allocation_mode = AllocationMode::Local;
        self.partition_size = Some(partition_size);
        self
    }

    /// Parses a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks every configuration rule.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: no frames, empty sequence, or a
    /// missing or out-of-range local partition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if self.allocation_mode == AllocationMode::Local {
            let partition = self.partition_size.ok_or(ConfigError::MissingPartition)?;
            if partition == 0 || partition > self.total_frames {
                return Err(ConfigError::PartitionOutOfRange {
                    partition,
                    total: self.total_frames,
                });
            }
        }
        Ok(())
    }

    /// Number of frames the process may use under this configuration.
    ///
    /// Meaningful only for a configuration that passes [`Config::validate`].
    pub fn allocated_frames(&self) -> usize {
        match self.allocation_mode {
            AllocationMode::Global => self.total_frames,
            AllocationMode::Local => self.partition_size.unwrap_or(self.total_frames),
        }
    }
}

/// Parses a reference sequence from text.
///
/// Entries may be separated by commas, whitespace, or both. Empty input yields
/// an empty sequence; [`Config::validate`] rejects it later.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPageNumber`] for any entry that is not a
/// non-negative integer.
pub fn parse_sequence(text: &str) -> Result<Vec<PageNumber>, ConfigError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<PageNumber>()
                .map_err(|_| ConfigError::InvalidPageNumber(token.to_string()))
        })
        .collect()
}
