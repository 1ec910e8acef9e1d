/*!
 * Workload Configuration
 * Run parameters and strategy selection
 */

use super::types::{WorkloadError, WorkloadResult};
use crate::core::limits;
use crate::core::types::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Allocation-lifecycle strategy, fixed for the life of a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Transient and long-lived blocks both tracked in growable collections
    TrackedList,
    /// Long-lived blocks in a fixed slot array, transient blocks freed on the spot
    FixedSlot,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TrackedList => write!(f, "tracked_list"),
            Strategy::FixedSlot => write!(f, "fixed_slot"),
        }
    }
}

impl FromStr for Strategy {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tracked_list" | "list" => Ok(Strategy::TrackedList),
            "fixed_slot" | "slots" => Ok(Strategy::FixedSlot),
            other => Err(WorkloadError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Run parameters, supplied once at construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Allocations performed per iteration
    pub batch_size: usize,
    /// Upper bound for a single allocation in bytes
    pub max_block_size: Size,
    /// Iterations per run
    pub iterations: u32,
    /// Every batch position divisible by this becomes long-lived
    pub long_lived_frequency: usize,
    /// Aging passes a long-lived block survives
    pub long_lived_lifetime: u32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            batch_size: limits::DEFAULT_BATCH_SIZE,
            max_block_size: limits::DEFAULT_MAX_BLOCK_SIZE,
            iterations: limits::DEFAULT_ITERATIONS,
            long_lived_frequency: limits::DEFAULT_LONG_LIVED_FREQUENCY,
            long_lived_lifetime: limits::DEFAULT_LONG_LIVED_LIFETIME,
        }
    }
}

impl WorkloadConfig {
    /// Reject zero-valued parameters; every knob is a positive integer
    pub fn validate(&self) -> WorkloadResult<()> {
        if self.batch_size == 0 {
            return Err(WorkloadError::InvalidConfig {
                parameter: "batch_size",
            });
        }
        if self.max_block_size == 0 {
            return Err(WorkloadError::InvalidConfig {
                parameter: "max_block_size",
            });
        }
        if self.iterations == 0 {
            return Err(WorkloadError::InvalidConfig {
                parameter: "iterations",
            });
        }
        if self.long_lived_frequency == 0 {
            return Err(WorkloadError::InvalidConfig {
                parameter: "long_lived_frequency",
            });
        }
        if self.long_lived_lifetime == 0 {
            return Err(WorkloadError::InvalidConfig {
                parameter: "long_lived_lifetime",
            });
        }
        Ok(())
    }

    /// Long-lived positions in one batch: 0, f, 2f, ... below batch_size
    pub fn long_lived_per_batch(&self) -> usize {
        self.batch_size.div_ceil(self.long_lived_frequency)
    }
}
