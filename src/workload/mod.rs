/*!
 * Workload Module
 * Allocation-lifecycle simulation over swappable block stores
 */

pub mod config;
pub mod engine;
pub mod sizes;
pub mod stats;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{Strategy, WorkloadConfig};
pub use engine::{IterationReport, Simulation};
pub use sizes::{ReplaySizes, SizeSource, UniformSizes};
pub use stats::{UsageTracking, WorkloadStats};
pub use store::{BlockArena, BlockHandle, BlockStore, FixedSlotStore, TrackedListStore};
pub use types::{BlockRecord, Payload, WorkloadError, WorkloadResult};
