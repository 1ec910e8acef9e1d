/*!
 * heapchurn
 * Synthetic allocation workload comparing two block-lifecycle strategies
 */

pub mod core;
pub mod workload;

// Re-export the driver-facing surface
pub use workload::{
    IterationReport, ReplaySizes, Simulation, SizeSource, Strategy, UniformSizes, WorkloadConfig,
    WorkloadError, WorkloadResult, WorkloadStats,
};
