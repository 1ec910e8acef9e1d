/*!
 * Workload Defaults
 * Centralized default parameters for the allocation workload
 */

/// Allocations performed per iteration
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Upper bound for a single allocation in bytes; sizes are drawn from [1, max]
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 1024;

/// Iterations per run
pub const DEFAULT_ITERATIONS: u32 = 10;

/// Every batch position divisible by this becomes a long-lived block
pub const DEFAULT_LONG_LIVED_FREQUENCY: usize = 100;

/// Aging passes a long-lived block survives before it is eligible for reclaim
pub const DEFAULT_LONG_LIVED_LIFETIME: u32 = 5;
