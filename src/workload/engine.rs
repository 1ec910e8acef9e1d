/*!
 * Simulation Engine
 * The iteration driver shared by both strategies
 */

use super::config::{Strategy, WorkloadConfig};
use super::sizes::{SizeSource, UniformSizes};
use super::stats::{UsageTracking, WorkloadStats};
use super::store::{BlockStore, FixedSlotStore, TrackedListStore};
use super::types::{BlockRecord, Payload, WorkloadError, WorkloadResult};
use crate::core::types::{Lifetime, Size};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Snapshot of one iteration, returned to the driver for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationReport {
    /// Display index supplied by the caller
    pub iteration: u32,
    /// Live bytes at the end of the batch, before any reclamation
    pub live_bytes: Size,
    /// Peak live bytes observed so far in the run
    pub peak_bytes: Size,
    /// Transient records tracked at measurement time, when the strategy
    /// tracks them
    pub fragments: Option<usize>,
    /// Live bytes after both reclamation passes
    pub live_after_reclaim: Size,
}

/// One simulation run: a strategy-selected block store and size stream
/// plus the accounting shared by both strategies.
pub struct Simulation {
    config: WorkloadConfig,
    strategy: Strategy,
    store: Box<dyn BlockStore>,
    sizes: Box<dyn SizeSource>,
    tracking: UsageTracking,
}

impl Simulation {
    /// Entropy-seeded simulation
    pub fn new(config: WorkloadConfig, strategy: Strategy) -> WorkloadResult<Self> {
        config.validate()?;
        Self::build(
            config,
            strategy,
            Box::new(UniformSizes::new(config.max_block_size)),
        )
    }

    /// Reproducible simulation for a fixed seed
    pub fn with_seed(config: WorkloadConfig, strategy: Strategy, seed: u64) -> WorkloadResult<Self> {
        config.validate()?;
        Self::build(
            config,
            strategy,
            Box::new(UniformSizes::seeded(config.max_block_size, seed)),
        )
    }

    /// Simulation over an injected size stream
    pub fn with_size_source(
        config: WorkloadConfig,
        strategy: Strategy,
        sizes: Box<dyn SizeSource>,
    ) -> WorkloadResult<Self> {
        config.validate()?;
        Self::build(config, strategy, sizes)
    }

    fn build(
        config: WorkloadConfig,
        strategy: Strategy,
        sizes: Box<dyn SizeSource>,
    ) -> WorkloadResult<Self> {
        let store: Box<dyn BlockStore> = match strategy {
            Strategy::TrackedList => Box::new(TrackedListStore::new()),
            Strategy::FixedSlot => Box::new(FixedSlotStore::new(
                config.batch_size,
                config.long_lived_frequency,
            )),
        };
        info!(
            "simulation initialized: strategy {}, batch {}, max block {} bytes, {} long-lived per batch, lifetime {}",
            strategy,
            config.batch_size,
            config.max_block_size,
            config.long_lived_per_batch(),
            config.long_lived_lifetime
        );
        Ok(Self {
            config,
            strategy,
            store,
            sizes,
            tracking: UsageTracking::new(),
        })
    }

    /// Strategy selected at construction
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Records the store is still tracking
    pub fn outstanding_blocks(&self) -> usize {
        self.store.tracked_blocks()
    }

    /// One allocate-then-reclaim cycle. `iteration` is a display index and
    /// has no effect on behavior.
    ///
    /// Usage is measured after the batch and before reclamation, so the
    /// reading includes every transient block of this batch plus all
    /// surviving long-lived blocks from earlier ones.
    pub fn run_iteration(&mut self, iteration: u32) -> WorkloadResult<IterationReport> {
        self.allocate_batch()?;

        let fragments = self.store.fragment_count();
        if let Some(count) = fragments {
            self.tracking.record_fragments(count);
        }
        let live_bytes = self.tracking.live_bytes();
        let peak_bytes = self.tracking.peak_live();

        let transient_released = self.store.reclaim_transient(&mut self.tracking);
        let expired_released = self.store.age_and_reclaim(&mut self.tracking);

        debug!(
            "iteration {}: {} bytes live at batch end, {} released, transient {}, expired {}",
            iteration,
            live_bytes,
            transient_released + expired_released,
            transient_released,
            expired_released
        );

        Ok(IterationReport {
            iteration,
            live_bytes,
            peak_bytes,
            fragments,
            live_after_reclaim: self.tracking.live_bytes(),
        })
    }

    /// The sole allocation path; the only place the totals and the peak
    /// can move upward
    fn allocate_batch(&mut self) -> WorkloadResult<()> {
        let lifetime = Lifetime::from(self.config.long_lived_lifetime);
        for position in 0..self.config.batch_size {
            let requested = self.sizes.next_size();
            let payload = match Payload::acquire(requested) {
                Ok(payload) => payload,
                Err(source) => {
                    error!(
                        "allocation refused at batch position {}: {} bytes requested",
                        position, requested
                    );
                    return Err(WorkloadError::AllocationRefused {
                        position,
                        requested,
                        source,
                    });
                }
            };
            self.tracking.record_alloc(requested);

            if position % self.config.long_lived_frequency == 0 {
                self.store.admit_long_lived(
                    position,
                    BlockRecord::long_lived(payload, requested, lifetime),
                    &mut self.tracking,
                );
            } else {
                self.store.admit_transient(
                    BlockRecord::transient(payload, requested),
                    &mut self.tracking,
                );
            }
        }
        Ok(())
    }

    /// Aggregate statistics snapshot
    pub fn final_statistics(&self) -> WorkloadStats {
        self.tracking.snapshot()
    }

    /// Release every block the store still tracks; returns bytes released.
    /// Afterwards `total_allocated == total_freed`.
    pub fn shutdown(&mut self) -> Size {
        let released = self.store.drain_all(&mut self.tracking);
        info!(
            "shutdown sweep released {} bytes, {} blocks still tracked",
            released,
            self.store.tracked_blocks()
        );
        released
    }
}
