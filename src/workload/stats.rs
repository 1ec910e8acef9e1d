/*!
 * Usage Accounting
 * Running accumulators and the statistics snapshot
 */

use crate::core::types::Size;
use serde::{Deserialize, Serialize};

/// Running accumulators for one simulation.
///
/// `total_allocated` and `total_freed` only grow. `live_bytes` carries
/// across iterations so long-lived blocks from earlier batches stay visible
/// in the current reading, and it is the only input to the peak.
#[derive(Debug, Clone, Default)]
pub struct UsageTracking {
    total_allocated: Size,
    total_freed: Size,
    live_bytes: Size,
    peak_live: Size,
    total_fragments: usize,
}

impl UsageTracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one acquired block; the only path that can raise the peak
    pub fn record_alloc(&mut self, size: Size) {
        self.total_allocated += size;
        self.live_bytes += size;
        if self.live_bytes > self.peak_live {
            self.peak_live = self.live_bytes;
        }
    }

    /// Account one released block
    pub fn record_free(&mut self, size: Size) {
        self.total_freed += size;
        self.live_bytes = self.live_bytes.saturating_sub(size);
    }

    /// Fold one iteration's fragment count into the running total
    pub fn record_fragments(&mut self, count: usize) {
        self.total_fragments += count;
    }

    /// Bytes currently held by live blocks
    pub fn live_bytes(&self) -> Size {
        self.live_bytes
    }

    /// Highest live-byte reading seen so far
    pub fn peak_live(&self) -> Size {
        self.peak_live
    }

    /// Point-in-time snapshot with derived metrics
    pub fn snapshot(&self) -> WorkloadStats {
        WorkloadStats {
            total_allocated: self.total_allocated,
            total_freed: self.total_freed,
            peak_live: self.peak_live,
            live_bytes: self.live_bytes,
            leaked_bytes: self.total_allocated - self.total_freed,
            total_fragments: self.total_fragments,
            average_fragment_size: if self.total_fragments > 0 {
                self.total_freed as f64 / self.total_fragments as f64
            } else {
                0.0
            },
        }
    }
}

/// Aggregate statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStats {
    /// Bytes acquired over the whole run
    pub total_allocated: Size,
    /// Bytes released over the whole run
    pub total_freed: Size,
    /// Highest live-byte reading
    pub peak_live: Size,
    /// Bytes still held at snapshot time
    pub live_bytes: Size,
    /// Allocated minus freed; zero after a shutdown sweep
    pub leaked_bytes: Size,
    /// Transient records observed across all iteration measurements
    pub total_fragments: usize,
    /// Freed bytes per observed fragment, 0.0 when none were observed
    pub average_fragment_size: f64,
}
