/*!
 * Tracked-List Store
 * Growable record collections for transient and long-lived blocks
 */

use super::BlockStore;
use crate::core::types::Size;
use crate::workload::stats::UsageTracking;
use crate::workload::types::BlockRecord;
use log::debug;

/// Stable handle naming one record in a [`BlockArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHandle(usize);

/// Arena of block records with O(1) insertion and O(1) removal by handle.
///
/// Vacated slots are recycled through a free-index stack. A handle stays
/// valid until its record is removed; afterwards it names a vacant (or
/// recycled) slot and removal through it is a no-op. Traversal order is
/// not insertion order; nothing here depends on it.
#[derive(Debug, Default)]
pub struct BlockArena {
    slots: Vec<Option<BlockRecord>>,
    free: Vec<usize>,
    live: usize,
}

impl BlockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, reusing a vacated slot when one exists
    pub fn insert(&mut self, record: BlockRecord) -> BlockHandle {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(record);
                BlockHandle(index)
            }
            None => {
                self.slots.push(Some(record));
                BlockHandle(self.slots.len() - 1)
            }
        }
    }

    /// Remove by handle; vacant slots are a no-op
    pub fn remove(&mut self, handle: BlockHandle) -> Option<BlockRecord> {
        let record = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        self.live -= 1;
        Some(record)
    }

    /// Records currently held
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Remove every record, visiting each exactly once
    pub fn drain(&mut self, mut visit: impl FnMut(BlockRecord)) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(record) = slot.take() {
                self.free.push(index);
                self.live -= 1;
                visit(record);
            }
        }
    }

    /// Combined aging pass: expired records are removed and visited, the
    /// survivors are decremented, all in one traversal
    pub fn age_and_sweep(&mut self, mut visit: impl FnMut(BlockRecord)) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let expired = matches!(slot, Some(record) if record.is_expired());
            if expired {
                if let Some(record) = slot.take() {
                    self.free.push(index);
                    self.live -= 1;
                    visit(record);
                }
            } else if let Some(record) = slot.as_mut() {
                record.lifetime_remaining -= 1;
            }
        }
    }
}

/// Tracked-list strategy: both block classes live in growable arenas until
/// a reclamation pass releases them.
#[derive(Debug, Default)]
pub struct TrackedListStore {
    transient: BlockArena,
    long_lived: BlockArena,
}

impl TrackedListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transient records currently tracked
    pub fn transient_len(&self) -> usize {
        self.transient.len()
    }

    /// Long-lived records currently tracked
    pub fn long_lived_len(&self) -> usize {
        self.long_lived.len()
    }
}

impl BlockStore for TrackedListStore {
    fn admit_long_lived(
        &mut self,
        _position: usize,
        record: BlockRecord,
        _tracking: &mut UsageTracking,
    ) {
        self.long_lived.insert(record);
    }

    fn admit_transient(&mut self, record: BlockRecord, _tracking: &mut UsageTracking) {
        self.transient.insert(record);
    }

    fn reclaim_transient(&mut self, tracking: &mut UsageTracking) -> Size {
        let mut released = 0;
        self.transient.drain(|record| {
            released += record.size;
            tracking.record_free(record.size);
        });
        if released > 0 {
            debug!("transient sweep released {} bytes", released);
        }
        released
    }

    fn age_and_reclaim(&mut self, tracking: &mut UsageTracking) -> Size {
        let mut released = 0;
        let mut reclaimed = 0usize;
        self.long_lived.age_and_sweep(|record| {
            released += record.size;
            reclaimed += 1;
            tracking.record_free(record.size);
        });
        if reclaimed > 0 {
            debug!(
                "aging pass reclaimed {} expired blocks, {} bytes",
                reclaimed, released
            );
        }
        released
    }

    fn fragment_count(&self) -> Option<usize> {
        Some(self.transient.len())
    }

    fn drain_all(&mut self, tracking: &mut UsageTracking) -> Size {
        let mut released = 0;
        self.transient.drain(|record| {
            released += record.size;
            tracking.record_free(record.size);
        });
        self.long_lived.drain(|record| {
            released += record.size;
            tracking.record_free(record.size);
        });
        released
    }

    fn tracked_blocks(&self) -> usize {
        self.transient.len() + self.long_lived.len()
    }
}
