/*!
 * Fixed-Slot Store
 * Fixed-capacity slot array for long-lived blocks only
 */

use super::BlockStore;
use crate::core::types::Size;
use crate::workload::stats::UsageTracking;
use crate::workload::types::BlockRecord;
use log::{debug, trace};

/// Fixed-slot strategy: long-lived blocks occupy a slot array indexed by
/// batch position, transient blocks are released the moment they are
/// admitted and never tracked.
///
/// Each aging cycle runs two separate passes, expiry first and then the
/// decrement, so expiry is always judged on the lifetime left over from
/// the previous cycle.
#[derive(Debug)]
pub struct FixedSlotStore {
    slots: Vec<Option<BlockRecord>>,
    frequency: usize,
}

impl FixedSlotStore {
    /// Capacity covers every long-lived position of one batch,
    /// `batch_size.div_ceil(frequency)` slots for positions 0, f, 2f, ...
    ///
    /// `frequency` must be positive.
    pub fn new(batch_size: usize, frequency: usize) -> Self {
        let capacity = batch_size.div_ceil(frequency);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            frequency,
        }
    }

    /// Slots available for long-lived records
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently holding a record
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Place a record in the slot owned by `position`, releasing any
    /// previous occupant first so an early overwrite can never leak it
    pub fn set(&mut self, position: usize, record: BlockRecord, tracking: &mut UsageTracking) {
        let index = position / self.frequency;
        if let Some(previous) = self.slots[index].take() {
            trace!(
                "slot {} recycled before expiry, {} bytes released",
                index,
                previous.size
            );
            tracking.record_free(previous.size);
        }
        self.slots[index] = Some(record);
    }

    /// Release every occupied slot whose lifetime has run out
    pub fn clear_if_expired(&mut self, tracking: &mut UsageTracking) -> Size {
        let mut released = 0;
        for slot in &mut self.slots {
            let expired = matches!(slot, Some(record) if record.is_expired());
            if expired {
                if let Some(record) = slot.take() {
                    released += record.size;
                    tracking.record_free(record.size);
                }
            }
        }
        released
    }

    /// Decrement every occupied slot; there is no floor, so a counter can
    /// sit below zero until the next clearing pass
    pub fn age_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(record) = slot.as_mut() {
                record.lifetime_remaining -= 1;
            }
        }
    }
}

impl BlockStore for FixedSlotStore {
    fn admit_long_lived(
        &mut self,
        position: usize,
        record: BlockRecord,
        tracking: &mut UsageTracking,
    ) {
        self.set(position, record, tracking);
    }

    fn admit_transient(&mut self, record: BlockRecord, tracking: &mut UsageTracking) {
        tracking.record_free(record.size);
        drop(record);
    }

    fn reclaim_transient(&mut self, _tracking: &mut UsageTracking) -> Size {
        0
    }

    fn age_and_reclaim(&mut self, tracking: &mut UsageTracking) -> Size {
        let released = self.clear_if_expired(tracking);
        self.age_all();
        if released > 0 {
            debug!("expiry pass released {} bytes", released);
        }
        released
    }

    fn fragment_count(&self) -> Option<usize> {
        None
    }

    fn drain_all(&mut self, tracking: &mut UsageTracking) -> Size {
        let mut released = 0;
        for slot in &mut self.slots {
            if let Some(record) = slot.take() {
                released += record.size;
                tracking.record_free(record.size);
            }
        }
        released
    }

    fn tracked_blocks(&self) -> usize {
        self.occupied()
    }
}
