/*!
 * Block Stores
 * The collection contract shared by both lifecycle strategies
 */

mod list;
mod slots;

pub use list::{BlockArena, BlockHandle, TrackedListStore};
pub use slots::FixedSlotStore;

use super::stats::UsageTracking;
use super::types::BlockRecord;
use crate::core::types::Size;

/// Collection contract shared by both lifecycle strategies.
///
/// Every byte leaving a store is accounted through the supplied
/// `UsageTracking` exactly once, whether it leaves through admission
/// (immediate release or slot recycling), a reclamation pass, or the
/// shutdown sweep.
pub trait BlockStore {
    /// Register a long-lived block admitted at `position` within its batch
    fn admit_long_lived(
        &mut self,
        position: usize,
        record: BlockRecord,
        tracking: &mut UsageTracking,
    );

    /// Register a transient block: tracked for later reclamation, or
    /// released on the spot by stores that keep no transient records
    fn admit_transient(&mut self, record: BlockRecord, tracking: &mut UsageTracking);

    /// Release every tracked transient block; returns bytes released
    fn reclaim_transient(&mut self, tracking: &mut UsageTracking) -> Size;

    /// One aging cycle over long-lived blocks; returns bytes released.
    /// Whether expiry is judged before the decrement or together with it
    /// in a single traversal is variant-specific.
    fn age_and_reclaim(&mut self, tracking: &mut UsageTracking) -> Size;

    /// Transient records tracked at the moment of the call, for stores
    /// that track them
    fn fragment_count(&self) -> Option<usize>;

    /// Unconditional sweep of everything still tracked; returns bytes released
    fn drain_all(&mut self, tracking: &mut UsageTracking) -> Size;

    /// Records currently tracked, both classes combined
    fn tracked_blocks(&self) -> usize;
}
