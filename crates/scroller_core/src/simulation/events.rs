//! Block-hit events
//!
//! Upward collisions against question blocks produce explicit events that
//! are queued and drained exactly once per tick by the spawn step, instead
//! of state flags polled off the blocks. Spawned pickups emerge above the
//! block that was hit, with the block between them and the player.

use crate::entities::block::BlockPayload;
use crate::foundation::geometry::Aabb;

/// One question-block hit, recorded for the spawn step.
#[derive(Debug, Clone, Copy)]
pub struct BlockEvent {
    /// What the block released
    pub payload: BlockPayload,
    /// The block's box at the moment of the hit; spawn positions derive
    /// from it
    pub origin: Aabb,
}
