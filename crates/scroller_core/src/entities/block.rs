//! Triggerable blocks
//!
//! Question blocks release a configured payload exactly once when hit from
//! below, then stay inactive forever; the hit also starts a short bounce
//! animation (upward impulse, gravity-settle back to the rest position).
//! Bricks break on the first hit and are removed at the end of the tick so
//! iteration over the block collection is never invalidated mid-tick.

use serde::{Deserialize, Serialize};

use crate::foundation::geometry::Aabb;

/// Side length of question blocks and bricks.
pub const BLOCK_SIZE: f32 = 32.0;

/// Upward impulse of the hit bounce, in pixels/tick.
const BOUNCE_IMPULSE: f32 = -8.0;

/// Gravity applied to the bounce animation, in pixels/tick².
const BOUNCE_GRAVITY: f32 = 1.0;

/// What a question block releases when hit.
///
/// Unknown payload names in level data fail deserialization, so an invalid
/// payload is rejected at load time and can never surface mid-tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockPayload {
    /// Score and coin credit, no spawned entity
    Coin,
    /// Spawns a mushroom pickup
    Mushroom,
    /// Spawns a fire flower pickup
    FireFlower,
    /// Spawns a star pickup
    Star,
    /// Spawns an extra-life mushroom pickup
    ExtraLife,
}

/// A one-shot question block.
#[derive(Debug, Clone)]
pub struct QuestionBlock {
    /// Collision box; moves during the bounce animation
    pub rect: Aabb,
    /// Still holding its payload
    pub active: bool,
    payload: BlockPayload,
    rest_y: f32,
    bounce_velocity: f32,
    bouncing: bool,
}

impl QuestionBlock {
    /// Create an active block at the given top-left corner.
    pub fn new(x: f32, y: f32, payload: BlockPayload) -> Self {
        Self {
            rect: Aabb::new(x, y, BLOCK_SIZE, BLOCK_SIZE),
            active: true,
            payload,
            rest_y: y,
            bounce_velocity: 0.0,
            bouncing: false,
        }
    }

    /// Hit from below.
    ///
    /// The first hit deactivates the block, starts the bounce and returns
    /// the payload for the spawn step. Any later hit is a no-op.
    pub fn hit(&mut self) -> Option<BlockPayload> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.bouncing = true;
        self.bounce_velocity = BOUNCE_IMPULSE;
        Some(self.payload)
    }

    /// Advance the bounce animation one tick.
    pub fn update(&mut self) {
        if !self.bouncing {
            return;
        }
        self.rect.y += self.bounce_velocity;
        self.bounce_velocity += BOUNCE_GRAVITY;
        if self.rect.y >= self.rest_y {
            self.rect.y = self.rest_y;
            self.bounce_velocity = 0.0;
            self.bouncing = false;
        }
    }
}

/// A breakable brick block.
#[derive(Debug, Clone)]
pub struct Brick {
    /// Collision box
    pub rect: Aabb,
    /// Unbreakable bricks shrug off hits
    pub breakable: bool,
    /// Marked by a hit; the end-of-tick purge removes broken bricks
    pub broken: bool,
}

impl Brick {
    /// Create a brick at the given top-left corner.
    pub fn new(x: f32, y: f32, breakable: bool) -> Self {
        Self {
            rect: Aabb::new(x, y, BLOCK_SIZE, BLOCK_SIZE),
            breakable,
            broken: false,
        }
    }

    /// Hit from below. Returns `true` if the brick broke on this hit.
    pub fn hit(&mut self) -> bool {
        if !self.breakable || self.broken {
            return false;
        }
        self.broken = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn payload_is_emitted_exactly_once() {
        let mut block = QuestionBlock::new(400.0, 350.0, BlockPayload::Mushroom);
        assert_eq!(block.hit(), Some(BlockPayload::Mushroom));
        assert!(!block.active);

        // Idempotent from here on: no payload, no new bounce.
        for _ in 0..30 {
            block.update();
        }
        assert_eq!(block.hit(), None);
        assert!(!block.bouncing);
    }

    #[test]
    fn bounce_rises_then_settles_back_to_rest() {
        let mut block = QuestionBlock::new(400.0, 350.0, BlockPayload::Coin);
        block.hit();

        block.update();
        assert!(block.rect.y < 350.0, "block should rise right after the hit");

        for _ in 0..30 {
            block.update();
        }
        assert_relative_eq!(block.rect.y, 350.0);
        assert!(!block.bouncing);
    }

    #[test]
    fn unbreakable_bricks_ignore_hits() {
        let mut brick = Brick::new(368.0, 350.0, false);
        assert!(!brick.hit());
        assert!(!brick.broken);

        let mut brick = Brick::new(368.0, 350.0, true);
        assert!(brick.hit());
        assert!(brick.broken);
        // Already broken; a second hit reports nothing new.
        assert!(!brick.hit());
    }
}
