//! Pickups and projectiles
//!
//! Block-spawned pickups pop out of the block with a small upward impulse
//! and then obey ordinary terrain physics; each kind has its own kinematic
//! quirk (flowers stay put, stars keep bouncing, floating coins bob in
//! place without gravity). The fireball is the one projectile: it skips
//! along the ground under half gravity until its lifetime runs out.

use crate::config::TuningConfig;
use crate::entities::player::Facing;
use crate::foundation::geometry::{Aabb, VerticalHit};
use crate::foundation::math::Vec2;

/// Side length of the square pickups.
pub const PICKUP_SIZE: f32 = 32.0;

/// Floating coin collision box.
pub const COIN_WIDTH: f32 = 24.0;
/// Floating coin collision box.
pub const COIN_HEIGHT: f32 = 32.0;

/// Walking speed of mushrooms, in pixels/tick.
const MUSHROOM_SPEED: f32 = 2.0;
/// Walking speed of stars, in pixels/tick.
const STAR_SPEED: f32 = 3.0;
/// Upward impulse applied when a pickup pops out of a block.
const POP_UP_IMPULSE: f32 = -4.0;
/// Stars leave the ground with this velocity every time they land.
const STAR_BOUNCE: f32 = -8.0;
/// Floating coins move one pixel every this many ticks.
const COIN_BOB_PERIOD: u32 = 3;
/// Floating coins oscillate this many pixels around their rest position.
const COIN_BOB_AMPLITUDE: f32 = 4.0;

/// Pickup kind, carrying only the state that kind needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    /// Grows the player to Super
    Mushroom,
    /// Upgrades the player to Fire
    FireFlower,
    /// Arms star power
    Star,
    /// Grants an extra life
    ExtraLife,
    /// Score/coin credit; floats without gravity until collected
    Coin {
        /// Current displacement from the rest position
        bob_offset: f32,
        /// Direction of the next bob step (±1)
        bob_dir: f32,
        /// Tick counter driving the bob period
        ticks: u32,
    },
}

/// A collectible entity.
#[derive(Debug, Clone)]
pub struct Pickup {
    /// Collision box in world coordinates
    pub rect: Aabb,
    /// Velocity in pixels/tick (unused by floating coins)
    pub velocity: Vec2,
    /// Kind and per-kind state
    pub kind: PickupKind,
}

impl Pickup {
    /// Mushroom popping out of a block, walking right.
    pub fn mushroom(block: &Aabb) -> Self {
        Self::from_block(block, PickupKind::Mushroom, MUSHROOM_SPEED)
    }

    /// Fire flower popping out of a block; it never walks.
    pub fn fire_flower(block: &Aabb) -> Self {
        Self::from_block(block, PickupKind::FireFlower, 0.0)
    }

    /// Star popping out of a block with a full bounce impulse.
    pub fn star(block: &Aabb) -> Self {
        let mut star = Self::from_block(block, PickupKind::Star, STAR_SPEED);
        star.velocity.y = STAR_BOUNCE;
        star
    }

    /// Extra-life mushroom popping out of a block, walking right.
    pub fn extra_life(block: &Aabb) -> Self {
        Self::from_block(block, PickupKind::ExtraLife, MUSHROOM_SPEED)
    }

    /// Level-authored floating coin at the given top-left corner.
    pub fn floating_coin(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, COIN_WIDTH, COIN_HEIGHT),
            velocity: Vec2::zeros(),
            kind: PickupKind::Coin {
                bob_offset: 0.0,
                bob_dir: 1.0,
                ticks: 0,
            },
        }
    }

    // Spawn position is the block's corner, offset upward by the pickup's
    // own height so it appears resting on the block.
    fn from_block(block: &Aabb, kind: PickupKind, speed: f32) -> Self {
        Self {
            rect: Aabb::new(block.x, block.y - PICKUP_SIZE, PICKUP_SIZE, PICKUP_SIZE),
            velocity: Vec2::new(speed, POP_UP_IMPULSE),
            kind,
        }
    }

    /// Advance the pickup by one tick against the static terrain.
    pub fn update(&mut self, terrain: &[Aabb], tuning: &TuningConfig) {
        match &mut self.kind {
            PickupKind::Coin {
                bob_offset,
                bob_dir,
                ticks,
            } => {
                *ticks += 1;
                if *ticks % COIN_BOB_PERIOD == 0 {
                    self.rect.y += *bob_dir;
                    *bob_offset += *bob_dir;
                    if bob_offset.abs() > COIN_BOB_AMPLITUDE {
                        *bob_dir = -*bob_dir;
                    }
                }
            }
            PickupKind::FireFlower => {
                self.velocity.y += tuning.gravity;
                self.rect.y += self.velocity.y;
                for obstacle in terrain {
                    self.rect.resolve_vertical(&mut self.velocity.y, obstacle);
                }
            }
            PickupKind::Mushroom | PickupKind::ExtraLife | PickupKind::Star => {
                let bounces = matches!(self.kind, PickupKind::Star);
                self.velocity.y += tuning.gravity;

                self.rect.x += self.velocity.x;
                for obstacle in terrain {
                    let mut vx = self.velocity.x;
                    if self.rect.resolve_horizontal(&mut vx, obstacle) {
                        self.velocity.x = -self.velocity.x;
                        break;
                    }
                }

                self.rect.y += self.velocity.y;
                for obstacle in terrain {
                    if self.rect.resolve_vertical(&mut self.velocity.y, obstacle)
                        == Some(VerticalHit::Landed)
                        && bounces
                    {
                        self.velocity.y = STAR_BOUNCE;
                    }
                }
            }
        }
    }
}

/// Fireball collision box side length.
pub const FIREBALL_SIZE: f32 = 16.0;

/// Horizontal fireball speed, in pixels/tick.
const FIREBALL_SPEED: f32 = 8.0;
/// Initial upward velocity when launched.
const FIREBALL_LAUNCH_LIFT: f32 = -3.0;
/// Velocity after skipping off the ground.
const FIREBALL_BOUNCE: f32 = -4.0;
/// Ticks a fireball lives (3 s at the tick rate).
const FIREBALL_LIFETIME: u32 = 180;

/// A fireball shot by the Fire-state player.
#[derive(Debug, Clone)]
pub struct Fireball {
    /// Collision box in world coordinates
    pub rect: Aabb,
    /// Velocity in pixels/tick
    pub velocity: Vec2,
    /// Ticks until expiry
    pub ticks_left: u32,
}

impl Fireball {
    /// Launch a fireball centred at the given point, travelling toward
    /// `facing`.
    pub fn launch(center_x: f32, center_y: f32, facing: Facing) -> Self {
        Self {
            rect: Aabb::new(
                center_x - FIREBALL_SIZE / 2.0,
                center_y - FIREBALL_SIZE / 2.0,
                FIREBALL_SIZE,
                FIREBALL_SIZE,
            ),
            velocity: Vec2::new(FIREBALL_SPEED * facing.sign(), FIREBALL_LAUNCH_LIFT),
            ticks_left: FIREBALL_LIFETIME,
        }
    }

    /// Lifetime exhausted; the purge may remove it.
    pub const fn expired(&self) -> bool {
        self.ticks_left == 0
    }

    /// Advance the fireball by one tick.
    ///
    /// Half gravity keeps the arc shallow; landing turns into a skip
    /// instead of a stop, and walls are ignored entirely.
    pub fn update(&mut self, terrain: &[Aabb], tuning: &TuningConfig) {
        self.ticks_left = self.ticks_left.saturating_sub(1);

        self.velocity.y += tuning.gravity * 0.5;
        self.rect.x += self.velocity.x;
        self.rect.y += self.velocity.y;
        for obstacle in terrain {
            if self.rect.resolve_vertical(&mut self.velocity.y, obstacle)
                == Some(VerticalHit::Landed)
            {
                self.velocity.y = FIREBALL_BOUNCE;
            }
        }
    }
}
