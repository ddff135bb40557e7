//! Session state
//!
//! [`World`] owns everything a running level is: the player, the static
//! terrain, triggerable blocks, the generation-keyed entity arenas and the
//! session counters (score, coins, lives, timer). All per-tick mutation
//! goes through [`World::tick`](crate::simulation::step); this module holds
//! construction, the camera, life/reset bookkeeping and the view snapshot.

use slotmap::{new_key_type, SlotMap};

use crate::config::TuningConfig;
use crate::entities::block::{Brick, QuestionBlock};
use crate::entities::enemy::{Enemy, EnemyState};
use crate::entities::pickup::{Fireball, Pickup, PickupKind};
use crate::entities::player::{Facing, Player};
use crate::foundation::geometry::Aabb;
use crate::foundation::math::Vec2;
use crate::level::{LevelData, LevelError, GOAL_HEIGHT, GOAL_WIDTH, PIPE_WIDTH};
use crate::simulation::events::BlockEvent;
use crate::view::{EntityView, Readout, ViewKind, VisualState};
use crate::SCREEN_WIDTH;

new_key_type! {
    /// Stable handle to an enemy
    pub struct EnemyKey;
    /// Stable handle to a pickup
    pub struct PickupKey;
    /// Stable handle to a fireball
    pub struct FireballKey;
}

/// Flavor of a static terrain piece, for rendering only; collision treats
/// all terrain alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    /// Ground or platform segment
    Ground,
    /// Pipe
    Pipe,
}

/// One immovable collision box.
#[derive(Debug, Clone, Copy)]
pub struct Terrain {
    /// Collision box
    pub rect: Aabb,
    /// Render flavor
    pub kind: TerrainKind,
}

/// The complete state of a running level.
///
/// Construction takes level data by reference and the tuning by value; the
/// world owns its tuning for the whole session.
#[derive(Debug)]
pub struct World {
    pub(crate) player: Player,
    pub(crate) terrain: Vec<Terrain>,
    /// Terrain collision boxes, cached in `terrain` order
    pub(crate) solid: Vec<Aabb>,
    pub(crate) question_blocks: Vec<QuestionBlock>,
    pub(crate) bricks: Vec<Brick>,
    pub(crate) enemies: SlotMap<EnemyKey, Enemy>,
    pub(crate) pickups: SlotMap<PickupKey, Pickup>,
    pub(crate) fireballs: SlotMap<FireballKey, Fireball>,
    pub(crate) goal: Aabb,
    pub(crate) pending_block_events: Vec<BlockEvent>,
    pub(crate) score: u32,
    pub(crate) coins: u32,
    pub(crate) lives: i32,
    pub(crate) time_left: u32,
    pub(crate) timer_subtick: u32,
    pub(crate) level_width: f32,
    pub(crate) spawn: Vec2,
    pub(crate) camera_x: f32,
    pub(crate) tuning: TuningConfig,
}

impl World {
    /// Build a world from validated level data.
    pub fn new(data: &LevelData, tuning: TuningConfig) -> Result<Self, LevelError> {
        data.validate()?;

        let mut terrain = Vec::new();
        for &(x, y, width, height) in &data.ground {
            terrain.push(Terrain {
                rect: Aabb::new(x, y, width, height),
                kind: TerrainKind::Ground,
            });
        }
        for &(x, y, width, height) in &data.platforms {
            terrain.push(Terrain {
                rect: Aabb::new(x, y, width, height),
                kind: TerrainKind::Ground,
            });
        }
        for &(x, y, height) in &data.pipes {
            terrain.push(Terrain {
                rect: Aabb::new(x, y, PIPE_WIDTH, height),
                kind: TerrainKind::Pipe,
            });
        }
        let solid = terrain.iter().map(|t| t.rect).collect();

        let question_blocks = data
            .question_blocks
            .iter()
            .map(|&(x, y, payload)| QuestionBlock::new(x, y, payload))
            .collect();
        let bricks = data
            .bricks
            .iter()
            .map(|&(x, y, breakable)| Brick::new(x, y, breakable))
            .collect();

        let mut enemies = SlotMap::with_key();
        for &(x, y) in &data.enemies {
            enemies.insert(Enemy::new(x, y));
        }
        let mut pickups = SlotMap::with_key();
        for &(x, y) in &data.coins {
            pickups.insert(Pickup::floating_coin(x, y));
        }

        let spawn = Vec2::new(data.spawn.0, data.spawn.1);
        let mut world = Self {
            player: Player::new(spawn),
            terrain,
            solid,
            question_blocks,
            bricks,
            enemies,
            pickups,
            fireballs: SlotMap::with_key(),
            goal: Aabb::new(data.goal.0, data.goal.1, GOAL_WIDTH, GOAL_HEIGHT),
            pending_block_events: Vec::new(),
            score: 0,
            coins: 0,
            lives: tuning.starting_lives,
            time_left: tuning.time_limit,
            timer_subtick: 0,
            level_width: data.width,
            spawn,
            camera_x: 0.0,
            tuning,
        };
        world.update_camera();

        log::info!(
            "world ready: {} terrain boxes, {} blocks, {} bricks, {} enemies, {} coins",
            world.terrain.len(),
            world.question_blocks.len(),
            world.bricks.len(),
            world.enemies.len(),
            world.pickups.len()
        );
        Ok(world)
    }

    /// Current score.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Coins collected so far.
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Lives remaining.
    pub const fn lives(&self) -> i32 {
        self.lives
    }

    /// Seconds left on the level timer.
    pub const fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Left edge of the visible window, in world pixels.
    pub const fn camera_x(&self) -> f32 {
        self.camera_x
    }

    /// Read access to the player.
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// The HUD numbers for the current tick.
    pub fn readout(&self) -> Readout {
        Readout {
            score: self.score,
            coins: self.coins,
            lives: self.lives,
            time_left: self.time_left,
            power: self.player.power,
            star_active: self.player.has_star(),
        }
    }

    /// Snapshot every drawable entity, terrain first so dynamic entities
    /// paint over it.
    pub fn views(&self) -> Vec<EntityView> {
        let mut views = Vec::new();

        for piece in &self.terrain {
            views.push(EntityView {
                kind: match piece.kind {
                    TerrainKind::Ground => ViewKind::Ground,
                    TerrainKind::Pipe => ViewKind::Pipe,
                },
                rect: piece.rect,
                facing: Facing::Right,
                visual: VisualState::Normal,
            });
        }
        views.push(EntityView {
            kind: ViewKind::Goal,
            rect: self.goal,
            facing: Facing::Right,
            visual: VisualState::Normal,
        });

        for block in &self.question_blocks {
            views.push(EntityView {
                kind: ViewKind::QuestionBlock,
                rect: block.rect,
                facing: Facing::Right,
                visual: if block.active {
                    VisualState::Normal
                } else {
                    VisualState::Spent
                },
            });
        }
        for brick in &self.bricks {
            views.push(EntityView {
                kind: ViewKind::Brick,
                rect: brick.rect,
                facing: Facing::Right,
                visual: VisualState::Normal,
            });
        }

        for pickup in self.pickups.values() {
            views.push(EntityView {
                kind: match pickup.kind {
                    PickupKind::Mushroom => ViewKind::Mushroom,
                    PickupKind::FireFlower => ViewKind::FireFlower,
                    PickupKind::Star => ViewKind::Star,
                    PickupKind::ExtraLife => ViewKind::ExtraLife,
                    PickupKind::Coin { .. } => ViewKind::Coin,
                },
                rect: pickup.rect,
                facing: Facing::Right,
                visual: VisualState::Normal,
            });
        }
        for enemy in self.enemies.values() {
            views.push(EntityView {
                kind: ViewKind::Enemy,
                rect: enemy.rect,
                facing: if enemy.velocity.x < 0.0 {
                    Facing::Left
                } else {
                    Facing::Right
                },
                visual: match enemy.state {
                    EnemyState::Walking => VisualState::Normal,
                    EnemyState::Squashed { .. } => VisualState::Squashed,
                },
            });
        }
        for fireball in self.fireballs.values() {
            views.push(EntityView {
                kind: ViewKind::Fireball,
                rect: fireball.rect,
                facing: if fireball.velocity.x < 0.0 {
                    Facing::Left
                } else {
                    Facing::Right
                },
                visual: VisualState::Normal,
            });
        }

        views.push(EntityView {
            kind: ViewKind::Player(self.player.power),
            rect: self.player.rect,
            facing: self.player.facing,
            visual: if self.player.has_star() {
                VisualState::Starred
            } else if self.player.is_invincible() {
                VisualState::Flashing
            } else {
                VisualState::Normal
            },
        });

        views
    }

    /// Center the camera one third into the screen, clamped to the level.
    pub(crate) fn update_camera(&mut self) {
        let target = self.player.rect.center_x() - SCREEN_WIDTH / 3.0;
        self.camera_x = target.clamp(0.0, self.level_width - SCREEN_WIDTH);
    }

    /// Take a life; if any remain, restart the level timer and put the
    /// player back at spawn. Blocks, bricks and enemies keep their state.
    pub(crate) fn lose_life(&mut self) {
        self.lives -= 1;
        log::info!("life lost, {} remaining", self.lives);
        if self.lives > 0 {
            self.reset_after_death();
        }
    }

    fn reset_after_death(&mut self) {
        self.player.reset(self.spawn);
        self.time_left = self.tuning.time_limit;
        self.timer_subtick = 0;
        self.update_camera();
    }
}
