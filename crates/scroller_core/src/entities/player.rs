//! Player state machine
//!
//! The player owns the power ladder (Small → Super → Fire), the orthogonal
//! star-power and post-damage invincibility timers, and the axis-separated
//! terrain collision pass. Upward collisions are reported back to the
//! caller so triggerable blocks can be hit; the player itself never mutates
//! a block.

use crate::config::TuningConfig;
use crate::entities::pickup::Fireball;
use crate::foundation::geometry::{Aabb, VerticalHit};
use crate::foundation::math::Vec2;
use crate::input::Intents;
use crate::SCREEN_HEIGHT;

/// Player collision width in pixels, independent of power state.
pub const PLAYER_WIDTH: f32 = 32.0;

/// Rung on the power ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Base state; fatal damage is possible
    Small,
    /// Grown; damage shrinks back to Small
    Super,
    /// Grown and able to shoot fireballs
    Fire,
}

impl PowerState {
    /// Collision height for this state. Growing and shrinking preserve the
    /// feet position, so only the top edge moves.
    pub const fn height(self) -> f32 {
        match self {
            Self::Small => 32.0,
            Self::Super | Self::Fire => 48.0,
        }
    }
}

/// Horizontal orientation, used for fireball spawning and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Facing negative x
    Left,
    /// Facing positive x
    Right,
}

impl Facing {
    /// Unit sign along the x axis.
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Power-up effect applied on pickup collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUp {
    /// Mushroom: Small grows to Super, grown states are unchanged
    Super,
    /// Fire flower: any state becomes Fire
    Fire,
    /// Star: temporary invulnerability that is lethal to enemies
    Star,
}

/// Result of a damaging contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Star power or the invincibility window absorbed the hit
    Ignored,
    /// Super/Fire shrank to Small and gained an invincibility window
    Shrunk,
    /// The player was Small; the session must take a life
    Fatal,
}

/// What one player tick produced, beyond the mutated player itself.
#[derive(Debug, Default)]
pub struct PlayerStep {
    /// Indices (into the obstacle slice) of obstacles hit from below while
    /// moving upward, in resolution order.
    pub bumped: Vec<usize>,
    /// The player's top edge passed below the play area.
    pub fell_out: bool,
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    /// Collision box in world coordinates
    pub rect: Aabb,
    /// Velocity in pixels/tick
    pub velocity: Vec2,
    /// Current rung on the power ladder
    pub power: PowerState,
    /// Resting on terrain as of the last vertical resolution
    pub grounded: bool,
    /// Horizontal orientation
    pub facing: Facing,
    /// Remaining post-damage invincibility, in ticks
    pub invincible_timer: u32,
    /// Remaining star power, in ticks
    pub star_timer: u32,
    /// Ticks until the next fireball may be shot
    pub fireball_cooldown: u32,
}

impl Player {
    /// Create a Small player with its top-left corner at `spawn`.
    pub fn new(spawn: Vec2) -> Self {
        Self {
            rect: Aabb::new(spawn.x, spawn.y, PLAYER_WIDTH, PowerState::Small.height()),
            velocity: Vec2::zeros(),
            power: PowerState::Small,
            grounded: false,
            facing: Facing::Right,
            invincible_timer: 0,
            star_timer: 0,
            fireball_cooldown: 0,
        }
    }

    /// Star power currently active.
    pub const fn has_star(&self) -> bool {
        self.star_timer > 0
    }

    /// Post-damage invincibility window currently active.
    pub const fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }

    /// Advance the player by one tick.
    ///
    /// Fixed order: input → gravity → timers → horizontal
    /// integrate-and-resolve → vertical integrate-and-resolve → fall-out
    /// check. `obstacles` is terrain plus triggerable-block boxes; indices
    /// of boxes bumped from below are reported in the returned step.
    pub fn update(
        &mut self,
        intents: Intents,
        obstacles: &[Aabb],
        tuning: &TuningConfig,
    ) -> PlayerStep {
        let mut step = PlayerStep::default();

        // Horizontal intent, then friction, speed cap and snap-to-zero.
        if intents.contains(Intents::MOVE_LEFT) {
            self.velocity.x -= tuning.acceleration;
            self.facing = Facing::Left;
        } else if intents.contains(Intents::MOVE_RIGHT) {
            self.velocity.x += tuning.acceleration;
            self.facing = Facing::Right;
        }
        self.velocity.x *= tuning.friction;
        self.velocity.x = self.velocity.x.clamp(-tuning.max_speed, tuning.max_speed);
        if self.velocity.x.abs() < tuning.stop_threshold {
            self.velocity.x = 0.0;
        }

        // Jump only takes effect from the ground.
        if intents.contains(Intents::JUMP) && self.grounded {
            self.velocity.y = -tuning.jump_impulse;
            self.grounded = false;
        }

        self.velocity.y += tuning.gravity;
        if self.velocity.y > tuning.terminal_velocity {
            self.velocity.y = tuning.terminal_velocity;
        }

        self.invincible_timer = self.invincible_timer.saturating_sub(1);
        self.star_timer = self.star_timer.saturating_sub(1);
        self.fireball_cooldown = self.fireball_cooldown.saturating_sub(1);

        // Horizontal axis first, then vertical; each resolved immediately.
        self.rect.x += self.velocity.x;
        for obstacle in obstacles {
            self.rect.resolve_horizontal(&mut self.velocity.x, obstacle);
        }

        self.rect.y += self.velocity.y;
        self.grounded = false;
        for (index, obstacle) in obstacles.iter().enumerate() {
            match self.rect.resolve_vertical(&mut self.velocity.y, obstacle) {
                Some(VerticalHit::Landed) => self.grounded = true,
                Some(VerticalHit::BumpedCeiling) => step.bumped.push(index),
                None => {}
            }
        }

        step.fell_out = self.rect.top() > SCREEN_HEIGHT;
        step
    }

    /// Shoot a fireball if the state machine allows it.
    ///
    /// Requires the Fire state and an elapsed cooldown; the fireball spawns
    /// ahead of the player in the facing direction.
    pub fn try_shoot(&mut self, tuning: &TuningConfig) -> Option<Fireball> {
        if self.power != PowerState::Fire || self.fireball_cooldown > 0 {
            return None;
        }
        self.fireball_cooldown = tuning.fireball_cooldown;
        Some(Fireball::launch(
            self.rect.center_x() + 20.0 * self.facing.sign(),
            self.rect.center_y(),
            self.facing,
        ))
    }

    /// Apply a collected power-up.
    ///
    /// The ladder is monotone under pickups: a mushroom on a grown player
    /// changes nothing, a flower always lands on Fire, a star only arms the
    /// orthogonal star timer.
    pub fn apply_power(&mut self, power: PowerUp, tuning: &TuningConfig) {
        match power {
            PowerUp::Super => {
                if self.power == PowerState::Small {
                    self.set_power(PowerState::Super);
                }
            }
            PowerUp::Fire => self.set_power(PowerState::Fire),
            PowerUp::Star => self.star_timer = tuning.star_ticks,
        }
    }

    /// Resolve a damaging contact against the current state.
    pub fn take_damage(&mut self, tuning: &TuningConfig) -> DamageOutcome {
        if self.has_star() || self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        match self.power {
            PowerState::Super | PowerState::Fire => {
                self.set_power(PowerState::Small);
                self.invincible_timer = tuning.invincibility_ticks;
                DamageOutcome::Shrunk
            }
            PowerState::Small => DamageOutcome::Fatal,
        }
    }

    /// Return to the spawn point in the base state, as after a death.
    pub fn reset(&mut self, spawn: Vec2) {
        self.rect = Aabb::new(spawn.x, spawn.y, PLAYER_WIDTH, PowerState::Small.height());
        self.velocity = Vec2::zeros();
        self.power = PowerState::Small;
        self.grounded = false;
        self.facing = Facing::Right;
        self.invincible_timer = 0;
        self.star_timer = 0;
        self.fireball_cooldown = 0;
    }

    // Height changes keep the feet where they were.
    fn set_power(&mut self, power: PowerState) {
        let feet = self.rect.bottom();
        self.power = power;
        self.rect.height = power.height();
        self.rect.set_bottom(feet);
    }
}
