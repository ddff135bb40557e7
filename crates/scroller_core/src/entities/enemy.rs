//! Walking enemy state machine
//!
//! Enemies walk at constant speed, fall under gravity, reverse on wall
//! contact and reverse when they step off a platform edge before the fall
//! has picked up speed. Squashing is one-way: a squashed enemy stops
//! moving, stops participating in damage collision and lingers flattened
//! for a few ticks before the end-of-tick purge removes it.

use crate::config::TuningConfig;
use crate::foundation::geometry::{Aabb, VerticalHit};
use crate::foundation::math::Vec2;

/// Walking speed in pixels/tick. Enemies spawn walking toward the player.
pub const WALK_SPEED: f32 = 1.5;

/// Enemy collision box side length.
pub const ENEMY_SIZE: f32 = 32.0;

/// Lifecycle state of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Patrolling under physics
    Walking,
    /// Flattened; motionless and harmless until the counter runs out
    Squashed {
        /// Ticks left before the purge removes the body
        ticks_left: u32,
    },
}

/// A walking enemy.
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Collision box in world coordinates
    pub rect: Aabb,
    /// Velocity in pixels/tick
    pub velocity: Vec2,
    /// Lifecycle state
    pub state: EnemyState,
    grounded: bool,
}

impl Enemy {
    /// Spawn a walking enemy at the given top-left corner.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            velocity: Vec2::new(-WALK_SPEED, 0.0),
            state: EnemyState::Walking,
            grounded: false,
        }
    }

    /// Still patrolling, i.e. participates in damage and stomp collision.
    pub const fn is_walking(&self) -> bool {
        matches!(self.state, EnemyState::Walking)
    }

    /// Squashed and done lingering; the purge may remove it.
    pub const fn expired(&self) -> bool {
        matches!(self.state, EnemyState::Squashed { ticks_left: 0 })
    }

    /// Flatten the enemy. One-way; squashing a squashed enemy is a no-op.
    pub fn squash(&mut self, linger_ticks: u32) {
        if self.is_walking() {
            self.velocity = Vec2::zeros();
            self.state = EnemyState::Squashed {
                ticks_left: linger_ticks,
            };
        }
    }

    /// Advance the enemy by one tick against the static terrain.
    pub fn update(&mut self, terrain: &[Aabb], tuning: &TuningConfig) {
        if let EnemyState::Squashed { ticks_left } = &mut self.state {
            *ticks_left = ticks_left.saturating_sub(1);
            return;
        }

        let was_grounded = self.grounded;
        let before = self.rect;
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
        self.grounded = false;
        for obstacle in terrain {
            if self.rect.resolve_vertical(&mut self.velocity.y, obstacle)
                == Some(VerticalHit::Landed)
            {
                self.grounded = true;
            }
        }

        // Edge walking: just stepped off (one gravity step, not yet a real
        // fall). Step back onto the platform and turn around; restoring the
        // pre-move position keeps the feet flush so the next tick cannot
        // resolve the platform side as a wall.
        if was_grounded && !self.grounded && self.velocity.y <= tuning.gravity {
            self.rect = before;
            self.velocity = Vec2::new(-self.velocity.x, 0.0);
            self.grounded = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn walks_and_settles_on_the_ground() {
        let tuning = TuningConfig::default();
        let terrain = vec![Aabb::new(0.0, 550.0, 6400.0, 50.0)];
        let mut enemy = Enemy::new(700.0, 518.0);
        for _ in 0..20 {
            enemy.update(&terrain, &tuning);
        }
        assert_relative_eq!(enemy.rect.bottom(), 550.0);
        assert!(enemy.velocity.x < 0.0);
    }

    #[test]
    fn reverses_on_wall_contact() {
        let tuning = TuningConfig::default();
        let terrain = vec![
            Aabb::new(0.0, 550.0, 6400.0, 50.0),
            Aabb::new(600.0, 486.0, 64.0, 64.0), // pipe
        ];
        let mut enemy = Enemy::new(700.0, 518.0);
        for _ in 0..60 {
            enemy.update(&terrain, &tuning);
        }
        // Walked left into the pipe and turned around.
        assert!(enemy.velocity.x > 0.0);
        assert!(enemy.rect.left() >= 664.0);
    }

    #[test]
    fn patrols_an_isolated_platform_without_falling_off() {
        let tuning = TuningConfig::default();
        // A floating platform with nothing below it.
        let platform = Aabb::new(300.0, 450.0, 128.0, 16.0);
        let terrain = vec![platform];
        let mut enemy = Enemy::new(340.0, 418.0);

        let mut reversals = 0;
        let mut last_direction = enemy.velocity.x.signum();
        for tick in 0..600 {
            enemy.update(&terrain, &tuning);
            if enemy.velocity.x.signum() != last_direction {
                reversals += 1;
                last_direction = enemy.velocity.x.signum();
            }
            // Feet stay flush on the platform and at least the leading
            // pixels of the box stay over it, every single tick.
            assert_relative_eq!(enemy.rect.bottom(), platform.top());
            assert!(
                enemy.rect.right() > platform.left() && enemy.rect.left() < platform.right(),
                "enemy left the platform at tick {tick}: x={}",
                enemy.rect.x
            );
        }
        assert!(reversals >= 2, "enemy should bounce between both edges");
    }

    #[test]
    fn squash_is_one_way_and_expires_after_lingering() {
        let tuning = TuningConfig::default();
        let terrain = vec![Aabb::new(0.0, 550.0, 6400.0, 50.0)];
        let mut enemy = Enemy::new(700.0, 518.0);
        for _ in 0..20 {
            enemy.update(&terrain, &tuning);
        }

        enemy.squash(3);
        assert!(!enemy.is_walking());
        let rest = enemy.rect;

        // Squashed enemies do not move, they only count down.
        enemy.update(&terrain, &tuning);
        assert_eq!(enemy.rect, rest);
        assert!(!enemy.expired());

        enemy.squash(100); // no-op on a squashed enemy
        enemy.update(&terrain, &tuning);
        enemy.update(&terrain, &tuning);
        assert!(enemy.expired());
    }
}
