//! Cross-entity interaction resolution
//!
//! Runs once per tick, after all movement, in a fixed order: pickups,
//! fireball-vs-enemy, player-vs-enemy, goal. Within each class entities
//! resolve in iteration order. Removals are collected into key lists and
//! applied after each pass so no arena is mutated while it is iterated.

use crate::entities::enemy::Enemy;
use crate::entities::pickup::PickupKind;
use crate::entities::player::{DamageOutcome, Player, PowerUp};
use crate::session::World;

/// What the resolver decided beyond its direct mutations.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct InteractionSummary {
    /// A Small player took unabsorbed damage
    pub died: bool,
    /// The player touched the goal marker
    pub reached_goal: bool,
}

// Stomp test: the player must be falling and have its feet above the
// enemy's vertical center. Anything else is side contact.
fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.velocity.y > 0.0 && player.rect.bottom() < enemy.rect.center_y()
}

impl World {
    pub(crate) fn resolve_interactions(&mut self) -> InteractionSummary {
        let mut summary = InteractionSummary::default();

        // Pickups first, so a power-up grabbed this tick already protects
        // against an enemy contact resolved below.
        let mut collected = Vec::new();
        for (key, pickup) in &self.pickups {
            if !pickup.rect.overlaps(&self.player.rect) {
                continue;
            }
            collected.push(key);
            match pickup.kind {
                PickupKind::Mushroom => {
                    self.player.apply_power(PowerUp::Super, &self.tuning);
                    self.score += self.tuning.scores.powerup;
                }
                PickupKind::FireFlower => {
                    self.player.apply_power(PowerUp::Fire, &self.tuning);
                    self.score += self.tuning.scores.powerup;
                }
                PickupKind::Star => {
                    self.player.apply_power(PowerUp::Star, &self.tuning);
                    self.score += self.tuning.scores.powerup;
                }
                PickupKind::ExtraLife => {
                    self.lives += 1;
                    self.score += self.tuning.scores.powerup;
                }
                PickupKind::Coin { .. } => {
                    self.coins += 1;
                    self.score += self.tuning.scores.coin;
                }
            }
        }
        for key in collected {
            self.pickups.remove(key);
        }

        // Fireballs squash walking enemies; the fireball is spent.
        let mut spent_fireballs = Vec::new();
        for (fireball_key, fireball) in &self.fireballs {
            for (_, enemy) in &mut self.enemies {
                if enemy.is_walking() && fireball.rect.overlaps(&enemy.rect) {
                    enemy.squash(self.tuning.squash_linger_ticks);
                    self.score += self.tuning.scores.enemy;
                    spent_fireballs.push(fireball_key);
                    break;
                }
            }
        }
        for key in spent_fireballs {
            self.fireballs.remove(key);
        }

        // Player against walking enemies: stomp squashes, star contact
        // squashes without the rebound, side contact damages.
        for (_, enemy) in &mut self.enemies {
            if !enemy.is_walking() || !enemy.rect.overlaps(&self.player.rect) {
                continue;
            }
            if is_stomp(&self.player, enemy) {
                enemy.squash(self.tuning.squash_linger_ticks);
                self.score += self.tuning.scores.enemy;
                self.player.velocity.y = -self.tuning.stomp_bounce;
                self.player.grounded = false;
            } else if self.player.has_star() {
                enemy.squash(self.tuning.squash_linger_ticks);
                self.score += self.tuning.scores.enemy;
            } else if self.player.take_damage(&self.tuning) == DamageOutcome::Fatal {
                summary.died = true;
                break;
            }
        }

        if self.player.rect.overlaps(&self.goal) {
            summary.reached_goal = true;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn stomp_depends_only_on_fall_direction_and_relative_height() {
        // Enemy box spans y 518..550, so its vertical center is 534.
        let enemy = Enemy::new(200.0, 518.0);

        // Falling with the feet above the center: stomp.
        let mut player = Player::new(Vec2::new(200.0, 500.0));
        player.velocity.y = 10.0;
        assert!(is_stomp(&player, &enemy));

        // Same fall, feet below the center: side contact.
        let mut low = Player::new(Vec2::new(200.0, 504.0));
        low.velocity.y = 10.0;
        assert!(!is_stomp(&low, &enemy));

        // Level or rising never stomps, wherever the feet are.
        player.velocity.y = 0.0;
        assert!(!is_stomp(&player, &enemy));
        player.velocity.y = -5.0;
        assert!(!is_stomp(&player, &enemy));
    }
}
