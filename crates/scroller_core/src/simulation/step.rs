//! The per-tick step
//!
//! One [`World::tick`] advances the whole simulation by 1/60 s in a fixed
//! order: shoot, player movement (against terrain plus block boxes), block
//! hits, block bounce animation, event-driven spawning, autonomous entity
//! movement, interaction resolution, death handling, the end-of-tick purge,
//! camera and timer. The order is part of the contract: a pickup spawned by
//! this tick's block hit emerges above its block, so it moves on its spawn
//! tick but cannot be collected before it falls clear of the block.

use crate::entities::block::BlockPayload;
use crate::entities::pickup::Pickup;
use crate::input::Intents;
use crate::session::World;
use crate::simulation::events::BlockEvent;
use crate::TICKS_PER_SECOND;

/// What a tick left the session in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep feeding ticks
    Running,
    /// The player reached the goal marker
    LevelComplete,
    /// No lives remain
    GameOver,
}

/// Where an entry in the player's obstacle list came from, so upward bumps
/// can be routed back to the block that was hit.
#[derive(Debug, Clone, Copy)]
enum ObstacleRef {
    Terrain,
    Question(usize),
    Brick(usize),
}

impl World {
    /// Advance the simulation by one tick.
    #[allow(clippy::too_many_lines)]
    pub fn tick(&mut self, intents: Intents) -> TickOutcome {
        if self.lives <= 0 {
            return TickOutcome::GameOver;
        }

        if intents.contains(Intents::SHOOT) {
            if let Some(fireball) = self.player.try_shoot(&self.tuning) {
                self.fireballs.insert(fireball);
            }
        }

        // The player collides with terrain and with both block kinds; the
        // parallel ref list routes upward bumps back to their blocks.
        let mut obstacles = self.solid.clone();
        let mut refs = vec![ObstacleRef::Terrain; obstacles.len()];
        for (index, block) in self.question_blocks.iter().enumerate() {
            obstacles.push(block.rect);
            refs.push(ObstacleRef::Question(index));
        }
        for (index, brick) in self.bricks.iter().enumerate() {
            obstacles.push(brick.rect);
            refs.push(ObstacleRef::Brick(index));
        }

        let step = self.player.update(intents, &obstacles, &self.tuning);

        // The level edges are hard walls.
        let max_x = self.level_width - self.player.rect.width;
        self.player.rect.x = self.player.rect.x.clamp(0.0, max_x);

        for index in step.bumped {
            match refs[index] {
                ObstacleRef::Terrain => {}
                ObstacleRef::Question(i) => {
                    let block = &mut self.question_blocks[i];
                    if let Some(payload) = block.hit() {
                        self.pending_block_events.push(BlockEvent {
                            payload,
                            origin: block.rect,
                        });
                    }
                }
                ObstacleRef::Brick(i) => {
                    self.bricks[i].hit();
                }
            }
        }

        for block in &mut self.question_blocks {
            block.update();
        }

        // Spawn step: drain the hit events queued above. Coin payloads
        // credit directly; everything else becomes a pickup emerging above
        // its block, out of the player's reach until it falls clear.
        for event in std::mem::take(&mut self.pending_block_events) {
            match event.payload {
                BlockPayload::Coin => {
                    self.coins += 1;
                    self.score += self.tuning.scores.block_coin;
                }
                BlockPayload::Mushroom => {
                    self.pickups.insert(Pickup::mushroom(&event.origin));
                }
                BlockPayload::FireFlower => {
                    self.pickups.insert(Pickup::fire_flower(&event.origin));
                }
                BlockPayload::Star => {
                    self.pickups.insert(Pickup::star(&event.origin));
                }
                BlockPayload::ExtraLife => {
                    self.pickups.insert(Pickup::extra_life(&event.origin));
                }
            }
        }

        // Autonomous entities only collide with terrain, never with blocks.
        for enemy in self.enemies.values_mut() {
            enemy.update(&self.solid, &self.tuning);
        }
        for pickup in self.pickups.values_mut() {
            pickup.update(&self.solid, &self.tuning);
        }
        for fireball in self.fireballs.values_mut() {
            fireball.update(&self.solid, &self.tuning);
        }

        let summary = self.resolve_interactions();

        if step.fell_out || summary.died {
            self.lose_life();
        }

        // End-of-tick purge; the only place entities are removed for
        // lifecycle reasons.
        for brick in &self.bricks {
            if brick.broken {
                self.score += self.tuning.scores.brick;
            }
        }
        self.bricks.retain(|brick| !brick.broken);
        self.enemies.retain(|_, enemy| !enemy.expired());
        self.fireballs.retain(|_, fireball| !fireball.expired());

        self.update_camera();

        self.timer_subtick += 1;
        if self.timer_subtick >= TICKS_PER_SECOND {
            self.timer_subtick = 0;
            self.time_left = self.time_left.saturating_sub(1);
            if self.time_left == 0 {
                self.lose_life();
            }
        }

        if summary.reached_goal {
            log::info!("level complete with score {}", self.score);
            return TickOutcome::LevelComplete;
        }
        if self.lives <= 0 {
            log::info!("game over with score {}", self.score);
            return TickOutcome::GameOver;
        }
        TickOutcome::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TuningConfig;
    use crate::entities::player::{PowerState, PowerUp};
    use crate::level::LevelData;
    use approx::assert_relative_eq;

    fn flat_level() -> LevelData {
        LevelData {
            width: 800.0,
            spawn: (100.0, 518.0),
            ground: vec![(0.0, 550.0, 800.0, 50.0)],
            platforms: vec![],
            pipes: vec![],
            question_blocks: vec![],
            bricks: vec![],
            coins: vec![],
            enemies: vec![],
            goal: (760.0, 230.0),
        }
    }

    fn run(world: &mut World, intents: Intents, ticks: u32) -> TickOutcome {
        let mut outcome = TickOutcome::Running;
        for _ in 0..ticks {
            outcome = world.tick(intents);
            if outcome != TickOutcome::Running {
                break;
            }
        }
        outcome
    }

    #[test]
    fn walking_right_scrolls_the_camera_and_pipes_block_the_way() {
        let level = LevelData::world_1_1();
        let mut world = World::new(&level, TuningConfig::default()).unwrap();
        assert_relative_eq!(world.camera_x(), 0.0);

        run(&mut world, Intents::MOVE_RIGHT, 300);

        // The first pipe starts at x = 600; the player is pinned against it.
        assert_relative_eq!(world.player().rect.right(), 600.0);
        assert!(world.camera_x() > 0.0);
        assert!(world.camera_x() < world.player().rect.x);
    }

    #[test]
    fn question_block_spawns_a_mushroom_the_player_collects() {
        let mut level = flat_level();
        level.question_blocks = vec![(100.0, 460.0, BlockPayload::Mushroom)];
        let mut world = World::new(&level, TuningConfig::default()).unwrap();

        // Settle onto the floor, jump into the block from below, then chase
        // the mushroom down the level (it walks right, slower than the
        // player runs).
        run(&mut world, Intents::empty(), 5);
        world.tick(Intents::JUMP);
        run(&mut world, Intents::MOVE_RIGHT, 240);

        assert_eq!(world.player().power, PowerState::Super);
        assert_eq!(world.score(), 1000);
        assert!(world.pickups.is_empty(), "the mushroom was collected");
        assert!(!world.question_blocks[0].active);
    }

    #[test]
    fn coin_payload_credits_directly_without_spawning() {
        let mut level = flat_level();
        level.question_blocks = vec![(100.0, 460.0, BlockPayload::Coin)];
        let mut world = World::new(&level, TuningConfig::default()).unwrap();

        run(&mut world, Intents::empty(), 5);
        world.tick(Intents::JUMP);
        run(&mut world, Intents::empty(), 30);

        assert_eq!(world.coins(), 1);
        assert_eq!(world.score(), 100);
        assert!(world.pickups.is_empty());
    }

    #[test]
    fn broken_bricks_score_at_the_end_of_tick_purge() {
        let mut level = flat_level();
        level.bricks = vec![(100.0, 460.0, true)];
        let mut world = World::new(&level, TuningConfig::default()).unwrap();

        run(&mut world, Intents::empty(), 5);
        world.tick(Intents::JUMP);
        run(&mut world, Intents::empty(), 10);

        assert!(world.bricks.is_empty());
        assert_eq!(world.score(), 50);
    }

    #[test]
    fn stomping_squashes_and_the_body_is_purged_after_lingering() {
        let mut level = flat_level();
        level.spawn = (190.0, 400.0);
        level.enemies = vec![(200.0, 518.0)];
        let tuning = TuningConfig::default();
        let mut world = World::new(&level, tuning.clone()).unwrap();

        // Fall straight onto the enemy.
        let mut squashed = false;
        for _ in 0..60 {
            world.tick(Intents::empty());
            if world.enemies.values().any(|e| !e.is_walking()) {
                squashed = true;
                break;
            }
        }
        assert!(squashed, "falling onto the enemy should stomp it");
        assert_eq!(world.score(), 100);
        // The rebound is exactly the configured impulse, applied once.
        assert_relative_eq!(world.player().velocity.y, -tuning.stomp_bounce);
        assert_eq!(world.lives(), 3);

        // The flattened body lingers, then the purge removes it.
        run(&mut world, Intents::empty(), 60);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn side_contact_while_small_costs_a_life_and_resets_the_player() {
        let mut level = flat_level();
        level.enemies = vec![(300.0, 518.0)];
        let tuning = TuningConfig::default().with_time_limit(400);
        let mut world = World::new(&level, tuning).unwrap();

        let mut died = false;
        for _ in 0..300 {
            world.tick(Intents::MOVE_RIGHT);
            if world.lives() < 3 {
                died = true;
                break;
            }
        }
        assert!(died, "walking into the enemy should be fatal while Small");
        assert_eq!(world.lives(), 2);
        // Death resets the player and the timer, not the enemies.
        assert_relative_eq!(world.player().rect.x, 100.0);
        assert_eq!(world.time_left(), 400);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn star_contact_squashes_without_harming_the_player() {
        let mut level = flat_level();
        level.enemies = vec![(300.0, 518.0)];
        let tuning = TuningConfig::default();
        let mut world = World::new(&level, tuning.clone()).unwrap();
        world.player.apply_power(PowerUp::Star, &tuning);

        let mut squashed = false;
        for _ in 0..120 {
            world.tick(Intents::MOVE_RIGHT);
            if world.enemies.values().any(|e| !e.is_walking()) {
                squashed = true;
                break;
            }
        }
        assert!(squashed, "walking into the enemy with a star squashes it");
        assert_eq!(world.score(), 100);
        assert_eq!(world.lives(), 3);
        assert_eq!(world.player().power, PowerState::Small);
    }

    #[test]
    fn fireballs_defeat_enemies_on_contact() {
        let mut level = flat_level();
        level.enemies = vec![(400.0, 518.0)];
        let mut world = World::new(&level, TuningConfig::default()).unwrap();
        world.player.apply_power(PowerUp::Fire, &TuningConfig::default());

        let mut defeated = false;
        for _ in 0..120 {
            world.tick(Intents::SHOOT);
            if world.enemies.is_empty() {
                defeated = true;
                break;
            }
        }
        assert!(defeated);
        assert_eq!(world.score(), 100);
    }

    #[test]
    fn reaching_the_goal_completes_the_level() {
        let level = flat_level();
        let mut world = World::new(&level, TuningConfig::default()).unwrap();

        let outcome = run(&mut world, Intents::MOVE_RIGHT, 600);
        assert_eq!(outcome, TickOutcome::LevelComplete);
    }

    #[test]
    fn timer_expiry_takes_a_life_and_restarts_the_clock() {
        let level = flat_level();
        let tuning = TuningConfig::default().with_time_limit(1);
        let mut world = World::new(&level, tuning).unwrap();

        run(&mut world, Intents::empty(), 60);
        assert_eq!(world.lives(), 2);
        assert_eq!(world.time_left(), 1, "the reset restarts the clock");
    }

    #[test]
    fn running_out_of_lives_ends_the_game() {
        let level = flat_level();
        let tuning = TuningConfig::default()
            .with_time_limit(1)
            .with_starting_lives(1);
        let mut world = World::new(&level, tuning).unwrap();

        let outcome = run(&mut world, Intents::empty(), 120);
        assert_eq!(outcome, TickOutcome::GameOver);
        // Further ticks are inert.
        assert_eq!(world.tick(Intents::MOVE_RIGHT), TickOutcome::GameOver);
    }

    #[test]
    fn falling_out_of_the_level_costs_a_life() {
        let mut level = flat_level();
        level.ground = vec![(0.0, 550.0, 64.0, 50.0)];
        level.spawn = (200.0, 400.0);
        let mut world = World::new(&level, TuningConfig::default()).unwrap();

        let mut died = false;
        for _ in 0..300 {
            world.tick(Intents::empty());
            if world.lives() < 3 {
                died = true;
                break;
            }
        }
        assert!(died, "there is no floor under the spawn");
        assert_eq!(world.lives(), 2);
    }
}
