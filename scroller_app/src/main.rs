//! Headless scroller demo
//!
//! Drives the simulation core at the fixed tick rate with a scripted input
//! source and logs the HUD readout once a second. This is the smallest
//! possible front-end: a renderer would consume `world.views()` and
//! `world.camera_x()` in the same loop.

use std::time::{Duration, Instant};

use scroller_core::prelude::*;

/// Plays the level from a canned intent script: run right, jumping
/// periodically to clear pipes and bump blocks.
struct ScriptedInput {
    tick: u64,
}

impl ScriptedInput {
    const fn new() -> Self {
        Self { tick: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Intents {
        self.tick += 1;
        let mut intents = Intents::MOVE_RIGHT;
        // A jump every 90 ticks clears the pipes on the way.
        if self.tick % 90 < 20 {
            intents |= Intents::JUMP;
        }
        if self.tick % 300 == 0 {
            intents |= Intents::SHOOT;
        }
        intents
    }
}

fn load_tuning() -> TuningConfig {
    match TuningConfig::load_from_file("config/tuning.ron") {
        Ok(tuning) => {
            log::info!("loaded tuning from config/tuning.ron");
            tuning
        }
        Err(err) => {
            log::info!("using default tuning ({err})");
            TuningConfig::default()
        }
    }
}

fn load_level() -> LevelData {
    match LevelData::load_from_file("levels/world_1_1.ron") {
        Ok(level) => level,
        Err(err) => {
            log::info!("using built-in level ({err})");
            LevelData::world_1_1()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("starting scroller demo");

    let tuning = load_tuning();
    let level = load_level();
    let mut world = World::new(&level, tuning)?;
    let mut input = ScriptedInput::new();

    let tick_duration = Duration::from_secs(1) / TICKS_PER_SECOND;
    let mut next_tick = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        let intents = input.poll();
        if intents.contains(Intents::QUIT) {
            log::info!("quit requested");
            break;
        }

        let outcome = world.tick(intents);
        ticks += 1;

        if ticks % u64::from(TICKS_PER_SECOND) == 0 {
            let readout = world.readout();
            log::info!(
                "t={} score={} coins={} lives={} power={:?} x={:.0} camera={:.0}",
                readout.time_left,
                readout.score,
                readout.coins,
                readout.lives,
                readout.power,
                world.player().rect.x,
                world.camera_x()
            );
        }

        match outcome {
            TickOutcome::Running => {}
            TickOutcome::LevelComplete => {
                log::info!("level complete! final score {}", world.score());
                break;
            }
            TickOutcome::GameOver => {
                log::info!("game over, final score {}", world.score());
                break;
            }
        }

        // Fixed timestep: sleep out the remainder of the tick.
        next_tick += tick_duration;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // Fell behind; resynchronize instead of bursting ticks.
            next_tick = now;
        }
    }

    Ok(())
}
