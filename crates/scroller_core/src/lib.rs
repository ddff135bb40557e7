//! # Scroller Core
//!
//! Fixed-timestep simulation core for a side-scrolling 2D platformer:
//! axis-separated terrain collision, entity state machines, cross-entity
//! interaction resolution and session bookkeeping.
//!
//! Rendering, raw input devices and HUD drawing are external collaborators.
//! The core exposes three narrow contracts instead:
//!
//! - [`input::Intents`] — the per-tick intent set a front-end feeds in;
//! - [`view::EntityView`] — position/size/visual-state snapshots a renderer
//!   consumes;
//! - [`view::Readout`] — the score/coins/lives/time numbers a HUD displays.
//!
//! ## Quick Start
//!
//! ```rust
//! use scroller_core::prelude::*;
//!
//! let level = LevelData::world_1_1();
//! let mut world = World::new(&level, TuningConfig::default()).unwrap();
//!
//! loop {
//!     let intents = Intents::MOVE_RIGHT;
//!     match world.tick(intents) {
//!         TickOutcome::Running => {}
//!         TickOutcome::LevelComplete | TickOutcome::GameOver => break,
//!     }
//! #   break;
//! }
//! ```

pub mod config;
pub mod entities;
pub mod foundation;
pub mod input;
pub mod level;
pub mod session;
pub mod simulation;
pub mod view;

/// Width of the visible play area in world pixels.
pub const SCREEN_WIDTH: f32 = 800.0;

/// Height of the visible play area in world pixels. A player whose top edge
/// passes below this line has fallen out of the level.
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Simulation rate. One tick is 1/60 s; the global level timer counts down
/// once per this many ticks.
pub const TICKS_PER_SECOND: u32 = 60;

/// Common imports for simulation users
pub mod prelude {
    pub use crate::{
        config::{Config, TuningConfig},
        entities::player::PowerState,
        foundation::{geometry::Aabb, math::Vec2},
        input::{InputSource, Intents},
        level::{LevelData, LevelError},
        session::World,
        simulation::step::TickOutcome,
        view::{EntityView, Readout},
        SCREEN_HEIGHT, SCREEN_WIDTH, TICKS_PER_SECOND,
    };
}
