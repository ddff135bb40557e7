//! Configuration system
//!
//! Physics tuning and score values live in a serde-backed [`TuningConfig`]
//! so a front-end can load tweaked values from a RON or TOML file. The
//! defaults reproduce the classic feel: gravity 0.8 px/tick², terminal
//! velocity 15, jump impulse 14.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file (format chosen by extension)
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file (format chosen by extension)
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Score and counter rewards for the interaction resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTable {
    /// Coin payload released from a question block
    pub block_coin: u32,
    /// Floating coin collected by touch
    pub coin: u32,
    /// Any power-up or extra-life pickup
    pub powerup: u32,
    /// Enemy defeated by stomp, fireball or star contact
    pub enemy: u32,
    /// Brick broken from below
    pub brick: u32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            block_coin: 100,
            coin: 200,
            powerup: 1000,
            enemy: 100,
            brick: 50,
        }
    }
}

/// # Simulation Tuning
///
/// Every knob of the physics and session rules. Velocities are in
/// pixels/tick, accelerations in pixels/tick², durations in ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Downward acceleration applied to every airborne entity
    pub gravity: f32,
    /// Falling speed is clamped to this
    pub terminal_velocity: f32,
    /// Horizontal acceleration while a move intent is held
    pub acceleration: f32,
    /// Per-tick multiplier on horizontal velocity
    pub friction: f32,
    /// Horizontal speed cap for the player
    pub max_speed: f32,
    /// Horizontal speeds below this snap to zero
    pub stop_threshold: f32,
    /// Upward impulse of a jump
    pub jump_impulse: f32,
    /// Upward impulse reflected into the player after a stomp
    pub stomp_bounce: f32,
    /// Ticks of post-damage invincibility (~2 s)
    pub invincibility_ticks: u32,
    /// Ticks of star power (~10 s)
    pub star_ticks: u32,
    /// Ticks between fireballs
    pub fireball_cooldown: u32,
    /// Ticks a squashed enemy lingers before removal
    pub squash_linger_ticks: u32,
    /// Level timer starting value, in whole seconds
    pub time_limit: u32,
    /// Lives at session start
    pub starting_lives: i32,
    /// Score rewards
    pub scores: ScoreTable,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            terminal_velocity: 15.0,
            acceleration: 0.5,
            friction: 0.8,
            max_speed: 6.0,
            stop_threshold: 0.1,
            jump_impulse: 14.0,
            stomp_bounce: 8.0,
            invincibility_ticks: 120,
            star_ticks: 600,
            fireball_cooldown: 20,
            squash_linger_ticks: 30,
            time_limit: 400,
            starting_lives: 3,
            scores: ScoreTable::default(),
        }
    }
}

impl TuningConfig {
    /// Set the level time limit in seconds
    #[must_use]
    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Set the starting life count
    #[must_use]
    pub fn with_starting_lives(mut self, lives: i32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Set gravity and terminal velocity together
    #[must_use]
    pub fn with_gravity(mut self, gravity: f32, terminal_velocity: f32) -> Self {
        self.gravity = gravity;
        self.terminal_velocity = terminal_velocity;
        self
    }
}

impl Config for TuningConfig {}
