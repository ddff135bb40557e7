//! Level data contract
//!
//! A level is ordered lists of `(x, y, params)` tuples for each static
//! entity kind plus the level width and player spawn. The loader does not
//! care how the data was authored: it can come from a RON file or from the
//! built-in [`LevelData::world_1_1`] tables. Validation happens here, at
//! load time — zero-sized boxes or an out-of-bounds spawn are fatal to the
//! load and can never surface mid-tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::block::BlockPayload;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Pipe collision width; pipes vary only in height.
pub const PIPE_WIDTH: f32 = 64.0;

/// Goal marker collision width.
pub const GOAL_WIDTH: f32 = 48.0;

/// Goal marker collision height (a full flag pole).
pub const GOAL_HEIGHT: f32 = 320.0;

/// Errors raised while loading or validating level data.
#[derive(Error, Debug)]
pub enum LevelError {
    /// IO error reading a level file
    #[error("IO error reading level: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed level file (includes unknown block payload kinds)
    #[error("level parse error: {0}")]
    Parse(String),

    /// A static box with non-positive extent
    #[error("invalid {what} dimensions {width}x{height} at ({x}, {y})")]
    InvalidDimensions {
        /// Which entity list the box came from
        what: &'static str,
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Offending width
        width: f32,
        /// Offending height
        height: f32,
    },

    /// The level is narrower than the screen, so the camera cannot scroll
    #[error("level width {width} is narrower than the screen ({min})")]
    TooNarrow {
        /// Declared level width
        width: f32,
        /// Minimum accepted width
        min: f32,
    },

    /// The player spawn lies outside the playable area
    #[error("player spawn ({x}, {y}) is outside the level")]
    SpawnOutOfBounds {
        /// Spawn x
        x: f32,
        /// Spawn y
        y: f32,
    },
}

/// Static layout of one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    /// Total level width in pixels; defines the camera scroll bound
    pub width: f32,
    /// Player spawn top-left corner
    pub spawn: (f32, f32),
    /// Ground segments: `(x, y, width, height)`
    pub ground: Vec<(f32, f32, f32, f32)>,
    /// Floating platforms: `(x, y, width, height)`
    pub platforms: Vec<(f32, f32, f32, f32)>,
    /// Pipes: `(x, y, height)`; width is [`PIPE_WIDTH`]
    pub pipes: Vec<(f32, f32, f32)>,
    /// Question blocks: `(x, y, payload)`
    pub question_blocks: Vec<(f32, f32, BlockPayload)>,
    /// Bricks: `(x, y, breakable)`
    pub bricks: Vec<(f32, f32, bool)>,
    /// Floating coins: `(x, y)`
    pub coins: Vec<(f32, f32)>,
    /// Walking enemies: `(x, y)`
    pub enemies: Vec<(f32, f32)>,
    /// Goal marker top-left corner
    pub goal: (f32, f32),
}

impl LevelData {
    /// Load and validate a level from a RON file.
    pub fn load_from_file(path: &str) -> Result<Self, LevelError> {
        let contents = std::fs::read_to_string(path)?;
        let data: Self = ron::from_str(&contents).map_err(|e| LevelError::Parse(e.to_string()))?;
        data.validate()?;
        log::info!("loaded level from {path} ({} px wide)", data.width);
        Ok(data)
    }

    /// Check the structural invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width < SCREEN_WIDTH {
            return Err(LevelError::TooNarrow {
                width: self.width,
                min: SCREEN_WIDTH,
            });
        }

        for &(x, y, width, height) in &self.ground {
            check_box("ground", x, y, width, height)?;
        }
        for &(x, y, width, height) in &self.platforms {
            check_box("platform", x, y, width, height)?;
        }
        for &(x, y, height) in &self.pipes {
            check_box("pipe", x, y, PIPE_WIDTH, height)?;
        }

        let (sx, sy) = self.spawn;
        if sx < 0.0 || sx >= self.width || sy >= SCREEN_HEIGHT {
            return Err(LevelError::SpawnOutOfBounds { x: sx, y: sy });
        }

        Ok(())
    }

    /// The built-in hand-authored level.
    #[allow(clippy::too_many_lines)]
    pub fn world_1_1() -> Self {
        use BlockPayload::{Coin, ExtraLife, FireFlower, Mushroom, Star};

        Self {
            width: 6400.0,
            spawn: (100.0, 400.0),
            ground: vec![(0.0, 550.0, 6400.0, 50.0)],
            platforms: vec![
                (300.0, 450.0, 128.0, 16.0),
                (500.0, 380.0, 96.0, 16.0),
                (700.0, 450.0, 128.0, 16.0),
                (1000.0, 400.0, 160.0, 16.0),
                (1300.0, 350.0, 96.0, 16.0),
                (1600.0, 400.0, 128.0, 16.0),
                (1900.0, 320.0, 160.0, 16.0),
                (2200.0, 400.0, 128.0, 16.0),
                (2600.0, 350.0, 160.0, 16.0),
                (3000.0, 400.0, 96.0, 16.0),
                (3300.0, 300.0, 128.0, 16.0),
                (3600.0, 380.0, 160.0, 16.0),
                (4000.0, 320.0, 128.0, 16.0),
                (4300.0, 400.0, 96.0, 16.0),
            ],
            pipes: vec![
                (600.0, 486.0, 64.0),
                (1500.0, 454.0, 96.0),
                (2400.0, 454.0, 96.0),
                (3200.0, 486.0, 64.0),
                (4200.0, 422.0, 128.0),
            ],
            question_blocks: vec![
                (400.0, 350.0, Coin),
                (432.0, 350.0, Mushroom),
                (464.0, 350.0, Coin),
                (800.0, 350.0, FireFlower),
                (1100.0, 300.0, Coin),
                (1400.0, 250.0, Mushroom),
                (1700.0, 300.0, ExtraLife),
                (2000.0, 220.0, Coin),
                (2300.0, 300.0, Star),
                (2700.0, 250.0, Coin),
                (3100.0, 300.0, FireFlower),
                (3400.0, 200.0, Coin),
                (3700.0, 280.0, Mushroom),
                (4100.0, 220.0, ExtraLife),
            ],
            bricks: vec![
                (368.0, 350.0, true),
                (496.0, 350.0, true),
                (528.0, 350.0, true),
                (768.0, 350.0, true),
                (832.0, 350.0, true),
                (864.0, 350.0, true),
                (1200.0, 300.0, true),
                (1232.0, 300.0, true),
                (2100.0, 220.0, true),
                (2132.0, 220.0, true),
                (2800.0, 250.0, true),
                (2832.0, 250.0, true),
                (3500.0, 200.0, true),
                (3532.0, 200.0, true),
            ],
            coins: vec![
                (450.0, 300.0),
                (850.0, 300.0),
                (1150.0, 250.0),
                (1750.0, 250.0),
                (2050.0, 170.0),
                (2350.0, 250.0),
                (2750.0, 200.0),
                (3150.0, 250.0),
                (3450.0, 150.0),
                (3750.0, 230.0),
                (4150.0, 170.0),
            ],
            enemies: vec![
                (700.0, 518.0),
                (950.0, 518.0),
                (1250.0, 518.0),
                (1800.0, 518.0),
                (2100.0, 518.0),
                (2500.0, 518.0),
                (2900.0, 518.0),
                (3400.0, 518.0),
                (3800.0, 518.0),
                (4300.0, 518.0),
            ],
            goal: (6200.0, 230.0),
        }
    }
}

fn check_box(what: &'static str, x: f32, y: f32, width: f32, height: f32) -> Result<(), LevelError> {
    if width <= 0.0 || height <= 0.0 {
        return Err(LevelError::InvalidDimensions {
            what,
            x,
            y,
            width,
            height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_builtin_level_validates() {
        LevelData::world_1_1().validate().unwrap();
    }

    #[test]
    fn zero_sized_boxes_are_rejected_at_load_time() {
        let mut data = LevelData::world_1_1();
        data.platforms.push((100.0, 100.0, 0.0, 16.0));
        assert!(matches!(
            data.validate(),
            Err(LevelError::InvalidDimensions { what: "platform", .. })
        ));
    }

    #[test]
    fn levels_narrower_than_the_screen_are_rejected() {
        let mut data = LevelData::world_1_1();
        data.width = 400.0;
        assert!(matches!(data.validate(), Err(LevelError::TooNarrow { .. })));
    }

    #[test]
    fn out_of_bounds_spawn_is_rejected() {
        let mut data = LevelData::world_1_1();
        data.spawn = (-50.0, 400.0);
        assert!(matches!(
            data.validate(),
            Err(LevelError::SpawnOutOfBounds { .. })
        ));
    }

    #[test]
    fn unknown_payload_kinds_fail_to_parse() {
        let text = r#"(
            width: 800.0,
            spawn: (100.0, 400.0),
            ground: [(0.0, 550.0, 800.0, 50.0)],
            platforms: [],
            pipes: [],
            question_blocks: [(400.0, 350.0, Feather)],
            bricks: [],
            coins: [],
            enemies: [],
            goal: (700.0, 230.0),
        )"#;
        let parsed: Result<LevelData, _> = ron::from_str(text);
        assert!(parsed.is_err(), "Feather is not a payload kind");
    }
}
