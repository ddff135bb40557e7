//! Render and HUD contracts
//!
//! The simulation never draws. Instead it snapshots itself into
//! [`EntityView`] records (what is where, in which visual state) and a
//! [`Readout`] (the HUD numbers). A renderer maps these to sprites and
//! text however it likes; camera-relative positioning is its job, using
//! [`crate::session::World::camera_x`].

use crate::entities::player::{Facing, PowerState};
use crate::foundation::geometry::Aabb;

/// What kind of entity a view record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// The player, with its current power rung
    Player(PowerState),
    /// A walking (or squashed) enemy
    Enemy,
    /// Mushroom pickup
    Mushroom,
    /// Fire flower pickup
    FireFlower,
    /// Star pickup
    Star,
    /// Extra-life pickup
    ExtraLife,
    /// Floating coin
    Coin,
    /// Fireball projectile
    Fireball,
    /// Question block
    QuestionBlock,
    /// Brick block
    Brick,
    /// Ground or platform segment
    Ground,
    /// Pipe
    Pipe,
    /// The level goal marker
    Goal,
}

/// Sprite-selection hint accompanying a view record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    /// Nothing special
    Normal,
    /// Post-damage invincibility window; renderers typically blink this
    Flashing,
    /// Star power active
    Starred,
    /// Flattened enemy lingering before removal
    Squashed,
    /// Question block that has already released its payload
    Spent,
}

/// One drawable entity, in world coordinates.
#[derive(Debug, Clone, Copy)]
pub struct EntityView {
    /// Entity kind
    pub kind: ViewKind,
    /// Position and size in world pixels
    pub rect: Aabb,
    /// Horizontal orientation, for sprite mirroring
    pub facing: Facing,
    /// Sprite-selection hint
    pub visual: VisualState,
}

/// The HUD numbers for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    /// Total score
    pub score: u32,
    /// Coins collected
    pub coins: u32,
    /// Lives remaining
    pub lives: i32,
    /// Seconds left on the level timer
    pub time_left: u32,
    /// Player power rung
    pub power: PowerState,
    /// Star power currently active
    pub star_active: bool,
}
