//! Math utilities and types
//!
//! Re-exports the nalgebra types the simulation uses. World space is 2D,
//! top-left origin, y increasing downward; velocities are in pixels/tick.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;
