//! Foundation utilities: math types and collision geometry.

pub mod geometry;
pub mod math;
