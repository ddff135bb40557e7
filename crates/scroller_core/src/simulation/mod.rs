//! The fixed-timestep tick: block events, interaction resolution and the
//! orchestrating step itself.

pub mod events;
pub mod interactions;
pub mod step;
