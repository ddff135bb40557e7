//! Per-entity-kind state machines
//!
//! Each entity kind is a plain-data struct plus an update rule that reads
//! only its own state and the static terrain. Cross-entity effects
//! (collection, stomping, damage) belong to the interaction resolver, not
//! to the entities themselves.

pub mod block;
pub mod enemy;
pub mod pickup;
pub mod player;
