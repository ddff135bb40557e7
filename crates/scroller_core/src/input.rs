//! Input intent contract
//!
//! The core never sees raw device state. A front-end translates whatever it
//! reads (keyboard, gamepad, replay file) into one [`Intents`] set per tick.
//! `MOVE_LEFT`/`MOVE_RIGHT` are held intents; `JUMP` and `SHOOT` are
//! pressed-this-tick intents.

bitflags::bitflags! {
    /// Per-tick set of discrete player intents.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Intents: u8 {
        /// Accelerate left
        const MOVE_LEFT = 1 << 0;
        /// Accelerate right
        const MOVE_RIGHT = 1 << 1;
        /// Jump (takes effect only while grounded)
        const JUMP = 1 << 2;
        /// Shoot a fireball (takes effect only in Fire state, off cooldown)
        const SHOOT = 1 << 3;
        /// Terminate the run loop
        const QUIT = 1 << 4;
    }
}

/// Source of one intent set per tick.
pub trait InputSource {
    /// Produce the intents for the tick about to be simulated.
    fn poll(&mut self) -> Intents;
}
