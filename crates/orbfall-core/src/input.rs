//! Per-tick input snapshot.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Controls held during one tick.
    ///
    /// Applied in a fixed order: rotate left, rotate right, thrust forward,
    /// thrust backward, fire.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct InputState: u8 {
        /// Rotate counter-clockwise
        const LEFT = 1 << 0;
        /// Rotate clockwise
        const RIGHT = 1 << 1;
        /// Thrust along the heading
        const UP = 1 << 2;
        /// Thrust against the heading
        const DOWN = 1 << 3;
        /// Fire one projectile
        const FIRE = 1 << 4;
    }
}

impl InputState {
    /// Builds a snapshot from individual key states.
    #[must_use]
    pub fn from_keys(left: bool, right: bool, up: bool, down: bool, fire: bool) -> Self {
        let mut input = Self::empty();
        input.set(Self::LEFT, left);
        input.set(Self::RIGHT, right);
        input.set(Self::UP, up);
        input.set(Self::DOWN, down);
        input.set(Self::FIRE, fire);
        input
    }
}
