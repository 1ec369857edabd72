//! The player character.
//!
//! Position and velocity live in [`MapPosition`](super::mapposition::MapPosition)
//! and [`RigidBody`](super::rigidbody::RigidBody); this component holds the
//! rest of the per-level player state.

use bevy_ecs::prelude::Component;

/// Direction the sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub facing: Facing,
    /// Whether input affects motion. False during the death and win sequences.
    pub controllable: bool,
    /// False while the "dead" sprite is hidden.
    pub visible: bool,
    /// Horizontal direction the player is steering this tick, if any.
    pub moving: Option<Facing>,
    /// Set on the tick a jump impulse was applied.
    pub jumped: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            facing: Facing::Left,
            controllable: true,
            visible: true,
            moving: None,
            jumped: false,
        }
    }
}
