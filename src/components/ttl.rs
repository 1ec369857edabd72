//! Lifetime countdown.
//!
//! Particles are spawned with a [`Ttl`] equal to their lifespan; `ttl_system`
//! despawns them when it runs out.

use bevy_ecs::prelude::Component;

/// Seconds left before the entity is despawned.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }

    /// Count down by `dt`. Returns true once the lifetime is used up.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}
