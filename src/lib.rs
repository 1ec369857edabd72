//! Placid Plains level core.
//!
//! A single platformer level as an ECS world: input sampling, arcade
//! physics against a tile grid, overlap routing, the death/respawn/win
//! state machine, particle effects and HUD text. The optional `window`
//! feature adds a raylib front-end that plays the level.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;

#[cfg(feature = "window")]
pub mod frontend;
