//! ECS systems of the level tick.
//!
//! Submodules overview, in tick order:
//! - `messages` – advance message queues
//! - `input` – sample raw keys into held/pressed/released state
//! - `motion` – steer the player from input
//! - `movement` – arcade physics against the tile grid
//! - `collision` – collect player overlaps with world objects
//! - `router` – dispatch each overlap to its category handler
//! - `session` – timed transitions, death/respawn/win and restart
//! - `effects` – toggle walking and jump effects
//! - `particleemitter` – spawn and move particles
//! - `ttl` – despawn expired entities
//! - `animation` – advance animation clips
//! - `hud` – refresh HUD text
pub mod animation;
pub mod collision;
pub mod effects;
pub mod hud;
pub mod input;
pub mod messages;
pub mod motion;
pub mod movement;
pub mod particleemitter;
pub mod router;
pub mod session;
pub mod ttl;
