//! ECS components for level entities.
//!
//! Submodules overview:
//! - [`animation`] – clip playback state for the player and animated pickups
//! - [`boxcollider`] – centred axis-aligned box used for overlap tests
//! - [`levelentity`] – marker for entities despawned on a full restart
//! - [`mapposition`] – world-space centre of an entity
//! - [`particleemitter`] – effect emitters and the particles they spawn
//! - [`player`] – per-level player state (facing, control, visibility)
//! - [`rigidbody`] – arcade body with velocity, drag and contact flags
//! - [`ttl`] – countdown that despawns an entity
//! - [`worldobject`] – map objects routed by category on overlap

pub mod animation;
pub mod boxcollider;
pub mod levelentity;
pub mod mapposition;
pub mod particleemitter;
pub mod player;
pub mod rigidbody;
pub mod ttl;
pub mod worldobject;
