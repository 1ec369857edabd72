//! Event types and observers used by the level.
//!
//! Submodules:
//! - [`audio`] – play-sound requests for the audio front-end
//! - [`gamestate`] – full restart event and its observer
//! - [`level`] – gameplay notifications written each tick
pub mod audio;
pub mod gamestate;
pub mod level;
