//! Input sampler.
//!
//! [`update_input_state`] turns the raw held keys written by the front-end
//! into [`InputState`], computing press and release edges against the
//! previous tick. A latched jump press is consumed here.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputState, RawInput};

pub fn update_input_state(mut raw: ResMut<RawInput>, mut input: ResMut<InputState>) {
    input.left.advance(raw.left);
    input.right.advance(raw.right);
    let jump = raw.take_jump();
    input.jump.advance(jump);
}
