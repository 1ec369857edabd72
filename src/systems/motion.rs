//! Motion controller.
//!
//! Turns the sampled [`InputState`] into the player's horizontal
//! acceleration, facing, animation clip and jump impulse. The decision
//! itself is the pure [`steer`] function; [`motion_controller`] applies it
//! to the player entity.
//!
//! Holding left and right together cancels out: acceleration drops to zero
//! and drag brakes the player.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::{AnimClip, Animation};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Facing, Player};
use crate::components::rigidbody::RigidBody;
use crate::events::audio::{AudioCmd, SoundId};
use crate::events::level::LevelEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

/// Volume of the jump sound.
pub const JUMP_VOLUME: f32 = 0.25;

/// Outcome of one tick of steering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub acceleration_x: f32,
    /// New facing, if the input chose one.
    pub facing: Option<Facing>,
    pub moving: Option<Facing>,
    pub clip: AnimClip,
    /// Apply the jump impulse this tick.
    pub jump: bool,
}

/// Decide the player's motion for this tick.
pub fn steer(input: &InputState, grounded: bool, controllable: bool, acceleration: f32) -> Steering {
    if !controllable {
        return Steering {
            acceleration_x: 0.0,
            facing: None,
            moving: None,
            clip: AnimClip::Idle,
            jump: false,
        };
    }

    let (acceleration_x, moving) = match (input.left.held, input.right.held) {
        (true, false) => (-acceleration, Some(Facing::Left)),
        (false, true) => (acceleration, Some(Facing::Right)),
        _ => (0.0, None),
    };
    let clip = if !grounded {
        AnimClip::Jump
    } else if moving.is_some() {
        AnimClip::Walk
    } else {
        AnimClip::Idle
    };

    Steering {
        acceleration_x,
        facing: moving,
        moving,
        clip,
        jump: grounded && input.jump.just_pressed,
    }
}

/// Apply [`steer`] to the player.
///
/// Also toggles world-bound collision near the left edge of the level while
/// the player is controllable.
pub fn motion_controller(
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut players: Query<(&mut Player, &mut RigidBody, &MapPosition, &mut Animation)>,
    mut audio: MessageWriter<AudioCmd>,
    mut level_events: MessageWriter<LevelEvent>,
) {
    let Ok((mut player, mut body, position, mut animation)) = players.single_mut() else {
        return;
    };

    let steering = steer(
        &input,
        body.grounded(),
        player.controllable,
        config.acceleration,
    );
    body.set_acceleration_x(steering.acceleration_x);
    if let Some(facing) = steering.facing {
        player.facing = facing;
    }
    player.moving = steering.moving;
    player.jumped = false;
    animation.play(steering.clip);

    if player.controllable {
        body.collide_world_bounds = position.pos.x <= config.world_bound_threshold;
    }

    if steering.jump {
        body.set_velocity_y(config.jump_velocity);
        player.jumped = true;
        trace!("jump at ({}, {})", position.pos.x, position.pos.y);
        audio.write(AudioCmd::play_at(SoundId::Jump, JUMP_VOLUME));
        level_events.write(LevelEvent::Jumped);
    }
}
