//! Effect coordinator.
//!
//! Keeps the walking smoke and the jump puff in step with the player's
//! movement state. The death puff is driven by the state machine.
//!
//! - Walking smoke runs only while the player is controllable, grounded and
//!   moving. It trails behind the player: offset to the side the player
//!   walks away from, particles pushed opposite to the walking direction.
//! - The jump puff starts at the player's feet on the tick a jump impulse
//!   was applied and stops once the player is grounded again.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::BoxCollider;
use crate::components::particleemitter::ParticleEmitter;
use crate::components::player::{Facing, Player};
use crate::components::rigidbody::RigidBody;
use crate::resources::effecthandles::EffectHandles;
use crate::resources::gameconfig::GameConfig;

/// Offset of the walking smoke from the player's centre.
pub fn walking_offset(facing: Facing, size: Vec2) -> Vec2 {
    match facing {
        Facing::Left => Vec2::new(size.x / 2.0 - 10.0, size.y / 2.0 - 1.0),
        Facing::Right => Vec2::new(-4.0, size.y / 2.0 - 1.0),
    }
}

pub fn effect_coordinator(
    config: Res<GameConfig>,
    handles: Option<Res<EffectHandles>>,
    players: Query<(Entity, &Player, &RigidBody, &BoxCollider)>,
    mut emitters: Query<&mut ParticleEmitter>,
) {
    let Some(handles) = handles else {
        return;
    };
    let Ok((entity, player, body, collider)) = players.single() else {
        return;
    };
    let grounded = body.grounded();

    if let Ok(mut walking) = emitters.get_mut(handles.walking) {
        match player.moving {
            Some(direction) if player.controllable && grounded => {
                let velocity = -direction.sign() * config.particle_velocity;
                walking.start_follow(entity, walking_offset(direction, collider.size));
                walking.set_particle_speed(velocity, 0.0);
                if !walking.active {
                    walking.start();
                }
            }
            _ => {
                if walking.active {
                    walking.stop();
                }
            }
        }
    }

    if let Ok(mut jump) = emitters.get_mut(handles.jump) {
        if player.jumped {
            jump.start_follow(entity, Vec2::new(0.0, collider.size.y / 2.0));
            jump.start();
        } else if jump.active && (grounded || !player.controllable) {
            jump.stop();
        }
    }
}
