//! Particle emitter and particle systems.
//!
//! - [`particle_emitter_system`] moves each emitter onto the entity it
//!   follows and, while active, spawns one particle per tick until the
//!   emitter's `max_alive` is reached. Emitters with a duration stop once it
//!   runs out.
//! - [`particle_update_system`] moves and ages the particles. Despawning is
//!   left to the TTL system.
//!
//! # Coordinate System
//!
//! - Y+ is down (screen coordinates), so a negative `gravity_y` floats
//!   particles upward.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::levelentity::LevelEntity;
use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::{Particle, ParticleEmitter};
use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Horizontal spread of spawn positions around the emitter.
const SPAWN_JITTER: f32 = 1.0;

/// System that follows targets and spawns particles.
///
/// # Ordering
///
/// Should run **after** the effect coordinator so effects started this tick
/// emit immediately.
pub fn particle_emitter_system(
    mut emitters: Query<(Entity, &mut MapPosition, &mut ParticleEmitter)>,
    targets: Query<&MapPosition, Without<ParticleEmitter>>,
    particles: Query<&Particle>,
    time: Res<WorldTime>,
    mut commands: Commands,
    mut rng: Local<Rng>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }

    let mut alive: FxHashMap<Entity, usize> = FxHashMap::default();
    for particle in particles.iter() {
        *alive.entry(particle.emitter).or_default() += 1;
    }

    for (entity, mut position, mut emitter) in emitters.iter_mut() {
        if let Some(target) = emitter.follow.and_then(|t| targets.get(t).ok()) {
            position.pos = target.pos + emitter.offset;
        }
        if !emitter.active || emitter.frames.is_empty() {
            continue;
        }

        if alive.get(&entity).copied().unwrap_or(0) < emitter.max_alive {
            let frame = emitter.frames[rng.usize(0..emitter.frames.len())];
            let jitter = (rng.f32() * 2.0 - 1.0) * SPAWN_JITTER;
            commands.spawn((
                LevelEntity,
                MapPosition::from_vec(position.pos + Vec2::new(jitter, 0.0)),
                Ttl::new(emitter.lifespan),
                Particle {
                    emitter: entity,
                    frame,
                    velocity: emitter.particle_velocity,
                    gravity_y: emitter.gravity_y,
                    age: 0.0,
                    lifespan: emitter.lifespan,
                    scale: emitter.scale,
                    alpha: emitter.alpha,
                },
            ));
        }

        emitter.tick_duration(dt);
    }
}

/// Integrate particle velocity and age.
pub fn particle_update_system(
    mut particles: Query<(&mut MapPosition, &mut Particle)>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    for (mut position, mut particle) in particles.iter_mut() {
        particle.velocity.y += particle.gravity_y * dt;
        position.pos += particle.velocity * dt;
        particle.age += dt;
    }
}
