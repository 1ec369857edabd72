//! Particle emitter component for the level's visual effects.
//!
//! A [`ParticleEmitter`] is a level entity that spawns [`Particle`] entities
//! while it is active. Emitters can follow another entity (usually the
//! player) at an offset, so the effect coordinator only has to toggle them
//! and adjust offsets and particle velocity.
//!
//! # How It Works
//!
//! 1. The level spawns one emitter per effect, stopped.
//! 2. The effect coordinator calls [`ParticleEmitter::start_follow`],
//!    [`ParticleEmitter::start`] and [`ParticleEmitter::stop`].
//! 3. The `particle_emitter_system` moves the emitter onto its target and
//!    spawns particles while active, never exceeding `max_alive`.
//! 4. Emitters with a `duration` stop by themselves once it runs out.
//! 5. Particles age, fade and are despawned through their [`Ttl`](super::ttl::Ttl).
//!
//! # Related
//!
//! - [`crate::systems::particleemitter::particle_emitter_system`] – spawns particles
//! - [`crate::systems::effects`] – decides when each effect runs

use bevy_ecs::prelude::*;
use glam::Vec2;

/// The effects a level carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Walking,
    Jump,
    Death,
}

/// Linear interpolation from `start` to `end` over a particle's life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp<T> {
    pub start: T,
    pub end: T,
}

impl Ramp<f32> {
    pub fn at(&self, t: f32) -> f32 {
        self.start + (self.end - self.start) * t.clamp(0.0, 1.0)
    }
}

impl Ramp<Vec2> {
    pub fn at(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t.clamp(0.0, 1.0))
    }
}

/// Particle emitter attached to a level effect.
///
/// # Fields
///
/// - `effect` - Which effect this emitter renders
/// - `active` - Whether particles are being spawned
/// - `follow` - Entity the emitter is attached to
/// - `offset` - Offset from the followed entity's position
/// - `frames` - Particle atlas frames, one picked at random per particle
/// - `particle_velocity` - Initial velocity of spawned particles
/// - `lifespan` - Particle lifetime in seconds
/// - `max_alive` - Maximum number of particles alive at once
/// - `duration` - Optional run time in seconds after each `start`
/// - `remaining` - Run time left for the current start
/// - `gravity_y` - Vertical acceleration applied to particles
/// - `scale`, `alpha` - Ramps over a particle's life
#[derive(Component, Debug, Clone)]
pub struct ParticleEmitter {
    pub effect: EffectKind,
    pub active: bool,
    pub follow: Option<Entity>,
    pub offset: Vec2,
    pub frames: &'static [&'static str],
    pub particle_velocity: Vec2,
    pub lifespan: f32,
    pub max_alive: usize,
    pub duration: Option<f32>,
    pub remaining: Option<f32>,
    pub gravity_y: f32,
    pub scale: Ramp<Vec2>,
    pub alpha: Ramp<f32>,
}

fn uniform(start: f32, end: f32) -> Ramp<Vec2> {
    Ramp {
        start: Vec2::new(start, start),
        end: Vec2::new(end, end),
    }
}

const FADE: Ramp<f32> = Ramp { start: 1.0, end: 0.1 };

impl ParticleEmitter {
    fn stopped(effect: EffectKind, frames: &'static [&'static str]) -> Self {
        Self {
            effect,
            active: false,
            follow: None,
            offset: Vec2::ZERO,
            frames,
            particle_velocity: Vec2::ZERO,
            lifespan: 0.35,
            max_alive: 1,
            duration: None,
            remaining: None,
            gravity_y: 0.0,
            scale: uniform(1.0, 1.0),
            alpha: FADE,
        }
    }

    /// Smoke left behind while walking on the ground.
    pub fn walking_smoke() -> Self {
        Self {
            max_alive: 16,
            gravity_y: -200.0,
            scale: uniform(0.01, 0.05),
            ..Self::stopped(EffectKind::Walking, &["smoke_03", "smoke_09"])
        }
    }

    /// Puff at the feet when a jump starts.
    pub fn jump_puff() -> Self {
        Self {
            particle_velocity: Vec2::new(0.0, -50.0),
            duration: Some(0.1),
            scale: Ramp {
                start: Vec2::new(0.1, 0.01),
                end: Vec2::new(0.2, 0.1),
            },
            ..Self::stopped(EffectKind::Jump, &["muzzle_02"])
        }
    }

    /// Smoke where the player died.
    pub fn death_puff() -> Self {
        Self {
            lifespan: 0.5,
            duration: Some(0.1),
            scale: uniform(0.1, 0.5),
            ..Self::stopped(EffectKind::Death, &["smoke_10"])
        }
    }

    pub fn for_effect(effect: EffectKind) -> Self {
        match effect {
            EffectKind::Walking => Self::walking_smoke(),
            EffectKind::Jump => Self::jump_puff(),
            EffectKind::Death => Self::death_puff(),
        }
    }

    /// Start emitting. Restarts the run time of emitters with a duration.
    pub fn start(&mut self) {
        self.active = true;
        self.remaining = self.duration;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.remaining = None;
    }

    /// Attach the emitter to `target` at `offset` without changing `active`.
    pub fn start_follow(&mut self, target: Entity, offset: Vec2) {
        self.follow = Some(target);
        self.offset = offset;
    }

    pub fn set_particle_speed(&mut self, vx: f32, vy: f32) {
        self.particle_velocity = Vec2::new(vx, vy);
    }

    /// Consume `dt` of the current run. Returns true when the run just ended.
    pub fn tick_duration(&mut self, dt: f32) -> bool {
        let Some(left) = self.remaining.as_mut() else {
            return false;
        };
        *left -= dt;
        if *left <= 0.0 {
            self.stop();
            return true;
        }
        false
    }
}

/// A single spawned particle.
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub emitter: Entity,
    pub frame: &'static str,
    pub velocity: Vec2,
    pub gravity_y: f32,
    pub age: f32,
    pub lifespan: f32,
    pub scale: Ramp<Vec2>,
    pub alpha: Ramp<f32>,
}

impl Particle {
    /// Fraction of the lifespan already used, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.lifespan <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifespan).clamp(0.0, 1.0)
    }

    pub fn current_scale(&self) -> Vec2 {
        self.scale.at(self.progress())
    }

    pub fn current_alpha(&self) -> f32 {
        self.alpha.at(self.progress())
    }
}
