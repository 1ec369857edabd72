//! Level state machine.
//!
//! The phases live in [`Session`]; lives, score and flags in [`Progress`].
//! Transitions:
//!
//! - `Playing` → `Dying` on a hazard while controllable ([`LevelContext::begin_death`]).
//! - `Dying` → `GameOver`, or through `Respawning` back to `Playing`, when
//!   the scheduled `FinishDeath` fires ([`LevelContext::finish_death`]).
//! - `Playing` → `Won` on the goal zone ([`LevelContext::begin_win`]).
//! - `GameOver` / `Won` → full restart on a fresh confirm press
//!   ([`restart_on_confirm`]).
//!
//! Any other trigger is ignored. Timed transitions are [`Scheduler`]
//! entries applied by [`run_scheduled_transitions`] on a later tick.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec2;
use log::{debug, info};

use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::{EffectKind, ParticleEmitter};
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::worldobject::WorldObject;
use crate::events::audio::{AudioCmd, SoundId};
use crate::events::gamestate::RestartLevelEvent;
use crate::events::level::LevelEvent;
use crate::resources::effecthandles::EffectHandles;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hud::{Hud, MSG_GAME_OVER, MSG_WIN};
use crate::resources::input::InputState;
use crate::resources::progress::Progress;
use crate::resources::scheduler::{Scheduler, TimedAction};
use crate::resources::session::{Session, SessionPhase};
use crate::resources::spawnpoints::SpawnPoints;
use crate::resources::worldtime::WorldTime;

/// Everything the router and the state machine read or change.
#[derive(SystemParam)]
pub struct LevelContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub config: Res<'w, GameConfig>,
    pub time: Res<'w, WorldTime>,
    pub progress: ResMut<'w, Progress>,
    pub session: ResMut<'w, Session>,
    pub scheduler: ResMut<'w, Scheduler>,
    pub hud: ResMut<'w, Hud>,
    pub spawns: Option<Res<'w, SpawnPoints>>,
    pub effects: Option<Res<'w, EffectHandles>>,
    pub audio: MessageWriter<'w, AudioCmd>,
    pub events: MessageWriter<'w, LevelEvent>,
    pub players: Query<
        'w,
        's,
        (
            Entity,
            &'static mut Player,
            &'static mut RigidBody,
            &'static mut MapPosition,
        ),
        Without<WorldObject>,
    >,
    pub objects: Query<
        'w,
        's,
        (Entity, &'static mut WorldObject, &'static MapPosition),
        Without<Player>,
    >,
    pub emitters: Query<'w, 's, &'static mut ParticleEmitter>,
}

impl LevelContext<'_, '_> {
    /// Emitter entity of `effect`, if the level has one.
    pub fn emitter(&mut self, effect: EffectKind) -> Option<Mut<'_, ParticleEmitter>> {
        let entity = self.effects.as_ref()?.get(effect);
        self.emitters.get_mut(entity).ok()
    }

    pub fn play(&mut self, id: SoundId) {
        self.audio.write(AudioCmd::play(id));
    }

    /// Queue `action` to fire `delay` seconds from now, in the current epoch.
    pub fn schedule(&mut self, action: TimedAction, delay: f32) {
        self.scheduler.schedule(
            action,
            self.time.elapsed,
            delay,
            self.time.frame_count,
            self.session.epoch,
        );
    }

    /// Show a HUD message and return its token.
    pub fn show_message(&mut self, text: &'static str) -> u32 {
        let token = self.hud.show_message(text);
        self.events.write(LevelEvent::MessageShown(text));
        token
    }

    /// Take `entity` out of the collidable set and despawn it.
    ///
    /// Returns false if it was already consumed.
    pub fn consume(&mut self, entity: Entity) -> bool {
        let Ok((_, mut object, _)) = self.objects.get_mut(entity) else {
            return false;
        };
        if !object.active {
            return false;
        }
        object.active = false;
        self.commands.entity(entity).try_despawn();
        true
    }

    /// Hazard touched: enter `Dying` and schedule the outcome.
    pub fn begin_death(&mut self) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        let Ok((entity, mut player, mut body, _)) = self.players.single_mut() else {
            return;
        };
        if !player.controllable {
            return;
        }
        player.controllable = false;
        player.visible = false;
        player.moving = None;
        body.velocity.x = 0.0;
        body.acceleration.x = 0.0;

        self.progress.lose_life();
        self.session.phase = SessionPhase::Dying;

        if let Some(mut death) = self.emitter(EffectKind::Death) {
            death.start_follow(entity, Vec2::ZERO);
            death.start();
        }
        self.play(SoundId::Death);
        self.events.write(LevelEvent::PlayerDied {
            lives_left: self.progress.lives,
        });
        let delay = self.config.death_delay();
        self.schedule(TimedAction::FinishDeath, delay);
        info!("Player died, {} lives left", self.progress.lives);
    }

    /// End the death sequence: game over, or respawn at the checkpoint or start.
    pub fn finish_death(&mut self) {
        if self.session.phase != SessionPhase::Dying {
            debug!("FinishDeath while {:?}; ignored", self.session.phase);
            return;
        }

        if self.progress.lives <= 0 {
            self.session.phase = SessionPhase::GameOver;
            self.show_message(MSG_GAME_OVER);
            self.events.write(LevelEvent::GameOver);
            info!("Game over");
        } else {
            self.session.phase = SessionPhase::Respawning;
            let has_checkpoint = self.progress.has_checkpoint;
            let (target, at_checkpoint) = match self.spawns.as_deref() {
                Some(spawns) => (
                    spawns.respawn_point(has_checkpoint),
                    has_checkpoint && spawns.checkpoint.is_some(),
                ),
                None => (Vec2::ZERO, false),
            };
            if let Ok((_, mut player, mut body, mut position)) = self.players.single_mut() {
                position.pos = target;
                body.velocity = Vec2::ZERO;
                body.acceleration.x = 0.0;
                player.visible = true;
                player.controllable = true;
            }
            self.events.write(LevelEvent::Respawned { at_checkpoint });
            self.session.phase = SessionPhase::Playing;
            info!(
                "Respawned at {} ({}, {})",
                if at_checkpoint { "checkpoint" } else { "start" },
                target.x,
                target.y
            );
        }

        self.hud.request_refresh();
        if let Some(mut death) = self.emitter(EffectKind::Death) {
            death.stop();
        }
    }

    /// Goal reached: enter `Won`.
    pub fn begin_win(&mut self) {
        if self.session.phase != SessionPhase::Playing {
            return;
        }
        if let Ok((_, mut player, mut body, _)) = self.players.single_mut() {
            player.controllable = false;
            player.moving = None;
            body.velocity.x = 0.0;
            body.acceleration.x = 0.0;
        }
        self.session.phase = SessionPhase::Won;
        self.show_message(MSG_WIN);
        self.events.write(LevelEvent::Won);
        info!("Level won with score {}", self.progress.score);
    }

    /// Hide the message shown with `token`, unless another replaced it.
    pub fn hide_message(&mut self, token: u32) {
        if self.hud.hide_message(token) {
            self.events.write(LevelEvent::MessageHidden);
        }
    }

    pub fn apply(&mut self, action: TimedAction) {
        match action {
            TimedAction::FinishDeath => self.finish_death(),
            TimedAction::HideMessage { token } => self.hide_message(token),
        }
    }
}

/// Fire every timed transition that is due this tick.
pub fn run_scheduled_transitions(mut ctx: LevelContext) {
    let due = ctx.scheduler.take_due(
        ctx.time.elapsed,
        ctx.time.frame_count,
        ctx.session.epoch,
    );
    for action in due {
        ctx.apply(action);
    }
}

/// Trigger a full restart on a fresh confirm press after game over or a win.
pub fn restart_on_confirm(input: Res<InputState>, session: Res<Session>, mut commands: Commands) {
    if session.phase.is_terminal() && input.jump.just_pressed {
        debug!("Restart confirmed from {:?}", session.phase);
        commands.trigger(RestartLevelEvent {});
    }
}
