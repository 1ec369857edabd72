//! Full level restart event and observer.
//!
//! `restart_on_confirm` triggers a [`RestartLevelEvent`] once the player
//! confirms on the game over or win screen. The observer in this module
//! resets the run's resources, despawns every [`LevelEntity`] and rebuilds
//! the level through the `spawn_level` system stored in
//! [`SystemsStore`].
//!
//! Bumping the session epoch here is what invalidates timed transitions
//! queued before the restart.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::levelentity::LevelEntity;
use crate::events::level::LevelEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hud::Hud;
use crate::resources::progress::Progress;
use crate::resources::scheduler::Scheduler;
use crate::resources::session::{Session, SessionPhase};
use crate::resources::systemsstore::{StoredSystem, SystemsStore};

/// Request a full restart of the level.
#[derive(Event, Debug, Clone, Copy)]
pub struct RestartLevelEvent {}

/// Observer that performs a full restart.
///
/// Contract
/// - Ignored unless the session is in a terminal phase.
/// - Resets [`Progress`] to the configured starting values.
/// - Sets the phase to Playing and bumps the epoch.
/// - Clears the [`Scheduler`] and hides the HUD message.
/// - Despawns every level entity, then runs `spawn_level`.
#[allow(clippy::too_many_arguments)]
pub fn observe_restart_level(
    _trigger: On<RestartLevelEvent>,
    mut commands: Commands,
    config: Res<GameConfig>,
    mut progress: ResMut<Progress>,
    mut session: ResMut<Session>,
    mut scheduler: ResMut<Scheduler>,
    mut hud: ResMut<Hud>,
    mut level_events: MessageWriter<LevelEvent>,
    level_entities: Query<Entity, With<LevelEntity>>,
    systems_store: Res<SystemsStore>,
) {
    if !session.phase.is_terminal() {
        warn!("Restart requested while {:?}; ignored", session.phase);
        return;
    }

    *progress = Progress::new(config.starting_lives);
    session.phase = SessionPhase::Playing;
    session.epoch = session.epoch.wrapping_add(1);
    scheduler.clear();
    hud.clear_message();
    hud.refresh(&progress);

    for entity in level_entities.iter() {
        commands.entity(entity).try_despawn();
    }
    match systems_store.get(StoredSystem::SpawnLevel) {
        Some(spawn_level) => commands.run_system(spawn_level),
        None => warn!("No level builder registered; level not rebuilt"),
    }

    info!("Level restarted (epoch {})", session.epoch);
    level_events.write(LevelEvent::Restarted);
}
