//! Level setup, tick schedule and the level builder.
//!
//! [`setup_world`] inserts every resource, registers the restart observer
//! and the [`spawn_level`] system, then builds the level once.
//! [`build_schedule`] returns the chained per-tick schedule and [`tick`]
//! advances time and runs it.

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::{AnimClip, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::levelentity::LevelEntity;
use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::{EffectKind, ParticleEmitter};
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::worldobject::{ObjectKind, WorldObject};
use crate::events::audio::AudioCmd;
use crate::events::gamestate::observe_restart_level;
use crate::events::level::LevelEvent;
use crate::resources::effecthandles::EffectHandles;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hud::Hud;
use crate::resources::input::{InputState, RawInput};
use crate::resources::leveldata::{LevelData, TileGrid};
use crate::resources::overlaps::OverlapSet;
use crate::resources::progress::Progress;
use crate::resources::scheduler::Scheduler;
use crate::resources::session::Session;
use crate::resources::spawnpoints::SpawnPoints;
use crate::resources::systemsstore::{StoredSystem, SystemsStore};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::collision::detect_overlaps;
use crate::systems::effects::effect_coordinator;
use crate::systems::hud::hud_update;
use crate::systems::input::update_input_state;
use crate::systems::messages::{update_audio_cmds, update_level_events};
use crate::systems::motion::motion_controller;
use crate::systems::movement::movement;
use crate::systems::particleemitter::{particle_emitter_system, particle_update_system};
use crate::systems::router::route_overlaps;
use crate::systems::session::{restart_on_confirm, run_scheduled_transitions};
use crate::systems::ttl::ttl_system;

/// Build a world for `level` and spawn it.
pub fn setup_world(config: GameConfig, level: LevelData) -> World {
    let mut world = World::new();

    let progress = Progress::new(config.starting_lives);
    world.insert_resource(WorldTime::default());
    world.insert_resource(RawInput::default());
    world.insert_resource(InputState::default());
    world.insert_resource(Hud::new(&progress));
    world.insert_resource(progress);
    world.insert_resource(Session::default());
    world.insert_resource(Scheduler::new());
    world.insert_resource(OverlapSet::default());
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<LevelEvent>>();
    world.insert_resource(config);
    world.insert_resource(level);

    world.spawn(Observer::new(observe_restart_level));

    let spawn_level_id = world.register_system(spawn_level);
    let mut systems_store = SystemsStore::new();
    systems_store.insert(StoredSystem::SpawnLevel, spawn_level_id);
    world.insert_resource(systems_store);

    if let Err(e) = world.run_system(spawn_level_id) {
        error!("Failed to build the level: {e}");
    }
    world
}

/// The per-tick schedule, in the order the level's rules depend on.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_audio_cmds,
            update_level_events,
            update_input_state,
            motion_controller,
            movement,
            detect_overlaps,
            route_overlaps,
            run_scheduled_transitions,
            restart_on_confirm,
            effect_coordinator,
            particle_emitter_system,
            particle_update_system,
            ttl_system,
            animation,
            hud_update,
        )
            .chain(),
    );
    update
}

/// Advance the level clock by `dt` seconds and run one tick.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
    schedule.run(world);
}

/// Spawn the player, map objects and effect emitters from [`LevelData`].
///
/// Registered in [`SystemsStore`] as [`StoredSystem::SpawnLevel`] so a restart can run
/// it again after despawning the previous level.
pub fn spawn_level(mut commands: Commands, level: Res<LevelData>, config: Res<GameConfig>) {
    let start = match level.start_spawn() {
        Ok(start) => start,
        Err(e) => {
            error!("Cannot build level: {e}");
            return;
        }
    };
    let tile = level.tile_size as f32;

    commands.insert_resource(TileGrid::from_level(&level));
    commands.insert_resource(SpawnPoints {
        start,
        checkpoint: level.checkpoint(),
    });

    let mut object_count = 0;
    for (kind, object) in level.objects() {
        let frame = object.frame.unwrap_or(kind.default_frame());
        let mut entity = commands.spawn((
            LevelEntity,
            MapPosition::from_vec(object.position()),
            BoxCollider::new(tile, tile),
            WorldObject::new(kind).with_frame(frame),
        ));
        match kind {
            ObjectKind::Coin => {
                entity.insert(Animation::new(AnimClip::CoinSpin));
            }
            ObjectKind::ExtraLife => {
                entity.insert(Animation::new(AnimClip::Heart));
            }
            _ => {}
        }
        object_count += 1;
    }

    let player = commands
        .spawn((
            LevelEntity,
            Player::new(),
            MapPosition::from_vec(start),
            RigidBody::with_physics(config.drag, config.max_velocity),
            BoxCollider::new(config.player_width, config.player_height),
            Animation::new(AnimClip::Idle),
        ))
        .id();

    let mut emitter = |effect: EffectKind| {
        commands
            .spawn((
                LevelEntity,
                MapPosition::from_vec(start),
                ParticleEmitter::for_effect(effect),
            ))
            .id()
    };
    let handles = EffectHandles {
        walking: emitter(EffectKind::Walking),
        jump: emitter(EffectKind::Jump),
        death: emitter(EffectKind::Death),
    };
    commands.insert_resource(handles);

    info!(
        "Level built: {}x{} tiles, {} objects, player {:?} at ({}, {})",
        level.width, level.height, object_count, player, start.x, start.y
    );
}
