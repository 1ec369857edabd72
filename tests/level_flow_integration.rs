//! Integration tests for the level rules: pickups, the key and gate,
//! death and respawn timing, checkpoints, game over, winning and restarts.
//!
//! Each test builds a small ASCII level through `game::setup_world`, moves the
//! player by teleporting it onto objects and runs the real tick schedule.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use glam::Vec2;

use placidplains::components::mapposition::MapPosition;
use placidplains::components::particleemitter::ParticleEmitter;
use placidplains::components::player::Player;
use placidplains::components::rigidbody::RigidBody;
use placidplains::components::worldobject::{ObjectKind, WorldObject};
use placidplains::events::audio::{AudioCmd, SoundId};
use placidplains::events::level::LevelEvent;
use placidplains::game;
use placidplains::resources::effecthandles::EffectHandles;
use placidplains::resources::gameconfig::GameConfig;
use placidplains::resources::hud::{Hud, MSG_CHECKPOINT, MSG_GAME_OVER, MSG_WIN};
use placidplains::resources::input::RawInput;
use placidplains::resources::leveldata::LevelData;
use placidplains::resources::progress::Progress;
use placidplains::resources::scheduler::{Scheduler, TimedAction};
use placidplains::resources::session::{Session, SessionPhase};

const DT: f32 = 1.0 / 60.0;
const TILE: f32 = 18.0;
const EPSILON: f32 = 1e-3;

/// Ticks comfortably past the one second death and message delays.
const PAST_DELAY: usize = 65;

/// Everything sits on row 3, one floor row below. The key hole hangs over the gate.
const FLOW: [&str; 5] = [
    "...........................",
    "...........................",
    "...................o.......",
    ".S..c..d..x..C..k..g..h..w.",
    "###########################",
];

/// Two kill zones side by side.
const TWIN_HAZARDS: [&str; 4] = [
    "..........",
    "..........",
    ".S...xx...",
    "##########",
];

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(rows: &[&str]) -> (World, Schedule) {
    let level = LevelData::from_ascii(rows, TILE as u32).expect("test level is valid");
    let world = game::setup_world(GameConfig::new(), level);
    (world, game::build_schedule())
}

/// Run `ticks` ticks and return every level event written meanwhile.
fn run(world: &mut World, schedule: &mut Schedule, ticks: usize) -> Vec<LevelEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        game::tick(world, schedule, DT);
        events.extend(world.resource_mut::<Messages<LevelEvent>>().drain());
        world.resource_mut::<Messages<AudioCmd>>().drain().for_each(drop);
    }
    events
}

/// Like [`run`] but returns the sounds requested.
fn run_sounds(world: &mut World, schedule: &mut Schedule, ticks: usize) -> Vec<AudioCmd> {
    let mut sounds = Vec::new();
    for _ in 0..ticks {
        game::tick(world, schedule, DT);
        sounds.extend(world.resource_mut::<Messages<AudioCmd>>().drain());
        world.resource_mut::<Messages<LevelEvent>>().drain().for_each(drop);
    }
    sounds
}

/// Centre of the cell at `col`, `row`.
fn cell(col: usize, row: usize) -> Vec2 {
    Vec2::new(col as f32 * TILE + TILE / 2.0, row as f32 * TILE + TILE / 2.0)
}

fn player(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<Player>>()
        .single(world)
        .expect("one player")
}

fn player_state(world: &mut World) -> Player {
    let e = player(world);
    world.get::<Player>(e).cloned().expect("player component")
}

fn player_pos(world: &mut World) -> Vec2 {
    let e = player(world);
    world.get::<MapPosition>(e).expect("player position").pos
}

fn teleport(world: &mut World, pos: Vec2) {
    let e = player(world);
    world.get_mut::<MapPosition>(e).expect("player position").pos = pos;
    world.get_mut::<RigidBody>(e).expect("player body").velocity = Vec2::ZERO;
}

fn active_count(world: &mut World, kind: ObjectKind) -> usize {
    world
        .query::<&WorldObject>()
        .iter(world)
        .filter(|o| o.kind == kind && o.active)
        .count()
}

fn phase(world: &World) -> SessionPhase {
    world.resource::<Session>().phase
}

fn progress(world: &World) -> Progress {
    world.resource::<Progress>().clone()
}

/// Teleport onto `pos` and step once.
fn touch(world: &mut World, schedule: &mut Schedule, pos: Vec2) -> Vec<LevelEvent> {
    teleport(world, pos);
    run(world, schedule, 1)
}

fn press_confirm(world: &mut World, schedule: &mut Schedule) -> Vec<LevelEvent> {
    world.resource_mut::<RawInput>().jump = true;
    let mut events = run(world, schedule, 1);
    world.resource_mut::<RawInput>().jump = false;
    events.extend(run(world, schedule, 3));
    events
}

#[test]
fn fresh_level_starts_playing_with_full_hud() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    assert_eq!(phase(&world), SessionPhase::Playing);
    assert_eq!(progress(&world), Progress::new(3));
    let hud = world.resource::<Hud>();
    assert_eq!(hud.lives, "L3");
    assert_eq!(hud.score, "0000000");
    assert!(!hud.message_visible);

    let pos = player_pos(&mut world);
    assert!(approx_eq(pos.x, cell(1, 3).x));
    assert!(approx_eq(pos.y, 4.0 * TILE - 12.0), "standing on the floor, y={}", pos.y);
    assert!(player_state(&mut world).controllable);
}

#[test]
fn full_run_through_checkpoint_to_game_over() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    // Coin
    let events = touch(&mut world, &mut schedule, cell(4, 3));
    assert!(events.contains(&LevelEvent::CoinCollected));
    assert_eq!(progress(&world).score, 10);
    assert_eq!(active_count(&mut world, ObjectKind::Coin), 0);
    assert_eq!(world.resource::<Hud>().score, "0000010");

    // Diamond
    let events = touch(&mut world, &mut schedule, cell(7, 3));
    assert!(events.contains(&LevelEvent::DiamondCollected));
    assert_eq!(progress(&world).score, 110);
    assert_eq!(world.resource::<Hud>().score, "0000110");

    // First death, respawn at the start
    let events = touch(&mut world, &mut schedule, cell(10, 3));
    assert!(events.contains(&LevelEvent::PlayerDied { lives_left: 2 }));
    assert_eq!(phase(&world), SessionPhase::Dying);
    assert_eq!(progress(&world).lives, 2);
    let state = player_state(&mut world);
    assert!(!state.visible && !state.controllable);
    assert_eq!(world.resource::<Hud>().lives, "L3", "HUD updates when the death ends");

    let events = run(&mut world, &mut schedule, 50);
    assert!(events.is_empty(), "nothing happens while dying: {events:?}");
    assert_eq!(phase(&world), SessionPhase::Dying);

    let events = run(&mut world, &mut schedule, 15);
    assert!(events.contains(&LevelEvent::Respawned {
        at_checkpoint: false
    }));
    assert_eq!(phase(&world), SessionPhase::Playing);
    assert!(approx_eq(player_pos(&mut world).x, cell(1, 3).x));
    let state = player_state(&mut world);
    assert!(state.visible && state.controllable);
    assert_eq!(world.resource::<Hud>().lives, "L2");

    // Checkpoint and its message
    let events = touch(&mut world, &mut schedule, cell(13, 3));
    assert!(events.contains(&LevelEvent::CheckpointReached));
    assert!(events.contains(&LevelEvent::MessageShown(MSG_CHECKPOINT)));
    assert!(progress(&world).has_checkpoint);
    {
        let hud = world.resource::<Hud>();
        assert!(hud.message_visible);
        assert_eq!(hud.message, MSG_CHECKPOINT);
    }
    run(&mut world, &mut schedule, 30);
    assert!(world.resource::<Hud>().message_visible);
    let events = run(&mut world, &mut schedule, 35);
    assert!(events.contains(&LevelEvent::MessageHidden));
    assert!(!world.resource::<Hud>().message_visible);

    // Touching the checkpoint again does nothing
    let events = touch(&mut world, &mut schedule, cell(13, 3));
    assert!(!events.contains(&LevelEvent::CheckpointReached));

    // Second death, respawn at the checkpoint
    touch(&mut world, &mut schedule, cell(10, 3));
    let events = run(&mut world, &mut schedule, PAST_DELAY);
    assert!(events.contains(&LevelEvent::Respawned {
        at_checkpoint: true
    }));
    assert!(approx_eq(player_pos(&mut world).x, cell(13, 3).x));
    assert_eq!(progress(&world).lives, 1);

    // Last death ends the game
    touch(&mut world, &mut schedule, cell(10, 3));
    assert_eq!(progress(&world).lives, 0);
    let events = run(&mut world, &mut schedule, PAST_DELAY);
    assert!(events.contains(&LevelEvent::GameOver));
    assert!(!events.iter().any(|e| matches!(e, LevelEvent::Respawned { .. })));
    assert_eq!(phase(&world), SessionPhase::GameOver);
    let hud = world.resource::<Hud>();
    assert!(hud.message_visible);
    assert_eq!(hud.message, MSG_GAME_OVER);
    assert_eq!(hud.lives, "L0");
    assert_eq!(progress(&world).score, 110, "score survives deaths");

    // Game over message stays up
    run(&mut world, &mut schedule, 120);
    assert!(world.resource::<Hud>().message_visible);
    assert_eq!(phase(&world), SessionPhase::GameOver);
}

#[test]
fn extra_life_adds_a_life_and_points() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    let events = touch(&mut world, &mut schedule, cell(22, 3));
    assert!(events.contains(&LevelEvent::ExtraLifeCollected));
    let p = progress(&world);
    assert_eq!(p.lives, 4);
    assert_eq!(p.score, 20);
    assert_eq!(world.resource::<Hud>().lives, "L4");
    assert_eq!(active_count(&mut world, ObjectKind::ExtraLife), 0);
}

#[test]
fn pickups_play_their_sounds() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    teleport(&mut world, cell(4, 3));
    let sounds = run_sounds(&mut world, &mut schedule, 1);
    assert!(sounds.contains(&AudioCmd::play_at(SoundId::Coin, 0.25)));

    teleport(&mut world, cell(16, 3));
    let sounds = run_sounds(&mut world, &mut schedule, 1);
    assert!(sounds.contains(&AudioCmd::play(SoundId::Key)));

    teleport(&mut world, cell(10, 3));
    let sounds = run_sounds(&mut world, &mut schedule, 1);
    assert!(sounds.contains(&AudioCmd::play(SoundId::Death)));
}

#[test]
fn gate_repels_without_key() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    let gate = cell(19, 3);
    let events = touch(&mut world, &mut schedule, Vec2::new(gate.x - 10.0, gate.y));
    assert!(events.contains(&LevelEvent::GateRepelled));
    assert!(!events.contains(&LevelEvent::GateUnlocked));
    assert_eq!(active_count(&mut world, ObjectKind::Gate), 1);
    assert_eq!(active_count(&mut world, ObjectKind::KeyHole), 1);

    let e = player(&mut world);
    let body = world.get::<RigidBody>(e).expect("player body");
    assert!(approx_eq(body.velocity.x, -400.0), "pushed back, vx={}", body.velocity.x);

    // Approaching from the other side pushes the other way
    let events = touch(&mut world, &mut schedule, Vec2::new(gate.x + 10.0, gate.y));
    assert!(events.contains(&LevelEvent::GateRepelled));
    let e = player(&mut world);
    assert!(approx_eq(world.get::<RigidBody>(e).expect("body").velocity.x, 400.0));
}

#[test]
fn key_opens_the_gate() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    let events = touch(&mut world, &mut schedule, cell(16, 3));
    assert!(events.contains(&LevelEvent::KeyCollected));
    assert!(progress(&world).has_key);
    assert_eq!(progress(&world).score, 30);
    assert_eq!(world.resource::<Hud>().score, "K   0000030");

    let gate = cell(19, 3);
    let events = touch(&mut world, &mut schedule, Vec2::new(gate.x - 10.0, gate.y));
    let unlocked = events
        .iter()
        .filter(|e| **e == LevelEvent::GateUnlocked)
        .count();
    assert_eq!(unlocked, 1, "gate and key hole open together");
    assert!(!events.contains(&LevelEvent::GateRepelled));
    assert_eq!(active_count(&mut world, ObjectKind::Gate), 0);
    assert_eq!(active_count(&mut world, ObjectKind::KeyHole), 0);

    run(&mut world, &mut schedule, 2);
    let remaining = world
        .query::<&WorldObject>()
        .iter(&world)
        .filter(|o| o.kind.is_gate_piece())
        .count();
    assert_eq!(remaining, 0, "gate pieces are despawned");
}

#[test]
fn gate_repels_first_then_opens_once_key_is_held() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    let gate = cell(19, 3);
    let events = touch(&mut world, &mut schedule, Vec2::new(gate.x - 10.0, gate.y));
    assert!(events.contains(&LevelEvent::GateRepelled));

    touch(&mut world, &mut schedule, cell(16, 3));
    let events = touch(&mut world, &mut schedule, Vec2::new(gate.x - 10.0, gate.y));
    assert!(events.contains(&LevelEvent::GateUnlocked));
    assert_eq!(active_count(&mut world, ObjectKind::Gate), 0);
}

#[test]
fn overlapping_hazards_cost_a_single_life() {
    let (mut world, mut schedule) = make_world(&TWIN_HAZARDS);
    run(&mut world, &mut schedule, 5);

    let between = Vec2::new(6.0 * TILE, cell(5, 2).y);
    let events = touch(&mut world, &mut schedule, between);
    let deaths = events
        .iter()
        .filter(|e| matches!(e, LevelEvent::PlayerDied { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(progress(&world).lives, 2);

    // Still standing in the hazards while dying
    let events = run(&mut world, &mut schedule, 30);
    assert!(!events.iter().any(|e| matches!(e, LevelEvent::PlayerDied { .. })));
    assert_eq!(progress(&world).lives, 2);
    assert_eq!(world.resource::<Scheduler>().count(TimedAction::FinishDeath), 1);
}

#[test]
fn goal_is_ignored_while_dying() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    touch(&mut world, &mut schedule, cell(10, 3));
    assert_eq!(phase(&world), SessionPhase::Dying);
    let events = touch(&mut world, &mut schedule, cell(25, 3));
    assert!(!events.contains(&LevelEvent::Won));
    assert_eq!(phase(&world), SessionPhase::Dying);

    run(&mut world, &mut schedule, PAST_DELAY);
    assert_eq!(phase(&world), SessionPhase::Playing);
}

#[test]
fn reaching_the_goal_wins() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    touch(&mut world, &mut schedule, cell(4, 3));
    let events = touch(&mut world, &mut schedule, cell(25, 3));
    assert!(events.contains(&LevelEvent::Won));
    assert!(events.contains(&LevelEvent::MessageShown(MSG_WIN)));
    assert_eq!(phase(&world), SessionPhase::Won);
    assert!(!player_state(&mut world).controllable);

    // Hazards no longer hurt once the level is won
    touch(&mut world, &mut schedule, cell(10, 3));
    assert_eq!(phase(&world), SessionPhase::Won);
    assert_eq!(progress(&world).lives, 3);
    assert_eq!(progress(&world).score, 10);
}

#[test]
fn checkpoint_timer_does_not_hide_win_message() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    touch(&mut world, &mut schedule, cell(13, 3));
    touch(&mut world, &mut schedule, cell(25, 3));
    let events = run(&mut world, &mut schedule, PAST_DELAY);
    assert!(!events.contains(&LevelEvent::MessageHidden));
    let hud = world.resource::<Hud>();
    assert!(hud.message_visible);
    assert_eq!(hud.message, MSG_WIN);
}

#[test]
fn confirm_restarts_after_game_over() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    touch(&mut world, &mut schedule, cell(4, 3));
    touch(&mut world, &mut schedule, cell(13, 3));
    for _ in 0..3 {
        touch(&mut world, &mut schedule, cell(10, 3));
        run(&mut world, &mut schedule, PAST_DELAY);
    }
    assert_eq!(phase(&world), SessionPhase::GameOver);
    let epoch = world.resource::<Session>().epoch;

    let events = press_confirm(&mut world, &mut schedule);
    assert!(events.contains(&LevelEvent::Restarted));
    assert_eq!(phase(&world), SessionPhase::Playing);
    assert_eq!(world.resource::<Session>().epoch, epoch + 1);
    assert_eq!(progress(&world), Progress::new(3));
    assert!(world.resource::<Scheduler>().is_empty());

    let hud = world.resource::<Hud>();
    assert_eq!(hud.lives, "L3");
    assert_eq!(hud.score, "0000000");
    assert!(!hud.message_visible);

    assert_eq!(active_count(&mut world, ObjectKind::Coin), 1);
    assert_eq!(active_count(&mut world, ObjectKind::Checkpoint), 1);
    let players = world.query::<&Player>().iter(&world).count();
    assert_eq!(players, 1, "old player despawned");
    let state = player_state(&mut world);
    assert!(state.visible && state.controllable);
    assert!(approx_eq(player_pos(&mut world).x, cell(1, 3).x));

    // Effects were rebuilt for the new player
    let handles = *world.resource::<EffectHandles>();
    assert!(world.get::<ParticleEmitter>(handles.death).is_some());
    let emitters = world.query::<&ParticleEmitter>().iter(&world).count();
    assert_eq!(emitters, 3);
}

#[test]
fn confirm_restarts_after_win() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    touch(&mut world, &mut schedule, cell(16, 3));
    touch(&mut world, &mut schedule, cell(25, 3));
    assert_eq!(phase(&world), SessionPhase::Won);

    let events = press_confirm(&mut world, &mut schedule);
    assert!(events.contains(&LevelEvent::Restarted));
    assert_eq!(phase(&world), SessionPhase::Playing);
    assert!(!progress(&world).has_key);
    assert_eq!(active_count(&mut world, ObjectKind::Key), 1);
    assert!(!world.resource::<Hud>().message_visible);
}

#[test]
fn confirm_is_ignored_while_playing() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);
    touch(&mut world, &mut schedule, cell(4, 3));
    teleport(&mut world, cell(1, 3));
    run(&mut world, &mut schedule, 2);

    let events = press_confirm(&mut world, &mut schedule);
    assert!(!events.contains(&LevelEvent::Restarted));
    assert_eq!(progress(&world).score, 10);
    assert_eq!(world.resource::<Session>().epoch, 0);
}

#[test]
fn restart_drops_pending_timers() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);

    // Checkpoint hide still pending when the level is won and restarted
    touch(&mut world, &mut schedule, cell(13, 3));
    touch(&mut world, &mut schedule, cell(25, 3));
    assert!(!world.resource::<Scheduler>().is_empty());
    press_confirm(&mut world, &mut schedule);
    assert!(world.resource::<Scheduler>().is_empty());

    // A new checkpoint message gets its full display time
    run(&mut world, &mut schedule, 10);
    touch(&mut world, &mut schedule, cell(13, 3));
    run(&mut world, &mut schedule, 40);
    assert!(world.resource::<Hud>().message_visible);
    run(&mut world, &mut schedule, 25);
    assert!(!world.resource::<Hud>().message_visible);
}

#[test]
fn death_puff_runs_only_while_dying() {
    let (mut world, mut schedule) = make_world(&FLOW);
    run(&mut world, &mut schedule, 5);
    let death = world.resource::<EffectHandles>().death;

    touch(&mut world, &mut schedule, cell(10, 3));
    assert!(world.get::<ParticleEmitter>(death).expect("emitter").active);

    run(&mut world, &mut schedule, PAST_DELAY);
    assert!(!world.get::<ParticleEmitter>(death).expect("emitter").active);
}
