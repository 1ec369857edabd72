//! Raylib front-end.
//!
//! Samples the keyboard into [`RawInput`], steps the level at a fixed rate,
//! plays the queued [`AudioCmd`]s and draws the world with primitives: solid
//! tiles, objects, the player, particles and the HUD text. The camera follows
//! the player and shakes briefly when the player dies.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::{Schedule, With, World};
use glam::Vec2;
use log::{info, warn};
use raylib::core::audio::{RaylibAudio, Sound};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::particleemitter::Particle;
use crate::components::player::{Facing, Player};
use crate::components::worldobject::{ObjectKind, WorldObject};
use crate::events::audio::{AudioCmd, SoundId};
use crate::events::level::LevelEvent;
use crate::game;
use crate::resources::gameconfig::GameConfig;
use crate::resources::hud::Hud;
use crate::resources::input::RawInput;
use crate::resources::leveldata::TileGrid;

/// Directory holding `<sound key>.wav` files.
const AUDIO_DIR: &str = "assets/audio";
const SHAKE_TIME: f32 = 0.2;
const SHAKE_INTENSITY: f32 = 0.01;
/// Longest frame time fed to the fixed-step accumulator.
const MAX_FRAME: f32 = 0.25;
const HUD_FONT: i32 = 20;

const SKY: Color = Color::new(208, 244, 247, 255);
const GROUND: Color = Color::new(94, 64, 48, 255);

/// Open the window and play the level until it is closed.
pub fn run(world: &mut World, schedule: &mut Schedule, step: f32) {
    let (width, height, fps, vsync, zoom) = {
        let config = world.resource::<GameConfig>();
        (
            config.window_width as i32,
            config.window_height as i32,
            config.target_fps,
            config.vsync,
            config.zoom,
        )
    };

    let mut builder = raylib::init();
    builder.size(width, height).title("Placid Plains");
    if vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(fps);

    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("Audio disabled: {e}");
            None
        }
    };
    let sounds = audio.as_ref().map(load_sounds).unwrap_or_default();

    let mut accumulator = 0.0;
    let mut shake = 0.0f32;
    let mut camera = Camera2D {
        offset: Vector2::new(width as f32 / 2.0, height as f32 / 2.0),
        target: Vector2::zero(),
        rotation: 0.0,
        zoom,
    };

    info!("Window open: {width}x{height} at {fps} fps");
    while !rl.window_should_close() {
        world.resource_mut::<RawInput>().record_frame(
            rl.is_key_down(KeyboardKey::KEY_A) || rl.is_key_down(KeyboardKey::KEY_LEFT),
            rl.is_key_down(KeyboardKey::KEY_D) || rl.is_key_down(KeyboardKey::KEY_RIGHT),
            rl.is_key_down(KeyboardKey::KEY_SPACE),
            rl.is_key_pressed(KeyboardKey::KEY_SPACE),
        );

        accumulator += rl.get_frame_time().min(MAX_FRAME);
        while accumulator >= step {
            game::tick(world, schedule, step);
            accumulator -= step;

            for cmd in world.resource_mut::<Messages<AudioCmd>>().drain() {
                let AudioCmd::PlayFx { id, volume } = cmd;
                if let Some(sound) = sounds.get(&id) {
                    sound.set_volume(volume);
                    sound.play();
                }
            }
            for event in world.resource_mut::<Messages<LevelEvent>>().drain() {
                if let LevelEvent::PlayerDied { .. } = event {
                    shake = SHAKE_TIME;
                }
            }
        }
        shake = (shake - rl.get_frame_time()).max(0.0);

        follow_player(world, &mut camera, width as f32, height as f32);
        let mut view = camera;
        if shake > 0.0 {
            view.offset.x += (fastrand::f32() * 2.0 - 1.0) * SHAKE_INTENSITY * width as f32;
            view.offset.y += (fastrand::f32() * 2.0 - 1.0) * SHAKE_INTENSITY * height as f32;
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(SKY);
        {
            let mut d2 = d.begin_mode2D(view);
            draw_tiles(world, &mut d2);
            draw_objects(world, &mut d2);
            draw_particles(world, &mut d2);
            draw_player(world, &mut d2);
        }
        draw_hud(world, &mut d, width, height);
    }
    info!("Window closed");
}

/// World vectors are `glam`; raylib draws with its own `Vector2`.
fn rl_vec(v: Vec2) -> Vector2 {
    Vector2::new(v.x, v.y)
}

fn load_sounds(audio: &RaylibAudio) -> FxHashMap<SoundId, Sound<'_>> {
    let mut sounds = FxHashMap::default();
    for id in SoundId::ALL {
        let path = format!("{AUDIO_DIR}/{}.wav", id.key());
        match audio.new_sound(&path) {
            Ok(sound) => {
                sounds.insert(id, sound);
            }
            Err(e) => warn!("Sound '{}' not loaded from {path}: {e}", id.key()),
        }
    }
    sounds
}

/// Centre the camera on the player, kept inside the level rectangle.
fn follow_player(world: &mut World, camera: &mut Camera2D, width: f32, height: f32) {
    let mut players = world.query_filtered::<&MapPosition, With<Player>>();
    let Ok(position) = players.single(world) else {
        return;
    };
    let pos = position.pos;
    let Some(grid) = world.get_resource::<TileGrid>() else {
        camera.target = rl_vec(pos);
        return;
    };
    let half_w = width / (2.0 * camera.zoom);
    let half_h = height / (2.0 * camera.zoom);
    let clamp = |v: f32, half: f32, size: f32| {
        if size <= half * 2.0 {
            size / 2.0
        } else {
            v.clamp(half, size - half)
        }
    };
    camera.target = Vector2::new(
        clamp(pos.x, half_w, grid.pixel_width()),
        clamp(pos.y, half_h, grid.pixel_height()),
    );
}

fn draw_tiles(world: &World, d: &mut impl RaylibDraw) {
    let Some(grid) = world.get_resource::<TileGrid>() else {
        return;
    };
    let ts = grid.tile_size as i32;
    for row in 0..grid.height as i32 {
        for col in 0..grid.width as i32 {
            if grid.is_solid(col, row) {
                d.draw_rectangle(col * ts, row * ts, ts, ts, GROUND);
            }
        }
    }
}

fn object_color(kind: ObjectKind) -> Option<Color> {
    match kind {
        ObjectKind::Coin => Some(Color::GOLD),
        ObjectKind::Diamond => Some(Color::SKYBLUE),
        ObjectKind::ExtraLife => Some(Color::RED),
        ObjectKind::Key => Some(Color::ORANGE),
        ObjectKind::Gate => Some(Color::DARKGRAY),
        ObjectKind::KeyHole => Some(Color::GRAY),
        ObjectKind::Hazard => Some(Color::new(200, 40, 40, 120)),
        ObjectKind::GoalZone => Some(Color::new(40, 200, 40, 120)),
        ObjectKind::Checkpoint => Some(Color::PURPLE),
        ObjectKind::SpawnPoint => None,
    }
}

fn draw_objects(world: &mut World, d: &mut impl RaylibDraw) {
    let mut objects = world.query::<(&MapPosition, &BoxCollider, &WorldObject)>();
    for (position, collider, object) in objects.iter(world) {
        // Checkpoints stay visible after they are reached.
        if !object.active && object.kind != ObjectKind::Checkpoint {
            continue;
        }
        let Some(color) = object_color(object.kind) else {
            continue;
        };
        let aabb = collider.aabb(position.pos);
        d.draw_rectangle_v(rl_vec(aabb.min), rl_vec(aabb.max - aabb.min), color);
    }
}

fn draw_particles(world: &mut World, d: &mut impl RaylibDraw) {
    let mut particles = world.query::<(&MapPosition, &Particle)>();
    for (position, particle) in particles.iter(world) {
        let scale = particle.current_scale();
        let alpha = (particle.current_alpha().clamp(0.0, 1.0) * 255.0) as u8;
        // Smoke sprites are 512px wide.
        let radius = (scale.x.max(scale.y) * 256.0).max(1.0);
        d.draw_circle_v(rl_vec(position.pos), radius, Color::new(240, 240, 240, alpha));
    }
}

fn draw_player(world: &mut World, d: &mut impl RaylibDraw) {
    let mut players = world.query::<(&MapPosition, &BoxCollider, &Player)>();
    let Ok((position, collider, player)) = players.single(world) else {
        return;
    };
    if !player.visible {
        return;
    }
    let aabb = collider.aabb(position.pos);
    let (x, y) = (aabb.min.x, aabb.min.y);
    let size = aabb.max - aabb.min;
    let (w, h) = (size.x, size.y);
    d.draw_rectangle_v(rl_vec(aabb.min), rl_vec(size), Color::DARKBLUE);
    let eye_x = match player.facing {
        Facing::Left => x + w * 0.25,
        Facing::Right => x + w * 0.75,
    };
    d.draw_circle_v(Vector2::new(eye_x, y + h * 0.3), 2.0, Color::WHITE);
}

fn draw_hud(world: &World, d: &mut RaylibDrawHandle, width: i32, height: i32) {
    let hud = world.resource::<Hud>();
    d.draw_text(&hud.lives, 10, 10, HUD_FONT, Color::BLACK);
    let score_width = measure_text(&hud.score, HUD_FONT);
    d.draw_text(&hud.score, width - score_width - 10, 10, HUD_FONT, Color::BLACK);
    if hud.message_visible {
        let lines = hud.message.lines().count().max(1) as i32;
        let mut y = height / 2 - lines * HUD_FONT / 2;
        for line in hud.message.lines() {
            let w = measure_text(line, HUD_FONT);
            d.draw_text(line, (width - w) / 2, y, HUD_FONT, Color::BLACK);
            y += HUD_FONT;
        }
    }
}
