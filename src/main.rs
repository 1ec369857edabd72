//! Placid Plains entry point.
//!
//! Loads `config.ini` and a level (a JSON file or the built-in map), builds
//! the ECS world and either opens the raylib window (`window` feature) or
//! runs a fixed number of headless ticks.
//!
//! ```sh
//! cargo run --release --features window
//! cargo run -- --headless-ticks 600
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};

use placidplains::game;
use placidplains::resources::gameconfig::GameConfig;
use placidplains::resources::hud::Hud;
use placidplains::resources::leveldata::{LevelData, LevelError};
use placidplains::resources::progress::Progress;
use placidplains::resources::session::Session;

/// Fixed simulation step in seconds.
const STEP: f32 = 1.0 / 60.0;

/// Placid Plains, a small platformer level.
#[derive(Parser)]
#[command(version, about = "A single-level 2D platformer")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level JSON to play instead of the built-in map.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Write the selected level as JSON and exit.
    #[arg(long, value_name = "PATH")]
    dump_level: Option<PathBuf>,

    /// Run this many fixed ticks without a window, log the outcome and exit.
    #[arg(long, value_name = "N")]
    headless_ticks: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {e}");
    }

    let level = match &cli.level {
        Some(path) => match LevelData::load(path) {
            Ok(level) => level,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => LevelData::builtin(),
    };

    // Early-exit: export the level and quit (no window needed)
    if let Some(path) = cli.dump_level {
        let written = level.to_json().and_then(|json| {
            std::fs::write(&path, json).map_err(|source| LevelError::Io {
                path: path.display().to_string(),
                source,
            })
        });
        match written {
            Ok(()) => println!("Level written to {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    info!("Placid Plains starting");
    let mut world = game::setup_world(config, level);
    let mut schedule = game::build_schedule();

    if let Some(ticks) = cli.headless_ticks {
        for _ in 0..ticks {
            game::tick(&mut world, &mut schedule, STEP);
        }
        let progress = world.resource::<Progress>();
        let session = world.resource::<Session>();
        let hud = world.resource::<Hud>();
        info!(
            "After {} ticks: {:?}, lives {}, score {}, hud '{}' '{}'",
            ticks, session.phase, progress.lives, progress.score, hud.lives, hud.score
        );
        return;
    }

    run_window(&mut world, &mut schedule);
}

#[cfg(feature = "window")]
fn run_window(world: &mut bevy_ecs::world::World, schedule: &mut bevy_ecs::schedule::Schedule) {
    placidplains::frontend::run(world, schedule, STEP);
}

#[cfg(not(feature = "window"))]
fn run_window(_world: &mut bevy_ecs::world::World, _schedule: &mut bevy_ecs::schedule::Schedule) {
    error!("Built without the `window` feature; use --headless-ticks or rebuild with --features window");
}
