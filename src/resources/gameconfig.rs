//! Level configuration resource.
//!
//! Holds the tuning constants of the level and the window settings, loaded
//! from an INI file. Defaults reproduce the stock level so a missing file or
//! missing keys are never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 1500
//! acceleration = 400
//! drag = 2000
//! jump_velocity = -520
//! max_velocity = 700
//! world_bound_threshold = 100
//! particle_velocity = 50
//!
//! [rules]
//! starting_lives = 3
//! death_delay_ms = 1000
//! message_ms = 1000
//!
//! [player]
//! width = 24
//! height = 24
//!
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//! zoom = 2.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_GRAVITY: f32 = 1500.0;
const DEFAULT_ACCELERATION: f32 = 400.0;
const DEFAULT_DRAG: f32 = 2000.0;
const DEFAULT_JUMP_VELOCITY: f32 = -520.0;
const DEFAULT_MAX_VELOCITY: f32 = 700.0;
const DEFAULT_WORLD_BOUND_THRESHOLD: f32 = 100.0;
const DEFAULT_PARTICLE_VELOCITY: f32 = 50.0;
const DEFAULT_STARTING_LIVES: i32 = 3;
const DEFAULT_DEATH_DELAY_MS: u32 = 1000;
const DEFAULT_MESSAGE_MS: u32 = 1000;
const DEFAULT_PLAYER_SIZE: f32 = 24.0;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_ZOOM: f32 = 2.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Points awarded per pickup.
pub const SCORE_COIN: u32 = 10;
pub const SCORE_DIAMOND: u32 = 100;
pub const SCORE_EXTRA_LIFE: u32 = 20;
pub const SCORE_KEY: u32 = 30;

/// Level configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Downward acceleration in units/s².
    pub gravity: f32,
    /// Horizontal acceleration while steering. Also the gate repel speed.
    pub acceleration: f32,
    /// Horizontal drag while not steering.
    pub drag: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_velocity: f32,
    /// Per-axis velocity limit.
    pub max_velocity: f32,
    /// World-bound collision is on while the player's x is at or below this.
    pub world_bound_threshold: f32,
    /// Horizontal speed of walking smoke particles.
    pub particle_velocity: f32,
    pub starting_lives: i32,
    /// Delay between a death and its outcome.
    pub death_delay_ms: u32,
    /// How long the checkpoint message stays visible.
    pub message_ms: u32,
    pub player_width: f32,
    pub player_height: f32,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    /// Camera zoom applied by the window front-end.
    pub zoom: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a configuration with the stock level values.
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            acceleration: DEFAULT_ACCELERATION,
            drag: DEFAULT_DRAG,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
            world_bound_threshold: DEFAULT_WORLD_BOUND_THRESHOLD,
            particle_velocity: DEFAULT_PARTICLE_VELOCITY,
            starting_lives: DEFAULT_STARTING_LIVES,
            death_delay_ms: DEFAULT_DEATH_DELAY_MS,
            message_ms: DEFAULT_MESSAGE_MS,
            player_width: DEFAULT_PLAYER_SIZE,
            player_height: DEFAULT_PLAYER_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            zoom: DEFAULT_ZOOM,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Death delay in seconds.
    pub fn death_delay(&self) -> f32 {
        self.death_delay_ms as f32 / 1000.0
    }

    /// Checkpoint message time in seconds.
    pub fn message_time(&self) -> f32 {
        self.message_ms as f32 / 1000.0
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: gravity={}, acceleration={}, drag={}, jump={}, lives={}, {}x{} window",
            self.gravity,
            self.acceleration,
            self.drag,
            self.jump_velocity,
            self.starting_lives,
            self.window_width,
            self.window_height
        );

        Ok(())
    }

    /// Parse configuration from INI text. Used by tests and embedded configs.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        // [physics] section
        if let Some(v) = float("physics", "gravity") {
            self.gravity = v as f32;
        }
        if let Some(v) = float("physics", "acceleration") {
            self.acceleration = v as f32;
        }
        if let Some(v) = float("physics", "drag") {
            self.drag = v as f32;
        }
        if let Some(v) = float("physics", "jump_velocity") {
            self.jump_velocity = v as f32;
        }
        if let Some(v) = float("physics", "max_velocity") {
            self.max_velocity = v as f32;
        }
        if let Some(v) = float("physics", "world_bound_threshold") {
            self.world_bound_threshold = v as f32;
        }
        if let Some(v) = float("physics", "particle_velocity") {
            self.particle_velocity = v as f32;
        }

        // [rules] section
        if let Some(v) = config.getint("rules", "starting_lives").ok().flatten() {
            self.starting_lives = v as i32;
        }
        if let Some(v) = uint("rules", "death_delay_ms") {
            self.death_delay_ms = v as u32;
        }
        if let Some(v) = uint("rules", "message_ms") {
            self.message_ms = v as u32;
        }

        // [player] section
        if let Some(v) = float("player", "width") {
            self.player_width = v as f32;
        }
        if let Some(v) = float("player", "height") {
            self.player_height = v as f32;
        }

        // [window] section
        if let Some(v) = uint("window", "width") {
            self.window_width = v as u32;
        }
        if let Some(v) = uint("window", "height") {
            self.window_height = v as u32;
        }
        if let Some(v) = uint("window", "target_fps") {
            self.target_fps = v as u32;
        }
        if let Some(v) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = v;
        }
        if let Some(v) = float("window", "zoom") {
            self.zoom = v as f32;
        }
    }

    /// Save configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "acceleration", Some(self.acceleration.to_string()));
        config.set("physics", "drag", Some(self.drag.to_string()));
        config.set("physics", "jump_velocity", Some(self.jump_velocity.to_string()));
        config.set("physics", "max_velocity", Some(self.max_velocity.to_string()));
        config.set(
            "physics",
            "world_bound_threshold",
            Some(self.world_bound_threshold.to_string()),
        );
        config.set(
            "physics",
            "particle_velocity",
            Some(self.particle_velocity.to_string()),
        );

        config.set("rules", "starting_lives", Some(self.starting_lives.to_string()));
        config.set("rules", "death_delay_ms", Some(self.death_delay_ms.to_string()));
        config.set("rules", "message_ms", Some(self.message_ms.to_string()));

        config.set("player", "width", Some(self.player_width.to_string()));
        config.set("player", "height", Some(self.player_height.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "zoom", Some(self.zoom.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
