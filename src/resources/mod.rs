//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, configuration,
//! the level description and the run's progress. Each submodule documents
//! the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `effecthandles` – emitter entities for the walking, jump and death effects
//! - `gameconfig` – tuning constants and window settings loaded from INI
//! - `hud` – lives/score/message text snapshot
//! - `input` – raw held keys and per-tick key edges
//! - `leveldata` – serde level description and the solid tile grid
//! - `overlaps` – player overlaps found this tick
//! - `progress` – lives, score, key and checkpoint flags
//! - `scheduler` – timed transitions guarded by tick and epoch
//! - `session` – state machine phase and restart epoch
//! - `spawnpoints` – start and checkpoint respawn anchors
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `worldtime` – simulation time, delta and tick counter
pub mod effecthandles;
pub mod gameconfig;
pub mod hud;
pub mod input;
pub mod leveldata;
pub mod overlaps;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod spawnpoints;
pub mod systemsstore;
pub mod worldtime;
