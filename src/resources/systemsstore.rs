//! One-shot systems registered with the world.
//!
//! Observers cannot call the level builder directly, so it is registered once
//! at setup and looked up here by [`StoredSystem`] when a restart needs it.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredSystem {
    /// Builds the level entities and per-level resources from `LevelData`.
    SpawnLevel,
}

#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<StoredSystem, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: StoredSystem, id: SystemId) {
        self.map.insert(key, id);
    }

    pub fn get(&self, key: StoredSystem) -> Option<SystemId> {
        self.map.get(&key).copied()
    }
}
