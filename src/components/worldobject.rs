//! Map objects the player can overlap: collectables, hazards, gates, spawns.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Category of a map object. Each category has exactly one overlap handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Coin,
    Diamond,
    ExtraLife,
    Key,
    Gate,
    KeyHole,
    Hazard,
    GoalZone,
    SpawnPoint,
    Checkpoint,
}

impl ObjectKind {
    /// Map an object name from the level's object layers to its kind.
    pub fn from_object_name(name: &str) -> Option<Self> {
        match name {
            "coin" => Some(ObjectKind::Coin),
            "diamond" => Some(ObjectKind::Diamond),
            "extra" => Some(ObjectKind::ExtraLife),
            "key" => Some(ObjectKind::Key),
            "gate" => Some(ObjectKind::Gate),
            "keyHole" => Some(ObjectKind::KeyHole),
            "killZone" => Some(ObjectKind::Hazard),
            "winZone" => Some(ObjectKind::GoalZone),
            "startSpawn" => Some(ObjectKind::SpawnPoint),
            "checkpoint" => Some(ObjectKind::Checkpoint),
            _ => None,
        }
    }

    pub fn object_name(self) -> &'static str {
        match self {
            ObjectKind::Coin => "coin",
            ObjectKind::Diamond => "diamond",
            ObjectKind::ExtraLife => "extra",
            ObjectKind::Key => "key",
            ObjectKind::Gate => "gate",
            ObjectKind::KeyHole => "keyHole",
            ObjectKind::Hazard => "killZone",
            ObjectKind::GoalZone => "winZone",
            ObjectKind::SpawnPoint => "startSpawn",
            ObjectKind::Checkpoint => "checkpoint",
        }
    }

    /// Tile sheet frame drawn for this object.
    pub fn default_frame(self) -> u32 {
        match self {
            ObjectKind::Coin => 151,
            ObjectKind::Diamond => 67,
            ObjectKind::ExtraLife => 44,
            ObjectKind::Key => 27,
            ObjectKind::Gate => 9,
            ObjectKind::KeyHole => 28,
            ObjectKind::Hazard => 145,
            ObjectKind::GoalZone => 127,
            ObjectKind::SpawnPoint | ObjectKind::Checkpoint => 158,
        }
    }

    /// Pieces of the locked gate. Unlocking removes all of them.
    pub fn is_gate_piece(self) -> bool {
        matches!(self, ObjectKind::Gate | ObjectKind::KeyHole)
    }
}

/// A placed map object. Inactive objects are out of the collidable set.
#[derive(Component, Debug, Clone)]
pub struct WorldObject {
    pub kind: ObjectKind,
    pub frame: u32,
    pub active: bool,
}

impl WorldObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            frame: kind.default_frame(),
            // spawn markers only anchor the player
            active: kind != ObjectKind::SpawnPoint,
        }
    }

    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_map_both_ways() {
        for kind in [
            ObjectKind::Coin,
            ObjectKind::Diamond,
            ObjectKind::ExtraLife,
            ObjectKind::Key,
            ObjectKind::Gate,
            ObjectKind::KeyHole,
            ObjectKind::Hazard,
            ObjectKind::GoalZone,
            ObjectKind::SpawnPoint,
            ObjectKind::Checkpoint,
        ] {
            assert_eq!(ObjectKind::from_object_name(kind.object_name()), Some(kind));
        }
        assert_eq!(ObjectKind::from_object_name("signpost"), None);
    }

    #[test]
    fn spawn_points_start_inactive() {
        assert!(!WorldObject::new(ObjectKind::SpawnPoint).active);
        assert!(WorldObject::new(ObjectKind::Checkpoint).active);
        assert_eq!(WorldObject::new(ObjectKind::Coin).frame, 151);
    }
}
