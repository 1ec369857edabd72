//! Pre-parsed level description.
//!
//! [`LevelData`] is the contract between the level and whatever produced the
//! map: tile layers as flat id arrays plus the ids that collide, and named
//! objects grouped in object layers. It is read from JSON with `serde_json`,
//! or built from ASCII rows for the built-in level and for tests.
//!
//! [`TileGrid`] is the collision view of the collidable layers, built once
//! per level.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::boxcollider::Aabb;
use crate::components::worldobject::ObjectKind;

/// Tile layers whose `collides` ids block the player.
pub const COLLIDABLE_LAYERS: [&str; 2] = ["Midground", "Foreground"];

pub const LAYER_KEY_AND_GATE: &str = "KeyAndGate";
pub const LAYER_COLLECTABLES: &str = "Collectables";
pub const LAYER_KILL_ZONES: &str = "KillZones";
pub const LAYER_PLAYER_SPAWNS: &str = "PlayerSpawns";

/// Tile id used for solid ground in ASCII levels.
pub const GROUND_TILE: u32 = 1;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level has no startSpawn object")]
    MissingStartSpawn,
    #[error("layer {layer} has {found} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        found: usize,
    },
    #[error("level is empty")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// Row-major tile ids, 0 is empty.
    pub data: Vec<u32>,
    /// Tile ids in this layer that collide.
    #[serde(default)]
    pub collides: Vec<u32>,
}

/// A named object, positioned by its centre in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub name: String,
    #[serde(default)]
    pub frame: Option<u32>,
    pub x: f32,
    pub y: f32,
}

impl MapObject {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<MapObject>,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub tile_size: u32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub layers: Vec<TileLayer>,
    pub object_layers: Vec<ObjectLayer>,
}

/// Object layer an object of `kind` belongs to.
pub fn layer_for(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Key | ObjectKind::Gate | ObjectKind::KeyHole => LAYER_KEY_AND_GATE,
        ObjectKind::Coin | ObjectKind::Diamond | ObjectKind::ExtraLife => LAYER_COLLECTABLES,
        ObjectKind::Hazard | ObjectKind::GoalZone => LAYER_KILL_ZONES,
        ObjectKind::SpawnPoint | ObjectKind::Checkpoint => LAYER_PLAYER_SPAWNS,
    }
}

fn glyph_kind(glyph: char) -> Option<ObjectKind> {
    match glyph {
        'c' => Some(ObjectKind::Coin),
        'd' => Some(ObjectKind::Diamond),
        'h' => Some(ObjectKind::ExtraLife),
        'k' => Some(ObjectKind::Key),
        'g' => Some(ObjectKind::Gate),
        'o' => Some(ObjectKind::KeyHole),
        'x' => Some(ObjectKind::Hazard),
        'w' => Some(ObjectKind::GoalZone),
        'S' => Some(ObjectKind::SpawnPoint),
        'C' => Some(ObjectKind::Checkpoint),
        _ => None,
    }
}

const BUILTIN_ROWS: [&str; 12] = [
    "............................................................",
    "............................................................",
    "............................................................",
    "..................................d.........................",
    ".................................###........................",
    "............................................................",
    "..........c.c.c.........h.................k.................",
    ".........#######.......###...............###................",
    "....................................................o.......",
    "..S.....................C...........................g.....w.",
    "##############....##########....############################",
    "##############xxxx##########xxxx############################",
];

impl LevelData {
    /// Build a level from ASCII rows.
    ///
    /// Legend: `.` empty, `#` ground, `c` coin, `d` diamond, `h` extra life,
    /// `k` key, `g` gate, `o` key hole, `x` kill zone, `w` win zone,
    /// `S` start spawn, `C` checkpoint. Objects sit at the centre of their
    /// cell.
    pub fn from_ascii(rows: &[&str], tile_size: u32) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let ts = tile_size as f32;
        let mut ground = vec![0; width * height];
        let mut object_layers: Vec<ObjectLayer> = [
            LAYER_KEY_AND_GATE,
            LAYER_COLLECTABLES,
            LAYER_KILL_ZONES,
            LAYER_PLAYER_SPAWNS,
        ]
        .into_iter()
        .map(|name| ObjectLayer {
            name: name.to_string(),
            objects: Vec::new(),
        })
        .collect();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                match glyph {
                    '.' | ' ' => {}
                    '#' => ground[row * width + col] = GROUND_TILE,
                    other => {
                        let kind = glyph_kind(other).ok_or(LevelError::UnknownGlyph {
                            glyph: other,
                            row,
                            col,
                        })?;
                        let layer = layer_for(kind);
                        if let Some(target) = object_layers.iter_mut().find(|l| l.name == layer) {
                            target.objects.push(MapObject {
                                name: kind.object_name().to_string(),
                                frame: Some(kind.default_frame()),
                                x: col as f32 * ts + ts / 2.0,
                                y: row as f32 * ts + ts / 2.0,
                            });
                        }
                    }
                }
            }
        }

        let level = Self {
            tile_size,
            width: width as u32,
            height: height as u32,
            layers: vec![TileLayer {
                name: "Midground".to_string(),
                data: ground,
                collides: vec![GROUND_TILE],
            }],
            object_layers,
        };
        level.validate()?;
        Ok(level)
    }

    /// The level shipped with the game.
    pub fn builtin() -> Self {
        match Self::from_ascii(&BUILTIN_ROWS, 18) {
            Ok(level) => level,
            Err(e) => unreachable!("built-in level is invalid: {e}"),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(text)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check layer sizes and the presence of a start spawn.
    pub fn validate(&self) -> Result<(), LevelError> {
        let expected = (self.width * self.height) as usize;
        for layer in &self.layers {
            if layer.data.len() != expected {
                return Err(LevelError::LayerSize {
                    layer: layer.name.clone(),
                    expected,
                    found: layer.data.len(),
                });
            }
        }
        self.start_spawn()?;
        Ok(())
    }

    pub fn pixel_width(&self) -> f32 {
        (self.width * self.tile_size) as f32
    }

    pub fn pixel_height(&self) -> f32 {
        (self.height * self.tile_size) as f32
    }

    fn find_object(&self, layer: &str, name: &str) -> Option<&MapObject> {
        self.object_layers
            .iter()
            .filter(|l| l.name == layer)
            .flat_map(|l| l.objects.iter())
            .find(|o| o.name == name)
    }

    pub fn start_spawn(&self) -> Result<Vec2, LevelError> {
        self.find_object(LAYER_PLAYER_SPAWNS, ObjectKind::SpawnPoint.object_name())
            .map(MapObject::position)
            .ok_or(LevelError::MissingStartSpawn)
    }

    pub fn checkpoint(&self) -> Option<Vec2> {
        self.find_object(LAYER_PLAYER_SPAWNS, ObjectKind::Checkpoint.object_name())
            .map(MapObject::position)
    }

    /// Every placed object with a known name, in layer order.
    ///
    /// Objects whose name is unknown, or which sit in a layer other than the
    /// one their kind belongs to, are skipped with a warning.
    pub fn objects(&self) -> Vec<(ObjectKind, &MapObject)> {
        let mut out = Vec::new();
        for layer in &self.object_layers {
            for object in &layer.objects {
                match ObjectKind::from_object_name(&object.name) {
                    Some(kind) if layer_for(kind) == layer.name => out.push((kind, object)),
                    Some(kind) => warn!(
                        "object {} belongs in layer {}, found in {}; skipped",
                        object.name,
                        layer_for(kind),
                        layer.name
                    ),
                    None => warn!("unknown object {} in layer {}; skipped", object.name, layer.name),
                }
            }
        }
        out
    }
}

/// Solid cells of the collidable layers.
#[derive(Resource, Debug, Clone)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub tile_size: f32,
    solid: Vec<bool>,
}

impl TileGrid {
    pub fn from_level(level: &LevelData) -> Self {
        let mut solid = vec![false; (level.width * level.height) as usize];
        for layer in level
            .layers
            .iter()
            .filter(|l| COLLIDABLE_LAYERS.contains(&l.name.as_str()))
        {
            for (cell, id) in layer.data.iter().enumerate() {
                if *id != 0 && layer.collides.contains(id) {
                    if let Some(s) = solid.get_mut(cell) {
                        *s = true;
                    }
                }
            }
        }
        Self {
            width: level.width,
            height: level.height,
            tile_size: level.tile_size as f32,
            solid,
        }
    }

    /// Whether the cell is solid. Cells outside the map are open.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return false;
        }
        self.solid[(row as u32 * self.width + col as u32) as usize]
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Bounds of every solid cell that strictly overlaps `aabb`.
    pub fn solids_overlapping(&self, aabb: &Aabb) -> Vec<Aabb> {
        let ts = self.tile_size;
        let first_col = (aabb.min.x / ts).floor() as i32;
        let last_col = (aabb.max.x / ts).ceil() as i32 - 1;
        let first_row = (aabb.min.y / ts).floor() as i32;
        let last_row = (aabb.max.y / ts).ceil() as i32 - 1;
        let mut out = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                if self.is_solid(col, row) {
                    let min = Vec2::new(col as f32 * ts, row as f32 * ts);
                    out.push(Aabb {
                        min,
                        max: min + Vec2::new(ts, ts),
                    });
                }
            }
        }
        out
    }
}
