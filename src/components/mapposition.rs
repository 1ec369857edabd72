//! World-space position of an entity.
//!
//! For bodies and level objects the position is the centre of the
//! [`BoxCollider`](super::boxcollider::BoxCollider), the same pivot the map
//! objects are authored with.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        Self { pos }
    }
}
