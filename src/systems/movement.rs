//! Arcade physics step.
//!
//! Integrates every [`RigidBody`] and resolves it against the solid cells of
//! the [`TileGrid`]. Each body moves along Y first, then X; a body pushed
//! out of a tile on one side is `blocked` on that side and loses its
//! velocity along that axis. Bodies with `collide_world_bounds` are also
//! clamped inside the level rectangle.
//!
//! After moving, a side that rests flush against a solid tile (or a world
//! bound the body collides with) stays `blocked` even when the body no
//! longer pushes into it.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::gameconfig::GameConfig;
use crate::resources::leveldata::TileGrid;
use crate::resources::worldtime::WorldTime;

/// Shrink applied to the cross axis when probing for tiles, so a body
/// resting flush against a wall does not see it while moving vertically.
const SKIN: f32 = 0.01;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

pub fn movement(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BoxCollider)>,
    grid: Option<Res<TileGrid>>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let grid = grid.as_deref();

    for (mut position, mut body, collider) in query.iter_mut() {
        body.integrate_horizontal(dt);
        body.integrate_vertical(config.gravity, dt);
        body.blocked.clear();

        position.pos.y += body.velocity.y * dt;
        if let Some(grid) = grid {
            resolve_axis(grid, Axis::Y, &mut position.pos, &mut body, collider);
        }
        position.pos.x += body.velocity.x * dt;
        if let Some(grid) = grid {
            resolve_axis(grid, Axis::X, &mut position.pos, &mut body, collider);
            if body.collide_world_bounds {
                clamp_to_bounds(
                    Vec2::new(grid.pixel_width(), grid.pixel_height()),
                    &mut position.pos,
                    &mut body,
                    collider,
                );
            }
            report_contacts(grid, position.pos, &mut body, collider);
        }
    }
}

/// Push the body out of any solid tile it overlaps along `axis`.
fn resolve_axis(
    grid: &TileGrid,
    axis: Axis,
    pos: &mut Vec2,
    body: &mut RigidBody,
    collider: &BoxCollider,
) {
    let mut probe = collider.aabb(*pos);
    match axis {
        Axis::Y => {
            probe.min.x += SKIN;
            probe.max.x -= SKIN;
        }
        Axis::X => {
            probe.min.y += SKIN;
            probe.max.y -= SKIN;
        }
    }
    let solids = grid.solids_overlapping(&probe);
    if solids.is_empty() {
        return;
    }
    let aabb = collider.aabb(*pos);
    let (near, far) = span(&solids, axis);

    match axis {
        Axis::Y => {
            let push_up = aabb.max.y - near;
            let push_down = far - aabb.min.y;
            let up = if body.velocity.y > 0.0 {
                true
            } else if body.velocity.y < 0.0 {
                false
            } else {
                push_up <= push_down
            };
            if up {
                pos.y -= push_up;
                body.blocked.down = true;
            } else {
                pos.y += push_down;
                body.blocked.up = true;
            }
            body.velocity.y = 0.0;
        }
        Axis::X => {
            let push_left = aabb.max.x - near;
            let push_right = far - aabb.min.x;
            let left = if body.velocity.x > 0.0 {
                true
            } else if body.velocity.x < 0.0 {
                false
            } else {
                push_left <= push_right
            };
            if left {
                pos.x -= push_left;
                body.blocked.right = true;
            } else {
                pos.x += push_right;
                body.blocked.left = true;
            }
            body.velocity.x = 0.0;
        }
    }
}

/// Smallest min and largest max of `solids` along `axis`.
fn span(solids: &[Aabb], axis: Axis) -> (f32, f32) {
    solids.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(near, far), s| {
        let (min, max) = match axis {
            Axis::X => (s.min.x, s.max.x),
            Axis::Y => (s.min.y, s.max.y),
        };
        (near.min(min), far.max(max))
    })
}

/// Flag every side whose SKIN-thick outer strip touches a solid tile.
fn report_contacts(grid: &TileGrid, pos: Vec2, body: &mut RigidBody, collider: &BoxCollider) {
    let Aabb { min, max } = collider.aabb(pos);
    let touches = |lo: Vec2, hi: Vec2| !grid.solids_overlapping(&Aabb { min: lo, max: hi }).is_empty();
    let bounds = body.collide_world_bounds;
    let blocked = &mut body.blocked;

    blocked.down |= touches(
        Vec2::new(min.x + SKIN, max.y),
        Vec2::new(max.x - SKIN, max.y + SKIN),
    );
    blocked.up |= touches(
        Vec2::new(min.x + SKIN, min.y - SKIN),
        Vec2::new(max.x - SKIN, min.y),
    );
    blocked.left |= touches(
        Vec2::new(min.x - SKIN, min.y + SKIN),
        Vec2::new(min.x, max.y - SKIN),
    );
    blocked.right |= touches(
        Vec2::new(max.x, min.y + SKIN),
        Vec2::new(max.x + SKIN, max.y - SKIN),
    );

    if bounds {
        blocked.left |= min.x <= SKIN;
        blocked.right |= max.x >= grid.pixel_width() - SKIN;
        blocked.up |= min.y <= SKIN;
        blocked.down |= max.y >= grid.pixel_height() - SKIN;
    }
}

fn clamp_to_bounds(size: Vec2, pos: &mut Vec2, body: &mut RigidBody, collider: &BoxCollider) {
    let aabb = collider.aabb(*pos);
    if aabb.min.x < 0.0 {
        pos.x -= aabb.min.x;
        body.blocked.left = true;
        body.velocity.x = body.velocity.x.max(0.0);
    } else if aabb.max.x > size.x {
        pos.x -= aabb.max.x - size.x;
        body.blocked.right = true;
        body.velocity.x = body.velocity.x.min(0.0);
    }
    if aabb.min.y < 0.0 {
        pos.y -= aabb.min.y;
        body.blocked.up = true;
        body.velocity.y = body.velocity.y.max(0.0);
    } else if aabb.max.y > size.y {
        pos.y -= aabb.max.y - size.y;
        body.blocked.down = true;
        body.velocity.y = body.velocity.y.min(0.0);
    }
}
