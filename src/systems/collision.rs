//! Overlap query.
//!
//! [`detect_overlaps`] collects every active [`WorldObject`] whose box
//! overlaps the player's box into the [`OverlapSet`] resource. The router
//! consumes the set later in the same tick.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::worldobject::WorldObject;
use crate::resources::overlaps::OverlapSet;

pub fn detect_overlaps(
    mut overlaps: ResMut<OverlapSet>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
    objects: Query<(Entity, &MapPosition, &BoxCollider, &WorldObject), Without<Player>>,
) {
    overlaps.clear();
    let Ok((player_pos, player_box)) = players.single() else {
        return;
    };

    for (entity, position, collider, object) in objects.iter() {
        if !object.active {
            continue;
        }
        if player_box.overlaps(player_pos.pos, collider, position.pos) {
            overlaps.push(entity, object.kind);
        }
    }
}
