//! Despawns entities whose [`Ttl`] ran out.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

pub fn ttl_system(time: Res<WorldTime>, mut expiring: Query<(Entity, &mut Ttl)>, mut commands: Commands) {
    for (entity, mut ttl) in expiring.iter_mut() {
        if ttl.tick(time.delta) {
            commands.entity(entity).try_despawn();
        }
    }
}
