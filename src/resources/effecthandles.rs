use bevy_ecs::prelude::{Entity, Resource};

use crate::components::particleemitter::EffectKind;

/// Emitter entities of the running level, one per effect.
#[derive(Resource, Debug, Clone, Copy)]
pub struct EffectHandles {
    pub walking: Entity,
    pub jump: Entity,
    pub death: Entity,
}

impl EffectHandles {
    pub fn get(&self, effect: EffectKind) -> Entity {
        match effect {
            EffectKind::Walking => self.walking,
            EffectKind::Jump => self.jump,
            EffectKind::Death => self.death,
        }
    }
}
