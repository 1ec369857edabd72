//! Per-tick overlap results.

use bevy_ecs::prelude::{Entity, Resource};
use smallvec::SmallVec;

use crate::components::worldobject::ObjectKind;

/// Active world objects overlapping the player this tick.
///
/// Rebuilt from scratch by `detect_overlaps` and drained by the router.
#[derive(Resource, Debug, Default)]
pub struct OverlapSet {
    pub hits: SmallVec<[(Entity, ObjectKind); 8]>,
}

impl OverlapSet {
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn push(&mut self, entity: Entity, kind: ObjectKind) {
        self.hits.push((entity, kind));
    }
}
