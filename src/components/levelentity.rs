use bevy_ecs::prelude::Component;

/// Marker for entities owned by the running level.
///
/// A full restart despawns every entity carrying this marker before the
/// level is rebuilt.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;
