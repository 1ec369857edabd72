use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Respawn anchors of the running level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SpawnPoints {
    pub start: Vec2,
    pub checkpoint: Option<Vec2>,
}

impl SpawnPoints {
    /// Where a player with lives left comes back after dying.
    pub fn respawn_point(&self, has_checkpoint: bool) -> Vec2 {
        match (has_checkpoint, self.checkpoint) {
            (true, Some(checkpoint)) => checkpoint,
            _ => self.start,
        }
    }
}
