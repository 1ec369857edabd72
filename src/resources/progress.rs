use bevy_ecs::prelude::Resource;

/// Lives, score and one-way flags of the current run.
///
/// A respawn keeps everything except the life that was lost. Only a full
/// restart resets it.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub lives: i32,
    pub score: u32,
    pub has_key: bool,
    pub has_checkpoint: bool,
}

impl Progress {
    pub fn new(starting_lives: i32) -> Self {
        Self {
            lives: starting_lives,
            score: 0,
            has_key: false,
            has_checkpoint: false,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take one life. Never goes below zero.
    pub fn lose_life(&mut self) {
        self.lives = (self.lives - 1).max(0);
    }
}
