//! Phase of the running level.

use bevy_ecs::prelude::Resource;

/// Where the level's state machine currently is.
///
/// `Respawning` is passed through within the transition that ends a death
/// with lives left; observers see it as a `LevelEvent::Respawned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Playing,
    Dying,
    Respawning,
    Won,
    GameOver,
}

impl SessionPhase {
    /// Only a restart leaves these phases.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Won | SessionPhase::GameOver)
    }
}

/// Current phase plus the restart generation.
///
/// Every full restart bumps `epoch`; timed entries remember the epoch they
/// were queued in and are dropped when it no longer matches.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Session {
    pub phase: SessionPhase,
    pub epoch: u32,
}
