//! Gameplay notifications.
//!
//! One [`LevelEvent`] is written for every change the router or the state
//! machine makes, so front-ends and tests can follow the run without
//! diffing resources.

use bevy_ecs::message::Message;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    CoinCollected,
    DiamondCollected,
    ExtraLifeCollected,
    KeyCollected,
    GateUnlocked,
    GateRepelled,
    CheckpointReached,
    Jumped,
    PlayerDied { lives_left: i32 },
    Respawned { at_checkpoint: bool },
    GameOver,
    Won,
    Restarted,
    MessageShown(&'static str),
    MessageHidden,
}
