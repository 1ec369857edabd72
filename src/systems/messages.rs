//! Message queue maintenance.
//!
//! Bevy ECS' [`Messages`] API requires calling `update()` once per tick so
//! old messages are dropped. These run first in the tick schedule.
use bevy_ecs::prelude::*;

use crate::events::audio::AudioCmd;
use crate::events::level::LevelEvent;

/// Advance the ECS message queue for [`AudioCmd`].
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Advance the ECS message queue for [`LevelEvent`].
pub fn update_level_events(mut msgs: ResMut<Messages<LevelEvent>>) {
    msgs.update();
}
