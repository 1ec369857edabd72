//! HUD updater.
//!
//! Rewrites the lives and score text from [`Progress`] when a refresh was
//! requested. The message line is managed by the state machine.
use bevy_ecs::prelude::*;

use crate::resources::hud::Hud;
use crate::resources::progress::Progress;

pub fn hud_update(progress: Res<Progress>, mut hud: ResMut<Hud>) {
    if hud.refresh_requested {
        hud.refresh(&progress);
    }
}
