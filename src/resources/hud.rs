//! HUD text snapshot.
//!
//! The front-end draws these strings as they are; the HUD updater rewrites
//! `lives` and `score` only when a refresh was requested.

use bevy_ecs::prelude::Resource;

use crate::resources::progress::Progress;

pub const MSG_CHECKPOINT: &str = "checkpoint";
pub const MSG_GAME_OVER: &str = "game over\n\npress space\nto restart";
pub const MSG_WIN: &str = "you win\n\npress space\nto restart";

/// Prefix shown before the score while the key is held.
pub const KEY_INDICATOR: &str = "K   ";

#[derive(Resource, Debug, Clone)]
pub struct Hud {
    pub lives: String,
    pub score: String,
    pub message: String,
    pub message_visible: bool,
    /// Incremented every time a message is shown. Timed hides carry the
    /// token of the message they belong to.
    pub message_token: u32,
    pub refresh_requested: bool,
}

impl Hud {
    pub fn new(progress: &Progress) -> Self {
        let mut hud = Self {
            lives: String::new(),
            score: String::new(),
            message: String::new(),
            message_visible: false,
            message_token: 0,
            refresh_requested: false,
        };
        hud.refresh(progress);
        hud
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Rewrite lives and score from `progress`.
    pub fn refresh(&mut self, progress: &Progress) {
        self.lives = lives_text(progress);
        self.score = score_text(progress);
        self.refresh_requested = false;
    }

    /// Show `text` and return its token.
    pub fn show_message(&mut self, text: &str) -> u32 {
        self.message_token = self.message_token.wrapping_add(1);
        self.message.clear();
        self.message.push_str(text);
        self.message_visible = true;
        self.message_token
    }

    /// Hide the message only if it is still the one shown with `token`.
    pub fn hide_message(&mut self, token: u32) -> bool {
        if self.message_visible && self.message_token == token {
            self.message_visible = false;
            return true;
        }
        false
    }

    pub fn clear_message(&mut self) {
        self.message_visible = false;
        self.message.clear();
    }
}

pub fn lives_text(progress: &Progress) -> String {
    format!("L{}", progress.lives)
}

pub fn score_text(progress: &Progress) -> String {
    if progress.has_key {
        format!("{KEY_INDICATOR}{:07}", progress.score)
    } else {
        format!("{:07}", progress.score)
    }
}
