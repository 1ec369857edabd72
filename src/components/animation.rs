use bevy_ecs::prelude::Component;

/// Player sprite frame ids in the character atlas.
pub const CHAR1: u32 = 0;
pub const CHAR2: u32 = 1;

/// Named animation clips. Frame ids index the tile or character atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimClip {
    Idle,
    Walk,
    Jump,
    CoinSpin,
    Heart,
}

impl AnimClip {
    pub fn frames(self) -> &'static [u32] {
        match self {
            AnimClip::Idle => &[CHAR1],
            AnimClip::Walk => &[CHAR1, CHAR2],
            AnimClip::Jump => &[CHAR2],
            AnimClip::CoinSpin => &[151, 152],
            AnimClip::Heart => &[44, 46],
        }
    }

    /// Frames per second. Single-frame clips report 0 and never advance.
    pub fn fps(self) -> f32 {
        match self {
            AnimClip::Walk => 12.0,
            AnimClip::CoinSpin => 6.0,
            AnimClip::Heart => 2.0,
            AnimClip::Idle | AnimClip::Jump => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimClip::Idle => "idle",
            AnimClip::Walk => "walk",
            AnimClip::Jump => "jump",
            AnimClip::CoinSpin => "coin",
            AnimClip::Heart => "heart",
        }
    }
}

#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub clip: AnimClip,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(clip: AnimClip) -> Self {
        Self {
            clip,
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to `clip`, restarting it. Requesting the clip already playing is ignored.
    pub fn play(&mut self, clip: AnimClip) {
        if self.clip == clip {
            return;
        }
        self.clip = clip;
        self.frame_index = 0;
        self.elapsed_time = 0.0;
    }

    /// Frame id currently shown.
    pub fn current_frame(&self) -> u32 {
        let frames = self.clip.frames();
        frames[self.frame_index % frames.len()]
    }
}
