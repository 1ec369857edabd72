use bevy_ecs::message::Message;

/// Sound effects of the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Jump,
    Key,
    Coin,
    Diamond,
    Repel,
    GateBreak,
    Death,
}

impl SoundId {
    pub const ALL: [SoundId; 7] = [
        SoundId::Jump,
        SoundId::Key,
        SoundId::Coin,
        SoundId::Diamond,
        SoundId::Repel,
        SoundId::GateBreak,
        SoundId::Death,
    ];

    /// Asset key of the sound.
    pub fn key(self) -> &'static str {
        match self {
            SoundId::Jump => "jump",
            SoundId::Key => "key",
            SoundId::Coin => "coin",
            SoundId::Diamond => "diamond",
            SoundId::Repel => "repel",
            SoundId::GateBreak => "gate_break",
            SoundId::Death => "death",
        }
    }
}

/// Play-sound requests written by the level, consumed by the audio front-end.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum AudioCmd {
    PlayFx { id: SoundId, volume: f32 },
}

impl AudioCmd {
    pub fn play(id: SoundId) -> Self {
        AudioCmd::PlayFx { id, volume: 1.0 }
    }

    pub fn play_at(id: SoundId, volume: f32) -> Self {
        AudioCmd::PlayFx { id, volume }
    }
}
