//! Overlap router.
//!
//! Drains the [`OverlapSet`] built by `detect_overlaps` and hands every
//! `(entity, kind)` pair to the handler of its category. Consumables are
//! deactivated before their handler runs, so an object reported twice (or
//! touched again next tick before its despawn lands) is handled once.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::worldobject::ObjectKind;
use crate::events::audio::{AudioCmd, SoundId};
use crate::events::level::LevelEvent;
use crate::resources::gameconfig::{SCORE_COIN, SCORE_DIAMOND, SCORE_EXTRA_LIFE, SCORE_KEY};
use crate::resources::hud::MSG_CHECKPOINT;
use crate::resources::overlaps::OverlapSet;
use crate::resources::scheduler::TimedAction;
use crate::systems::session::LevelContext;

/// Volume of the coin pickup sound.
pub const COIN_VOLUME: f32 = 0.25;

pub fn route_overlaps(mut overlaps: ResMut<OverlapSet>, mut ctx: LevelContext) {
    for (entity, kind) in overlaps.hits.drain(..) {
        match kind {
            ObjectKind::Coin | ObjectKind::Diamond | ObjectKind::ExtraLife | ObjectKind::Key => {
                collect(&mut ctx, entity, kind)
            }
            ObjectKind::Gate | ObjectKind::KeyHole => touch_gate(&mut ctx, entity),
            ObjectKind::Hazard => touch_hazard(&mut ctx),
            ObjectKind::GoalZone => ctx.begin_win(),
            ObjectKind::Checkpoint => touch_checkpoint(&mut ctx, entity),
            ObjectKind::SpawnPoint => {}
        }
    }
}

fn collect(ctx: &mut LevelContext, entity: Entity, kind: ObjectKind) {
    if !ctx.consume(entity) {
        return;
    }
    let (event, sound) = match kind {
        ObjectKind::Coin => {
            ctx.progress.add_score(SCORE_COIN);
            (
                LevelEvent::CoinCollected,
                AudioCmd::play_at(SoundId::Coin, COIN_VOLUME),
            )
        }
        ObjectKind::Diamond => {
            ctx.progress.add_score(SCORE_DIAMOND);
            (LevelEvent::DiamondCollected, AudioCmd::play(SoundId::Diamond))
        }
        ObjectKind::ExtraLife => {
            ctx.progress.add_score(SCORE_EXTRA_LIFE);
            ctx.progress.lives += 1;
            (LevelEvent::ExtraLifeCollected, AudioCmd::play(SoundId::Diamond))
        }
        ObjectKind::Key => {
            ctx.progress.add_score(SCORE_KEY);
            ctx.progress.has_key = true;
            (LevelEvent::KeyCollected, AudioCmd::play(SoundId::Key))
        }
        _ => return,
    };
    debug!("{:?} collected, score {}", kind, ctx.progress.score);
    ctx.hud.request_refresh();
    ctx.audio.write(sound);
    ctx.events.write(event);
}

/// Unlock the gate with the key, or push the player back without it.
fn touch_gate(ctx: &mut LevelContext, piece: Entity) {
    if ctx.progress.has_key {
        let pieces: Vec<Entity> = ctx
            .objects
            .iter()
            .filter(|(_, object, _)| object.active && object.kind.is_gate_piece())
            .map(|(entity, _, _)| entity)
            .collect();
        let mut unlocked = false;
        for entity in pieces {
            unlocked |= ctx.consume(entity);
        }
        if unlocked {
            debug!("Gate unlocked");
            ctx.play(SoundId::GateBreak);
            ctx.events.write(LevelEvent::GateUnlocked);
        }
        return;
    }

    let Ok((_, _, piece_pos)) = ctx.objects.get(piece) else {
        return;
    };
    let piece_x = piece_pos.pos.x;
    let repel = ctx.config.acceleration;
    if let Ok((_, _, mut body, position)) = ctx.players.single_mut() {
        let away = if position.pos.x <= piece_x { -1.0 } else { 1.0 };
        body.velocity.x = away * repel;
    }
    ctx.play(SoundId::Repel);
    ctx.events.write(LevelEvent::GateRepelled);
}

fn touch_hazard(ctx: &mut LevelContext) {
    let controllable = ctx
        .players
        .single()
        .map(|(_, player, _, _)| player.controllable)
        .unwrap_or(false);
    if controllable {
        ctx.begin_death();
    }
}

/// First touch arms the checkpoint. It stays in the world but stops colliding.
fn touch_checkpoint(ctx: &mut LevelContext, entity: Entity) {
    if ctx.progress.has_checkpoint {
        return;
    }
    let Ok((_, mut object, _)) = ctx.objects.get_mut(entity) else {
        return;
    };
    if !object.active {
        return;
    }
    object.active = false;

    ctx.progress.has_checkpoint = true;
    let token = ctx.show_message(MSG_CHECKPOINT);
    let delay = ctx.config.message_time();
    ctx.schedule(TimedAction::HideMessage { token }, delay);
    ctx.play(SoundId::Diamond);
    ctx.events.write(LevelEvent::CheckpointReached);
    debug!("Checkpoint reached");
}
