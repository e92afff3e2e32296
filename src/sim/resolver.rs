//! Hit and miss resolution
//!
//! Per-frame sweep (misses, batch continuation, fuse silencing, in that
//! order) and per-swipe slice hit-testing. Score and lives change only here.

use glam::Vec2;

use super::entity::{EnemyKind, EntityId};
use super::scheduler::Task;
use super::session::GameSession;
use super::state::{EndCause, GameEvent};
use crate::audio::{AudioOut, Clip};
use crate::consts::*;
use crate::platform::{Effect, NodeTag, RenderWorld, VisualAction};

/// Run the end-of-frame checks
pub fn frame_sweep<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>) {
    cull_misses(session);
    continue_sequence(session);
    silence_idle_fuse(session);
}

/// Remove everything that fell below the play area
fn cull_misses<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>) {
    let mut fallen: Vec<EntityId> = Vec::new();
    let mut lost: Vec<EntityId> = Vec::new();
    for entity in session.active.iter() {
        match session.world.position_of(entity.id) {
            Some(pos) if pos.y < CULL_Y => fallen.push(entity.id),
            Some(_) => {}
            None => lost.push(entity.id),
        }
    }

    for id in lost {
        log::warn!("entity {} vanished from the world; dropping it", id);
        session.active.remove(id);
    }

    for id in fallen {
        let Some(entity) = session.active.remove(id) else {
            continue;
        };
        session.world.remove_entity(id);
        session.events.push(GameEvent::Missed { id, kind: entity.kind });
        if entity.kind == EnemyKind::Penguin {
            subtract_life(session);
        }
    }
}

/// Queue the next batch once the screen is clear
fn continue_sequence<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>) {
    if !session.active.is_empty() {
        return;
    }
    if let Some(delay) = session.director.on_clear() {
        session.scheduler.schedule_after(delay, Task::IssueBatch);
    }
}

/// No bomb in the air means no fuse sound
fn silence_idle_fuse<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>) {
    if !session.active.has_bomb() {
        session.spawner.silence_fuse(&mut session.audio);
    }
}

/// Hit-test the swipe point against everything under it
pub fn slice_at<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>, point: Vec2) {
    let hits = session.world.query_at(point);
    let mut resolved: Vec<EntityId> = Vec::new();

    for hit in hits {
        if session.state.is_ended() {
            break;
        }
        let Some(id) = hit.owner else {
            continue;
        };
        let expected = match hit.tag {
            NodeTag::Penguin => EnemyKind::Penguin,
            NodeTag::BombImage => EnemyKind::Bomb,
            NodeTag::Untagged => continue,
        };
        if resolved.contains(&id) {
            continue;
        }
        match session.active.get(id) {
            Some(entity) if entity.kind == expected => {}
            _ => continue,
        }
        resolved.push(id);

        let Some(entity) = session.active.remove(id) else {
            continue;
        };
        let at = session.world.position_of(id).unwrap_or(entity.position);
        session.world.freeze(id);
        session.world.run_action(VisualAction::SliceAway {
            entity: id,
            duration: SLICE_AWAY_SECS,
        });
        session.events.push(GameEvent::Sliced { id, kind: entity.kind });

        match entity.kind {
            EnemyKind::Penguin => {
                session.world.spawn_effect(Effect::SliceHitEnemy, at);
                session.state.add_point();
                session.world.set_score_text(&session.state.score_text());
                session.audio.play_one_shot(Clip::Whack);
            }
            EnemyKind::Bomb => {
                session.world.spawn_effect(Effect::SliceHitBomb, at);
                session.audio.play_one_shot(Clip::Explosion);
                end_game(session, EndCause::Bomb);
            }
        }
    }
}

/// A penguin got away
pub fn subtract_life<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>) {
    if session.state.is_ended() {
        return;
    }
    let Some(index) = session.state.lose_life() else {
        return;
    };

    session.audio.play_one_shot(Clip::Wrong);
    session.world.set_life_lost(index, true);
    session.world.run_action(VisualAction::LifePulse {
        index,
        from_scale: LIFE_PULSE_SCALE,
        duration: LIFE_PULSE_SECS,
    });
    session.events.push(GameEvent::LifeLost {
        lives: session.state.lives,
    });
    log::debug!("life lost, {} left", session.state.lives);

    if session.state.lives == 0 {
        end_game(session, EndCause::Miss);
    }
}

/// Stop the run. Later calls do nothing.
pub fn end_game<W: RenderWorld, A: AudioOut>(session: &mut GameSession<W, A>, cause: EndCause) {
    if !session.state.end(cause) {
        return;
    }

    session.director.end();
    session.world.set_simulation_speed(0.0);
    session.input_enabled = false;
    session.world.set_input_enabled(false);
    session.spawner.silence_fuse(&mut session.audio);

    if cause == EndCause::Bomb {
        for index in 0..STARTING_LIVES as usize {
            session.world.set_life_lost(index, true);
        }
    }
    session.world.show_message(cause.message());
    session.events.push(GameEvent::Ended {
        cause,
        score: session.state.score,
    });
    log::info!(
        "Game over ({:?}) - score {}, batches {}",
        cause,
        session.state.score,
        session.director.cursor()
    );
}
