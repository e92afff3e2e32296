//! Enemy launching
//!
//! Rolls launch kinematics, registers the enemy with the world and the active
//! set, and owns the one fuse loop that may be sounding at any time.

use glam::Vec2;

use super::entity::{ActiveEntitySet, EnemyKind, Entity, EntityId, ForceBomb};
use super::rng::GameRng;
use crate::audio::{AudioOut, Clip, LoopId};
use crate::consts::*;
use crate::platform::RenderWorld;

/// Creates enemies and tracks the shared fuse sound
#[derive(Debug, Clone)]
pub struct EntitySpawner {
    next_id: EntityId,
    fuse: Option<LoopId>,
}

impl Default for EntitySpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl EntitySpawner {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            fuse: None,
        }
    }

    /// Draw kind and launch kinematics for a new enemy (no side effects
    /// outside the RNG and id counter)
    pub fn roll(&mut self, force: ForceBomb, rng: &mut GameRng) -> Entity {
        let kind = match force {
            ForceBomb::Never => EnemyKind::Penguin,
            ForceBomb::Always => EnemyKind::Bomb,
            ForceBomb::Random => {
                if rng.int_in(0, 6) == 0 {
                    EnemyKind::Bomb
                } else {
                    EnemyKind::Penguin
                }
            }
        };

        let x = rng.int_in(SPAWN_X_MIN, SPAWN_X_MAX) as f32;
        let position = Vec2::new(x, SPAWN_Y);

        // Launch toward the middle: hard from the edges, gently near center
        let quarter = SCENE_WIDTH / 4.0;
        let x_speed = if x < quarter {
            rng.int_in(8, 15)
        } else if x < quarter * 2.0 {
            rng.int_in(3, 5)
        } else if x < quarter * 3.0 {
            -rng.int_in(3, 5)
        } else {
            -rng.int_in(8, 15)
        };
        let y_speed = rng.int_in(24, 32);
        let angular_velocity = (rng.int_in(-6, 6) / 2) as f32;

        let id = self.next_id;
        self.next_id += 1;

        Entity {
            id,
            kind,
            position,
            velocity: Vec2::new(x_speed as f32, y_speed as f32) * VELOCITY_SCALE,
            angular_velocity,
            alive: true,
            fuse: None,
        }
    }

    /// Launch an enemy into the world and the active set
    pub fn spawn<W: RenderWorld, A: AudioOut>(
        &mut self,
        force: ForceBomb,
        rng: &mut GameRng,
        world: &mut W,
        audio: &mut A,
        active: &mut ActiveEntitySet,
    ) -> EntityId {
        let mut entity = self.roll(force, rng);

        match entity.kind {
            EnemyKind::Bomb => {
                // One fuse at a time: always replace whatever is there
                self.silence_fuse(audio);
                let fuse = audio.play_looping(Clip::BombFuse);
                self.fuse = Some(fuse);
                entity.fuse = Some(fuse);
            }
            EnemyKind::Penguin => {
                audio.play_one_shot(Clip::Launch);
            }
        }

        world.add_entity(&entity.body_spec());
        let id = entity.id;
        log::trace!(
            "spawn {} {:?} at {:.0} vel ({:.0}, {:.0})",
            id,
            entity.kind,
            entity.position.x,
            entity.velocity.x,
            entity.velocity.y
        );
        active.insert(entity);
        id
    }

    /// Stop and drop the fuse loop, if any
    pub fn silence_fuse<A: AudioOut>(&mut self, audio: &mut A) {
        if let Some(fuse) = self.fuse.take() {
            audio.stop(fuse);
        }
    }

    pub fn fuse(&self) -> Option<LoopId> {
        self.fuse
    }
}
