//! Enemy entities and the active set

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::LoopId;
use crate::consts::ENEMY_RADIUS;

/// Stable entity identifier shared with the render world
pub type EntityId = u32;

/// What kind of enemy was launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Penguin,
    Bomb,
}

/// Bomb selection policy for a single spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceBomb {
    /// Always a penguin
    Never,
    /// Always a bomb
    Always,
    /// One in seven is a bomb
    #[default]
    Random,
}

/// An airborne enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EnemyKind,
    /// Launch position
    pub position: Vec2,
    /// Launch velocity (points/second)
    pub velocity: Vec2,
    /// Spin (radians/second)
    pub angular_velocity: f32,
    /// Cleared once sliced or culled
    pub alive: bool,
    /// Fuse loop started for this bomb
    pub fuse: Option<LoopId>,
}

impl Entity {
    pub fn is_bomb(&self) -> bool {
        self.kind == EnemyKind::Bomb
    }

    /// Physics/visual registration request for the render world
    pub fn body_spec(&self) -> BodySpec {
        BodySpec {
            id: self.id,
            kind: self.kind,
            position: self.position,
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
            radius: ENEMY_RADIUS,
            collidable: false,
        }
    }
}

/// Everything the world needs to add an enemy node with a ballistic body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    /// Circular physics body radius
    pub radius: f32,
    /// Enemies pass through each other
    pub collidable: bool,
}

/// Airborne, unresolved entities in launch order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEntitySet {
    entities: Vec<Entity>,
}

impl ActiveEntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) {
        debug_assert!(!self.contains(entity.id), "entity {} inserted twice", entity.id);
        self.entities.push(entity);
    }

    /// Remove by identity, returning the entity if it was still active
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let mut entity = self.entities.remove(idx);
        entity.alive = false;
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether any bomb is still airborne
    pub fn has_bomb(&self) -> bool {
        self.entities.iter().any(Entity::is_bomb)
    }
}
