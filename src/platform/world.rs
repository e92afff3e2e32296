//! Render/physics world contract
//!
//! The host engine owns nodes, bodies and animation. The core drives it only
//! through this trait.

use glam::Vec2;

use crate::sim::entity::{BodySpec, EntityId};

/// How a node under the finger identifies itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    /// A penguin sprite (the entity node itself)
    Penguin,
    /// The image inside a bomb container
    BombImage,
    /// Anything else: background, trail, fuse emitter, HUD
    Untagged,
}

/// One node returned by [`RenderWorld::query_at`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHit {
    pub tag: NodeTag,
    /// Enemy the node belongs to. For a bomb image this is the parent
    /// container.
    pub owner: Option<EntityId>,
}

impl NodeHit {
    pub fn penguin(id: EntityId) -> Self {
        Self { tag: NodeTag::Penguin, owner: Some(id) }
    }

    pub fn bomb_image(container: EntityId) -> Self {
        Self { tag: NodeTag::BombImage, owner: Some(container) }
    }

    pub fn untagged(owner: Option<EntityId>) -> Self {
        Self { tag: NodeTag::Untagged, owner }
    }
}

/// Particle bursts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SliceHitEnemy,
    SliceHitBomb,
}

/// Timed visual actions the world runs and completes on its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualAction {
    /// Scale to zero and fade out together, then remove the node
    SliceAway { entity: EntityId, duration: f32 },
    /// Snap a life indicator to `from_scale`, then ease back to 1.0
    LifePulse { index: usize, from_scale: f32, duration: f32 },
}

/// Render/physics collaborator
pub trait RenderWorld {
    /// Add an enemy node with a ballistic body
    fn add_entity(&mut self, body: &BodySpec);
    /// Remove an enemy node immediately
    fn remove_entity(&mut self, id: EntityId);
    /// Current scene position of an enemy node
    fn position_of(&self, id: EntityId) -> Option<Vec2>;
    /// Every node under `point`, topmost first
    fn query_at(&self, point: Vec2) -> Vec<NodeHit>;
    /// Take an enemy out of physics interaction (it stops moving)
    fn freeze(&mut self, id: EntityId);
    /// Gravity in scene units per second squared
    fn set_gravity(&mut self, gravity: Vec2);
    /// Global time scale for the physics world; 0 freezes everything
    fn set_simulation_speed(&mut self, speed: f32);
    fn run_action(&mut self, action: VisualAction);
    fn spawn_effect(&mut self, effect: Effect, at: Vec2);

    /// Replace the blade trail polyline
    fn draw_slice(&mut self, points: &[Vec2]);
    /// Fade the blade trail out
    fn fade_out_slice(&mut self, duration: f32);
    /// Cancel any fade and show the trail at full opacity
    fn reset_slice_fade(&mut self);

    fn set_score_text(&mut self, text: &str);
    fn set_life_lost(&mut self, index: usize, lost: bool);
    fn show_message(&mut self, text: &str);
    fn set_input_enabled(&mut self, enabled: bool);
}
