//! Headless ballistic world
//!
//! A minimal stand-in for the host engine: circles under gravity, a time
//! scale, timed slice-away removal and a recorded HUD. Used by the native
//! runner and by tests.

use std::collections::BTreeMap;

use glam::Vec2;

use super::world::{Effect, NodeHit, RenderWorld, VisualAction};
use crate::consts::{FUSE_ANCHOR, STARTING_LIVES};
use crate::sim::entity::{BodySpec, EnemyKind, EntityId};

/// Radius around the fuse emitter that hit-tests as part of the bomb container
const FUSE_NODE_RADIUS: f32 = 12.0;

/// A simulated enemy node
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    pub radius: f32,
    /// Participates in gravity/motion
    pub dynamic: bool,
    pub scale: f32,
    pub alpha: f32,
    /// Seconds left (and total) of a running slice-away action
    pub slice_away: Option<(f32, f32)>,
}

impl Body {
    /// Still a live target (not mid slice-away)
    pub fn is_target(&self) -> bool {
        self.slice_away.is_none()
    }
}

/// Blade trail as the host would show it
#[derive(Debug, Clone, Default)]
pub struct SliceTrail {
    pub points: Vec<Vec2>,
    pub alpha: f32,
    /// Seconds left (and total) of a running fade
    pub fade: Option<(f32, f32)>,
}

/// Running life indicator pulse
#[derive(Debug, Clone, Copy)]
struct Pulse {
    index: usize,
    from_scale: f32,
    left: f32,
    total: f32,
}

/// Recorded HUD state
#[derive(Debug, Clone)]
pub struct Hud {
    pub score_text: String,
    pub lives_lost: [bool; STARTING_LIVES as usize],
    /// Indicator scales (pulse animation)
    pub life_scale: [f32; STARTING_LIVES as usize],
    pub message: Option<String>,
    pub input_enabled: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score_text: String::new(),
            lives_lost: [false; STARTING_LIVES as usize],
            life_scale: [1.0; STARTING_LIVES as usize],
            message: None,
            input_enabled: true,
        }
    }
}

/// In-memory [`RenderWorld`]
#[derive(Debug, Clone, Default)]
pub struct HeadlessWorld {
    bodies: BTreeMap<EntityId, Body>,
    /// Add order, for topmost-first hit-testing
    order: Vec<EntityId>,
    pub gravity: Vec2,
    pub speed: f32,
    pub slice: SliceTrail,
    pub hud: Hud,
    /// Every effect spawned, in order
    pub effects: Vec<(Effect, Vec2)>,
    pulses: Vec<Pulse>,
    /// Total nodes removed
    pub removed: u32,
}

impl HeadlessWorld {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            ..Default::default()
        }
    }

    /// Integrate bodies and run timed actions for `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let scaled = dt * self.speed;
        for body in self.bodies.values_mut() {
            if body.dynamic && scaled > 0.0 {
                body.vel += self.gravity * scaled;
                body.pos += body.vel * scaled;
                body.angle += body.angular_vel * scaled;
            }
        }

        // Actions run on scene time, not physics time
        let mut finished: Vec<EntityId> = Vec::new();
        for (id, body) in self.bodies.iter_mut() {
            if let Some((left, total)) = body.slice_away {
                let left = left - dt;
                if left <= 0.0 {
                    finished.push(*id);
                } else {
                    let t = left / total;
                    body.scale = t;
                    body.alpha = t;
                    body.slice_away = Some((left, total));
                }
            }
        }
        for id in finished {
            self.remove_entity(id);
        }

        for pulse in self.pulses.iter_mut() {
            pulse.left -= dt;
            let t = (pulse.left / pulse.total).clamp(0.0, 1.0);
            self.hud.life_scale[pulse.index] = 1.0 + (pulse.from_scale - 1.0) * t;
        }
        self.pulses.retain(|pulse| pulse.left > 0.0);

        if let Some((left, total)) = self.slice.fade {
            let left = left - dt;
            if left <= 0.0 {
                self.slice.alpha = 0.0;
                self.slice.fade = None;
            } else {
                self.slice.alpha = left / total;
                self.slice.fade = Some((left, total));
            }
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Bodies in add order
    pub fn bodies(&self) -> impl Iterator<Item = (EntityId, &Body)> {
        self.order
            .iter()
            .filter_map(|id| self.bodies.get(id).map(|b| (*id, b)))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Teleport a body (tests use this to push enemies off screen)
    pub fn place(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
        }
    }
}

impl RenderWorld for HeadlessWorld {
    fn add_entity(&mut self, spec: &BodySpec) {
        self.bodies.insert(
            spec.id,
            Body {
                kind: spec.kind,
                pos: spec.position,
                vel: spec.velocity,
                angle: 0.0,
                angular_vel: spec.angular_velocity,
                radius: spec.radius,
                dynamic: true,
                scale: 1.0,
                alpha: 1.0,
                slice_away: None,
            },
        );
        self.order.push(spec.id);
    }

    fn remove_entity(&mut self, id: EntityId) {
        if self.bodies.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
            self.removed += 1;
        }
    }

    fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn query_at(&self, point: Vec2) -> Vec<NodeHit> {
        let mut hits = Vec::new();
        for &id in self.order.iter().rev() {
            let Some(body) = self.bodies.get(&id) else {
                continue;
            };
            if body.kind == EnemyKind::Bomb {
                let fuse = body.pos + Vec2::new(FUSE_ANCHOR.0, FUSE_ANCHOR.1) * body.scale;
                if fuse.distance(point) <= FUSE_NODE_RADIUS {
                    hits.push(NodeHit::untagged(Some(id)));
                }
            }
            if body.pos.distance(point) > body.radius * body.scale {
                continue;
            }
            // Nodes on their way out lose their tag
            let hit = match (body.kind, body.is_target()) {
                (_, false) => NodeHit::untagged(Some(id)),
                (EnemyKind::Penguin, true) => NodeHit::penguin(id),
                (EnemyKind::Bomb, true) => NodeHit::bomb_image(id),
            };
            hits.push(hit);
        }
        hits
    }

    fn freeze(&mut self, id: EntityId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.dynamic = false;
        }
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn set_simulation_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn run_action(&mut self, action: VisualAction) {
        match action {
            VisualAction::SliceAway { entity, duration } => {
                if let Some(body) = self.bodies.get_mut(&entity) {
                    body.slice_away = Some((duration, duration));
                }
            }
            VisualAction::LifePulse {
                index,
                from_scale,
                duration,
            } => {
                if index < self.hud.life_scale.len() {
                    self.hud.life_scale[index] = from_scale;
                    self.pulses.push(Pulse {
                        index,
                        from_scale,
                        left: duration,
                        total: duration,
                    });
                }
            }
        }
    }

    fn spawn_effect(&mut self, effect: Effect, at: Vec2) {
        self.effects.push((effect, at));
    }

    fn draw_slice(&mut self, points: &[Vec2]) {
        self.slice.points = points.to_vec();
    }

    fn fade_out_slice(&mut self, duration: f32) {
        self.slice.fade = Some((duration, duration));
    }

    fn reset_slice_fade(&mut self) {
        self.slice.fade = None;
        self.slice.alpha = 1.0;
    }

    fn set_score_text(&mut self, text: &str) {
        self.hud.score_text = text.to_string();
    }

    fn set_life_lost(&mut self, index: usize, lost: bool) {
        if let Some(flag) = self.hud.lives_lost.get_mut(index) {
            *flag = lost;
        }
    }

    fn show_message(&mut self, text: &str) {
        self.hud.message = Some(text.to_string());
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.hud.input_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: EntityId, kind: EnemyKind, pos: Vec2, vel: Vec2) -> BodySpec {
        BodySpec {
            id,
            kind,
            position: pos,
            velocity: vel,
            angular_velocity: 1.0,
            radius: 64.0,
            collidable: false,
        }
    }

    #[test]
    fn test_ballistic_motion_and_speed() {
        let mut world = HeadlessWorld::new();
        world.set_gravity(Vec2::new(0.0, -900.0));
        world.add_entity(&spec(1, EnemyKind::Penguin, Vec2::new(100.0, 0.0), Vec2::new(0.0, 900.0)));

        world.step(0.5);
        let p = world.position_of(1).unwrap();
        assert!(p.y > 0.0);

        // Frozen world does not move
        world.set_simulation_speed(0.0);
        world.step(1.0);
        assert_eq!(world.position_of(1).unwrap(), p);
    }

    #[test]
    fn test_query_topmost_first_and_tags() {
        let mut world = HeadlessWorld::new();
        world.add_entity(&spec(1, EnemyKind::Penguin, Vec2::new(0.0, 0.0), Vec2::ZERO));
        world.add_entity(&spec(2, EnemyKind::Bomb, Vec2::new(10.0, 0.0), Vec2::ZERO));
        let hits = world.query_at(Vec2::new(5.0, 0.0));
        assert_eq!(hits, vec![NodeHit::bomb_image(2), NodeHit::penguin(1)]);
        assert!(world.query_at(Vec2::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn test_slice_away_untags_then_removes() {
        let mut world = HeadlessWorld::new();
        world.add_entity(&spec(1, EnemyKind::Penguin, Vec2::ZERO, Vec2::ZERO));
        world.freeze(1);
        world.run_action(VisualAction::SliceAway { entity: 1, duration: 0.2 });
        assert_eq!(world.query_at(Vec2::ZERO), vec![NodeHit::untagged(Some(1))]);
        world.step(0.1);
        assert!(world.contains(1));
        world.step(0.15);
        assert!(!world.contains(1));
        assert_eq!(world.removed, 1);
    }

    #[test]
    fn test_slice_fade() {
        let mut world = HeadlessWorld::new();
        world.reset_slice_fade();
        world.fade_out_slice(0.25);
        world.step(0.1);
        assert!(world.slice.alpha > 0.0 && world.slice.alpha < 1.0);
        world.step(0.2);
        assert_eq!(world.slice.alpha, 0.0);
    }

    #[test]
    fn test_life_pulse_settles() {
        let mut world = HeadlessWorld::new();
        world.run_action(VisualAction::LifePulse { index: 1, from_scale: 1.3, duration: 0.1 });
        assert_eq!(world.hud.life_scale[1], 1.3);
        world.step(0.05);
        assert!(world.hud.life_scale[1] > 1.0 && world.hud.life_scale[1] < 1.3);
        world.step(0.1);
        assert_eq!(world.hud.life_scale[1], 1.0);
    }
}
