//! Game session
//!
//! Owns the whole run: scoreboard, sequencer, spawner, active set, swipe
//! tracker and the task timeline, plus the injected world and audio
//! collaborators. Hosts drive it with `advance` once per frame and forward
//! touch events.

use glam::Vec2;

use super::entity::{ActiveEntitySet, ForceBomb};
use super::gesture::GestureTracker;
use super::resolver;
use super::rng::GameRng;
use super::scheduler::{Scheduler, Task};
use super::sequence::SequenceDirector;
use super::spawner::EntitySpawner;
use super::state::{EndCause, GameEvent, SessionSnapshot, SessionState};
use crate::audio::{AudioOut, Clip};
use crate::consts::*;
use crate::platform::RenderWorld;
use crate::tuning::Tuning;

/// Salt for the cosmetic RNG stream (swoosh variants) so swipes never shift
/// the enemy stream
const FX_STREAM_SALT: u64 = 0x5eed_f00d_cafe_d00d;

/// One run of the game
pub struct GameSession<W: RenderWorld, A: AudioOut> {
    pub(crate) state: SessionState,
    pub(crate) rng: GameRng,
    pub(crate) fx_rng: GameRng,
    pub(crate) director: SequenceDirector,
    pub(crate) spawner: EntitySpawner,
    pub(crate) active: ActiveEntitySet,
    pub(crate) gesture: GestureTracker,
    pub(crate) scheduler: Scheduler,
    pub(crate) world: W,
    pub(crate) audio: A,
    pub(crate) tuning: Tuning,
    pub(crate) input_enabled: bool,
    pub(crate) events: Vec<GameEvent>,
    started: bool,
}

impl<W: RenderWorld, A: AudioOut> GameSession<W, A> {
    /// Create a session. The sequence is generated immediately from `seed`;
    /// nothing is launched until [`GameSession::start`].
    pub fn new(seed: u64, tuning: Tuning, world: W, audio: A) -> Self {
        let mut rng = GameRng::new(seed);
        let director = SequenceDirector::new(&tuning, &mut rng);
        Self {
            state: SessionState::new(),
            rng,
            fx_rng: GameRng::new(seed ^ FX_STREAM_SALT),
            director,
            spawner: EntitySpawner::new(),
            active: ActiveEntitySet::new(),
            gesture: GestureTracker::new(),
            scheduler: Scheduler::new(),
            world,
            audio,
            tuning,
            input_enabled: true,
            events: Vec::new(),
            started: false,
        }
    }

    /// Set up the scene and queue the opening batch
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.world
            .set_gravity(Vec2::new(0.0, self.tuning.gravity * POINTS_PER_METER));
        self.world
            .set_simulation_speed(self.director.difficulty().simulation_speed);
        self.world.set_score_text(&self.state.score_text());
        for index in 0..STARTING_LIVES as usize {
            self.world.set_life_lost(index, false);
        }
        self.world.draw_slice(&[]);
        self.world.set_input_enabled(true);

        let delay = self.director.start();
        self.scheduler.schedule_after(delay, Task::IssueBatch);
        log::info!(
            "Session started (seed {}, {} steps, first batch in {:.1}s)",
            self.rng.seed(),
            self.director.sequence().len(),
            delay
        );
    }

    /// Advance one frame: fire due tasks, then sweep for misses
    pub fn advance(&mut self, dt: f32) {
        if !self.started {
            return;
        }
        self.scheduler.advance(dt);
        while let Some(task) = self.scheduler.pop_due() {
            self.run_task(task);
        }
        resolver::frame_sweep(self);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::IssueBatch => self.issue_batch(),
            Task::ChainSpawn(force) => {
                self.director.chain_spawn_fired();
                if !self.state.is_ended() {
                    self.spawn(force);
                }
            }
            Task::SwooshFinished => self.gesture.swoosh_finished(),
        }
    }

    /// Launch the next sequence step now
    pub fn issue_batch(&mut self) {
        if self.state.is_ended() {
            return;
        }
        let Some(batch) = self.director.issue_batch() else {
            return;
        };

        self.world
            .set_simulation_speed(self.director.difficulty().simulation_speed);
        self.events.push(GameEvent::BatchIssued {
            index: batch.index,
            step: batch.step,
        });

        for force in batch.immediate {
            self.spawn(force);
        }
        for (offset, force) in batch.deferred {
            self.scheduler.schedule_after(offset, Task::ChainSpawn(force));
        }
    }

    fn spawn(&mut self, force: ForceBomb) {
        let id = self.spawner.spawn(
            force,
            &mut self.rng,
            &mut self.world,
            &mut self.audio,
            &mut self.active,
        );
        if let Some(entity) = self.active.get(id) {
            self.events.push(GameEvent::Spawned { id, kind: entity.kind });
        }
    }

    // === Input ===

    pub fn touch_began(&mut self, point: Vec2) {
        if !self.input_enabled {
            return;
        }
        self.gesture.begin(point);
        self.world.draw_slice(self.gesture.path().drawable());
        self.world.reset_slice_fade();
    }

    pub fn touch_moved(&mut self, point: Vec2) {
        if !self.input_enabled {
            return;
        }
        if self.gesture.extend(point) {
            let clip = Clip::swoosh(self.fx_rng.int_in(1, 3));
            let duration = self.audio.play_one_shot(clip);
            self.scheduler.schedule_after(duration, Task::SwooshFinished);
        }
        self.world.draw_slice(self.gesture.path().drawable());
        resolver::slice_at(self, point);
    }

    pub fn touch_ended(&mut self) {
        if !self.input_enabled {
            return;
        }
        self.world.fade_out_slice(SLICE_FADE_SECS);
    }

    /// System-interrupted touch; handled exactly like a lift
    pub fn touch_cancelled(&mut self) {
        self.touch_ended();
    }

    // === Scoreboard ===

    pub fn subtract_life(&mut self) {
        resolver::subtract_life(self);
    }

    pub fn end_game(&mut self, cause: EndCause) {
        resolver::end_game(self, cause);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.rng.seed(),
            elapsed: self.scheduler.now(),
            state: self.state.clone(),
            director: self.director.state(),
            cursor: self.director.cursor(),
            difficulty: self.director.difficulty(),
            active: self.active.len(),
        }
    }

    // === Accessors ===

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn director(&self) -> &SequenceDirector {
        &self.director
    }

    pub fn active(&self) -> &ActiveEntitySet {
        &self.active
    }

    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
