//! Enemy sequencing and difficulty ramp
//!
//! A session plays a fixed curated opening followed by a long randomized
//! tail. Each step becomes one batch of spawns; every batch makes the game a
//! little faster.

use serde::{Deserialize, Serialize};

use super::entity::ForceBomb;
use super::rng::GameRng;
use crate::consts::{CHAIN_SLICES, CURATED_STEPS, GENERATED_STEPS, SEQUENCE_LEN};
use crate::tuning::Tuning;

/// What one batch launches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceStep {
    /// One penguin, never a bomb
    OneSafe,
    /// One enemy, may be a bomb
    One,
    /// A penguin and a bomb together
    TwoWithOneBomb,
    Two,
    Three,
    Four,
    /// Five enemies spread across the chain delay
    Chain,
    /// Five enemies spread across half the chain delay
    FastChain,
}

impl SequenceStep {
    /// Opening every session plays before the random tail
    pub const CURATED: [SequenceStep; CURATED_STEPS] = [
        SequenceStep::OneSafe,
        SequenceStep::OneSafe,
        SequenceStep::TwoWithOneBomb,
        SequenceStep::TwoWithOneBomb,
        SequenceStep::Three,
        SequenceStep::One,
        SequenceStep::Chain,
    ];

    /// Steps the random tail draws from
    pub const TAIL: [SequenceStep; 6] = [
        SequenceStep::TwoWithOneBomb,
        SequenceStep::Two,
        SequenceStep::Three,
        SequenceStep::Four,
        SequenceStep::Chain,
        SequenceStep::FastChain,
    ];

    /// Uniform draw over [`SequenceStep::TAIL`]
    pub fn sample_tail(rng: &mut GameRng) -> Self {
        let idx = rng.int_in(0, Self::TAIL.len() as i32 - 1) as usize;
        Self::TAIL[idx]
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, SequenceStep::Chain | SequenceStep::FastChain)
    }

    /// Spawns fired the moment the batch is issued
    pub fn immediate_spawns(&self) -> Vec<ForceBomb> {
        use ForceBomb::*;
        match self {
            SequenceStep::OneSafe => vec![Never],
            SequenceStep::One => vec![Random],
            SequenceStep::TwoWithOneBomb => vec![Never, Always],
            SequenceStep::Two => vec![Random; 2],
            SequenceStep::Three => vec![Random; 3],
            SequenceStep::Four => vec![Random; 4],
            SequenceStep::Chain | SequenceStep::FastChain => vec![Random],
        }
    }

    /// Offsets (seconds after issue) of the chain tail for a chain delay
    pub fn deferred_offsets(&self, chain_delay: f32) -> Vec<f32> {
        let span = match self {
            SequenceStep::Chain => chain_delay,
            SequenceStep::FastChain => chain_delay / 2.0,
            _ => return Vec::new(),
        };
        let slice = span / CHAIN_SLICES as f32;
        (1..CHAIN_SLICES).map(|i| slice * i as f32).collect()
    }
}

/// The full step list for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    steps: Vec<SequenceStep>,
}

impl Sequence {
    /// Curated opening plus the generated tail
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut steps = Vec::with_capacity(SEQUENCE_LEN);
        steps.extend_from_slice(&SequenceStep::CURATED);
        steps.extend((0..GENERATED_STEPS).map(|_| SequenceStep::sample_tail(rng)));
        Self { steps }
    }

    pub fn get(&self, idx: usize) -> Option<SequenceStep> {
        self.steps.get(idx).copied()
    }

    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Shortest popup/chain delay the ramp can reach (seconds)
pub const MIN_DELAY: f32 = 0.001;
/// Fastest the ramp can make the world run
pub const MAX_SIMULATION_SPEED: f32 = 1000.0;

/// Pacing values that ramp with every batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub popup_delay: f32,
    pub chain_delay: f32,
    pub simulation_speed: f32,
}

impl Difficulty {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            popup_delay: tuning.popup_delay,
            chain_delay: tuning.chain_delay,
            simulation_speed: tuning.simulation_speed,
        }
    }

    /// One batch worth of ramp. Holds at the floor and ceiling once reached.
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.popup_delay = (self.popup_delay * tuning.popup_decay).max(MIN_DELAY.min(self.popup_delay));
        self.chain_delay = (self.chain_delay * tuning.chain_decay).max(MIN_DELAY.min(self.chain_delay));
        self.simulation_speed = (self.simulation_speed * tuning.speed_growth)
            .min(MAX_SIMULATION_SPEED.max(self.simulation_speed));
    }
}

/// Director lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorState {
    /// Waiting for the opening batch
    Idle,
    /// Enemies from the last batch are still in play
    BatchInFlight,
    /// Screen cleared, next batch queued
    WaitingForClear,
    Ended,
}

/// Spawns produced by one issued step
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub step: SequenceStep,
    /// Index of the step in the sequence
    pub index: usize,
    pub immediate: Vec<ForceBomb>,
    /// (seconds from now, policy)
    pub deferred: Vec<(f32, ForceBomb)>,
}

/// Decides when and what to launch next
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDirector {
    sequence: Sequence,
    cursor: usize,
    state: DirectorState,
    difficulty: Difficulty,
    tuning: Tuning,
    /// A delayed `issue_batch` is already on the timeline
    next_queued: bool,
    /// Chain tail spawns not yet fired
    chain_pending: u32,
}

impl SequenceDirector {
    pub fn new(tuning: &Tuning, rng: &mut GameRng) -> Self {
        Self {
            sequence: Sequence::generate(rng),
            cursor: 0,
            state: DirectorState::Idle,
            difficulty: Difficulty::from_tuning(tuning),
            tuning: tuning.clone(),
            next_queued: false,
            chain_pending: 0,
        }
    }

    /// Delay before the opening batch. Marks it queued.
    pub fn start(&mut self) -> f32 {
        self.next_queued = true;
        self.tuning.first_batch_delay
    }

    /// Ramp difficulty and hand out the next step's spawns
    pub fn issue_batch(&mut self) -> Option<Batch> {
        if self.state == DirectorState::Ended {
            return None;
        }
        self.next_queued = false;
        self.difficulty.ramp(&self.tuning);

        // Past the end the final step repeats without moving the cursor
        let index = self.cursor.min(self.sequence.len().saturating_sub(1));
        let step = self.sequence.get(index)?;
        if self.cursor < self.sequence.len() {
            self.cursor += 1;
        }

        let deferred: Vec<(f32, ForceBomb)> = step
            .deferred_offsets(self.difficulty.chain_delay)
            .into_iter()
            .map(|offset| (offset, ForceBomb::Random))
            .collect();
        self.chain_pending += deferred.len() as u32;
        self.state = DirectorState::BatchInFlight;

        log::debug!(
            "batch {} {:?}: popup={:.3} chain={:.3} speed={:.3}",
            index,
            step,
            self.difficulty.popup_delay,
            self.difficulty.chain_delay,
            self.difficulty.simulation_speed
        );

        Some(Batch {
            step,
            index,
            immediate: step.immediate_spawns(),
            deferred,
        })
    }

    /// A chain tail spawn fired (or was dropped after the game ended)
    pub fn chain_spawn_fired(&mut self) {
        self.chain_pending = self.chain_pending.saturating_sub(1);
    }

    /// Screen is clear: queue the next batch if nothing else will.
    /// Returns the delay to schedule it after.
    pub fn on_clear(&mut self) -> Option<f32> {
        // Idle: the opening batch is owned by `start`
        if matches!(self.state, DirectorState::Idle | DirectorState::Ended)
            || self.next_queued
            || self.chain_pending > 0
        {
            return None;
        }
        self.next_queued = true;
        self.state = DirectorState::WaitingForClear;
        Some(self.difficulty.popup_delay)
    }

    pub fn end(&mut self) {
        self.state = DirectorState::Ended;
    }

    pub fn state(&self) -> DirectorState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn next_queued(&self) -> bool {
        self.next_queued
    }

    pub fn chain_pending(&self) -> u32 {
        self.chain_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn director(seed: u64) -> SequenceDirector {
        SequenceDirector::new(&Tuning::default(), &mut GameRng::new(seed))
    }

    #[test]
    fn test_sequence_layout() {
        let seq = Sequence::generate(&mut GameRng::new(3));
        assert_eq!(seq.len(), SEQUENCE_LEN);
        assert_eq!(&seq.steps()[..CURATED_STEPS], &SequenceStep::CURATED);
        assert!(seq.steps()[CURATED_STEPS..]
            .iter()
            .all(|s| SequenceStep::TAIL.contains(s)));
    }

    #[test]
    fn test_tail_covers_every_variant() {
        let seq = Sequence::generate(&mut GameRng::new(11));
        for variant in SequenceStep::TAIL {
            assert!(seq.steps()[CURATED_STEPS..].contains(&variant), "{variant:?} never drawn");
        }
    }

    #[test]
    fn test_step_spawn_tables() {
        assert_eq!(SequenceStep::OneSafe.immediate_spawns(), vec![ForceBomb::Never]);
        assert_eq!(
            SequenceStep::TwoWithOneBomb.immediate_spawns(),
            vec![ForceBomb::Never, ForceBomb::Always]
        );
        assert_eq!(SequenceStep::Four.immediate_spawns().len(), 4);
        assert_eq!(SequenceStep::Chain.immediate_spawns().len(), 1);
        assert!(SequenceStep::Three.deferred_offsets(3.0).is_empty());
    }

    #[test]
    fn test_chain_offsets() {
        let d = 2.5;
        let offsets = SequenceStep::Chain.deferred_offsets(d);
        let expected = [d / 5.0, 2.0 * d / 5.0, 3.0 * d / 5.0, 4.0 * d / 5.0];
        assert_eq!(offsets.len(), 4);
        for (got, want) in offsets.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5);
        }

        let fast = SequenceStep::FastChain.deferred_offsets(d);
        assert!((fast[0] - d / 10.0).abs() < 1e-5);
        assert!((fast[3] - 4.0 * d / 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_curated_opening_batches() {
        let mut dir = director(1);
        assert_eq!(dir.state(), DirectorState::Idle);
        assert_eq!(dir.start(), 2.0);

        let first = dir.issue_batch().unwrap();
        assert_eq!(first.step, SequenceStep::OneSafe);
        assert_eq!(first.index, 0);
        assert_eq!(dir.cursor(), 1);
        assert_eq!(dir.state(), DirectorState::BatchInFlight);
        assert!(!dir.next_queued());

        for _ in 0..5 {
            dir.issue_batch();
        }
        let chain = dir.issue_batch().unwrap();
        assert_eq!(chain.step, SequenceStep::Chain);
        assert_eq!(chain.immediate.len(), 1);
        assert_eq!(chain.deferred.len(), 4);
        let d = dir.difficulty().chain_delay;
        assert!((chain.deferred[0].0 - d / 5.0).abs() < 1e-5);
        assert_eq!(dir.chain_pending(), 4);
    }

    #[test]
    fn test_first_batch_ramps_difficulty() {
        let mut dir = director(1);
        dir.issue_batch();
        let d = dir.difficulty();
        assert!((d.popup_delay - 0.9 * 0.991).abs() < 1e-6);
        assert!((d.chain_delay - 3.0 * 0.99).abs() < 1e-6);
        assert!((d.simulation_speed - 0.85 * 1.02).abs() < 1e-6);
    }

    #[test]
    fn test_on_clear_queues_once() {
        let mut dir = director(1);
        dir.issue_batch();
        assert_eq!(dir.on_clear(), Some(dir.difficulty().popup_delay));
        assert_eq!(dir.state(), DirectorState::WaitingForClear);
        assert_eq!(dir.on_clear(), None);
        dir.issue_batch();
        assert!(dir.on_clear().is_some());
    }

    #[test]
    fn test_on_clear_waits_for_chain_tail() {
        let mut dir = director(1);
        for _ in 0..7 {
            dir.issue_batch();
        }
        assert_eq!(dir.chain_pending(), 4);
        for _ in 0..3 {
            dir.chain_spawn_fired();
            assert_eq!(dir.on_clear(), None);
        }
        dir.chain_spawn_fired();
        assert!(dir.on_clear().is_some());
    }

    #[test]
    fn test_ended_director_is_inert() {
        let mut dir = director(1);
        dir.issue_batch();
        let before = dir.difficulty();
        dir.end();
        assert!(dir.issue_batch().is_none());
        assert!(dir.on_clear().is_none());
        assert_eq!(dir.difficulty(), before);
        assert_eq!(dir.cursor(), 1);
        assert_eq!(dir.state(), DirectorState::Ended);
    }

    #[test]
    fn test_cursor_stops_at_sequence_end() {
        let mut dir = director(5);
        let last = *dir.sequence().steps().last().unwrap();
        for _ in 0..SEQUENCE_LEN {
            dir.issue_batch();
        }
        assert_eq!(dir.cursor(), SEQUENCE_LEN);
        let extra = dir.issue_batch().unwrap();
        assert_eq!(extra.step, last);
        assert_eq!(extra.index, SEQUENCE_LEN - 1);
        assert_eq!(dir.cursor(), SEQUENCE_LEN);
    }

    #[test]
    fn test_ramp_settles_at_limits() {
        let tuning = Tuning::default();
        let mut d = Difficulty::from_tuning(&tuning);
        for _ in 0..10_000 {
            let prev = d;
            d.ramp(&tuning);
            assert!(d.popup_delay <= prev.popup_delay);
            assert!(d.chain_delay <= prev.chain_delay);
            assert!(d.simulation_speed >= prev.simulation_speed);
            assert!(d.simulation_speed.is_finite());
        }
        assert_eq!(d.popup_delay, MIN_DELAY);
        assert_eq!(d.chain_delay, MIN_DELAY);
        assert_eq!(d.simulation_speed, MAX_SIMULATION_SPEED);
    }

    proptest! {
        #[test]
        fn prop_difficulty_strictly_monotonic(seed in any::<u64>(), batches in 1usize..200) {
            let mut dir = director(seed);
            let mut prev = dir.difficulty();
            let mut prev_cursor = dir.cursor();
            for _ in 0..batches {
                dir.issue_batch();
                let d = dir.difficulty();
                prop_assert!(d.popup_delay < prev.popup_delay);
                prop_assert!(d.chain_delay < prev.chain_delay);
                prop_assert!(d.simulation_speed > prev.simulation_speed);
                prop_assert!(dir.cursor() >= prev_cursor);
                prop_assert!(dir.cursor() <= SEQUENCE_LEN);
                prev = d;
                prev_cursor = dir.cursor();
            }
        }
    }
}
