//! Session scoreboard and lifecycle state

use serde::{Deserialize, Serialize};

use super::entity::{EnemyKind, EntityId};
use super::sequence::{Difficulty, DirectorState, SequenceStep};
use crate::consts::STARTING_LIVES;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Ran out of lives
    Miss,
    /// Sliced a bomb
    Bomb,
}

impl EndCause {
    /// Terminal banner text
    pub fn message(&self) -> &'static str {
        match self {
            EndCause::Miss => "You lost!",
            EndCause::Bomb => "Kaboom!",
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Ended(EndCause),
}

/// Score, lives and the life indicator row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// One flag per life indicator, left to right
    pub lives_lost: [bool; STARTING_LIVES as usize],
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Running,
            lives_lost: [false; STARTING_LIVES as usize],
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        match self.phase {
            GamePhase::Ended(cause) => Some(cause),
            GamePhase::Running => None,
        }
    }

    pub fn add_point(&mut self) {
        self.score += 1;
    }

    /// Take one life. Returns the indicator that goes dark, or `None` when
    /// there was nothing left to take.
    pub fn lose_life(&mut self) -> Option<usize> {
        if self.lives == 0 {
            return None;
        }
        self.lives -= 1;
        let index = (STARTING_LIVES - self.lives - 1) as usize;
        self.lives_lost[index] = true;
        Some(index)
    }

    /// First end wins; later calls return false
    pub fn end(&mut self, cause: EndCause) -> bool {
        if self.is_ended() {
            return false;
        }
        self.phase = GamePhase::Ended(cause);
        if cause == EndCause::Bomb {
            self.lives_lost = [true; STARTING_LIVES as usize];
        }
        true
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

/// Gameplay events emitted during a frame, for hosts and tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BatchIssued { index: usize, step: SequenceStep },
    Spawned { id: EntityId, kind: EnemyKind },
    Sliced { id: EntityId, kind: EnemyKind },
    /// Fell off the bottom unsliced
    Missed { id: EntityId, kind: EnemyKind },
    LifeLost { lives: u8 },
    Ended { cause: EndCause, score: u64 },
}

/// Serializable summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub elapsed: f64,
    pub state: SessionState,
    pub director: DirectorState,
    pub cursor: usize,
    pub difficulty: Difficulty,
    pub active: usize,
}
