//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only through the task scheduler
//! - Stable iteration order (launch order)
//! - Rendering, physics and audio only through the collaborator traits

pub mod entity;
pub mod gesture;
pub mod resolver;
pub mod rng;
pub mod scheduler;
pub mod sequence;
pub mod session;
pub mod spawner;
pub mod state;

pub use entity::{ActiveEntitySet, EnemyKind, Entity, EntityId, ForceBomb};
pub use gesture::{GestureTracker, SlicePath};
pub use rng::GameRng;
pub use scheduler::{Scheduler, Task};
pub use sequence::{Batch, Difficulty, DirectorState, Sequence, SequenceDirector, SequenceStep};
pub use session::GameSession;
pub use spawner::EntitySpawner;
pub use state::{EndCause, GameEvent, GamePhase, SessionSnapshot, SessionState};
