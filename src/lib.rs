//! Penguin Slice - a swipe-to-slice arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (sequencer, spawner, gestures, hit resolution)
//! - `platform`: Collaborator contracts and the headless reference world
//! - `renderer`: Slice stroke vertex generation
//! - `audio`: Sound clip catalogue and audio contract
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use audio::{AudioOut, Clip, LoopId, SilentAudio};
pub use platform::{HeadlessWorld, RenderWorld};
pub use sim::{EndCause, GameEvent, GameSession, SessionSnapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed frame timestep (60 Hz frame callback)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Scene dimensions (origin bottom-left, y up)
    pub const SCENE_WIDTH: f32 = 1024.0;
    pub const SCENE_HEIGHT: f32 = 768.0;

    /// Enemies launch from just below the visible area
    pub const SPAWN_Y: f32 = -128.0;
    pub const SPAWN_X_MIN: i32 = 64;
    pub const SPAWN_X_MAX: i32 = 960;
    /// Enemies below this height are culled as misses
    pub const CULL_Y: f32 = -140.0;
    /// Kinematic draws are in "launch units", scaled to points/second
    pub const VELOCITY_SCALE: f32 = 40.0;
    /// Physics body radius used for hit-testing
    pub const ENEMY_RADIUS: f32 = 64.0;
    /// Fuse emitter anchor relative to the bomb container
    pub const FUSE_ANCHOR: (f32, f32) = (76.0, 64.0);

    /// Slice trail length cap
    pub const MAX_SLICE_POINTS: usize = 12;
    /// Slice fade after the finger lifts (seconds)
    pub const SLICE_FADE_SECS: f32 = 0.25;
    /// Scale+fade before a sliced enemy leaves the world (seconds)
    pub const SLICE_AWAY_SECS: f32 = 0.2;
    /// Life indicator pulse back to rest scale (seconds)
    pub const LIFE_PULSE_SECS: f32 = 0.1;
    pub const LIFE_PULSE_SCALE: f32 = 1.3;

    /// Player lives
    pub const STARTING_LIVES: u8 = 3;

    /// Sequence layout
    pub const CURATED_STEPS: usize = 7;
    pub const GENERATED_STEPS: usize = 1000;
    pub const SEQUENCE_LEN: usize = CURATED_STEPS + GENERATED_STEPS;
    /// Chains launch their tail in this many equal slices of the chain delay
    pub const CHAIN_SLICES: u32 = 5;

    /// Points per meter used to convert physics gravity (m/s²) to scene units
    pub const POINTS_PER_METER: f32 = 150.0;
}
