//! Platform abstraction layer
//!
//! Handles the collaborator boundary:
//! - Render/physics world contract
//! - Headless ballistic world for the native runner and tests

pub mod headless;
pub mod world;

pub use headless::HeadlessWorld;
pub use world::{Effect, NodeHit, NodeTag, RenderWorld, VisualAction};
