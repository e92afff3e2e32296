//! Slice trail rendering data
//!
//! Turns the gesture polyline into triangle lists a GPU host can upload as-is.

pub mod shapes;
pub mod vertex;

pub use shapes::{slice_stroke, slice_trail};
pub use vertex::Vertex;
