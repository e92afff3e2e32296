//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Size of one vertex in a GPU buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    /// Outer glow of the blade trail
    pub const SLICE_GLOW: [f32; 4] = [1.0, 0.9, 0.0, 1.0];
    /// Hot core of the blade trail
    pub const SLICE_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Blade trail line widths (glow is drawn first, core on top)
pub const SLICE_GLOW_WIDTH: f32 = 9.0;
pub const SLICE_CORE_WIDTH: f32 = 5.0;
