//! Shape generation for the blade trail

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{SLICE_CORE_WIDTH, SLICE_GLOW_WIDTH, Vertex, colors};

/// Segments used for the round caps/joints of a stroke
const JOINT_SEGMENTS: u32 = 8;

/// Generate vertices for a polyline stroke of constant width.
///
/// Fewer than two points draws nothing (a single tap leaves no trail).
pub fn slice_stroke(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices =
        Vec::with_capacity((points.len() - 1) * 6 + points.len() * JOINT_SEGMENTS as usize * 3);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);

        // Direction from p1 to p2
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    // Round every joint so sharp turns don't crack open
    for &p in points {
        vertices.extend(circle(p, half, color, JOINT_SEGMENTS));
    }

    vertices
}

/// Both trail layers (glow under core) with a shared opacity
pub fn slice_trail(points: &[Vec2], alpha: f32) -> Vec<Vertex> {
    let alpha = alpha.clamp(0.0, 1.0);
    let with_alpha = |c: [f32; 4]| [c[0], c[1], c[2], c[3] * alpha];

    let mut vertices = slice_stroke(points, SLICE_GLOW_WIDTH, with_alpha(colors::SLICE_GLOW));
    vertices.extend(slice_stroke(points, SLICE_CORE_WIDTH, with_alpha(colors::SLICE_CORE)));
    vertices
}

/// Generate vertices for a filled circle
fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_draws_nothing() {
        assert!(slice_stroke(&[Vec2::new(10.0, 10.0)], 5.0, colors::SLICE_CORE).is_empty());
        assert!(slice_trail(&[], 1.0).is_empty());
    }

    #[test]
    fn test_stroke_width() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
        let verts = slice_stroke(&points, 10.0, colors::SLICE_CORE);
        // One quad plus two round joints
        assert_eq!(verts.len(), 6 + 2 * JOINT_SEGMENTS as usize * 3);
        // Quad corners sit half a width off the centerline
        assert!((verts[0].position[1] - 5.0).abs() < 1e-4);
        assert!((verts[1].position[1] + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_trail_layers_and_alpha() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 50.0), Vec2::new(30.0, 80.0)];
        let verts = slice_trail(&points, 0.5);
        let layer = slice_stroke(&points, SLICE_GLOW_WIDTH, colors::SLICE_GLOW).len();
        assert_eq!(verts.len(), layer * 2);
        assert!(verts.iter().all(|v| (v.color[3] - 0.5).abs() < 1e-6));
        // Glow first, core last
        assert_eq!(verts[0].color[2], 0.0);
        assert_eq!(verts.last().unwrap().color[2], 1.0);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        let verts = slice_trail(&points, 1.0);
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), verts.len() * Vertex::STRIDE);
    }
}
