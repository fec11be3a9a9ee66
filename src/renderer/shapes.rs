//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in court pixels (y down).

use glam::Vec2;

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            min,
            Vec2::new(min.x + size.x, min.y),
            Vec2::new(min.x, min.y + size.y),
            min + size,
        ],
        color,
    );
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    circle_sector(center, radius, 0.0, 360.0, color, segments)
}

/// Generate vertices for a pie slice between two angles in degrees
pub fn circle_sector(
    center: Vec2,
    radius: f32,
    start_deg: f32,
    end_deg: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(1);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let start = start_deg.to_radians();
    let span = (end_deg - start_deg).to_radians();

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

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

/// Generate vertices for a rectangle with rounded corners
///
/// `roundness` in [0, 1] scales the corner radius up to half the shorter side.
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    roundness: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let r = roundness.clamp(0.0, 1.0) * size.x.min(size.y) / 2.0;
    if r <= 0.0 {
        return rect(min, size, color);
    }

    let max = min + size;
    // Vertical band plus the two side bands between the corners
    let mut vertices = rect(
        Vec2::new(min.x + r, min.y),
        Vec2::new(size.x - 2.0 * r, size.y),
        color,
    );
    vertices.extend(rect(
        Vec2::new(min.x, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(max.x - r, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));

    let corners = [
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), 90.0),
        (Vec2::new(min.x + r, min.y + r), 180.0),
        (Vec2::new(max.x - r, min.y + r), 270.0),
    ];
    for (center, start) in corners {
        vertices.extend(circle_sector(
            center,
            r,
            start,
            start + 90.0,
            color,
            corner_segments,
        ));
    }

    vertices
}

/// Generate vertices for a straight line of the given thickness
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [from + perp, from - perp, to + perp, to - perp],
        color,
    );
    vertices
}
