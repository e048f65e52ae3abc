//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned rectangle with one color per corner (tl, tr, br, bl)
pub fn gradient_rect(min: Vec2, max: Vec2, corners: [[f32; 4]; 4]) -> [Vertex; 6] {
    let [tl, tr, br, bl] = corners;
    [
        Vertex::new(min.x, min.y, tl),
        Vertex::new(max.x, min.y, tr),
        Vertex::new(max.x, max.y, br),
        Vertex::new(min.x, min.y, tl),
        Vertex::new(max.x, max.y, br),
        Vertex::new(min.x, max.y, bl),
    ]
}

/// Solid axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    gradient_rect(min, max, [color; 4])
}

/// Square of side `size` centered on `center`
pub fn square(center: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    let half = Vec2::splat(size * 0.5);
    rect(center - half, center + half, color)
}

/// Thin line as a quad
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> [Vertex; 6] {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    [
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
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

/// Soft glow: opaque-ish center fading to transparent at `radius`
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let edge = [color[0], color[1], color[2], 0.0];
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = center + Vec2::new(theta1.cos(), theta1.sin()) * radius;
        let p2 = center + Vec2::new(theta2.cos(), theta2.sin()) * radius;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, edge));
        vertices.push(Vertex::new(p2.x, p2.y, edge));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::ZERO, 1.0, [1.0; 4], 12);
        assert_eq!(v.len(), 36);
        // Every rim vertex sits on the radius
        for rim in v.iter().filter(|v| v.position != [0.0, 0.0]) {
            let r = Vec2::from(rim.position).length();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_square_bounds() {
        let v = square(Vec2::new(2.5, 3.5), 1.0, [1.0; 4]);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 3.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 3.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 4.0);
    }

    #[test]
    fn test_glow_fades_to_transparent() {
        let v = glow(Vec2::ZERO, 2.0, [1.0, 0.0, 0.0, 0.4], 8);
        assert_eq!(v[0].color[3], 0.4);
        assert_eq!(v[1].color[3], 0.0);
        assert_eq!(v[2].color[3], 0.0);
    }
}
