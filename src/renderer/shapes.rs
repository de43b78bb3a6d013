//! Triangle tessellation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{DrawCommand, DrawList};
use crate::Rgba;

/// Segments used for circles of this radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5) as u32).clamp(8, 48)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: Rgba) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
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

/// Triangles for every shape in the list, in draw order. Text is skipped.
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in list.commands() {
        match command {
            DrawCommand::Rect { pos, size, color } => vertices.extend(rect(*pos, *size, *color)),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, circle_segments(*radius))),
            DrawCommand::Clear(_) | DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Painter, TextAlign, TextStyle};

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(30.0, 30.0), Vec2::new(75.0, 20.0), RED);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 30.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 105.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 30.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 50.0);
    }

    #[test]
    fn test_circle_on_radius() {
        let center = Vec2::new(100.0, 100.0);
        let v = circle(center, 10.0, RED, 16);
        assert_eq!(v.len(), 48);
        for tri in v.chunks(3) {
            let edge = Vec2::from(tri[1].position);
            assert!((edge.distance(center) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_tessellate_skips_text() {
        let mut list = DrawList::new();
        list.clear([0.0; 4]);
        list.fill_rect(Vec2::ZERO, Vec2::ONE, RED);
        list.fill_circle(Vec2::ZERO, 10.0, RED);
        list.text(
            "hi",
            Vec2::ZERO,
            TextStyle {
                size: 16.0,
                align: TextAlign::Left,
                color: RED,
            },
        );
        assert_eq!(tessellate(&list).len(), 6 + 3 * circle_segments(10.0) as usize);
    }
}
