//! Rendering module
//!
//! The scene is described through the [`Painter`] trait. [`DrawList`] records
//! the commands for a frame; the WebGPU backend tessellates the shapes and the
//! browser shell lays the text out in a DOM overlay.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::Rgba;

pub use pipeline::RenderState;
pub use scene::draw_scene;

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font and color for a text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in canvas pixels
    pub size: f32,
    pub align: TextAlign,
    pub color: Rgba,
}

/// Minimal drawing surface the scene is rendered to
pub trait Painter {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);
    /// Axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Text with its baseline at `pos.y`
    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// A recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Rect { pos: Vec2, size: Vec2, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Painter that records commands for later playback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Background color of the last clear, if any
    pub fn background(&self) -> Option<Rgba> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
    }

    /// Text runs in draw order
    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, pos, style } => Some((text.as_str(), *pos, style)),
            _ => None,
        })
    }
}

impl Painter for DrawList {
    fn clear(&mut self, color: Rgba) {
        // Anything drawn before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = [1.0; 4];

    #[test]
    fn test_clear_discards_earlier_commands() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, WHITE);
        list.clear([0.0, 0.0, 0.0, 1.0]);
        list.fill_circle(Vec2::ONE, 2.0, WHITE);

        assert_eq!(list.len(), 2);
        assert_eq!(list.background(), Some([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn test_texts_filter() {
        let mut list = DrawList::new();
        let style = TextStyle {
            size: 16.0,
            align: TextAlign::Left,
            color: WHITE,
        };
        list.fill_rect(Vec2::ZERO, Vec2::ONE, WHITE);
        list.text("Score: 0", Vec2::new(10.0, 20.0), style);

        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, "Score: 0");
        assert_eq!(texts[0].1, Vec2::new(10.0, 20.0));
    }
}
