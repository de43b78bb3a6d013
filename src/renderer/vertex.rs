//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::Rgba;

/// Flat-shaded 2D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Canvas pixels until the backend maps them to clip space
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Map canvas pixels (origin top-left, y down) to clip space
    pub fn to_clip(self, width: f32, height: f32) -> Self {
        Self::new(
            self.position[0] / width * 2.0 - 1.0,
            1.0 - self.position[1] / height * 2.0,
            self.color,
        )
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::Rgba;

    pub const BACKGROUND: Rgba = [0.02, 0.02, 0.05, 1.0];
    /// #0095DD
    pub const BALL: Rgba = [0.0, 0.584, 0.867, 1.0];
    pub const PADDLE: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const TEXT: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const TITLE: Rgba = [0.0, 1.0, 1.0, 1.0];
    pub const GAME_OVER: Rgba = [1.0, 0.0, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_clip_corners() {
        let c = [1.0; 4];
        assert_eq!(Vertex::new(0.0, 0.0, c).to_clip(480.0, 320.0).position, [-1.0, 1.0]);
        assert_eq!(Vertex::new(480.0, 320.0, c).to_clip(480.0, 320.0).position, [1.0, -1.0]);
        assert_eq!(Vertex::new(240.0, 160.0, c).to_clip(480.0, 320.0).position, [0.0, 0.0]);
    }

    #[test]
    fn test_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
