//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// 8-bit RGBA to normalized color
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgba8;

    /// Left half of the court and clear color
    pub const COURT_DARK: [f32; 4] = rgba8(20, 160, 133, 255);
    /// Right half of the court
    pub const COURT: [f32; 4] = rgba8(38, 185, 154, 255);
    pub const CENTER_CIRCLE: [f32; 4] = rgba8(129, 204, 184, 255);
    pub const NET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PADDLE: [f32; 4] = rgba8(230, 41, 55, 255);
    pub const BALL_STRIPE_A: [f32; 4] = rgba8(127, 106, 79, 255);
    pub const BALL_STRIPE_B: [f32; 4] = rgba8(255, 161, 0, 255);
}
