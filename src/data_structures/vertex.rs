//! Vertex format consumed by the blend shader.
//!
//! The shader reads three attributes per vertex: position at location 0,
//! texture coordinates at location 1 and colour at location 2. [`BlendVertex`]
//! mirrors that layout byte for byte so vertex slices can be uploaded with
//! `bytemuck::cast_slice`.

use anyhow::ensure;

/// Types that can describe their own vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One vertex: position, texture coordinates and an RGB colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlendVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 3],
}

impl BlendVertex {
    /// Number of `f32` values one vertex occupies in an interleaved array.
    pub const FLOATS: usize = 8;

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x3,
    ];

    pub fn new(position: [f32; 3], tex_coords: [f32; 2], color: [f32; 3]) -> Self {
        Self {
            position,
            tex_coords,
            color,
        }
    }

    /// Decode an interleaved `[x, y, z, u, v, r, g, b, ...]` array.
    ///
    /// Fails when the length is not a multiple of [`Self::FLOATS`].
    pub fn from_interleaved(data: &[f32]) -> anyhow::Result<Vec<Self>> {
        ensure!(
            data.len() % Self::FLOATS == 0,
            "interleaved vertex data has {} floats, expected a multiple of {}",
            data.len(),
            Self::FLOATS
        );
        Ok(data
            .chunks_exact(Self::FLOATS)
            .map(|c| Self {
                position: [c[0], c[1], c[2]],
                tex_coords: [c[3], c[4]],
                color: [c[5], c[6], c[7]],
            })
            .collect())
    }
}

impl Vertex for BlendVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BlendVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
