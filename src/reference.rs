//! CPU evaluation of the blend shader.
//!
//! These functions compute what `vs_main` and `fs_main` compute, so GPU
//! output can be checked against them and hosts can predict colours without
//! a device. [`shade`] samples the way the default `image` sampler does:
//! bilinear filtering with repeat addressing on an `Rgba8Unorm` texture. GPUs
//! filter with reduced weight precision, so expect a few units of difference
//! per 8 bit channel on non-uniform textures.

use anyhow::ensure;
use cgmath::{Matrix4, Vector4};

use crate::data_structures::vertex::BlendVertex;

/// Outputs of the vertex stage for one vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexOutput {
    pub clip_position: [f32; 4],
    pub tex_coords: [f32; 2],
    pub color: [f32; 3],
}

/// `cam_matrix * vec4(position, 1.0)`, with uv and colour passed through.
pub fn vertex_stage(vertex: &BlendVertex, cam_matrix: &Matrix4<f32>) -> VertexOutput {
    let [x, y, z] = vertex.position;
    let clip = *cam_matrix * Vector4::new(x, y, z, 1.0);
    VertexOutput {
        clip_position: clip.into(),
        tex_coords: vertex.tex_coords,
        color: vertex.color,
    }
}

/// `(texel + vec4(color, 1.0)) / 2.0`, componentwise.
pub fn fragment_stage(texel: [f32; 4], color: [f32; 3]) -> [f32; 4] {
    let tinted = [color[0], color[1], color[2], 1.0];
    std::array::from_fn(|i| (texel[i] + tinted[i]) / 2.0)
}

/// Nearest-texel lookup with repeat addressing, channels scaled to 0..1.
/// Matches a sampler with `FilterMode::Nearest`.
///
/// uv (0,0) is the first texel of the first row, matching WGPU's texture
/// coordinate convention.
pub fn sample_nearest(image: &image::RgbaImage, uv: [f32; 2]) -> anyhow::Result<[f32; 4]> {
    let (width, height) = image.dimensions();
    ensure!(width > 0 && height > 0, "cannot sample an empty image");
    let wrap = |t: f32, size: u32| -> u32 {
        let t = t - t.floor();
        ((t * size as f32) as u32).min(size - 1)
    };
    let pixel = image.get_pixel(wrap(uv[0], width), wrap(uv[1], height));
    Ok(pixel.0.map(|c| c as f32 / 255.0))
}

/// Bilinear lookup with repeat addressing, channels scaled to 0..1.
///
/// Texel centres sit at `(i + 0.5) / size`; between centres the four
/// neighbouring texels are weighted by distance, wrapping across edges.
pub fn sample_linear(image: &image::RgbaImage, uv: [f32; 2]) -> anyhow::Result<[f32; 4]> {
    let (width, height) = image.dimensions();
    ensure!(width > 0 && height > 0, "cannot sample an empty image");
    let split = |t: f32, size: u32| -> (u32, u32, f32) {
        let coord = t * size as f32 - 0.5;
        let base = coord.floor();
        let i0 = (base as i64).rem_euclid(size as i64) as u32;
        let i1 = (i0 + 1) % size;
        (i0, i1, coord - base)
    };
    let (x0, x1, fx) = split(uv[0], width);
    let (y0, y1, fy) = split(uv[1], height);
    let texel = |x: u32, y: u32| image.get_pixel(x, y).0.map(|c| c as f32 / 255.0);
    let (t00, t10, t01, t11) = (texel(x0, y0), texel(x1, y0), texel(x0, y1), texel(x1, y1));
    Ok(std::array::from_fn(|i| {
        let top = t00[i] * (1.0 - fx) + t10[i] * fx;
        let bottom = t01[i] * (1.0 - fx) + t11[i] * fx;
        top * (1.0 - fy) + bottom * fy
    }))
}

/// Sample `image` at the interpolated uv and blend with the vertex colour.
pub fn shade(image: &image::RgbaImage, input: &VertexOutput) -> anyhow::Result<[f32; 4]> {
    let texel = sample_linear(image, input.tex_coords)?;
    Ok(fragment_stage(texel, input.color))
}

/// Quantise a colour the way an `Rgba8Unorm` target stores it.
pub fn to_rgba8(color: [f32; 4]) -> image::Rgba<u8> {
    image::Rgba(color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
}
