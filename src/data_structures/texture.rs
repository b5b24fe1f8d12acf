//! GPU textures bound to the blend shader's `image` slot.
//!
//! This module provides [`Texture`], a wrapper around a WGPU texture, its view
//! and the sampler the fragment stage reads it with. Textures are created from
//! encoded image bytes, decoded images, or a solid colour.

use anyhow::{Context, Result};
use image::{GenericImageView, ImageFormat, load_from_memory_with_format};

/// A GPU texture with a view and sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Load a texture from raw byte data (image file contents).
    ///
    /// # Arguments
    ///
    /// * `bytes` represent raw image file data (PNG, JPEG, etc.)
    /// * `label` is used as a debug name for the GPU resource
    /// * `format` is an optional file extension hint (e.g., "png"). If None, auto-detect.
    /// * `srgb` stores the texels as sRGB so sampling returns linear values
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
        format: Option<&str>,
        srgb: bool,
    ) -> Result<Self> {
        let img = match format {
            None => image::load_from_memory(bytes)
                .with_context(|| format!("failed to decode texture {label}"))?,
            Some(fmt) => {
                let fmt = ImageFormat::from_extension(fmt)
                    .with_context(|| format!("unknown image format hint {fmt:?} for {label}"))?;
                load_from_memory_with_format(bytes, fmt)
                    .with_context(|| format!("failed to decode texture {label}"))?
            }
        };
        Self::from_image(device, queue, &img, Some(label), srgb)
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
        srgb: bool,
    ) -> Result<Self> {
        let dimensions = img.dimensions();
        anyhow::ensure!(
            dimensions.0 > 0 && dimensions.1 > 0,
            "texture {} has zero size",
            label.unwrap_or("<unnamed>")
        );
        let rgba = img.to_rgba8();
        let format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        Ok(Self::from_rgba(device, queue, &rgba, dimensions, format, label))
    }

    /// Create a `width` x `height` texture filled with one RGBA colour.
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: [u8; 4],
        width: u32,
        height: u32,
    ) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "solid texture has zero size");
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Ok(Self::from_rgba(
            device,
            queue,
            &data,
            (width, height),
            wgpu::TextureFormat::Rgba8Unorm,
            Some("solid colour texture"),
        ))
    }

    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        dimensions: (u32, u32),
        format: wgpu::TextureFormat,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_default_sampler(device);
        log::debug!(
            "uploaded {}x{} texture {}",
            dimensions.0,
            dimensions.1,
            label.unwrap_or("<unnamed>")
        );

        Self {
            texture,
            view,
            sampler,
            size: dimensions,
        }
    }
}

/// Repeat addressing with linear filtering, as used for the `image` slot.
pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    })
}
