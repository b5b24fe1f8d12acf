use std::iter;

use anyhow::{Context as _, ensure};

use crate::{
    camera::CameraUniform,
    data_structures::{mesh::Mesh, texture::Texture},
    pipelines::blend::{self, BlendPipeline},
    resources::{CameraResources, ImageBinding, MeshBuffers},
};

/// WGPU requires buffer rows copied out of textures to be padded to this.
const COPY_ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

/// Target formats whose texels read back byte for byte as `image::Rgba<u8>`.
pub const SUPPORTED_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Settings for the offscreen target and adapter selection.
#[derive(Clone, Debug)]
pub struct ContextConfig {
    pub width: u32,
    pub height: u32,
    /// One of [`SUPPORTED_FORMATS`].
    pub format: wgpu::TextureFormat,
    pub clear_colour: wgpu::Color,
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            format: wgpu::TextureFormat::Rgba8Unorm,
            clear_colour: wgpu::Color::BLACK,
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::default(),
        }
    }
}

impl ContextConfig {
    /// Check the target size against `max_dimension` and the format against
    /// [`SUPPORTED_FORMATS`].
    pub fn validate(&self, max_dimension: u32) -> anyhow::Result<()> {
        check_size(self.width, self.height, max_dimension)?;
        ensure!(
            SUPPORTED_FORMATS.contains(&self.format),
            "unsupported target format {:?}, expected one of {:?}",
            self.format,
            SUPPORTED_FORMATS
        );
        Ok(())
    }
}

fn check_size(width: u32, height: u32, max_dimension: u32) -> anyhow::Result<()> {
    ensure!(
        width > 0 && height > 0,
        "render target must not be empty, got {width}x{height}"
    );
    ensure!(
        width <= max_dimension && height <= max_dimension,
        "render target {width}x{height} exceeds the device limit of {max_dimension}"
    );
    Ok(())
}

/// Device, queue and blend pipeline rendering into an offscreen texture.
#[derive(Debug)]
pub struct Context {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: ContextConfig,
    pub pipeline: BlendPipeline,
    target: wgpu::Texture,
}

impl Context {
    pub async fn new(config: ContextConfig) -> anyhow::Result<Self> {
        let limits = wgpu::Limits::downlevel_defaults();
        config.validate(limits.max_texture_dimension_2d)?;

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("texblend device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let pipeline = blend::mk_blend_pipeline(&device, config.format);
        let target = create_target(&device, &config);

        Ok(Self {
            device,
            queue,
            config,
            pipeline,
            target,
        })
    }

    /// Upload `mesh` into vertex and index buffers.
    pub fn upload_mesh(&self, mesh: &Mesh, label: &str) -> MeshBuffers {
        MeshBuffers::new(&self.device, mesh, label)
    }

    /// Bind `texture` to the shader's `image` slot.
    pub fn bind_image(&self, texture: Texture) -> ImageBinding {
        ImageBinding::new(&self.device, &self.pipeline.image_layout, texture)
    }

    pub fn camera(&self, uniform: CameraUniform) -> CameraResources {
        CameraResources::new(&self.device, &self.pipeline.camera_layout, uniform)
    }

    /// Resize the offscreen target. Zero sizes and sizes beyond the device
    /// limit are rejected.
    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        check_size(width, height, self.device.limits().max_texture_dimension_2d)?;
        self.config.width = width;
        self.config.height = height;
        self.target = create_target(&self.device, &self.config);
        Ok(())
    }

    /// Clear the target, draw `mesh` with the blend shader and read the
    /// result back.
    pub fn draw(
        &self,
        mesh: &MeshBuffers,
        binding: &ImageBinding,
        camera: &CameraResources,
    ) -> anyhow::Result<image::RgbaImage> {
        let view = self
            .target
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blend Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blend Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.config.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            if mesh.is_empty() {
                log::warn!("you attempted to draw a mesh without indices");
            } else {
                render_pass.set_pipeline(&self.pipeline.pipeline);
                render_pass.set_bind_group(blend::IMAGE_GROUP, &binding.bind_group, &[]);
                render_pass.set_bind_group(blend::CAMERA_GROUP, &camera.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex.slice(..));
                render_pass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        let (width, height) = (self.config.width, self.config.height);
        let padded_row = padded_bytes_per_row(width);
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Readback Buffer"),
            size: padded_row as wgpu::BufferAddress * height as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST
                // this tells wgpu that we want to read this buffer from the cpu
                | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            target_extent(&self.config),
        );

        self.queue.submit(iter::once(encoder.finish()));
        futures::executor::block_on(read_target(&self.device, &output_buffer, width, height))
    }
}

fn create_target(device: &wgpu::Device, config: &ContextConfig) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Target"),
        size: target_extent(config),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

fn target_extent(config: &ContextConfig) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: config.width,
        height: config.height,
        depth_or_array_layers: 1,
    }
}

pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    unpadded.div_ceil(COPY_ROW_ALIGNMENT) * COPY_ROW_ALIGNMENT
}

async fn read_target(
    device: &wgpu::Device,
    buffer: &wgpu::Buffer,
    width: u32,
    height: u32,
) -> anyhow::Result<image::RgbaImage> {
    // NOTE: We have to create the mapping THEN device.poll() before await
    // the future. Otherwise the application will freeze.
    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: None,
        })
        .context("failed to wait for the readback copy")?;
    rx.receive()
        .await
        .context("readback channel closed")?
        .context("failed to map the readback buffer")?;

    let padded_row = padded_bytes_per_row(width) as usize;
    let row = width as usize * 4;
    let pixels = {
        let data = buffer_slice.get_mapped_range();
        data.chunks_exact(padded_row)
            .flat_map(|chunk| chunk[..row].iter().copied())
            .collect::<Vec<u8>>()
    };
    buffer.unmap();

    image::RgbaImage::from_raw(width, height, pixels)
        .context("readback size does not match the target")
}
