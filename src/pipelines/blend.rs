use crate::{
    camera::CameraUniform,
    data_structures::vertex::{BlendVertex, Vertex},
};

/// WGSL source of both stages.
pub const SHADER_SOURCE: &str = include_str!("blend.wgsl");
pub const VS_ENTRY: &str = "vs_main";
pub const FS_ENTRY: &str = "fs_main";

/// Bind group index of the `image` texture and sampler.
pub const IMAGE_GROUP: u32 = 0;
/// Bind group index of the camera uniform.
pub const CAMERA_GROUP: u32 = 1;

pub fn shader_descriptor() -> wgpu::ShaderModuleDescriptor<'static> {
    wgpu::ShaderModuleDescriptor {
        label: Some("Blend Shader"),
        source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
    }
}

/// Texture at binding 0 and its sampler at binding 1, read by the fragment stage.
pub fn image_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("image_bind_group_layout"),
    })
}

/// The `cam_matrix` uniform, read by the vertex stage.
pub fn camera_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(
                    std::mem::size_of::<CameraUniform>() as u64
                ),
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

/// Everything needed to draw with the blend shader.
#[derive(Debug)]
pub struct BlendPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub image_layout: wgpu::BindGroupLayout,
    pub camera_layout: wgpu::BindGroupLayout,
}

pub fn mk_blend_pipeline(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> BlendPipeline {
    let image_layout = image_layout(device);
    let camera_layout = camera_layout(device);
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Blend Pipeline Layout"),
        bind_group_layouts: &[&image_layout, &camera_layout],
        immediate_size: 0,
    });

    let pipeline = mk_render_pipeline(
        device,
        "Blend Render Pipeline",
        &render_pipeline_layout,
        color_format,
        Some(wgpu::BlendState::REPLACE),
        &[BlendVertex::desc()],
        shader_descriptor(),
        VS_ENTRY,
        FS_ENTRY,
    );
    log::debug!("created blend pipeline for {:?}", color_format);

    BlendPipeline {
        pipeline,
        image_layout,
        camera_layout,
    }
}

/// Build a triangle-list pipeline with back-face culling and no depth from
/// the `vs_entry` / `fs_entry` stages of `shader`.
#[allow(clippy::too_many_arguments)]
pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
    vs_entry: &str,
    fs_entry: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(vs_entry),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
