use crate::data_structures::texture::Texture;

/// A [`Texture`] together with the bind group that exposes it as `image`.
#[derive(Debug)]
pub struct ImageBinding {
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl ImageBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, texture: Texture) -> Self {
        let bind_group = mk_image_bind_group(device, layout, &texture);
        Self {
            texture,
            bind_group,
        }
    }
}

pub fn mk_image_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some("image_bind_group"),
    })
}
