//! Diffuse texture on the GPU: mipmapped 2D texture + sampler + bind group.

use asset::TextureData;
use wgpu::{
    AddressMode, BindGroup, BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry,
    BindingType, Device, Extent3d, FilterMode, Queue, RenderPass, SamplerBindingType,
    SamplerDescriptor, ShaderStages, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture,
    TextureAspect, TextureDescriptor, TextureDimension, TextureFormat, TextureSampleType,
    TextureUsages, TextureViewDimension,
};

pub const DIFFUSE_FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

/// The bind group keeps the view and sampler alive; the texture handle is
/// held so the GPU allocation lives as long as this value.
pub struct GpuTexture {
    _texture: Texture,
    bind_group: BindGroup,
    mip_level_count: u32,
}

impl GpuTexture {
    /// Layout of the texture bind group: binding 0 = texture, 1 = sampler.
    pub fn bind_group_layout(device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Diffuse BGL"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        multisampled: false,
                        view_dimension: TextureViewDimension::D2,
                        sample_type: TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Clamp to edge, bilinear within a level, nearest level selection.
    pub fn sampler_descriptor() -> SamplerDescriptor<'static> {
        SamplerDescriptor {
            label: Some("Diffuse Sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Nearest,
            ..Default::default()
        }
    }

    /// Upload `image` with its full mip chain. The CPU pixels are dropped
    /// as soon as the copies are queued.
    pub fn upload(
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        label: &str,
        image: TextureData,
    ) -> Self {
        let size = Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let levels = image.into_mip_chain();
        let mip_level_count = levels.len() as u32;

        let texture = device.create_texture(&TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: DIFFUSE_FORMAT,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            queue.write_texture(
                TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: TextureAspect::All,
                },
                &level.data,
                TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.width * level.bytes_per_pixel()),
                    rows_per_image: Some(level.height),
                },
                Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }
        drop(levels);
        log::debug!(
            "Uploaded texture '{label}' {}x{} with {mip_level_count} mip levels",
            size.width,
            size.height
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&Self::sampler_descriptor());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            bind_group,
            mip_level_count,
        }
    }

    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }

    /// Bind the texture to bind group `slot` for the following draws.
    pub fn bind(&self, rpass: &mut RenderPass<'_>, slot: u32) {
        rpass.set_bind_group(slot, &self.bind_group, &[]);
    }
}
