//! Shader resource bindings, resolved once when the pipeline is built.
//!
//! Bind group 0 layout:
//! - binding 0: `Globals` uniform block (both variants)
//! - binding 1: `octree` uniform block (raymarch)
//! - binding 2: `colors` 1D texture (raymarch)
//! - binding 3: `colors_sampler` (raymarch)

use wgpu::util::DeviceExt;

use quadray_core::{Globals, OctreeBlock};

use crate::lookup::ColorLookup;

pub const GLOBALS_BINDING: u32 = 0;
pub const OCTREE_BINDING: u32 = 1;
pub const COLORS_BINDING: u32 = 2;
pub const COLORS_SAMPLER_BINDING: u32 = 3;

/// Resources only the raymarch variant binds.
struct SceneResources {
    octree_buffer: wgpu::Buffer,
    colors_view: wgpu::TextureView,
    colors_sampler: wgpu::Sampler,
}

impl SceneResources {
    fn new(device: &wgpu::Device, queue: &wgpu::Queue, lookup: &ColorLookup) -> Self {
        let octree_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("octree_buffer"),
            contents: bytemuck::bytes_of(&OctreeBlock::stub()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let colors = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("colors_texture"),
                size: wgpu::Extent3d {
                    width: lookup.width(),
                    height: 1,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D1,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            lookup.as_bytes(),
        );

        let colors_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("colors_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            octree_buffer,
            colors_view: colors.create_view(&Default::default()),
            colors_sampler,
        }
    }
}

/// Cached handles for every uniform the shaders read.
///
/// Built once; per-frame updates only rewrite the `Globals` buffer.
pub struct ShaderBindings {
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    globals_buffer: wgpu::Buffer,
    scene: Option<SceneResources>,
}

impl ShaderBindings {
    /// `lookup` selects the variant: with a color lookup the octree block
    /// and `colors` texture are bound as well.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        globals: &Globals,
        lookup: Option<&ColorLookup>,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(globals),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene = lookup.map(|lookup| SceneResources::new(device, queue, lookup));

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shader_bindings_layout"),
            entries: &Self::layout_entries(scene.is_some()),
        });

        let mut entries = vec![wgpu::BindGroupEntry {
            binding: GLOBALS_BINDING,
            resource: globals_buffer.as_entire_binding(),
        }];
        if let Some(scene) = &scene {
            entries.extend([
                wgpu::BindGroupEntry {
                    binding: OCTREE_BINDING,
                    resource: scene.octree_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: COLORS_BINDING,
                    resource: wgpu::BindingResource::TextureView(&scene.colors_view),
                },
                wgpu::BindGroupEntry {
                    binding: COLORS_SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&scene.colors_sampler),
                },
            ]);
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shader_bindings"),
            layout: &layout,
            entries: &entries,
        });

        tracing::debug!(scene = scene.is_some(), "shader bindings created");

        Self {
            layout,
            bind_group,
            globals_buffer,
            scene,
        }
    }

    fn layout_entries(with_scene: bool) -> Vec<wgpu::BindGroupLayoutEntry> {
        let uniform = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let mut entries = vec![uniform(GLOBALS_BINDING)];
        if with_scene {
            entries.extend([
                uniform(OCTREE_BINDING),
                wgpu::BindGroupLayoutEntry {
                    binding: COLORS_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D1,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: COLORS_SAMPLER_BINDING,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ]);
        }
        entries
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn write_globals(&self, queue: &wgpu::Queue, globals: &Globals) {
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
    }
}
