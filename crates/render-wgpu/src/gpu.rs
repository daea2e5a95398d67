use std::borrow::Cow;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use quadray_core::uniforms::quad_vertices;
use quadray_core::{DemoConfig, DemoError, FrameSink, Globals, Vertex};

use crate::bindings::ShaderBindings;
use crate::lookup::ColorLookup;
use crate::shaders::{ATTRIB_COLOR, ATTRIB_POSITION, CompiledShaders, ENTRY_POINT};

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: std::mem::offset_of!(Vertex, color) as u64,
        shader_location: ATTRIB_COLOR,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: std::mem::offset_of!(Vertex, position) as u64,
        shader_location: ATTRIB_POSITION,
    },
];

/// Frame being recorded between `clear` and `present`.
struct Frame {
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// Prefer a non-sRGB surface so shader outputs and the clear color reach
/// the screen unconverted, as a default GL framebuffer does.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or(formats.first())
        .copied()
}

/// wgpu implementation of [`FrameSink`] drawing the quad into a window.
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    bindings: ShaderBindings,
    clear_color: wgpu::Color,
    frame: Option<Frame>,
}

impl WgpuBackend {
    pub fn new(
        window: Arc<Window>,
        demo: &DemoConfig,
        shaders: CompiledShaders,
        lookup: Option<&ColorLookup>,
        globals: &Globals,
    ) -> Result<Self, DemoError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| DemoError::Platform(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| DemoError::Platform("no compatible GPU adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("quadray_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| DemoError::Platform(format!("request device: {e}")))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = pick_surface_format(&surface_caps.formats)
            .ok_or_else(|| DemoError::Platform("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let bindings = ShaderBindings::new(&device, &queue, globals, lookup);
        let pipeline = Self::create_pipeline(&device, &bindings, shaders, surface_format);

        let vertices = quad_vertices(demo.width, demo.height);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let [r, g, b, a] = demo.clear_color;
        tracing::info!(
            scene = bindings.has_scene(),
            "GPU initialized with {} backend ({}x{}, {:?})",
            adapter.get_info().backend.to_str(),
            config.width,
            config.height,
            surface_format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            bindings,
            clear_color: wgpu::Color { r, g, b, a },
            frame: None,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bindings: &ShaderBindings,
        shaders: CompiledShaders,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vertex_shader"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(shaders.vertex)),
        });
        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fragment_shader"),
            source: wgpu::ShaderSource::Naga(Cow::Owned(shaders.fragment)),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[bindings.layout()],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // No depth test.
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn acquire(&mut self) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(t) => Some(t),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture().ok()
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                None
            }
        }
    }
}

impl FrameSink for WgpuBackend {
    fn clear(&mut self) {
        let Some(output) = self.acquire() else {
            self.frame = None;
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("clear_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });

        self.frame = Some(Frame {
            output,
            view,
            encoder,
        });
    }

    fn upload_globals(&mut self, globals: &Globals) {
        self.bindings.write_globals(&self.queue, globals);
    }

    fn draw(&mut self, vertex_count: u32) {
        let Some(frame) = &mut self.frame else {
            return;
        };

        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quad_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });

        pass.set_viewport(
            0.0,
            0.0,
            self.config.width as f32,
            self.config.height as f32,
            0.0,
            1.0,
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.bindings.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..vertex_count, 0..1);
    }

    fn present(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}
