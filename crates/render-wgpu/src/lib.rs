//! wgpu backend for the quadray demos.
//!
//! Compiles the GLSL shader pair through naga, binds the uniforms once,
//! and drives `quadray_core::FrameLoop` from a winit event loop.
//!
//! # Invariants
//! - Shader files are read and compiled before the window is created.
//! - Uniform locations are resolved once; frames only rewrite buffers.
//! - Input is queued per frame and dispatched in arrival order.

mod app;
mod bindings;
mod gpu;
mod lookup;
mod shaders;

pub use app::{launch, map_key, run};
pub use bindings::ShaderBindings;
pub use gpu::WgpuBackend;
pub use lookup::{ColorLookup, MAX_LOOKUP_TEXELS};
pub use shaders::CompiledShaders;
