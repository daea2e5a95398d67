//! GLSL shader loading and compilation.
//!
//! Sources are read from disk and compiled to naga IR before any window or
//! GPU device exists, so a missing file or a compile error ends the process
//! without touching the platform layer.

use std::path::{Path, PathBuf};
use wgpu::naga;

use quadray_core::DemoError;

/// Vertex attribute location of `i_position`.
pub const ATTRIB_POSITION: u32 = 0;
/// Vertex attribute location of `i_color`.
pub const ATTRIB_COLOR: u32 = 1;

/// Entry point used by both stages.
pub const ENTRY_POINT: &str = "main";

#[derive(Debug, Clone)]
struct StageSource {
    path: PathBuf,
    text: String,
}

impl StageSource {
    fn read(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path).map_err(|e| DemoError::file_open(path, e))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded shader source");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    fn inline(label: &str, text: &str) -> Self {
        Self {
            path: PathBuf::from(label),
            text: text.to_owned(),
        }
    }

    fn compile(&self, stage: naga::ShaderStage) -> Result<naga::Module, String> {
        let options = naga::front::glsl::Options::from(stage);
        let module = naga::front::glsl::Frontend::default()
            .parse(&options, &self.text)
            .map_err(|e| e.emit_to_string(&self.text))?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| e.to_string())?;

        Ok(module)
    }
}

/// Validated naga modules, ready to become wgpu shader modules.
#[derive(Debug)]
pub struct CompiledShaders {
    pub vertex: naga::Module,
    pub fragment: naga::Module,
}

impl CompiledShaders {
    /// Read and compile the vertex stage, then the fragment stage. The
    /// fragment file is not opened when the vertex stage fails.
    pub fn load(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self, DemoError> {
        let vertex = StageSource::read(vertex.as_ref())?;
        let vertex_module = vertex
            .compile(naga::ShaderStage::Vertex)
            .map_err(DemoError::VertexShader)?;

        let fragment = StageSource::read(fragment.as_ref())?;
        let fragment_module = fragment
            .compile(naga::ShaderStage::Fragment)
            .map_err(DemoError::FragmentShader)?;

        tracing::info!(
            vertex = %vertex.path.display(),
            fragment = %fragment.path.display(),
            "shaders compiled"
        );
        Ok(Self {
            vertex: vertex_module,
            fragment: fragment_module,
        })
    }

    /// Compile in-memory GLSL text.
    pub fn from_sources(vertex: &str, fragment: &str) -> Result<Self, DemoError> {
        let vertex = StageSource::inline("<vertex>", vertex)
            .compile(naga::ShaderStage::Vertex)
            .map_err(DemoError::VertexShader)?;
        let fragment = StageSource::inline("<fragment>", fragment)
            .compile(naga::ShaderStage::Fragment)
            .map_err(DemoError::FragmentShader)?;
        Ok(Self { vertex, fragment })
    }
}
