use std::path::Path;

use quadray_core::DemoError;

/// Widest 1D texture every wgpu backend accepts with default limits.
pub const MAX_LOOKUP_TEXELS: usize = 8192;

/// RGBA8 color ramp sampled by the shaders as the 1D `colors` texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLookup {
    texels: Vec<[u8; 4]>,
}

impl ColorLookup {
    /// Read and decode an image, flattening its rows into one strip.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DemoError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| DemoError::file_open(path, e))?;
        let image = image::load_from_memory(&bytes).map_err(|e| DemoError::ImageDecode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let rgba = image.to_rgba8();
        tracing::debug!(
            path = %path.display(),
            width = rgba.width(),
            height = rgba.height(),
            "decoded color lookup"
        );
        Ok(Self::from_texels(rgba.pixels().map(|p| p.0).collect()))
    }

    /// Build a lookup from texels, truncating to [`MAX_LOOKUP_TEXELS`].
    pub fn from_texels(mut texels: Vec<[u8; 4]>) -> Self {
        if texels.len() > MAX_LOOKUP_TEXELS {
            tracing::warn!(
                texels = texels.len(),
                max = MAX_LOOKUP_TEXELS,
                "color lookup too wide, truncating"
            );
            texels.truncate(MAX_LOOKUP_TEXELS);
        }
        if texels.is_empty() {
            texels.push([255; 4]);
        }
        Self { texels }
    }

    pub fn width(&self) -> u32 {
        self.texels.len() as u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.texels.as_flattened()
    }
}
