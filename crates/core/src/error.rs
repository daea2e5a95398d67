use std::path::PathBuf;

/// Exit code when a required input file cannot be opened.
pub const EXIT_FILE_OPEN: i32 = -3;

/// Exit code for every other fatal error.
pub const EXIT_FAILURE: i32 = 1;

/// Fatal errors of the demo harness. None of them is recovered from.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("error opening file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("vertex shader compilation failed: {0}")]
    VertexShader(String),
    #[error("fragment shader compilation failed: {0}")]
    FragmentShader(String),
    #[error("cannot decode image {}: {message}", .path.display())]
    ImageDecode { path: PathBuf, message: String },
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
    #[error("platform error: {0}")]
    Platform(String),
}

impl DemoError {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileOpen { .. } => EXIT_FILE_OPEN,
            _ => EXIT_FAILURE,
        }
    }
}
