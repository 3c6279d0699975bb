use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graphics::opengl::GlShaderType;
use crate::interface::cli::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to create window: {0}")]
    CreateContext(#[from] glutin::CreationError),

    #[error("Failed to make the OpenGL context current: {0}")]
    MakeCurrent(#[source] glutin::ContextError),

    #[error("Failed to load OpenGL functions")]
    FunctionsNotLoaded,

    #[error("Error opening shader {}: {source}", .path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to compile {kind} shader:\n{log}")]
    ShaderCompile { kind: GlShaderType, log: String },

    #[error("Failed to link shader program:\n{log}")]
    ProgramLink { log: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Process exit status for this error: 2 for bad arguments, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            _ => 1,
        }
    }
}
