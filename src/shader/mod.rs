use std::ffi::NulError;
use std::fmt;

use thiserror::Error;

pub mod program;
pub mod source;

pub use program::ShaderProgram;
pub use source::{load_shader_file, split_source, ShaderSourcePair};

/// Pipeline stage a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn gl_kind(self) -> gl::types::GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file unreadable: {0}")]
    File(#[from] std::io::Error),

    #[error("malformed shader source: {0}")]
    Parse(String),

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    Link(String),

    #[error("shader source contains an interior NUL byte")]
    Nul(#[from] NulError),
}
