pub mod config;
pub mod render;
pub mod shader;

// Re-export commonly used types
pub use config::{AppConfig, WindowConfig};
pub use render::mesh::TriangleMesh;
pub use shader::program::ShaderProgram;
pub use shader::source::{load_shader_file, split_source, ShaderSourcePair};
pub use shader::{ShaderError, ShaderStage};
