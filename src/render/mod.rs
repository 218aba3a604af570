pub mod mesh;

pub use mesh::TriangleMesh;
