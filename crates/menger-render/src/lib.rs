pub mod mesh;
pub mod renderer;

pub use mesh::GpuMesh;
pub use renderer::{MeshUniforms, Renderer};
