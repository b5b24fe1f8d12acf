//! GPU resources feeding the blend shader: the camera uniform, the bound
//! image and mesh buffers.

pub mod camera;
pub mod mesh;
pub mod texture;

pub use camera::CameraResources;
pub use mesh::MeshBuffers;
pub use texture::ImageBinding;
