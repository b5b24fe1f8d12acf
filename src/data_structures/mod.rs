//! Shader-facing data: vertices, meshes and textures.
//!
//! - `vertex` is the per-vertex input layout of the blend shader
//! - `mesh` holds indexed triangle lists and the built-in quad and cube
//! - `texture` is the GPU texture bound as the shader's `image`

pub mod mesh;
pub mod texture;
pub mod vertex;
