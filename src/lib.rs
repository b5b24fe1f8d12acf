//! texblend
//!
//! A pair of WGSL shading stages that blend a sampled texture with
//! interpolated vertex colours, plus the host-side pieces needed to use them
//! with WGPU. The vertex stage transforms positions by a single camera matrix
//! and forwards texture coordinates and colours; the fragment stage outputs
//! `(texel + vec4(color, 1.0)) / 2`.
//!
//! High-level modules
//! - `camera`: the camera uniform and the usual projection * view * model composition
//! - `context`: headless device/queue that draws into an offscreen texture
//! - `data_structures`: vertex layout, meshes and textures
//! - `logging`: `env_logger` setup
//! - `pipelines`: the blend shader pipeline and its bind group layouts
//! - `reference`: CPU evaluation of both stages
//! - `resources`: GPU buffers and bind groups for camera, image and mesh
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod logging;
pub mod pipelines;
pub mod reference;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use camera::{Camera, CameraUniform, OrthographicCamera, PerspectiveCamera, Transform};
pub use context::{Context, ContextConfig};
pub use data_structures::{mesh::Mesh, texture::Texture, vertex::BlendVertex};
pub use reference::{fragment_stage, vertex_stage};
pub use cgmath;
pub use wgpu;
