//! Render pipeline definitions.
//!
//! - `blend` builds the pipeline that runs `vs_main` / `fs_main` from
//!   `blend.wgsl` together with the bind group layouts it expects.

pub mod blend;
