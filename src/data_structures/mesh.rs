//! Indexed triangle meshes built from [`BlendVertex`] data.

use anyhow::ensure;

use crate::data_structures::vertex::BlendVertex;

/// CPU-side triangle list with `u32` indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<BlendVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh and check that the indices form whole triangles inside
    /// the vertex range.
    pub fn new(vertices: Vec<BlendVertex>, indices: Vec<u32>) -> anyhow::Result<Self> {
        ensure!(
            indices.len() % 3 == 0,
            "index count {} is not a multiple of 3",
            indices.len()
        );
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            anyhow::bail!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            );
        }
        Ok(Self { vertices, indices })
    }

    /// Build a mesh from an interleaved position/uv/colour float array.
    pub fn from_interleaved(data: &[f32], indices: Vec<u32>) -> anyhow::Result<Self> {
        Self::new(BlendVertex::from_interleaved(data)?, indices)
    }

    /// A quad covering clip space from -1 to 1 with uv (0,0) at the top left.
    pub fn quad(color: [f32; 3]) -> Self {
        let vertices = vec![
            BlendVertex::new([-1.0, -1.0, 0.0], [0.0, 1.0], color),
            BlendVertex::new([1.0, -1.0, 0.0], [1.0, 1.0], color),
            BlendVertex::new([1.0, 1.0, 0.0], [1.0, 0.0], color),
            BlendVertex::new([-1.0, 1.0, 0.0], [0.0, 0.0], color),
        ];
        Self {
            vertices,
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    /// Unit cube from -1 to 1 with a red/green/blue/white colour per corner of
    /// each face, so the blend is visible on every side. Every face is wound
    /// counter-clockwise seen from outside so back-face culling keeps it closed.
    pub fn cube() -> Self {
        const R: [f32; 3] = [1.0, 0.0, 0.0];
        const G: [f32; 3] = [0.0, 1.0, 0.0];
        const B: [f32; 3] = [0.0, 0.0, 1.0];
        const W: [f32; 3] = [1.0, 1.0, 1.0];
        let faces: [[[f32; 3]; 4]; 6] = [
            // front
            [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
            // back
            [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
            // left
            [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
            // right
            [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
            // bottom
            [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
            // top
            [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
        ];
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        let colors = [R, G, B, W];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face, corners) in faces.iter().enumerate() {
            let base = (face * 4) as u32;
            for corner in 0..4 {
                vertices.push(BlendVertex::new(corners[corner], uvs[corner], colors[corner]));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}
