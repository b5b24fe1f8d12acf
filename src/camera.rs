//! Camera matrix for the vertex stage.
//!
//! The vertex stage multiplies every position by a single 4x4 `cam_matrix`.
//! How that matrix is composed is up to the host; this module provides the
//! usual composition of a projection, a look-at view and a model
//! [`Transform`] for a [`PerspectiveCamera`] or an [`OrthographicCamera`],
//! plus the uniform that carries the result to the GPU.

use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3};

/// Converts OpenGL clip space (z in -1..1) to WGPU clip space (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Uniform block bound at group 1, binding 0.
///
/// Stored column-major, which is what `cgmath` produces and WGSL expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub cam_matrix: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Identity camera: positions reach clip space unchanged.
    pub fn new() -> Self {
        Self {
            cam_matrix: Matrix4::identity().into(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        Self {
            cam_matrix: matrix.into(),
        }
    }

    pub fn update(&mut self, matrix: Matrix4<f32>) {
        self.cam_matrix = matrix.into();
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.cam_matrix.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Model transform: translation, Euler rotation in degrees and scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    /// Rotation about x, y and z, applied in that order from the left.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new(translation: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// `T * Rx * Ry * Rz * S`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::from_translation(self.translation);
        let rotation = Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z));
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        translation * rotation * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A view and projection that together place objects in clip space.
pub trait Camera {
    fn view(&self) -> Matrix4<f32>;

    /// OpenGL-style projection (z in -1..1).
    fn projection(&self) -> Matrix4<f32>;

    /// The full `cam_matrix` for drawing an object placed by `model`.
    fn cam_matrix(&self, model: &Transform) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection() * self.view() * model.to_matrix()
    }

    fn uniform(&self, model: &Transform) -> CameraUniform {
        CameraUniform::from_matrix(self.cam_matrix(model))
    }
}

fn look_at(position: Point3<f32>, orientation: Vector3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(position, position + orientation, up)
}

/// Right-handed perspective camera looking along `orientation`.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Point3<f32>,
    pub orientation: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Point3<f32>, width: u32, height: u32) -> anyhow::Result<Self> {
        let mut camera = Self {
            position,
            ..Default::default()
        };
        camera.resize(width, height)?;
        Ok(camera)
    }

    /// Update the aspect ratio for a new target size.
    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        anyhow::ensure!(
            width > 0 && height > 0,
            "cannot resize camera to {width}x{height}"
        );
        self.aspect_ratio = width as f32 / height as f32;
        Ok(())
    }

}

impl Camera for PerspectiveCamera {
    fn view(&self) -> Matrix4<f32> {
        look_at(self.position, self.orientation, self.up)
    }

    fn projection(&self) -> Matrix4<f32> {
        cgmath::perspective(
            Deg(self.fov),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            orientation: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 45.0,
            aspect_ratio: 1.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}

/// Right-handed orthographic camera looking along `orientation`.
///
/// `left`, `right`, `bottom` and `top` bound the view volume in view space.
#[derive(Clone, Debug, PartialEq)]
pub struct OrthographicCamera {
    pub position: Point3<f32>,
    pub orientation: Vector3<f32>,
    pub up: Vector3<f32>,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl OrthographicCamera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the horizontal and vertical extent, rejecting empty volumes.
    pub fn set_bounds(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> anyhow::Result<()> {
        anyhow::ensure!(
            left < right && bottom < top,
            "empty orthographic bounds ({left}, {right}, {bottom}, {top})"
        );
        self.left = left;
        self.right = right;
        self.bottom = bottom;
        self.top = top;
        Ok(())
    }
}

impl Camera for OrthographicCamera {
    fn view(&self) -> Matrix4<f32> {
        look_at(self.position, self.orientation, self.up)
    }

    fn projection(&self) -> Matrix4<f32> {
        cgmath::ortho(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near_plane,
            self.far_plane,
        )
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            orientation: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            left: -10.0,
            right: 10.0,
            bottom: -10.0,
            top: 10.0,
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }
}
