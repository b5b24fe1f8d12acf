use cgmath::{Matrix4, Point3, SquareMatrix, Vector3, Vector4};
use texblend::{
    BlendVertex, Camera, CameraUniform, OrthographicCamera, PerspectiveCamera, Transform,
    camera::OPENGL_TO_WGPU_MATRIX,
    reference::vertex_stage,
};

#[test]
fn should_default_to_identity_uniform() {
    let uniform = CameraUniform::default();
    assert_eq!(uniform.matrix(), Matrix4::identity());
    assert_eq!(std::mem::size_of::<CameraUniform>(), 64);
}

#[test]
fn should_store_matrix_column_major() {
    let matrix = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    let uniform = CameraUniform::from_matrix(matrix);
    assert_eq!(uniform.cam_matrix[3], [1.0, 2.0, 3.0, 1.0]);

    let mut uniform = CameraUniform::new();
    uniform.update(matrix);
    assert_eq!(uniform.matrix(), matrix);
}

#[test]
fn should_default_transform_to_identity() {
    assert_eq!(Transform::default().to_matrix(), Matrix4::identity());
}

#[test]
fn should_scale_then_translate() {
    let transform = Transform::new(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(2.0, 2.0, 2.0),
    );
    let p = transform.to_matrix() * Vector4::new(1.0, 1.0, 1.0, 1.0);
    assert_eq!(p, Vector4::new(3.0, 2.0, 2.0, 1.0));
}

#[test]
fn should_rotate_about_z_in_degrees() {
    let transform = Transform::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 0.0, 90.0),
        Vector3::new(1.0, 1.0, 1.0),
    );
    let p = transform.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
    assert!(p.x.abs() < 1e-6);
    assert!((p.y - 1.0).abs() < 1e-6);
}

#[test]
fn should_compose_projection_view_model() {
    let camera = PerspectiveCamera::new(Point3::new(0.0, 0.0, 5.0), 800, 600).unwrap();
    let model = Transform::default();
    let expected = OPENGL_TO_WGPU_MATRIX * camera.projection() * camera.view();
    assert_eq!(camera.cam_matrix(&model), expected);
    assert_eq!(camera.uniform(&model).matrix(), expected);
    assert!((camera.aspect_ratio - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn should_place_origin_inside_wgpu_depth_range() {
    let camera = PerspectiveCamera::default();
    let vertex = BlendVertex::new([0.0, 0.0, 0.0], [0.0, 0.0], [0.0, 0.0, 0.0]);
    let out = vertex_stage(&vertex, &camera.cam_matrix(&Transform::default()));
    let [x, y, z, w] = out.clip_position;
    assert!(w > 0.0);
    assert!((x / w).abs() < 1e-6 && (y / w).abs() < 1e-6);
    assert!((0.0..=1.0).contains(&(z / w)));
}

#[test]
fn should_reject_zero_sized_camera() {
    assert!(PerspectiveCamera::new(Point3::new(0.0, 0.0, 0.0), 0, 10).is_err());
    let mut camera = PerspectiveCamera::default();
    assert!(camera.resize(10, 0).is_err());
    assert_eq!(camera.aspect_ratio, 1.0);
}

#[test]
fn should_map_orthographic_bounds_to_clip_edges() {
    let camera = OrthographicCamera::default();
    let cam_matrix = camera.cam_matrix(&Transform::default());

    let right = Vector4::new(10.0, 0.0, 0.0, 1.0);
    let clip = cam_matrix * right;
    assert!((clip.x - 1.0).abs() < 1e-5);
    assert!(clip.y.abs() < 1e-5);
    assert!((clip.w - 1.0).abs() < 1e-6);
    assert!((0.0..=1.0).contains(&clip.z));

    let vertex = BlendVertex::new([0.0, -10.0, 0.0], [0.0, 0.0], [0.0, 0.0, 0.0]);
    let [x, y, _, w] = vertex_stage(&vertex, &cam_matrix).clip_position;
    assert!(x.abs() < 1e-5);
    assert!((y + 1.0).abs() < 1e-5);
    assert_eq!(w, 1.0);
}

#[test]
fn should_keep_orthographic_size_independent_of_distance() {
    let near = OrthographicCamera::new(Point3::new(0.0, 0.0, 2.0));
    let far = OrthographicCamera::new(Point3::new(0.0, 0.0, 50.0));
    let point = Vector4::new(4.0, 3.0, 0.0, 1.0);
    let a = near.cam_matrix(&Transform::default()) * point;
    let b = far.cam_matrix(&Transform::default()) * point;
    assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
    assert!((a.x - 0.4).abs() < 1e-5 && (a.y - 0.3).abs() < 1e-5);
    assert_eq!(
        near.uniform(&Transform::default()).matrix(),
        OPENGL_TO_WGPU_MATRIX * near.projection() * near.view()
    );
}

#[test]
fn should_reject_empty_orthographic_bounds() {
    let mut camera = OrthographicCamera::default();
    assert!(camera.set_bounds(1.0, 1.0, -1.0, 1.0).is_err());
    assert!(camera.set_bounds(-1.0, 1.0, 2.0, -2.0).is_err());
    assert_eq!(camera.right, 10.0);

    camera.set_bounds(-2.0, 2.0, -1.0, 1.0).unwrap();
    let clip = camera.cam_matrix(&Transform::default()) * Vector4::new(2.0, 1.0, 0.0, 1.0);
    assert!((clip.x - 1.0).abs() < 1e-5 && (clip.y - 1.0).abs() < 1e-5);
}
