use texblend::{
    CameraUniform, Context, ContextConfig, Mesh, Texture,
    reference::{self, to_rgba8},
};

/// Largest per-channel difference accepted between GPU and CPU output.
/// Float to unorm conversion may round ties either way.
pub(crate) const CHANNEL_TOLERANCE: u8 = 1;

pub(crate) fn headless_context(config: ContextConfig) -> Context {
    texblend::logging::init();
    futures::executor::block_on(Context::new(config))
        .expect("Failed to create a headless context for integration test.")
}

/// Draw `mesh` with a solid `texel` texture and the given camera.
pub(crate) fn render_solid(
    ctx: &Context,
    mesh: &Mesh,
    texel: [u8; 4],
    camera: CameraUniform,
) -> image::RgbaImage {
    let texture = Texture::from_color(&ctx.device, &ctx.queue, texel, 4, 4)
        .expect("Failed to create solid texture");
    let binding = ctx.bind_image(texture);
    let camera = ctx.camera(camera);
    let buffers = ctx.upload_mesh(mesh, "test mesh");
    ctx.draw(&buffers, &binding, &camera)
        .expect("Failed to draw test mesh")
}

/// The colour the blend shader should produce for a uniform texel and vertex colour.
pub(crate) fn expected_pixel(texel: [u8; 4], color: [f32; 3]) -> image::Rgba<u8> {
    to_rgba8(reference::fragment_stage(texel.map(|c| c as f32 / 255.0), color))
}

/// Filtered samples carry the GPU's reduced interpolation precision.
pub(crate) const FILTER_TOLERANCE: u8 = 3;

pub(crate) fn assert_pixel_close(actual: &image::Rgba<u8>, expected: &image::Rgba<u8>, x: u32, y: u32) {
    assert_pixel_within(actual, expected, CHANNEL_TOLERANCE, x, y);
}

pub(crate) fn assert_pixel_within(
    actual: &image::Rgba<u8>,
    expected: &image::Rgba<u8>,
    tolerance: u8,
    x: u32,
    y: u32,
) {
    for (a, e) in actual.0.iter().zip(expected.0.iter()) {
        assert!(
            a.abs_diff(*e) <= tolerance,
            "pixel mismatch at ({}, {}): {:?} != {:?}",
            x,
            y,
            actual,
            expected
        );
    }
}

/// Texture coordinates the full-screen quad interpolates to at the centre of
/// target pixel `(x, y)`.
pub(crate) fn quad_uv(x: u32, y: u32, width: u32, height: u32) -> [f32; 2] {
    [
        (x as f32 + 0.5) / width as f32,
        (y as f32 + 0.5) / height as f32,
    ]
}
