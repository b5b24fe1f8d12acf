use texblend::{
    Context, ContextConfig,
    context::SUPPORTED_FORMATS,
    wgpu::{self, TextureFormat},
};

#[test]
fn should_accept_default_config() {
    let config = ContextConfig::default();
    assert!(SUPPORTED_FORMATS.contains(&config.format));
    config.validate(2048).unwrap();
}

#[test]
fn should_accept_srgb_target() {
    let config = ContextConfig {
        format: TextureFormat::Rgba8UnormSrgb,
        ..Default::default()
    };
    config.validate(2048).unwrap();
}

#[test]
fn should_reject_formats_without_rgba8_readback() {
    for format in [
        TextureFormat::Bgra8Unorm,
        TextureFormat::R32Float,
        TextureFormat::Rgba16Float,
    ] {
        let config = ContextConfig {
            format,
            ..Default::default()
        };
        let err = config.validate(2048).unwrap_err();
        assert!(err.to_string().contains("unsupported target format"), "{err}");
    }
}

#[test]
fn should_reject_sizes_outside_device_limits() {
    let oversized = ContextConfig {
        width: 4096,
        height: 4,
        ..Default::default()
    };
    assert!(oversized.validate(2048).is_err());
    oversized.validate(4096).unwrap();

    let empty = ContextConfig {
        width: 0,
        ..Default::default()
    };
    assert!(empty.validate(2048).is_err());
}

#[test]
fn should_fail_context_creation_before_touching_adapter() {
    // Validation runs first, so this needs no GPU.
    let config = ContextConfig {
        format: TextureFormat::Bgra8Unorm,
        backends: wgpu::Backends::empty(),
        ..Default::default()
    };
    assert!(futures::executor::block_on(Context::new(config)).is_err());

    let config = ContextConfig {
        width: u32::MAX,
        backends: wgpu::Backends::empty(),
        ..Default::default()
    };
    assert!(futures::executor::block_on(Context::new(config)).is_err());
}
