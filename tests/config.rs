use glam::Vec2;
use ribbons::config::GraphicsConfig;
use ribbons::Error;

#[test]
fn default_is_1280x720_at_64_ppu() {
    let cfg = GraphicsConfig::default();
    assert_eq!(cfg.viewport_width, 1280);
    assert_eq!(cfg.viewport_height, 720);
    assert_eq!(cfg.pixels_per_unit, 64.0);
    assert_eq!(cfg.graphics_scale, 1.0);
    assert_eq!(cfg.viewport_units(), Vec2::new(20.0, 11.25));
}

#[test]
fn aspect_ratio_1280x720() {
    let cfg = GraphicsConfig::default();
    let ratio = cfg.aspect_ratio();
    assert!((ratio - 16.0 / 9.0).abs() < 1e-5, "expected 16/9, got {ratio}");
}

#[test]
fn aspect_ratio_zero_height_returns_zero() {
    let cfg = GraphicsConfig { viewport_height: 0, ..GraphicsConfig::default() };
    assert_eq!(cfg.aspect_ratio(), 0.0);
}

/// Fields absent from the JSON keep their defaults.
#[test]
fn partial_json_fills_in_defaults() {
    let cfg = GraphicsConfig::from_json_str(r#"{ "viewport_width": 640, "debug": true }"#).unwrap();
    assert_eq!(cfg.viewport_width, 640);
    assert_eq!(cfg.viewport_height, 720);
    assert!(cfg.debug);
    assert_eq!(cfg.default_camera_smoothness, GraphicsConfig::default().default_camera_smoothness);
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = GraphicsConfig::from_json_str("{ viewport_width: }").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn load_reads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graphics.json");
    std::fs::write(&path, r#"{ "pixels_per_unit": 32.0 }"#).unwrap();
    let cfg = GraphicsConfig::load(&path).unwrap();
    assert_eq!(cfg.pixels_per_unit, 32.0);
}

#[test]
fn load_missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match GraphicsConfig::load(&path) {
        Err(Error::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
