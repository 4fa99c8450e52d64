use glam::Vec2;
use ribbons::camera::Camera;
use ribbons::config::GraphicsConfig;
use ribbons::content::ContentLibrary;
use ribbons::context::FrameTime;
use ribbons::parallax::ParallaxBackground;
use ribbons::renderer::{Color, Frame, RenderSurface};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn setup() -> (GraphicsConfig, ContentLibrary, Camera) {
    let config = GraphicsConfig::default();
    let mut library = ContentLibrary::new();
    // 640×360 px at 64 px/unit → 10 × 5.625 world units, half the view.
    library.add_texture("bg/sky", 640, 360);
    library.add_texture("bg/empty", 0, 0);
    let view = Camera::new(&config, config.viewport_units(), Vec2::ZERO);
    (config, library, view)
}

fn render(background: &ParallaxBackground, config: &GraphicsConfig, total: f32) -> Frame {
    let mut surface = RenderSurface::new(config);
    surface.begin_frame(Color::BLACK).unwrap();
    background.draw(&mut surface, FrameTime { delta: 0.0, total });
    assert_eq!(surface.camera_depth(), 1, "background left its camera pushed");
    surface.end_frame().unwrap()
}

fn xs(frame: &Frame) -> Vec<f32> {
    frame.quads().map(|q| q.position.x).collect()
}

const SKY: &str = r#"{
    "color": [0.1, 0.2, 0.3, 1.0],
    "layers": [ { "texture": "bg/sky", "anchor": "TopLeft" } ]
}"#;

#[test]
fn from_json_resolves_layers_and_color() {
    let (config, library, view) = setup();
    let json = r#"{ "layers": [ { "texture": "bg/sky", "distance": 4.0 }, { "texture": "bg/missing" } ] }"#;
    let bg = ParallaxBackground::from_json(json, &library, &config, &view).unwrap();
    assert_eq!(bg.layers().len(), 1);
    assert_eq!(bg.layers()[0].distance, 4.0);
    assert!(bg.layers()[0].repeat_x && !bg.layers()[0].repeat_y);
    assert_eq!(bg.color(), Color::BLACK);

    let bg = ParallaxBackground::from_json(SKY, &library, &config, &view).unwrap();
    assert_eq!(bg.color(), Color::rgba(0.1, 0.2, 0.3, 1.0));
}

#[test]
fn from_json_rejects_malformed_definitions() {
    let (config, library, view) = setup();
    assert!(ParallaxBackground::from_json("{ \"layers\": 3 }", &library, &config, &view).is_err());
}

/// A repeating layer tiles across the whole view width.
#[test]
fn repeating_layer_tiles_the_view() {
    let (config, library, view) = setup();
    let bg = ParallaxBackground::from_json(SKY, &library, &config, &view).unwrap();
    let frame = render(&bg, &config, 0.0);
    let xs = xs(&frame);
    assert_eq!(xs.len(), 3);
    for (x, expected) in xs.iter().zip([0.0, 640.0, 1280.0]) {
        assert!(approx(*x, expected), "tile at {x}, expected {expected}");
    }
}

/// Moving the tracked camera scrolls the layer by half the travel divided by
/// its distance, wrapped into one tile.
#[test]
fn tracking_scrolls_by_distance() {
    let (config, library, mut view) = setup();
    let json = r#"{ "layers": [
        { "texture": "bg/sky", "anchor": "TopLeft", "distance": 1.0 },
        { "texture": "bg/sky", "anchor": "TopLeft", "distance": 2.0 }
    ] }"#;
    let mut bg = ParallaxBackground::from_json(json, &library, &config, &view).unwrap();

    view.set_position(Vec2::new(4.0, 3.0));
    view.jump_to_target();
    bg.track(&view);
    assert_eq!(bg.drift(), Vec2::new(2.0, 0.0));

    let frame = render(&bg, &config, 0.0);
    let xs = xs(&frame);
    assert_eq!(xs.len(), 6);
    assert!(approx(xs[0], -128.0), "near layer starts at {}", xs[0]);
    assert!(approx(xs[3], -64.0), "far layer starts at {}", xs[3]);
}

#[test]
fn velocity_drifts_with_total_time() {
    let (config, library, view) = setup();
    let json = r#"{ "layers": [ { "texture": "bg/sky", "anchor": "TopLeft", "velocity": [-1.0, 0.0] } ] }"#;
    let bg = ParallaxBackground::from_json(json, &library, &config, &view).unwrap();
    let frame = render(&bg, &config, 3.0);
    assert!(approx(xs(&frame)[0], -192.0));
}

/// The default bottom-left anchor rests the layer on the bottom of the view.
#[test]
fn bottom_left_layers_sit_on_the_bottom_edge() {
    let (config, library, view) = setup();
    let json = r#"{ "layers": [ { "texture": "bg/sky", "repeat": [false, false] } ] }"#;
    let bg = ParallaxBackground::from_json(json, &library, &config, &view).unwrap();
    let frame = render(&bg, &config, 0.0);
    let quads: Vec<_> = frame.quads().collect();
    assert_eq!(quads.len(), 1);
    assert!(approx(quads[0].position.y, 360.0));
}

#[test]
fn empty_textures_are_skipped() {
    let (config, library, view) = setup();
    let json = r#"{ "layers": [ { "texture": "bg/empty", "repeat": [true, true] } ] }"#;
    let bg = ParallaxBackground::from_json(json, &library, &config, &view).unwrap();
    assert_eq!(render(&bg, &config, 0.0).quads().count(), 0);
}
