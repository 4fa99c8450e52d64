use glam::{Mat4, Vec2, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GraphicsConfig;
use crate::geometry::{Anchor, RectF, lerp};

/// Camera uniform for GPU backends: the camera's world matrix.
///
/// Layout is column-major, matching WGSL `mat4x4<f32>`, so backends that draw
/// their own geometry under the active camera can upload it verbatim.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Column-major 4×4 world → view matrix.
    pub world: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn identity() -> Self {
        Self::from(Mat4::IDENTITY)
    }
}

impl From<Mat4> for CameraUniform {
    fn from(m: Mat4) -> Self {
        Self { world: m.to_cols_array_2d() }
    }
}

/// One value track of a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Top-left corner of the view, in world units.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Zoom factor; must stay positive.
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CameraBounds {
    edge: RectF,
    /// Region the camera *center* may travel in: `edge` inset by half the view.
    center: RectF,
}

/// 2D camera with a smoothed transform.
///
/// Game code writes the **target** track; `update` moves the **actual** track
/// toward it and applies shake.  All drawing uses the actual track through the
/// cached world matrix.
#[derive(Clone, Debug)]
pub struct Camera {
    dimensions: Vec2,
    viewport: Vec2,
    pixels_per_unit: f32,
    /// `sin(viewer_tilt)`.
    tilt: f32,
    epsilon: f32,
    target: CameraState,
    actual: CameraState,
    smoothness: f32,
    bounds: Option<CameraBounds>,
    shake_frames: u32,
    /// Peak jitter in world units.
    shake_intensity: f32,
    /// Jitter applied by the most recent `update`.
    shake_offset: Vec2,
    rng: StdRng,
    world: Mat4,
}

impl Camera {
    /// Create a camera viewing a `dimensions`-sized region whose top-left is at
    /// `position`.  Rotation 0, scale 1, smoothness from `config`.
    pub fn new(config: &GraphicsConfig, dimensions: Vec2, position: Vec2) -> Self {
        let state = CameraState { position, rotation: 0.0, scale: 1.0 };
        let mut camera = Self {
            dimensions,
            viewport: config.viewport(),
            pixels_per_unit: config.pixels_per_unit,
            tilt: config.viewer_tilt.sin(),
            epsilon: config.epsilon,
            target: state,
            actual: state,
            smoothness: 0.0,
            bounds: None,
            shake_frames: 0,
            shake_intensity: 0.0,
            shake_offset: Vec2::ZERO,
            rng: StdRng::from_entropy(),
            world: Mat4::IDENTITY,
        };
        camera.smoothness = camera.clamp_smoothness(config.default_camera_smoothness);
        camera.refresh_world();
        camera
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.target.rotation = rotation;
        self.actual.rotation = rotation;
        self.refresh_world();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.target.scale = scale;
        self.actual.scale = scale;
        self.refresh_world();
        self
    }

    /// Interpolation factor per update, clamped to `[0, 1 - epsilon]`.
    pub fn with_smoothness(mut self, smoothness: f32) -> Self {
        self.smoothness = self.clamp_smoothness(smoothness);
        self
    }

    /// Seed the shake jitter source (deterministic shakes for replays and tests).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn clamp_smoothness(&self, smoothness: f32) -> f32 {
        if smoothness < 0.0 {
            0.0
        } else if smoothness >= 1.0 {
            1.0 - self.epsilon
        } else {
            smoothness
        }
    }

    // ── Target track ───────────────────────────────────────────────────────

    /// Set the whole target at once.  `position` is the top-left corner and is
    /// subject to the bounds clamp.  The actual track is untouched.
    pub fn set_target(&mut self, position: Vec2, rotation: f32, scale: f32) {
        self.set_position(position);
        self.target.rotation = rotation;
        self.target.scale = scale;
    }

    /// Target top-left corner.
    pub fn position(&self) -> Vec2 { self.target.position }

    pub fn set_position(&mut self, position: Vec2) {
        self.set_center(position + self.dimensions * 0.5);
    }

    /// Target view center.
    pub fn center(&self) -> Vec2 { self.target.position + self.dimensions * 0.5 }

    /// Move the target so the view is centered on `center`, clamped into the
    /// bounds when they are enabled.
    pub fn set_center(&mut self, center: Vec2) {
        let center = match &self.bounds {
            Some(b) => b.center.project_point(center),
            None => center,
        };
        self.target.position = center - self.dimensions * 0.5;
    }

    pub fn rotation(&self) -> f32 { self.target.rotation }
    pub fn set_rotation(&mut self, rotation: f32) { self.target.rotation = rotation; }

    pub fn scale(&self) -> f32 { self.target.scale }
    pub fn set_scale(&mut self, scale: f32) { self.target.scale = scale; }

    pub fn target(&self) -> CameraState { self.target }

    // ── Actual track ───────────────────────────────────────────────────────

    pub fn actual(&self) -> CameraState { self.actual }
    pub fn actual_position(&self) -> Vec2 { self.actual.position }
    pub fn actual_rotation(&self) -> f32 { self.actual.rotation }
    pub fn actual_scale(&self) -> f32 { self.actual.scale }

    /// Snap the actual track onto the target (hard cuts).
    pub fn jump_to_target(&mut self) {
        self.actual = self.target;
        self.refresh_world();
    }

    /// Kick the actual position by `delta` without moving the target; the kick
    /// decays over the following updates.
    pub fn offset_and_recover(&mut self, delta: Vec2) {
        self.actual.position += delta;
        self.refresh_world();
    }

    /// Advance one tick: lerp every actual value toward its target, then apply
    /// shake jitter if a shake is running.  Smoothing is per tick, so `_dt`
    /// only documents the frame the tick belongs to.
    pub fn update(&mut self, _dt: f32) {
        let t = self.smoothness;
        self.actual.position = self.actual.position.lerp(self.target.position, t);
        self.actual.rotation = lerp(self.actual.rotation, self.target.rotation, t);
        self.actual.scale = lerp(self.actual.scale, self.target.scale, t);

        self.shake_offset = Vec2::ZERO;
        if self.shake_frames > 0 {
            let i = self.shake_intensity;
            let jitter = Vec2::new(
                self.rng.gen_range(-1.0f32..=1.0) * i,
                self.rng.gen_range(-1.0f32..=1.0) * i,
            );
            self.actual.position += jitter;
            self.shake_offset = jitter;
            self.shake_frames -= 1;
        }

        self.refresh_world();
    }

    // ── Effects ────────────────────────────────────────────────────────────

    /// Start (or restart) a shake lasting `frames` updates.  `intensity` is the
    /// peak displacement in pixels.
    pub fn shake(&mut self, frames: u32, intensity: f32) {
        self.shake_frames = frames;
        self.shake_intensity = intensity / self.pixels_per_unit;
    }

    pub fn is_shaking(&self) -> bool { self.shake_frames > 0 }

    /// Jitter added by the last `update`, in world units.
    pub fn shake_offset(&self) -> Vec2 { self.shake_offset }

    // ── Bounds ─────────────────────────────────────────────────────────────

    /// Keep the view inside `bounds`.  The center may travel only within
    /// `bounds` inset by half the view; when the view is larger than `bounds`
    /// on an axis the center is pinned to the middle of that axis.
    pub fn enable_bounds(&mut self, bounds: RectF) {
        let half = self.dimensions * 0.5;
        self.bounds = Some(CameraBounds {
            edge: bounds,
            center: bounds.inflate(-half.x, -half.y),
        });
    }

    pub fn disable_bounds(&mut self) {
        self.bounds = None;
    }

    /// Outer bounds rectangle, if enabled.
    pub fn bounds(&self) -> Option<RectF> {
        self.bounds.map(|b| b.edge)
    }

    /// Rectangle the target center is clamped into, if bounds are enabled.
    pub fn center_bounds(&self) -> Option<RectF> {
        self.bounds.map(|b| b.center)
    }

    // ── Transform ──────────────────────────────────────────────────────────

    /// Rebuild the world matrix from the actual track:
    /// `invert(translate · rotate · scale) · tilt`.
    ///
    /// The placement scale `dimensions / viewport / scale` maps the camera's
    /// region onto the reference viewport; a non-positive scale is a caller
    /// error.
    fn refresh_world(&mut self) {
        let s = self.dimensions / self.viewport / self.actual.scale;
        let placement = Mat4::from_translation(self.actual.position.extend(0.0))
            * Mat4::from_rotation_z(self.actual.rotation)
            * Mat4::from_scale(s.extend(1.0));
        let tilt = Mat4::from_cols(
            Vec4::X,
            Vec4::Y,
            Vec4::new(0.0, self.tilt, 1.0, 0.0),
            Vec4::W,
        );
        self.world = placement.inverse() * tilt;
    }

    /// Map a world point to surface pixels.
    pub fn transform(&self, point: Vec2) -> Vec2 {
        self.world.transform_point3(point.extend(0.0)).truncate()
    }

    /// Pixels per world unit along each axis at the current actual scale.
    pub fn pixel_scale(&self) -> Vec2 {
        self.viewport / self.dimensions * self.actual.scale
    }

    pub fn world(&self) -> Mat4 { self.world }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from(self.world)
    }

    /// View size in this camera's own units.
    pub fn dimensions(&self) -> Vec2 { self.dimensions }

    pub fn smoothness(&self) -> f32 { self.smoothness }

    /// Offset of `anchor` inside the view, e.g. `Center` → half the dimensions.
    pub fn anchor_position(&self, anchor: Anchor) -> Vec2 {
        anchor.origin(self.dimensions)
    }
}
