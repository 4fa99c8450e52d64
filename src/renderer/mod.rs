pub mod command;
pub mod stack;
pub mod text;

use glam::Vec2;
use log::warn;

use crate::camera::Camera;
use crate::config::GraphicsConfig;
use crate::content::Texture;
use crate::error::{Error, Result};
use crate::geometry::{Anchor, RectF};

pub use command::{CommandRecorder, DrawBackend, DrawCommand, Frame, QuadCommand, QuadInstance, TextCommand};
pub use stack::CameraStack;
pub use text::Font;

// ── Color ──────────────────────────────────────────────────────────────────

/// Linear RGBA color, each channel in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const GRAY: Self = Self([0.6, 0.6, 0.6, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const BLUE: Self = Self([0.0, 0.0, 1.0, 1.0]);
    pub const YELLOW: Self = Self([1.0, 1.0, 0.0, 1.0]);
    pub const CORNFLOWER_BLUE: Self = Self([0.392, 0.584, 0.929, 1.0]);
    pub const TRANSPARENT: Self = Self([0.0, 0.0, 0.0, 0.0]);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    pub fn alpha(self) -> f32 {
        self.0[3]
    }

    pub fn with_alpha(self, a: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }
}

// ── DrawOptions ────────────────────────────────────────────────────────────

/// Placement options shared by every draw call.
///
/// Defaults: centered anchor, no rotation, unit scale, no flip, always drawn,
/// whole texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    pub anchor: Anchor,
    /// Rotation in radians, relative to world axes.
    pub rotation: f32,
    pub scale: Vec2,
    /// Mirror horizontally (textures only).
    pub flip: bool,
    /// Only draw while the surface is in debug mode.
    pub debug_only: bool,
    /// Texture sub-region in texels (textures only).
    pub source: Option<RectF>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            anchor: Anchor::Center,
            rotation: 0.0,
            scale: Vec2::ONE,
            flip: false,
            debug_only: false,
            source: None,
        }
    }
}

impl DrawOptions {
    pub fn new() -> Self { Self::default() }

    /// Options for debug geometry: drawn only in debug mode.
    pub fn debug() -> Self { Self { debug_only: true, ..Self::default() } }

    pub fn anchor(mut self, anchor: Anchor) -> Self { self.anchor = anchor; self }
    pub fn rotation(mut self, rotation: f32) -> Self { self.rotation = rotation; self }
    pub fn scale(mut self, scale: f32) -> Self { self.scale = Vec2::splat(scale); self }
    pub fn scale_xy(mut self, scale: Vec2) -> Self { self.scale = scale; self }
    pub fn flip(mut self, flip: bool) -> Self { self.flip = flip; self }
    pub fn debug_only(mut self, debug_only: bool) -> Self { self.debug_only = debug_only; self }
    pub fn source(mut self, source: RectF) -> Self { self.source = Some(source); self }
}

// ── RenderSurface ───────────────────────────────────────────────────────────

/// Drawing façade.  Owns the camera stack; every draw call is transformed by
/// the stack top *at call time* and recorded into the open frame.
///
/// Rotations passed to draw calls are relative to world axes: the surface
/// subtracts the active camera's actual rotation, so rotating a camera swings
/// positions around while sprites keep their world orientation.
#[derive(Debug)]
pub struct RenderSurface {
    config: GraphicsConfig,
    stack: CameraStack,
    debug: bool,
    open: bool,
    clear_color: Color,
    commands: Vec<DrawCommand>,
}

impl RenderSurface {
    /// The floor camera covers a 1 × 1 region, so coordinates under it are
    /// fractions of the viewport (`(0.5, 0.5)` is the screen center).
    pub fn new(config: &GraphicsConfig) -> Self {
        let basic = Camera::new(config, Vec2::ONE, Vec2::ZERO).with_smoothness(0.0);
        Self {
            config: config.clone(),
            stack: CameraStack::new(basic),
            debug: config.debug,
            open: false,
            clear_color: Color::BLACK,
            commands: Vec::new(),
        }
    }

    pub fn config(&self) -> &GraphicsConfig { &self.config }

    pub fn debug_mode(&self) -> bool { self.debug }
    pub fn set_debug_mode(&mut self, debug: bool) { self.debug = debug; }

    pub fn is_frame_open(&self) -> bool { self.open }

    // ── Frame bracket ──────────────────────────────────────────────────────

    /// Open a frame that will be cleared to `clear_color`.
    pub fn begin_frame(&mut self, clear_color: Color) -> Result<()> {
        if self.open {
            return Err(Error::FrameAlreadyOpen);
        }
        self.open = true;
        self.clear_color = clear_color;
        self.commands.clear();
        Ok(())
    }

    /// Close the frame and hand back everything recorded since `begin_frame`.
    pub fn end_frame(&mut self) -> Result<Frame> {
        if !self.open {
            return Err(Error::FrameNotOpen);
        }
        self.open = false;
        Ok(Frame {
            clear_color: self.clear_color,
            commands: std::mem::take(&mut self.commands),
        })
    }

    // ── Camera stack ───────────────────────────────────────────────────────

    pub fn push_camera(&mut self, camera: Camera) {
        self.stack.push(camera);
    }

    /// Pop the active camera and return it.  The floor camera stays put.
    pub fn pop_camera(&mut self) -> Option<Camera> {
        self.stack.pop()
    }

    /// Unwind to the floor camera.  Returns whether anything was unwound.
    pub fn reset_camera_stack(&mut self) -> bool {
        self.stack.unwind() > 0
    }

    pub fn camera_depth(&self) -> usize { self.stack.depth() }

    pub fn active_camera(&self) -> &Camera { self.stack.top() }

    /// Mutate the active camera; draws issued afterwards see the change.
    pub fn active_camera_mut(&mut self) -> &mut Camera { self.stack.top_mut() }

    /// The floor camera (normalised screen coordinates).
    pub fn basic_camera(&self) -> &Camera { self.stack.floor() }

    /// Draw inside `camera`'s frame.  A copy of `camera` is pushed for the
    /// duration of `draw` and written back afterwards, so effects applied via
    /// `active_camera_mut` reach the owner.  Pushes leaked by `draw` are
    /// unwound first.
    pub fn with_camera<R>(&mut self, camera: &mut Camera, draw: impl FnOnce(&mut Self) -> R) -> R {
        let base = self.stack.depth();
        self.stack.push(camera.clone());
        let out = draw(self);

        let mut leaked = 0;
        while self.stack.depth() > base + 1 {
            self.stack.pop();
            leaked += 1;
        }
        if leaked > 0 {
            warn!("{leaked} camera(s) pushed inside a camera scope were never popped");
        }
        if self.stack.depth() == base + 1 {
            if let Some(scoped) = self.stack.pop() {
                *camera = scoped;
            }
        } else {
            warn!("camera scope was popped by its own draw code; owner keeps its previous state");
        }
        out
    }

    // ── Primitives ─────────────────────────────────────────────────────────

    fn accepts(&self, options: &DrawOptions, what: &str) -> bool {
        if options.debug_only && !self.debug {
            return false;
        }
        if !self.open {
            warn!("{what} issued outside begin_frame/end_frame; skipped");
            return false;
        }
        true
    }

    /// Draw a texture with its anchor at `position`.  A missing texture
    /// (`None`) is skipped; the content lookup has already logged it.
    pub fn draw_texture(&mut self, texture: Option<&Texture>, color: Color, position: Vec2, options: &DrawOptions) {
        let Some(texture) = texture else { return };
        if !self.accepts(options, "draw_texture") {
            return;
        }
        let dimensions = options.source.map_or_else(|| texture.size(), |r| r.size());
        let camera = self.stack.top();
        let command = QuadCommand {
            texture: Some(texture.id),
            source: options.source,
            color,
            position: camera.transform(position),
            rotation: options.rotation - camera.actual_rotation(),
            origin: options.anchor.origin(dimensions),
            scale: options.scale * camera.actual_scale() * self.config.graphics_scale,
            flip: options.flip,
        };
        self.commands.push(DrawCommand::Quad(command));
    }

    /// Draw `text` with its anchor at `position`.  `None` fonts are skipped.
    pub fn draw_string(&mut self, font: Option<&Font>, text: &str, color: Color, position: Vec2, options: &DrawOptions) {
        let Some(font) = font else { return };
        if !self.accepts(options, "draw_string") {
            return;
        }
        let camera = self.stack.top();
        let command = TextCommand {
            font: font.name.clone(),
            text: text.to_string(),
            color,
            position: camera.transform(position),
            rotation: options.rotation - camera.actual_rotation(),
            origin: options.anchor.origin(font.measure(text)),
            scale: options.scale.x * camera.actual_scale(),
        };
        self.commands.push(DrawCommand::Text(command));
    }

    /// Draw a line `thickness` pixels wide from `p1` to `p2` (world units).
    ///
    /// Shapes are gameplay geometry unless flagged: pass
    /// [`DrawOptions::debug`] for overlays that should only appear in debug
    /// mode.  `DrawOptions::new()` draws in every mode.
    pub fn draw_line(&mut self, color: Color, thickness: f32, p1: Vec2, p2: Vec2, options: &DrawOptions) {
        if !self.accepts(options, "draw_line") {
            return;
        }
        let camera = self.stack.top();
        let diff = (p2 - p1) * camera.pixel_scale();
        let command = QuadCommand {
            texture: None,
            source: None,
            color,
            position: camera.transform(p1),
            rotation: diff.y.atan2(diff.x) - camera.actual_rotation(),
            origin: Vec2::ZERO,
            scale: Vec2::new(diff.length(), thickness),
            flip: false,
        };
        self.commands.push(DrawCommand::Quad(command));
    }

    /// Draw a closed outline through `points`.  Debug-only when built from
    /// [`DrawOptions::debug`], as with [`RenderSurface::draw_line`].
    pub fn draw_polygon(&mut self, color: Color, thickness: f32, points: &[Vec2], options: &DrawOptions) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.draw_line(color, thickness, a, b, options);
        }
    }

    /// Draw a rectangle of `size` (world units) with its anchor at `position`,
    /// rotated by `options.rotation` around that anchor.  A transparent fill
    /// or border is not emitted.
    pub fn draw_rectangle(
        &mut self,
        border: Color,
        fill: Color,
        thickness: f32,
        position: Vec2,
        size: Vec2,
        options: &DrawOptions,
    ) {
        if !self.accepts(options, "draw_rectangle") {
            return;
        }
        let origin = options.anchor.origin(size);
        let (sin, cos) = options.rotation.sin_cos();
        let corner = |local: Vec2| {
            let p = local - origin;
            position + Vec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
        };
        let p1 = corner(Vec2::ZERO);
        let p2 = corner(Vec2::new(size.x, 0.0));
        let p3 = corner(size);
        let p4 = corner(Vec2::new(0.0, size.y));

        if fill.alpha() > 0.0 {
            let camera = self.stack.top();
            let command = QuadCommand {
                texture: None,
                source: None,
                color: fill,
                position: camera.transform(p1),
                rotation: options.rotation - camera.actual_rotation(),
                origin: Vec2::ZERO,
                scale: size * camera.pixel_scale(),
                flip: false,
            };
            self.commands.push(DrawCommand::Quad(command));
        }

        if border.alpha() > 0.0 && thickness > 0.0 {
            self.draw_polygon(border, thickness, &[p1, p2, p3, p4], options);
        }
    }

    /// Cover the whole viewport with black at `alpha`, under the floor camera
    /// regardless of what is currently pushed.
    pub fn draw_fade_overlay(&mut self, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if !self.open {
            warn!("fade overlay issued outside begin_frame/end_frame; skipped");
            return;
        }
        let camera = self.stack.floor();
        let command = QuadCommand {
            texture: None,
            source: None,
            color: Color::BLACK.with_alpha(alpha.min(1.0)),
            position: camera.transform(Vec2::ZERO),
            rotation: -camera.actual_rotation(),
            origin: Vec2::ZERO,
            scale: camera.dimensions() * camera.pixel_scale(),
            flip: false,
        };
        self.commands.push(DrawCommand::Quad(command));
    }
}
