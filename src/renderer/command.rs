use glam::Vec2;

use crate::content::TextureId;
use crate::geometry::RectF;

use super::Color;

// ── Draw commands ────────────────────────────────────────────────────────────

/// A quad already transformed into surface pixels.
///
/// `texture == None` is the solid 1×1 white square used for lines, rectangle
/// fills and the fade overlay; its `scale` is therefore the size in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadCommand {
    pub texture: Option<TextureId>,
    /// Sub-region of the texture in texels; `None` draws the whole texture.
    pub source: Option<RectF>,
    pub color: Color,
    /// Pixel position of the quad's origin point.
    pub position: Vec2,
    /// Rotation in radians around `origin`.
    pub rotation: f32,
    /// Pivot inside the quad, in texels (pre-scale).
    pub origin: Vec2,
    pub scale: Vec2,
    /// Mirror horizontally.
    pub flip: bool,
}

/// A string already transformed into surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextCommand {
    /// Content name of the font.
    pub font: String,
    pub text: String,
    pub color: Color,
    pub position: Vec2,
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Quad(QuadCommand),
    Text(TextCommand),
}

// ── Frame ────────────────────────────────────────────────────────────────────

/// Everything drawn between one `begin_frame` / `end_frame` pair, in
/// submission order.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub clear_color: Color,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn quads(&self) -> impl Iterator<Item = &QuadCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Quad(q) => Some(q),
            DrawCommand::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            DrawCommand::Quad(_) => None,
        })
    }

    /// Flatten every quad into GPU instance data, in submission order.
    pub fn quad_instances(&self) -> Vec<QuadInstance> {
        self.quads().map(QuadInstance::from).collect()
    }
}

/// Per-instance quad data for instanced rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    pub position: [f32; 2],
    pub origin: [f32; 2],
    pub scale: [f32; 2],
    pub rotation: f32,
    /// Bit 0: horizontal flip.  Bit 1: textured (else solid white).
    pub flags: u32,
    pub color: [f32; 4],
    /// Source region `[x, y, w, h]` in texels; all zero means the whole texture.
    pub region: [f32; 4],
    /// Texture id, or `u32::MAX` for the solid square.
    pub texture: u32,
}

impl QuadInstance {
    pub const FLAG_FLIP: u32 = 1;
    pub const FLAG_TEXTURED: u32 = 1 << 1;
    pub const NO_TEXTURE: u32 = u32::MAX;
}

impl From<&QuadCommand> for QuadInstance {
    fn from(q: &QuadCommand) -> Self {
        let mut flags = 0;
        if q.flip {
            flags |= Self::FLAG_FLIP;
        }
        if q.texture.is_some() {
            flags |= Self::FLAG_TEXTURED;
        }
        let region = q
            .source
            .map(|r| [r.x, r.y, r.width, r.height])
            .unwrap_or([0.0; 4]);
        Self {
            position: q.position.to_array(),
            origin: q.origin.to_array(),
            scale: q.scale.to_array(),
            rotation: q.rotation,
            flags,
            color: q.color.0,
            region,
            texture: q.texture.map_or(Self::NO_TEXTURE, |t| t.0),
        }
    }
}

// ── Backends ─────────────────────────────────────────────────────────────────

/// Consumer of finished frames (a GPU renderer, a software rasteriser, a
/// recorder).  Primitive rasterisation lives entirely behind this trait.
pub trait DrawBackend {
    fn submit(&mut self, frame: &Frame);
}

/// Backend that keeps every submitted frame in memory.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    frames: Vec<Frame>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl DrawBackend for CommandRecorder {
    fn submit(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
