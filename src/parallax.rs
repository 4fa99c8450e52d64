//! Scrolling multi-layer backgrounds drawn under their own camera.

use glam::Vec2;
use log::warn;
use serde::Deserialize;

use crate::camera::Camera;
use crate::config::GraphicsConfig;
use crate::content::{ContentSource, Texture};
use crate::context::FrameTime;
use crate::error::Result;
use crate::geometry::Anchor;
use crate::renderer::{Color, DrawOptions, RenderSurface};

// ── Definition (JSON-facing) ─────────────────────────────────────────────────

/// On-disk description of a background:
///
/// ```json
/// {
///   "color": [0.1, 0.1, 0.2, 1.0],
///   "layers": [
///     { "texture": "bg/sky", "distance": 8.0, "anchor": "TopLeft", "repeat": [true, false] },
///     { "texture": "bg/hills", "distance": 2.0, "velocity": [-0.5, 0.0] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct ParallaxDef {
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    pub layers: Vec<LayerDef>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LayerDef {
    /// Content name of the layer texture.
    pub texture: String,
    /// How far behind the tracked camera the layer sits; 1 moves at half the
    /// camera's speed, larger values move slower.
    pub distance: f32,
    /// Resting position as a fraction of the view.
    pub offset: [f32; 2],
    /// Constant drift in world units per second.
    pub velocity: [f32; 2],
    pub scale: f32,
    pub anchor: Anchor,
    pub repeat: [bool; 2],
}

impl Default for LayerDef {
    fn default() -> Self {
        Self {
            texture: String::new(),
            distance: 1.0,
            offset: [0.0, 0.0],
            velocity: [0.0, 0.0],
            scale: 1.0,
            anchor: Anchor::BottomLeft,
            repeat: [true, false],
        }
    }
}

fn default_color() -> [f32; 4] {
    Color::BLACK.0
}

// ── Runtime ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ParallaxLayer {
    pub texture: Texture,
    pub distance: f32,
    /// Top-left of the first tile when the tracked camera sits at the origin,
    /// as a fraction of the view.
    pub rest: Vec2,
    pub velocity: Vec2,
    pub scale: f32,
    pub repeat_x: bool,
    pub repeat_y: bool,
}

impl ParallaxLayer {
    /// Build a layer from its definition.  The anchor is resolved here: the
    /// texture's `anchor` point lands on the view's `anchor` point, shifted by
    /// `offset`.
    pub fn new(texture: Texture, def: &LayerDef, config: &GraphicsConfig) -> Self {
        let fraction_of_view = texture.size() * def.scale / config.viewport();
        let rest = Vec2::from(def.offset) - def.anchor.origin(fraction_of_view) + def.anchor.origin(Vec2::ONE);
        Self {
            texture,
            distance: def.distance,
            rest,
            velocity: Vec2::from(def.velocity),
            scale: def.scale,
            repeat_x: def.repeat[0],
            repeat_y: def.repeat[1],
        }
    }

    /// Tile size in world units.
    fn tile(&self, pixels_per_unit: f32) -> Vec2 {
        self.texture.size() * self.scale / pixels_per_unit
    }
}

/// A stack of [`ParallaxLayer`]s scrolled relative to a tracked camera.
///
/// The background keeps its own camera fixed at the origin; layers move
/// instead, by the tracked camera's horizontal travel from `origin` divided by
/// each layer's distance.
#[derive(Clone, Debug)]
pub struct ParallaxBackground {
    camera: Camera,
    layers: Vec<ParallaxLayer>,
    color: Color,
    origin: Vec2,
    tracked: Vec2,
    pixels_per_unit: f32,
}

impl ParallaxBackground {
    /// `view` supplies the view size; its current position becomes the
    /// scrolling origin.
    pub fn new(config: &GraphicsConfig, view: &Camera, layers: Vec<ParallaxLayer>, color: Color) -> Self {
        let camera = Camera::new(config, view.dimensions(), Vec2::ZERO).with_smoothness(0.0);
        Self {
            camera,
            layers,
            color,
            origin: view.actual_position(),
            tracked: view.actual_position(),
            pixels_per_unit: config.pixels_per_unit,
        }
    }

    /// Parse a definition and resolve its textures.  Layers whose texture is
    /// missing are dropped with a warning.
    pub fn from_json(
        json: &str,
        content: &dyn ContentSource,
        config: &GraphicsConfig,
        view: &Camera,
    ) -> Result<Self> {
        let def: ParallaxDef = serde_json::from_str(json)?;
        let layers = def
            .layers
            .iter()
            .filter_map(|layer| match content.texture(&layer.texture) {
                Some(texture) => Some(ParallaxLayer::new(texture, layer, config)),
                None => {
                    warn!("parallax layer '{}' dropped", layer.texture);
                    None
                }
            })
            .collect();
        Ok(Self::new(config, view, layers, Color(def.color)))
    }

    pub fn layers(&self) -> &[ParallaxLayer] { &self.layers }

    /// Suggested clear color behind the layers.
    pub fn color(&self) -> Color { self.color }

    pub fn camera(&self) -> &Camera { &self.camera }

    /// Follow `view`'s actual position.
    pub fn track(&mut self, view: &Camera) {
        self.tracked = view.actual_position();
    }

    /// Horizontal scroll caused by the tracked camera, before layer distance.
    pub fn drift(&self) -> Vec2 {
        Vec2::new((self.tracked.x - self.origin.x) * 0.5, 0.0)
    }

    /// Draw every layer back to front under the background camera.
    pub fn draw(&self, surface: &mut RenderSurface, time: FrameTime) {
        let view = self.camera.dimensions();
        let drift = self.drift();
        let options = DrawOptions::new().anchor(Anchor::TopLeft);

        surface.push_camera(self.camera.clone());
        for layer in &self.layers {
            let tile = layer.tile(self.pixels_per_unit);
            if (layer.repeat_x && tile.x <= 0.0) || (layer.repeat_y && tile.y <= 0.0) {
                warn!("parallax layer '{}' has an empty texture; skipped", layer.texture.name);
                continue;
            }
            let layer_options = options.scale(layer.scale);

            let mut start = layer.rest * view - drift / layer.distance + layer.velocity * time.total;
            if layer.repeat_x {
                start.x = wrap_into(start.x, tile.x);
            }
            if layer.repeat_y {
                start.y = wrap_into(start.y, tile.y);
            }

            let mut x = start.x;
            while x <= view.x {
                let mut y = start.y;
                while y <= view.y {
                    surface.draw_texture(Some(&layer.texture), Color::WHITE, Vec2::new(x, y), &layer_options);
                    if !layer.repeat_y {
                        break;
                    }
                    y += tile.y;
                }
                if !layer.repeat_x {
                    break;
                }
                x += tile.x;
            }
        }
        surface.pop_camera();
    }
}

/// Shift `value` by whole tiles into `(-tile, 0]`.
fn wrap_into(value: f32, tile: f32) -> f32 {
    let wrapped = value.rem_euclid(tile);
    if wrapped > 0.0 { wrapped - tile } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_into_lands_in_one_tile_before_zero() {
        assert_eq!(wrap_into(0.0, 4.0), 0.0);
        assert_eq!(wrap_into(1.0, 4.0), -3.0);
        assert_eq!(wrap_into(-5.0, 4.0), -1.0);
        assert_eq!(wrap_into(-8.0, 4.0), 0.0);
    }
}
