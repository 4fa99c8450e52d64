use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::error::{Error, Result};

// ── GraphicsConfig ────────────────────────────────────────────────────────────

/// Immutable graphics constants shared by the render surface and every camera.
///
/// - **viewport** dimensions are the reference resolution in pixels that the
///   world is mapped onto.
/// - **pixels_per_unit** converts world units to pixels (used for shake
///   intensity and parallax tiling).
/// - **graphics_scale** is the extra factor applied to textured quads.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Reference viewport width in pixels.
    pub viewport_width: u32,
    /// Reference viewport height in pixels.
    pub viewport_height: u32,
    /// World units → pixels.
    pub pixels_per_unit: f32,
    /// Global multiplier for textured-quad scale.
    pub graphics_scale: f32,
    /// Viewer tilt in radians; feeds the z → y shear of the world matrix.
    pub viewer_tilt: f32,
    /// Upper clamp margin for camera smoothness (`smoothness <= 1 - epsilon`).
    pub epsilon: f32,
    /// Smoothness given to cameras that don't specify one.
    pub default_camera_smoothness: f32,
    /// A fade is complete once `|alpha - target|` drops below this.
    pub fade_epsilon: f32,
    /// Whether debug-only geometry is drawn.
    pub debug: bool,
}

impl Default for GraphicsConfig {
    /// 1280 × 720 at 64 px per unit, debug geometry on in debug builds.
    fn default() -> Self {
        Self {
            viewport_width:            1280,
            viewport_height:           720,
            pixels_per_unit:           64.0,
            graphics_scale:            1.0,
            viewer_tilt:               0.0,
            epsilon:                   1e-4,
            default_camera_smoothness: 0.15,
            fade_epsilon:              1e-3,
            debug:                     cfg!(debug_assertions),
        }
    }
}

impl GraphicsConfig {
    /// Parse a config from JSON.  Absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "graphics config loaded from {}: {}x{} @ {} px/unit",
            path.display(),
            config.viewport_width,
            config.viewport_height,
            config.pixels_per_unit
        );
        Ok(config)
    }

    /// Viewport dimensions as a vector.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width as f32, self.viewport_height as f32)
    }

    /// Viewport dimensions expressed in world units.
    pub fn viewport_units(&self) -> Vec2 {
        self.viewport() / self.pixels_per_unit
    }

    /// `viewport_width / viewport_height`, or `0.0` when the height is zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_height == 0 {
            return 0.0;
        }
        self.viewport_width as f32 / self.viewport_height as f32
    }
}
