use std::collections::HashMap;

use glam::Vec2;
use serde::Deserialize;

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The Unicode character this glyph represents.
    pub id: char,
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    /// Pixel width of the glyph region.
    pub width: u32,
    /// Pixel height of the glyph region.
    pub height: u32,
    /// Horizontal offset applied when rendering (may be negative).
    pub x_offset: i32,
    /// Vertical offset applied when rendering (may be negative).
    pub y_offset: i32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: u32,
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// A bitmap font described by a JSON glyph table.
///
/// The surface only needs metrics (for anchoring text); rasterising the
/// glyphs is the draw backend's job, keyed by `name`.
#[derive(Debug, Clone)]
pub struct Font {
    /// Content name the backend resolves the atlas by.
    pub name: String,
    /// All glyphs in this font, keyed by character.
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in pixels.
    pub line_height: u32,
    /// Width of the backing texture atlas in pixels.
    pub texture_width: u32,
    /// Height of the backing texture atlas in pixels.
    pub texture_height: u32,
}

impl Font {
    /// Deserialise a `Font` from the full descriptor format (code-point keyed
    /// glyph list with offsets and advances).
    pub fn from_json(name: &str, json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFont = serde_json::from_str(json)?;

        let glyphs = raw
            .glyphs
            .into_iter()
            .filter_map(|g| {
                // Skip any code-point that isn't a valid Unicode scalar value.
                char::from_u32(g.id).map(|ch| {
                    (ch, Glyph {
                        id: ch,
                        x: g.x,
                        y: g.y,
                        width: g.width,
                        height: g.height,
                        x_offset: g.x_offset,
                        y_offset: g.y_offset,
                        x_advance: g.x_advance,
                    })
                })
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            glyphs,
            line_height: raw.line_height,
            texture_width: raw.texture_width,
            texture_height: raw.texture_height,
        })
    }

    /// Deserialise a `Font` from the **atlas JSON** format, where each key is a
    /// single character and the value is a pixel rectangle in the atlas:
    ///
    /// ```json
    /// { "A": { "x": 0, "y": 0, "w": 16, "h": 24 }, ... }
    /// ```
    ///
    /// `x_advance` defaults to the glyph width; offsets are zero (uniform-grid
    /// atlas fonts).
    pub fn from_atlas_json(
        name: &str,
        json: &str,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct AtlasEntry { x: u32, y: u32, w: u32, h: u32 }

        let raw: HashMap<String, AtlasEntry> = serde_json::from_str(json)?;

        let glyphs: HashMap<char, Glyph> = raw
            .into_iter()
            .filter_map(|(key, entry)| {
                // Only accept single-character keys.
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() { return None; }

                Some((ch, Glyph {
                    id: ch,
                    x: entry.x,
                    y: entry.y,
                    width:    entry.w,
                    height:   entry.h,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: entry.w,
                }))
            })
            .collect();

        let line_height = glyphs.values().map(|g| g.height).max().unwrap_or(0);

        Ok(Self { name: name.to_string(), glyphs, line_height, texture_width, texture_height })
    }

    /// Pixel size of `text` laid out at 1:1 scale.
    ///
    /// Width is the widest line (sum of advances, unknown characters add
    /// nothing); height is `line_count * line_height`.
    pub fn measure(&self, text: &str) -> Vec2 {
        let mut width = 0u32;
        let mut lines = 0u32;
        for line in text.split('\n') {
            lines += 1;
            let w: u32 = line
                .chars()
                .filter_map(|ch| self.glyphs.get(&ch))
                .map(|g| g.x_advance)
                .sum();
            width = width.max(w);
        }
        Vec2::new(width as f32, (lines * self.line_height) as f32)
    }
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────
//
// Character IDs are stored as u32 in JSON (Unicode code points); we convert
// them to `char` when building the public `Font`.

#[derive(Deserialize)]
struct RawGlyph {
    /// Unicode code point (e.g. 65 for 'A').
    id: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    x_offset: i32,
    y_offset: i32,
    x_advance: u32,
}

#[derive(Deserialize)]
struct RawFont {
    line_height: u32,
    texture_width: u32,
    texture_height: u32,
    glyphs: Vec<RawGlyph>,
}
