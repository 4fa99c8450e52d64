//! Named content lookup.
//!
//! The core never decodes assets.  It needs a texture's pixel size (for
//! anchors), a font's glyph metrics (for text anchors) and a sound's identity
//! (to hand to an audio collaborator).  `ContentSource` is the lookup the
//! contexts are given; `ContentLibrary` is an in-memory implementation that
//! can index a content directory by naming convention.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::renderer::Font;

// ── Handles ──────────────────────────────────────────────────────────────────

/// Backend-facing texture identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub id: TextureId,
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundKind {
    Effect,
    Music,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sound {
    pub name: String,
    pub kind: SoundKind,
    /// Source file, when the sound was discovered on disk.
    pub path: Option<PathBuf>,
}

// ── ContentSource ───────────────────────────────────────────────────────────

/// Lookup of named content.  A miss returns `None` after logging a warning,
/// so the caller can keep running and skip whatever needed the asset.
pub trait ContentSource {
    fn texture(&self, name: &str) -> Option<Texture>;
    fn font(&self, name: &str) -> Option<Font>;
    fn sound(&self, name: &str) -> Option<Sound>;
}

// ── ContentLibrary ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Texture,
    Font,
    Sound,
}

/// In-memory content registry keyed by name.
#[derive(Debug, Default)]
pub struct ContentLibrary {
    textures: BTreeMap<String, Texture>,
    fonts: BTreeMap<String, Font>,
    sounds: BTreeMap<String, Sound>,
    next_texture: u32,
}

impl ContentLibrary {
    /// Category folders scanned by [`ContentLibrary::scan`].
    pub const TEXTURE_DIR: &'static str = "Textures";
    pub const FONT_DIR: &'static str = "Fonts";
    pub const SFX_DIR: &'static str = "SFX";
    pub const MUSIC_DIR: &'static str = "Music";

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture of the given pixel size and return its handle.
    /// Re-registering a name replaces the entry but keeps its id.
    pub fn add_texture(&mut self, name: &str, width: u32, height: u32) -> Texture {
        let id = match self.textures.get(name) {
            Some(existing) => existing.id,
            None => {
                let id = TextureId(self.next_texture);
                self.next_texture += 1;
                id
            }
        };
        let texture = Texture { id, name: name.to_string(), width, height };
        self.textures.insert(name.to_string(), texture.clone());
        texture
    }

    /// Register a font under `font.name`.
    pub fn add_font(&mut self, font: Font) {
        self.fonts.insert(font.name.clone(), font);
    }

    pub fn add_sound(&mut self, name: &str, kind: SoundKind, path: Option<PathBuf>) {
        let sound = Sound { name: name.to_string(), kind, path };
        self.sounds.insert(name.to_string(), sound);
    }

    /// Known names of one kind, sorted.
    pub fn names(&self, kind: ContentKind) -> Vec<String> {
        match kind {
            ContentKind::Texture => self.textures.keys().cloned().collect(),
            ContentKind::Font => self.fonts.keys().cloned().collect(),
            ContentKind::Sound => self.sounds.keys().cloned().collect(),
        }
    }

    /// Index a content directory by naming convention:
    ///
    /// ```text
    /// <root>/Textures/**.png   texture, size read from the PNG header
    /// <root>/Fonts/**.json     font: a descriptor with a `glyphs` list, or an
    ///                          atlas map whose sibling .png gives the atlas size
    /// <root>/SFX/**.{wav,ogg}  sound effect
    /// <root>/Music/**.{wav,ogg} music
    /// ```
    ///
    /// An asset's name is its path below the category folder without the
    /// extension, `/`-separated (`Textures/ui/cursor.png` → `ui/cursor`).
    /// Missing category folders are fine; unreadable files are logged and
    /// skipped.  Only a failing directory walk is an error.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut library = Self::new();

        for (name, path) in collect(&root.join(Self::TEXTURE_DIR), &["png"])? {
            match image::image_dimensions(&path) {
                Ok((w, h)) => { library.add_texture(&name, w, h); }
                Err(source) => warn!("{}", Error::Image { path, source }),
            }
        }

        for (name, path) in collect(&root.join(Self::FONT_DIR), &["json"])? {
            match load_font(&name, &path) {
                Ok(font) => library.add_font(font),
                Err(e) => warn!("font '{name}' skipped: {e}"),
            }
        }

        for (dir, kind) in [(Self::SFX_DIR, SoundKind::Effect), (Self::MUSIC_DIR, SoundKind::Music)] {
            for (name, path) in collect(&root.join(dir), &["wav", "ogg"])? {
                library.add_sound(&name, kind, Some(path));
            }
        }

        debug!(
            "content indexed from {}: {} textures, {} fonts, {} sounds",
            root.display(),
            library.textures.len(),
            library.fonts.len(),
            library.sounds.len()
        );
        Ok(library)
    }
}

impl ContentSource for ContentLibrary {
    fn texture(&self, name: &str) -> Option<Texture> {
        let found = self.textures.get(name).cloned();
        if found.is_none() {
            warn!("texture '{name}' not found");
        }
        found
    }

    fn font(&self, name: &str) -> Option<Font> {
        let found = self.fonts.get(name).cloned();
        if found.is_none() {
            warn!("font '{name}' not found");
        }
        found
    }

    fn sound(&self, name: &str) -> Option<Sound> {
        let found = self.sounds.get(name).cloned();
        if found.is_none() {
            warn!("sound '{name}' not found");
        }
        found
    }
}

/// Files under `dir` with one of `extensions`, as `(name, path)` pairs.
/// The first file claiming a name wins.
fn collect(dir: &Path, extensions: &[&str]) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)));
        if !matches {
            continue;
        }
        let Some(name) = asset_name(dir, path) else { continue };
        if found.contains_key(&name) {
            warn!("duplicate content name '{name}' from {}; skipping", path.display());
            continue;
        }
        found.insert(name, path.to_path_buf());
    }
    Ok(found.into_iter().collect())
}

fn asset_name(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?.with_extension("");
    let parts: Vec<&str> = relative.iter().map(|p| p.to_str()).collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn load_font(name: &str, path: &Path) -> Result<Font> {
    let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    if value.get("glyphs").is_some_and(serde_json::Value::is_array) {
        return Ok(Font::from_json(name, &json)?);
    }
    let atlas = path.with_extension("png");
    let (w, h) = if atlas.is_file() {
        image::image_dimensions(&atlas).map_err(|source| Error::Image { path: atlas, source })?
    } else {
        (0, 0)
    };
    Ok(Font::from_atlas_json(name, &json, w, h)?)
}
