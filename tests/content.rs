use std::fs;
use std::path::Path;

use glam::Vec2;
use ribbons::content::*;
use ribbons::renderer::Font;

fn write_png(path: &Path, w: u32, h: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbaImage::new(w, h).save(path).unwrap();
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Lay out a small content tree:
///
/// ```text
/// Textures/player.png        8×4
/// Textures/ui/cursor.png     2×2
/// Textures/notes.txt         ignored
/// Textures/broken.png        not a PNG, skipped
/// Fonts/body.json + body.png 64×32 atlas
/// SFX/jump.wav
/// Music/title.ogg
/// ```
fn content_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_png(&root.join("Textures/player.png"), 8, 4);
    write_png(&root.join("Textures/ui/cursor.png"), 2, 2);
    write(&root.join("Textures/notes.txt"), "not an asset");
    write(&root.join("Textures/broken.png"), "definitely not a png");
    write(&root.join("Fonts/body.json"), r#"{ "A": { "x": 0, "y": 0, "w": 8, "h": 12 } }"#);
    write_png(&root.join("Fonts/body.png"), 64, 32);
    write(&root.join("SFX/jump.wav"), "RIFF");
    write(&root.join("Music/title.ogg"), "OggS");
    dir
}

// ── scan ──────────────────────────────────────────────────────────────────────

#[test]
fn scan_indexes_textures_with_header_sizes() {
    let dir = content_tree();
    let library = ContentLibrary::scan(dir.path()).unwrap();
    assert_eq!(library.names(ContentKind::Texture), vec!["player", "ui/cursor"]);
    let player = library.texture("player").unwrap();
    assert_eq!(player.size(), Vec2::new(8.0, 4.0));
    assert_eq!(player.name, "player");
}

#[test]
fn scan_loads_fonts_with_atlas_size() {
    let dir = content_tree();
    let library = ContentLibrary::scan(dir.path()).unwrap();
    let font: Font = library.font("body").unwrap();
    assert_eq!(font.name, "body");
    assert_eq!((font.texture_width, font.texture_height), (64, 32));
    assert_eq!(font.line_height, 12);
}

/// A descriptor font is recognised by its `glyphs` list and keeps the atlas
/// size it declares.
#[test]
fn scan_loads_descriptor_fonts() {
    let dir = content_tree();
    write(
        &dir.path().join("Fonts/ui/title.json"),
        r#"{ "line_height": 24, "texture_width": 512, "texture_height": 256,
             "glyphs": [ { "id": 65, "x": 0, "y": 0, "width": 14, "height": 20,
                           "x_offset": 1, "y_offset": 2, "x_advance": 16 } ] }"#,
    );
    let library = ContentLibrary::scan(dir.path()).unwrap();
    assert_eq!(library.names(ContentKind::Font), vec!["body", "ui/title"]);
    let font = library.font("ui/title").unwrap();
    assert_eq!(font.line_height, 24);
    assert_eq!((font.texture_width, font.texture_height), (512, 256));
    assert_eq!(font.glyphs[&'A'].x_advance, 16);
}

#[test]
fn scan_sorts_sounds_by_folder() {
    let dir = content_tree();
    let library = ContentLibrary::scan(dir.path()).unwrap();
    let jump = library.sound("jump").unwrap();
    assert_eq!(jump.kind, SoundKind::Effect);
    assert!(jump.path.as_ref().is_some_and(|p| p.ends_with("SFX/jump.wav")));
    assert_eq!(library.sound("title").unwrap().kind, SoundKind::Music);
}

#[test]
fn scan_of_empty_root_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let library = ContentLibrary::scan(dir.path()).unwrap();
    assert!(library.names(ContentKind::Texture).is_empty());
    assert!(library.names(ContentKind::Font).is_empty());
    assert!(library.names(ContentKind::Sound).is_empty());
}

// ── lookup ────────────────────────────────────────────────────────────────────

#[test]
fn missing_names_return_none() {
    let library = ContentLibrary::new();
    assert!(library.texture("nope").is_none());
    assert!(library.font("nope").is_none());
    assert!(library.sound("nope").is_none());
}

#[test]
fn re_registering_a_texture_keeps_its_id() {
    let mut library = ContentLibrary::new();
    let a = library.add_texture("a", 1, 1);
    let b = library.add_texture("b", 1, 1);
    let a2 = library.add_texture("a", 4, 4);
    assert_ne!(a.id, b.id);
    assert_eq!(a.id, a2.id);
    assert_eq!(library.texture("a").unwrap().width, 4);
}

/// Lookups go through the trait object the contexts receive.
#[test]
fn library_works_as_a_content_source() {
    let mut library = ContentLibrary::new();
    library.add_sound("click", SoundKind::Effect, None);
    let source: &dyn ContentSource = &library;
    assert_eq!(source.sound("click").unwrap().name, "click");
}
