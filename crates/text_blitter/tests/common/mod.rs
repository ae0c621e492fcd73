//! Shared fixtures for the integration tests

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use text_blitter::prelude::*;

/// Printable glyphs of the test bitmap font with their pixel sizes
pub const GLYPHS: &[(char, u32, u32)] = &[
    (' ', 4, 12),
    (',', 2, 12),
    ('.', 2, 12),
    ('a', 6, 12),
    ('b', 6, 12),
    ('d', 6, 12),
    ('e', 6, 12),
    ('g', 6, 12),
    ('h', 6, 12),
    ('i', 2, 12),
    ('l', 3, 12),
    ('o', 6, 12),
    ('r', 5, 12),
    ('S', 6, 12),
    ('s', 5, 12),
    ('y', 6, 12),
];

/// Fresh per-test directory under the system temp dir
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("text_blitter_it_{}_{}", test, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a glyph directory for `font` under `resource_dir`
pub fn write_font(resource_dir: &Path, font: &str) {
    let dir = resource_dir.join(font);
    std::fs::create_dir_all(&dir).unwrap();
    for &(ch, w, h) in GLYPHS {
        let image = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
        image.save(dir.join(format!("{}.png", ch as u32))).unwrap();
    }
}

/// Config with `StandardFont` registered as a glyph directory
pub fn standard_config(resource_dir: &Path) -> BlitterConfig {
    BlitterConfig::with_resource_dir(resource_dir)
        .with_font(FontSourceConfig::image_directory("StandardFont"))
}

/// Blitter over a freshly written `StandardFont`, already initialized
pub fn ready_blitter(test: &str) -> TextBlitter {
    let dir = scratch_dir(test);
    write_font(&dir, "StandardFont");
    let mut blitter = TextBlitter::create(standard_config(&dir), HeadlessBackend::new());
    let report = blitter.init();
    assert!(report.is_complete(), "{report:?}");
    blitter
}
