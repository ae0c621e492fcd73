//! Font atlas system
//!
//! Packing, persistence and loading of bitmap font atlases.
//!
//! - [`sources`]: glyph bitmaps from an image directory or a TrueType file
//! - [`packer`]: shelf packing into one RGBA8 sheet with per-glyph UVs
//! - [`sidecar`]: sheet PNG + RON metrics on disk, and loading them back
//! - [`FontAtlasTable`]: loaded atlases keyed by font name

mod font_atlas;
pub mod packer;
pub mod sidecar;
pub mod sources;
mod table;

pub use font_atlas::{FontAtlas, GlyphMetric};
pub use packer::{AtlasPacker, PackedAtlas};
pub use sources::{
    source_for, GlyphBitmap, GlyphSet, GlyphSource, ImageDirectorySource, TrueTypeSource,
};
pub use table::FontAtlasTable;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::{Path, PathBuf};

    use image::{Rgba, RgbaImage};

    /// Fresh per-test directory under the system temp dir
    pub fn scratch_dir(test: &str) -> PathBuf {
        let name = format!("text_blitter_{}_{}", test, std::process::id());
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `(char, width, height)` glyphs as `<code point>.png` files
    pub fn write_glyph_dir(dir: &Path, glyphs: &[(char, u32, u32)]) {
        std::fs::create_dir_all(dir).unwrap();
        for &(ch, w, h) in glyphs {
            let image = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
            image.save(dir.join(format!("{}.png", ch as u32))).unwrap();
        }
    }
}
