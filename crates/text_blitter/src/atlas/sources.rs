//! Glyph sources: where bitmaps come from before packing
//!
//! - [`ImageDirectorySource`]: one PNG per glyph, the bitmap-font workflow
//! - [`TrueTypeSource`]: rasterizes a character range with `fontdue`

use std::fs;
use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};

use crate::config::{FontSourceConfig, GlyphSourceKind};
use crate::error::{BlitterError, BlitterResult};

/// One glyph's pixels and placement data, ready for packing
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    /// Character drawn by this bitmap
    pub ch: char,
    /// RGBA8 pixels
    pub image: RgbaImage,
    /// Pen advance in pixels
    pub advance: f32,
    /// Pen to top-left offset in pixels (+Y down)
    pub offset: [f32; 2],
}

/// Everything a source yields for one font
#[derive(Debug, Clone, Default)]
pub struct GlyphSet {
    /// Glyph bitmaps, in no particular order
    pub glyphs: Vec<GlyphBitmap>,
    /// Line advance in pixels
    pub line_height: f32,
}

/// Produces the glyph bitmaps of one font
pub trait GlyphSource {
    /// Collect every glyph this source provides
    fn collect(&self) -> BlitterResult<GlyphSet>;

    /// Human readable origin for logs
    fn describe(&self) -> String;
}

/// Build the source a font config asks for
///
/// Relative paths resolve against `resource_dir`.
#[must_use]
pub fn source_for(font: &FontSourceConfig, resource_dir: &Path) -> Box<dyn GlyphSource> {
    match &font.source {
        GlyphSourceKind::ImageDirectory { path } => {
            let dir = path
                .as_ref()
                .map_or_else(|| resource_dir.join(&font.name), |p| resource_dir.join(p));
            Box::new(ImageDirectorySource::new(dir))
        }
        GlyphSourceKind::TrueType {
            path,
            pixel_size,
            first_char,
            last_char,
        } => Box::new(TrueTypeSource::new(
            resource_dir.join(path),
            *pixel_size,
            *first_char,
            *last_char,
        )),
    }
}

/// Directory of `<code point>.png` glyph images
///
/// Advance equals the image width, the line height is the tallest glyph.
#[derive(Debug, Clone)]
pub struct ImageDirectorySource {
    dir: PathBuf,
}

impl ImageDirectorySource {
    /// Source reading from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn glyph_char(path: &Path) -> Option<char> {
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let ch = stem.parse::<u32>().ok().and_then(char::from_u32)?;
        // `+65` and `065` would alias `65`; only the canonical spelling counts
        (stem == (ch as u32).to_string()).then_some(ch)
    }
}

impl GlyphSource for ImageDirectorySource {
    fn collect(&self) -> BlitterResult<GlyphSet> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            BlitterError::missing(&self.dir, format!("glyph directory unreadable: {e}"))
        })?;

        let mut set = GlyphSet::default();
        for entry in entries {
            let path = entry?.path();
            let Some(ch) = Self::glyph_char(&path) else {
                log::debug!("Skipping non-glyph file {:?}", path);
                continue;
            };

            let image = image::open(&path)?.to_rgba8();
            set.line_height = set.line_height.max(image.height() as f32);
            set.glyphs.push(GlyphBitmap {
                ch,
                advance: image.width() as f32,
                offset: [0.0, 0.0],
                image,
            });
        }

        log::debug!("Collected {} glyph images from {:?}", set.glyphs.len(), self.dir);
        Ok(set)
    }

    fn describe(&self) -> String {
        format!("glyph directory {}", self.dir.display())
    }
}

/// TrueType/OpenType font rasterized over an inclusive character range
#[derive(Debug, Clone)]
pub struct TrueTypeSource {
    path: PathBuf,
    pixel_size: f32,
    first_char: char,
    last_char: char,
}

impl TrueTypeSource {
    /// Source rasterizing `first_char..=last_char` from the font at `path`
    pub fn new(
        path: impl Into<PathBuf>,
        pixel_size: f32,
        first_char: char,
        last_char: char,
    ) -> Self {
        Self {
            path: path.into(),
            pixel_size,
            first_char,
            last_char,
        }
    }
}

impl GlyphSource for TrueTypeSource {
    fn collect(&self) -> BlitterResult<GlyphSet> {
        let bytes = fs::read(&self.path)
            .map_err(|e| BlitterError::missing(&self.path, format!("font file unreadable: {e}")))?;
        let settings = FontSettings {
            scale: self.pixel_size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|e| BlitterError::missing(&self.path, format!("fontdue error: {e}")))?;

        let (ascent, line_height) = font
            .horizontal_line_metrics(self.pixel_size)
            .map_or((self.pixel_size, self.pixel_size * 1.2), |m| (m.ascent, m.new_line_size));

        let mut set = GlyphSet {
            glyphs: Vec::new(),
            line_height,
        };
        for ch in self.first_char..=self.last_char {
            if ch != ' ' && font.lookup_glyph_index(ch) == 0 {
                log::debug!("Font {:?} has no glyph for {:?}", self.path, ch);
                continue;
            }

            let (metrics, coverage) = font.rasterize(ch, self.pixel_size);
            let width = u32::try_from(metrics.width).unwrap_or(0);
            let height = u32::try_from(metrics.height).unwrap_or(0);
            // Coverage goes to alpha so the sheet tints like any bitmap glyph
            let image = RgbaImage::from_fn(width, height, |x, y| {
                let alpha = coverage[y as usize * metrics.width + x as usize];
                Rgba([255, 255, 255, alpha])
            });

            set.glyphs.push(GlyphBitmap {
                ch,
                image,
                advance: metrics.advance_width,
                offset: [
                    metrics.xmin as f32,
                    ascent - (metrics.ymin as f32 + metrics.height as f32),
                ],
            });
        }

        log::info!(
            "Rasterized {} glyphs at {}px from {:?}",
            set.glyphs.len(),
            self.pixel_size,
            self.path
        );
        Ok(set)
    }

    fn describe(&self) -> String {
        format!("font file {} at {}px", self.path.display(), self.pixel_size)
    }
}
