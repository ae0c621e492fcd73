//! Packed font atlas and per-glyph metrics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BlitterError, BlitterResult};

/// Where one character lives in the atlas sheet and how it advances the pen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetric {
    /// Character this glyph draws
    pub ch: char,
    /// UV rect in the sheet, normalized, top-left origin: `[u0, v0, u1, v1]`
    pub uv: [f32; 4],
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal pen advance in pixels
    pub advance: f32,
    /// Offset from the pen to the glyph's top-left corner in pixels (+Y down)
    #[serde(default)]
    pub offset: [f32; 2],
}

impl GlyphMetric {
    /// Glyph covers no pixels (e.g. a rasterized space)
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A font's glyph metrics, keyed by character
///
/// Built once during init and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlas {
    name: String,
    glyphs: HashMap<char, GlyphMetric>,
    width: u32,
    height: u32,
    line_height: f32,
}

impl FontAtlas {
    /// Create an atlas from its metrics
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        line_height: f32,
        glyphs: impl IntoIterator<Item = GlyphMetric>,
    ) -> Self {
        Self {
            name: name.into(),
            glyphs: glyphs.into_iter().map(|metric| (metric.ch, metric)).collect(),
            width,
            height,
            line_height,
        }
    }

    /// Get glyph metrics for a character
    pub fn glyph(&self, ch: char) -> BlitterResult<&GlyphMetric> {
        self.glyphs.get(&ch).ok_or(BlitterError::UnknownGlyph(ch))
    }

    /// Whether the atlas has a glyph for `ch`
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Font name this atlas is registered under
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sheet dimensions in pixels
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Distance between consecutive lines in unscaled pixels
    #[must_use]
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Number of glyphs
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Atlas has no glyphs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Metrics sorted by character, the order they are persisted in
    #[must_use]
    pub fn sorted_glyphs(&self) -> Vec<GlyphMetric> {
        let mut glyphs: Vec<GlyphMetric> = self.glyphs.values().copied().collect();
        glyphs.sort_by_key(|metric| metric.ch);
        glyphs
    }
}
