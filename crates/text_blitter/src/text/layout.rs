//! Text layout engine
//!
//! Walks styled runs with a pen cursor and resolves each character to a
//! screen-space [`GlyphPlacement`].
//!
//! # Layout Coordinate System
//!
//! - Pixels, origin at the top-left of the viewport
//! - +X points right, +Y points down
//! - The pen starts at the caller's origin and marks the top-left of the
//!   current glyph box; `\n` returns it to `origin.x` and moves it down one
//!   scaled line height
//!
//! There is no automatic wrapping. Characters missing from the atlas are
//! skipped without advancing the pen.

use super::markup::{parse_markup, StyledRun};
use crate::atlas::{FontAtlas, GlyphMetric};
use crate::foundation::math::{Vec2, Vec3};

/// One glyph instance resolved to a screen-space quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Character drawn
    pub ch: char,
    /// Top-left corner in pixels
    pub position: Vec2,
    /// Quad size in pixels
    pub size: Vec2,
    /// Top-left UV in the atlas
    pub uv_min: Vec2,
    /// Bottom-right UV in the atlas
    pub uv_max: Vec2,
    /// RGB color
    pub color: Vec3,
    /// Zero-based line the glyph was laid out on
    pub line: u32,
}

/// Per-call layout inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Pen start in pixels
    pub origin: Vec2,
    /// Viewport width and height in pixels
    pub viewport: Vec2,
    /// Uniform scale applied to metrics
    pub scale: f32,
    /// Drop quads entirely outside the viewport
    pub cull_offscreen: bool,
}

impl LayoutParams {
    /// Params without culling
    #[must_use]
    pub fn new(origin: Vec2, viewport: Vec2, scale: f32) -> Self {
        Self {
            origin,
            viewport,
            scale,
            cull_offscreen: false,
        }
    }

    fn is_offscreen(&self, position: &Vec2, size: &Vec2) -> bool {
        position.x + size.x < 0.0
            || position.y + size.y < 0.0
            || position.x > self.viewport.x
            || position.y > self.viewport.y
    }
}

/// Bounding box for laid out text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl TextBounds {
    /// Smallest box around all placements, or a zero box at `origin`
    #[must_use]
    pub fn from_placements(placements: &[GlyphPlacement], origin: Vec2) -> Self {
        let empty = Self {
            min_x: origin.x,
            min_y: origin.y,
            max_x: origin.x,
            max_y: origin.y,
        };
        placements
            .iter()
            .map(|p| Self {
                min_x: p.position.x,
                min_y: p.position.y,
                max_x: p.position.x + p.size.x,
                max_y: p.position.y + p.size.y,
            })
            .reduce(|a, b| Self {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
            .unwrap_or(empty)
    }

    /// Calculate width of bounding box
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Calculate height of bounding box
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Layout engine over one font atlas
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    font_atlas: &'a FontAtlas,
}

impl<'a> TextLayout<'a> {
    /// Create a layout engine for `font_atlas`
    #[must_use]
    pub const fn new(font_atlas: &'a FontAtlas) -> Self {
        Self { font_atlas }
    }

    /// Parse markup in `text` and lay out the resulting runs
    #[must_use]
    pub fn layout_text(&self, text: &str, params: &LayoutParams) -> Vec<GlyphPlacement> {
        self.layout_runs(&parse_markup(text), params)
    }

    /// Lay out styled runs in order
    ///
    /// Output order follows the input characters. Identical inputs always
    /// produce identical placements.
    #[must_use]
    pub fn layout_runs(
        &self,
        runs: &[StyledRun<'_>],
        params: &LayoutParams,
    ) -> Vec<GlyphPlacement> {
        let scale = params.scale;
        let line_advance = self.font_atlas.line_height() * scale;
        let mut pen = params.origin;
        let mut line = 0u32;
        let mut placements = Vec::with_capacity(runs.iter().map(|r| r.text.len()).sum());

        for run in runs {
            for ch in run.text.chars() {
                if ch == '\n' {
                    pen.x = params.origin.x;
                    pen.y += line_advance;
                    line += 1;
                    continue;
                }

                let Ok(glyph) = self.font_atlas.glyph(ch) else {
                    log::trace!("No glyph for {:?} in '{}', skipped", ch, self.font_atlas.name());
                    continue;
                };

                let placement = Self::place(glyph, pen, scale, run.color, line);
                let culled = params.cull_offscreen
                    && params.is_offscreen(&placement.position, &placement.size);
                if !culled {
                    placements.push(placement);
                }
                pen.x += glyph.advance * scale;
            }
        }

        placements
    }

    /// Bounds of `text` as it would be laid out with `params`
    #[must_use]
    pub fn calculate_bounds(&self, text: &str, params: &LayoutParams) -> TextBounds {
        TextBounds::from_placements(&self.layout_text(text, params), params.origin)
    }

    /// Get the font atlas used by this layout engine
    #[must_use]
    pub const fn font_atlas(&self) -> &FontAtlas {
        self.font_atlas
    }

    fn place(glyph: &GlyphMetric, pen: Vec2, scale: f32, color: Vec3, line: u32) -> GlyphPlacement {
        let [u0, v0, u1, v1] = glyph.uv;
        GlyphPlacement {
            ch: glyph.ch,
            position: pen + Vec2::new(glyph.offset[0], glyph.offset[1]) * scale,
            size: Vec2::new(glyph.width as f32, glyph.height as f32) * scale,
            uv_min: Vec2::new(u0, v0),
            uv_max: Vec2::new(u1, v1),
            color,
            line,
        }
    }
}
