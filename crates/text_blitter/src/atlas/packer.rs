//! Shelf packing of glyph bitmaps into a single atlas sheet
//!
//! Glyphs are sorted tallest first so each shelf is as tight as its first
//! glyph, then every power-of-two sheet width that can hold the widest glyph
//! is tried and the smallest resulting sheet wins.

use image::RgbaImage;

use super::sources::{GlyphBitmap, GlyphSet};
use super::{FontAtlas, GlyphMetric};
use crate::config::PackingConfig;
use crate::error::{BlitterError, BlitterResult};

/// Pixel rectangle inside the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl PackedRect {
    fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// A packed font: metrics plus the sheet image to persist
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    /// Metrics, identical to what loading the sidecar yields
    pub atlas: FontAtlas,
    /// RGBA8 sheet
    pub image: RgbaImage,
}

/// Shelf packer
#[derive(Debug, Clone, Default)]
pub struct AtlasPacker {
    config: PackingConfig,
}

impl AtlasPacker {
    /// Create a packer
    #[must_use]
    pub const fn new(config: PackingConfig) -> Self {
        Self { config }
    }

    /// Pack a font's glyphs into one sheet
    pub fn pack(&self, name: &str, set: GlyphSet) -> BlitterResult<PackedAtlas> {
        let mut glyphs = set.glyphs;
        if glyphs.is_empty() {
            return Err(BlitterError::NoGlyphSources(name.to_string()));
        }
        sort_for_packing(&mut glyphs);

        let sizes: Vec<(u32, u32)> = glyphs.iter().map(|g| g.image.dimensions()).collect();
        let (width, height, rects) = self
            .best_layout(&sizes)
            .ok_or_else(|| BlitterError::AtlasTooLarge {
                font: name.to_string(),
                max_size: self.config.max_sheet_size,
            })?;

        let mut image = RgbaImage::new(width, height);
        let mut metrics = Vec::with_capacity(glyphs.len());
        for (glyph, rect) in glyphs.iter().zip(&rects) {
            let (x, y) = (i64::from(rect.x), i64::from(rect.y));
            image::imageops::replace(&mut image, &glyph.image, x, y);
            metrics.push(metric_for(glyph, rect, width, height));
        }

        log::info!(
            "Packed font '{}': {} glyphs into {}x{} sheet",
            name,
            metrics.len(),
            width,
            height
        );

        Ok(PackedAtlas {
            atlas: FontAtlas::new(name, width, height, set.line_height, metrics),
            image,
        })
    }

    /// Smallest-area layout over all candidate power-of-two widths
    ///
    /// The search stops at the first width or height that no longer fits in
    /// `u32`, so any `max_sheet_size` or `padding` terminates.
    fn best_layout(&self, sizes: &[(u32, u32)]) -> Option<(u32, u32, Vec<PackedRect>)> {
        let padding = self.config.padding;
        let max_size = self.config.max_sheet_size;
        let widest = sizes.iter().map(|&(w, _)| w).max().unwrap_or(0);
        let mut width = padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(widest))
            .and_then(|w| w.max(1).checked_next_power_of_two());

        let mut best: Option<(u32, u32, Vec<PackedRect>)> = None;
        while let Some(candidate) = width.filter(|&w| w <= max_size) {
            let Some((rects, used_height)) = shelf_pack(sizes, candidate, padding) else {
                break;
            };
            let height = if self.config.power_of_two {
                used_height.max(1).checked_next_power_of_two()
            } else {
                Some(used_height.max(1))
            };

            if let Some(height) = height.filter(|&h| h <= max_size) {
                let area = u64::from(candidate) * u64::from(height);
                let improves = best
                    .as_ref()
                    .map_or(true, |(w, h, _)| area < u64::from(*w) * u64::from(*h));
                if improves {
                    best = Some((candidate, height, rects));
                }
            }
            width = candidate.checked_mul(2);
        }
        best
    }
}

/// Tallest first, then widest, then by character so the order never depends
/// on how the source listed its glyphs
fn sort_for_packing(glyphs: &mut [GlyphBitmap]) {
    glyphs.sort_by(|a, b| {
        b.image
            .height()
            .cmp(&a.image.height())
            .then(b.image.width().cmp(&a.image.width()))
            .then(a.ch.cmp(&b.ch))
    });
}

/// Place rects left to right on shelves of a fixed sheet width
///
/// Returns one rect per input size (same order) and the used sheet height, or
/// `None` when a coordinate would overflow `u32`. Blank sizes get an empty rect
/// at the origin and take no space.
pub fn shelf_pack(
    sizes: &[(u32, u32)],
    sheet_width: u32,
    padding: u32,
) -> Option<(Vec<PackedRect>, u32)> {
    let mut rects = Vec::with_capacity(sizes.len());
    let mut x = padding;
    let mut y = padding;
    let mut shelf_height = 0;

    for &(w, h) in sizes {
        if w == 0 || h == 0 {
            rects.push(PackedRect { x: 0, y: 0, w: 0, h: 0 });
            continue;
        }
        if x.checked_add(w)?.checked_add(padding)? > sheet_width && x > padding {
            y = y.checked_add(shelf_height)?.checked_add(padding)?;
            x = padding;
            shelf_height = 0;
        }
        rects.push(PackedRect { x, y, w, h });
        x = x.checked_add(w)?.checked_add(padding)?;
        shelf_height = shelf_height.max(h);
    }

    let used_height = y.checked_add(shelf_height)?.checked_add(padding)?;
    Some((rects, used_height))
}

/// Whether any two non-empty rects intersect
#[must_use]
pub fn any_overlap(rects: &[PackedRect]) -> bool {
    let solid: Vec<&PackedRect> = rects.iter().filter(|r| r.w > 0 && r.h > 0).collect();
    solid
        .iter()
        .enumerate()
        .any(|(i, a)| solid[i + 1..].iter().any(|b| a.overlaps(b)))
}

fn metric_for(glyph: &GlyphBitmap, rect: &PackedRect, width: u32, height: u32) -> GlyphMetric {
    let (sheet_w, sheet_h) = (width as f32, height as f32);
    GlyphMetric {
        ch: glyph.ch,
        uv: [
            rect.x as f32 / sheet_w,
            rect.y as f32 / sheet_h,
            (rect.x + rect.w) as f32 / sheet_w,
            (rect.y + rect.h) as f32 / sheet_h,
        ],
        width: rect.w,
        height: rect.h,
        advance: glyph.advance,
        offset: glyph.offset,
    }
}
