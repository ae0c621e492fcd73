//! Quad generation from glyph placements

use super::TextVertex;
use crate::foundation::math::{screen_to_ndc, Vec2};
use crate::text::GlyphPlacement;

/// Vertices per glyph quad
pub const VERTICES_PER_QUAD: usize = 4;

/// Indices per glyph quad (two triangles)
pub const INDICES_PER_QUAD: usize = 6;

/// Index pattern of one quad relative to its first vertex
///
/// Vertices go top-left, bottom-left, bottom-right, top-right, so both
/// triangles wind counter-clockwise once Y points up in NDC.
pub const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// Replace `vertices`/`indices` with one quad per placement
///
/// A degenerate viewport produces an empty mesh.
pub fn build_quads(
    placements: &[GlyphPlacement],
    viewport: Vec2,
    vertices: &mut Vec<TextVertex>,
    indices: &mut Vec<u32>,
) {
    vertices.clear();
    indices.clear();
    if !(viewport.x > 0.0 && viewport.y > 0.0 && viewport.iter().all(|v| v.is_finite())) {
        return;
    }

    vertices.reserve(placements.len() * VERTICES_PER_QUAD);
    indices.reserve(placements.len() * INDICES_PER_QUAD);

    for placement in placements {
        let Ok(base) = u32::try_from(vertices.len()) else {
            log::warn!("Text mesh exceeds u32 index range, truncating");
            break;
        };

        let (p0, p1) = (placement.position, placement.position + placement.size);
        let (t0, t1) = (placement.uv_min, placement.uv_max);
        let corners = [
            (Vec2::new(p0.x, p0.y), Vec2::new(t0.x, t0.y)),
            (Vec2::new(p0.x, p1.y), Vec2::new(t0.x, t1.y)),
            (Vec2::new(p1.x, p1.y), Vec2::new(t1.x, t1.y)),
            (Vec2::new(p1.x, p0.y), Vec2::new(t1.x, t0.y)),
        ];

        let color = [placement.color.x, placement.color.y, placement.color.z];
        vertices.extend(corners.iter().map(|(position, uv)| {
            let ndc = screen_to_ndc(*position, viewport);
            TextVertex {
                position: [ndc.x, ndc.y],
                uv: [uv.x, uv.y],
                color,
            }
        }));
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }
}
