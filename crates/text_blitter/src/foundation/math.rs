//! Math utilities and types
//!
//! Screen space throughout the crate is in pixels with the origin at the
//! top-left corner and +Y pointing down.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (positions, sizes, UVs)
pub type Vec2 = Vector2<f32>;

/// 3D vector type (RGB colors)
pub type Vec3 = Vector3<f32>;

/// White, the color text starts with before any markup
#[must_use]
pub fn white() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// Convert a screen-space pixel position to normalized device coordinates
///
/// The top-left of the viewport maps to (-1, 1) and the bottom-right to (1, -1).
/// The viewport must be non-degenerate.
#[must_use]
pub fn screen_to_ndc(position: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        position.x / viewport.x * 2.0 - 1.0,
        1.0 - position.y / viewport.y * 2.0,
    )
}
