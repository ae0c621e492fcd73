//! Text vertex format
//!
//! Seven floats per vertex: position (2), UV (2), RGB color (3). Positions
//! are already in normalized device coordinates so a renderer can draw the
//! mesh without a projection uniform.

/// Vertex data for text rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TextVertex {
    /// Position in normalized device coordinates
    pub position: [f32; 2],
    /// UV texture coordinates, top-left origin
    pub uv: [f32; 2],
    /// RGB color
    pub color: [f32; 3],
}

/// Backend-neutral description of one vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub location: u32,
    /// Number of `f32` components
    pub components: u32,
    /// Byte offset inside the vertex
    pub offset: usize,
}

impl TextVertex {
    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Attribute layout matching the struct: position, uv, color
    #[must_use]
    pub const fn attributes() -> [VertexAttribute; 3] {
        [
            VertexAttribute { location: 0, components: 2, offset: 0 },
            VertexAttribute { location: 1, components: 2, offset: 8 },
            VertexAttribute { location: 2, components: 3, offset: 16 },
        ]
    }
}
