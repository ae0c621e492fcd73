//! GPU font mesh: backend buffer handles plus the last built geometry

use super::backend::{BufferId, GpuMeshIds, LayoutId};
use super::TextVertex;

/// The drawable mesh of one font
///
/// Rebuilt in full on every `blit_text` for its font. Renderers only read it:
/// bind [`Self::vertex_layout`] and draw [`Self::index_count`] `u32` indices
/// as triangles. An index count of zero means there is nothing to draw.
#[derive(Debug, Clone)]
pub struct GpuFontMesh {
    ids: GpuMeshIds,
    vertices: Vec<TextVertex>,
    indices: Vec<u32>,
    index_count: u32,
    generation: u64,
}

impl GpuFontMesh {
    pub(crate) const fn new(ids: GpuMeshIds) -> Self {
        Self {
            ids,
            vertices: Vec::new(),
            indices: Vec::new(),
            index_count: 0,
            generation: 0,
        }
    }

    /// Staging buffers to rebuild into; the previous contents are stale
    pub(crate) fn staging_mut(&mut self) -> (&mut Vec<TextVertex>, &mut Vec<u32>) {
        (&mut self.vertices, &mut self.indices)
    }

    /// Record a finished build; `uploaded` says whether the GPU copy matches
    pub(crate) fn commit(&mut self, uploaded: bool) {
        self.generation += 1;
        self.index_count = if uploaded {
            u32::try_from(self.indices.len()).unwrap_or(u32::MAX)
        } else {
            0
        };
    }

    /// All backend identifiers
    #[must_use]
    pub const fn ids(&self) -> GpuMeshIds {
        self.ids
    }

    /// Vertex buffer handle
    #[must_use]
    pub const fn vertex_buffer(&self) -> BufferId {
        self.ids.vertex_buffer
    }

    /// Index buffer handle
    #[must_use]
    pub const fn index_buffer(&self) -> BufferId {
        self.ids.index_buffer
    }

    /// Vertex layout / vertex array handle
    #[must_use]
    pub const fn vertex_layout(&self) -> LayoutId {
        self.ids.layout
    }

    /// Number of indices to draw
    #[must_use]
    pub const fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Nothing to draw this frame
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    /// Vertices of the last build
    #[must_use]
    pub fn vertices(&self) -> &[TextVertex] {
        &self.vertices
    }

    /// Indices of the last build
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertices of the last build as raw bytes
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of builds so far
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
