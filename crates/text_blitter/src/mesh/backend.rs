//! Backend abstraction for GPU mesh storage
//!
//! The blitter never talks to a graphics API directly. A renderer supplies a
//! [`MeshBackend`] that turns opaque identifiers into real buffers (GL buffer
//! names, Vulkan allocations, ...). [`HeadlessBackend`] keeps everything in
//! CPU memory.

use std::collections::HashMap;

use super::TextVertex;
use crate::error::{BlitterError, BlitterResult};

/// Result type for backend operations
pub type BackendResult<T> = BlitterResult<T>;

/// Handle to a GPU buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

/// Handle to a vertex layout / vertex array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub u64);

/// The identifiers that make up one drawable mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuMeshIds {
    /// Vertex buffer
    pub vertex_buffer: BufferId,
    /// Index buffer (`u32` indices)
    pub index_buffer: BufferId,
    /// Vertex layout binding both buffers to [`TextVertex::attributes`]
    pub layout: LayoutId,
}

/// GPU side of text meshes
pub trait MeshBackend {
    /// Allocate buffers and a layout for a new, empty mesh
    fn create_mesh(&mut self, label: &str) -> BackendResult<GpuMeshIds>;

    /// Replace the full contents of a mesh
    fn upload_mesh(
        &mut self,
        ids: GpuMeshIds,
        vertices: &[TextVertex],
        indices: &[u32],
    ) -> BackendResult<()>;

    /// Release a mesh; unknown ids are ignored
    fn destroy_mesh(&mut self, ids: GpuMeshIds);
}

/// Buffers held by [`HeadlessBackend`] for one mesh
#[derive(Debug, Clone, Default)]
pub struct HeadlessMesh {
    /// Label given at creation (the font name)
    pub label: String,
    /// Raw vertex buffer contents
    pub vertex_bytes: Vec<u8>,
    /// Index buffer contents
    pub indices: Vec<u32>,
    /// Number of uploads so far
    pub uploads: u64,
}

/// CPU-memory backend for tests, tools and software renderers
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    meshes: HashMap<BufferId, HeadlessMesh>,
}

impl HeadlessBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers of a live mesh
    #[must_use]
    pub fn mesh(&self, ids: GpuMeshIds) -> Option<&HeadlessMesh> {
        self.meshes.get(&ids.vertex_buffer)
    }

    /// Number of meshes created and not yet destroyed
    #[must_use]
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MeshBackend for HeadlessBackend {
    fn create_mesh(&mut self, label: &str) -> BackendResult<GpuMeshIds> {
        let ids = GpuMeshIds {
            vertex_buffer: BufferId(self.allocate()),
            index_buffer: BufferId(self.allocate()),
            layout: LayoutId(self.allocate()),
        };
        self.meshes.insert(
            ids.vertex_buffer,
            HeadlessMesh {
                label: label.to_string(),
                ..HeadlessMesh::default()
            },
        );
        Ok(ids)
    }

    fn upload_mesh(
        &mut self,
        ids: GpuMeshIds,
        vertices: &[TextVertex],
        indices: &[u32],
    ) -> BackendResult<()> {
        let mesh = self
            .meshes
            .get_mut(&ids.vertex_buffer)
            .ok_or_else(|| BlitterError::Backend(format!("upload to unknown mesh {ids:?}")))?;

        mesh.vertex_bytes.clear();
        mesh.vertex_bytes.extend_from_slice(bytemuck::cast_slice(vertices));
        mesh.indices.clear();
        mesh.indices.extend_from_slice(indices);
        mesh.uploads += 1;
        Ok(())
    }

    fn destroy_mesh(&mut self, ids: GpuMeshIds) {
        self.meshes.remove(&ids.vertex_buffer);
    }
}
