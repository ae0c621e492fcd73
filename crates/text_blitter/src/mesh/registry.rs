//! Font mesh registry
//!
//! One [`GpuFontMesh`] per font name. Entries appear on the first build for a
//! font and live until [`FontMeshRegistry::release_all`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::builder::build_quads;
use super::{GpuFontMesh, MeshBackend};
use crate::error::BlitterResult;
use crate::foundation::math::Vec2;
use crate::text::GlyphPlacement;

/// Font name to GPU mesh mapping
#[derive(Debug, Default)]
pub struct FontMeshRegistry {
    meshes: HashMap<String, GpuFontMesh>,
}

impl FontMeshRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mesh for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GpuFontMesh> {
        self.meshes.get(name)
    }

    /// Rebuild `name`'s mesh from `placements` and upload it
    ///
    /// The entry is created through the backend on first use. If the upload
    /// fails the entry stays, with an index count of zero, and the error is
    /// returned.
    pub fn rebuild<B: MeshBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        name: &str,
        placements: &[GlyphPlacement],
        viewport: Vec2,
    ) -> BlitterResult<&GpuFontMesh> {
        let mesh = match self.meshes.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let ids = backend.create_mesh(name)?;
                log::debug!("Created GPU mesh for font '{}': {:?}", name, ids);
                entry.insert(GpuFontMesh::new(ids))
            }
        };

        let ids = mesh.ids();
        let (vertices, indices) = mesh.staging_mut();
        build_quads(placements, viewport, vertices, indices);
        let uploaded = backend.upload_mesh(ids, vertices, indices);
        mesh.commit(uploaded.is_ok());
        uploaded?;

        Ok(mesh)
    }

    /// Destroy every mesh through the backend and empty the registry
    pub fn release_all<B: MeshBackend + ?Sized>(&mut self, backend: &mut B) {
        for (name, mesh) in self.meshes.drain() {
            log::debug!("Releasing GPU mesh for font '{}'", name);
            backend.destroy_mesh(mesh.ids());
        }
    }

    /// Font names with a mesh, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.meshes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of meshes
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// No meshes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
