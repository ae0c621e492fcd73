//! Text mesh building
//!
//! Placements become one quad each in a single vertex/index buffer per font.
//! GPU storage goes through the [`MeshBackend`] trait.

pub mod backend;
pub mod builder;
mod font_mesh;
mod registry;
mod vertex;

pub use backend::{
    BackendResult, BufferId, GpuMeshIds, HeadlessBackend, HeadlessMesh, LayoutId, MeshBackend,
};
pub use builder::build_quads;
pub use font_mesh::GpuFontMesh;
pub use registry::FontMeshRegistry;
pub use vertex::{TextVertex, VertexAttribute};
