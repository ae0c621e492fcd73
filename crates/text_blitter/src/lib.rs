//! # Text Blitter
//!
//! Renders strings onto a 2D viewport from a pre-packed bitmap font atlas,
//! with inline `[COL=r,g,b]` color markup and explicit line breaks, producing
//! one indexed quad mesh per font every frame.
//!
//! ## Pipeline
//!
//! - **Atlas**: glyph bitmaps are shelf-packed into one sheet, written next to
//!   a RON metrics sidecar, and loaded back into a [`FontAtlasTable`]
//! - **Markup**: [`parse_markup`] splits text into colored [`StyledRun`]s
//! - **Layout**: [`TextLayout`] walks runs with a pen cursor into
//!   [`GlyphPlacement`]s
//! - **Mesh**: placements become [`TextVertex`] quads uploaded through a
//!   [`MeshBackend`] and kept in the [`FontMeshRegistry`] by font name
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text_blitter::prelude::*;
//!
//! let mut blitter = TextBlitter::create(BlitterConfig::default(), HeadlessBackend::new());
//! blitter.init();
//!
//! // Once per frame
//! blitter.blit_text("Hello [COL=1,0,0]red", "StandardFont", 42.0, 42.0, 800, 600, 2.0);
//! blitter.update();
//!
//! if let Some(mesh) = blitter.font_mesh("StandardFont") {
//!     if !mesh.is_empty() {
//!         // bind mesh.vertex_layout() and draw mesh.index_count() indices
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod atlas;
pub mod config;
pub mod foundation;
pub mod mesh;
pub mod text;

mod blitter;
mod error;

pub use atlas::{FontAtlas, FontAtlasTable, GlyphMetric};
pub use blitter::{InitReport, TextBlitter};
pub use config::{BlitterConfig, Config, ConfigError, InitMode};
pub use error::{BlitterError, BlitterResult};
pub use mesh::{FontMeshRegistry, GpuFontMesh, HeadlessBackend, MeshBackend, TextVertex};
pub use text::{parse_markup, GlyphPlacement, StyledRun, TextLayout};

/// Common imports for blitter users
pub mod prelude {
    pub use crate::{
        BlitterConfig, BlitterError, BlitterResult, InitMode, InitReport, TextBlitter,
        atlas::{FontAtlas, GlyphMetric},
        config::{Config, FontSourceConfig, GlyphSourceKind},
        mesh::{GpuFontMesh, HeadlessBackend, MeshBackend, TextVertex},
        text::{parse_markup, GlyphPlacement, StyledRun, TextBounds, TextLayout},
    };
}
