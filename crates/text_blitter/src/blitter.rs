//! Text blitter context
//!
//! Owns the atlas table, the mesh registry and the mesh backend, and exposes
//! the frame-loop interface: `init` once, then `blit_text` per string and
//! `update` per frame, with the renderer reading meshes via `font_mesh`.
//! None of these return errors; failures are logged and degrade to drawing
//! less.

use crate::atlas::{self, sidecar, AtlasPacker, FontAtlas, FontAtlasTable};
use crate::config::{BlitterConfig, Config, FontSourceConfig, InitMode};
use crate::error::BlitterResult;
use crate::foundation::math::Vec2;
use crate::mesh::{FontMeshRegistry, GpuFontMesh, HeadlessBackend, MeshBackend};
use crate::text::{LayoutParams, TextLayout};

/// What `init` did for each configured font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Fonts packed and exported this run, then loaded
    pub packed: Vec<String>,
    /// Fonts loaded from an existing sheet
    pub loaded: Vec<String>,
    /// Fonts left unavailable, with the reason
    pub failed: Vec<(String, String)>,
}

impl InitReport {
    /// Every configured font is available
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontOutcome {
    Packed,
    Loaded,
}

/// Text blitting context
///
/// Single-threaded: every call runs to completion on the caller's thread.
pub struct TextBlitter<B: MeshBackend = HeadlessBackend> {
    config: BlitterConfig,
    atlases: FontAtlasTable,
    meshes: FontMeshRegistry,
    backend: B,
    frame: u64,
    rebuilt_this_frame: Vec<String>,
    shut_down: bool,
}

impl<B: MeshBackend> TextBlitter<B> {
    /// Create a blitter; no fonts are available until [`Self::init`]
    pub fn create(config: BlitterConfig, backend: B) -> Self {
        Self {
            config,
            atlases: FontAtlasTable::new(),
            meshes: FontMeshRegistry::new(),
            backend,
            frame: 0,
            rebuilt_this_frame: Vec::new(),
            shut_down: false,
        }
    }

    /// Create a blitter from a TOML or RON config file
    pub fn from_config_file(path: &str, backend: B) -> BlitterResult<Self> {
        let config = BlitterConfig::load_from_file(path)?;
        log::info!("Loaded blitter configuration from {}", path);
        Ok(Self::create(config, backend))
    }

    /// Make every configured font available
    ///
    /// In [`InitMode::PackAndExport`] fonts without a sheet on disk (or all
    /// fonts with `force_repack`) are packed from their glyph source and
    /// exported first. Every font is then loaded from its sidecar. Fonts that
    /// fail stay unregistered. Calling this again reloads from disk, also
    /// after [`Self::shutdown`].
    pub fn init(&mut self) -> InitReport {
        self.shut_down = false;
        log::info!(
            "Initializing text blitter: {} font(s) in {:?}, {:?}",
            self.config.fonts.len(),
            self.config.resource_dir,
            self.config.mode
        );

        let mut report = InitReport::default();
        let fonts = self.config.fonts.clone();
        for font in &fonts {
            match self.init_font(font) {
                Ok(FontOutcome::Packed) => report.packed.push(font.name.clone()),
                Ok(FontOutcome::Loaded) => report.loaded.push(font.name.clone()),
                Err(e) => {
                    log::warn!("Font '{}' unavailable: {}", font.name, e);
                    report.failed.push((font.name.clone(), e.to_string()));
                }
            }
        }

        log::info!(
            "Text blitter ready: {} packed, {} loaded, {} failed",
            report.packed.len(),
            report.loaded.len(),
            report.failed.len()
        );
        report
    }

    fn init_font(&mut self, font: &FontSourceConfig) -> BlitterResult<FontOutcome> {
        let resource_dir = self.config.resource_dir.clone();
        let exported = sidecar::is_exported(&resource_dir, &font.name);

        let mut outcome = FontOutcome::Loaded;
        if self.config.mode == InitMode::PackAndExport && (self.config.force_repack || !exported) {
            match self.pack_font(font) {
                Ok(()) => outcome = FontOutcome::Packed,
                Err(e) if exported => {
                    log::warn!("Repacking '{}' failed ({}), keeping existing sheet", font.name, e);
                }
                Err(e) => return Err(e),
            }
        }

        let atlas = sidecar::load(&resource_dir, &font.name)?;
        self.atlases.insert(atlas);
        Ok(outcome)
    }

    fn pack_font(&self, font: &FontSourceConfig) -> BlitterResult<()> {
        let source = atlas::source_for(font, &self.config.resource_dir);
        log::info!("Packing font '{}' from {}", font.name, source.describe());

        let glyphs = source.collect()?;
        let packed = AtlasPacker::new(self.config.packing.clone()).pack(&font.name, glyphs)?;
        sidecar::export(&self.config.resource_dir, &packed)
    }

    /// Rebuild `font_name`'s mesh from this frame's `text`
    ///
    /// `origin_x`/`origin_y` are pixels from the top-left of the viewport.
    /// Unknown fonts are ignored. Empty text, or a degenerate viewport or
    /// scale, leaves the font with an empty mesh.
    pub fn blit_text(
        &mut self,
        text: &str,
        font_name: &str,
        origin_x: f32,
        origin_y: f32,
        viewport_width: u32,
        viewport_height: u32,
        scale: f32,
    ) {
        if self.shut_down {
            log::debug!("blit_text after shutdown ignored");
            return;
        }
        let Ok(font_atlas) = self.atlases.get(font_name) else {
            log::trace!("blit_text for unknown font '{}' ignored", font_name);
            return;
        };

        let viewport = Vec2::new(viewport_width as f32, viewport_height as f32);
        let params = LayoutParams {
            origin: Vec2::new(origin_x, origin_y),
            viewport,
            scale,
            cull_offscreen: self.config.layout.cull_offscreen,
        };
        let placements = if scale.is_finite() && scale > 0.0 {
            TextLayout::new(font_atlas).layout_text(text, &params)
        } else {
            log::debug!("Scale {} draws nothing for '{}'", scale, font_name);
            Vec::new()
        };

        match self.meshes.rebuild(&mut self.backend, font_name, &placements, viewport) {
            Ok(mesh) => log::trace!(
                "Rebuilt '{}': {} glyphs, {} indices",
                font_name,
                placements.len(),
                mesh.index_count()
            ),
            Err(e) => log::warn!("Mesh rebuild for '{}' failed: {}", font_name, e),
        }

        if !self.rebuilt_this_frame.iter().any(|name| name == font_name) {
            self.rebuilt_this_frame.push(font_name.to_string());
        }
    }

    /// End-of-frame synchronization point, call after all `blit_text` calls
    pub fn update(&mut self) {
        if !self.rebuilt_this_frame.is_empty() {
            log::trace!("Frame {}: rebuilt {:?}", self.frame, self.rebuilt_this_frame);
        }
        self.rebuilt_this_frame.clear();
        self.frame += 1;
    }

    /// Current mesh of a font, if it has ever been blitted
    #[must_use]
    pub fn font_mesh(&self, font_name: &str) -> Option<&GpuFontMesh> {
        self.meshes.get(font_name)
    }

    /// Loaded atlas of a font
    #[must_use]
    pub fn atlas(&self, font_name: &str) -> Option<&FontAtlas> {
        self.atlases.get(font_name).ok()
    }

    /// All loaded atlases
    #[must_use]
    pub const fn atlases(&self) -> &FontAtlasTable {
        &self.atlases
    }

    /// The configuration this blitter was created with
    #[must_use]
    pub const fn config(&self) -> &BlitterConfig {
        &self.config
    }

    /// The mesh backend
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of completed `update` calls
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Release every GPU mesh and drop all atlases
    ///
    /// Idempotent, and run automatically on drop. Later `blit_text` calls are
    /// ignored until the next [`Self::init`].
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        log::info!("Shutting down text blitter ({} meshes)", self.meshes.len());
        self.meshes.release_all(&mut self.backend);
        self.atlases.clear();
        self.rebuilt_this_frame.clear();
        self.shut_down = true;
    }
}

impl<B: MeshBackend> Drop for TextBlitter<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
