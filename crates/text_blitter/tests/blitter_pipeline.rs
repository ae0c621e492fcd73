//! End-to-end tests: init, blit, update, read meshes back

mod common;

use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::Path;
use std::rc::Rc;

use approx::assert_relative_eq;
use common::{ready_blitter, scratch_dir, standard_config, write_font};
use text_blitter::atlas::sidecar;
use text_blitter::mesh::GpuMeshIds;
use text_blitter::prelude::*;

const SIRENS: &str = "Sirens blaring at us,\n\
but he only sped up,\n\
might leave in a [COL=0.9,0.1,0.1]bodybag[COL=1,1,1], \n\
never in [COL=0,0.9,0]cuffs[COL=1,1,1].";

#[test]
fn test_empty_text_gives_empty_mesh() {
    let mut blitter = ready_blitter("empty_text");

    blitter.blit_text("", "StandardFont", 0.0, 0.0, 800, 600, 1.0);

    let mesh = blitter.font_mesh("StandardFont").expect("entry exists after blit");
    assert_eq!(mesh.index_count(), 0);
    assert!(mesh.is_empty());
}

#[test]
fn test_unknown_font_has_no_mesh() {
    let mut blitter = ready_blitter("unknown_font");

    blitter.blit_text("hi", "Ghost", 0.0, 0.0, 800, 600, 1.0);
    blitter.update();

    assert!(blitter.font_mesh("Ghost").is_none());
    assert_eq!(blitter.backend().live_meshes(), 0);
}

#[test]
fn test_identical_blits_are_identical() {
    let mut blitter = ready_blitter("identical");

    blitter.blit_text(SIRENS, "StandardFont", 42.0, 42.0, 876, 765, 3.5);
    let first = blitter.font_mesh("StandardFont").unwrap();
    let (vertex_bytes, indices) = (first.vertex_bytes().to_vec(), first.indices().to_vec());
    blitter.update();

    blitter.blit_text(SIRENS, "StandardFont", 42.0, 42.0, 876, 765, 3.5);
    let second = blitter.font_mesh("StandardFont").unwrap();

    assert_eq!(second.vertex_bytes(), vertex_bytes.as_slice());
    assert_eq!(second.indices(), indices.as_slice());
    assert_eq!(second.generation(), 2);
}

#[test]
fn test_index_count_matches_known_chars() {
    let mut blitter = ready_blitter("index_count");
    let text = "Shiny dragons\nroll, bold.";
    let atlas = blitter.atlas("StandardFont").unwrap();
    let known = text.chars().filter(|&c| c != '\n' && atlas.contains(c)).count();

    blitter.blit_text(text, "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    let mesh = blitter.font_mesh("StandardFont").unwrap();

    assert_eq!(mesh.index_count() as usize, known * 6);
    assert_eq!(mesh.vertices().len(), known * 4);
}

#[test]
fn test_each_line_gets_its_own_row() {
    let mut blitter = ready_blitter("rows");

    blitter.blit_text("ab\nde\ngh", "StandardFont", 10.0, 10.0, 800, 600, 2.0);
    let mesh = blitter.font_mesh("StandardFont").unwrap();

    // First vertex of every quad is its top-left corner
    let tops: BTreeSet<u32> = mesh
        .vertices()
        .chunks(4)
        .map(|quad| quad[0].position[1].to_bits())
        .collect();
    assert_eq!(tops.len(), 3);
}

#[test]
fn test_markup_colors_reach_vertices() {
    let mut blitter = ready_blitter("colors");

    blitter.blit_text("a[COL=1,0,0]b[COL=0,1,0]d", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    let mesh = blitter.font_mesh("StandardFont").unwrap();
    let quad_colors: Vec<[f32; 3]> = mesh.vertices().chunks(4).map(|quad| quad[0].color).collect();

    assert_eq!(quad_colors, vec![[1.0, 1.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
}

#[test]
fn test_backend_holds_uploaded_geometry() {
    let mut blitter = ready_blitter("backend_upload");

    blitter.blit_text("hello", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    let mesh = blitter.font_mesh("StandardFont").unwrap();
    let uploaded = blitter.backend().mesh(mesh.ids()).unwrap();

    assert_eq!(uploaded.vertex_bytes, mesh.vertex_bytes());
    assert_eq!(uploaded.indices, mesh.indices());
    assert_eq!(uploaded.label, "StandardFont");
}

#[test]
fn test_init_exports_then_reuses_sheet() {
    let dir = scratch_dir("reuse_sheet");
    write_font(&dir, "StandardFont");

    let mut first = TextBlitter::create(standard_config(&dir), HeadlessBackend::new());
    let report = first.init();
    assert_eq!(report.packed, vec!["StandardFont".to_string()]);
    assert!(sidecar::sheet_path(&dir, "StandardFont").is_file());
    assert!(sidecar::sidecar_path(&dir, "StandardFont").is_file());

    // The glyph sources are no longer needed once the sheet exists
    std::fs::remove_dir_all(dir.join("StandardFont")).unwrap();
    let mut second = TextBlitter::create(standard_config(&dir), HeadlessBackend::new());
    let report = second.init();
    assert_eq!(report.loaded, vec!["StandardFont".to_string()]);

    let packed = first.atlas("StandardFont").unwrap();
    let loaded = second.atlas("StandardFont").unwrap();
    assert_eq!(packed.dimensions(), loaded.dimensions());
    for expected in packed.sorted_glyphs() {
        let actual = loaded.glyph(expected.ch).unwrap();
        for (a, e) in actual.uv.iter().zip(expected.uv) {
            assert_relative_eq!(*a, e, epsilon = 1e-6);
        }
        assert_relative_eq!(actual.advance, expected.advance);
    }
}

#[test]
fn test_init_is_idempotent() {
    let mut blitter = ready_blitter("idempotent");
    let before = blitter.atlas("StandardFont").unwrap().clone();

    let report = blitter.init();

    assert_eq!(report.loaded, vec!["StandardFont".to_string()]);
    assert_eq!(blitter.atlas("StandardFont").unwrap(), &before);
}

#[test]
fn test_load_only_never_writes() {
    let dir = scratch_dir("load_only");
    write_font(&dir, "StandardFont");
    let config = standard_config(&dir).with_mode(InitMode::LoadOnly);

    let mut blitter = TextBlitter::create(config, HeadlessBackend::new());
    let report = blitter.init();

    assert_eq!(report.failed.len(), 1);
    assert!(!sidecar::sheet_path(&dir, "StandardFont").exists());
    assert!(blitter.atlases().is_empty());

    blitter.blit_text("hi", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    assert!(blitter.font_mesh("StandardFont").is_none());
}

#[test]
fn test_missing_glyph_sources_degrade() {
    let dir = scratch_dir("no_sources");
    let mut blitter = TextBlitter::create(standard_config(&dir), HeadlessBackend::new());

    let report = blitter.init();

    assert!(!report.is_complete());
    assert!(blitter.atlases().is_empty());
    blitter.blit_text("hi", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    blitter.update();
    assert!(blitter.font_mesh("StandardFont").is_none());
}

#[test]
fn test_empty_glyph_directory_degrades() {
    let dir = scratch_dir("empty_sources");
    std::fs::create_dir_all(dir.join("StandardFont")).unwrap();
    let mut blitter = TextBlitter::create(standard_config(&dir), HeadlessBackend::new());

    let report = blitter.init();

    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].1.contains("No glyph sources"));
}

#[test]
fn test_failed_repack_keeps_existing_sheet() {
    let dir = scratch_dir("failed_repack");
    write_font(&dir, "StandardFont");
    TextBlitter::create(standard_config(&dir), HeadlessBackend::new()).init();
    std::fs::remove_dir_all(dir.join("StandardFont")).unwrap();

    let mut config = standard_config(&dir);
    config.force_repack = true;
    let mut blitter = TextBlitter::create(config, HeadlessBackend::new());
    let report = blitter.init();

    assert_eq!(report.loaded, vec!["StandardFont".to_string()]);
    assert!(blitter.atlas("StandardFont").is_some());
}

#[test]
fn test_corrupt_sidecar_degrades() {
    let dir = scratch_dir("corrupt_sidecar");
    write_font(&dir, "StandardFont");
    TextBlitter::create(standard_config(&dir), HeadlessBackend::new()).init();
    std::fs::write(sidecar::sidecar_path(&dir, "StandardFont"), "not ron at all").unwrap();

    let config = standard_config(&dir).with_mode(InitMode::LoadOnly);
    let mut blitter = TextBlitter::create(config, HeadlessBackend::new());
    let report = blitter.init();

    assert_eq!(report.failed.len(), 1);
    assert!(blitter.atlas("StandardFont").is_none());
}

/// Headless backend that reports its live mesh count through a shared cell
struct CountingBackend {
    inner: HeadlessBackend,
    live: Rc<Cell<usize>>,
}

impl MeshBackend for CountingBackend {
    fn create_mesh(&mut self, label: &str) -> BlitterResult<GpuMeshIds> {
        let ids = self.inner.create_mesh(label)?;
        self.live.set(self.inner.live_meshes());
        Ok(ids)
    }

    fn upload_mesh(
        &mut self,
        ids: GpuMeshIds,
        vertices: &[TextVertex],
        indices: &[u32],
    ) -> BlitterResult<()> {
        self.inner.upload_mesh(ids, vertices, indices)
    }

    fn destroy_mesh(&mut self, ids: GpuMeshIds) {
        self.inner.destroy_mesh(ids);
        self.live.set(self.inner.live_meshes());
    }
}

#[test]
fn test_shutdown_releases_backend_meshes() {
    let mut blitter = ready_blitter("shutdown_release");
    blitter.blit_text("hi", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    assert_eq!(blitter.backend().live_meshes(), 1);

    blitter.shutdown();
    assert_eq!(blitter.backend().live_meshes(), 0);
}

#[test]
fn test_drop_releases_backend_meshes() {
    let dir = scratch_dir("drop_release");
    write_font(&dir, "StandardFont");
    write_font(&dir, "OtherFont");
    let config = standard_config(&dir).with_font(FontSourceConfig::image_directory("OtherFont"));
    let live = Rc::new(Cell::new(0));
    let backend = CountingBackend {
        inner: HeadlessBackend::new(),
        live: Rc::clone(&live),
    };

    let mut blitter = TextBlitter::create(config, backend);
    assert!(blitter.init().is_complete());
    blitter.blit_text("hi", "StandardFont", 0.0, 0.0, 800, 600, 1.0);
    blitter.blit_text("be", "OtherFont", 0.0, 0.0, 800, 600, 1.0);
    assert_eq!(live.get(), 2);

    drop(blitter);
    assert_eq!(live.get(), 0);
}

#[test]
fn test_true_type_font_end_to_end() {
    let dir = scratch_dir("true_type");
    let font_file = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf");
    let config = BlitterConfig::with_resource_dir(&dir)
        .with_font(FontSourceConfig::true_type("Mono", font_file, 20.0));

    let mut blitter = TextBlitter::create(config, HeadlessBackend::new());
    let report = blitter.init();
    assert_eq!(report.packed, vec!["Mono".to_string()]);
    assert!(sidecar::sheet_path(&dir, "Mono").is_file());

    blitter.blit_text("Hi g\nok", "Mono", 10.0, 10.0, 800, 600, 1.0);
    let mesh = blitter.font_mesh("Mono").unwrap();
    // The space is a blank quad but still counts as a placed glyph
    assert_eq!(mesh.index_count(), 6 * 6);
}
