//! Atlas persistence: sheet PNG plus RON metrics sidecar
//!
//! For a font named `StandardFont` in `res/fonts` the files are
//! `res/fonts/StandardFont.png` and `res/fonts/StandardFont.ron`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::packer::PackedAtlas;
use super::{FontAtlas, GlyphMetric};
use crate::error::{BlitterError, BlitterResult};

/// Bumped whenever the sidecar layout changes
pub const SIDECAR_VERSION: u32 = 1;

/// On-disk metrics for one packed font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AtlasSidecar {
    version: u32,
    name: String,
    width: u32,
    height: u32,
    line_height: f32,
    glyphs: Vec<GlyphMetric>,
}

/// Sheet image path for a font
#[must_use]
pub fn sheet_path(resource_dir: &Path, font_name: &str) -> PathBuf {
    resource_dir.join(format!("{font_name}.png"))
}

/// Metrics sidecar path for a font
#[must_use]
pub fn sidecar_path(resource_dir: &Path, font_name: &str) -> PathBuf {
    resource_dir.join(format!("{font_name}.ron"))
}

/// Whether a packed sheet and its sidecar are both on disk
#[must_use]
pub fn is_exported(resource_dir: &Path, font_name: &str) -> bool {
    sheet_path(resource_dir, font_name).is_file() && sidecar_path(resource_dir, font_name).is_file()
}

/// Write the sheet and sidecar of a packed font
pub fn export(resource_dir: &Path, packed: &PackedAtlas) -> BlitterResult<()> {
    let name = packed.atlas.name();
    fs::create_dir_all(resource_dir)?;

    let sheet = sheet_path(resource_dir, name);
    packed.image.save(&sheet)?;

    let (width, height) = packed.atlas.dimensions();
    let sidecar = AtlasSidecar {
        version: SIDECAR_VERSION,
        name: name.to_string(),
        width,
        height,
        line_height: packed.atlas.line_height(),
        glyphs: packed.atlas.sorted_glyphs(),
    };
    let contents = ron::ser::to_string_pretty(&sidecar, ron::ser::PrettyConfig::default())
        .map_err(|e| BlitterError::Sidecar(e.to_string()))?;
    fs::write(sidecar_path(resource_dir, name), contents)?;

    log::info!("Exported font atlas '{}' to {:?}", name, sheet);
    Ok(())
}

/// Load a previously exported font without repacking
///
/// Fails with [`BlitterError::ResourceMissing`] when either file is absent,
/// the sidecar does not parse, or it disagrees with the sheet.
pub fn load(resource_dir: &Path, font_name: &str) -> BlitterResult<FontAtlas> {
    let path = sidecar_path(resource_dir, font_name);
    let contents = fs::read_to_string(&path)
        .map_err(|e| BlitterError::missing(&path, format!("sidecar unreadable: {e}")))?;
    let sidecar: AtlasSidecar = ron::from_str(&contents)
        .map_err(|e| BlitterError::missing(&path, format!("sidecar corrupt: {e}")))?;

    if sidecar.version != SIDECAR_VERSION {
        return Err(BlitterError::missing(
            &path,
            format!("sidecar version {} != {}", sidecar.version, SIDECAR_VERSION),
        ));
    }
    if sidecar.name != font_name {
        return Err(BlitterError::missing(
            &path,
            format!("sidecar describes font '{}'", sidecar.name),
        ));
    }

    let sheet = sheet_path(resource_dir, font_name);
    let dimensions = image::image_dimensions(&sheet)
        .map_err(|e| BlitterError::missing(&sheet, format!("atlas sheet unreadable: {e}")))?;
    if dimensions != (sidecar.width, sidecar.height) {
        return Err(BlitterError::missing(
            &sheet,
            format!(
                "sheet is {}x{}, sidecar expects {}x{}",
                dimensions.0, dimensions.1, sidecar.width, sidecar.height
            ),
        ));
    }

    log::debug!("Loaded {} glyph metrics for '{}'", sidecar.glyphs.len(), font_name);
    Ok(FontAtlas::new(
        sidecar.name,
        sidecar.width,
        sidecar.height,
        sidecar.line_height,
        sidecar.glyphs,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::packer::AtlasPacker;
    use crate::atlas::sources::{GlyphSource, ImageDirectorySource};
    use crate::atlas::test_support::{scratch_dir, write_glyph_dir};
    use approx::assert_relative_eq;

    fn pack_sample(dir: &Path) -> PackedAtlas {
        let glyphs = [('H', 6, 9), ('i', 3, 9), ('!', 2, 7), ('q', 6, 11)];
        write_glyph_dir(&dir.join("Sample"), &glyphs);
        let set = ImageDirectorySource::new(dir.join("Sample")).collect().unwrap();
        AtlasPacker::default().pack("Sample", set).unwrap()
    }

    #[test]
    fn test_export_then_load_round_trip() {
        let dir = scratch_dir("sidecar_round_trip");
        let packed = pack_sample(&dir);

        export(&dir, &packed).unwrap();
        assert!(is_exported(&dir, "Sample"));
        let loaded = load(&dir, "Sample").unwrap();

        assert_eq!(loaded.dimensions(), packed.atlas.dimensions());
        assert_relative_eq!(loaded.line_height(), packed.atlas.line_height());
        assert_eq!(loaded.len(), packed.atlas.len());
        for expected in packed.atlas.sorted_glyphs() {
            let actual = loaded.glyph(expected.ch).unwrap();
            for (a, e) in actual.uv.iter().zip(expected.uv) {
                assert_relative_eq!(*a, e, epsilon = 1e-6);
            }
            assert_relative_eq!(actual.advance, expected.advance, epsilon = 1e-6);
            assert_eq!((actual.width, actual.height), (expected.width, expected.height));
        }
    }

    #[test]
    fn test_missing_sidecar() {
        let dir = scratch_dir("sidecar_missing");
        assert!(matches!(load(&dir, "Nothing"), Err(BlitterError::ResourceMissing { .. })));
    }

    #[test]
    fn test_corrupt_sidecar() {
        let dir = scratch_dir("sidecar_corrupt");
        let packed = pack_sample(&dir);
        export(&dir, &packed).unwrap();
        fs::write(sidecar_path(&dir, "Sample"), "(version: 1, name: ").unwrap();

        assert!(matches!(load(&dir, "Sample"), Err(BlitterError::ResourceMissing { .. })));
    }

    #[test]
    fn test_missing_sheet() {
        let dir = scratch_dir("sidecar_no_sheet");
        let packed = pack_sample(&dir);
        export(&dir, &packed).unwrap();
        fs::remove_file(sheet_path(&dir, "Sample")).unwrap();

        assert!(!is_exported(&dir, "Sample"));
        assert!(matches!(load(&dir, "Sample"), Err(BlitterError::ResourceMissing { .. })));
    }

    #[test]
    fn test_sidecar_for_other_font_is_rejected() {
        let dir = scratch_dir("sidecar_renamed");
        let packed = pack_sample(&dir);
        export(&dir, &packed).unwrap();
        fs::copy(sidecar_path(&dir, "Sample"), sidecar_path(&dir, "Renamed")).unwrap();
        fs::copy(sheet_path(&dir, "Sample"), sheet_path(&dir, "Renamed")).unwrap();

        assert!(matches!(load(&dir, "Renamed"), Err(BlitterError::ResourceMissing { .. })));
    }
}
