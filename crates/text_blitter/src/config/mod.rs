//! Configuration system
//!
//! [`BlitterConfig`] describes where fonts live, how they are packed and how
//! text is laid out. Any config type can be read from or written to `.toml`
//! and `.ron` files through the [`Config`] trait.

pub use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// What `init` is allowed to do with the resource directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitMode {
    /// Pack fonts that have no sheet yet, write sheet + sidecar, then load
    #[default]
    PackAndExport,
    /// Only read existing sidecars; never write to disk
    LoadOnly,
}

/// Where a font's glyph bitmaps come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GlyphSourceKind {
    /// A directory with one PNG per glyph named by decimal code point (`65.png`)
    ///
    /// Defaults to `<resource_dir>/<font name>/` when `path` is `None`.
    ImageDirectory {
        /// Directory override
        path: Option<PathBuf>,
    },
    /// A TrueType/OpenType file rasterized at a fixed pixel size
    TrueType {
        /// Font file, relative paths resolve against the resource directory
        path: PathBuf,
        /// Rasterization size in pixels
        pixel_size: f32,
        /// First character to rasterize (inclusive)
        first_char: char,
        /// Last character to rasterize (inclusive)
        last_char: char,
    },
}

impl Default for GlyphSourceKind {
    fn default() -> Self {
        Self::ImageDirectory { path: None }
    }
}

/// One font the blitter should make available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSourceConfig {
    /// Unique font name used by `blit_text` and `font_mesh`
    pub name: String,
    /// Glyph source used when the font has to be packed
    #[serde(default)]
    pub source: GlyphSourceKind,
}

impl FontSourceConfig {
    /// Font packed from a directory of per-glyph images
    pub fn image_directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: GlyphSourceKind::ImageDirectory { path: None },
        }
    }

    /// Font rasterized from a TrueType file over printable ASCII
    pub fn true_type(name: impl Into<String>, path: impl Into<PathBuf>, pixel_size: f32) -> Self {
        Self {
            name: name.into(),
            source: GlyphSourceKind::TrueType {
                path: path.into(),
                pixel_size,
                first_char: ' ',
                last_char: '~',
            },
        }
    }
}

/// Atlas sheet packing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Empty pixels between glyphs and around the sheet edge
    pub padding: u32,
    /// Round the sheet height up to a power of two (width always is)
    pub power_of_two: bool,
    /// Largest sheet edge in pixels
    pub max_sheet_size: u32,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            padding: 1,
            power_of_two: true,
            max_sheet_size: 4096,
        }
    }
}

/// Layout behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Drop glyphs whose quad lies entirely outside the viewport
    pub cull_offscreen: bool,
}

/// Top-level blitter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlitterConfig {
    /// Directory holding glyph sources, packed sheets and sidecars
    pub resource_dir: PathBuf,
    /// Pack-and-export or load-only
    pub mode: InitMode,
    /// Repack even when a sheet already exists (pack-and-export only)
    pub force_repack: bool,
    /// Fonts to make available
    pub fonts: Vec<FontSourceConfig>,
    /// Packing parameters
    pub packing: PackingConfig,
    /// Layout parameters
    pub layout: LayoutConfig,
}

impl Default for BlitterConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("res/fonts"),
            mode: InitMode::PackAndExport,
            force_repack: false,
            fonts: vec![FontSourceConfig::image_directory("StandardFont")],
            packing: PackingConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Config for BlitterConfig {}

impl BlitterConfig {
    /// Config rooted at `resource_dir` with no fonts registered
    pub fn with_resource_dir(resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            fonts: Vec::new(),
            ..Self::default()
        }
    }

    /// Register a font
    #[must_use]
    pub fn with_font(mut self, font: FontSourceConfig) -> Self {
        self.fonts.push(font);
        self
    }

    /// Set the init mode
    #[must_use]
    pub const fn with_mode(mut self, mode: InitMode) -> Self {
        self.mode = mode;
        self
    }
}
