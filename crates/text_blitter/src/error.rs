//! Error types for the text blitter
//!
//! Everything below the public frame-loop calls propagates these with `?`.
//! [`crate::TextBlitter`] catches them at its boundary and degrades to drawing
//! less, so a render loop never has to handle them.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Result type for blitter operations
pub type BlitterResult<T> = Result<T, BlitterError>;

/// Errors that can occur while packing, loading, laying out or meshing text
#[derive(Debug, thiserror::Error)]
pub enum BlitterError {
    /// Atlas sheet or metrics sidecar is absent or corrupt
    #[error("Resource missing or corrupt at {path:?}: {reason}")]
    ResourceMissing {
        /// File that could not be used
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// No atlas is registered under this font name
    #[error("Font '{0}' has no atlas entry")]
    UnknownFont(String),

    /// Character has no metric in an otherwise valid atlas
    #[error("Character {0:?} not found in atlas")]
    UnknownGlyph(char),

    /// The glyph source produced nothing to pack
    #[error("No glyph sources found for font '{0}'")]
    NoGlyphSources(String),

    /// Glyphs do not fit within the maximum sheet size
    #[error("Font '{font}' does not fit in a {max_size}x{max_size} atlas sheet")]
    AtlasTooLarge {
        /// Font being packed
        font: String,
        /// Configured maximum sheet edge in pixels
        max_size: u32,
    },

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Metrics sidecar could not be encoded or decoded
    #[error("Sidecar error: {0}")]
    Sidecar(String),

    /// The mesh backend rejected an operation
    #[error("Mesh backend error: {0}")]
    Backend(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl BlitterError {
    /// Shorthand for [`BlitterError::ResourceMissing`]
    pub fn missing(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ResourceMissing {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
