//! Font atlas table keyed by font name

use std::collections::HashMap;

use super::FontAtlas;
use crate::error::{BlitterError, BlitterResult};

/// All loaded atlases, keyed by font name
#[derive(Debug, Default)]
pub struct FontAtlasTable {
    atlases: HashMap<String, FontAtlas>,
}

impl FontAtlasTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an atlas under its own name, replacing any previous entry
    pub fn insert(&mut self, atlas: FontAtlas) {
        log::debug!("Registered font atlas '{}' ({} glyphs)", atlas.name(), atlas.len());
        self.atlases.insert(atlas.name().to_string(), atlas);
    }

    /// Look up a font's atlas
    pub fn get(&self, name: &str) -> BlitterResult<&FontAtlas> {
        self.atlases
            .get(name)
            .ok_or_else(|| BlitterError::UnknownFont(name.to_string()))
    }

    /// Whether a font is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.atlases.contains_key(name)
    }

    /// Registered font names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.atlases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered fonts
    #[must_use]
    pub fn len(&self) -> usize {
        self.atlases.len()
    }

    /// No fonts registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atlases.is_empty()
    }

    /// Drop every atlas
    pub fn clear(&mut self) {
        self.atlases.clear();
    }
}
