//! Theme registry: the fixed catalog of themes
//!
//! Loaded once from a static configuration document shaped like
//!
//! ```json
//! { "themes": { "celestial-ocean": { "name": "Celestial Ocean", "mode": "light", ... } } }
//! ```
//!
//! and never mutated afterwards. All queries are pure projections over the
//! loaded, insertion-ordered mapping.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigLoadError;
use crate::theme::{Theme, ThemeCategory, ThemeMode};

/// On-disk catalog shape
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogDocument {
    pub themes: IndexMap<String, Theme>,
}

/// Insertion-ordered mapping from theme id to [`Theme`]
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Arc<Theme>>,
}

impl ThemeRegistry {
    /// Build a registry from an already-parsed document.
    ///
    /// Fails only if the catalog is empty or contains an empty id. Themes
    /// missing required channels are accepted; those channels read as the
    /// neutral palette.
    pub fn load(document: CatalogDocument) -> Result<Self, ConfigLoadError> {
        if document.themes.is_empty() {
            return Err(ConfigLoadError::Empty);
        }

        let mut themes = IndexMap::with_capacity(document.themes.len());
        for (id, theme) in document.themes {
            if id.trim().is_empty() {
                return Err(ConfigLoadError::EmptyId);
            }
            let missing = theme.colors.missing_channels();
            if !missing.is_empty() {
                warn!(
                    "theme \"{}\" is missing channels {:?}; using neutral fallback",
                    id, missing
                );
            }
            themes.insert(id, Arc::new(theme));
        }

        debug!("ThemeRegistry::load - {} themes", themes.len());
        Ok(Self { themes })
    }

    /// Parse a JSON catalog document
    pub fn from_json_str(src: &str) -> Result<Self, ConfigLoadError> {
        Self::load(serde_json::from_str(src)?)
    }

    /// Parse a TOML catalog document (same shape as JSON)
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigLoadError> {
        Self::load(toml::from_str(src)?)
    }

    /// Read a catalog file; `.toml` files are parsed as TOML, anything else as JSON
    pub fn from_path(path: &Path) -> Result<Self, ConfigLoadError> {
        let src = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&src),
            _ => Self::from_json_str(&src),
        }
    }

    /// Build directly from `(id, theme)` pairs
    pub fn from_themes<I, S>(themes: I) -> Result<Self, ConfigLoadError>
    where
        I: IntoIterator<Item = (S, Theme)>,
        S: Into<String>,
    {
        Self::load(CatalogDocument {
            themes: themes.into_iter().map(|(id, t)| (id.into(), t)).collect(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Theme>> {
        self.themes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Id of the first theme in catalog order
    pub fn first_id(&self) -> Option<&str> {
        self.themes.keys().next().map(String::as_str)
    }

    /// All themes in catalog order
    pub fn all(&self) -> impl Iterator<Item = (&str, &Arc<Theme>)> {
        self.themes.iter().map(|(id, t)| (id.as_str(), t))
    }

    /// All ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn by_category<'a>(
        &'a self,
        category: &'a ThemeCategory,
    ) -> impl Iterator<Item = (&'a str, &'a Arc<Theme>)> + 'a {
        self.all().filter(move |(_, t)| &t.category == category)
    }

    pub fn by_mode(&self, mode: ThemeMode) -> impl Iterator<Item = (&str, &Arc<Theme>)> {
        self.all().filter(move |(_, t)| t.mode == mode)
    }

    pub fn featured(&self) -> impl Iterator<Item = (&str, &Arc<Theme>)> {
        self.all().filter(|(_, t)| t.featured)
    }

    /// Best theme for a mode: the first featured celestial theme of that
    /// mode, else the first theme of that mode, in catalog order.
    pub fn best_for_mode(&self, mode: ThemeMode) -> Option<&str> {
        self.by_mode(mode)
            .find(|(_, t)| t.is_featured_celestial())
            .or_else(|| self.by_mode(mode).next())
            .map(|(id, _)| id)
    }

    /// Re-serialize the catalog (pretty JSON)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let document: IndexMap<&str, &Theme> =
            self.all().map(|(id, t)| (id, t.as_ref())).collect();
        serde_json::to_string_pretty(&serde_json::json!({ "themes": document }))
    }
}
