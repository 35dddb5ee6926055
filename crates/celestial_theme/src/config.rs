//! Theme manager configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::css::SynthesisOptions;
use crate::error::ConfigLoadError;

/// Theme used when neither a saved preference nor the OS signal picks one
pub const DEFAULT_THEME_ID: &str = "celestial-ocean";

/// Key the chosen theme id is saved under
pub const DEFAULT_STORAGE_KEY: &str = "cui-theme-preference";

/// Manager settings (`[theme]` table of a config file, or a file of its own)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManagerConfig {
    /// Fallback theme id
    #[serde(default = "default_theme")]
    pub default_theme: String,
    /// Follow the OS light/dark signal while no manual choice is saved
    #[serde(default = "default_true")]
    pub auto_detect_system_theme: bool,
    /// Save manual choices to the preference store
    #[serde(default = "default_true")]
    pub persist_theme_choice: bool,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Also emit opacity/tone/state variants
    #[serde(default)]
    pub derived_variables: bool,
    /// Also emit spacing, typography, radius, shadow and transition tokens
    #[serde(default)]
    pub scale_tokens: bool,
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_theme: default_theme(),
            auto_detect_system_theme: true,
            persist_theme_choice: true,
            storage_key: default_storage_key(),
            derived_variables: false,
            scale_tokens: false,
        }
    }
}

impl ManagerConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(src)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigLoadError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn default_theme(mut self, id: impl Into<String>) -> Self {
        self.default_theme = id.into();
        self
    }

    pub fn auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect_system_theme = enabled;
        self
    }

    pub fn persist(mut self, enabled: bool) -> Self {
        self.persist_theme_choice = enabled;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// What the document applier synthesizes
    pub fn synthesis(&self) -> SynthesisOptions {
        SynthesisOptions {
            derived: self.derived_variables,
            scale: self.scale_tokens,
        }
    }
}
