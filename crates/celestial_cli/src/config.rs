//! CelestialUI configuration file handling

use anyhow::{Context, Result};
use celestial_theme::{ManagerConfig, ThemeRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "celestial.toml";

/// Top-level configuration (celestial.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CelestialConfig {
    /// Manager settings
    #[serde(default)]
    pub theme: ManagerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Directory relative paths resolve against; not serialized
    #[serde(skip)]
    pub root: PathBuf,
}

/// Where themes come from
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON or TOML catalog; the built-in catalog when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Where the chosen theme is saved
#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Preferences file (relative to the config directory)
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".celestial/preferences.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl CelestialConfig {
    /// Load configuration from a file, or from `celestial.toml` in a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `celestial init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: CelestialConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(config)
    }

    /// Like [`CelestialConfig::load_from_dir`], but a missing file yields defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        if dir.join(CONFIG_FILE).exists() {
            return Self::load_from_dir(dir);
        }
        tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, dir.display());
        Ok(Self {
            root: dir.to_path_buf(),
            ..Self::default()
        })
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root.join(&self.storage.path)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(|p| self.root.join(p))
    }

    /// The configured catalog, or the built-in one
    pub fn registry(&self) -> Result<ThemeRegistry> {
        match self.catalog_path() {
            Some(path) => ThemeRegistry::from_path(&path)
                .with_context(|| format!("Failed to load theme catalog {}", path.display())),
            None => ThemeRegistry::builtin().context("Built-in theme catalog is invalid"),
        }
    }
}
