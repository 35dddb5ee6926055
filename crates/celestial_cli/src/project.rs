//! Project scaffolding

use anyhow::Result;
use celestial_theme::BUILTIN_CATALOG;
use std::fs;
use std::path::Path;

use crate::config::{CelestialConfig, CONFIG_FILE};

/// Catalog file written by `init --catalog`
pub const CATALOG_FILE: &str = "themes.json";

/// Write a `celestial.toml` (and optionally an editable copy of the built-in
/// catalog) into `path`
pub fn create_project(path: &Path, with_catalog: bool) -> Result<CelestialConfig> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(path)?;

    let mut config = CelestialConfig {
        root: path.to_path_buf(),
        ..CelestialConfig::default()
    };
    if with_catalog {
        fs::write(path.join(CATALOG_FILE), BUILTIN_CATALOG)?;
        config.catalog.path = Some(CATALOG_FILE.to_string());
    }

    fs::write(&config_path, config.to_toml()?)?;
    tracing::info!("created {}", config_path.display());
    Ok(config)
}
