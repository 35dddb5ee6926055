//! Command implementations. Each returns the text to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use celestial_theme::{
    synthesize, Channel, EnvScheme, FileStore, SynthesisOptions, ThemeCategory,
    ThemeManager, ThemeMode, ThemeRegistry,
};

use crate::config::CelestialConfig;

/// Filters for `list`
#[derive(Debug, Default)]
pub struct ListFilter {
    pub mode: Option<ThemeMode>,
    pub category: Option<String>,
    pub featured: bool,
}

pub fn list(registry: &ThemeRegistry, filter: &ListFilter, current: Option<&str>) -> String {
    let category = filter.category.as_deref().map(ThemeCategory::from);
    let mut out = String::new();
    for (id, theme) in registry.all() {
        if filter.mode.is_some_and(|m| m != theme.mode)
            || category.as_ref().is_some_and(|c| c != &theme.category)
            || (filter.featured && !theme.featured)
        {
            continue;
        }
        let marker = if current == Some(id) { '*' } else { ' ' };
        let star = if theme.featured { "featured" } else { "" };
        let _ = writeln!(
            out,
            "{marker} {id:<24} {:<5} {:<10} {:<8} {}",
            theme.mode.as_str(),
            theme.category.as_str(),
            star,
            theme.name
        );
    }
    out
}

/// CSS rule with every variable of one theme
pub fn css(
    registry: &ThemeRegistry,
    id: &str,
    options: SynthesisOptions,
    selector: Option<&str>,
) -> Result<String> {
    let theme = registry
        .get(id)
        .with_context(|| format!("Unknown theme \"{id}\""))?;
    let selector = selector.map(str::to_string).unwrap_or_else(|| format!(".cui-theme-{id}"));
    Ok(synthesize(theme, options).to_css_block(&selector))
}

/// Pretty JSON `{ "<id>": theme }`
pub fn export(registry: &ThemeRegistry, id: &str) -> Result<String> {
    let theme = registry
        .get(id)
        .with_context(|| format!("Unknown theme \"{id}\""))?;
    let mut document = serde_json::Map::new();
    document.insert(id.to_string(), serde_json::to_value(theme.as_ref())?);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Load a catalog file and report what it holds. Missing channels are
/// reported but do not fail validation.
pub fn validate(path: &Path) -> Result<String> {
    let registry = ThemeRegistry::from_path(path)
        .with_context(|| format!("{} is not a valid theme catalog", path.display()))?;

    let mut out = String::new();
    let _ = writeln!(out, "{}: {} themes", path.display(), registry.len());
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        match registry.best_for_mode(mode) {
            Some(id) => {
                let _ = writeln!(out, "  {mode} default: {id}");
            }
            None => {
                let _ = writeln!(out, "  warning: no {mode} theme; toggling to {mode} will fail");
            }
        }
    }
    for (id, theme) in registry.all() {
        let missing: Vec<&str> = theme
            .colors
            .missing_channels()
            .into_iter()
            .map(Channel::key)
            .collect();
        if !missing.is_empty() {
            tracing::warn!("{} is missing channels: {}", id, missing.join(", "));
            let _ = writeln!(out, "  warning: {id} missing {} (neutral used)", missing.join(", "));
        }
    }
    Ok(out)
}

/// Manager over the configured catalog and preferences file. `scheme`
/// overrides OS detection.
pub fn open_manager(config: &CelestialConfig, scheme: Option<ThemeMode>) -> Result<ThemeManager> {
    let builder = ThemeManager::builder(config.registry()?)
        .config(config.theme.clone())
        .store(FileStore::new(config.storage_path()));
    let builder = match scheme {
        Some(mode) => builder.system(mode),
        None => builder.system(EnvScheme),
    };
    builder.build().context("Failed to start theme manager")
}

pub fn status(manager: &ThemeManager) -> String {
    let theme = manager.current();
    let source = if manager.is_following_system() {
        "following system"
    } else if manager.config().persist_theme_choice {
        "manual choice"
    } else {
        "manual choice, not saved"
    };
    let system = ThemeMode::from_prefers_dark(manager.system_prefers_dark());
    let mut out = format!(
        "{} ({}, {} mode, {})\nsystem prefers {} mode\n",
        manager.current_id(),
        theme.name,
        theme.mode,
        source,
        system
    );
    if !manager.current_matches_system() {
        out.push_str("current theme does not match the system preference\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn builtin() -> ThemeRegistry {
        ThemeRegistry::builtin().unwrap()
    }

    #[test]
    fn list_filters_and_marks_current() {
        let registry = builtin();
        let dark = list(
            &registry,
            &ListFilter {
                mode: Some(ThemeMode::Dark),
                ..Default::default()
            },
            None,
        );
        assert_eq!(dark.lines().count(), registry.by_mode(ThemeMode::Dark).count());
        assert!(dark.lines().all(|l| l.contains(" dark ")));

        let current = registry.first_id().unwrap().to_string();
        let all = list(&registry, &ListFilter::default(), Some(&current));
        assert!(all.lines().next().unwrap().starts_with(&format!("* {current}")));

        let featured = list(
            &registry,
            &ListFilter {
                featured: true,
                ..Default::default()
            },
            None,
        );
        assert_eq!(featured.lines().count(), registry.featured().count());
    }

    #[test]
    fn css_block_uses_theme_selector() {
        let registry = builtin();
        let id = registry.first_id().unwrap().to_string();
        let block = css(&registry, &id, SynthesisOptions::COLORS, None).unwrap();
        assert!(block.starts_with(&format!(".cui-theme-{id} {{\n")));
        assert!(block.contains("  --cui-color-primary-500: "));
        assert!(!block.contains("--cui-spacing-"));

        let full = css(&registry, &id, SynthesisOptions::FULL, Some(":root")).unwrap();
        assert!(full.starts_with(":root {"));
        assert!(full.contains("--cui-color-primary-alpha-10"));

        assert!(css(&registry, "nope", SynthesisOptions::COLORS, None).is_err());
    }

    #[test]
    fn export_is_reloadable() {
        let registry = builtin();
        let id = registry.first_id().unwrap().to_string();
        let json = export(&registry, &id).unwrap();
        let reloaded = ThemeRegistry::from_json_str(&format!("{{\"themes\": {json}}}")).unwrap();
        assert_eq!(reloaded.get(&id), registry.get(&id));
    }

    #[test]
    fn validate_reports_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.json");
        fs::write(
            &path,
            r##"{"themes": {"only-light": {"name": "Only Light", "mode": "light",
                "colors": {"primary": {"500": "#112233"}}}}}"##,
        )
        .unwrap();

        let report = validate(&path).unwrap();
        assert!(report.contains("1 themes"));
        assert!(report.contains("light default: only-light"));
        assert!(report.contains("warning: no dark theme"));
        assert!(report.contains("only-light missing secondary"));

        fs::write(&path, "{").unwrap();
        assert!(validate(&path).is_err());
    }

    #[test]
    fn manager_persists_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = CelestialConfig::load_or_default(dir.path()).unwrap();

        let manager = open_manager(&config, Some(ThemeMode::Light)).unwrap();
        assert!(manager.is_following_system());
        let dark = manager.registry().best_for_mode(ThemeMode::Dark).unwrap().to_string();
        manager.set_theme(&dark).unwrap();

        let again = open_manager(&config, Some(ThemeMode::Light)).unwrap();
        assert_eq!(again.current_id(), dark);
        let report = status(&again);
        assert!(report.contains("manual choice)"));
        assert!(report.contains("does not match"));
    }

    #[test]
    fn unsaved_choice_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CelestialConfig::load_or_default(dir.path()).unwrap();
        config.theme = config.theme.persist(false);

        let manager = open_manager(&config, Some(ThemeMode::Light)).unwrap();
        let dark = manager.registry().best_for_mode(ThemeMode::Dark).unwrap().to_string();
        manager.set_theme(&dark).unwrap();
        assert!(status(&manager).contains("manual choice, not saved"));
        assert!(!config.storage_path().exists());

        let again = open_manager(&config, Some(ThemeMode::Light)).unwrap();
        assert!(status(&again).contains("following system"));
    }
}
