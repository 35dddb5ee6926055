//! Active-theme state
//!
//! [`ThemeManager`] is the single source of truth for which theme is active.
//! One instance is created at application start and handed (usually as an
//! `Arc`) to whatever needs it. Every state change runs in this order:
//!
//! 1. update selection state
//! 2. apply the theme to the document root
//! 3. persist (manual choices only)
//! 4. notify subscribers with `(id, theme)`
//!
//! Subscribers are called after all internal locks are released, so a
//! subscriber may call back into the manager.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::ManagerConfig;
use crate::css::{synthesize, CssVariables};
use crate::document::{DocumentApplier, DocumentRoot, StyleTarget};
use crate::error::{ConfigLoadError, ThemeError};
use crate::registry::ThemeRegistry;
use crate::storage::{MemoryStore, PreferenceStore};
use crate::subscription::{Subscribers, Subscription};
use crate::sync::{lock, read, write};
use crate::system::{ColorSchemeSource, EnvScheme};
use crate::theme::{Theme, ThemeMode};

/// Why the active theme is what it is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectionSource {
    /// The user picked a theme; it is saved and survives OS changes
    Manual,
    /// Derived from the OS light/dark signal
    SystemFollowing,
}

/// Payload delivered to subscribers
#[derive(Clone, Debug)]
pub struct ThemeChange {
    pub id: String,
    pub theme: Arc<Theme>,
}

#[derive(Debug)]
struct Selection {
    id: String,
    theme: Arc<Theme>,
    source: SelectionSource,
    preview: Option<String>,
}

/// Builder for [`ThemeManager`]
pub struct ThemeManagerBuilder {
    registry: ThemeRegistry,
    config: ManagerConfig,
    store: Box<dyn PreferenceStore>,
    system: Box<dyn ColorSchemeSource>,
    target: Box<dyn StyleTarget>,
}

impl ThemeManagerBuilder {
    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Where manual choices are saved (default: in memory)
    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// OS "prefers dark" signal read at construction (default: environment)
    pub fn system(mut self, system: impl ColorSchemeSource + 'static) -> Self {
        self.system = Box::new(system);
        self
    }

    /// Root element written on every change (default: a private headless root)
    pub fn document(mut self, target: impl StyleTarget + 'static) -> Self {
        self.target = Box::new(target);
        self
    }

    pub fn build(self) -> Result<ThemeManager, ConfigLoadError> {
        ThemeManager::from_builder(self)
    }
}

/// Owns theme selection, persistence, OS-preference following and
/// change notification.
pub struct ThemeManager {
    registry: ThemeRegistry,
    config: ManagerConfig,
    store: Box<dyn PreferenceStore>,
    selection: RwLock<Selection>,
    document: Mutex<DocumentApplier>,
    subscribers: Subscribers<ThemeChange>,
    system_prefers_dark: AtomicBool,
    /// Cleared by [`ThemeManager::shutdown`]
    listening: AtomicBool,
}

impl ThemeManager {
    pub fn builder(registry: ThemeRegistry) -> ThemeManagerBuilder {
        ThemeManagerBuilder {
            registry,
            config: ManagerConfig::default(),
            store: Box::new(MemoryStore::new()),
            system: Box::new(EnvScheme),
            target: Box::new(DocumentRoot::new()),
        }
    }

    /// Manager with default settings over the built-in catalog
    pub fn with_builtin_themes() -> Result<Self, ConfigLoadError> {
        Self::builder(ThemeRegistry::builtin()?).build()
    }

    fn from_builder(builder: ThemeManagerBuilder) -> Result<Self, ConfigLoadError> {
        let ThemeManagerBuilder {
            registry,
            config,
            store,
            system,
            target,
        } = builder;

        let prefers_dark = system.prefers_dark();
        let persisted = if config.persist_theme_choice {
            load_preference(store.as_ref(), &config.storage_key)
        } else {
            None
        };

        let (id, source) = match persisted {
            Some(id) if registry.contains(&id) => (id, SelectionSource::Manual),
            other => {
                if let Some(stale) = other {
                    warn!("saved theme \"{}\" is not in the catalog; ignoring", stale);
                }
                let id = initial_theme(&registry, &config, prefers_dark)
                    .ok_or(ConfigLoadError::Empty)?
                    .to_string();
                (id, SelectionSource::SystemFollowing)
            }
        };

        let theme = registry
            .get(&id)
            .cloned()
            .ok_or(ConfigLoadError::Empty)?;

        let mut applier = DocumentApplier::new(target, config.synthesis());
        applier.apply(&id, &theme);

        debug!(
            "ThemeManager::new - {} ({:?}, system prefers {})",
            id,
            source,
            ThemeMode::from_prefers_dark(prefers_dark)
        );

        Ok(Self {
            registry,
            config,
            store,
            selection: RwLock::new(Selection {
                id,
                theme,
                source,
                preview: None,
            }),
            document: Mutex::new(applier),
            subscribers: Subscribers::new(),
            system_prefers_dark: AtomicBool::new(prefers_dark),
            listening: AtomicBool::new(true),
        })
    }

    // ========== Commands ==========

    /// Select a theme by id. Fails with [`ThemeError::UnknownTheme`], without
    /// changing anything, if the id is not in the registry. Selecting the
    /// already active theme re-applies and notifies.
    pub fn set_theme(&self, id: &str) -> Result<(), ThemeError> {
        let Some(theme) = self.registry.get(id).cloned() else {
            warn!("ThemeManager::set_theme - theme \"{}\" not found", id);
            return Err(ThemeError::UnknownTheme(id.to_string()));
        };

        self.commit(id, &theme, SelectionSource::Manual);
        if self.config.persist_theme_choice {
            if let Err(e) = self.store.save(&self.config.storage_key, id) {
                warn!("could not save theme preference: {}", e);
            }
        }
        self.publish(id, theme);
        Ok(())
    }

    /// Switch to the best theme of the opposite mode
    pub fn toggle_mode(&self) -> Result<(), ThemeError> {
        let target = self.current().mode.toggle();
        match self.registry.best_for_mode(target) {
            Some(id) => self.set_theme(id),
            None => {
                debug!("ThemeManager::toggle_mode - no {} theme", target);
                Err(ThemeError::NoThemeForMode(target))
            }
        }
    }

    /// Forget the manual choice and follow the OS signal again.
    ///
    /// The saved preference is cleared and the source becomes
    /// [`SelectionSource::SystemFollowing`] even when the catalog has no theme
    /// for the OS mode; in that case the active theme is kept and
    /// [`ThemeError::NoThemeForMode`] is returned.
    pub fn reset_to_system_preference(&self) -> Result<(), ThemeError> {
        if self.config.persist_theme_choice {
            if let Err(e) = self.store.remove(&self.config.storage_key) {
                warn!("could not clear theme preference: {}", e);
            }
        }
        write(&self.selection).source = SelectionSource::SystemFollowing;
        self.follow_system()
    }

    /// OS light/dark signal changed.
    ///
    /// Always recorded. Switches the theme only while following the system
    /// with detection enabled, and never after [`shutdown`](Self::shutdown).
    pub fn on_system_scheme_changed(&self, prefers_dark: bool) {
        if !self.listening.load(Ordering::SeqCst) {
            return;
        }
        self.system_prefers_dark.store(prefers_dark, Ordering::SeqCst);
        debug!(
            "ThemeManager::on_system_scheme_changed - prefers {}",
            ThemeMode::from_prefers_dark(prefers_dark)
        );

        if self.config.auto_detect_system_theme && self.is_following_system() {
            if let Err(e) = self.follow_system() {
                debug!("ThemeManager::on_system_scheme_changed - {}", e);
            }
        }
    }

    /// Register a callback run after every state change with `(id, theme)`
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str, &Theme) + Send + Sync + 'static,
    {
        self.subscribers
            .subscribe(move |change: &ThemeChange| callback(&change.id, &change.theme))
    }

    /// Like [`subscribe`](Self::subscribe), but hands over the shared theme
    pub fn subscribe_changes<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ThemeChange) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Apply a theme to the document without selecting, saving or notifying
    pub fn preview_theme(&self, id: &str) -> Result<(), ThemeError> {
        let Some(theme) = self.registry.get(id) else {
            warn!("ThemeManager::preview_theme - theme \"{}\" not found", id);
            return Err(ThemeError::UnknownTheme(id.to_string()));
        };
        lock(&self.document).apply(id, theme);
        write(&self.selection).preview = Some(id.to_string());
        Ok(())
    }

    /// Put the active theme back on the document
    pub fn end_preview(&self) {
        let (id, theme) = {
            let mut selection = write(&self.selection);
            if selection.preview.take().is_none() {
                return;
            }
            (selection.id.clone(), selection.theme.clone())
        };
        lock(&self.document).apply(&id, &theme);
    }

    /// Select the previewed theme. No-op without a preview.
    pub fn commit_preview(&self) -> Result<(), ThemeError> {
        let preview = read(&self.selection).preview.clone();
        match preview {
            Some(id) => self.set_theme(&id),
            None => Ok(()),
        }
    }

    /// Drop all subscribers and stop reacting to OS signals
    pub fn shutdown(&self) {
        self.subscribers.clear();
        self.listening.store(false, Ordering::SeqCst);
        debug!("ThemeManager::shutdown");
    }

    // ========== Queries ==========

    pub fn current(&self) -> Arc<Theme> {
        read(&self.selection).theme.clone()
    }

    pub fn current_id(&self) -> String {
        read(&self.selection).id.clone()
    }

    pub fn is_current(&self, id: &str) -> bool {
        read(&self.selection).id == id
    }

    pub fn selection_source(&self) -> SelectionSource {
        read(&self.selection).source
    }

    pub fn is_following_system(&self) -> bool {
        self.selection_source() == SelectionSource::SystemFollowing
    }

    pub fn is_dark(&self) -> bool {
        self.current().mode.is_dark()
    }

    /// Last OS signal seen
    pub fn system_prefers_dark(&self) -> bool {
        self.system_prefers_dark.load(Ordering::SeqCst)
    }

    /// Whether the active theme's mode matches the OS signal
    pub fn current_matches_system(&self) -> bool {
        self.is_dark() == self.system_prefers_dark()
    }

    /// Id being previewed, if any
    pub fn previewing(&self) -> Option<String> {
        read(&self.selection).preview.clone()
    }

    /// Variables for the active theme, synthesized with the configured options
    pub fn variables(&self) -> CssVariables {
        synthesize(&self.current(), self.config.synthesis())
    }

    /// Pretty JSON `{ "<id>": { ...theme } }` of the active theme
    pub fn export_current_theme(&self) -> Result<String, serde_json::Error> {
        let (id, theme) = {
            let selection = read(&self.selection);
            (selection.id.clone(), selection.theme.clone())
        };
        let mut document = IndexMap::with_capacity(1);
        document.insert(id, theme.as_ref());
        serde_json::to_string_pretty(&document)
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // ========== Internals ==========

    fn follow_system(&self) -> Result<(), ThemeError> {
        let mode = ThemeMode::from_prefers_dark(self.system_prefers_dark());
        let Some(id) = self.registry.best_for_mode(mode) else {
            return Err(ThemeError::NoThemeForMode(mode));
        };
        let Some(theme) = self.registry.get(id).cloned() else {
            return Err(ThemeError::UnknownTheme(id.to_string()));
        };
        self.commit(id, &theme, SelectionSource::SystemFollowing);
        self.publish(id, theme);
        Ok(())
    }

    fn commit(&self, id: &str, theme: &Arc<Theme>, source: SelectionSource) {
        {
            let mut selection = write(&self.selection);
            debug!(
                "ThemeManager::commit - {} -> {} ({:?})",
                selection.id, id, source
            );
            selection.id = id.to_string();
            selection.theme = Arc::clone(theme);
            selection.source = source;
            selection.preview = None;
        }
        lock(&self.document).apply(id, theme);
    }

    fn publish(&self, id: &str, theme: Arc<Theme>) {
        let change = ThemeChange {
            id: id.to_string(),
            theme,
        };
        info!(
            target: "celestial_theme::change",
            theme_id = %change.id,
            mode = %change.theme.mode,
            "theme changed"
        );
        self.subscribers.notify(&change);
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let selection = read(&self.selection);
        f.debug_struct("ThemeManager")
            .field("current", &selection.id)
            .field("source", &selection.source)
            .field("themes", &self.registry.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn load_preference(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(e) => {
            warn!("theme preference unavailable: {}", e);
            None
        }
    }
}

/// Construction order without a usable saved choice: best theme for the OS
/// mode (when detection is on), then the configured default, then the first
/// registered theme.
fn initial_theme<'a>(
    registry: &'a ThemeRegistry,
    config: &ManagerConfig,
    prefers_dark: bool,
) -> Option<&'a str> {
    let from_system = config
        .auto_detect_system_theme
        .then(|| registry.best_for_mode(ThemeMode::from_prefers_dark(prefers_dark)))
        .flatten();

    from_system
        .or_else(|| registry.ids().find(|id| *id == config.default_theme))
        .or_else(|| registry.first_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeCategory;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::from_themes([
            ("plain", Theme::new("Plain", ThemeMode::Light)),
            (
                "a",
                Theme::new("A", ThemeMode::Light)
                    .category(ThemeCategory::Celestial)
                    .featured(true),
            ),
            (
                "b",
                Theme::new("B", ThemeMode::Dark)
                    .category(ThemeCategory::Celestial)
                    .featured(true),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn default_theme_used_when_detection_is_off() {
        let manager = ThemeManager::builder(registry())
            .config(ManagerConfig::default().auto_detect(false).default_theme("plain"))
            .system(ThemeMode::Dark)
            .build()
            .unwrap();
        assert_eq!(manager.current_id(), "plain");
        assert!(manager.is_following_system());
        assert!(manager.system_prefers_dark());
        assert!(!manager.current_matches_system());
    }

    #[test]
    fn first_theme_when_default_is_missing() {
        let manager = ThemeManager::builder(registry())
            .config(ManagerConfig::default().auto_detect(false).default_theme("gone"))
            .build()
            .unwrap();
        assert_eq!(manager.current_id(), "plain");
    }

    #[test]
    fn export_is_keyed_by_id() {
        let manager = ThemeManager::builder(registry())
            .system(ThemeMode::Dark)
            .build()
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&manager.export_current_theme().unwrap()).unwrap();
        assert_eq!(json["b"]["name"], "B");
        assert_eq!(json["b"]["mode"], "dark");
    }
}
