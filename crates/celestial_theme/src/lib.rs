//! CelestialUI theming core
//!
//! Headless theme management for the CelestialUI components: a fixed catalog
//! of themes, one active selection that can follow the OS light/dark signal or
//! a saved manual choice, and the projection of a theme into CSS custom
//! properties on a document root.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use celestial_theme::{DocumentRoot, ThemeManager, ThemeMode, ThemeRegistry};
//!
//! let root = DocumentRoot::shared();
//! let manager = ThemeManager::builder(ThemeRegistry::builtin()?)
//!     .system(ThemeMode::Dark)
//!     .document(root.clone())
//!     .build()?;
//!
//! let _sub = manager.subscribe(|id, theme| println!("{id}: {}", theme.name));
//! manager.set_theme("solar-flare")?;
//! assert!(root.lock().unwrap().has_class("cui-theme-solar-flare"));
//! ```
//!
//! # Layers
//!
//! - [`tokens`]: color values, base palettes, semantic tables, scale tokens
//! - [`Theme`] / [`ThemeRegistry`]: the data model and the loaded catalog
//! - [`css`] and [`derived`]: variable synthesis (`--cui-color-{channel}-{shade}`)
//! - [`document`]: writing classes and variables to a [`StyleTarget`]
//! - [`ThemeManager`]: selection, persistence, OS signal, notification
//! - [`legacy`]: the older single-theme interface on top of the manager

pub mod config;
pub mod css;
pub mod derived;
pub mod document;
pub mod error;
pub mod legacy;
pub mod manager;
pub mod presets;
pub mod registry;
pub mod storage;
pub mod subscription;
pub mod system;
pub mod theme;
pub mod tokens;

mod sync;

pub use config::{ManagerConfig, DEFAULT_STORAGE_KEY, DEFAULT_THEME_ID};
pub use css::{synthesize, to_variables, CssVariables, SynthesisOptions};
pub use document::{DocumentApplier, DocumentRoot, StyleTarget};
pub use error::{ConfigLoadError, StorageError, ThemeError};
pub use legacy::{Breakpoint, LegacyMode, LegacyTheme, LegacyThemeConfig};
pub use manager::{SelectionSource, ThemeChange, ThemeManager, ThemeManagerBuilder};
pub use presets::{ThemePreset, BUILTIN_CATALOG};
pub use registry::{CatalogDocument, ThemeRegistry};
pub use storage::{FileStore, MemoryStore, NullStore, PreferenceStore};
pub use subscription::{Subscribers, Subscription};
pub use system::{detect_system_color_scheme, ColorSchemeSource, EnvScheme};
pub use theme::{ColorBundle, Theme, ThemeCategory, ThemeMode};
pub use tokens::*;
