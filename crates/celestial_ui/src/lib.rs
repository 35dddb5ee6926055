//! CelestialUI components
//!
//! Themed presentational widgets built on [`celestial_theme`]. Components
//! render to a small markup tree ([`markup::Element`]) that a host turns into
//! DOM nodes or HTML; theme changes reach them through [`ThemeBinding`].
//!
//! ```rust,ignore
//! use celestial_ui::prelude::*;
//!
//! let manager = Arc::new(ThemeManager::with_builtin_themes()?);
//! let binding = ThemeBinding::attach(&manager);
//!
//! let html = Button::with_config(ButtonConfig::new("Save").variant(ButtonVariant::Primary)).to_html();
//! let picker = ThemeSelector::new(manager.clone()).render();
//! ```

pub mod binding;
pub mod component;
pub mod components;
pub mod markup;
pub mod toast_queue;

pub use binding::ThemeBinding;
pub use component::{Component, Size};
pub use components::*;
pub use markup::{div, el, ClassList, Element, Node};
pub use toast_queue::{
    Toast, ToastAction, ToastKind, ToastOptions, ToastPosition, ToastQueue, DEFAULT_DURATION_MS,
};

/// Common imports for hosts
pub mod prelude {
    pub use std::sync::Arc;

    pub use celestial_theme::{Theme, ThemeManager, ThemeMode, ThemeRegistry};

    pub use crate::binding::ThemeBinding;
    pub use crate::component::{Component, Size};
    pub use crate::components::*;
    pub use crate::toast_queue::{ToastKind, ToastOptions, ToastPosition, ToastQueue};
}
