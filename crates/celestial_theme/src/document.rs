//! Applying a theme to the document root
//!
//! The core never touches a real DOM. It writes class names and custom
//! properties through [`StyleTarget`]; hosts implement it over whatever their
//! root element is, and [`DocumentRoot`] is the headless in-memory version
//! used by tests and the CLI.

use std::sync::{Arc, Mutex};

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::css::{synthesize, CssVariables, SynthesisOptions};
use crate::sync::lock;
use crate::theme::{Theme, ThemeMode};

/// Prefix shared by every class this crate puts on the root element
pub const CLASS_PREFIX: &str = "cui";

/// `cui-light` / `cui-dark`
pub fn mode_class(mode: ThemeMode) -> String {
    format!("{CLASS_PREFIX}-{}", mode.as_str())
}

/// `cui-theme-{id}`
pub fn theme_class(id: &str) -> String {
    format!("{CLASS_PREFIX}-theme-{id}")
}

/// Write-only view of the root element
pub trait StyleTarget: Send {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_property(&mut self, name: &str, value: &str);
    fn remove_property(&mut self, name: &str);
}

impl<T: StyleTarget + ?Sized> StyleTarget for Box<T> {
    fn add_class(&mut self, class: &str) {
        (**self).add_class(class)
    }

    fn remove_class(&mut self, class: &str) {
        (**self).remove_class(class)
    }

    fn set_property(&mut self, name: &str, value: &str) {
        (**self).set_property(name, value)
    }

    fn remove_property(&mut self, name: &str) {
        (**self).remove_property(name)
    }
}

/// Lets the host keep a handle on a target it gave away
impl<T: StyleTarget> StyleTarget for Arc<Mutex<T>> {
    fn add_class(&mut self, class: &str) {
        lock(self).add_class(class)
    }

    fn remove_class(&mut self, class: &str) {
        lock(self).remove_class(class)
    }

    fn set_property(&mut self, name: &str, value: &str) {
        lock(self).set_property(name, value)
    }

    fn remove_property(&mut self, name: &str) {
        lock(self).remove_property(name)
    }
}

/// Headless root element: an ordered class list and inline style
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRoot {
    classes: IndexSet<String>,
    properties: IndexMap<String, String>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A root wrapped for sharing with a manager
    pub fn shared() -> Arc<Mutex<DocumentRoot>> {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `class="..."` value
    pub fn class_attribute(&self) -> String {
        self.classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `style="..."` value
    pub fn style_attribute(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl StyleTarget for DocumentRoot {
    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.properties.shift_remove(name);
    }
}

/// Owns a [`StyleTarget`] and remembers what it last wrote, so switching
/// themes leaves no stale marker classes or properties behind.
pub struct DocumentApplier {
    target: Box<dyn StyleTarget>,
    options: SynthesisOptions,
    theme_class: Option<String>,
    properties: IndexSet<String>,
}

impl DocumentApplier {
    pub fn new(target: impl StyleTarget + 'static, options: SynthesisOptions) -> Self {
        Self {
            target: Box::new(target),
            options,
            theme_class: None,
            properties: IndexSet::new(),
        }
    }

    /// Apply a theme, returning the variables that were written
    pub fn apply(&mut self, id: &str, theme: &Theme) -> CssVariables {
        let vars = synthesize(theme, self.options);

        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            self.target.remove_class(&mode_class(mode));
        }
        if let Some(previous) = self.theme_class.take() {
            self.target.remove_class(&previous);
        }

        let class = theme_class(id);
        self.target.add_class(&mode_class(theme.mode));
        self.target.add_class(&class);
        self.theme_class = Some(class);

        let stale: Vec<String> = self
            .properties
            .iter()
            .filter(|name| !vars.contains(name))
            .cloned()
            .collect();
        for name in &stale {
            self.target.remove_property(name);
        }

        self.properties.clear();
        for (name, value) in vars.iter() {
            self.target.set_property(name, value);
            self.properties.insert(name.to_string());
        }

        trace!(
            "DocumentApplier::apply - {} ({} properties, {} removed)",
            id,
            vars.len(),
            stale.len()
        );
        vars
    }

    /// Id-class of the theme currently on the root, if any
    pub fn applied_class(&self) -> Option<&str> {
        self.theme_class.as_deref()
    }
}

impl std::fmt::Debug for DocumentApplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentApplier")
            .field("options", &self.options)
            .field("theme_class", &self.theme_class)
            .field("properties", &self.properties.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorBundle;
    use crate::tokens::Channel;

    fn theme(mode: ThemeMode, extra: Option<&str>) -> Theme {
        let mut colors = ColorBundle::new().with_channel(
            Channel::Primary,
            [("500".to_string(), "#0ea5e9".to_string())].into_iter().collect(),
        );
        if let Some(name) = extra {
            colors.insert(name, [("1".to_string(), "#111111".to_string())].into_iter().collect());
        }
        Theme::new("T", mode).colors(colors)
    }

    #[test]
    fn swaps_marker_classes() {
        let root = DocumentRoot::shared();
        let mut applier = DocumentApplier::new(root.clone(), SynthesisOptions::COLORS);

        applier.apply("first", &theme(ThemeMode::Light, None));
        applier.apply("second", &theme(ThemeMode::Dark, None));

        let root = root.lock().unwrap();
        assert!(root.has_class("cui-dark"));
        assert!(root.has_class("cui-theme-second"));
        assert!(!root.has_class("cui-light"));
        assert!(!root.has_class("cui-theme-first"));
        assert_eq!(root.classes().count(), 2);
    }

    #[test]
    fn removes_properties_the_next_theme_does_not_declare() {
        let root = DocumentRoot::shared();
        let mut applier = DocumentApplier::new(root.clone(), SynthesisOptions::COLORS);

        applier.apply("a", &theme(ThemeMode::Light, Some("brand")));
        assert_eq!(root.lock().unwrap().property("--cui-color-brand-1"), Some("#111111"));

        applier.apply("b", &theme(ThemeMode::Light, None));
        let root = root.lock().unwrap();
        assert_eq!(root.property("--cui-color-brand-1"), None);
        assert_eq!(root.property("--cui-color-primary-500"), Some("#0ea5e9"));
    }

    #[test]
    fn attribute_rendering() {
        let mut root = DocumentRoot::new();
        root.add_class("cui-light");
        root.add_class("cui-theme-x");
        root.set_property("--a", "1");
        root.set_property("--b", "2");
        assert_eq!(root.class_attribute(), "cui-light cui-theme-x");
        assert_eq!(root.style_attribute(), "--a: 1; --b: 2;");
    }
}
