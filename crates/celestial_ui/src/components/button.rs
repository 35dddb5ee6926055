//! Button component with pointer-driven interaction states
//!
//! The Button component provides:
//! - Variants (primary, secondary, outline, ghost, link, destructive) and sizes
//! - Loading, disabled, full-width, rounded and icon-only modifiers
//! - Optional leading/trailing icons
//! - Rendering as `<a>` when an `href` is set
//!
//! Interaction follows a small state machine: idle, hovered, pressed. A click
//! is a pointer-up while pressed, and never fires while disabled or loading.

use crate::component::{component_classes, element, modifier, Component, Size};
use crate::components::icon::icon;
use crate::markup::{el, Element};

/// Button interaction states
pub mod states {
    pub const IDLE: u32 = 0;
    pub const HOVERED: u32 = 1;
    pub const PRESSED: u32 = 2;
    pub const DISABLED: u32 = 3;
}

/// Pointer input a button reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
    Ghost,
    Link,
    Destructive,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Link => "link",
            Self::Destructive => "destructive",
        }
    }
}

/// `type` attribute of a `<button>`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

/// Button configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonConfig {
    /// Label text (omitted when `icon_only`)
    pub label: String,
    pub variant: ButtonVariant,
    pub size: Size,
    pub button_type: ButtonType,
    /// Disables interaction and greys the button out
    pub disabled: bool,
    /// Shows a spinner in place of the icons and blocks clicks
    pub loading: bool,
    /// Render only the icons, no label
    pub icon_only: bool,
    pub full_width: bool,
    /// Pill-shaped corners
    pub rounded: bool,
    pub left_icon: Option<String>,
    pub right_icon: Option<String>,
    /// Render as an anchor pointing here
    pub href: Option<String>,
    pub target: Option<String>,
    pub rel: Option<String>,
    /// Extra classes appended after the generated ones
    pub class_name: Option<String>,
}

impl ButtonConfig {
    /// Create a new button config with a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn button_type(mut self, button_type: ButtonType) -> Self {
        self.button_type = button_type;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn icon_only(mut self, icon_only: bool) -> Self {
        self.icon_only = icon_only;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded;
        self
    }

    pub fn left_icon(mut self, name: impl Into<String>) -> Self {
        self.left_icon = Some(name.into());
        self
    }

    pub fn right_icon(mut self, name: impl Into<String>) -> Self {
        self.right_icon = Some(name.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Clicks are ignored while disabled or loading
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.loading
    }
}

/// Button component
pub struct Button {
    config: ButtonConfig,
    state: u32,
    on_click: Option<Box<dyn FnMut() + Send>>,
}

/// Create a button with a label
pub fn button(label: impl Into<String>) -> Button {
    Button::with_config(ButtonConfig::new(label))
}

impl Button {
    pub fn with_config(config: ButtonConfig) -> Self {
        let state = if config.is_interactive() {
            states::IDLE
        } else {
            states::DISABLED
        };
        Self {
            config,
            state,
            on_click: None,
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Current interaction state, one of [`states`]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Set the click callback
    pub fn on_click<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    /// Feed a pointer event; returns true if it completed a click
    pub fn handle_event(&mut self, event: PointerEvent) -> bool {
        if !self.config.is_interactive() {
            self.state = states::DISABLED;
            return false;
        }

        let old_state = self.state;
        self.state = match (old_state, event) {
            (states::IDLE | states::DISABLED, PointerEvent::Enter) => states::HOVERED,
            (states::HOVERED, PointerEvent::Leave) => states::IDLE,
            (states::HOVERED, PointerEvent::Down) => states::PRESSED,
            (states::PRESSED, PointerEvent::Up) => states::HOVERED,
            (states::PRESSED, PointerEvent::Leave) => states::IDLE,
            (state, _) => state,
        };

        let clicked = old_state == states::PRESSED && self.state == states::HOVERED;
        if clicked {
            self.click();
        }
        clicked
    }

    /// Activate directly (keyboard, programmatic). Returns whether the
    /// callback ran.
    pub fn click(&mut self) -> bool {
        if !self.config.is_interactive() {
            return false;
        }
        match self.on_click.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

impl Component for Button {
    const NAME: &'static str = "button";

    fn render(&self) -> Element {
        let c = &self.config;
        let name = Self::NAME;

        let mut classes = component_classes(
            name,
            Some(c.variant.as_str()),
            Some(c.size.as_str()),
            c.disabled,
            c.loading,
        );
        classes.push_if(c.full_width, modifier(name, "full-width"));
        classes.push_if(c.rounded, modifier(name, "rounded"));
        classes.push_if(c.icon_only, modifier(name, "icon-only"));
        classes.push_if(
            c.left_icon.is_some() && !c.icon_only,
            modifier(name, "with-left-icon"),
        );
        classes.push_if(
            c.right_icon.is_some() && !c.icon_only,
            modifier(name, "with-right-icon"),
        );
        if let Some(extra) = &c.class_name {
            classes.extend_str(extra);
        }

        let mut root = match &c.href {
            Some(href) => {
                let mut a = el("a").attr("href", href.clone());
                if let Some(target) = &c.target {
                    a = a.attr("target", target.clone());
                }
                if let Some(rel) = &c.rel {
                    a = a.attr("rel", rel.clone());
                }
                a
            }
            None => el("button")
                .attr("type", c.button_type.as_str())
                .flag("disabled", !c.is_interactive()),
        }
        .classes(classes);

        if c.loading {
            root = root.child(
                el("span")
                    .class(element(name, "loading"))
                    .child(icon("spinner").spin(true).render()),
            );
        }
        if let (Some(left), false) = (&c.left_icon, c.loading) {
            root = root.child(
                icon(left.clone())
                    .class_name(format!("{} {}", element(name, "icon"), element(name, "icon--left")))
                    .render(),
            );
        }
        if !c.icon_only {
            root = root.child(
                el("span")
                    .class(element(name, "content"))
                    .child(c.label.as_str()),
            );
        }
        if let (Some(right), false) = (&c.right_icon, c.loading) {
            root = root.child(
                icon(right.clone())
                    .class_name(format!("{} {}", element(name, "icon"), element(name, "icon--right")))
                    .render(),
            );
        }
        if c.icon_only && !c.label.is_empty() {
            root = root.attr("aria-label", c.label.clone());
        }
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn class_assembly() {
        let e = Button::with_config(
            ButtonConfig::new("Save")
                .variant(ButtonVariant::Outline)
                .size(Size::Lg)
                .full_width(true)
                .left_icon("check")
                .class_name("extra"),
        )
        .render();

        assert_eq!(e.tag, "button");
        assert_eq!(
            e.classes.to_string(),
            "cui-button cui-button--outline cui-button--lg cui-button--full-width \
             cui-button--with-left-icon extra"
        );
        assert_eq!(e.get_attr("type"), Some("button"));
        assert_eq!(e.text(), "Save");
        assert!(e.find_class("cui-button__icon--left").is_some());
    }

    #[test]
    fn href_renders_anchor() {
        let e = Button::with_config(ButtonConfig::new("Docs").href("/docs").target("_blank")).render();
        assert_eq!(e.tag, "a");
        assert_eq!(e.get_attr("href"), Some("/docs"));
        assert_eq!(e.get_attr("target"), Some("_blank"));
        assert_eq!(e.get_attr("type"), None);
    }

    #[test]
    fn loading_replaces_icons_and_disables() {
        let e = Button::with_config(ButtonConfig::new("Wait").loading(true).left_icon("check")).render();
        assert!(e.has_class("cui-button--loading"));
        assert!(e.find_class("cui-button__loading").is_some());
        assert!(e.find_class("fa-check").is_none());
        assert_eq!(e.get_attr("disabled"), Some(""));
    }

    #[test]
    fn icon_only_keeps_accessible_name() {
        let e = Button::with_config(ButtonConfig::new("Close").icon_only(true).left_icon("times")).render();
        assert!(e.find_class("cui-button__content").is_none());
        assert!(!e.has_class("cui-button--with-left-icon"));
        assert_eq!(e.get_attr("aria-label"), Some("Close"));
    }

    #[test]
    fn pointer_sequence_clicks_once() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        let mut b = button("Go").on_click(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!b.handle_event(PointerEvent::Down));
        b.handle_event(PointerEvent::Enter);
        b.handle_event(PointerEvent::Down);
        assert_eq!(b.state(), states::PRESSED);
        assert!(b.handle_event(PointerEvent::Up));
        assert_eq!(b.state(), states::HOVERED);

        b.handle_event(PointerEvent::Down);
        b.handle_event(PointerEvent::Leave);
        assert!(!b.handle_event(PointerEvent::Up));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disabled_never_clicks() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let c = clicks.clone();
        let mut b = Button::with_config(ButtonConfig::new("No").disabled(true)).on_click(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(b.state(), states::DISABLED);
        b.handle_event(PointerEvent::Enter);
        b.handle_event(PointerEvent::Down);
        b.handle_event(PointerEvent::Up);
        assert!(!b.click());
        assert_eq!(clicks.load(Ordering::SeqCst), 0);
    }
}
