//! Text input with floating label, helper text and clear affordance

use crate::component::{component_classes, element, modifier, Component, Size};
use crate::components::icon::icon;
use crate::markup::{div, el, ClassList, Element};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputVariant {
    #[default]
    Outlined,
    Filled,
    Underlined,
}

impl InputVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outlined => "outlined",
            Self::Filled => "filled",
            Self::Underlined => "underlined",
        }
    }
}

/// Input configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputConfig {
    pub id: Option<String>,
    pub input_type: String,
    pub variant: InputVariant,
    pub size: Size,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    /// Replaces the helper text and switches to the error styling
    pub error_message: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub read_only: bool,
    /// Show a clear button while there is a value
    pub clearable: bool,
    pub prefix_icon: Option<String>,
    pub suffix_icon: Option<String>,
    /// Replaces the suffix icon with a spinner
    pub loading: bool,
    /// Label moves above the field when focused or filled
    pub floating_label: bool,
    pub dense: bool,
    pub class_name: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id: None,
            input_type: "text".to_string(),
            variant: InputVariant::default(),
            size: Size::default(),
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            required: false,
            disabled: false,
            read_only: false,
            clearable: false,
            prefix_icon: None,
            suffix_icon: None,
            loading: false,
            floating_label: true,
            dense: false,
            class_name: None,
        }
    }
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn prefix_icon(mut self, name: impl Into<String>) -> Self {
        self.prefix_icon = Some(name.into());
        self
    }

    pub fn suffix_icon(mut self, name: impl Into<String>) -> Self {
        self.suffix_icon = Some(name.into());
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn floating_label(mut self, floating: bool) -> Self {
        self.floating_label = floating;
        self
    }

    pub fn dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// Input component with its transient value and focus state
pub struct Input {
    config: InputConfig,
    value: String,
    focused: bool,
    on_change: Option<Box<dyn FnMut(&str) + Send>>,
}

impl Input {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            value: String::new(),
            focused: false,
            on_change: None,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn has_error(&self) -> bool {
        self.config.error_message.is_some()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn on_change<F: FnMut(&str) + Send + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    fn editable(&self) -> bool {
        !self.config.disabled && !self.config.read_only
    }

    pub fn focus(&mut self) {
        if !self.config.disabled {
            self.focused = true;
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replace the value. Ignored while disabled or read-only.
    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        if !self.editable() {
            return false;
        }
        self.value = value.into();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.value);
        }
        true
    }

    /// Empty the value and keep focus on the field
    pub fn clear(&mut self) -> bool {
        let cleared = self.set_value(String::new());
        if cleared {
            self.focus();
        }
        cleared
    }

    fn show_clear(&self) -> bool {
        self.config.clearable && !self.value.is_empty() && self.editable()
    }

    fn label_classes(&self) -> ClassList {
        let c = &self.config;
        let active = self.focused || !self.value.is_empty();
        let mut classes = ClassList::new();
        classes.push(element(Self::NAME, "label"));
        classes.push_if(c.floating_label, element(Self::NAME, "label--floating"));
        classes.push_if(c.floating_label && active, element(Self::NAME, "label--active"));
        classes.push_if(self.focused, element(Self::NAME, "label--focused"));
        classes.push_if(self.has_error(), element(Self::NAME, "label--error"));
        classes
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("focused", &self.focused)
            .finish()
    }
}

impl Component for Input {
    const NAME: &'static str = "input";

    fn render(&self) -> Element {
        let c = &self.config;
        let name = Self::NAME;

        let mut input_classes = component_classes(
            name,
            Some(c.variant.as_str()),
            Some(c.size.as_str()),
            c.disabled,
            false,
        );
        input_classes.push_if(self.has_error(), modifier(name, "error"));
        input_classes.push_if(c.dense, modifier(name, "dense"));
        input_classes.push_if(c.read_only, modifier(name, "readonly"));
        if let Some(extra) = &c.class_name {
            input_classes.extend_str(extra);
        }

        let wrapper = div()
            .class("cui-input-wrapper")
            .class_if(self.focused, "cui-input-wrapper--focused")
            .class_if(!self.value.is_empty(), "cui-input-wrapper--has-value")
            .class_if(self.has_error(), "cui-input-wrapper--error")
            .class_if(c.prefix_icon.is_some(), "cui-input-wrapper--with-prefix")
            .class_if(
                c.suffix_icon.is_some() || c.loading || c.clearable,
                "cui-input-wrapper--with-suffix",
            );

        let mut container = div().class("cui-input-container");

        if let Some(prefix) = &c.prefix_icon {
            container = container.child(
                el("span")
                    .class(element(name, "prefix"))
                    .child(icon(prefix.clone()).render()),
            );
        }

        // Floating labels hide the placeholder until the label has moved up.
        let show_placeholder = !c.floating_label || self.focused || c.label.is_none();
        let mut field = el("input")
            .classes(input_classes)
            .class(element(name, "field"))
            .attr("type", c.input_type.clone())
            .attr("value", self.value.clone())
            .flag("disabled", c.disabled)
            .flag("readonly", c.read_only)
            .flag("required", c.required);
        if let Some(id) = &c.id {
            field = field.attr("id", id.clone());
        }
        if let (Some(placeholder), true) = (&c.placeholder, show_placeholder) {
            field = field.attr("placeholder", placeholder.clone());
        }
        if self.has_error() {
            field = field.attr("aria-invalid", "true");
        }
        container = container.child(field);

        if let Some(label) = &c.label {
            let mut label_el = el("label").classes(self.label_classes()).child(label.as_str());
            if let Some(id) = &c.id {
                label_el = label_el.attr("for", id.clone());
            }
            if c.required {
                label_el = label_el.child(el("span").class(element(name, "required")).child("*"));
            }
            container = container.child(label_el);
        }

        if self.show_clear() {
            container = container.child(
                el("button")
                    .class(element(name, "clear"))
                    .attr("type", "button")
                    .attr("aria-label", "Clear input")
                    .child(icon("times").render()),
            );
        }

        if c.loading {
            container = container.child(
                el("span")
                    .class(element(name, "suffix"))
                    .child(icon("spinner").spin(true).render()),
            );
        } else if let Some(suffix) = &c.suffix_icon {
            container = container.child(
                el("span")
                    .class(element(name, "suffix"))
                    .child(icon(suffix.clone()).render()),
            );
        }

        let help_text = c.error_message.as_ref().or(c.helper_text.as_ref());
        let help = help_text.map(|text| {
            el("div")
                .class(element(name, "help"))
                .class_if(self.has_error(), element(name, "help--error"))
                .child(text.as_str())
        });

        wrapper.child(container).child_opt(help)
    }
}
