//! Base component trait and shared class assembly

use crate::markup::{ClassList, Element};

/// Prefix of every component class
pub const PREFIX: &str = "cui";

/// Base trait for all components
pub trait Component {
    /// Block name, e.g. `button` for `cui-button`
    const NAME: &'static str;

    /// Build the markup for the current configuration and state
    fn render(&self) -> Element;

    fn to_html(&self) -> String {
        self.render().to_html()
    }
}

/// `cui-{name}`
pub fn block(name: &str) -> String {
    format!("{PREFIX}-{name}")
}

/// `cui-{name}--{modifier}`
pub fn modifier(name: &str, modifier: &str) -> String {
    format!("{PREFIX}-{name}--{modifier}")
}

/// `cui-{name}__{element}`
pub fn element(name: &str, element: &str) -> String {
    format!("{PREFIX}-{name}__{element}")
}

/// Classes every themed component starts from: the block, then variant, size
/// and the common state modifiers.
pub fn component_classes(
    name: &str,
    variant: Option<&str>,
    size: Option<&str>,
    disabled: bool,
    loading: bool,
) -> ClassList {
    let mut classes = ClassList::new();
    classes.push(block(name));
    if let Some(variant) = variant {
        classes.push(modifier(name, variant));
    }
    if let Some(size) = size {
        classes.push(modifier(name, size));
    }
    classes.push_if(disabled, modifier(name, "disabled"));
    classes.push_if(loading, modifier(name, "loading"));
    classes
}

/// Component size scale shared by button and input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Size {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_vocabulary() {
        let classes = component_classes("input", Some("filled"), Some(Size::Sm.as_str()), true, false);
        assert_eq!(
            classes.to_string(),
            "cui-input cui-input--filled cui-input--sm cui-input--disabled"
        );
        assert_eq!(element("card", "title"), "cui-card__title");
    }
}
