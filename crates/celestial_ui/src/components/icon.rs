//! Icon component
//!
//! Renders an icon-font glyph (`<i class="fas fa-{name}">`). Size applies to
//! font size, width and height together.

use crate::component::{block, Component};
use crate::markup::{el, Element};

/// Icon configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconConfig {
    /// Glyph name without the `fa-` prefix
    pub name: String,
    /// CSS length; `None` leaves sizing to the stylesheet
    pub size: Option<String>,
    /// CSS color; `None` inherits
    pub color: Option<String>,
    /// Continuous rotation
    pub spin: bool,
    /// Extra classes appended after the generated ones
    pub class_name: Option<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: Some("1em".to_string()),
            color: None,
            spin: false,
            class_name: None,
        }
    }
}

impl IconConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Size in pixels
    pub fn size_px(self, px: u32) -> Self {
        self.size(format!("{px}px"))
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn spin(mut self, spin: bool) -> Self {
        self.spin = spin;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }
}

/// Icon component
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    config: IconConfig,
}

/// Create an icon by glyph name
pub fn icon(name: impl Into<String>) -> Icon {
    Icon::new(IconConfig::new(name))
}

impl Icon {
    pub fn new(config: IconConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.config = self.config.size(size);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.config = self.config.color(color);
        self
    }

    pub fn spin(mut self, spin: bool) -> Self {
        self.config.spin = spin;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.config = self.config.class_name(class);
        self
    }
}

impl Component for Icon {
    const NAME: &'static str = "icon";

    fn render(&self) -> Element {
        let c = &self.config;
        let mut icon = el("i")
            .class(block(Self::NAME))
            .class("fas")
            .class(format!("fa-{}", c.name))
            .class_if(c.spin, "fa-spin")
            .attr("aria-hidden", "true");

        if let Some(extra) = &c.class_name {
            icon.classes.extend_str(extra);
        }
        if let Some(size) = &c.size {
            icon = icon
                .style("font-size", size.clone())
                .style("width", size.clone())
                .style("height", size.clone());
        }
        if let Some(color) = &c.color {
            icon = icon.style("color", color.clone());
        }
        if c.spin {
            icon = icon.style("animation", "cui-spin 1s linear infinite");
        }
        icon
    }
}
