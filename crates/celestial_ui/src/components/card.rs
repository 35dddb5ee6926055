//! Card container with optional header, media, content and footer sections

use crate::component::{block, element, modifier, Component};
use crate::markup::{div, el, Element, Node};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CardVariant {
    #[default]
    Elevated,
    Outlined,
    Filled,
}

impl CardVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elevated => "elevated",
            Self::Outlined => "outlined",
            Self::Filled => "filled",
        }
    }
}

/// Card component
pub struct Card {
    tag: String,
    variant: CardVariant,
    /// Shadow depth, only meaningful for elevated cards; 0 disables it
    elevation: u8,
    padded: bool,
    hoverable: bool,
    clickable: bool,
    disabled: bool,
    hovered: bool,
    title: Option<String>,
    subtitle: Option<String>,
    header: Option<Element>,
    actions: Vec<Node>,
    media: Option<Node>,
    content: Vec<Node>,
    footer: Vec<Node>,
    styles: Vec<(String, String)>,
    class_name: Option<String>,
    on_click: Option<Box<dyn FnMut() + Send>>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            variant: CardVariant::default(),
            elevation: 1,
            padded: true,
            hoverable: false,
            clickable: false,
            disabled: false,
            hovered: false,
            title: None,
            subtitle: None,
            header: None,
            actions: Vec::new(),
            media: None,
            content: Vec::new(),
            footer: Vec::new(),
            styles: Vec::new(),
            class_name: None,
            on_click: None,
        }
    }
}

/// Create an empty elevated card
pub fn card() -> Card {
    Card::default()
}

impl Card {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn variant(mut self, variant: CardVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn elevation(mut self, elevation: u8) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn padded(mut self, padded: bool) -> Self {
        self.padded = padded;
        self
    }

    pub fn hoverable(mut self, hoverable: bool) -> Self {
        self.hoverable = hoverable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Custom header, replacing the title/subtitle block
    pub fn header(mut self, header: Element) -> Self {
        self.header = Some(header);
        self
    }

    pub fn action(mut self, action: impl Into<Node>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn media(mut self, media: impl Into<Node>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.content.push(child.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<Node>) -> Self {
        self.footer.push(footer.into());
        self
    }

    /// Inline style on the card root
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn on_click<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pointer_enter(&mut self) {
        if !self.disabled {
            self.hovered = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Runs the callback only for clickable, enabled cards
    pub fn click(&mut self) -> bool {
        if self.disabled || !self.clickable {
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

    fn has_header(&self) -> bool {
        self.header.is_some()
            || self.title.is_some()
            || self.subtitle.is_some()
            || !self.actions.is_empty()
    }

    fn render_header(&self) -> Element {
        let name = Self::NAME;
        let lead = match &self.header {
            Some(custom) => custom.clone(),
            None => div()
                .class(element(name, "header-content"))
                .child_opt(
                    self.title
                        .as_deref()
                        .map(|t| el("h3").class(element(name, "title")).child(t)),
                )
                .child_opt(
                    self.subtitle
                        .as_deref()
                        .map(|s| el("p").class(element(name, "subtitle")).child(s)),
                ),
        };

        let actions = (!self.actions.is_empty())
            .then(|| div().class(element(name, "actions")).children(self.actions.clone()));

        div()
            .class(element(name, "header"))
            .child(lead)
            .child_opt(actions)
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Card")
            .field("variant", &self.variant)
            .field("elevation", &self.elevation)
            .field("title", &self.title)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl Component for Card {
    const NAME: &'static str = "card";

    fn render(&self) -> Element {
        let name = Self::NAME;
        let mut root = el(self.tag.clone())
            .class(block(name))
            .class(modifier(name, self.variant.as_str()))
            .class_if(
                self.variant == CardVariant::Elevated && self.elevation > 0,
                modifier(name, &format!("elevation-{}", self.elevation)),
            )
            .class_if(self.hoverable, modifier(name, "hoverable"))
            .class_if(self.clickable, modifier(name, "clickable"))
            .class_if(self.disabled, modifier(name, "disabled"))
            .class_if(self.hovered && self.hoverable, modifier(name, "hovered"));
        if let Some(extra) = &self.class_name {
            root.classes.extend_str(extra);
        }
        for (property, value) in &self.styles {
            root = root.style(property.clone(), value.clone());
        }

        if self.has_header() {
            root = root.child(self.render_header());
        }
        if let Some(media) = &self.media {
            root = root.child(div().class(element(name, "media")).child(media.clone()));
        }
        if !self.content.is_empty() {
            root = root.child(
                div()
                    .class(element(name, "content"))
                    .class_if(self.padded, element(name, "content--padded"))
                    .children(self.content.clone()),
            );
        }
        if !self.footer.is_empty() {
            root = root.child(div().class(element(name, "footer")).children(self.footer.clone()));
        }
        root
    }
}
