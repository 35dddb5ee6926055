//! Minimal markup tree
//!
//! Components render to an [`Element`] tree rather than to a live DOM. The
//! tree can be rendered to HTML or inspected directly.

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Ordered, de-duplicated class names
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: SmallVec<[String; 8]>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class; empty names and duplicates are ignored
    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn push_if(&mut self, condition: bool, class: impl Into<String>) {
        if condition {
            self.push(class);
        }
    }

    /// Add every whitespace-separated name from `classes`
    pub fn extend_str(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            self.push(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for ClassList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = ClassList::new();
        for class in iter {
            list.push(class);
        }
        list
    }
}

/// Child of an [`Element`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

const VOID_TAGS: [&str; 4] = ["input", "img", "br", "hr"];

/// A tag with classes, inline style, attributes and children
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: ClassList,
    pub styles: IndexMap<String, String>,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Node>,
}

/// Create an element with the given tag
pub fn el(tag: impl Into<String>) -> Element {
    Element::new(tag)
}

/// Shorthand for `el("div")`
pub fn div() -> Element {
    Element::new("div")
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: ClassList::new(),
            styles: IndexMap::new(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class);
        self
    }

    pub fn class_if(mut self, condition: bool, class: impl Into<String>) -> Self {
        self.classes.push_if(condition, class);
        self
    }

    pub fn classes(mut self, classes: ClassList) -> Self {
        for class in classes.iter() {
            self.classes.push(class);
        }
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Boolean attribute, rendered bare (`disabled`)
    pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn child_opt(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    pub fn children(mut self, children: impl IntoIterator<Item = impl Into<Node>>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Depth-first search, including `self`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(e) => e.find(predicate),
            Node::Text(_) => None,
        })
    }

    pub fn find_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// Concatenated text of this subtree
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.to_string()));
        }
        if !self.styles.is_empty() {
            let style = self
                .styles
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape(value));
            }
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
