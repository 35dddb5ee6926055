//! Modal dialog
//!
//! A modal renders nothing while closed. When open it renders an overlay
//! wrapping the dialog. Escape, overlay clicks and the close button all funnel
//! through the same close request, which a `persistent` modal refuses.

use crate::component::{block, element, modifier, Component};
use crate::components::icon::icon;
use crate::markup::{div, el, Element, Node};

/// Id shared by the title element and `aria-labelledby`
pub const TITLE_ID: &str = "cui-modal-title";

/// Modal component
pub struct Modal {
    open: bool,
    title: Option<String>,
    persistent: bool,
    fullscreen: bool,
    max_width: String,
    scrollable: bool,
    close_on_escape: bool,
    close_on_overlay: bool,
    closable: bool,
    z_index: i32,
    header: Option<Element>,
    content: Vec<Node>,
    footer: Vec<Node>,
    class_name: Option<String>,
    overlay_class_name: Option<String>,
    on_close: Option<Box<dyn FnMut() + Send>>,
}

impl Default for Modal {
    fn default() -> Self {
        Self {
            open: false,
            title: None,
            persistent: false,
            fullscreen: false,
            max_width: "500px".to_string(),
            scrollable: false,
            close_on_escape: true,
            close_on_overlay: true,
            closable: true,
            z_index: 1000,
            header: None,
            content: Vec::new(),
            footer: Vec::new(),
            class_name: None,
            overlay_class_name: None,
            on_close: None,
        }
    }
}

/// Create a closed modal
pub fn modal() -> Modal {
    Modal::default()
}

impl Modal {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Persistent modals ignore every close request
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn max_width(mut self, width: impl Into<String>) -> Self {
        self.max_width = width.into();
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    pub fn close_on_escape(mut self, enabled: bool) -> Self {
        self.close_on_escape = enabled;
        self
    }

    pub fn close_on_overlay(mut self, enabled: bool) -> Self {
        self.close_on_overlay = enabled;
        self
    }

    /// Show the close button in the header
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn header(mut self, header: Element) -> Self {
        self.header = Some(header);
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

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    pub fn overlay_class_name(mut self, class: impl Into<String>) -> Self {
        self.overlay_class_name = Some(class.into());
        self
    }

    pub fn on_close<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Page scrolling is locked while the modal is open
    pub fn locks_scroll(&self) -> bool {
        self.open
    }

    /// Close unless persistent. Returns whether the modal closed.
    pub fn request_close(&mut self) -> bool {
        if !self.open || self.persistent {
            return false;
        }
        self.open = false;
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
        true
    }

    /// Escape key pressed
    pub fn handle_escape(&mut self) -> bool {
        self.close_on_escape && self.request_close()
    }

    /// Click on the overlay; clicks that land inside the dialog are ignored
    pub fn handle_overlay_click(&mut self, target_is_overlay: bool) -> bool {
        target_is_overlay && self.close_on_overlay && self.request_close()
    }

    /// Rendered overlay, or `None` while closed
    pub fn view(&self) -> Option<Element> {
        self.open.then(|| self.render())
    }

    fn render_header(&self) -> Option<Element> {
        let name = Self::NAME;
        if self.header.is_none() && self.title.is_none() && !self.closable {
            return None;
        }

        let lead = match (&self.header, &self.title) {
            (Some(custom), _) => Some(custom.clone()),
            (None, Some(title)) => Some(
                el("h2")
                    .attr("id", TITLE_ID)
                    .class(element(name, "title"))
                    .child(title.as_str()),
            ),
            (None, None) => None,
        };

        let close = self.closable.then(|| {
            let label = format!("Close {}", self.title.as_deref().unwrap_or("modal"));
            el("button")
                .attr("type", "button")
                .class(element(name, "close"))
                .attr("aria-label", label)
                .child(icon("times").render())
        });

        Some(
            div()
                .class(element(name, "header"))
                .child_opt(lead)
                .child_opt(close),
        )
    }
}

impl std::fmt::Debug for Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modal")
            .field("open", &self.open)
            .field("title", &self.title)
            .field("persistent", &self.persistent)
            .finish_non_exhaustive()
    }
}

impl Component for Modal {
    const NAME: &'static str = "modal";

    /// Renders the open state regardless of [`Modal::is_open`]; use
    /// [`Modal::view`] to honor it.
    fn render(&self) -> Element {
        let name = Self::NAME;

        let mut dialog = div()
            .class(block(name))
            .class_if(self.fullscreen, modifier(name, "fullscreen"))
            .class_if(self.scrollable, modifier(name, "scrollable"))
            .attr("role", "dialog")
            .attr("aria-modal", "true");
        if let Some(extra) = &self.class_name {
            dialog.classes.extend_str(extra);
        }
        if self.title.is_some() {
            dialog = dialog.attr("aria-labelledby", TITLE_ID);
        }
        if !self.fullscreen && !self.max_width.is_empty() {
            dialog = dialog.style("max-width", self.max_width.clone());
        }

        dialog = dialog
            .child_opt(self.render_header())
            .child(
                div()
                    .class(element(name, "content"))
                    .class_if(self.scrollable, element(name, "content--scrollable"))
                    .children(self.content.clone()),
            );
        if !self.footer.is_empty() {
            dialog = dialog.child(div().class(element(name, "footer")).children(self.footer.clone()));
        }

        let mut overlay = div()
            .class("cui-modal-overlay")
            .style("z-index", self.z_index.to_string());
        if let Some(extra) = &self.overlay_class_name {
            overlay.classes.extend_str(extra);
        }
        overlay.child(dialog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn closed_modal_renders_nothing() {
        let m = modal().title("Hi");
        assert!(m.view().is_none());
        assert!(!m.locks_scroll());
    }

    #[test]
    fn open_modal_structure() {
        let mut m = modal().title("Settings").scrollable(true).child("Body").footer("Done");
        m.open();
        let overlay = m.view().unwrap_or_else(|| panic!("open modal must render"));

        assert!(overlay.has_class("cui-modal-overlay"));
        assert_eq!(overlay.get_style("z-index"), Some("1000"));

        let dialog = overlay.find_class("cui-modal").unwrap();
        assert_eq!(dialog.get_attr("role"), Some("dialog"));
        assert_eq!(dialog.get_attr("aria-labelledby"), Some(TITLE_ID));
        assert_eq!(dialog.get_style("max-width"), Some("500px"));
        assert!(dialog.has_class("cui-modal--scrollable"));

        let title = dialog.find_class("cui-modal__title").unwrap();
        assert_eq!(title.get_attr("id"), Some(TITLE_ID));
        assert_eq!(
            dialog.find_class("cui-modal__close").and_then(|c| c.get_attr("aria-label")),
            Some("Close Settings")
        );
        assert!(dialog.find_class("cui-modal__content--scrollable").is_some());
        assert!(dialog.find_class("cui-modal__footer").is_some());
    }

    #[test]
    fn untitled_close_label_and_fullscreen() {
        let mut m = modal().fullscreen(true);
        m.open();
        let dialog = m.render();
        let dialog = dialog.find_class("cui-modal").unwrap();
        assert_eq!(dialog.get_attr("aria-labelledby"), None);
        assert_eq!(dialog.get_style("max-width"), None);
        assert_eq!(
            dialog.find_class("cui-modal__close").and_then(|c| c.get_attr("aria-label")),
            Some("Close modal")
        );

        let no_header = modal().closable(false).render();
        assert!(no_header.find_class("cui-modal__header").is_none());
    }

    #[test]
    fn close_paths() {
        let closes = Arc::new(AtomicUsize::new(0));
        let c = closes.clone();
        let mut m = modal().close_on_overlay(false).on_close(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        m.open();
        assert!(!m.handle_overlay_click(true));
        assert!(m.handle_escape());
        assert!(!m.is_open());
        assert!(!m.request_close());

        let mut inner = modal();
        inner.open();
        assert!(!inner.handle_overlay_click(false));
        assert!(inner.handle_overlay_click(true));

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn persistent_refuses_every_close() {
        let mut m = modal().persistent(true);
        m.open();
        assert!(!m.handle_escape());
        assert!(!m.handle_overlay_click(true));
        assert!(!m.request_close());
        assert!(m.is_open());
    }
}
