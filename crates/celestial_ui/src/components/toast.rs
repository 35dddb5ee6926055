//! Toast and toast container rendering over a [`ToastQueue`]

use crate::component::{block, element, modifier, Component};
use crate::components::icon::icon;
use crate::markup::{div, el, Element};
use crate::toast_queue::{Toast, ToastPosition, ToastQueue};

/// Single toast
#[derive(Clone, Debug)]
pub struct ToastView {
    toast: Toast,
}

impl ToastView {
    pub fn new(toast: Toast) -> Self {
        Self { toast }
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }
}

impl Component for ToastView {
    const NAME: &'static str = "toast";

    fn render(&self) -> Element {
        let name = Self::NAME;
        let t = &self.toast;

        let content = div()
            .class(element(name, "content"))
            .child_opt(
                t.title
                    .as_deref()
                    .map(|title| div().class(element(name, "title")).child(title)),
            )
            .child(div().class(element(name, "message")).child(t.message.as_str()));

        let action = t.action.as_ref().map(|action| {
            el("button")
                .class(element(name, "action"))
                .attr("type", "button")
                .child(action.label.as_str())
        });

        div()
            .class(block(name))
            .class(modifier(name, t.kind.as_str()))
            .attr("data-toast-id", t.id.clone())
            .child(
                div()
                    .class(element(name, "icon"))
                    .child(icon(t.kind.icon()).color(t.kind.icon_color()).render()),
            )
            .child(content)
            .child_opt(action)
            .child(
                el("button")
                    .class(element(name, "close"))
                    .attr("type", "button")
                    .attr("aria-label", "Close notification")
                    .child(icon("times").render()),
            )
    }
}

/// Stack of every queued toast, anchored to one position
#[derive(Clone, Debug)]
pub struct ToastContainer {
    queue: ToastQueue,
    position: ToastPosition,
    z_index: i32,
}

impl ToastContainer {
    pub fn new(queue: ToastQueue) -> Self {
        Self {
            queue,
            position: ToastPosition::default(),
            z_index: 9999,
        }
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn queue(&self) -> &ToastQueue {
        &self.queue
    }

    /// Close button pressed on a toast
    pub fn dismiss(&self, id: &str) -> bool {
        self.queue.remove(id)
    }

    /// Action button pressed on a toast; returns whether a handler ran
    pub fn trigger_action(&self, id: &str) -> bool {
        let action = self
            .queue
            .toasts()
            .into_iter()
            .find(|t| t.id == id)
            .and_then(|t| t.action);
        match action {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Rendered stack, or `None` while the queue is empty
    pub fn view(&self) -> Option<Element> {
        (!self.queue.is_empty()).then(|| self.render())
    }
}

impl Component for ToastContainer {
    const NAME: &'static str = "toast-container";

    fn render(&self) -> Element {
        let toasts = self.queue.toasts();
        div()
            .class(block(Self::NAME))
            .class(modifier(Self::NAME, self.position.as_str()))
            .style("z-index", self.z_index.to_string())
            .children(toasts.into_iter().map(|t| ToastView::new(t).render()))
    }
}
