//! Toast notification queue
//!
//! An ordered list of live toasts shared by whoever renders a
//! [`ToastContainer`](crate::components::toast::ToastContainer). Non-persistent
//! toasts carry a deadline and are dropped by [`ToastQueue::expire`], which the
//! host calls from its frame or timer loop.
//!
//! ```rust,ignore
//! let queue = ToastQueue::new();
//! let id = queue.success("Saved");
//! queue.add(ToastOptions::new("Disk almost full").kind(ToastKind::Warning).persistent(true));
//! queue.expire(Instant::now());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use celestial_theme::{Subscribers, Subscription};
use tracing::debug;

/// Lifetime of a toast when none is given
pub const DEFAULT_DURATION_MS: u64 = 5000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Icon glyph shown next to the message
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }

    /// Theme variable coloring the icon
    pub fn icon_color(self) -> &'static str {
        match self {
            Self::Success => "var(--cui-color-success-500)",
            Self::Error => "var(--cui-color-error-500)",
            Self::Warning => "var(--cui-color-warning-500)",
            Self::Info => "var(--cui-color-primary-500)",
        }
    }
}

/// Screen corner or edge a toast stack is anchored to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    TopCenter,
    BottomRight,
    BottomLeft,
    BottomCenter,
}

impl ToastPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
        }
    }
}

/// Button inside a toast
#[derive(Clone)]
pub struct ToastAction {
    pub label: String,
    pub handler: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new<F>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            handler: Arc::new(handler),
        }
    }

    pub fn invoke(&self) {
        (self.handler)();
    }
}

impl std::fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What to show; unset fields take their defaults when queued
#[derive(Clone, Debug, Default)]
pub struct ToastOptions {
    pub id: Option<String>,
    pub title: Option<String>,
    pub message: String,
    pub kind: ToastKind,
    /// 0 means [`DEFAULT_DURATION_MS`]
    pub duration_ms: u64,
    pub persistent: bool,
    pub position: ToastPosition,
    pub action: Option<ToastAction>,
}

impl ToastOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Stays until removed explicitly
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn action<F>(mut self, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(ToastAction::new(label, handler));
        self
    }
}

/// A queued toast
#[derive(Clone, Debug)]
pub struct Toast {
    pub id: String,
    pub title: Option<String>,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    pub persistent: bool,
    pub position: ToastPosition,
    pub action: Option<ToastAction>,
    /// `None` for persistent toasts
    pub expires_at: Option<Instant>,
}

/// Shared toast list with change notification
#[derive(Clone, Default)]
pub struct ToastQueue {
    inner: Arc<QueueInner>,
}

#[derive(Default)]
struct QueueInner {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    subscribers: Subscribers<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn toasts_mut(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.inner.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a toast; returns its id (`toast-N` unless one was given)
    pub fn add(&self, options: ToastOptions) -> String {
        self.add_at(options, Instant::now())
    }

    /// [`ToastQueue::add`] with an explicit clock reading
    pub fn add_at(&self, options: ToastOptions, now: Instant) -> String {
        let id = options.id.unwrap_or_else(|| {
            let n = self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            format!("toast-{n}")
        });
        let duration = Duration::from_millis(match options.duration_ms {
            0 => DEFAULT_DURATION_MS,
            ms => ms,
        });
        let expires_at = (!options.persistent).then(|| now + duration);

        debug!("ToastQueue::add - {} ({})", id, options.kind.as_str());
        self.toasts_mut().push(Toast {
            id: id.clone(),
            title: options.title,
            message: options.message,
            kind: options.kind,
            duration,
            persistent: options.persistent,
            position: options.position,
            action: options.action,
            expires_at,
        });
        self.notify();
        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.add(ToastOptions::new(message).kind(ToastKind::Success))
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.add(ToastOptions::new(message).kind(ToastKind::Error))
    }

    pub fn warning(&self, message: impl Into<String>) -> String {
        self.add(ToastOptions::new(message).kind(ToastKind::Warning))
    }

    pub fn info(&self, message: impl Into<String>) -> String {
        self.add(ToastOptions::new(message).kind(ToastKind::Info))
    }

    /// Remove by id; returns whether anything was removed
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut toasts = self.toasts_mut();
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        };
        if removed {
            self.notify();
        }
        removed
    }

    pub fn clear(&self) {
        self.toasts_mut().clear();
        self.notify();
    }

    /// Drop every toast whose deadline is at or before `now`
    pub fn expire(&self, now: Instant) -> usize {
        let expired = {
            let mut toasts = self.toasts_mut();
            let before = toasts.len();
            toasts.retain(|t| t.expires_at.map_or(true, |at| at > now));
            before - toasts.len()
        };
        if expired > 0 {
            debug!("ToastQueue::expire - dropped {}", expired);
            self.notify();
        }
        expired
    }

    /// Snapshot in insertion order
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts_mut().clone()
    }

    pub fn len(&self) -> usize {
        self.toasts_mut().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts_mut().is_empty()
    }

    /// Called with the full list after every change
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<Toast>) + Send + Sync + 'static,
    {
        self.inner.subscribers.subscribe(callback)
    }

    fn notify(&self) {
        let snapshot = self.toasts();
        self.inner.subscribers.notify(&snapshot);
    }
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
