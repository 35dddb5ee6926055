//! View-side binding to the active theme
//!
//! A [`ThemeBinding`] keeps the latest theme snapshot for a view and raises a
//! repaint flag whenever the manager reports a change. Hosts either poll
//! [`ThemeBinding::take_repaint`] once per frame or register a redraw callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use celestial_theme::{Subscription, Theme, ThemeManager};
use tracing::trace;

type RedrawCallback = Box<dyn Fn() + Send + Sync>;

struct Shared {
    snapshot: RwLock<(String, Arc<Theme>)>,
    needs_repaint: AtomicBool,
    redraw: Mutex<Option<RedrawCallback>>,
}

impl Shared {
    fn redraw(&self) -> MutexGuard<'_, Option<RedrawCallback>> {
        self.redraw.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Theme snapshot kept current by a manager subscription
pub struct ThemeBinding {
    shared: Arc<Shared>,
    subscription: Subscription,
}

impl ThemeBinding {
    /// Subscribe to `manager`, starting from its current theme
    pub fn attach(manager: &ThemeManager) -> Self {
        let shared = Arc::new(Shared {
            snapshot: RwLock::new((manager.current_id(), manager.current())),
            needs_repaint: AtomicBool::new(false),
            redraw: Mutex::new(None),
        });

        let sink = Arc::clone(&shared);
        let subscription = manager.subscribe_changes(move |change| {
            trace!("ThemeBinding - theme changed to {}", change.id);
            *sink.snapshot.write().unwrap_or_else(PoisonError::into_inner) =
                (change.id.clone(), Arc::clone(&change.theme));
            sink.needs_repaint.store(true, Ordering::SeqCst);
            if let Some(redraw) = sink.redraw().as_ref() {
                redraw();
            }
        });

        Self {
            shared,
            subscription,
        }
    }

    /// Called after each change is recorded
    pub fn with_redraw<F: Fn() + Send + Sync + 'static>(self, callback: F) -> Self {
        *self.shared.redraw() = Some(Box::new(callback));
        self
    }

    /// Current (id, theme)
    pub fn snapshot(&self) -> (String, Arc<Theme>) {
        self.shared
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn theme(&self) -> Arc<Theme> {
        self.snapshot().1
    }

    pub fn theme_id(&self) -> String {
        self.snapshot().0
    }

    pub fn needs_repaint(&self) -> bool {
        self.shared.needs_repaint.load(Ordering::SeqCst)
    }

    /// Read and clear the repaint flag
    pub fn take_repaint(&self) -> bool {
        self.shared.needs_repaint.swap(false, Ordering::SeqCst)
    }

    /// Stop following the manager; the last snapshot stays readable
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }
}

impl Drop for ThemeBinding {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl std::fmt::Debug for ThemeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeBinding")
            .field("theme_id", &self.theme_id())
            .field("needs_repaint", &self.needs_repaint())
            .field("attached", &self.is_attached())
            .finish()
    }
}
