//! Synchronous subscriber sets
//!
//! Callbacks are snapshotted under the lock and invoked after it is released,
//! so a callback may subscribe, unsubscribe or trigger another notification.
//! A panicking callback is caught and logged; the rest still run.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

use slotmap::{DefaultKey, SlotMap};
use tracing::error;

use crate::sync::lock;

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;
type Slots<E> = Mutex<SlotMap<DefaultKey, Callback<E>>>;

/// A set of callbacks receiving `&E`
pub struct Subscribers<E> {
    slots: Arc<Slots<E>>,
}

impl<E: 'static> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotMap::new())),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let key = lock(&self.slots).insert(Arc::new(callback));
        let slots: Weak<Slots<E>> = Arc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = slots.upgrade() {
                lock(&slots).remove(key);
            }
        })
    }

    /// Deliver `event` to every current subscriber; returns how many ran
    /// to completion.
    pub fn notify(&self, event: &E) -> usize {
        let snapshot: Vec<(DefaultKey, Callback<E>)> = lock(&self.slots)
            .iter()
            .map(|(key, cb)| (key, Arc::clone(cb)))
            .collect();

        let mut delivered = 0;
        for (key, callback) in snapshot {
            // Unsubscribed by an earlier callback in this round
            if !lock(&self.slots).contains_key(key) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => error!("subscriber panicked: {}", panic_message(&*payload)),
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every callback. Outstanding handles become no-ops.
    pub fn clear(&self) {
        lock(&self.slots).clear();
    }
}

impl<E: 'static> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &lock(&self.slots).len())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}

/// Handle returned by `subscribe`.
///
/// Dropping it does not unsubscribe. [`unsubscribe`](Self::unsubscribe) may
/// be called any number of times; only the first has an effect.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    pub fn unsubscribe(&self) {
        let cancel = lock(&self.cancel).take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// False once unsubscribed
    pub fn is_active(&self) -> bool {
        lock(&self.cancel).is_some()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn unsubscribe_is_idempotent() {
        let subs = Subscribers::<u32>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let sub = subs.subscribe(move |n| {
            h.fetch_add(*n as usize, Ordering::SeqCst);
        });

        assert_eq!(subs.notify(&2), 1);
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(subs.notify(&2), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn panicking_subscriber_does_not_stop_others() {
        let subs = Subscribers::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _a = subs.subscribe(|_| panic!("boom"));
        let h = hits.clone();
        let _b = subs.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(subs.notify(&()), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_may_unsubscribe_a_later_one() {
        let subs = Arc::new(Subscribers::<()>::new());
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let hits = Arc::new(AtomicUsize::new(0));

        let v = victim.clone();
        let _first = subs.subscribe(move |_| {
            if let Some(sub) = v.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });
        let h = hits.clone();
        *victim.lock().unwrap() = Some(subs.subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        subs.notify(&());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn clear_detaches_handles() {
        let subs = Subscribers::<()>::new();
        let sub = subs.subscribe(|_| {});
        subs.clear();
        assert!(subs.is_empty());
        sub.unsubscribe();
    }
}
