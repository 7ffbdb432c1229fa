//! # Ordered, synchronous broadcast channel.
//!
//! [`Notifier`] keeps an ordered list of callbacks and invokes all of them,
//! in registration order, every time [`Notifier::broadcast`] is called.
//!
//! ## Architecture
//! ```text
//! subscribe(cb) ──► Registry { next_id, entries: [(id, live, cb), ...] }
//!                                   │
//! broadcast(&m) ──► clone entries ──┘ (lock released)
//!                       │
//!                       ├─► live? ─► Delivery::deliver(cb, &m)
//!                       └─► ...
//! ```
//!
//! ## Rules
//! - **Synchronous**: `broadcast` returns after every subscriber ran.
//! - **Ordered**: subscribers run in the order they were registered.
//! - **Snapshot**: subscribers added during a broadcast miss that broadcast.
//! - **Live check**: subscribers removed during a broadcast, before being reached, are skipped.
//! - **Re-entrant**: no lock is held while user code runs; callbacks may subscribe,
//!   unsubscribe or broadcast on the same notifier.
//! - **No dedup**: registering the same closure twice delivers twice.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::sync::lock;

use super::subscription::Detach;
use super::{Delivery, Subscription, SubscriptionId};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: SubscriptionId,
    live: Arc<AtomicBool>,
    callback: Listener<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            live: Arc::clone(&self.live),
            callback: Arc::clone(&self.callback),
        }
    }
}

struct Registry<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

struct Shared<T> {
    name: Cow<'static, str>,
    delivery: Delivery,
    registry: Mutex<Registry<T>>,
}

impl<T> Shared<T> {
    fn registry(&self) -> MutexGuard<'_, Registry<T>> {
        lock(&self.registry)
    }
}

impl<T> Detach for Shared<T> {
    fn remove(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        match registry.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                let entry = registry.entries.remove(idx);
                entry.live.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }
}

/// Ordered multi-subscriber broadcast channel.
///
/// Cheap to clone: clones share the same subscriber list.
///
/// # Example
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use totem::Notifier;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let notifier = Notifier::<u32>::new();
///
/// let sink = Arc::clone(&seen);
/// let sub = notifier.subscribe(move |n| sink.lock().unwrap().push(*n));
///
/// notifier.broadcast(&1);
/// sub.unsubscribe();
/// notifier.broadcast(&2);
///
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct Notifier<T> {
    shared: Arc<Shared<T>>,
}

impl<T: 'static> Notifier<T> {
    /// Creates an unnamed notifier with the default [`Delivery`] policy.
    pub fn new() -> Self {
        Self::with_delivery(Delivery::default())
    }

    /// Creates an unnamed notifier with the given delivery policy.
    pub fn with_delivery(delivery: Delivery) -> Self {
        Self::labeled("notifier", delivery)
    }

    /// Creates a notifier whose name shows up in diagnostics.
    pub fn labeled(name: impl Into<Cow<'static, str>>, delivery: Delivery) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                delivery,
                registry: Mutex::new(Registry {
                    next_id: 0,
                    entries: Vec::new(),
                }),
            }),
        }
    }

    /// Registers `callback` at the end of the subscriber list.
    ///
    /// The returned handle removes exactly this registration.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));
        let id = {
            let mut registry = self.shared.registry();
            let id = SubscriptionId(registry.next_id);
            registry.next_id += 1;
            registry.entries.push(Entry {
                id,
                live: Arc::clone(&live),
                callback: Arc::new(callback),
            });
            id
        };
        let owner: Weak<dyn Detach> = Arc::downgrade(&self.shared) as Weak<Shared<T>>;
        Subscription::new(id, live, owner)
    }

    /// Removes the registration with the given id.
    ///
    /// Returns `false` (and does nothing) if it was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.shared.remove(id);
        if !removed {
            tracing::trace!(channel = %self.shared.name, subscription = %id, "unsubscribe of unknown id");
        }
        removed
    }

    /// Invokes every current subscriber with `message`, in registration order.
    ///
    /// See the module docs for the exact semantics of mutation during a broadcast.
    pub fn broadcast(&self, message: &T) {
        let snapshot: Vec<Entry<T>> = self.shared.registry().entries.clone();
        for entry in &snapshot {
            if !entry.live.load(Ordering::Acquire) {
                continue;
            }
            self.shared
                .delivery
                .deliver(&self.shared.name, entry.id, entry.callback.as_ref(), message);
        }
    }

    /// Number of current subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.registry().entries.len()
    }

    /// True if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.registry().entries.is_empty()
    }

    /// Diagnostic name of this channel.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Delivery policy this notifier was built with.
    pub fn delivery(&self) -> Delivery {
        self.shared.delivery
    }
}

impl<T: 'static> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Notifier<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("name", &self.shared.name)
            .field("delivery", &self.shared.delivery)
            .field("subscribers", &self.shared.registry().entries.len())
            .finish()
    }
}
