//! # Passive observers.
//!
//! A [`Watch`] never claims the token; it only tracks which payload the current
//! holder published. It stays subscribed until dropped.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::notify::Subscription;
use crate::sync::lock;

use super::Totem;

/// Remembers the payload of the latest ownership change.
pub struct Watch<P> {
    current: Arc<Mutex<Option<P>>>,
    subscription: Subscription,
}

impl<P: Clone + Send + Sync + 'static> Watch<P> {
    pub(super) fn new<F>(totem: &Totem<P>, on_update: F) -> Self
    where
        F: Fn(Option<&P>) + Send + Sync + 'static,
    {
        let current = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&current);
        let subscription = totem.on_change(move |payload: Option<&P>| {
            *lock(&sink) = payload.cloned();
            on_update(payload);
        });
        Self {
            current,
            subscription,
        }
    }

    /// Payload of the current holder, or `None` if nobody holds the token
    /// (or no change happened since this watch was created).
    pub fn current(&self) -> Option<P> {
        lock(&self.current).clone()
    }

    /// Stops observing. Equivalent to dropping the watch, but keeps the last value readable.
    pub fn stop(&self) {
        self.subscription.unsubscribe();
    }
}

impl<P: fmt::Debug> fmt::Debug for Watch<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch")
            .field("current", &*lock(&self.current))
            .field("active", &self.subscription.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn follows_claims_and_releases() {
        let totem = Totem::<String>::new();
        let watch = totem.watch();
        let a = totem.claimant();
        let b = totem.claimant();

        assert_eq!(watch.current(), None);
        a.claim("folderA".to_string());
        assert_eq!(watch.current().as_deref(), Some("folderA"));
        b.claim("folderB".to_string());
        assert_eq!(watch.current().as_deref(), Some("folderB"));
        b.release();
        assert_eq!(watch.current(), None);
    }

    #[test]
    fn starts_empty_even_if_token_is_held() {
        let totem = Totem::<u32>::new();
        let a = totem.claimant();
        a.claim(1);

        let late = totem.watch();
        assert_eq!(late.current(), None);
    }

    #[test]
    fn watch_with_triggers_redraw() {
        let totem = Totem::<u32>::new();
        let redraws = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&redraws);
        let _watch = totem.watch_with(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });
        let a = totem.claimant();

        a.claim(1);
        a.claim(2);
        a.release();
        assert_eq!(redraws.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stop_keeps_last_value() {
        let totem = Totem::<u32>::new();
        let watch = totem.watch();
        let a = totem.claimant();
        let b = totem.claimant();

        a.claim(7);
        watch.stop();
        b.claim(8);
        assert_eq!(watch.current(), Some(7));
        assert_eq!(totem.changed.len(), 0);
    }
}
