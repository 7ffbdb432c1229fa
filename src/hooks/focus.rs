//! # Deferred focus.
//!
//! [`FocusHandle`] holds a slot the host fills with its focusable element once it
//! exists. Focusing is deferred by `Config::defer_delay` so it runs after the host
//! finished attaching the element.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::Config;
use crate::sync::lock;
use crate::wait::later;

/// Anything that can take keyboard focus.
pub trait Focusable: Send + Sync {
    fn focus(&self);
}

/// Slot for a focusable target plus a deferred `set_focus`.
pub struct FocusHandle<T: ?Sized> {
    target: Arc<Mutex<Option<Arc<T>>>>,
    delay: Duration,
}

impl<T: Focusable + ?Sized + 'static> FocusHandle<T> {
    /// Creates an empty handle. With `autofocus`, a [`set_focus`](Self::set_focus)
    /// is spawned right away and focuses whatever is attached once the delay elapsed.
    ///
    /// # Panics
    /// With `autofocus`, must be called from within a Tokio runtime.
    pub fn new(config: &Config, autofocus: bool) -> Self {
        let handle = Self {
            target: Arc::new(Mutex::new(None)),
            delay: config.defer_delay,
        };
        if autofocus {
            handle.spawn_focus();
        }
        handle
    }

    /// Fills the slot.
    pub fn attach(&self, target: Arc<T>) {
        *lock(&self.target) = Some(target);
    }

    /// Empties the slot; a pending `set_focus` then does nothing.
    pub fn detach(&self) {
        lock(&self.target).take();
    }

    pub fn is_attached(&self) -> bool {
        lock(&self.target).is_some()
    }

    /// Waits for the defer delay, then focuses the attached target.
    ///
    /// Returns whether a target was focused.
    pub async fn set_focus(&self) -> bool {
        later(self.delay).await;
        let target = lock(&self.target).clone();
        match target {
            Some(target) => {
                target.focus();
                true
            }
            None => false,
        }
    }

    /// Runs [`set_focus`](Self::set_focus) on the Tokio runtime.
    pub fn spawn_focus(&self) -> JoinHandle<bool> {
        let handle = self.clone();
        tokio::spawn(async move { handle.set_focus().await })
    }
}

impl<T: ?Sized> Clone for FocusHandle<T> {
    fn clone(&self) -> Self {
        Self {
            target: Arc::clone(&self.target),
            delay: self.delay,
        }
    }
}

impl<T: ?Sized> fmt::Debug for FocusHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusHandle")
            .field("attached", &lock(&self.target).is_some())
            .field("delay", &self.delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Input {
        focused: AtomicUsize,
    }

    impl Focusable for Input {
        fn focus(&self) {
            self.focused.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn focuses_attached_target_after_delay() {
        let handle = FocusHandle::<Input>::new(&Config::default(), false);
        let input = Arc::new(Input::default());
        handle.attach(Arc::clone(&input));

        assert!(handle.set_focus().await);
        assert_eq!(input.focused.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_attached_is_a_noop() {
        let handle = FocusHandle::<Input>::new(&Config::default(), false);
        assert!(!handle.set_focus().await);

        let input = Arc::new(Input::default());
        handle.attach(Arc::clone(&input));
        handle.detach();
        assert!(!handle.is_attached());
        assert!(!handle.set_focus().await);
        assert_eq!(input.focused.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn autofocus_picks_up_target_attached_later() {
        let handle = FocusHandle::<Input>::new(&Config::default(), true);
        let input = Arc::new(Input::default());
        // attached during the same update cycle, before the defer delay elapses
        handle.attach(Arc::clone(&input));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(input.focused.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn works_with_trait_objects() {
        let handle = FocusHandle::<dyn Focusable>::new(&Config::default(), false);
        let input = Arc::new(Input::default());
        handle.attach(input.clone() as Arc<dyn Focusable>);
        assert!(handle.spawn_focus().await.unwrap());
        assert_eq!(input.focused.load(Ordering::SeqCst), 1);
    }
}
