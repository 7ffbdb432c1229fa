//! # Mutable cell with a refresh signal.
//!
//! [`RefState`] is for state that callbacks read long after they were created:
//! [`get`](RefState::get) always returns the latest value, and every write bumps a
//! counter broadcast to refresh subscribers so the host can redraw.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::notify::{Delivery, Notifier, Subscription};
use crate::sync::lock;

/// Shared value plus a refresh counter. Clones share both.
pub struct RefState<S> {
    value: Arc<Mutex<S>>,
    count: Arc<AtomicU64>,
    refresh: Notifier<u64>,
}

impl<S> RefState<S> {
    pub fn new(initial: S) -> Self {
        Self::build(initial, Delivery::default())
    }

    /// Cell whose refresh delivery follows `config.delivery`.
    pub fn with_config(config: &Config, initial: S) -> Self {
        Self::build(initial, config.delivery)
    }

    fn build(initial: S, delivery: Delivery) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            count: Arc::new(AtomicU64::new(0)),
            refresh: Notifier::labeled("ref_state", delivery),
        }
    }

    /// Lazily computed initial value.
    pub fn new_with<F: FnOnce() -> S>(init: F) -> Self {
        Self::new(init())
    }

    /// Runs `f` against the current value.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.value))
    }

    /// Replaces the value and signals a refresh.
    pub fn set(&self, value: S) {
        *lock(&self.value) = value;
        self.bump();
    }

    /// Computes the next value from the current one and signals a refresh.
    pub fn update(&self, f: impl FnOnce(&S) -> S) {
        {
            let mut guard = lock(&self.value);
            let next = f(&guard);
            *guard = next;
        }
        self.bump();
    }

    /// Number of writes so far.
    pub fn refreshes(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Subscribes to refreshes; the callback receives the new counter value.
    pub fn on_refresh<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&u64) + Send + Sync + 'static,
    {
        self.refresh.subscribe(callback)
    }

    fn bump(&self) {
        let n = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        self.refresh.broadcast(&n);
    }
}

impl<S: Clone> RefState<S> {
    /// Latest value.
    pub fn get(&self) -> S {
        lock(&self.value).clone()
    }
}

impl<S: Default> Default for RefState<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> Clone for RefState<S> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            count: Arc::clone(&self.count),
            refresh: self.refresh.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for RefState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefState")
            .field("value", &*lock(&self.value))
            .field("refreshes", &self.refreshes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_see_latest_value() {
        let state = RefState::new(1);
        let reader = state.clone();
        let read = move || reader.get();

        state.set(5);
        assert_eq!(read(), 5);
        state.update(|n| n * 10);
        assert_eq!(read(), 50);
        assert_eq!(state.with(|n| n + 1), 51);
    }

    #[test]
    fn writes_bump_refresh_counter() {
        let state = RefState::<String>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = state.on_refresh(move |n| sink.lock().unwrap().push(*n));

        state.set("a".into());
        state.update(|s| format!("{s}b"));

        assert_eq!(state.get(), "ab");
        assert_eq!(state.refreshes(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn config_delivery_reaches_later_subscribers() {
        let cfg = Config {
            delivery: Delivery::Isolate,
            ..Config::default()
        };
        let state = RefState::with_config(&cfg, 0_u8);
        let _bad = state.on_refresh(|_| panic!("redraw failed"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = state.on_refresh(move |n| sink.lock().unwrap().push(*n));

        state.set(3);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(state.get(), 3);
    }

    #[test]
    fn lazy_init_runs_once() {
        let calls = AtomicU64::new(0);
        let state = RefState::new_with(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![1, 2]
        });
        assert_eq!(state.get(), vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.refreshes(), 0);
    }
}
