//! # Media-query binding.
//!
//! [`MediaBinding`] maps an ordered list of media queries to values: the value of
//! the first matching query wins, the default covers "nothing matches". The host
//! calls [`MediaBinding::refresh`] from its media-change listener; subscribers are
//! told only when the resolved value actually changed.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use totem::{MediaBinding, MediaQuery};
//!
//! struct Flag(AtomicBool);
//! impl MediaQuery for Flag {
//!     fn matches(&self) -> bool { self.0.load(Ordering::SeqCst) }
//! }
//!
//! let wide = Arc::new(Flag(AtomicBool::new(false)));
//! let columns = MediaBinding::new(vec![wide.clone() as Arc<dyn MediaQuery>], vec![3], 1);
//! assert_eq!(columns.value(), 1);
//!
//! wide.0.store(true, Ordering::SeqCst);
//! assert!(columns.refresh());
//! assert_eq!(columns.value(), 3);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::notify::{Delivery, Notifier, Subscription};
use crate::sync::lock;

/// A host media query.
pub trait MediaQuery: Send + Sync {
    fn matches(&self) -> bool;
}

/// First-match binding from media queries to values.
pub struct MediaBinding<V> {
    queries: Vec<Arc<dyn MediaQuery>>,
    values: Vec<V>,
    default: V,
    current: Mutex<V>,
    changes: Notifier<V>,
}

impl<V> MediaBinding<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// `values[i]` belongs to `queries[i]`; queries without a value resolve to `default`.
    pub fn new(queries: Vec<Arc<dyn MediaQuery>>, values: Vec<V>, default: V) -> Self {
        Self::build(queries, values, default, Delivery::default())
    }

    /// Like [`new`](Self::new), with change delivery taken from `config`.
    pub fn with_config(
        config: &Config,
        queries: Vec<Arc<dyn MediaQuery>>,
        values: Vec<V>,
        default: V,
    ) -> Self {
        Self::build(queries, values, default, config.delivery)
    }

    fn build(
        queries: Vec<Arc<dyn MediaQuery>>,
        values: Vec<V>,
        default: V,
        delivery: Delivery,
    ) -> Self {
        let initial = resolve(&queries, &values, &default);
        Self {
            queries,
            values,
            default,
            current: Mutex::new(initial),
            changes: Notifier::labeled("media", delivery),
        }
    }

    /// Value resolved by the last [`refresh`](Self::refresh) (or construction).
    pub fn value(&self) -> V {
        lock(&self.current).clone()
    }

    /// Value the queries resolve to right now, without storing it.
    pub fn evaluate(&self) -> V {
        resolve(&self.queries, &self.values, &self.default)
    }

    /// Re-evaluates the queries; broadcasts and returns `true` if the value changed.
    pub fn refresh(&self) -> bool {
        let next = self.evaluate();
        {
            let mut current = lock(&self.current);
            if *current == next {
                return false;
            }
            *current = next.clone();
        }
        self.changes.broadcast(&next);
        true
    }

    /// Subscribes to value changes.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.changes.subscribe(callback)
    }
}

fn resolve<V: Clone>(queries: &[Arc<dyn MediaQuery>], values: &[V], default: &V) -> V {
    queries
        .iter()
        .position(|q| q.matches())
        .and_then(|idx| values.get(idx))
        .unwrap_or(default)
        .clone()
}

impl<V: fmt::Debug> fmt::Debug for MediaBinding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaBinding")
            .field("queries", &self.queries.len())
            .field("values", &self.values)
            .field("default", &self.default)
            .field("current", &*lock(&self.current))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Toggle(AtomicBool);

    impl Toggle {
        fn new(on: bool) -> Arc<Self> {
            Arc::new(Self(AtomicBool::new(on)))
        }
        fn set(&self, on: bool) {
            self.0.store(on, Ordering::SeqCst);
        }
    }

    impl MediaQuery for Toggle {
        fn matches(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn queries(toggles: &[&Arc<Toggle>]) -> Vec<Arc<dyn MediaQuery>> {
        toggles
            .iter()
            .map(|t| Arc::clone(*t) as Arc<dyn MediaQuery>)
            .collect()
    }

    #[test]
    fn first_match_wins() {
        let xl = Toggle::new(true);
        let lg = Toggle::new(true);
        let b = MediaBinding::new(queries(&[&xl, &lg]), vec![5, 4], 1);
        assert_eq!(b.value(), 5);

        xl.set(false);
        assert_eq!(b.evaluate(), 4);
        lg.set(false);
        assert_eq!(b.evaluate(), 1);
    }

    #[test]
    fn missing_value_falls_back_to_default() {
        let only = Toggle::new(true);
        let b = MediaBinding::new(queries(&[&only]), Vec::<u8>::new(), 9);
        assert_eq!(b.value(), 9);
    }

    #[test]
    fn refresh_broadcasts_only_on_change() {
        let lg = Toggle::new(false);
        let b = MediaBinding::new(queries(&[&lg]), vec!["wide"], "narrow");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = b.on_change(move |v| sink.lock().unwrap().push(*v));

        assert!(!b.refresh());
        lg.set(true);
        assert!(b.refresh());
        assert!(!b.refresh());
        lg.set(false);
        assert!(b.refresh());

        assert_eq!(*seen.lock().unwrap(), vec!["wide", "narrow"]);
        assert_eq!(b.value(), "narrow");
    }

    #[test]
    fn config_delivery_isolates_failing_subscriber() {
        let cfg = Config {
            delivery: Delivery::Isolate,
            ..Config::default()
        };
        let lg = Toggle::new(false);
        let b = MediaBinding::with_config(&cfg, queries(&[&lg]), vec![2], 1);
        let _bad = b.on_change(|_| panic!("layout failed"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = b.on_change(move |v| sink.lock().unwrap().push(*v));

        lg.set(true);
        assert!(b.refresh());
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }
}
