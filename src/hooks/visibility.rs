//! # Visible-target tracking.
//!
//! The host runs the actual intersection observation and feeds its entries to a
//! [`VisibleSet`]. The set keeps the currently visible targets sorted by their
//! position in the target list and tells subscribers whenever that list changes.
//!
//! ```text
//! host observer ──► apply([(t3, in), (t1, in), (t3, out)])
//!                      ├─► visible = [t1]        (ordered like targets)
//!                      └─► changes.broadcast([t1]) if different
//! ```

use std::fmt;

use crate::config::Config;
use crate::notify::{Delivery, Notifier, Subscription};
use crate::shallow::ShallowMemo;

/// Observation settings forwarded to the host's intersection observer.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionOptions {
    /// CSS-like margin around the root, e.g. `"0px 0px -20% 0px"`.
    pub root_margin: String,
    /// Ratio of the target that must be visible to count as intersecting.
    pub threshold: f64,
}

impl IntersectionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root_margin: "0px".to_string(),
            threshold: config.visibility_threshold(),
        }
    }
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One observation reported by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    pub is_intersecting: bool,
}

impl<K> IntersectionEntry<K> {
    pub fn new(target: K, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
        }
    }

    /// Entry derived from a visible ratio, compared against `options.threshold`.
    pub fn from_ratio(target: K, ratio: f64, options: &IntersectionOptions) -> Self {
        Self::new(target, ratio >= options.threshold)
    }
}

/// Ordered set of visible targets.
pub struct VisibleSet<K> {
    targets: ShallowMemo<Vec<K>>,
    visible: Vec<K>,
    options: IntersectionOptions,
    changes: Notifier<Vec<K>>,
}

impl<K> VisibleSet<K>
where
    K: Clone + PartialEq + Send + Sync + 'static,
{
    /// Set with explicit options; changes are delivered with the default [`Delivery`].
    pub fn new(targets: Vec<K>, options: IntersectionOptions) -> Self {
        Self::build(targets, options, Delivery::default())
    }

    /// Set whose options and change delivery come from `config`.
    pub fn with_config(targets: Vec<K>, config: &Config) -> Self {
        Self::build(targets, IntersectionOptions::from_config(config), config.delivery)
    }

    fn build(targets: Vec<K>, options: IntersectionOptions, delivery: Delivery) -> Self {
        let mut memo = ShallowMemo::new();
        memo.preserve(targets);
        Self {
            targets: memo,
            visible: Vec::new(),
            options,
            changes: Notifier::labeled("visibility", delivery),
        }
    }

    /// Applies a batch of observations and returns the visible targets.
    ///
    /// Targets unknown to the set sort before every known one.
    pub fn apply<I>(&mut self, entries: I) -> &[K]
    where
        I: IntoIterator<Item = IntersectionEntry<K>>,
    {
        let before = self.visible.clone();
        for entry in entries {
            let pos = self.visible.iter().position(|k| *k == entry.target);
            match (entry.is_intersecting, pos) {
                (true, None) => self.visible.push(entry.target),
                (false, Some(idx)) => {
                    self.visible.remove(idx);
                }
                _ => {}
            }
        }
        self.sort();
        if self.visible != before {
            self.changes.broadcast(&self.visible);
        }
        &self.visible
    }

    /// Replaces the target list. A shallow-equal list is ignored (returns `false`);
    /// otherwise targets no longer listed are dropped from the visible set.
    pub fn retarget(&mut self, targets: Vec<K>) -> bool {
        self.targets.preserve(targets);
        if !self.targets.changed() {
            return false;
        }
        let before = self.visible.clone();
        let targets = self.targets();
        let kept: Vec<K> = self
            .visible
            .iter()
            .filter(|k| targets.contains(k))
            .cloned()
            .collect();
        self.visible = kept;
        self.sort();
        if self.visible != before {
            self.changes.broadcast(&self.visible);
        }
        true
    }

    /// Currently visible targets, ordered like the target list.
    pub fn visible(&self) -> &[K] {
        &self.visible
    }

    /// Current target list.
    pub fn targets(&self) -> &[K] {
        self.targets.current().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn options(&self) -> &IntersectionOptions {
        &self.options
    }

    /// Subscribes to changes of the visible list.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Vec<K>) + Send + Sync + 'static,
    {
        self.changes.subscribe(callback)
    }

    fn sort(&mut self) {
        let targets = self.targets.current().map(Vec::as_slice).unwrap_or(&[]);
        self.visible
            .sort_by_key(|k| targets.iter().position(|t| t == k));
    }
}

impl<K: fmt::Debug + PartialEq> fmt::Debug for VisibleSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleSet")
            .field("targets", &self.targets.current())
            .field("visible", &self.visible)
            .field("options", &self.options)
            .finish()
    }
}
