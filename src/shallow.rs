//! # Shallow dependency comparison.
//!
//! Hosts that re-run effects when their dependencies change usually compare
//! dependencies by identity, so a freshly built list with the same items
//! counts as a change. The helpers here compare **one level deep** instead:
//!
//! - [`ShallowEq`] lists and slices compare item by item, shared pointers by identity,
//!   everything else by value.
//! - [`ShallowMemo`] hands back the previously stored dependencies when the new ones are
//!   shallow-equal, so downstream identity checks see "no change".
//! - [`ShallowEffect`] runs an effect (with cleanup) only when the dependencies changed.
//!
//! Items of a list are compared with `PartialEq`, not by identity: `vec![Arc::new(1)]`
//! equals a fresh `vec![Arc::new(1)]` even though the bare `Arc`s do not. Wrap an item in
//! a newtype whose `PartialEq` uses `Arc::ptr_eq` when identity matters.
//!
//! ## Example
//! ```rust
//! use totem::ShallowMemo;
//!
//! let mut memo = ShallowMemo::new();
//! memo.preserve((vec!["(min-width: 600px)"], 3_u8));
//! assert!(memo.changed());
//!
//! memo.preserve((vec!["(min-width: 600px)"], 3_u8));
//! assert!(!memo.changed());
//! ```

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Comparison that goes at most one level deep.
pub trait ShallowEq {
    /// True if `self` and `other` should be treated as the same dependency.
    fn shallow_eq(&self, other: &Self) -> bool;
}

macro_rules! shallow_by_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShallowEq for $t {
                #[inline]
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

shallow_by_value!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    str, String, Duration,
);

impl<T: ShallowEq + ?Sized> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        (**self).shallow_eq(*other)
    }
}

impl<T: PartialEq> ShallowEq for [T] {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq> ShallowEq for Vec<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.shallow_eq(b),
            _ => false,
        }
    }
}

macro_rules! shallow_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

shallow_tuple!(A.0);
shallow_tuple!(A.0, B.1);
shallow_tuple!(A.0, B.1, C.2);
shallow_tuple!(A.0, B.1, C.2, D.3);

/// True if both lists are absent, or both are present with equal items in the same order.
pub fn are_slices_shallow_equal<T: PartialEq>(first: Option<&[T]>, second: Option<&[T]>) -> bool {
    match (first, second) {
        (None, None) => true,
        (Some(a), Some(b)) => a.shallow_eq(b),
        _ => false,
    }
}

/// Keeps the previous dependencies while new ones are shallow-equal to them.
#[derive(Debug)]
pub struct ShallowMemo<D> {
    previous: Option<D>,
    changed: bool,
}

impl<D: ShallowEq> ShallowMemo<D> {
    /// Creates an empty memo; the first [`preserve`](Self::preserve) always stores.
    pub fn new() -> Self {
        Self {
            previous: None,
            changed: false,
        }
    }

    /// Returns the stored dependencies if `deps` is shallow-equal to them,
    /// otherwise stores and returns `deps`.
    pub fn preserve(&mut self, deps: D) -> &D {
        if !matches!(&self.previous, Some(prev) if prev.shallow_eq(&deps)) {
            self.previous = None;
        }
        self.changed = self.previous.is_none();
        self.previous.get_or_insert(deps)
    }

    /// Whether the last [`preserve`](Self::preserve) replaced the stored dependencies.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Currently stored dependencies.
    pub fn current(&self) -> Option<&D> {
        self.previous.as_ref()
    }
}

impl<D: ShallowEq> Default for ShallowMemo<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Teardown returned by an effect; runs before the next effect and on dispose.
pub type Cleanup = Box<dyn FnOnce() + Send>;

/// An effect re-run only when its dependencies change (shallowly).
pub struct ShallowEffect<D> {
    memo: ShallowMemo<D>,
    cleanup: Option<Cleanup>,
}

impl<D: ShallowEq> ShallowEffect<D> {
    pub fn new() -> Self {
        Self {
            memo: ShallowMemo::new(),
            cleanup: None,
        }
    }

    /// Runs `effect` if `deps` changed; returns whether it ran.
    pub fn run<F>(&mut self, deps: D, effect: F) -> bool
    where
        F: FnOnce(&D) -> Option<Cleanup>,
    {
        self.memo.preserve(deps);
        if !self.memo.changed() {
            return false;
        }
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
        self.cleanup = match self.memo.current() {
            Some(deps) => effect(deps),
            None => None,
        };
        true
    }

    /// Runs the pending cleanup, if any.
    pub fn dispose(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl<D: ShallowEq> Default for ShallowEffect<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Drop for ShallowEffect<D> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl<D: fmt::Debug> fmt::Debug for ShallowEffect<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShallowEffect")
            .field("deps", &self.memo.previous)
            .field("armed", &self.cleanup.is_some())
            .finish()
    }
}

/// Items of `items` that are not equal to `value`.
pub fn omit<T: PartialEq + Clone>(value: &T, items: &[T]) -> Vec<T> {
    items.iter().filter(|v| *v != value).cloned().collect()
}

/// Items of `items` for which `same(item, value)` is false.
pub fn omit_by<T, F>(value: &T, items: &[T], mut same: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    items.iter().filter(|v| !same(v, value)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn slices_compare_items() {
        let a = [1, 2, 3];
        let b = vec![1, 2, 3];
        assert!(are_slices_shallow_equal(Some(&a[..]), Some(&b[..])));
        assert!(!are_slices_shallow_equal(Some(&a[..]), Some(&b[..2])));
        assert!(!are_slices_shallow_equal(Some(&[1, 2, 4][..]), Some(&a[..])));
        assert!(are_slices_shallow_equal::<u8>(None, None));
        assert!(!are_slices_shallow_equal(Some(&a[..]), None));
    }

    #[test]
    fn shared_pointers_compare_by_identity() {
        let x = Arc::new(5);
        let y = Arc::new(5);
        assert!(x.shallow_eq(&Arc::clone(&x)));
        assert!(!x.shallow_eq(&y));

        // lists of pointers: items compared with PartialEq, i.e. by value
        assert!(vec![Arc::clone(&x)].shallow_eq(&vec![y]));
    }

    #[test]
    fn memo_preserves_equal_deps() {
        let mut memo = ShallowMemo::new();
        let first = memo.preserve((vec![1, 2], "a".to_string())).0.as_ptr();
        assert!(memo.changed());

        let second = memo.preserve((vec![1, 2], "a".to_string())).0.as_ptr();
        assert!(!memo.changed());
        assert_eq!(first, second);

        memo.preserve((vec![1, 2, 3], "a".to_string()));
        assert!(memo.changed());
        assert_eq!(memo.current().map(|d| d.0.len()), Some(3));
    }

    #[test]
    fn effect_runs_on_change_and_cleans_up() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut effect = ShallowEffect::new();

        let run = |effect: &mut ShallowEffect<Vec<u32>>, deps: Vec<u32>| {
            let log = Arc::clone(&log);
            effect.run(deps, move |d| {
                log.lock().unwrap().push(format!("run {d:?}"));
                let log = Arc::clone(&log);
                let d = d.clone();
                Some(Box::new(move || log.lock().unwrap().push(format!("clean {d:?}"))) as Cleanup)
            })
        };

        assert!(run(&mut effect, vec![1]));
        assert!(!run(&mut effect, vec![1]));
        assert!(run(&mut effect, vec![2]));
        effect.dispose();
        effect.dispose();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["run [1]", "clean [1]", "run [2]", "clean [2]"]
        );
    }

    #[test]
    fn drop_runs_pending_cleanup() {
        let cleaned = Arc::new(Mutex::new(false));
        {
            let mut effect = ShallowEffect::new();
            let c = Arc::clone(&cleaned);
            effect.run(1_u32, move |_| Some(Box::new(move || *c.lock().unwrap() = true) as Cleanup));
        }
        assert!(*cleaned.lock().unwrap());
    }

    #[test]
    fn omit_variants() {
        assert_eq!(omit(&2, &[1, 2, 3, 2]), vec![1, 3]);
        assert_eq!(
            omit_by(&"B".to_string(), &["a".to_string(), "b".to_string()], |a, b| {
                a.eq_ignore_ascii_case(b)
            }),
            vec!["a".to_string()]
        );
    }
}
