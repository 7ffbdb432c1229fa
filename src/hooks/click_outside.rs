//! # Click-outside detection.
//!
//! [`ClickOutside`] runs a handler for clicks that land outside some region.
//! The region is described by an [`Exclusion`]:
//!
//! - [`Exclusion::Predicate`] the predicate decides; the handler runs when it returns `true`.
//! - [`Exclusion::Element`] the handler runs unless the element contains the click target.
//!
//! `T` is the host's click target type, `E` its click event type.

use std::fmt;
use std::sync::Arc;

/// Host element able to tell whether a click target lies inside it.
pub trait Contains<T: ?Sized>: Send + Sync {
    fn contains(&self, target: &T) -> bool;
}

/// How a click is tested against the excluded region.
pub enum Exclusion<T: ?Sized, E> {
    /// `predicate(target, event) == true` means "outside": run the handler.
    Predicate(Arc<dyn Fn(&T, &E) -> bool + Send + Sync>),
    /// Clicks inside this element are ignored.
    Element(Arc<dyn Contains<T>>),
}

impl<T: ?Sized, E> Exclusion<T, E> {
    /// Builds an [`Exclusion::Predicate`].
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&T, &E) -> bool + Send + Sync + 'static,
    {
        Exclusion::Predicate(Arc::new(f))
    }

    /// Builds an [`Exclusion::Element`].
    pub fn element(element: Arc<dyn Contains<T>>) -> Self {
        Exclusion::Element(element)
    }

    fn is_outside(&self, target: &T, event: &E) -> bool {
        match self {
            Exclusion::Predicate(predicate) => predicate(target, event),
            Exclusion::Element(element) => !element.contains(target),
        }
    }
}

impl<T: ?Sized, E> Clone for Exclusion<T, E> {
    fn clone(&self) -> Self {
        match self {
            Exclusion::Predicate(p) => Exclusion::Predicate(Arc::clone(p)),
            Exclusion::Element(e) => Exclusion::Element(Arc::clone(e)),
        }
    }
}

impl<T: ?Sized, E> fmt::Debug for Exclusion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Predicate(_) => f.write_str("Predicate(..)"),
            Exclusion::Element(_) => f.write_str("Element(..)"),
        }
    }
}

/// Click handler gated by an [`Exclusion`].
pub struct ClickOutside<T: ?Sized, E> {
    exclusion: Exclusion<T, E>,
    handler: Arc<dyn Fn(&E) + Send + Sync>,
}

impl<T: ?Sized, E> ClickOutside<T, E> {
    pub fn new<H>(exclusion: Exclusion<T, E>, handler: H) -> Self
    where
        H: Fn(&E) + Send + Sync + 'static,
    {
        Self {
            exclusion,
            handler: Arc::new(handler),
        }
    }

    /// Feeds one click; returns whether the handler ran.
    pub fn handle(&self, target: &T, event: &E) -> bool {
        if !self.exclusion.is_outside(target, event) {
            return false;
        }
        (self.handler)(event);
        true
    }
}

impl<T: ?Sized, E> fmt::Debug for ClickOutside<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickOutside")
            .field("exclusion", &self.exclusion)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Node ids; a panel contains the ids in its range.
    struct Panel(std::ops::Range<u32>);

    impl Contains<u32> for Panel {
        fn contains(&self, target: &u32) -> bool {
            self.0.contains(target)
        }
    }

    #[derive(Debug)]
    struct Click {
        button: u8,
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(&Click) + Send + Sync + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        (hits, move |_: &Click| {
            h.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn element_ignores_clicks_inside() {
        let (hits, handler) = counter();
        let outside = ClickOutside::<u32, Click>::new(Exclusion::element(Arc::new(Panel(10..20))), handler);

        assert!(!outside.handle(&15, &Click { button: 0 }));
        assert!(outside.handle(&3, &Click { button: 0 }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn predicate_decides_alone() {
        let (hits, handler) = counter();
        let outside = ClickOutside::<u32, Click>::new(
            Exclusion::predicate(|target: &u32, click: &Click| *target > 100 && click.button == 0),
            handler,
        );

        assert!(outside.handle(&101, &Click { button: 0 }));
        assert!(!outside.handle(&101, &Click { button: 2 }));
        assert!(!outside.handle(&5, &Click { button: 0 }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
