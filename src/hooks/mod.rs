//! Host bindings.
//!
//! Small adapters between a UI host and the crate's primitives. The host owns the
//! real elements and events; it implements the traits below and forwards its
//! callbacks to the bindings.
//!
//! ## Contents
//! - [`FocusHandle`] / [`Focusable`] deferred focus of an attached element
//! - [`KeyBinding`] / [`KeyEvent`] predicate-gated key handling with deferred action
//! - [`ClickOutside`] / [`Exclusion`] / [`Contains`] clicks outside a region
//! - [`MediaBinding`] / [`MediaQuery`] first-match media query to value mapping
//! - [`VisibleSet`] / [`IntersectionOptions`] / [`IntersectionEntry`] ordered visible targets
//! - [`RefState`] latest-value cell with a refresh counter
//!
//! Deferred work (focus, key actions) runs on the Tokio runtime after
//! [`Config::defer_delay`](crate::Config::defer_delay).

mod click_outside;
mod focus;
mod keydown;
mod media;
mod ref_state;
mod visibility;

pub use click_outside::{ClickOutside, Contains, Exclusion};
pub use focus::{FocusHandle, Focusable};
pub use keydown::{KeyBinding, KeyEvent};
pub use media::{MediaBinding, MediaQuery};
pub use ref_state::RefState;
pub use visibility::{IntersectionEntry, IntersectionOptions, VisibleSet};
