//! # totem
//!
//! **Totem** coordinates a single shared token between sibling participants and
//! ships small, host-agnostic helpers for UI glue code.
//!
//! At most one participant of a group holds the token. Claiming it implicitly
//! revokes it from the previous holder, so participants never talk to each other
//! directly: everything flows through two synchronous [`Notifier`] channels.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Claimant A  │   │  Claimant B  │   │  Claimant C  │
//!     │ (folder row) │   │ (folder row) │   │ (folder row) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ claim/release    │                  │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Totem<P> (one per group, cloned into participants)               │
//! │  - revoke:  Notifier<()>         (current holder listens)         │
//! │  - changed: Notifier<Option<P>>  (observers listen)               │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        ▼                                              ▼
//!  previous holder: owned = false              Watch / on_change / LogWriter
//!        │                                     (passive observers)
//!        ▼
//!  Claimant::on_ownership(false) ─► host redraw
//! ```
//!
//! ### Claim sequence
//! ```text
//! B.claim(p)
//!   ├─► holds token? ─► yes: no-op
//!   ├─► revoke.broadcast(())        ─► A: unsubscribe, owned=false, notify(false)
//!   ├─► revoke.subscribe(B's revoke listener)
//!   ├─► changed.broadcast(Some(p))  ─► observers
//!   └─► owned=true, notify(true)
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / functions                         |
//! |-------------------|-------------------------------------------------------------|-----------------------------------------------|
//! | **Pub/sub**       | Ordered synchronous broadcast with RAII unsubscribe.        | [`Notifier`], [`Subscription`], [`Delivery`]  |
//! | **Ownership**     | Single-owner token per group, passive observers.            | [`Totem`], [`Claimant`], [`Watch`]            |
//! | **Timing**        | Deferral, bounded polling, trailing-edge debounce.          | [`later`], [`wait_until`], [`Debouncer`]      |
//! | **Shallow deps**  | Shallow equality, memoized dependencies, effects.           | [`ShallowEq`], [`ShallowMemo`], [`ShallowEffect`] |
//! | **Host bindings** | Focus, keys, click-outside, media, visibility, ref state.   | [`FocusHandle`], [`KeyBinding`], [`VisibleSet`] |
//! | **Errors**        | Typed errors for the waiting helpers.                       | [`WaitError`]                                 |
//! | **Configuration** | Centralized delays, budgets and delivery policy.            | [`Config`], [`PollPolicy`]                    |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use totem::{PollPolicy, Totem, WaitError, wait_until};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), WaitError> {
//!     let folders = Totem::<&'static str>::new();
//!     let selected = folders.watch();
//!
//!     let a = folders.claimant();
//!     let b = folders.claimant();
//!     a.claim("folderA");
//!     b.claim("folderB");
//!     assert!(!a.is_owner() && b.is_owner());
//!
//!     // wait for the selection to settle
//!     let poll = PollPolicy::fixed(Duration::from_millis(1), 10);
//!     wait_until(|| selected.current() == Some("folderB"), &poll).await?;
//!     Ok(())
//! }
//! ```
mod config;
mod debounce;
mod error;
mod hooks;
mod notify;
mod policies;
mod shallow;
mod sync;
mod totem;
mod wait;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_VISIBILITY_THRESHOLD};
pub use debounce::Debouncer;
pub use error::WaitError;
pub use hooks::{
    ClickOutside, Contains, Exclusion, FocusHandle, Focusable, IntersectionEntry,
    IntersectionOptions, KeyBinding, KeyEvent, MediaBinding, MediaQuery, RefState, VisibleSet,
};
pub use notify::{Delivery, Notifier, Subscription, SubscriptionId};
pub use policies::PollPolicy;
pub use shallow::{
    Cleanup, ShallowEffect, ShallowEq, ShallowMemo, are_slices_shallow_equal, omit, omit_by,
};
pub use totem::{Claimant, Totem, Watch};
pub use wait::{Deferral, later, wait_until, wait_until_cancellable};

// Optional: expose a built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod observers;
#[cfg(feature = "logging")]
pub use observers::LogWriter;
