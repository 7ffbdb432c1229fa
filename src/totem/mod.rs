//! Single-owner token coordination ("totem").
//!
//! A [`Totem`] lets any number of sibling participants share one token, of which
//! at most one participant holds at a time. Taking the token away from its current
//! holder is implicit: the next [`Claimant::claim`] revokes it first.
//!
//! ## Contents
//! - [`Totem`] the coordinator: two notifiers shared by every participant
//! - [`Claimant`] a participant that can claim and release the token
//! - [`Watch`] a passive observer of the current owner's payload
//!
//! ## Wiring
//! ```text
//!        claim(payload)                               release()
//!             │                                          │
//!             ├─► revoke.broadcast(())  ◄────────────────┤
//!             │     └─► previous owner: drop listener,   │
//!             │         owned = false, notify(false)     │
//!             ├─► revoke.subscribe(self-revoke)          │
//!             ├─► changed.broadcast(Some(payload))       └─► changed.broadcast(None)
//!             └─► owned = true, notify(true)
//!
//!   changed ──► Watch (stores payload) / on_change callbacks
//! ```
//!
//! ## Example
//! ```rust
//! use totem::Totem;
//!
//! let folders = Totem::<&'static str>::new();
//! let selected = folders.watch();
//!
//! let a = folders.claimant();
//! let b = folders.claimant();
//!
//! a.claim("folderA");
//! assert!(a.is_owner());
//! assert_eq!(selected.current(), Some("folderA"));
//!
//! b.claim("folderB");
//! assert!(!a.is_owner());
//! assert!(b.is_owner());
//!
//! b.release();
//! assert!(!b.is_owner());
//! assert_eq!(selected.current(), None);
//! ```

mod claimant;
mod coordinator;
mod watch;

pub use claimant::Claimant;
pub use coordinator::Totem;
pub use watch::Watch;
