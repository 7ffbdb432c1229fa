//! # Logging observer for debugging and demos.
//!
//! [`LogWriter`] records ownership changes through `tracing` at `info` level.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Output format
//! ```text
//! INFO totem: ownership changed group="folders" holder=Some("folderA")
//! INFO totem: ownership changed group="folders" holder=None
//! INFO totem: claimant transition group="folders" claimant=1 owner=true
//! ```
//!
//! ## Example
//! ```no_run
//! # use totem::{LogWriter, Totem};
//! let folders = Totem::<&'static str>::new();
//! let _log = LogWriter::new("folders").observe(&folders);
//! folders.claimant().claim("folderA");
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::notify::Subscription;
use crate::totem::{Claimant, Totem};

/// Passive observer that logs ownership changes.
///
/// Enabled via the `logging` feature. Not intended for production use: subscribe
/// your own callback to [`Totem::on_change`] for structured handling.
#[derive(Clone, Debug)]
pub struct LogWriter {
    group: Cow<'static, str>,
}

impl LogWriter {
    /// `group` tags every record.
    pub fn new(group: impl Into<Cow<'static, str>>) -> Self {
        Self {
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Logs every holder change of `totem`. Dropping the handle stops logging.
    pub fn observe<P>(&self, totem: &Totem<P>) -> Subscription
    where
        P: fmt::Debug + Send + Sync + 'static,
    {
        let group = self.group.clone();
        totem.on_change(move |holder| {
            tracing::info!(target: "totem", group = %group, ?holder, "ownership changed");
        })
    }

    /// Logs the transitions of one claimant.
    pub fn observe_claimant<P>(&self, claimant: &Claimant<P>) -> Subscription
    where
        P: Send + Sync + 'static,
    {
        let group = self.group.clone();
        let id = claimant.id();
        claimant.on_ownership(move |owner| {
            tracing::info!(target: "totem", group = %group, claimant = id, owner, "claimant transition");
        })
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("totem")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_holder_changes_and_transitions() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let folders = Totem::<&'static str>::new();
            let log = LogWriter::new("folders");
            let _changes = log.observe(&folders);

            let a = folders.claimant();
            let _a_log = log.observe_claimant(&a);
            a.claim("folderA");
            a.release();
        });

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("holder=Some(\"folderA\")"), "{out}");
        assert!(out.contains("holder=None"), "{out}");
        assert!(out.contains("owner=true"), "{out}");
        assert!(out.contains("owner=false"), "{out}");
        assert!(out.contains("group=folders"), "{out}");
    }

    #[test]
    fn dropping_handle_stops_logging() {
        let folders = Totem::<u8>::new();
        let sub = LogWriter::default().observe(&folders);
        assert!(sub.is_active());
        drop(sub);
        assert!(!folders.is_held());
    }
}
