//! # Keyboard bindings.
//!
//! [`KeyBinding`] matches key events against a predicate. On a match it optionally
//! stops the event from propagating and dispatches its action after the defer delay,
//! so the action sees the host's state after the current update cycle.
//!
//! ```text
//! host keydown ──► handle(&mut ev)
//!                    ├─ predicate(ev) == false ─► false
//!                    └─ true ─► prevent_default + stop_propagation (if enabled)
//!                               └─► spawn { later(delay); action(ev) } ─► true
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::wait::later;

/// The parts of a host keyboard event a binding needs.
pub trait KeyEvent {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

type Predicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;
type Action<E> = Arc<dyn Fn(E) + Send + Sync>;

/// A predicate/action pair for key events.
pub struct KeyBinding<E> {
    predicate: Predicate<E>,
    action: Option<Action<E>>,
    stop_propagation: bool,
    delay: Duration,
}

impl<E> KeyBinding<E>
where
    E: KeyEvent + Clone + Send + 'static,
{
    /// Binding without an action that stops propagation of matching events.
    pub fn new<P>(config: &Config, predicate: P) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            action: None,
            stop_propagation: true,
            delay: config.defer_delay,
        }
    }

    /// Sets the action dispatched for matching events.
    pub fn action<A>(mut self, action: A) -> Self
    where
        A: Fn(E) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Whether matching events are stopped (default `true`).
    pub fn stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    /// Feeds one event; returns whether it matched.
    ///
    /// # Panics
    /// With an action set, must be called from within a Tokio runtime.
    pub fn handle(&self, event: &mut E) -> bool {
        if !(self.predicate)(event) {
            return false;
        }
        if self.stop_propagation {
            event.prevent_default();
            event.stop_propagation();
        }
        if let Some(action) = &self.action {
            let action = Arc::clone(action);
            let event = event.clone();
            let delay = self.delay;
            tokio::spawn(async move {
                later(delay).await;
                action(event);
            });
        }
        true
    }
}

impl<E> fmt::Debug for KeyBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("has_action", &self.action.is_some())
            .field("stop_propagation", &self.stop_propagation)
            .field("delay", &self.delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::sleep;

    #[derive(Clone, Debug, Default)]
    struct Key {
        code: &'static str,
        prevented: bool,
        stopped: bool,
    }

    impl Key {
        fn new(code: &'static str) -> Self {
            Self {
                code,
                ..Self::default()
            }
        }
    }

    impl KeyEvent for Key {
        fn prevent_default(&mut self) {
            self.prevented = true;
        }
        fn stop_propagation(&mut self) {
            self.stopped = true;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn matching_key_is_stopped_and_action_deferred() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let binding = KeyBinding::new(&Config::default(), |k: &Key| k.code == "Escape")
            .action(move |k: Key| sink.lock().unwrap().push(k.code));

        let mut esc = Key::new("Escape");
        assert!(binding.handle(&mut esc));
        assert!(esc.prevented && esc.stopped);
        assert!(fired.lock().unwrap().is_empty());

        sleep(Duration::from_millis(20)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["Escape"]);
    }

    #[tokio::test(start_paused = true)]
    async fn other_keys_pass_through() {
        let binding = KeyBinding::new(&Config::default(), |k: &Key| k.code == "Escape")
            .action(|_k: Key| panic!("must not fire"));

        let mut enter = Key::new("Enter");
        assert!(!binding.handle(&mut enter));
        assert!(!enter.prevented && !enter.stopped);
        sleep(Duration::from_millis(20)).await;
    }

    #[test]
    fn propagation_can_be_kept() {
        let binding =
            KeyBinding::new(&Config::default(), |k: &Key| k.code == "Tab").stop_propagation(false);

        let mut tab = Key::new("Tab");
        assert!(binding.handle(&mut tab));
        assert!(!tab.prevented && !tab.stopped);
    }
}
