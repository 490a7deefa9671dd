#![forbid(unsafe_code)]

//! Listener registration and synchronous dispatch.
//!
//! # Design
//!
//! [`ListenerRegistry`] stores listeners in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Cloning a registry yields another handle to the same
//! list, so a listener can keep a handle and unregister itself (or others)
//! from inside a callback.
//!
//! Dispatch takes a snapshot of the current listeners before calling any of
//! them and releases the borrow during the calls. Removals made during a
//! round take effect from the next round; the round in flight is unaffected.
//!
//! # Invariants
//!
//! 1. Listeners are invoked in registration order.
//! 2. Ids are never reused within one registry.
//! 3. Each dispatched event reaches every listener registered when the
//!    round began exactly once.
//!
//! # Failure Modes
//!
//! - **Re-entrant tracker mutation**: a listener cannot reach the tracker's
//!   `&mut` methods while a dispatch is running; the borrow checker rules it
//!   out. Registry mutation from a callback is allowed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::event::PatternEvent;
use crate::pattern::Pattern;

// ---------------------------------------------------------------------------
// Listener trait
// ---------------------------------------------------------------------------

/// Callbacks for pattern lifecycle notifications.
///
/// Every method has a no-op default so implementors only override what they
/// need. Methods take `&self`; use interior mutability to record state.
pub trait PatternLockListener {
    /// Drawing has just started.
    fn on_started(&self) {}

    /// One more dot was added. `pattern` is the full pattern so far.
    fn on_progress(&self, pattern: &Pattern) {
        let _ = pattern;
    }

    /// The user finished drawing.
    fn on_complete(&self, pattern: &Pattern) {
        let _ = pattern;
    }

    /// The pattern was cleared.
    fn on_cleared(&self) {}
}

/// Adapter turning a closure over [`PatternEvent`] into a listener.
struct FnListener<F>(F);

impl<F: Fn(&PatternEvent)> PatternLockListener for FnListener<F> {
    fn on_started(&self) {
        (self.0)(&PatternEvent::Started);
    }

    fn on_progress(&self, pattern: &Pattern) {
        (self.0)(&PatternEvent::Progress(pattern.clone()));
    }

    fn on_complete(&self, pattern: &Pattern) {
        (self.0)(&PatternEvent::Complete(pattern.clone()));
    }

    fn on_cleared(&self) {
        (self.0)(&PatternEvent::Cleared);
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type ListenerRc = Rc<dyn PatternLockListener>;

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    entries: Vec<(ListenerId, ListenerRc)>,
}

/// Ordered, shared list of listeners.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` after all existing ones.
    pub fn add(&self, listener: Rc<dyn PatternLockListener>) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, listener));
        id
    }

    /// Register a closure receiving each event.
    pub fn add_fn(&self, callback: impl Fn(&PatternEvent) + 'static) -> ListenerId {
        self.add(Rc::new(FnListener(callback)))
    }

    /// Unregister `id`. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.entries.len();
        inner.entries.retain(|(entry_id, _)| *entry_id != id);
        inner.entries.len() != before
    }

    /// Unregister every listener.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    /// Deliver `event` to every listener registered right now.
    pub fn dispatch(&self, event: &PatternEvent) {
        // Snapshot so callbacks may add or remove listeners.
        let listeners: Vec<ListenerRc> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        if listeners.is_empty() {
            return;
        }
        trace!(
            event = event.kind().as_str(),
            listeners = listeners.len(),
            "dispatching pattern event"
        );

        for listener in &listeners {
            match event {
                PatternEvent::Started => listener.on_started(),
                PatternEvent::Progress(pattern) => listener.on_progress(pattern),
                PatternEvent::Complete(pattern) => listener.on_complete(pattern),
                PatternEvent::Cleared => listener.on_cleared(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recorder {
        log: RefCell<Vec<String>>,
    }

    impl PatternLockListener for Recorder {
        fn on_started(&self) {
            self.log.borrow_mut().push("started".into());
        }

        fn on_progress(&self, pattern: &Pattern) {
            self.log
                .borrow_mut()
                .push(format!("progress:{}", pattern.len()));
        }

        fn on_complete(&self, pattern: &Pattern) {
            self.log
                .borrow_mut()
                .push(format!("complete:{}", pattern.len()));
        }

        fn on_cleared(&self) {
            self.log.borrow_mut().push("cleared".into());
        }
    }

    fn one_dot() -> Pattern {
        let grid = Grid::default();
        Pattern::from_dots(grid, grid.dot_by_id(0)).unwrap()
    }

    #[test]
    fn dispatch_reaches_listener_methods() {
        let registry = ListenerRegistry::new();
        let recorder = Rc::new(Recorder::default());
        registry.add(recorder.clone());

        registry.dispatch(&PatternEvent::Started);
        registry.dispatch(&PatternEvent::Progress(one_dot()));
        registry.dispatch(&PatternEvent::Complete(one_dot()));
        registry.dispatch(&PatternEvent::Cleared);

        assert_eq!(
            *recorder.log.borrow(),
            vec!["started", "progress:1", "complete:1", "cleared"]
        );
    }

    #[test]
    fn registration_order_is_call_order() {
        let registry = ListenerRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3 {
            let order = order.clone();
            registry.add_fn(move |_| order.borrow_mut().push(tag));
        }
        registry.dispatch(&PatternEvent::Started);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn remove_stops_delivery() {
        let registry = ListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = registry.add_fn(move |_| h.set(h.get() + 1));

        registry.dispatch(&PatternEvent::Started);
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        registry.dispatch(&PatternEvent::Started);

        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn listener_can_remove_itself_mid_dispatch() {
        let registry = ListenerRegistry::new();
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let handle = registry.clone();
        let slot = own_id.clone();
        let c = calls.clone();
        let id = registry.add_fn(move |_| {
            c.set(c.get() + 1);
            if let Some(id) = slot.get() {
                handle.remove(id);
            }
        });
        own_id.set(Some(id));

        let after = Rc::new(Cell::new(0));
        let a = after.clone();
        registry.add_fn(move |_| a.set(a.get() + 1));

        registry.dispatch(&PatternEvent::Started);
        registry.dispatch(&PatternEvent::Started);

        assert_eq!(calls.get(), 1);
        // The listener registered after the self-removing one still runs
        // in both rounds.
        assert_eq!(after.get(), 2);
        assert!(!registry.contains(id));
    }

    #[test]
    fn ids_are_not_reused() {
        let registry = ListenerRegistry::new();
        let a = registry.add_fn(|_| {});
        registry.remove(a);
        let b = registry.add_fn(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn clones_share_listeners() {
        let registry = ListenerRegistry::new();
        let other = registry.clone();
        other.add_fn(|_| {});
        assert_eq!(registry.len(), 1);
        registry.clear();
        assert!(other.is_empty());
    }
}
