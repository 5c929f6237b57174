//! Event types and observer lists used by the engine.
//!
//! Components and entities notify interested parties through [`Observers`],
//! an ordered list of handlers. Handlers fire in registration order and an
//! empty list makes `emit` a no-op. Consumers that prefer polling can grab a
//! [`crossbeam_channel::Receiver`] with [`Observers::channel`].
//!
//! Submodules:
//! - [`lifecycle`] – killed/revived notifications for entities
//! - [`mouse`] – pointer hover/click/release/leave payloads
//! - [`touch`] – per-finger touch payloads

pub mod lifecycle;
pub mod mouse;
pub mod touch;

use crossbeam_channel::{Receiver, unbounded};

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered list of event handlers for one event kind.
pub struct Observers<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<E: 'static> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It runs after every handler registered before it.
    pub fn connect<F>(&mut self, handler: F)
    where
        F: FnMut(&E) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Invoke every handler with `event`.
    pub fn emit(&mut self, event: &E) {
        for handler in self.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Forward every future event into a channel.
    ///
    /// Once the receiver is dropped the forwarding handler stays registered
    /// but does nothing.
    pub fn channel(&mut self) -> Receiver<E>
    where
        E: Clone,
    {
        let (tx, rx) = unbounded();
        self.connect(move |event: &E| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop every registered handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_without_handlers_is_noop() {
        let mut observers: Observers<u32> = Observers::new();
        observers.emit(&7);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_handlers_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<u32> = Observers::new();
        let first = Rc::clone(&log);
        observers.connect(move |v| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&log);
        observers.connect(move |v| second.borrow_mut().push(("second", *v)));

        observers.emit(&3);

        assert_eq!(*log.borrow(), vec![("first", 3), ("second", 3)]);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_channel_receives_clones() {
        let mut observers: Observers<String> = Observers::new();
        let rx = observers.channel();
        observers.emit(&"a".to_string());
        observers.emit(&"b".to_string());
        let got: Vec<String> = rx.try_iter().collect();
        assert_eq!(got, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let mut observers: Observers<u8> = Observers::new();
        drop(observers.channel());
        observers.emit(&1);
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_clear_removes_handlers() {
        let mut observers: Observers<u8> = Observers::new();
        observers.connect(|_| {});
        observers.clear();
        assert!(observers.is_empty());
    }
}
