//! Payload-free change notification.
//!
//! Containers and sorters own a [`ChangeNotifier`]. Every successful
//! mutation calls [`ChangeNotifier::notify`], which invokes the registered
//! listeners synchronously in registration order. A listener that wants to
//! see the new contents reads them back through the owner's snapshot
//! accessors.

use std::fmt;

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Listener>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners are never removed.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

// Listeners belong to one live instance; copies start with none.
impl Clone for ChangeNotifier {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        let first = Rc::clone(&log);
        notifier.subscribe(move || first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        notifier.subscribe(move || second.borrow_mut().push("second"));

        notifier.notify();
        notifier.notify();

        assert_eq!(*log.borrow(), vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn test_clone_drops_listeners() {
        let mut notifier = ChangeNotifier::new();
        notifier.subscribe(|| {});
        assert_eq!(notifier.listener_count(), 1);
        assert_eq!(notifier.clone().listener_count(), 0);
    }
}
