//! Synchronous publish/subscribe channel.
//!
//! Subscribers are plain callbacks invoked in subscription order on the
//! caller's thread. There is no queueing: `emit` returns after every
//! subscriber has run.

use std::fmt;

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Per-instance observer list.
pub struct Notifier<E> {
    next_id: usize,
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Notifier<E> {
    /// Create notifier without subscribers.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to all current subscribers.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    /// Number of current subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if there are no subscribers.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Drop all subscribers.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();

        let first = Rc::clone(&log);
        notifier.subscribe(move |n: &u32| first.borrow_mut().push(("first", *n)));
        let second = Rc::clone(&log);
        notifier.subscribe(move |n: &u32| second.borrow_mut().push(("second", *n)));

        notifier.emit(&7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();

        let counter = Rc::clone(&count);
        let id = notifier.subscribe(move |_: &()| *counter.borrow_mut() += 1);
        notifier.emit(&());
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(notifier.is_empty());
    }
}
