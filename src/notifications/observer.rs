// SPDX-License-Identifier: MPL-2.0
//! Observer registry for state broadcasts.

use super::notification::Notification;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot handed to observers after every change.
#[derive(Debug, Clone, Copy)]
pub struct ToastState<'a> {
    /// All tracked notifications in display (insertion) order.
    pub notifications: &'a [Notification],
}

/// Callback invoked with the full state after every change.
pub type Observer = Box<dyn FnMut(&ToastState<'_>)>;

/// Identifies a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Allocates a fresh, process-wide unique id.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Observers in registration order.
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<(SubscriptionId, Observer)>,
}

impl ObserverList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.insert(id, observer);
        id
    }

    pub fn insert(&mut self, id: SubscriptionId, observer: Observer) {
        self.observers.push((id, observer));
    }

    /// Returns whether the observer was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn broadcast(&mut self, state: &ToastState<'_>) {
        for (_, observer) in &mut self.observers {
            observer(state);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("count", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn broadcast_reaches_observers_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();

        for name in ["first", "second"] {
            let calls = Rc::clone(&calls);
            list.subscribe(Box::new(move |_| calls.borrow_mut().push(name)));
        }
        list.broadcast(&ToastState { notifications: &[] });

        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let count = Rc::new(RefCell::new(0));
        let mut list = ObserverList::new();
        let counter = Rc::clone(&count);
        let id = list.subscribe(Box::new(move |_| *counter.borrow_mut() += 1));

        assert!(list.unsubscribe(id));
        assert!(!list.unsubscribe(id));
        list.broadcast(&ToastState { notifications: &[] });

        assert_eq!(*count.borrow(), 0);
        assert!(list.is_empty());
    }
}
