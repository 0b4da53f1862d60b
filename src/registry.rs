//! Per-collection listener registry.
//!
//! Each collection instance owns one registry; there is no global bus.
//! The backing vector is allocated lazily on the first `on` call, so
//! collections that are never observed stay allocation-free here.
//! Delivery is synchronous and in registration order; a listener is never
//! invoked for events fired before it was registered.

/// Boxed listener callback for an event envelope of type `E`.
pub(crate) type Listener<E> = Box<dyn FnMut(&E)>;

pub(crate) struct Registry<K, E> {
    listeners: Option<Vec<(K, Listener<E>)>>,
}

impl<K: Copy + PartialEq, E> Registry<K, E> {
    pub(crate) const fn new() -> Self {
        Self { listeners: None }
    }

    pub(crate) fn add(&mut self, kind: K, listener: Listener<E>) {
        self.listeners
            .get_or_insert_with(Vec::new)
            .push((kind, listener));
    }

    /// True if at least one listener is registered for `kind`. Collections
    /// check this before cloning elements into an envelope.
    pub(crate) fn wants(&self, kind: K) -> bool {
        match &self.listeners {
            Some(listeners) => listeners.iter().any(|(k, _)| *k == kind),
            None => false,
        }
    }

    /// Deliver `event` to every listener registered for `kind`, in
    /// registration order. Blocks until every listener has returned.
    pub(crate) fn fire(&mut self, kind: K, event: &E) {
        if let Some(listeners) = &mut self.listeners {
            for (k, listener) in listeners.iter_mut() {
                if *k == kind {
                    listener(event);
                }
            }
        }
    }
}

impl<K, E> std::fmt::Debug for Registry<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.listeners.as_ref().map(Vec::len).unwrap_or(0);
        f.debug_struct("Registry").field("listeners", &count).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, PartialEq)]
    enum Kind {
        A,
        B,
    }

    /// Invariant: listeners fire in registration order and only for their
    /// registered kind.
    #[test]
    fn fires_matching_listeners_in_order() {
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let mut registry: Registry<Kind, u32> = Registry::new();

        let l = log.clone();
        registry.add(Kind::A, Box::new(move |_| l.borrow_mut().push("first")));
        let l = log.clone();
        registry.add(Kind::B, Box::new(move |_| l.borrow_mut().push("other")));
        let l = log.clone();
        registry.add(Kind::A, Box::new(move |_| l.borrow_mut().push("second")));

        registry.fire(Kind::A, &1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    /// Invariant: `wants` reports per-kind registration and stays false for
    /// an untouched registry.
    #[test]
    fn wants_tracks_registration() {
        let mut registry: Registry<Kind, u32> = Registry::new();
        assert!(!registry.wants(Kind::A));

        registry.add(Kind::A, Box::new(|_| {}));
        assert!(registry.wants(Kind::A));
        assert!(!registry.wants(Kind::B));
    }
}
