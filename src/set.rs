//! `Set`: a unique set of elements without order.

use std::fmt;

use crate::collection::Collection;
use crate::element::Element;
use crate::events::{SetEvent, SetEventKind};
use crate::registry::Registry;

/// A duplicate-free container. Membership is a linear equality scan, never
/// a derived hash, so element types only need `PartialEq`. The backing
/// storage happens to preserve insertion order, but that order is not part
/// of the contract and callers must not rely on it.
///
/// # Example
///
/// ```
/// use eventful_collections::{Collection, Set};
///
/// let mut tags: Set<&str> = Set::new();
/// tags.put("a");
/// tags.put("b");
/// tags.put("a");
/// assert_eq!(tags.count(), 2);
/// ```
pub struct Set<T> {
    elements: Vec<T>,
    listeners: Registry<SetEventKind, SetEvent<T>>,
}

impl<T: Element + PartialEq> Set<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            listeners: Registry::new(),
        }
    }

    /// Registers a listener for one event kind. Invoked synchronously, in
    /// registration order, for every matching event fired from now on.
    pub fn on<F>(&mut self, kind: SetEventKind, listener: F)
    where
        F: FnMut(&SetEvent<T>) + 'static,
    {
        self.listeners.add(kind, Box::new(listener));
    }

    fn fire(listeners: &mut Registry<SetEventKind, SetEvent<T>>, kind: SetEventKind, element: &T) {
        if listeners.wants(kind) {
            let event = SetEvent::new(kind, element.clone());
            listeners.fire(kind, &event);
        }
    }

    /// Adds `element` if it is not yet contained. Fires `Put(element)` only
    /// on actual insertion; re-putting an existing element is a silent
    /// no-op. Returns whether the element was inserted.
    pub fn put(&mut self, element: T) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.elements.push(element);
        let index = self.elements.len() - 1;
        Self::fire(&mut self.listeners, SetEventKind::Put, &self.elements[index]);
        true
    }

    /// Puts every element of `elements`, in its iteration order.
    pub fn put_all<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = T>,
    {
        for element in elements {
            self.put(element);
        }
    }

    /// Removes the first occurrence equal to `element`, firing
    /// `Remove(element)`. Absent elements are a silent no-op, not an
    /// error. Returns whether anything was removed.
    pub fn remove(&mut self, element: &T) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(index) => {
                let removed = self.elements.remove(index);
                Self::fire(&mut self.listeners, SetEventKind::Remove, &removed);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, element: &T) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// A new set with each element replaced by `transform`'s result.
    /// Uniqueness is re-established on the transformed elements.
    pub fn map<U, F>(&self, mut transform: F) -> Set<U>
    where
        U: Element + PartialEq,
        F: FnMut(&T) -> U,
    {
        self.elements.iter().map(|element| transform(element)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Element + PartialEq> Collection for Set<T> {
    type Key = usize;
    type Item = T;

    fn count(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn one(&self) -> Option<&T> {
        self.elements.first()
    }

    fn copy(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            listeners: Registry::new(),
        }
    }

    fn deep_copy(&self) -> Self {
        Self {
            elements: self.elements.iter().map(Element::copy_nested).collect(),
            listeners: Registry::new(),
        }
    }

    fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T, &usize) -> bool,
    {
        Self {
            elements: self
                .elements
                .iter()
                .enumerate()
                .filter(|(index, element)| predicate(element, index))
                .map(|(_, element)| element.clone())
                .collect(),
            listeners: Registry::new(),
        }
    }
}

impl<T: Element + PartialEq> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a shallow copy: same elements, fresh listener registry.
impl<T: Element + PartialEq> Clone for Set<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Set")
            .field("elements", &self.elements)
            .finish()
    }
}

/// Content equality, insensitive to insertion order.
impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .all(|e| other.elements.iter().any(|o| o == e))
    }
}

/// Duplicates in the source collapse, keeping first occurrences.
impl<T: Element + PartialEq> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.put_all(iter);
        set
    }
}

impl<T: Element + PartialEq> Extend<T> for Set<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
