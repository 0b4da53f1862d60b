//! `Liste`: a number of elements in sequential order.

use std::fmt;

use crate::collection::Collection;
use crate::element::Element;
use crate::error::ListError;
use crate::events::{ListEvent, ListEventKind};
use crate::registry::Registry;

/// An index-addressed ordered container. Keys are the contiguous integers
/// `0..count()`; every structural mutation renumbers so no gaps exist.
///
/// Mutating operations fire [`ListEvent`]s to listeners registered with
/// [`on`](Liste::on); read operations never fire.
///
/// # Example
///
/// ```
/// use eventful_collections::{Collection, Liste};
///
/// let mut items = Liste::from_vec(vec![10, 20, 30]);
/// items.append(40);
/// assert_eq!(items.get(-1), Ok(&40));
/// assert_eq!(items.slice(-2, None).to_vec(), vec![30, 40]);
/// ```
pub struct Liste<T> {
    elements: Vec<T>,
    listeners: Registry<ListEventKind, ListEvent<T>>,
}

impl<T: Element> Liste<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            listeners: Registry::new(),
        }
    }

    pub fn from_vec(elements: Vec<T>) -> Self {
        Self {
            elements,
            listeners: Registry::new(),
        }
    }

    /// Registers a listener for one event kind. Invoked synchronously, in
    /// registration order, for every matching event fired from now on.
    pub fn on<F>(&mut self, kind: ListEventKind, listener: F)
    where
        F: FnMut(&ListEvent<T>) + 'static,
    {
        self.listeners.add(kind, Box::new(listener));
    }

    // Associated so call sites can fire while still borrowing an element
    // out of `self.elements`.
    fn fire(
        listeners: &mut Registry<ListEventKind, ListEvent<T>>,
        kind: ListEventKind,
        element: &T,
        index: usize,
    ) {
        if listeners.wants(kind) {
            let event = ListEvent::new(kind, element.clone(), index);
            listeners.fire(kind, &event);
        }
    }

    /// Normalizes a possibly negative index: `index += count()` when
    /// negative, so `-1` addresses the last element and `-count()` the
    /// first. The result may still be out of range.
    fn normalize(&self, index: isize) -> isize {
        if index < 0 {
            index.saturating_add(self.elements.len() as isize)
        } else {
            index
        }
    }

    /// The element at `index`. Negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<&T, ListError> {
        let index = self.normalize(index);
        usize::try_from(index)
            .ok()
            .and_then(|i| self.elements.get(i))
            .ok_or(ListError::IndexNotSet { index })
    }

    /// The first element. Errors on an empty sequence.
    pub fn first(&self) -> Result<&T, ListError> {
        self.elements.first().ok_or(ListError::IndexNotSet { index: 0 })
    }

    /// The last element. Errors on an empty sequence.
    pub fn last(&self) -> Result<&T, ListError> {
        self.elements.last().ok_or(ListError::IndexNotSet { index: -1 })
    }

    /// Adds an element to the end. Fires `Create(element, new_last_index)`.
    pub fn append(&mut self, element: T) {
        self.elements.push(element);
        let index = self.elements.len() - 1;
        Self::fire(
            &mut self.listeners,
            ListEventKind::Create,
            &self.elements[index],
            index,
        );
    }

    /// Appends every element of `list` in order, firing one `Create` each.
    pub fn append_all(&mut self, list: Liste<T>) {
        for element in list {
            self.append(element);
        }
    }

    /// Inserts at the beginning, shifting all others forward. Fires
    /// `Create(element, 0)`.
    pub fn unshift(&mut self, element: T) {
        self.insert(element, 0);
    }

    /// Inserts at `index`, moving the element currently there and all
    /// later ones forward by one. An index past the end is clamped to the
    /// end. Fires `Create(element, index)`.
    pub fn insert(&mut self, element: T, index: usize) {
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Self::fire(
            &mut self.listeners,
            ListEventKind::Create,
            &self.elements[index],
            index,
        );
    }

    /// Bulk insert keeping the inserted elements' relative order. Fires one
    /// `Create` per element at `index, index + 1, …`.
    pub fn insert_all(&mut self, list: Liste<T>, index: usize) {
        let index = index.min(self.elements.len());
        for (offset, element) in list.into_iter().enumerate() {
            self.elements.insert(index + offset, element);
            Self::fire(
                &mut self.listeners,
                ListEventKind::Create,
                &self.elements[index + offset],
                index + offset,
            );
        }
    }

    /// Removes and returns the element at `index`, renumbering later
    /// indices down by one. Fires `Delete(element, index)`.
    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.elements.len() {
            return Err(ListError::IndexNotSet {
                index: index as isize,
            });
        }
        let element = self.elements.remove(index);
        Self::fire(&mut self.listeners, ListEventKind::Delete, &element, index);
        Ok(element)
    }

    /// Removes and returns the last element. Fires `Delete` at the removed
    /// position (the length after removal).
    pub fn pop(&mut self) -> Result<T, ListError> {
        let element = self.elements.pop().ok_or(ListError::IndexNotSet { index: -1 })?;
        let index = self.elements.len();
        Self::fire(&mut self.listeners, ListEventKind::Delete, &element, index);
        Ok(element)
    }

    /// Removes and returns the first element. Fires `Delete(element, 0)`.
    pub fn shift(&mut self) -> Result<T, ListError> {
        self.remove(0)
    }

    /// Storage-level replace: puts `element` at `index` and returns the old
    /// element. Fires nothing.
    pub fn set(&mut self, index: usize, element: T) -> Result<T, ListError> {
        let slot = self.elements.get_mut(index).ok_or(ListError::IndexNotSet {
            index: index as isize,
        })?;
        Ok(std::mem::replace(slot, element))
    }

    pub fn is_in_bound(&self, index: usize) -> bool {
        index < self.elements.len()
    }

    /// Clamps a possibly negative range start to `0..=count()`.
    fn range_start(&self, start: isize) -> usize {
        let len = self.elements.len();
        if start < 0 {
            len.saturating_sub(start.unsigned_abs())
        } else {
            (start as usize).min(len)
        }
    }

    /// A new sequence over a sub-range. `start` negative counts from the
    /// end; omitting `length` includes everything through the end. A
    /// `length` past the end is clamped. Unlike `start`, `length` is a
    /// forward element count only (no count-from-the-end form).
    pub fn slice(&self, start: isize, length: Option<usize>) -> Liste<T> {
        let start = self.range_start(start);
        let end = match length {
            Some(length) => start.saturating_add(length).min(self.elements.len()),
            None => self.elements.len(),
        };
        Liste::from_vec(self.elements[start..end].to_vec())
    }

    /// Removes the addressed range, optionally inserting `replacement` in
    /// its place, and returns the removed elements as a new sequence.
    /// Fires no events. `length` follows the same rules as in
    /// [`slice`](Liste::slice).
    pub fn splice(
        &mut self,
        start: isize,
        length: Option<usize>,
        replacement: Option<Liste<T>>,
    ) -> Liste<T> {
        let start = self.range_start(start);
        let end = match length {
            Some(length) => start.saturating_add(length).min(self.elements.len()),
            None => self.elements.len(),
        };
        let replacement = replacement.map(Liste::into_vec).unwrap_or_default();
        let removed: Vec<T> = self.elements.splice(start..end, replacement).collect();
        Liste::from_vec(removed)
    }

    /// A new sequence with each element replaced by `transform`'s result,
    /// keeping indices. Fires nothing.
    pub fn map<U, F>(&self, mut transform: F) -> Liste<U>
    where
        U: Element,
        F: FnMut(&T, usize) -> U,
    {
        Liste::from_vec(
            self.elements
                .iter()
                .enumerate()
                .map(|(index, element)| transform(element, index))
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Element + PartialEq> Liste<T> {
    /// Index of the first element equal to `element`, `None` if absent.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }

    /// Removes the first occurrence of `element`. A missing element is an
    /// invalid index, reported as `IndexNotSet { index: -1 }`.
    pub fn remove_element(&mut self, element: &T) -> Result<T, ListError> {
        match self.index_of(element) {
            Some(index) => self.remove(index),
            None => Err(ListError::IndexNotSet { index: -1 }),
        }
    }

    /// Elements of `self` absent (by equality) from `subtrahend`, order
    /// preserved.
    pub fn diff(&self, subtrahend: &Liste<T>) -> Liste<T> {
        Liste::from_vec(
            self.elements
                .iter()
                .filter(|e| !subtrahend.contains(e))
                .cloned()
                .collect(),
        )
    }
}

impl<T: Element + fmt::Display> Liste<T> {
    /// Concatenates the elements' display forms with `glue` between them.
    pub fn join(&self, glue: &str) -> String {
        self.elements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(glue)
    }
}

impl Liste<String> {
    /// Splits `text` at every `separator` into a sequence of substrings.
    pub fn split(separator: &str, text: &str) -> Liste<String> {
        Liste::from_vec(text.split(separator).map(String::from).collect())
    }
}

impl<T: Element> Collection for Liste<T> {
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
        Liste::from_vec(self.elements.clone())
    }

    fn deep_copy(&self) -> Self {
        Liste::from_vec(self.elements.iter().map(Element::copy_nested).collect())
    }

    fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T, &usize) -> bool,
    {
        Liste::from_vec(
            self.elements
                .iter()
                .enumerate()
                .filter(|(index, element)| predicate(element, index))
                .map(|(_, element)| element.clone())
                .collect(),
        )
    }
}

impl<T: Element> Default for Liste<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a shallow copy: same elements, fresh listener registry.
impl<T: Element> Clone for Liste<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for Liste<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Liste")
            .field("elements", &self.elements)
            .finish()
    }
}

impl<T: PartialEq> PartialEq for Liste<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Element> FromIterator<T> for Liste<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Liste::from_vec(iter.into_iter().collect())
    }
}

impl<T: Element> Extend<T> for Liste<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T> IntoIterator for Liste<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Liste<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
