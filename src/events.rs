//! Event envelopes fired by mutating collection operations.
//!
//! An envelope is an immutable record of one state change. It owns a clone
//! of the affected element (and key/index where relevant), is built only
//! when a matching listener is registered, is delivered synchronously to
//! every matching listener in registration order, and is then discarded.
//!
//! Read operations (`get`, iteration, `filter`, `map`, `slice`, `one`)
//! never fire, and neither does `clear`.

/// Kinds of structural change on a [`Liste`](crate::Liste).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEventKind {
    /// An element was inserted (append, unshift, insert, insert_all).
    Create,
    /// An element was removed (remove, remove_element, pop, shift).
    Delete,
}

/// One insertion into or removal from a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEvent<T> {
    kind: ListEventKind,
    element: T,
    index: usize,
}

impl<T> ListEvent<T> {
    pub(crate) fn new(kind: ListEventKind, element: T, index: usize) -> Self {
        Self {
            kind,
            element,
            index,
        }
    }

    pub fn kind(&self) -> ListEventKind {
        self.kind
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    /// Index the element was inserted at or removed from. For `pop` this is
    /// the sequence length after removal, i.e. the removed element's index.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Kinds of membership change on a [`Set`](crate::Set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetEventKind {
    /// An element was actually inserted. Re-putting an existing element is
    /// a silent no-op and fires nothing.
    Put,
    /// An element was removed.
    Remove,
}

/// One membership change of a set.
#[derive(Debug, Clone, PartialEq)]
pub struct SetEvent<T> {
    kind: SetEventKind,
    element: T,
}

impl<T> SetEvent<T> {
    pub(crate) fn new(kind: SetEventKind, element: T) -> Self {
        Self { kind, element }
    }

    pub fn kind(&self) -> SetEventKind {
        self.kind
    }

    pub fn element(&self) -> &T {
        &self.element
    }
}

/// Kinds of entry change on a [`Map`](crate::Map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    /// A value was stored, including overwrites of an existing key.
    Set,
    /// An entry was removed.
    Remove,
}

/// One entry change of a map. Carries the key as passed by the caller and
/// the stored (for `Set`) or removed (for `Remove`) value.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent<K, V> {
    kind: MapEventKind,
    key: K,
    value: V,
}

impl<K, V> MapEvent<K, V> {
    pub(crate) fn new(kind: MapEventKind, key: K, value: V) -> Self {
        Self { kind, key, value }
    }

    pub fn kind(&self) -> MapEventKind {
        self.kind
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}
