//! The contract shared by all three container kinds.
//!
//! `filter`, `copy` and `deep_copy` return the same concrete kind as the
//! receiver; the resulting container carries a fresh, empty listener
//! registry and fires no events for the elements it is built from.

pub trait Collection: Sized {
    /// The storage-key domain: positions for sequences and sets, the user
    /// key for maps.
    type Key;
    type Item;

    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Discards all elements. Bulk reset, fires no events.
    fn clear(&mut self);

    /// An arbitrary (first-in-storage-order) element, `None` if empty.
    fn one(&self) -> Option<&Self::Item>;

    /// Shallow copy: a new container over clones of the stored elements.
    /// Elements held behind `Rc` stay shared; listeners are not carried.
    fn copy(&self) -> Self;

    /// Shallow copy in which every directly contained collection is
    /// replaced by its own independent copy (one nesting level).
    fn deep_copy(&self) -> Self;

    /// A new collection of the same kind holding only the elements the
    /// predicate accepts, with the survivors' relative order kept.
    fn filter<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&Self::Item, &Self::Key) -> bool;
}
