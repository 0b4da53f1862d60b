//! The element contract shared by all collections.
//!
//! `Element` is `Clone` plus one hook, `copy_nested`, which is the
//! recursion point of [`Collection::deep_copy`](crate::Collection::deep_copy):
//! elements that are themselves collections (held behind `Rc<RefCell<_>>`)
//! return an independent shallow copy of the contained collection; plain
//! values return a clone. Deep copy therefore detaches exactly one nesting
//! level per call — a nested collection's own nested elements stay shared
//! until that collection's `deep_copy` is called in turn.

use std::cell::RefCell;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use crate::collection::Collection;
use crate::identity::Identity;
use crate::liste::Liste;
use crate::map::Map;
use crate::set::Set;

pub trait Element: Clone {
    /// Copy one nesting level. Directly contained collections become
    /// independent copies; anything else is a plain clone.
    fn copy_nested(&self) -> Self {
        self.clone()
    }
}

macro_rules! plain_elements {
    ($($t:ty),* $(,)?) => {
        $(impl Element for $t {})*
    };
}

plain_elements!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, String,
    &'static str, ()
);

impl<T: Element> Element for Option<T> {
    fn copy_nested(&self) -> Self {
        self.as_ref().map(Element::copy_nested)
    }
}

/// Identity-compared references are leaves: deep copy shares them.
impl<T: ?Sized> Element for Identity<T> {}

impl<T: Element> Element for Liste<T> {
    fn copy_nested(&self) -> Self {
        self.copy()
    }
}

impl<T: Element + PartialEq> Element for Set<T> {
    fn copy_nested(&self) -> Self {
        self.copy()
    }
}

impl<K, V, S> Element for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    fn copy_nested(&self) -> Self {
        self.copy()
    }
}

/// A shared, mutable nested sequence: shallow copies of the outer
/// collection share it, deep copies detach it.
impl<T: Element> Element for Rc<RefCell<Liste<T>>> {
    fn copy_nested(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().copy()))
    }
}

impl<T: Element + PartialEq> Element for Rc<RefCell<Set<T>>> {
    fn copy_nested(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().copy()))
    }
}

impl<K, V, S> Element for Rc<RefCell<Map<K, V, S>>>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    fn copy_nested(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().copy()))
    }
}
