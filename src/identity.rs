//! Identity-compared shared references.
//!
//! `Identity<T>` wraps an `Rc<T>` and compares and hashes by object
//! address, never by content. Two structurally equal but distinct objects
//! are therefore distinct map keys and distinct set members, while clones
//! of one `Identity` all denote the same object. Cloning is a reference
//! count bump; the original instance is always recoverable from any clone.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

pub struct Identity<T: ?Sized>(Rc<T>);

impl<T> Identity<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }
}

impl<T: ?Sized> Identity<T> {
    pub fn from_rc(rc: Rc<T>) -> Self {
        Self(rc)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    /// True if both sides denote the same object instance.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for Identity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for Identity<T> {}

impl<T: ?Sized> Hash for Identity<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Identity").field(&self.0).finish()
    }
}
