//! Debug-only probe guard.
//!
//! `Map` runs user `K: Eq`/`K: Hash` code while probing its hash index,
//! and its internal tables must not be re-entered from inside that code.
//! In debug builds the guard panics on nested entry; in release builds it
//! compiles to a zero-cost no-op.

use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug, Default)]
pub(crate) struct ProbeGuard {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Keep !Send + !Sync in line with the single-threaded design.
    _nosend: PhantomData<*mut ()>,
}

impl ProbeGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Mark a probe section. Panics in debug builds if one is already open.
    #[inline]
    pub(crate) fn probe(&self) -> ProbeSection<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.get(),
                "reentrant probe: user Eq/Hash re-entered the map"
            );
            self.active.set(true);
            ProbeSection { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ProbeSection { _lt: PhantomData }
        }
    }
}

/// RAII marker returned by [`ProbeGuard::probe`].
pub(crate) struct ProbeSection<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ProbeGuard,
    #[cfg(not(debug_assertions))]
    _lt: PhantomData<&'a ()>,
}

impl<'a> Drop for ProbeSection<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
