//! eventful-collections: ordered sequence, unique set and key-value map
//! over a shared collection contract, with synchronous change-notification
//! events.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: three container kinds over one small shared contract, each
//!   piece reasoned about independently.
//! - Layers:
//!   - `Collection` trait: the contract every container implements —
//!     count/emptiness, clear, `one`, shallow `copy`, one-level
//!     `deep_copy`, order-preserving `filter`.
//!   - `Registry<K, E>`: per-instance listener storage, lazily allocated,
//!     delivering event envelopes synchronously in registration order.
//!   - Containers: `Liste` (contiguous `0..n` indices, renumbered on every
//!     structural mutation), `Set` (duplicate-free by linear equality
//!     scan), `Map` (slotmap entry storage + hashbrown hash index + an
//!     insertion-order vector).
//!
//! Constraints
//! - Single-threaded, synchronous, in-memory. No locking discipline
//!   because there is no concurrent access model; a concurrent host must
//!   serialize access per instance itself.
//! - Event delivery blocks until every registered listener has returned.
//!   Envelopes own clones of the affected element and are built only when
//!   a matching listener exists.
//! - Errors are local to the failing call and carry the attempted
//!   index/key. No rollback: a failure inside a bulk operation may leave
//!   the collection partially mutated.
//! - Read operations (`get`, iteration, `filter`, `map`, `slice`, `one`)
//!   never fire events; neither does `clear`.
//!
//! Identity semantics
//! - `Identity<T>` wraps `Rc<T>` and compares/hashes by object address.
//!   Used as a `Map` key it makes two structurally equal objects two
//!   distinct keys, and `keys()`/`key_of()` return the original
//!   instances. Used as an element it gives sets and sequences
//!   instance-identity membership.
//! - `Map` stores each entry's hash at insertion and indexes by the
//!   stored hash from then on; `K: Hash` never runs again for an entry.
//!
//! Copy depth
//! - `copy` is shallow: clones of the stored elements, so `Rc`-backed
//!   elements stay shared. `deep_copy` additionally replaces every
//!   directly contained collection (an `Element::copy_nested` hook) with
//!   an independent copy — one nesting level per call.
//!
//! Notes and non-goals
//! - Not a database: nothing is durable.
//! - `Set` iteration order is an artifact of the backing storage, not a
//!   contract.
//! - Mutating a collection during its own iteration is ruled out by
//!   borrowing; mutating it from inside a listener through an outer
//!   `Rc<RefCell<_>>` is unsupported and will panic on the nested borrow.
//! - Reentrancy: `Map` probing runs user `Eq`/`Hash`; a debug-only guard
//!   panics if that code re-enters the map's internals.

mod collection;
mod element;
mod error;
mod events;
mod identity;
mod liste;
mod map;
mod multi_iterator;
mod probe_guard;
mod registry;
mod set;

// Public surface
pub use collection::Collection;
pub use element::Element;
pub use error::{ListError, MapError};
pub use events::{ListEvent, ListEventKind, MapEvent, MapEventKind, SetEvent, SetEventKind};
pub use identity::Identity;
pub use liste::Liste;
pub use map::Map;
pub use multi_iterator::MultiIterator;
pub use set::Set;
