//! `Map`: a key-value map over arbitrary key types.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};

use crate::collection::Collection;
use crate::element::Element;
use crate::error::MapError;
use crate::events::{MapEvent, MapEventKind};
use crate::liste::Liste;
use crate::probe_guard::ProbeGuard;
use crate::registry::Registry;
use crate::set::Set;

#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// An insertion-ordered key→value container.
///
/// Entries live in a slot map behind generational keys; a hash table
/// indexes them by a hash stored at insertion, so `K: Hash` is never
/// invoked again for an entry once it is in (probing only runs `K: Eq`).
/// A side vector records insertion order, which all iteration follows;
/// overwriting an existing key keeps its position and its stored key.
///
/// Keys compare however their `Eq`/`Hash` impls say: plain values
/// structurally, [`Identity`] keys by object instance, so two equal but
/// distinct objects are two distinct keys and `keys()`/`key_of()` hand
/// back the original instances.
///
/// # Example
///
/// ```
/// use eventful_collections::{Collection, Map};
///
/// let mut map: Map<&str, i32> = Map::new();
/// map.set("a", 1);
/// map.set("b", 2);
/// assert_eq!(map.get(&"a"), Ok(&1));
/// assert_eq!(map.values().count(), 2);
/// ```
pub struct Map<K, V, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Slot<K, V>>,
    order: Vec<DefaultKey>,
    listeners: Registry<MapEventKind, MapEvent<K, V>>,
    guard: ProbeGuard,
}

impl<K, V> Map<K, V>
where
    K: Element + Eq + Hash,
    V: Element,
{
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            order: Vec::new(),
            listeners: Registry::new(),
            guard: ProbeGuard::new(),
        }
    }

    /// Registers a listener for one event kind. Invoked synchronously, in
    /// registration order, for every matching event fired from now on.
    pub fn on<F>(&mut self, kind: MapEventKind, listener: F)
    where
        F: FnMut(&MapEvent<K, V>) + 'static,
    {
        self.listeners.add(kind, Box::new(listener));
    }

    fn make_hash(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    fn find_hashed(&self, hash: u64, key: &K) -> Option<DefaultKey> {
        let _probe = self.guard.probe();
        self.index
            .find(hash, |&k| {
                self.slots.get(k).map(|s| s.key == *key).unwrap_or(false)
            })
            .copied()
    }

    fn find(&self, key: &K) -> Option<DefaultKey> {
        self.find_hashed(self.make_hash(key), key)
    }

    // Insert an entry known to be absent, reusing an already computed hash.
    // Used when rebuilding (copy-like operations over unique keys).
    fn insert_unchecked(&mut self, key: K, value: V, hash: u64) {
        let k = self.slots.insert(Slot { key, value, hash });
        self.index
            .insert_unique(hash, k, |&kk| {
                self.slots.get(kk).map(|s| s.hash).unwrap_or(0)
            });
        self.order.push(k);
    }

    /// Stores `value` under `key`, overwriting any present value while
    /// keeping the entry's insertion position and originally stored key.
    /// Fires `Set(key, value)` — also on overwrite.
    pub fn set(&mut self, key: K, value: V) {
        let notify = if self.listeners.wants(MapEventKind::Set) {
            Some((key.clone(), value.clone()))
        } else {
            None
        };

        let hash = self.make_hash(&key);
        let slot = Slot { key, value, hash };
        {
            let _probe = self.guard.probe();
            match self.index.entry(
                hash,
                |&k| self.slots.get(k).map(|s| s.key == slot.key).unwrap_or(false),
                |&k| self.slots.get(k).map(|s| s.hash).unwrap_or(0),
            ) {
                hashbrown::hash_table::Entry::Occupied(occupied) => {
                    let k = *occupied.get();
                    self.slots[k].value = slot.value;
                }
                hashbrown::hash_table::Entry::Vacant(vacant) => {
                    let k = self.slots.insert(slot);
                    let _ = vacant.insert(k);
                    self.order.push(k);
                }
            }
        }

        if let Some((key, value)) = notify {
            let event = MapEvent::new(MapEventKind::Set, key, value);
            self.listeners.fire(MapEventKind::Set, &event);
        }
    }

    /// The value stored under `key`. Probe with [`has`](Map::has) first
    /// when the key may be absent.
    pub fn get(&self, key: &K) -> Result<&V, MapError<K>>
    where
        K: fmt::Debug,
    {
        match self.find(key) {
            Some(k) => Ok(&self.slots[k].value),
            None => Err(MapError::KeyNotFound { key: key.clone() }),
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, MapError<K>>
    where
        K: fmt::Debug,
    {
        match self.find(key) {
            Some(k) => Ok(&mut self.slots[k].value),
            None => Err(MapError::KeyNotFound { key: key.clone() }),
        }
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes and returns the value stored under `key`. Fires
    /// `Remove(key, value)` with the originally stored key.
    pub fn remove(&mut self, key: &K) -> Result<V, MapError<K>>
    where
        K: fmt::Debug,
    {
        let hash = self.make_hash(key);
        let k = self
            .find_hashed(hash, key)
            .ok_or_else(|| MapError::KeyNotFound { key: key.clone() })?;

        // `k` came out of the index just above; both unlinks must succeed.
        let slot = self.slots.remove(k).unwrap();
        {
            let _probe = self.guard.probe();
            self.index.find_entry(hash, |&kk| kk == k).unwrap().remove();
        }
        self.order.retain(|&kk| kk != k);

        if self.listeners.wants(MapEventKind::Remove) {
            let event = MapEvent::new(MapEventKind::Remove, slot.key, slot.value.clone());
            self.listeners.fire(MapEventKind::Remove, &event);
        }
        Ok(slot.value)
    }

    /// The original key instances as a set, in insertion order.
    pub fn keys(&self) -> Set<K> {
        self.pairs().map(|(key, _)| key.clone()).collect()
    }

    /// The stored values as a set. Duplicate values collapse under the
    /// set's uniqueness rule.
    pub fn values(&self) -> Set<V>
    where
        V: PartialEq,
    {
        self.pairs().map(|(_, value)| value.clone()).collect()
    }

    /// The originally stored key of the first value equal to `value`.
    pub fn key_of(&self, value: &V) -> Option<K>
    where
        V: PartialEq,
    {
        self.pairs()
            .find(|(_, v)| *v == value)
            .map(|(key, _)| key.clone())
    }

    /// A new map restricted to the requested keys that are present.
    /// Absent requested keys are silently skipped.
    pub fn select(&self, keys: &Set<K>) -> Map<K, V, S> {
        let mut selected = Map::with_hasher(self.hasher.clone());
        for key in keys.iter() {
            if let Some(k) = self.find(key) {
                let slot = &self.slots[k];
                selected.insert_unchecked(slot.key.clone(), slot.value.clone(), slot.hash);
            }
        }
        selected
    }

    /// Applies [`set`](Map::set) for every pair of `other`, in its
    /// iteration order; later duplicate keys overwrite earlier ones.
    pub fn merge(&mut self, other: Map<K, V, S>) {
        for (key, value) in other {
            self.set(key, value);
        }
    }

    /// The values as a sequence, keys discarded.
    pub fn as_list(&self) -> Liste<V> {
        self.pairs().map(|(_, value)| value.clone()).collect()
    }

    /// A new map with every value replaced by `transform`'s result, same
    /// keys, same order. Fires nothing.
    pub fn map<W, F>(&self, mut transform: F) -> Map<K, W, S>
    where
        W: Element,
        F: FnMut(&V, &K) -> W,
    {
        let mut mapped = Map::with_hasher(self.hasher.clone());
        for k in &self.order {
            let slot = &self.slots[*k];
            mapped.insert_unchecked(slot.key.clone(), transform(&slot.value, &slot.key), slot.hash);
        }
        mapped
    }

    fn pairs(&self) -> impl Iterator<Item = (&K, &V)> {
        self.order.iter().filter_map(|k| {
            self.slots.get(*k).map(|slot| (&slot.key, &slot.value))
        })
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pairs()
    }
}

impl<K, V, S> Collection for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    type Key = K;
    type Item = V;

    fn count(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.order.clear();
    }

    fn one(&self) -> Option<&V> {
        self.order.first().map(|k| &self.slots[*k].value)
    }

    fn copy(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            index: self.index.clone(),
            slots: self.slots.clone(),
            order: self.order.clone(),
            listeners: Registry::new(),
            guard: ProbeGuard::new(),
        }
    }

    fn deep_copy(&self) -> Self {
        let mut copy = self.copy();
        for k in &copy.order {
            let slot = &mut copy.slots[*k];
            slot.value = slot.value.copy_nested();
        }
        copy
    }

    fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&V, &K) -> bool,
    {
        let mut filtered = Map::with_hasher(self.hasher.clone());
        for k in &self.order {
            let slot = &self.slots[*k];
            if predicate(&slot.value, &slot.key) {
                filtered.insert_unchecked(slot.key.clone(), slot.value.clone(), slot.hash);
            }
        }
        filtered
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Element + Eq + Hash,
    V: Element,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a shallow copy: same entries, fresh listener registry.
impl<K, V, S> Clone for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<K, V, S> fmt::Debug for Map<K, V, S>
where
    K: Element + Eq + Hash + fmt::Debug,
    V: Element + fmt::Debug,
    S: BuildHasher + Clone + Default,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs()).finish()
    }
}

/// Content equality, insensitive to insertion order.
impl<K, V, S> PartialEq for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element + PartialEq,
    S: BuildHasher + Clone + Default,
{
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self.pairs().all(|(key, value)| {
                other.find(key).map(|k| other.slots[k].value == *value) == Some(true)
            })
    }
}

/// Duplicate keys resolve later-wins, per the source's iteration order.
impl<K, V, S> FromIterator<(K, V)> for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::with_hasher(S::default());
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V, S> Extend<(K, V)> for Map<K, V, S>
where
    K: Element + Eq + Hash,
    V: Element,
    S: BuildHasher + Clone + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// Consuming iteration in insertion order.
pub struct IntoIter<K, V> {
    order: std::vec::IntoIter<DefaultKey>,
    slots: SlotMap<DefaultKey, Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let k = self.order.next()?;
        let slot = self.slots.remove(k)?;
        Some((slot.key, slot.value))
    }
}

impl<K, V, S> IntoIterator for Map<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            order: self.order.into_iter(),
            slots: self.slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded_events<K, V>(
        map: &mut Map<K, V>,
        kind: MapEventKind,
    ) -> Rc<RefCell<Vec<MapEvent<K, V>>>>
    where
        K: Element + Eq + Hash + 'static,
        V: Element + 'static,
    {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        map.on(kind, move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    /// Invariant: set then get round-trips; missing keys are errors that
    /// carry the attempted key.
    #[test]
    fn set_get_remove_round_trip() {
        let mut map: Map<String, i32> = Map::new();
        map.set("a".to_string(), 1);
        assert_eq!(map.get(&"a".to_string()), Ok(&1));
        assert!(map.has(&"a".to_string()));

        assert_eq!(
            map.get(&"x".to_string()),
            Err(MapError::KeyNotFound {
                key: "x".to_string()
            })
        );
        assert_eq!(map.remove(&"a".to_string()), Ok(1));
        assert!(!map.has(&"a".to_string()));
        assert_eq!(
            map.remove(&"a".to_string()),
            Err(MapError::KeyNotFound {
                key: "a".to_string()
            })
        );
    }

    /// Invariant: get_mut edits the stored value in place and misses with
    /// the same error as get.
    #[test]
    fn get_mut_edits_in_place() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);

        *map.get_mut(&"a").unwrap() += 10;
        assert_eq!(map.get(&"a"), Ok(&11));

        assert_eq!(
            map.get_mut(&"x"),
            Err(MapError::KeyNotFound { key: "x" })
        );
    }

    /// Invariant: overwriting fires Set (no suppression) and keeps the
    /// entry's insertion position.
    #[test]
    fn overwrite_fires_and_keeps_position() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        map.set("b", 2);
        let log = recorded_events(&mut map, MapEventKind::Set);

        map.set("a", 10);
        assert_eq!(map.count(), 2);

        let events = log.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!((*events[0].key(), *events[0].value()), ("a", 10));

        let keys: Vec<&str> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["a", "b"], "overwrite must not reorder");
        assert_eq!(map.get(&"a"), Ok(&10));
    }

    /// Invariant: remove fires Remove with the stored key and value.
    #[test]
    fn remove_event_carries_entry() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        let log = recorded_events(&mut map, MapEventKind::Remove);

        assert_eq!(map.remove(&"a"), Ok(1));
        let events = log.borrow();
        assert_eq!((*events[0].key(), *events[0].value()), ("a", 1));
    }

    /// Invariant: iteration follows insertion order across overwrites and
    /// removals.
    #[test]
    fn insertion_order_is_stable() {
        let mut map: Map<&str, i32> = Map::new();
        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            map.set(k, v);
        }
        map.set("b", 20);
        map.remove(&"c").unwrap();

        let pairs: Vec<(&str, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![("a", 1), ("b", 20), ("d", 4)]);
        assert_eq!(map.as_list().to_vec(), vec![1, 20, 4]);
    }

    /// Invariant: duplicate values collapse in the values() set.
    #[test]
    fn values_collapse_duplicates() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        map.set("b", 2);
        map.set("c", 1);
        let values = map.values();
        assert_eq!(values.count(), 2);
        assert!(values.contains(&1));
        assert!(values.contains(&2));
    }

    /// Invariant: object-identity keys — two structurally equal objects are
    /// distinct keys, and key_of returns the original instance.
    #[test]
    fn identity_keys_are_distinct() {
        let first = Identity::new("dup".to_string());
        let second = Identity::new("dup".to_string());

        let mut map: Map<Identity<String>, i32> = Map::new();
        map.set(first.clone(), 1);
        map.set(second.clone(), 2);
        assert_eq!(map.count(), 2);
        assert_eq!(map.get(&first), Ok(&1));
        assert_eq!(map.get(&second), Ok(&2));

        let key = map.key_of(&2).unwrap();
        assert!(key.same(&second), "key_of must return the original instance");
        assert!(!key.same(&first));

        let keys = map.keys();
        assert!(keys.contains(&first));
        assert!(keys.contains(&second));
    }

    /// Invariant: select keeps requested present keys and silently skips
    /// absent ones; select over keys() reproduces the map.
    #[test]
    fn select_skips_missing() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        map.set("b", 2);

        let mut wanted: Set<&str> = Set::new();
        wanted.put("b");
        wanted.put("nope");
        let selected = map.select(&wanted);
        assert_eq!(selected.count(), 1);
        assert_eq!(selected.get(&"b"), Ok(&2));

        assert_eq!(map.select(&map.keys()), map);
    }

    /// Invariant: merge applies set per pair in the other map's order,
    /// overwriting on conflict.
    #[test]
    fn merge_overwrites_in_order() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        map.set("b", 2);

        let mut other: Map<&str, i32> = Map::new();
        other.set("b", 20);
        other.set("c", 3);

        let log = recorded_events(&mut map, MapEventKind::Set);
        map.merge(other);

        assert_eq!(map.get(&"b"), Ok(&20));
        assert_eq!(map.get(&"c"), Ok(&3));
        assert_eq!(log.borrow().len(), 2);
    }

    /// Invariant: filter and map keep keys, order and stored hashes and
    /// fire nothing.
    #[test]
    fn filter_and_map_keep_keys() {
        let mut map: Map<&str, i32> = Map::new();
        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            map.set(k, v);
        }
        let log = recorded_events(&mut map, MapEventKind::Set);

        let odd = map.filter(|value, _| value % 2 == 1);
        let pairs: Vec<(&str, i32)> = odd.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![("a", 1), ("c", 3)]);

        let named = map.map(|value, key| format!("{key}={value}"));
        assert_eq!(named.get(&"b"), Ok(&"b=2".to_string()));
        assert_eq!(named.count(), 3);

        assert!(log.borrow().is_empty());
    }

    /// Invariant: from_iter resolves duplicate keys later-wins.
    #[test]
    fn from_iter_later_wins() {
        let map: Map<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(map.count(), 2);
        assert_eq!(map.get(&"a"), Ok(&3));
    }

    /// Invariant: clear discards everything silently and the map remains
    /// usable.
    #[test]
    fn clear_then_reuse() {
        let mut map: Map<&str, i32> = Map::new();
        map.set("a", 1);
        let log = recorded_events(&mut map, MapEventKind::Remove);

        map.clear();
        assert!(map.is_empty());
        assert!(log.borrow().is_empty());

        map.set("a", 2);
        assert_eq!(map.get(&"a"), Ok(&2));
    }

    /// Invariant: keys() of an identity-keyed map round-trips through
    /// select() even though the keys have equal content.
    #[test]
    fn identity_select_round_trip() {
        let a = Identity::new(1);
        let b = Identity::new(1);
        let mut map: Map<Identity<i32>, &str> = Map::new();
        map.set(a, "first");
        map.set(b, "second");

        let again = map.select(&map.keys());
        assert_eq!(again, map);
        assert_eq!(again.count(), 2);
    }
}
