use std::cell::RefCell;
use std::rc::Rc;

use eventful_collections::{
    Collection, Identity, ListEventKind, Liste, Map, MultiIterator, Set, SetEventKind,
};

#[test]
fn copy_is_structurally_independent() {
    let mut original = Liste::from_vec(vec![1, 2, 3]);
    let mut copy = original.copy();

    copy.append(4);
    original.remove(0).expect("index 0 present");

    assert_eq!(original.to_vec(), vec![2, 3]);
    assert_eq!(copy.to_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn copy_shares_nested_collections_deep_copy_detaches_them() {
    let nested: Rc<RefCell<Liste<i32>>> = Rc::new(RefCell::new(Liste::from_vec(vec![1])));
    let mut original: Liste<Rc<RefCell<Liste<i32>>>> = Liste::new();
    original.append(nested.clone());

    let shallow = original.copy();
    let deep = original.deep_copy();

    // Mutate the nested list through the original handle.
    nested.borrow_mut().append(2);

    let shared = shallow.get(0).expect("copied element");
    assert_eq!(shared.borrow().count(), 2, "shallow copy shares the nested list");

    let detached = deep.get(0).expect("deep-copied element");
    assert_eq!(detached.borrow().count(), 1, "deep copy detaches the nested list");
}

#[test]
fn deep_copy_detaches_one_level_only() {
    let innermost: Rc<RefCell<Liste<i32>>> = Rc::new(RefCell::new(Liste::from_vec(vec![1])));
    // A list nested inside a set nested inside a list.
    let inner: Rc<RefCell<Liste<Rc<RefCell<Liste<i32>>>>>> =
        Rc::new(RefCell::new(Liste::new()));
    inner.borrow_mut().append(innermost.clone());

    let mut outer: Liste<Rc<RefCell<Liste<Rc<RefCell<Liste<i32>>>>>>> = Liste::new();
    outer.append(inner.clone());

    let deep = outer.deep_copy();
    let middle = deep.get(0).expect("middle list");
    assert!(
        !Rc::ptr_eq(&inner, middle),
        "direct child must be detached"
    );
    let leaf = middle.borrow().get(0).expect("leaf list").clone();
    assert!(
        Rc::ptr_eq(&innermost, &leaf),
        "grandchildren stay shared until their own deep_copy"
    );
}

#[test]
fn identity_elements_compare_by_instance() {
    let a = Identity::new("x".to_string());
    let b = Identity::new("x".to_string());

    let mut members: Set<Identity<String>> = Set::new();
    members.put(a.clone());
    members.put(b.clone());
    members.put(a.clone());
    assert_eq!(members.count(), 2, "equal content, distinct instances");

    let mut list: Liste<Identity<String>> = Liste::new();
    list.append(a.clone());
    list.append(b.clone());
    assert_eq!(list.index_of(&b), Some(1));
}

#[test]
fn map_views_as_set_and_sequence() {
    let mut map: Map<String, i32> = Map::new();
    map.set("a".to_string(), 1);
    map.set("b".to_string(), 2);
    map.set("c".to_string(), 2);

    let keys = map.keys();
    assert_eq!(keys.count(), 3);
    assert!(keys.contains(&"c".to_string()));

    // Duplicate values collapse in the set view but not in the sequence.
    assert_eq!(map.values().count(), 2);
    assert_eq!(map.as_list().to_vec(), vec![1, 2, 2]);

    assert_eq!(map.key_of(&2), Some("b".to_string()));
    assert_eq!(map.key_of(&9), None);
}

#[test]
fn events_stop_at_the_instance_boundary() {
    let fired = Rc::new(RefCell::new(0u32));

    let mut list: Liste<i32> = Liste::new();
    let sink = fired.clone();
    list.on(ListEventKind::Create, move |_| *sink.borrow_mut() += 1);

    list.append(1);
    assert_eq!(*fired.borrow(), 1);

    // Copies carry elements, never listeners.
    let mut copy = list.copy();
    copy.append(2);
    assert_eq!(*fired.borrow(), 1);

    // Filtering into a new collection fires nothing either.
    let filtered = list.filter(|_, _| true);
    assert_eq!(filtered.count(), 1);
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn set_put_all_from_other_collections() {
    let list = Liste::from_vec(vec![1, 2, 2, 3]);
    let mut set: Set<i32> = Set::new();
    set.put_all(list.to_vec());
    assert_eq!(set.count(), 3);

    let mut map: Map<&str, i32> = Map::new();
    map.set("a", 3);
    map.set("b", 4);
    set.put_all(map.as_list());
    assert_eq!(set.count(), 4);
}

#[test]
fn set_events_fire_only_on_change() {
    let puts = Rc::new(RefCell::new(Vec::new()));
    let mut set: Set<i32> = Set::new();
    let sink = puts.clone();
    set.on(SetEventKind::Put, move |event| {
        sink.borrow_mut().push(*event.element())
    });

    set.put(1);
    set.put(2);
    set.put(2);
    assert_eq!(set.count(), 2);
    assert_eq!(*puts.borrow(), vec![1, 2]);
}

#[test]
fn multi_iterator_spans_collection_iterators() {
    let first = Liste::from_vec(vec![1, 2]);
    let empty: Liste<i32> = Liste::new();
    let second = Liste::from_vec(vec![3]);

    let mut chained = MultiIterator::new();
    chained.add(first.into_iter());
    chained.add(empty.into_iter());
    chained.add(second.into_iter());

    assert_eq!(chained.collect::<Vec<i32>>(), vec![1, 2, 3]);
}

#[test]
fn map_of_nested_maps_deep_copy() {
    let inner: Rc<RefCell<Map<String, i32>>> = Rc::new(RefCell::new(Map::new()));
    inner.borrow_mut().set("count".to_string(), 1);

    let mut outer: Map<String, Rc<RefCell<Map<String, i32>>>> = Map::new();
    outer.set("inner".to_string(), inner.clone());

    let deep = outer.deep_copy();
    inner.borrow_mut().set("count".to_string(), 2);

    let detached = deep.get(&"inner".to_string()).expect("nested map");
    assert_eq!(detached.borrow().get(&"count".to_string()), Ok(&1));
}
