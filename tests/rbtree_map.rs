use std::collections::BTreeMap;

use akai_tree::rbtree_map;
use akai_tree::{Error, Map, RBTreeMap, SortedMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Keys are drawn from a range smaller than `TEST_SIZE` so that operations collide.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn ascending(n: i64) -> RBTreeMap<i64, i64> {
    let mut map = RBTreeMap::new();
    for i in 0..n {
        map.set(i, i);
    }
    map
}

fn top_max_keys<C>(map: &RBTreeMap<i64, i64, C>, limit: usize) -> Vec<i64> {
    let mut keys = Vec::new();
    map.top_max(limit, |k, _| {
        keys.push(*k);
        true
    });
    keys
}

fn top_min_keys<C>(map: &RBTreeMap<i64, i64, C>, limit: usize) -> Vec<i64> {
    let mut keys = Vec::new();
    map.top_min(limit, |k, _| {
        keys.push(*k);
        true
    });
    keys
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Set(i64, i64),
    Delete(i64),
    Remove(i64),
    Get(i64),
    GetOrDefault(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Set(k, v)),
        2 => key_strategy().prop_map(MapOp::Delete),
        2 => key_strategy().prop_map(MapOp::Remove),
        3 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::GetOrDefault),
        1 => Just(MapOp::First),
        1 => Just(MapOp::Last),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Differential runs against BTreeMap ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and BTreeMap and
    /// asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Set(k, v) => {
                    prop_assert_eq!(rb_map.set_with_prev(*k, *v), bt_map.insert(*k, *v), "set({}, {})", k, v);
                }
                MapOp::Delete(k) => {
                    prop_assert_eq!(rb_map.delete(k), bt_map.remove(k).is_some(), "delete({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetOrDefault(k) => {
                    prop_assert_eq!(rb_map.get_or_default(k), bt_map.get(k).copied().unwrap_or_default());
                }
                MapOp::First => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
                    prop_assert_eq!(rb_map.first().ok(), bt_map.values().next(), "first");
                }
                MapOp::Last => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
                    prop_assert_eq!(rb_map.last().ok(), bt_map.values().next_back(), "last");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
        }

        let rb_entries: Vec<_> = rb_map.iter().collect();
        let bt_entries: Vec<_> = bt_map.iter().collect();
        prop_assert_eq!(rb_entries, bt_entries);
    }

    /// Iteration in both directions matches BTreeMap after random insertions and deletions.
    #[test]
    fn iteration_matches_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..2_000),
        deletions in proptest::collection::vec(key_strategy(), 0..1_000),
    ) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();
        for k in &deletions {
            rb_map.delete(k);
            bt_map.remove(k);
        }

        prop_assert!(rb_map.iter().eq(bt_map.iter()));
        prop_assert!(rb_map.iter().rev().eq(bt_map.iter().rev()));
        prop_assert!(rb_map.keys().eq(bt_map.keys()));
        prop_assert!(rb_map.values().eq(bt_map.values()));
        prop_assert_eq!(rb_map.iter().len(), bt_map.len());

        // Strictly increasing keys.
        let keys: Vec<_> = rb_map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    /// Alternating front/back iteration visits every entry exactly once.
    #[test]
    fn double_ended_iteration_meets_in_the_middle(
        keys in proptest::collection::btree_set(key_strategy(), 0..500),
        pattern in proptest::collection::vec(any::<bool>(), 0..600),
    ) {
        let map: RBTreeMap<i64, ()> = keys.iter().map(|&k| (k, ())).collect();
        let mut iter = map.keys();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for from_front in pattern.into_iter().chain(std::iter::repeat(true)) {
            let next = if from_front { iter.next() } else { iter.next_back() };
            match next {
                Some(&k) if from_front => front.push(k),
                Some(&k) => back.push(k),
                None => break,
            }
        }
        back.reverse();
        front.extend(back);
        prop_assert_eq!(front, keys.into_iter().collect::<Vec<_>>());
    }

    /// `top_min`/`top_max` agree with taking a prefix of the sorted entries.
    #[test]
    fn bounded_traversal_matches_prefix(
        keys in proptest::collection::btree_set(key_strategy(), 0..300),
        limit in 0usize..400,
    ) {
        let map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let expected_min: Vec<_> = keys.iter().copied().take(limit).collect();
        let expected_max: Vec<_> = keys.iter().rev().copied().take(limit).collect();
        prop_assert_eq!(top_min_keys(&map, limit), expected_min);
        prop_assert_eq!(top_max_keys(&map, limit), expected_max);
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn set_and_get_ascending() {
    let map = ascending(1000);
    for i in 0..1000 {
        assert_eq!(map.try_get(&i), Ok(&i));
    }
    assert_eq!(map.len(), 1000);
}

#[test]
fn size_law() {
    let mut map = RBTreeMap::new();
    for i in (0..500).rev() {
        map.set(i, i.to_string());
    }
    assert_eq!(map.len(), 500);

    assert_eq!(map.set_with_prev(250, "again".to_string()), Some("250".to_string()));
    assert_eq!(map.len(), 500);
    assert_eq!(map[&250], "again");
}

#[test]
fn delete_first_half() {
    for max in 3..1000i64 {
        let mut map = ascending(max);
        for i in 0..max / 2 {
            assert!(map.delete(&i), "max={max}, delete({i})");
        }
        assert_eq!(map.len() as i64, max - max / 2);

        for i in max / 2..max {
            assert_eq!(map.try_get(&i), Ok(&i), "max={max}, get({i})");
        }
        for i in 0..max / 2 {
            assert_eq!(map.try_get(&i), Err(Error::NotFound), "max={max}, get({i})");
        }
    }
}

#[test]
fn top_max_of_a_thousand() {
    let map = ascending(1000);
    let expected: Vec<i64> = (900..1000).rev().collect();
    assert_eq!(top_max_keys(&map, 100), expected);
}

#[test]
fn top_min_limit_beyond_len() {
    let map = ascending(10);
    assert_eq!(top_min_keys(&map, 100), (0..10).collect::<Vec<_>>());
    assert_eq!(top_max_keys(&map, 100), (0..10).rev().collect::<Vec<_>>());
}

#[test]
fn top_min_stops_when_callback_refuses() {
    let map = ascending(50);
    let mut seen = Vec::new();
    map.top_min(20, |k, _| {
        seen.push(*k);
        seen.len() < 5
    });
    assert_eq!(seen, [0, 1, 2, 3, 4]);
}

#[test]
fn top_with_zero_limit_visits_nothing() {
    let map = ascending(10);
    assert!(top_min_keys(&map, 0).is_empty());
    assert!(top_max_keys(&map, 0).is_empty());
}

#[test]
fn range_and_range_prev_early_exit() {
    let map = ascending(100);

    let mut forward = Vec::new();
    map.range(|k, v| {
        assert_eq!(k, v);
        forward.push(*k);
        *k < 9
    });
    assert_eq!(forward, (0..10).collect::<Vec<_>>());

    let mut backward = Vec::new();
    map.range_prev(|k, _| {
        backward.push(*k);
        *k > 95
    });
    assert_eq!(backward, [99, 98, 97, 96, 95]);

    // Each call starts a fresh walk.
    let mut again = Vec::new();
    map.range(|k, _| {
        again.push(*k);
        again.len() < 3
    });
    assert_eq!(again, [0, 1, 2]);
}

#[test]
fn range_on_empty_map() {
    let map: RBTreeMap<i64, i64> = RBTreeMap::new();
    map.range(|_, _| panic!("empty map has no entries"));
    map.range_prev(|_, _| panic!("empty map has no entries"));
    assert!(top_min_keys(&map, 10).is_empty());
}

#[test]
fn first_and_last() {
    let mut map: RBTreeMap<i64, i64> = RBTreeMap::new();
    assert_eq!(map.first(), Err(Error::NotFound));
    assert_eq!(map.last(), Err(Error::NotFound));

    for k in [5, 1, 9, 3] {
        map.set(k, k);
    }
    assert_eq!(map.first(), Ok(&1));
    assert_eq!(map.last(), Ok(&9));

    map.delete(&1);
    map.delete(&9);
    assert_eq!(map.first(), Ok(&3));
    assert_eq!(map.last(), Ok(&5));
}

#[test]
fn deleting_absent_key_twice_is_a_no_op() {
    let mut map = ascending(64);
    let before: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();

    assert!(!map.delete(&1_000));
    assert!(!map.delete(&1_000));
    assert_eq!(map.remove(&-1), None);
    assert_eq!(map.len(), 64);

    let after: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(before, after);

    let mut empty: RBTreeMap<i64, i64> = RBTreeMap::new();
    assert!(!empty.delete(&0));
    assert!(!empty.delete(&0));
    assert!(empty.is_empty());
}

#[test]
fn get_distinguishes_absent_from_default() {
    let mut map = RBTreeMap::new();
    map.set("zero", 0);

    assert_eq!(map.get_or_default("zero"), 0);
    assert_eq!(map.get_or_default("missing"), 0);
    assert_eq!(map.get("zero"), Some(&0));
    assert_eq!(map.get("missing"), None);
    assert_eq!(map.try_get("missing"), Err(Error::NotFound));
}

#[test]
fn not_found_displays() {
    assert_eq!(Error::NotFound.to_string(), "rbtree: not found");
}

#[test]
fn get_mut_and_index() {
    let mut map = ascending(10);
    *map.get_mut(&3).unwrap() += 100;
    assert_eq!(map[&3], 103);
    assert!(map.get_mut(&30).is_none());
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = ascending(3);
    let _ = map[&3];
}

#[test]
fn borrowed_lookups() {
    let mut map: RBTreeMap<String, usize> = RBTreeMap::new();
    for word in ["delta", "alpha", "charlie", "bravo"] {
        map.set(word.to_string(), word.len());
    }
    assert_eq!(map.get("charlie"), Some(&7));
    assert_eq!(map.get_key_value("alpha"), Some((&"alpha".to_string(), &5)));
    assert!(map.delete("delta"));
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), ["alpha", "bravo", "charlie"]);
}

#[test]
fn case_insensitive_comparator() {
    fn fold(a: &String, b: &String) -> std::cmp::Ordering {
        a.to_lowercase().cmp(&b.to_lowercase())
    }

    let mut map = RBTreeMap::with_comparator(fold);
    map.set("Banana".to_string(), 1);
    map.set("apple".to_string(), 2);
    map.set("APPLE".to_string(), 3);
    map.set("cherry".to_string(), 4);

    assert_eq!(map.len(), 3);
    // The first spelling of a key is the one that is kept.
    assert_eq!(
        map.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
        [("apple", 3), ("Banana", 1), ("cherry", 4)]
    );
    assert_eq!(map.get(&"BANANA".to_string()), Some(&1));
    assert!(map.delete(&"Cherry".to_string()));
    assert_eq!(map.last(), Ok(&1));
}

#[test]
fn reversed_comparator_flips_traversals() {
    let mut map = RBTreeMap::with_comparator(|a: &i64, b: &i64| b.cmp(a));
    for i in 0..20 {
        map.set(i, i);
    }
    assert_eq!(map.first(), Ok(&19));
    assert_eq!(map.last(), Ok(&0));
    assert_eq!(top_min_keys(&map, 3), [19, 18, 17]);
    assert_eq!(top_max_keys(&map, 3), [0, 1, 2]);
}

#[test]
fn pop_until_empty() {
    let mut map = ascending(100);
    let mut low = 0;
    let mut high = 99;
    while !map.is_empty() {
        assert_eq!(map.pop_first(), Some((low, low)));
        low += 1;
        if let Some((k, _)) = map.pop_last() {
            assert_eq!(k, high);
            high -= 1;
        }
    }
    assert_eq!(map.pop_first(), None);
    assert_eq!(map.pop_last(), None);
}

#[test]
fn owning_iterators() {
    let map: RBTreeMap<i64, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    assert_eq!(map.clone().into_iter().collect::<Vec<_>>(), [(1, 'a'), (2, 'b'), (3, 'c')]);
    assert_eq!(map.clone().into_iter().rev().next(), Some((3, 'c')));
    assert_eq!(map.clone().into_keys().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(map.into_values().collect::<Vec<_>>(), ['a', 'b', 'c']);
}

#[test]
fn clone_is_independent() {
    let mut original = ascending(32);
    let copy = original.clone();
    original.delete(&0);
    original.set(100, 100);

    assert_eq!(copy.len(), 32);
    assert_eq!(copy.first(), Ok(&0));
    assert_ne!(original, copy);
}

#[test]
fn equality_ignores_insertion_order() {
    let a: RBTreeMap<i64, i64> = (0..50).map(|i| (i, i)).collect();
    let b: RBTreeMap<i64, i64> = (0..50).rev().map(|i| (i, i)).collect();
    assert_eq!(a, b);
}

#[test]
fn extend_overwrites() {
    let mut map = RBTreeMap::from([(1, 1), (2, 2)]);
    map.extend([(2, 20), (3, 30)]);
    let other = BTreeMap::from([(4, 40)]);
    map.extend(other.iter());
    assert_eq!(format!("{map:?}"), "{1: 1, 2: 20, 3: 30, 4: 40}");
}

#[test]
fn capacity_is_reused_after_removals() {
    let mut map: RBTreeMap<i64, i64> = RBTreeMap::with_capacity(64);
    let capacity = map.capacity();
    assert!(capacity >= 64);
    for round in 0..10 {
        for i in 0..64 {
            map.set(i + round, i);
        }
        for i in 0..64 {
            map.delete(&(i + round));
        }
    }
    assert!(map.is_empty());
    assert_eq!(map.capacity(), capacity);
}

#[test]
fn values_are_dropped_on_remove_and_clear() {
    use std::rc::Rc;

    let tracker = Rc::new(());
    let mut map = RBTreeMap::new();
    for i in 0..10 {
        map.set(i, Rc::clone(&tracker));
    }
    assert_eq!(Rc::strong_count(&tracker), 11);

    map.delete(&0);
    drop(map.remove(&1));
    map.set(2, Rc::clone(&tracker));
    assert_eq!(Rc::strong_count(&tracker), 9);

    map.clear();
    assert_eq!(Rc::strong_count(&tracker), 1);
}

#[test]
fn default_iterators_types() {
    let map = ascending(4);
    let iter: rbtree_map::Iter<'_, i64, i64> = map.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(format!("{:?}", map.keys()), "[0, 1, 2, 3]");
    assert_eq!(format!("{:?}", map.values().rev().collect::<Vec<_>>()), "[3, 2, 1, 0]");
}

#[test]
fn usable_through_the_map_traits() {
    fn exercise<M: SortedMap<i64, i64>>(map: &mut M) -> (usize, Result<i64, Error>, Vec<i64>) {
        for i in 0..10 {
            map.set(i, i * 2);
        }
        map.delete(&0);
        let mut top = Vec::new();
        map.top_max(2, |k, _| {
            top.push(*k);
            true
        });
        (map.len(), map.first().copied(), top)
    }

    let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
    let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();
    let rb = exercise(&mut rb_map);
    assert_eq!(rb, (9, Ok(2), vec![9, 8]));
    assert_eq!(rb, exercise(&mut bt_map));
    assert_eq!(Map::get(&rb_map, &4), Some(&8));
}
