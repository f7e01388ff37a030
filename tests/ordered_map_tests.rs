//! Unit tests for OrderedMap.

use perennial::OrderedMap;
use perennial::compare::{Natural, Reversed};
use rstest::rstest;

fn greetings() -> OrderedMap<i32, String> {
    OrderedMap::new()
        .put(1, "Howdy!".to_string())
        .put(3, "Cromity".to_string())
        .put(2, "Bingo!".to_string())
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map() {
    let map: OrderedMap<i32, String> = OrderedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.first(), None);
}

#[rstest]
fn test_from_iterator_last_value_wins() {
    let map: OrderedMap<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&3));
}

// =============================================================================
// Put and Get Tests
// =============================================================================

#[rstest]
fn test_scan_yields_entries_by_key() {
    let map = greetings();
    let entries: Vec<(i32, &str)> = map
        .scan()
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![(1, "Howdy!"), (2, "Bingo!"), (3, "Cromity")]
    );
}

#[rstest]
fn test_put_overwrites_and_preserves_original() {
    let original = greetings();
    let updated = original.put(3, "Crumbs".to_string());

    assert_eq!(updated.len(), 3);
    assert_eq!(updated.get(&3).map(String::as_str), Some("Crumbs"));
    assert_eq!(original.get(&3).map(String::as_str), Some("Cromity"));
}

#[rstest]
fn test_get_key_value() {
    let map = greetings();
    assert_eq!(
        map.get_key_value(&2).map(|(key, value)| (*key, value.as_str())),
        Some((2, "Bingo!"))
    );
    assert_eq!(map.get_key_value(&9), None);
}

#[rstest]
fn test_contains_value_scans_all_entries() {
    let map = greetings();
    assert!(map.contains_value(&"Cromity".to_string()));
    assert!(!map.contains_value(&"Nope".to_string()));
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_then_get_is_none() {
    let map = greetings().remove(&2);
    assert_eq!(map.get(&2), None);
    assert_eq!(map.len(), 2);
}

#[rstest]
fn test_remove_all_keys() {
    let map = greetings().remove_all(vec![1, 2, 3]);
    assert!(map.is_empty());
}

// =============================================================================
// Scan Tests
// =============================================================================

#[rstest]
#[case(2, true, vec![2, 1])]
#[case(2, false, vec![1])]
#[case(10, true, vec![3, 2, 1])]
fn test_scan_from_reversed(#[case] from: i32, #[case] inclusive: bool, #[case] expected: Vec<i32>) {
    let map = greetings();
    let keys: Vec<i32> = map
        .scan_from_reversed(&from, inclusive)
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(keys, expected);
}

#[rstest]
fn test_range_reversed() {
    let map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key * key)).collect();
    let values: Vec<i32> = map.range_reversed(3..=5).map(|(_, value)| *value).collect();
    assert_eq!(values, vec![25, 16, 9]);
}

#[rstest]
fn test_keys_and_values() {
    let map = greetings();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(
        map.values().map(String::as_str).collect::<Vec<_>>(),
        vec!["Howdy!", "Bingo!", "Cromity"]
    );
}

#[rstest]
fn test_reversed_key_order() {
    let map = OrderedMap::with_comparator(Reversed(Natural)).put_all([(1, 'a'), (3, 'c'), (2, 'b')]);
    assert_eq!(map.first(), Some((&3, &'c')));
    assert_eq!(map.last(), Some((&1, &'a')));
    let keys: Vec<i32> = map.scan_from(&2, true).map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![2, 1]);
}

// =============================================================================
// Trait Tests
// =============================================================================

#[rstest]
fn test_equality_ignores_insertion_order() {
    let left = OrderedMap::new().put(1, 'a').put(2, 'b');
    let right = OrderedMap::new().put(2, 'b').put(1, 'a');
    assert_eq!(left, right);
    assert_ne!(left, right.put(2, 'z'));
}

#[rstest]
fn test_iterate_by_reference() {
    let map = greetings();
    let mut count = 0;
    for (key, value) in &map {
        assert_eq!(map.get(key), Some(value));
        count += 1;
    }
    assert_eq!(count, 3);
}
