//! Unit tests for BalancedTree.

use perennial::compare::{Natural, Reversed, by_key};
use perennial::{BalancedTree, Direction, InvariantViolation};
use rstest::rstest;
use std::ops::Bound;

fn items<T: Copy, C>(tree: &BalancedTree<T, C>) -> Vec<T> {
    tree.scan().copied().collect()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_tree() {
    let tree: BalancedTree<i32> = BalancedTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.scan().next(), None);
}

#[rstest]
fn test_default_equals_new() {
    assert_eq!(BalancedTree::<i32>::default(), BalancedTree::new());
}

#[rstest]
fn test_from_iterator() {
    let tree: BalancedTree<i32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    assert_eq!(items(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
}

#[rstest]
fn test_from_iterator_with_default_comparator() {
    let tree: BalancedTree<i32, Reversed<Natural>> = (1..=4).collect();
    assert_eq!(items(&tree), vec![4, 3, 2, 1]);
}

// =============================================================================
// Insert Tests
// =============================================================================

#[rstest]
fn test_ascending_inserts_respect_height_bound() {
    let mut tree = BalancedTree::new();
    for item in 1..=100 {
        tree = tree.insert(item);
        assert_eq!(tree.validate(), Ok(()));
    }
    assert!(tree.height() <= 10, "height was {}", tree.height());
    assert_eq!(items(&tree), (1..=100).collect::<Vec<_>>());
}

#[rstest]
fn test_scan_of_mixed_inserts() {
    let tree = BalancedTree::new().insert_all([5, 3, 8, 1, 4, 7, 9]);
    assert_eq!(items(&tree), vec![1, 3, 4, 5, 7, 8, 9]);
}

#[rstest]
#[case(vec![1, 1, 1], 1)]
#[case(vec![2, 1, 2, 1], 2)]
#[case(vec![], 0)]
fn test_duplicate_inserts_do_not_grow(#[case] inserted: Vec<i32>, #[case] expected: usize) {
    assert_eq!(BalancedTree::new().insert_all(inserted).len(), expected);
}

#[rstest]
fn test_insert_all_later_items_win() {
    let tree = BalancedTree::ordered_by(by_key(|entry: &(char, u32)| entry.0))
        .insert_all([('a', 1), ('b', 2), ('a', 3)]);
    assert_eq!(items(&tree), vec![('a', 3), ('b', 2)]);
}

#[rstest]
fn test_insert_preserves_original() {
    let original = BalancedTree::new().insert_all([1, 2, 3]);
    let updated = original.insert(4);
    assert_eq!(items(&original), vec![1, 2, 3]);
    assert_eq!(items(&updated), vec![1, 2, 3, 4]);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_missing_item_keeps_contents() {
    let tree = BalancedTree::new().insert_all(1..=5);
    assert_eq!(tree.remove(&0), tree);
    assert_eq!(BalancedTree::<i32>::new().remove(&1).len(), 0);
}

#[rstest]
fn test_remove_root_repeatedly() {
    let mut tree = BalancedTree::new().insert_all(0..64);
    loop {
        let Some(&middle) = tree.scan().nth(tree.len() / 2) else {
            break;
        };
        tree = tree.remove(&middle);
        assert_eq!(tree.validate(), Ok(()));
    }
    assert!(tree.is_empty());
}

#[rstest]
fn test_remove_all_ignores_missing() {
    let tree = BalancedTree::new().insert_all(1..=10);
    let removed = tree.remove_all(vec![2, 4, 6, 8, 10, 12]);
    assert_eq!(items(&removed), vec![1, 3, 5, 7, 9]);
}

#[rstest]
fn test_remove_all_then_insert_all() {
    let tree = BalancedTree::new()
        .insert_all(0..100)
        .remove_all(0..100)
        .insert_all([7, 3]);
    assert_eq!(items(&tree), vec![3, 7]);
    assert_eq!(tree.validate(), Ok(()));
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[rstest]
#[case(1, true)]
#[case(5, true)]
#[case(6, false)]
#[case(-1, false)]
fn test_contains(#[case] item: i32, #[case] expected: bool) {
    let tree = BalancedTree::new().insert_all(1..=5);
    assert_eq!(tree.contains(&item), expected);
}

#[rstest]
fn test_find_returns_stored_payload() {
    let tree = BalancedTree::ordered_by(by_key(|entry: &(u32, &str)| entry.0))
        .insert((10, "ten"))
        .insert((20, "twenty"));
    assert_eq!(tree.find(&(20, "")), Some(&(20, "twenty")));
    assert_eq!(tree.find(&(30, "")), None);
}

// =============================================================================
// Scan Tests
// =============================================================================

#[rstest]
fn test_scan_restarts() {
    let tree = BalancedTree::new().insert_all(1..=3);
    assert_eq!(tree.scan().count(), 3);
    assert_eq!(tree.scan().count(), 3);
}

#[rstest]
fn test_scan_directions() {
    let tree = BalancedTree::new().insert_all(1..=3);
    assert_eq!(tree.scan().direction(), Direction::Ascending);
    assert_eq!(tree.scan_reversed().direction(), Direction::Descending);
}

#[rstest]
fn test_scan_reversed() {
    let tree = BalancedTree::new().insert_all([5, 3, 8, 1, 4, 7, 9]);
    let reversed: Vec<i32> = tree.scan_reversed().copied().collect();
    assert_eq!(reversed, vec![9, 8, 7, 5, 4, 3, 1]);
}

#[rstest]
#[case((Bound::Unbounded, Bound::Unbounded), vec![1, 2, 3, 4, 5])]
#[case((Bound::Included(2), Bound::Excluded(4)), vec![2, 3])]
#[case((Bound::Excluded(2), Bound::Included(4)), vec![3, 4])]
#[case((Bound::Excluded(5), Bound::Unbounded), vec![])]
fn test_range_with_bounds(#[case] bounds: (Bound<i32>, Bound<i32>), #[case] expected: Vec<i32>) {
    let tree = BalancedTree::new().insert_all(1..=5);
    assert_eq!(tree.range(bounds).copied().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_scan_is_lazy_and_partial() {
    let tree = BalancedTree::new().insert_all(0..10_000);
    let first: Vec<i32> = tree.scan_from(&5_000, true).take(2).copied().collect();
    assert_eq!(first, vec![5_000, 5_001]);
}

#[rstest]
fn test_for_loop_over_reference() {
    let tree = BalancedTree::new().insert_all([3, 1, 2]);
    let mut total = 0;
    for item in &tree {
        total += item;
    }
    assert_eq!(total, 6);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[rstest]
fn test_validate_accepts_built_trees() {
    let tree = BalancedTree::new().insert_all((0..500).map(|item| (item * 7919) % 500));
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.remove_all(0..250).validate(), Ok(()));
}

#[rstest]
fn test_violation_is_error() {
    let error: Box<dyn std::error::Error> = Box::new(InvariantViolation::OutOfOrder);
    assert_eq!(error.to_string(), "items are out of order");
}
