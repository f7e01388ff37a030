//! Persistent ordered set.
//!
//! [`OrderedSet`] is a [`BalancedTree`] seen as a set: adding an item equal
//! to one already present leaves a single copy.
//!
//! # Examples
//!
//! ```rust
//! use perennial::OrderedSet;
//!
//! let set: OrderedSet<i32> = [1, 7, 5, 4, 3, 2, 1].into_iter().collect();
//! let grown = set.add(8).add(1).add(-1);
//!
//! assert_eq!(grown.scan().copied().collect::<Vec<_>>(), vec![-1, 1, 2, 3, 4, 5, 7, 8]);
//! assert_eq!(set.len(), 6); // Original unchanged
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;

#[cfg(feature = "rayon")]
use rayon::iter::IntoParallelIterator;

use crate::compare::{Compare, Natural};
use crate::scan::Scan;
use crate::tree::BalancedTree;

/// A persistent (immutable) set of distinct items, kept in order.
///
/// All operations delegate to the underlying [`BalancedTree`] and share its
/// complexity: O(log N) updates and lookups, O(log N + k) scans.
pub struct OrderedSet<T, C = Natural> {
    tree: BalancedTree<T, C>,
}

impl<T: Ord> OrderedSet<T> {
    /// Creates an empty set ordered by `T`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, F> OrderedSet<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty set ordered by a comparison closure.
    #[inline]
    #[must_use]
    pub fn ordered_by(comparator: F) -> Self {
        Self::with_comparator(comparator)
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: BalancedTree::with_comparator(comparator),
        }
    }

    /// Returns the number of items in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the smallest item.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the largest item.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns every item in ascending order.
    #[inline]
    #[must_use]
    pub fn scan(&self) -> Scan<'_, T> {
        self.tree.scan()
    }

    /// Returns every item in descending order.
    #[inline]
    #[must_use]
    pub fn scan_reversed(&self) -> Scan<'_, T> {
        self.tree.scan_reversed()
    }

    /// Returns every item in ascending order. Alias of [`scan`](Self::scan).
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Scan<'_, T> {
        self.tree.scan()
    }

    /// Returns the underlying tree.
    #[inline]
    #[must_use]
    pub const fn as_tree(&self) -> &BalancedTree<T, C> {
        &self.tree
    }
}

impl<T, C: Compare<T>> OrderedSet<T, C> {
    /// Returns `true` if the set holds an item equal to `item`.
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.tree.contains(item)
    }

    /// Returns the stored item equal to `item`.
    #[inline]
    #[must_use]
    pub fn get(&self, item: &T) -> Option<&T> {
        self.tree.find(item)
    }

    /// Returns `true` if every item of this set is also in `other`.
    ///
    /// Membership is decided by `other`'s comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedSet;
    ///
    /// let small: OrderedSet<i32> = [2, 3].into_iter().collect();
    /// let large: OrderedSet<i32> = (1..=5).collect();
    ///
    /// assert!(small.is_subset(&large));
    /// assert!(!large.is_subset(&small));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Clone, C: Compare<T>> OrderedSet<T, C> {
    /// Returns a new set that also holds `item`.
    ///
    /// Adding an item equal to one already present replaces it.
    #[inline]
    #[must_use]
    pub fn add(&self, item: T) -> Self {
        Self {
            tree: self.tree.insert(item),
        }
    }

    /// Adds every item in order.
    #[inline]
    #[must_use]
    pub fn add_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            tree: self.tree.insert_all(items),
        }
    }

    /// Returns a new set without the item equal to `item`.
    #[inline]
    #[must_use]
    pub fn remove(&self, item: &T) -> Self {
        Self {
            tree: self.tree.remove(item),
        }
    }

    /// Removes every item in order.
    #[inline]
    #[must_use]
    pub fn remove_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self {
            tree: self.tree.remove_all(items),
        }
    }

    /// Returns the items at or after `from` in ascending order.
    #[inline]
    #[must_use]
    pub fn scan_from(&self, from: &T, inclusive: bool) -> Scan<'_, T> {
        self.tree.scan_from(from, inclusive)
    }

    /// Returns the items at or before `from` in descending order.
    #[inline]
    #[must_use]
    pub fn scan_from_reversed(&self, from: &T, inclusive: bool) -> Scan<'_, T> {
        self.tree.scan_from_reversed(from, inclusive)
    }

    /// Returns the items within `range` in ascending order.
    #[inline]
    #[must_use]
    pub fn range<R: RangeBounds<T>>(&self, range: R) -> Scan<'_, T> {
        self.tree.range(range)
    }

    /// Returns the items within `range` in descending order.
    #[inline]
    #[must_use]
    pub fn range_reversed<R: RangeBounds<T>>(&self, range: R) -> Scan<'_, T> {
        self.tree.range_reversed(range)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C> Clone for OrderedSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C: Default> Default for OrderedSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Default> FromIterator<T> for OrderedSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::default().add_all(iter)
    }
}

impl<T, C> From<BalancedTree<T, C>> for OrderedSet<T, C> {
    fn from(tree: BalancedTree<T, C>) -> Self {
        Self { tree }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Scan<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.scan()
    }
}

impl<T: PartialEq, C> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for OrderedSet<T, C> {}

impl<T: Hash, C> Hash for OrderedSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, formatter)
    }
}

impl<T: fmt::Display, C> fmt::Display for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, formatter)
    }
}

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a, C> IntoParallelIterator for &'a OrderedSet<T, C> {
    type Iter = rayon::vec::IntoIter<&'a T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        self.tree.into_par_iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for OrderedSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.tree, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for OrderedSet<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <BalancedTree<T, C> as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn items(set: &OrderedSet<i32>) -> Vec<i32> {
        set.scan().copied().collect()
    }

    #[rstest]
    fn test_add_keeps_items_distinct() {
        let set: OrderedSet<i32> = [1, 7, 5, 4, 3, 2, 1].into_iter().collect();
        let grown = set.add(8).add(1).add(-1);
        assert_eq!(items(&grown), vec![-1, 1, 2, 3, 4, 5, 7, 8]);
        assert_eq!(grown.len(), 8);
    }

    #[rstest]
    fn test_remove() {
        let set = OrderedSet::new().add_all(1..=5);
        assert_eq!(items(&set.remove(&3)), vec![1, 2, 4, 5]);
        assert_eq!(items(&set.remove_all([1, 5, 9])), vec![2, 3, 4]);
        assert_eq!(set.len(), 5);
    }

    #[rstest]
    #[case(3, true, vec![3, 4, 5])]
    #[case(3, false, vec![4, 5])]
    fn test_scan_from(#[case] from: i32, #[case] inclusive: bool, #[case] expected: Vec<i32>) {
        let set = OrderedSet::new().add_all(1..=5);
        assert_eq!(
            set.scan_from(&from, inclusive).copied().collect::<Vec<_>>(),
            expected
        );
    }

    #[rstest]
    fn test_scan_from_reversed() {
        let set = OrderedSet::new().add_all(1..=5);
        assert_eq!(
            set.scan_from_reversed(&3, false).copied().collect::<Vec<_>>(),
            vec![2, 1]
        );
    }

    #[rstest]
    fn test_get_returns_stored_item() {
        let set = OrderedSet::ordered_by(|left: &(u8, char), right: &(u8, char)| {
            left.0.cmp(&right.0)
        })
        .add((1, 'x'));
        assert_eq!(set.get(&(1, '?')), Some(&(1, 'x')));
        assert!(set.contains(&(1, 'y')));
    }

    #[rstest]
    fn test_first_last() {
        let set = OrderedSet::new().add_all([4, 2, 9]);
        assert_eq!(set.first(), Some(&2));
        assert_eq!(set.last(), Some(&9));
    }

    #[rstest]
    fn test_display() {
        let set = OrderedSet::new().add_all([3, 1, 2]);
        assert_eq!(format!("{set}"), "{1, 2, 3}");
    }
}
