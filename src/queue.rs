//! Persistent double-ended priority queues.
//!
//! - [`DoubleEndedPriorityQueue`]: a [`BalancedTree`] exposing its minimum
//!   and maximum. Items of equal priority share one slot, so pushing an item
//!   whose priority is already queued replaces the queued one.
//! - [`StablePriorityQueue`]: keeps every pushed item. Equal priorities leave
//!   from the left in push order and from the right in reverse push order.
//!
//! # Examples
//!
//! ```rust
//! use perennial::{DoubleEndedPriorityQueue, StablePriorityQueue};
//! use perennial::compare::by_key;
//!
//! fn first(pair: &(i32, &str)) -> i32 {
//!     pair.0
//! }
//!
//! let queue = DoubleEndedPriorityQueue::ordered_by(by_key(first))
//!     .push_all([(1, "Bood"), (2, "Doody"), (1, "Howdy")]);
//! assert_eq!(queue.len(), 2);
//!
//! let stable = StablePriorityQueue::ordered_by(by_key(first))
//!     .push_all([(1, "Bood"), (2, "Doody"), (1, "Howdy")]);
//! assert_eq!(stable.len(), 3);
//! assert_eq!(stable.peek_left(), Some(&(1, "Bood")));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::compare::{Compare, Natural};
use crate::scan::Scan;
use crate::tree::BalancedTree;

// =============================================================================
// DoubleEndedPriorityQueue
// =============================================================================

/// A persistent (immutable) queue that yields its items from either end of
/// the priority order.
///
/// The queue keeps at most one item per priority: pushing an item the
/// comparator considers equal to a queued one replaces it. Use
/// [`StablePriorityQueue`] to keep them all.
///
/// # Time Complexity
///
/// | Operation                     | Complexity |
/// |-------------------------------|------------|
/// | `push`                        | O(log N)   |
/// | `remove_left`/`remove_right`  | O(log N)   |
/// | `peek_left`/`peek_right`      | O(log N)   |
/// | `len`                         | O(1)       |
///
/// # Examples
///
/// ```rust
/// use perennial::DoubleEndedPriorityQueue;
///
/// let queue = DoubleEndedPriorityQueue::new().push_all([5, 1, 9, 3]);
///
/// let (smallest, rest) = queue.remove_left().unwrap();
/// let (largest, rest) = rest.remove_right().unwrap();
///
/// assert_eq!((smallest, largest), (1, 9));
/// assert_eq!(rest.iter().copied().collect::<Vec<_>>(), vec![3, 5]);
/// assert_eq!(queue.len(), 4); // Original unchanged
/// ```
pub struct DoubleEndedPriorityQueue<T, C = Natural> {
    tree: BalancedTree<T, C>,
}

impl<T: Ord> DoubleEndedPriorityQueue<T> {
    /// Creates an empty queue prioritized by `T`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, F> DoubleEndedPriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty queue prioritized by a comparison closure.
    #[inline]
    #[must_use]
    pub fn ordered_by(comparator: F) -> Self {
        Self::with_comparator(comparator)
    }
}

impl<T, C> DoubleEndedPriorityQueue<T, C> {
    /// Creates an empty queue prioritized by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: BalancedTree::with_comparator(comparator),
        }
    }

    /// Returns the number of queued items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the item with the lowest priority without removing it.
    #[inline]
    #[must_use]
    pub fn peek_left(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the item with the highest priority without removing it.
    #[inline]
    #[must_use]
    pub fn peek_right(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns the queued items from lowest to highest priority.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Scan<'_, T> {
        self.tree.scan()
    }
}

impl<T, C: Compare<T>> DoubleEndedPriorityQueue<T, C> {
    /// Returns `true` if an item of the same priority as `item` is queued.
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.tree.contains(item)
    }
}

impl<T: Clone, C: Compare<T>> DoubleEndedPriorityQueue<T, C> {
    /// Returns a new queue that also holds `item`.
    #[inline]
    #[must_use]
    pub fn push(&self, item: T) -> Self {
        Self {
            tree: self.tree.insert(item),
        }
    }

    /// Pushes every item in order; later items replace earlier ones of equal
    /// priority.
    #[inline]
    #[must_use]
    pub fn push_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            tree: self.tree.insert_all(items),
        }
    }

    /// Removes the item with the lowest priority.
    ///
    /// Returns the item together with the queue that remains, or `None` if
    /// the queue is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::DoubleEndedPriorityQueue;
    ///
    /// let empty: DoubleEndedPriorityQueue<i32> = DoubleEndedPriorityQueue::new();
    /// assert!(empty.remove_left().is_none());
    /// ```
    #[must_use]
    pub fn remove_left(&self) -> Option<(T, Self)> {
        let item = self.tree.min()?.clone();
        let rest = self.tree.remove(&item);
        Some((item, Self { tree: rest }))
    }

    /// Removes the item with the highest priority.
    ///
    /// Returns the item together with the queue that remains, or `None` if
    /// the queue is empty.
    #[must_use]
    pub fn remove_right(&self) -> Option<(T, Self)> {
        let item = self.tree.max()?.clone();
        let rest = self.tree.remove(&item);
        Some((item, Self { tree: rest }))
    }
}

impl<T, C> Clone for DoubleEndedPriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C: Default> Default for DoubleEndedPriorityQueue<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Default> FromIterator<T> for DoubleEndedPriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::default().push_all(iter)
    }
}

impl<'a, T, C> IntoIterator for &'a DoubleEndedPriorityQueue<T, C> {
    type Item = &'a T;
    type IntoIter = Scan<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for DoubleEndedPriorityQueue<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq, C> Eq for DoubleEndedPriorityQueue<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for DoubleEndedPriorityQueue<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for DoubleEndedPriorityQueue<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, formatter)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for DoubleEndedPriorityQueue<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for DoubleEndedPriorityQueue<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tree = <BalancedTree<T, C> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self { tree })
    }
}

// =============================================================================
// StablePriorityQueue
// =============================================================================

/// An item stamped with the position of the push that queued it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sequenced<T> {
    sequence: u64,
    item: T,
}

impl<T> Sequenced<T> {
    /// Returns the push position; earlier pushes have smaller sequences.
    #[inline]
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the queued item.
    #[inline]
    #[must_use]
    pub const fn item(&self) -> &T {
        &self.item
    }
}

/// Orders [`Sequenced`] items by priority, then by push position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InsertionOrder<C>(pub C);

impl<T, C: Compare<T>> Compare<Sequenced<T>> for InsertionOrder<C> {
    fn compare(&self, left: &Sequenced<T>, right: &Sequenced<T>) -> Ordering {
        self.0
            .compare(&left.item, &right.item)
            .then_with(|| left.sequence.cmp(&right.sequence))
    }
}

/// A double-ended priority queue that keeps every pushed item.
///
/// Items of equal priority are told apart by push order: `remove_left`
/// yields them first-in-first-out and `remove_right` last-in-first-out.
///
/// # Examples
///
/// ```rust
/// use perennial::StablePriorityQueue;
/// use perennial::compare::by_key;
///
/// let queue = StablePriorityQueue::ordered_by(by_key(|job: &(u8, char)| job.0))
///     .push((1, 'a'))
///     .push((1, 'b'))
///     .push((1, 'c'));
///
/// let (first, rest) = queue.remove_left().unwrap();
/// let (last, _) = rest.remove_right().unwrap();
/// assert_eq!((first, last), ((1, 'a'), (1, 'c')));
/// ```
pub struct StablePriorityQueue<T, C = Natural> {
    queue: DoubleEndedPriorityQueue<Sequenced<T>, InsertionOrder<C>>,
    next_sequence: u64,
}

impl<T: Ord> StablePriorityQueue<T> {
    /// Creates an empty queue prioritized by `T`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, F> StablePriorityQueue<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty queue prioritized by a comparison closure.
    #[inline]
    #[must_use]
    pub fn ordered_by(comparator: F) -> Self {
        Self::with_comparator(comparator)
    }
}

impl<T, C> StablePriorityQueue<T, C> {
    /// Creates an empty queue prioritized by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            queue: DoubleEndedPriorityQueue::with_comparator(InsertionOrder(comparator)),
            next_sequence: 0,
        }
    }

    /// Returns the number of queued items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the item `remove_left` would yield.
    #[must_use]
    pub fn peek_left(&self) -> Option<&T> {
        self.queue.peek_left().map(Sequenced::item)
    }

    /// Returns the item `remove_right` would yield.
    #[must_use]
    pub fn peek_right(&self) -> Option<&T> {
        self.queue.peek_right().map(Sequenced::item)
    }

    /// Returns the queued items from lowest to highest priority, equal
    /// priorities in push order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter().map(Sequenced::item)
    }
}

impl<T: Clone, C: Compare<T>> StablePriorityQueue<T, C> {
    /// Returns a new queue that also holds `item`, behind every queued item
    /// of the same priority.
    #[must_use]
    pub fn push(&self, item: T) -> Self {
        let stamped = Sequenced {
            sequence: self.next_sequence,
            item,
        };
        Self {
            queue: self.queue.push(stamped),
            next_sequence: self.next_sequence + 1,
        }
    }

    /// Pushes every item in order.
    #[must_use]
    pub fn push_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .fold(self.clone(), |queue, item| queue.push(item))
    }

    /// Removes the lowest-priority item, the earliest pushed among equals.
    #[must_use]
    pub fn remove_left(&self) -> Option<(T, Self)> {
        let (stamped, queue) = self.queue.remove_left()?;
        Some((stamped.item, self.with_queue(queue)))
    }

    /// Removes the highest-priority item, the latest pushed among equals.
    #[must_use]
    pub fn remove_right(&self) -> Option<(T, Self)> {
        let (stamped, queue) = self.queue.remove_right()?;
        Some((stamped.item, self.with_queue(queue)))
    }

    const fn with_queue(
        &self,
        queue: DoubleEndedPriorityQueue<Sequenced<T>, InsertionOrder<C>>,
    ) -> Self {
        Self {
            queue,
            next_sequence: self.next_sequence,
        }
    }
}

impl<T, C> Clone for StablePriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            next_sequence: self.next_sequence,
        }
    }
}

impl<T, C: Default> Default for StablePriorityQueue<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Default> FromIterator<T> for StablePriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::default().push_all(iter)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for StablePriorityQueue<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for StablePriorityQueue<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for StablePriorityQueue<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = <Vec<T> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::by_key;
    use rstest::rstest;

    type Greeting = (i32, &'static str);

    fn by_priority(pair: &Greeting) -> i32 {
        pair.0
    }

    #[rstest]
    fn test_equal_priorities_collapse() {
        let queue = DoubleEndedPriorityQueue::ordered_by(by_key(by_priority))
            .push((1, "Bood"))
            .push((2, "Doody"))
            .push((1, "Howdy"));

        let (left, rest) = queue.remove_left().unwrap();
        assert_eq!(left, (1, "Howdy"));
        assert_eq!(rest.iter().copied().collect::<Vec<_>>(), vec![(2, "Doody")]);

        let (right, rest) = queue.remove_right().unwrap();
        assert_eq!(right, (2, "Doody"));
        assert_eq!(rest.iter().copied().collect::<Vec<_>>(), vec![(1, "Howdy")]);
    }

    #[rstest]
    fn test_remove_from_empty_queue() {
        let queue: DoubleEndedPriorityQueue<i32> = DoubleEndedPriorityQueue::new();
        assert!(queue.remove_left().is_none());
        assert!(queue.remove_right().is_none());
        assert_eq!(queue.peek_left(), None);
    }

    #[rstest]
    fn test_drains_in_priority_order() {
        let mut queue: DoubleEndedPriorityQueue<i32> = [4, 8, 1, 6, 3].into_iter().collect();
        let mut drained = Vec::new();
        while let Some((item, rest)) = queue.remove_left() {
            drained.push(item);
            queue = rest;
        }
        assert_eq!(drained, vec![1, 3, 4, 6, 8]);
        assert!(queue.is_empty());
    }

    #[rstest]
    fn test_peek_both_ends() {
        let queue = DoubleEndedPriorityQueue::new().push_all([4, 8, 1]);
        assert_eq!(queue.peek_left(), Some(&1));
        assert_eq!(queue.peek_right(), Some(&8));
        assert!(queue.contains(&4));
    }

    #[rstest]
    fn test_stable_queue_keeps_equal_priorities() {
        let queue = StablePriorityQueue::ordered_by(by_key(by_priority))
            .push((1, "Bood"))
            .push((2, "Doody"))
            .push((1, "Howdy"));
        assert_eq!(queue.len(), 3);

        let (first, rest) = queue.remove_left().unwrap();
        let (second, rest) = rest.remove_left().unwrap();
        assert_eq!(first, (1, "Bood"));
        assert_eq!(second, (1, "Howdy"));
        assert_eq!(rest.peek_left(), Some(&(2, "Doody")));
    }

    #[rstest]
    fn test_stable_queue_right_end_is_lifo() {
        let queue = StablePriorityQueue::ordered_by(by_key(by_priority))
            .push_all([(5, "a"), (5, "b"), (1, "c")]);
        let (first, rest) = queue.remove_right().unwrap();
        let (second, _) = rest.remove_right().unwrap();
        assert_eq!(first, (5, "b"));
        assert_eq!(second, (5, "a"));
    }

    #[rstest]
    fn test_stable_queue_push_after_remove_goes_behind() {
        let queue = StablePriorityQueue::new().push(1).push(1);
        let (_, rest) = queue.remove_left().unwrap();
        let refilled = rest.push(1);
        assert_eq!(refilled.len(), 2);
        assert_eq!(format!("{refilled:?}"), "[1, 1]");
    }
}
