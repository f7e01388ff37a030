//! Persistent (immutable) AVL tree.
//!
//! This module provides [`BalancedTree`], the ordered container every other
//! collection in this crate is built on.
//!
//! # Overview
//!
//! `BalancedTree` is a height-balanced binary search tree. Updates copy the
//! path from the root to the modified node and share every other subtree
//! with the previous version, so old versions stay valid and cheap to keep.
//!
//! - O(log N) `insert`, `remove`, `find`, `contains`
//! - O(log N + k) bounded scans yielding k items
//! - O(1) `len`, `is_empty`, `height`
//!
//! # Examples
//!
//! ```rust
//! use perennial::BalancedTree;
//!
//! let tree = BalancedTree::new().insert_all([5, 3, 8, 1, 4, 7, 9]);
//! let smaller = tree.remove(&8);
//!
//! assert_eq!(tree.scan().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(smaller.scan().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 9]);
//! assert_eq!(tree.scan_from(&4, false).next(), Some(&5));
//! ```
//!
//! # Internal Structure
//!
//! Every node caches the height and the size of its subtree; both are
//! recomputed whenever a node is built, and nodes are never modified after
//! that. The tree maintains:
//! 1. Every item in a left subtree compares less than its ancestor
//! 2. Every item in a right subtree compares greater than its ancestor
//! 3. The heights of two sibling subtrees differ by at most one

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, RangeBounds};

#[cfg(feature = "rayon")]
use rayon::iter::IntoParallelIterator;

use crate::ReferenceCounter;
use crate::compare::{Compare, Natural};
use crate::error::InvariantViolation;
use crate::scan::{Direction, Limit, Scan};

// =============================================================================
// Node Definition
// =============================================================================

/// An optional, shared child pointer.
pub(crate) type Link<T> = Option<ReferenceCounter<Node<T>>>;

/// Internal node structure for the AVL tree.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    height: usize,
    size: usize,
}

impl<T> Node<T> {
    /// Creates a node, deriving its height and size from the children.
    fn new(item: T, left: Link<T>, right: Link<T>) -> Self {
        let height = height(&left).max(height(&right)) + 1;
        let size = size(&left) + size(&right) + 1;
        Self {
            item,
            left,
            right,
            height,
            size,
        }
    }

    fn shared(item: T, left: Link<T>, right: Link<T>) -> ReferenceCounter<Self> {
        ReferenceCounter::new(Self::new(item, left, right))
    }

    fn leaf(item: T) -> ReferenceCounter<Self> {
        Self::shared(item, None, None)
    }

    fn balance_factor(&self) -> isize {
        balance_factor(&self.left, &self.right)
    }
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

#[allow(clippy::cast_possible_wrap)]
fn balance_factor<T>(left: &Link<T>, right: &Link<T>) -> isize {
    height(left) as isize - height(right) as isize
}

// =============================================================================
// Rebalancing
// =============================================================================

/// Builds a node from `item` and two children whose heights differ by at
/// most two, rotating when they differ by exactly two.
fn rebalance<T: Clone>(item: T, left: Link<T>, right: Link<T>) -> ReferenceCounter<Node<T>> {
    let node = match balance_factor(&left, &right) {
        -1..=1 => Node::shared(item, left, right),
        2 => {
            if left.as_ref().is_some_and(|pivot| pivot.balance_factor() < 0) {
                rotate_left_right(item, left, right)
            } else {
                rotate_right(item, left, right)
            }
        }
        -2 => {
            if right.as_ref().is_some_and(|pivot| pivot.balance_factor() > 0) {
                rotate_right_left(item, left, right)
            } else {
                rotate_left(item, left, right)
            }
        }
        factor => unreachable!("balance factor {factor} cannot follow a single insert or remove"),
    };
    debug_assert!(
        (-1..=1).contains(&node.balance_factor()),
        "rebalanced node is still unbalanced"
    );
    node
}

/// Lifts the left child above `item`; the left child's right subtree moves
/// across to become `item`'s left subtree.
fn rotate_right<T: Clone>(item: T, left: Link<T>, right: Link<T>) -> ReferenceCounter<Node<T>> {
    let Some(pivot) = left else {
        unreachable!("right rotation requires a left child")
    };
    let lowered = Node::shared(item, pivot.right.clone(), right);
    Node::shared(pivot.item.clone(), pivot.left.clone(), Some(lowered))
}

/// Mirror image of [`rotate_right`].
fn rotate_left<T: Clone>(item: T, left: Link<T>, right: Link<T>) -> ReferenceCounter<Node<T>> {
    let Some(pivot) = right else {
        unreachable!("left rotation requires a right child")
    };
    let lowered = Node::shared(item, left, pivot.left.clone());
    Node::shared(pivot.item.clone(), Some(lowered), pivot.right.clone())
}

/// Left-rotates the left child, then right-rotates `item`, in one step: the
/// left child's right child becomes the new root.
fn rotate_left_right<T: Clone>(
    item: T,
    left: Link<T>,
    right: Link<T>,
) -> ReferenceCounter<Node<T>> {
    let Some(pivot) = left else {
        unreachable!("left-right rotation requires a left child")
    };
    let Some(inner) = pivot.right.as_ref() else {
        unreachable!("left-right rotation requires a left-right grandchild")
    };
    let new_left = Node::shared(pivot.item.clone(), pivot.left.clone(), inner.left.clone());
    let new_right = Node::shared(item, inner.right.clone(), right);
    Node::shared(inner.item.clone(), Some(new_left), Some(new_right))
}

/// Mirror image of [`rotate_left_right`].
fn rotate_right_left<T: Clone>(
    item: T,
    left: Link<T>,
    right: Link<T>,
) -> ReferenceCounter<Node<T>> {
    let Some(pivot) = right else {
        unreachable!("right-left rotation requires a right child")
    };
    let Some(inner) = pivot.left.as_ref() else {
        unreachable!("right-left rotation requires a right-left grandchild")
    };
    let new_left = Node::shared(item, left, inner.left.clone());
    let new_right = Node::shared(pivot.item.clone(), inner.right.clone(), pivot.right.clone());
    Node::shared(inner.item.clone(), Some(new_left), Some(new_right))
}

/// Removes the leftmost node of a subtree.
/// Returns the detached item and the rebalanced remainder.
fn detach_leftmost<T: Clone>(node: &ReferenceCounter<Node<T>>) -> (T, Link<T>) {
    match &node.left {
        None => (node.item.clone(), node.right.clone()),
        Some(left) => {
            let (leftmost, new_left) = detach_leftmost(left);
            let rebuilt = rebalance(node.item.clone(), new_left, node.right.clone());
            (leftmost, Some(rebuilt))
        }
    }
}

/// Recursive helper for removal.
///
/// `probe` reports where the target lies relative to a stored item.
/// Returns `None` when nothing matched, so callers can keep the original
/// root instead of a copied path.
fn remove_from<T, P>(link: &Link<T>, probe: &P) -> Option<Link<T>>
where
    T: Clone,
    P: Fn(&T) -> Ordering,
{
    let node = link.as_ref()?;
    match probe(&node.item) {
        Ordering::Less => {
            let new_left = remove_from(&node.left, probe)?;
            Some(Some(rebalance(
                node.item.clone(),
                new_left,
                node.right.clone(),
            )))
        }
        Ordering::Greater => {
            let new_right = remove_from(&node.right, probe)?;
            Some(Some(rebalance(
                node.item.clone(),
                node.left.clone(),
                new_right,
            )))
        }
        Ordering::Equal => Some(match (&node.left, &node.right) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(ReferenceCounter::clone(child)),
            (Some(_), Some(right)) => {
                let (successor, new_right) = detach_leftmost(right);
                Some(rebalance(successor, node.left.clone(), new_right))
            }
        }),
    }
}

// =============================================================================
// BalancedTree Definition
// =============================================================================

/// A persistent (immutable) ordered container based on an AVL tree.
///
/// Items are kept in the order defined by the tree's comparator, which is
/// fixed at construction and shared by every tree derived from this one.
/// Items the comparator considers equal occupy the same slot: inserting one
/// replaces the other.
///
/// # Time Complexity
///
/// | Operation           | Complexity   |
/// |---------------------|--------------|
/// | `insert`            | O(log N)     |
/// | `remove`            | O(log N)     |
/// | `find`/`contains`   | O(log N)     |
/// | `min`/`max`         | O(log N)     |
/// | `scan*`/`range*`    | O(log N + k) |
/// | `len`/`height`      | O(1)         |
///
/// # Examples
///
/// ```rust
/// use perennial::BalancedTree;
///
/// let empty = BalancedTree::new();
/// let one = empty.insert("one");
///
/// assert!(empty.is_empty());
/// assert!(one.contains(&"one"));
/// ```
pub struct BalancedTree<T, C = Natural> {
    root: Link<T>,
    comparator: ReferenceCounter<C>,
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(BalancedTree<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(BalancedTree<i32>: Send, Sync);

impl<T: Ord> BalancedTree<T> {
    /// Creates an empty tree ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree: BalancedTree<i32> = BalancedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, F> BalancedTree<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty tree ordered by a comparison closure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::ordered_by(|left: &i32, right: &i32| right.cmp(left))
    ///     .insert_all([1, 2, 3]);
    /// assert_eq!(tree.scan().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn ordered_by(comparator: F) -> Self {
        Self::with_comparator(comparator)
    }
}

impl<T, C> BalancedTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator: ReferenceCounter::new(comparator),
        }
    }

    /// Returns a tree holding `root`, sharing this tree's comparator.
    fn with_root(&self, root: Link<T>) -> Self {
        Self {
            root,
            comparator: ReferenceCounter::clone(&self.comparator),
        }
    }

    /// Returns the number of items in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        size(&self.root)
    }

    /// Returns `true` if the tree holds no items.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of levels in the tree; an empty tree has height 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(1..=7);
    /// assert_eq!(tree.height(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Returns the comparator that orders this tree.
    #[inline]
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the smallest item, or `None` if the tree is empty.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        Some(&current.item)
    }

    /// Returns the largest item, or `None` if the tree is empty.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.item)
    }

    /// Returns every item in ascending order.
    ///
    /// The scan is lazy: nodes are visited only as items are pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all([5, 3, 8, 1, 4, 7, 9]);
    /// let items: Vec<i32> = tree.scan().copied().collect();
    /// assert_eq!(items, vec![1, 3, 4, 5, 7, 8, 9]);
    /// ```
    #[must_use]
    pub fn scan(&self) -> Scan<'_, T> {
        self.select(None, None, Direction::Ascending)
    }

    /// Returns every item in descending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all([2, 3, 1]);
    /// assert_eq!(tree.scan_reversed().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn scan_reversed(&self) -> Scan<'_, T> {
        self.select(None, None, Direction::Descending)
    }

    /// Returns every item in ascending order. Alias of [`scan`](Self::scan).
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Scan<'_, T> {
        self.scan()
    }

    /// The bounded traversal all scans share.
    pub(crate) fn select<'a>(
        &'a self,
        lower: Option<Limit<'a, T>>,
        upper: Option<Limit<'a, T>>,
        direction: Direction,
    ) -> Scan<'a, T> {
        Scan::new(self.root.as_deref(), self.len(), lower, upper, direction)
    }
}

impl<T, C: Compare<T>> BalancedTree<T, C> {
    /// Returns the stored item the comparator considers equal to `item`.
    ///
    /// This is useful when `T` carries data beyond its ordering key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    /// use perennial::compare::by_key;
    ///
    /// let tree = BalancedTree::ordered_by(by_key(|entry: &(i32, &str)| entry.0))
    ///     .insert((7, "seven"));
    /// assert_eq!(tree.find(&(7, "")), Some(&(7, "seven")));
    /// assert_eq!(tree.find(&(8, "")), None);
    /// ```
    #[must_use]
    pub fn find(&self, item: &T) -> Option<&T> {
        self.find_by(|stored| self.comparator.compare(item, stored))
    }

    /// Returns `true` if the tree holds an item equal to `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Descends the tree guided by `probe`, which reports where the target
    /// lies relative to a stored item.
    pub(crate) fn find_by<P>(&self, probe: P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match probe(&node.item) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.item),
            };
        }
        None
    }

    /// Audits the whole tree: ordering, balance and the cached heights and
    /// sizes of every node.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found. A tree built only
    /// through this crate's operations always passes.
    ///
    /// # Complexity
    ///
    /// O(N)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.audit(&self.root, None, None)
    }

    fn audit(
        &self,
        link: &Link<T>,
        lower: Option<&T>,
        upper: Option<&T>,
    ) -> Result<(), InvariantViolation> {
        let Some(node) = link else {
            return Ok(());
        };
        let above_lower =
            lower.is_none_or(|limit| self.comparator.compare(limit, &node.item) == Ordering::Less);
        let below_upper = upper
            .is_none_or(|limit| self.comparator.compare(limit, &node.item) == Ordering::Greater);
        if !(above_lower && below_upper) {
            return Err(InvariantViolation::OutOfOrder);
        }

        self.audit(&node.left, lower, Some(&node.item))?;
        self.audit(&node.right, Some(&node.item), upper)?;

        let factor = node.balance_factor();
        if !(-1..=1).contains(&factor) {
            return Err(InvariantViolation::Unbalanced { factor });
        }
        let actual = height(&node.left).max(height(&node.right)) + 1;
        if node.height != actual {
            return Err(InvariantViolation::StaleHeight {
                cached: node.height,
                actual,
            });
        }
        let actual = size(&node.left) + size(&node.right) + 1;
        if node.size != actual {
            return Err(InvariantViolation::StaleSize {
                cached: node.size,
                actual,
            });
        }
        Ok(())
    }
}

impl<T: Clone, C: Compare<T>> BalancedTree<T, C> {
    /// Returns a new tree that also holds `item`.
    ///
    /// If the tree already holds an item the comparator considers equal,
    /// `item` replaces it in place.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert(1);
    /// let bigger = tree.insert(2);
    ///
    /// assert_eq!(tree.len(), 1); // Original unchanged
    /// assert_eq!(bigger.len(), 2);
    /// ```
    #[must_use]
    pub fn insert(&self, item: T) -> Self {
        self.with_root(Some(self.insert_into(&self.root, item)))
    }

    /// Recursive helper for insert.
    fn insert_into(&self, link: &Link<T>, item: T) -> ReferenceCounter<Node<T>> {
        let Some(node) = link else {
            return Node::leaf(item);
        };
        match self.comparator.compare(&item, &node.item) {
            Ordering::Less => {
                let new_left = self.insert_into(&node.left, item);
                rebalance(node.item.clone(), Some(new_left), node.right.clone())
            }
            Ordering::Greater => {
                let new_right = self.insert_into(&node.right, item);
                rebalance(node.item.clone(), node.left.clone(), Some(new_right))
            }
            Ordering::Equal => Node::shared(item, node.left.clone(), node.right.clone()),
        }
    }

    /// Inserts every item in order; later items replace earlier equal ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(vec![3, 1, 2, 1]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    #[must_use]
    pub fn insert_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let root = items
            .into_iter()
            .fold(self.root.clone(), |root, item| {
                Some(self.insert_into(&root, item))
            });
        self.with_root(root)
    }

    /// Returns a new tree without the item equal to `item`.
    ///
    /// If no such item exists the returned tree shares this tree's root.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all([1, 2, 3]);
    /// let removed = tree.remove(&2);
    ///
    /// assert!(tree.contains(&2)); // Original unchanged
    /// assert!(!removed.contains(&2));
    /// assert_eq!(removed.remove(&42), removed);
    /// ```
    #[must_use]
    pub fn remove(&self, item: &T) -> Self {
        self.remove_by(|stored| self.comparator.compare(item, stored))
    }

    /// Removes the item located by `probe`, if any.
    pub(crate) fn remove_by<P>(&self, probe: P) -> Self
    where
        P: Fn(&T) -> Ordering,
    {
        remove_from(&self.root, &probe).map_or_else(|| self.clone(), |root| self.with_root(root))
    }

    /// Removes every item in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(1..=5);
    /// let odd = tree.remove_all([2, 4, 6]);
    /// assert_eq!(odd.scan().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn remove_all<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let root = items.into_iter().fold(self.root.clone(), |root, item| {
            let item = item.borrow();
            remove_from(&root, &|stored: &T| self.comparator.compare(item, stored)).unwrap_or(root)
        });
        self.with_root(root)
    }

    /// Returns the items at or after `from` in ascending order; with
    /// `inclusive` false an item equal to `from` is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(1..=100);
    /// let from: Vec<i32> = tree.scan_from(&97, true).copied().collect();
    /// assert_eq!(from, vec![97, 98, 99, 100]);
    ///
    /// let after: Vec<i32> = tree.scan_from(&97, false).copied().collect();
    /// assert_eq!(after, vec![98, 99, 100]);
    /// ```
    #[must_use]
    pub fn scan_from(&self, from: &T, inclusive: bool) -> Scan<'_, T> {
        let lower = self.limit(from.clone(), inclusive);
        self.select(Some(lower), None, Direction::Ascending)
    }

    /// Returns the items at or before `from` in descending order; with
    /// `inclusive` false an item equal to `from` is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(1..=100);
    /// let down: Vec<i32> = tree.scan_from_reversed(&3, true).copied().collect();
    /// assert_eq!(down, vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn scan_from_reversed(&self, from: &T, inclusive: bool) -> Scan<'_, T> {
        let upper = self.limit(from.clone(), inclusive);
        self.select(None, Some(upper), Direction::Descending)
    }

    /// Returns the items within `range` in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::BalancedTree;
    ///
    /// let tree = BalancedTree::new().insert_all(1..=10);
    /// assert_eq!(tree.range(3..6).copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    /// assert_eq!(tree.range(..=2).copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn range<R: RangeBounds<T>>(&self, range: R) -> Scan<'_, T> {
        let (lower, upper) = self.limits(&range);
        self.select(lower, upper, Direction::Ascending)
    }

    /// Returns the items within `range` in descending order.
    #[must_use]
    pub fn range_reversed<R: RangeBounds<T>>(&self, range: R) -> Scan<'_, T> {
        let (lower, upper) = self.limits(&range);
        self.select(lower, upper, Direction::Descending)
    }

    fn limits<R: RangeBounds<T>>(&self, range: &R) -> (Option<Limit<'_, T>>, Option<Limit<'_, T>>) {
        let limit = |bound: Bound<&T>| match bound {
            Bound::Included(item) => Some(self.limit(item.clone(), true)),
            Bound::Excluded(item) => Some(self.limit(item.clone(), false)),
            Bound::Unbounded => None,
        };
        (limit(range.start_bound()), limit(range.end_bound()))
    }

    fn limit(&self, bound: T, inclusive: bool) -> Limit<'_, T> {
        let comparator = &*self.comparator;
        Limit::new(move |item: &T| comparator.compare(&bound, item), inclusive)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C> Clone for BalancedTree<T, C> {
    fn clone(&self) -> Self {
        self.with_root(self.root.clone())
    }
}

impl<T, C: Default> Default for BalancedTree<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Compare<T> + Default> FromIterator<T> for BalancedTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::default().insert_all(iter)
    }
}

impl<'a, T, C> IntoIterator for &'a BalancedTree<T, C> {
    type Item = &'a T;
    type IntoIter = Scan<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.scan()
    }
}

impl<T: PartialEq, C> PartialEq for BalancedTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for BalancedTree<T, C> {}

impl<T: Hash, C> Hash for BalancedTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BalancedTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for BalancedTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{item}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<'a, T: Sync + 'a, C> IntoParallelIterator for &'a BalancedTree<T, C> {
    type Iter = rayon::vec::IntoIter<&'a T>;
    type Item = &'a T;

    fn into_par_iter(self) -> Self::Iter {
        self.iter().collect::<Vec<_>>().into_par_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for BalancedTree<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for BalancedTree<T, C>
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

// =============================================================================
// Tests
// =============================================================================
