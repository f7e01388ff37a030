//! Lazy, bounded, ordered traversal.
//!
//! Every ordered view in this crate (`scan`, `scan_from`, `scan_reversed`,
//! `scan_from_reversed`, `range`) is a [`Scan`]: one depth-first walk
//! parametrized by an optional lower bound, an optional upper bound and a
//! [`Direction`].
//!
//! The walk never enters a subtree that cannot hold an item within the
//! bounds, so pulling k items costs O(log N + k). Nodes are visited only as
//! items are pulled; dropping the scan early is the only cancellation.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::tree::Node;

/// Nodes held inline before the pending-node stack spills to the heap.
///
/// A scan holds at most one node per level, and an AVL tree of a billion
/// items is under 44 levels high.
const INLINE_DEPTH: usize = 48;

/// The order in which a [`Scan`] yields items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest item first.
    Ascending,
    /// Largest item first.
    Descending,
}

/// One side of a bounded scan.
///
/// `position` compares the bound against a stored item, so a lower bound
/// admits items it is `Less` than and an upper bound admits items it is
/// `Greater` than; `Equal` is admitted only when the bound is inclusive.
pub(crate) struct Limit<'a, T> {
    position: Box<dyn Fn(&T) -> Ordering + 'a>,
    inclusive: bool,
}

impl<'a, T> Limit<'a, T> {
    pub(crate) fn new(position: impl Fn(&T) -> Ordering + 'a, inclusive: bool) -> Self {
        Self {
            position: Box::new(position),
            inclusive,
        }
    }

    fn admits(&self, item: &T, inside: Ordering) -> bool {
        match (self.position)(item) {
            Ordering::Equal => self.inclusive,
            ordering => ordering == inside,
        }
    }

    /// Whether anything on the far side of `item` can lie inside the bound.
    fn reaches_past(&self, item: &T, inside: Ordering) -> bool {
        (self.position)(item) == inside
    }
}

/// An iterator over the items of a tree, in order, within optional bounds.
///
/// Created by the `scan*` and `range*` methods of the collections. Calling
/// the method again restarts from the beginning; the tree itself is never
/// affected.
///
/// # Examples
///
/// ```rust
/// use perennial::BalancedTree;
/// use perennial::scan::Direction;
///
/// let tree = BalancedTree::new().insert_all(1..=5);
/// let mut scan = tree.scan_from_reversed(&3, false);
///
/// assert_eq!(scan.direction(), Direction::Descending);
/// assert_eq!(scan.next(), Some(&2));
/// assert_eq!(scan.next(), Some(&1));
/// assert_eq!(scan.next(), None);
/// ```
pub struct Scan<'a, T> {
    pending: SmallVec<[&'a Node<T>; INLINE_DEPTH]>,
    lower: Option<Limit<'a, T>>,
    upper: Option<Limit<'a, T>>,
    direction: Direction,
    remaining: usize,
}

impl<'a, T> Scan<'a, T> {
    pub(crate) fn new(
        root: Option<&'a Node<T>>,
        size: usize,
        lower: Option<Limit<'a, T>>,
        upper: Option<Limit<'a, T>>,
        direction: Direction,
    ) -> Self {
        let mut scan = Self {
            pending: SmallVec::new(),
            lower,
            upper,
            direction,
            remaining: size,
        };
        scan.descend(root);
        scan
    }

    /// Returns the order in which this scan yields items.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    const fn is_bounded(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    fn admitted_below(&self, item: &T) -> bool {
        self.lower
            .as_ref()
            .is_none_or(|limit| limit.admits(item, Ordering::Less))
    }

    fn admitted_above(&self, item: &T) -> bool {
        self.upper
            .as_ref()
            .is_none_or(|limit| limit.admits(item, Ordering::Greater))
    }

    fn left_in_range(&self, node: &Node<T>) -> bool {
        self.lower
            .as_ref()
            .is_none_or(|limit| limit.reaches_past(&node.item, Ordering::Less))
    }

    fn right_in_range(&self, node: &Node<T>) -> bool {
        self.upper
            .as_ref()
            .is_none_or(|limit| limit.reaches_past(&node.item, Ordering::Greater))
    }

    /// Pushes the near spine of `link`, stopping where the bound prunes the
    /// rest of it.
    fn descend(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.pending.push(node);
            link = match self.direction {
                Direction::Ascending if self.left_in_range(node) => node.left.as_deref(),
                Direction::Descending if self.right_in_range(node) => node.right.as_deref(),
                _ => None,
            };
        }
    }

    /// Everything still pending lies beyond the far bound.
    fn finish(&mut self) {
        self.pending.clear();
        self.remaining = 0;
    }
}

impl<'a, T> Iterator for Scan<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.pending.pop() {
            let (admitted_near, admitted_far) = match self.direction {
                Direction::Ascending => (
                    self.admitted_below(&node.item),
                    self.admitted_above(&node.item),
                ),
                Direction::Descending => (
                    self.admitted_above(&node.item),
                    self.admitted_below(&node.item),
                ),
            };
            if !admitted_far {
                self.finish();
                return None;
            }

            match self.direction {
                Direction::Ascending if self.right_in_range(node) => {
                    self.descend(node.right.as_deref());
                }
                Direction::Descending if self.left_in_range(node) => {
                    self.descend(node.left.as_deref());
                }
                _ => {}
            }

            if admitted_near {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.item);
            }
        }
        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = if self.is_bounded() { 0 } else { self.remaining };
        (lower, Some(self.remaining))
    }
}

impl<T> FusedIterator for Scan<'_, T> {}
