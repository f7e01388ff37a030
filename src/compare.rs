//! Three-way comparators.
//!
//! Every collection in this crate is ordered by a comparator fixed at
//! construction time. A comparator is anything implementing [`Compare`]:
//!
//! - [`Natural`]: the item's own [`Ord`] implementation
//! - [`Reversed`]: another comparator, flipped
//! - any closure `Fn(&T, &T) -> Ordering`
//!
//! # Examples
//!
//! ```rust
//! use perennial::compare::{Compare, Natural, Reversed, by_key};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
//!
//! let by_length = by_key(|word: &&str| word.len());
//! assert_eq!(by_length.compare(&"kiwi", &"pear"), Ordering::Equal);
//! ```

use std::cmp::Ordering;

/// A three-way comparison defining a total order over `T`.
///
/// Implementations must be consistent: antisymmetric, transitive, and
/// `Equal` exactly for items the collection should treat as the same slot.
pub trait Compare<T: ?Sized> {
    /// Compares `left` with `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Orders items by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Flips the order of the wrapped comparator.
///
/// # Examples
///
/// ```rust
/// use perennial::BalancedTree;
/// use perennial::compare::{Natural, Reversed};
///
/// let tree = BalancedTree::with_comparator(Reversed(Natural)).insert_all([1, 3, 2]);
/// assert_eq!(tree.scan().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}

/// Builds a comparator that orders items by an extracted key.
///
/// Items with equal keys compare `Equal`, so a collection ordered this way
/// keeps at most one item per key.
///
/// # Examples
///
/// ```rust
/// use perennial::DoubleEndedPriorityQueue;
/// use perennial::compare::by_key;
///
/// let queue = DoubleEndedPriorityQueue::ordered_by(by_key(|task: &(u8, &str)| task.0))
///     .push((2, "write"))
///     .push((1, "read"));
/// assert_eq!(queue.peek_left(), Some(&(1, "read")));
/// ```
pub fn by_key<T: ?Sized, K: Ord>(key: impl Fn(&T) -> K) -> impl Fn(&T, &T) -> Ordering {
    move |left: &T, right: &T| key(left).cmp(&key(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_matches_ord(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(Natural.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_reversed_flips_natural() {
        assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reversed(Natural).compare(&2, &2), Ordering::Equal);
    }

    #[rstest]
    fn test_closure_is_comparator() {
        let descending = |left: &i32, right: &i32| right.cmp(left);
        assert_eq!(descending.compare(&1, &2), Ordering::Greater);
    }

    #[rstest]
    fn test_by_key_ignores_payload() {
        let first = by_key(|pair: &(i32, &str)| pair.0);
        assert_eq!(first.compare(&(1, "Bood"), &(1, "Howdy")), Ordering::Equal);
        assert_eq!(first.compare(&(1, "Bood"), &(2, "Doody")), Ordering::Less);
    }

    #[rstest]
    fn test_natural_on_unsized() {
        assert_eq!(Natural.compare("apple", "banana"), Ordering::Less);
    }
}
