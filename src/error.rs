//! Error types for structural audits.
//!
//! Ordinary operations never fail: a missing item is reported with `None`
//! and removing it leaves the collection unchanged. The only error type in
//! this crate describes a broken tree found by
//! [`BalancedTree::validate`](crate::BalancedTree::validate).

use std::fmt;

/// A structural invariant that does not hold in an audited tree.
///
/// # Examples
///
/// ```rust
/// use perennial::InvariantViolation;
///
/// let violation = InvariantViolation::Unbalanced { factor: 2 };
/// assert_eq!(
///     format!("{violation}"),
///     "node is unbalanced: balance factor 2 is outside -1..=1"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    /// An item in a left subtree does not compare less than its ancestor,
    /// or an item in a right subtree does not compare greater.
    OutOfOrder,
    /// A node's children differ in height by more than one.
    Unbalanced {
        /// `height(left) - height(right)` at the offending node.
        factor: isize,
    },
    /// A node's cached height disagrees with its children.
    StaleHeight {
        /// The height stored in the node.
        cached: usize,
        /// The height recomputed from the children.
        actual: usize,
    },
    /// A node's cached size disagrees with its children.
    StaleSize {
        /// The size stored in the node.
        cached: usize,
        /// The size recomputed from the children.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder => write!(formatter, "items are out of order"),
            Self::Unbalanced { factor } => write!(
                formatter,
                "node is unbalanced: balance factor {factor} is outside -1..=1"
            ),
            Self::StaleHeight { cached, actual } => write!(
                formatter,
                "stale height: node caches {cached} but its subtree is {actual} high"
            ),
            Self::StaleSize { cached, actual } => write!(
                formatter,
                "stale size: node caches {cached} but its subtree holds {actual} items"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvariantViolation::OutOfOrder, "items are out of order")]
    #[case(
        InvariantViolation::StaleHeight { cached: 3, actual: 2 },
        "stale height: node caches 3 but its subtree is 2 high"
    )]
    #[case(
        InvariantViolation::StaleSize { cached: 7, actual: 6 },
        "stale size: node caches 7 but its subtree holds 6 items"
    )]
    fn test_display(#[case] violation: InvariantViolation, #[case] expected: &str) {
        assert_eq!(violation.to_string(), expected);
    }

    #[rstest]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&InvariantViolation::Unbalanced { factor: -2 });
    }
}
