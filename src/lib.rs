//! # perennial
//!
//! Persistent ordered collections built on an immutable AVL tree.
//!
//! ## Overview
//!
//! Every update returns a new collection value and leaves the old one
//! valid and unchanged. Versions share every subtree the update did not
//! touch, so keeping many of them is cheap.
//!
//! - [`BalancedTree`]: the AVL core, with bounded ordered scans
//! - [`OrderedMap`]: key-value pairs ordered by key
//! - [`OrderedSet`]: distinct items in order
//! - [`DoubleEndedPriorityQueue`]: extract the minimum or the maximum
//! - [`StablePriorityQueue`]: the same, keeping items of equal priority
//!
//! Each collection is ordered by a comparator chosen at construction; see
//! [`compare`].
//!
//! ## Feature Flags
//!
//! - `arc`: share nodes through `Arc` instead of `Rc`, making the
//!   collections `Send` and `Sync`
//! - `serde`: `Serialize`/`Deserialize` for every collection
//! - `rayon`: parallel iteration (implies `arc`)
//!
//! ## Example
//!
//! ```rust
//! use perennial::prelude::*;
//!
//! let scores = OrderedMap::new().put("carol", 7).put("alice", 9);
//! let updated = scores.put("bob", 4);
//!
//! assert_eq!(scores.len(), 2);
//! assert_eq!(
//!     updated.keys().copied().collect::<Vec<_>>(),
//!     vec!["alice", "bob", "carol"]
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use perennial::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Compare, Natural, Reversed, by_key};
    pub use crate::{
        BalancedTree, DoubleEndedPriorityQueue, OrderedMap, OrderedSet, StablePriorityQueue,
    };
}

pub mod compare;
pub mod error;
pub mod scan;

mod map;
mod queue;
mod set;
mod tree;

pub use error::InvariantViolation;
pub use map::{Entries, OrderedMap};
pub use queue::{DoubleEndedPriorityQueue, InsertionOrder, Sequenced, StablePriorityQueue};
pub use scan::{Direction, Scan};
pub use set::OrderedSet;
pub use tree::BalancedTree;

/// Reference counter type for sharing tree nodes.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc` for
/// thread-safe sharing. Otherwise, it is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference counter type for sharing tree nodes.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc` for
/// thread-safe sharing. Otherwise, it is `std::rc::Rc`.
#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;
