//! Persistent ordered map.
//!
//! [`OrderedMap`] stores `(key, value)` pairs in a [`BalancedTree`] ordered
//! by the key alone, so putting an existing key replaces its value.
//!
//! # Examples
//!
//! ```rust
//! use perennial::OrderedMap;
//!
//! let map = OrderedMap::new()
//!     .put(1, "Howdy!")
//!     .put(3, "Cromity")
//!     .put(2, "Bingo!");
//!
//! let entries: Vec<(&i32, &&str)> = map.scan().collect();
//! assert_eq!(entries, vec![(&1, &"Howdy!"), (&2, &"Bingo!"), (&3, &"Cromity")]);
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.put(1, "Hello!");
//! assert_eq!(map.get(&1), Some(&"Howdy!"));
//! assert_eq!(updated.get(&1), Some(&"Hello!"));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

#[cfg(feature = "rayon")]
use rayon::iter::IntoParallelIterator;

use crate::compare::{Compare, Natural};
use crate::scan::{Direction, Limit, Scan};
use crate::tree::BalancedTree;

/// Orders `(key, value)` pairs by key, ignoring the value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct KeyOrder<C>(C);

impl<K, V, C: Compare<K>> Compare<(K, V)> for KeyOrder<C> {
    #[inline]
    fn compare(&self, left: &(K, V), right: &(K, V)) -> Ordering {
        self.0.compare(&left.0, &right.0)
    }
}

/// A persistent (immutable) map ordered by key.
///
/// # Time Complexity
///
/// | Operation          | Complexity   |
/// |--------------------|--------------|
/// | `put`              | O(log N)     |
/// | `remove`           | O(log N)     |
/// | `get`              | O(log N)     |
/// | `contains_value`   | O(N)         |
/// | `scan*`/`range*`   | O(log N + k) |
/// | `len`              | O(1)         |
pub struct OrderedMap<K, V, C = Natural> {
    tree: BalancedTree<(K, V), KeyOrder<C>>,
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(OrderedMap<String, i32>: Send, Sync);

impl<K: Ord, V> OrderedMap<K, V> {
    /// Creates an empty map ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, F> OrderedMap<K, V, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Creates an empty map whose keys are ordered by a comparison closure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedMap;
    ///
    /// let map = OrderedMap::ordered_by(|left: &&str, right: &&str| left.len().cmp(&right.len()))
    ///     .put("pear", 1)
    ///     .put("fig", 2)
    ///     .put("kiwi", 3);
    ///
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&"plum"), Some(&3));
    /// ```
    #[inline]
    #[must_use]
    pub fn ordered_by(comparator: F) -> Self {
        Self::with_comparator(comparator)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Creates an empty map whose keys are ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: BalancedTree::with_comparator(KeyOrder(comparator)),
        }
    }

    /// Returns the comparator that orders the keys.
    #[inline]
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.tree.comparator().0
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.min().map(|(key, value)| (key, value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.max().map(|(key, value)| (key, value))
    }

    /// Returns every entry in ascending key order.
    #[must_use]
    pub fn scan(&self) -> Entries<'_, K, V> {
        Entries::new(self.tree.scan())
    }

    /// Returns every entry in descending key order.
    #[must_use]
    pub fn scan_reversed(&self) -> Entries<'_, K, V> {
        Entries::new(self.tree.scan_reversed())
    }

    /// Returns every entry in ascending key order. Alias of [`scan`](Self::scan).
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Entries<'_, K, V> {
        self.scan()
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.scan().map(|(key, _)| key)
    }

    /// Returns the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.scan().map(|(_, value)| value)
    }

    /// Returns `true` if any entry holds `value`.
    ///
    /// # Complexity
    ///
    /// O(N)
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|stored| stored == value)
    }
}

impl<K, V, C: Compare<K>> OrderedMap<K, V, C> {
    /// Returns the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedMap;
    ///
    /// let map = OrderedMap::new().put("one", 1);
    /// assert_eq!(map.get(&"one"), Some(&1));
    /// assert_eq!(map.get(&"two"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let comparator = self.comparator();
        self.tree
            .find_by(|(stored, _)| comparator.compare(key, stored))
            .map(|(key, value)| (key, value))
    }

    /// Returns `true` if the map holds an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }
}

impl<K: Clone, V: Clone, C: Compare<K>> OrderedMap<K, V, C> {
    /// Returns a new map with `value` stored under `key`, replacing any
    /// previous value for that key.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn put(&self, key: K, value: V) -> Self {
        Self {
            tree: self.tree.insert((key, value)),
        }
    }

    /// Puts every entry in order; later entries win on equal keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedMap;
    ///
    /// let map = OrderedMap::new().put_all([(1, 'a'), (2, 'b'), (1, 'c')]);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.get(&1), Some(&'c'));
    /// ```
    #[must_use]
    pub fn put_all<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            tree: self.tree.insert_all(entries),
        }
    }

    /// Returns a new map without the entry for `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let comparator = self.comparator();
        Self {
            tree: self
                .tree
                .remove_by(|(stored, _)| comparator.compare(key, stored)),
        }
    }

    /// Removes the entry for every key in order.
    #[must_use]
    pub fn remove_all<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        keys.into_iter()
            .fold(self.clone(), |map, key| map.remove(key.borrow()))
    }

    /// Returns the entries with keys at or after `from`, ascending; with
    /// `inclusive` false the entry for `from` itself is skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedMap;
    ///
    /// let map = OrderedMap::new().put_all((1..=5).map(|key| (key, key * 10)));
    /// let values: Vec<i32> = map.scan_from(&3, false).map(|(_, value)| *value).collect();
    /// assert_eq!(values, vec![40, 50]);
    /// ```
    #[must_use]
    pub fn scan_from(&self, from: &K, inclusive: bool) -> Entries<'_, K, V> {
        let lower = self.limit(from.clone(), inclusive);
        Entries::new(self.tree.select(Some(lower), None, Direction::Ascending))
    }

    /// Returns the entries with keys at or before `from`, descending.
    #[must_use]
    pub fn scan_from_reversed(&self, from: &K, inclusive: bool) -> Entries<'_, K, V> {
        let upper = self.limit(from.clone(), inclusive);
        Entries::new(self.tree.select(None, Some(upper), Direction::Descending))
    }

    /// Returns the entries whose keys fall within `range`, ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use perennial::OrderedMap;
    ///
    /// let map = OrderedMap::new().put_all([("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    /// let keys: Vec<&str> = map.range("b".."d").map(|(key, _)| *key).collect();
    /// assert_eq!(keys, vec!["b", "c"]);
    /// ```
    #[must_use]
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> Entries<'_, K, V> {
        let (lower, upper) = self.limits(&range);
        Entries::new(self.tree.select(lower, upper, Direction::Ascending))
    }

    /// Returns the entries whose keys fall within `range`, descending.
    #[must_use]
    pub fn range_reversed<R: RangeBounds<K>>(&self, range: R) -> Entries<'_, K, V> {
        let (lower, upper) = self.limits(&range);
        Entries::new(self.tree.select(lower, upper, Direction::Descending))
    }

    #[allow(clippy::type_complexity)]
    fn limits<R: RangeBounds<K>>(
        &self,
        range: &R,
    ) -> (Option<Limit<'_, (K, V)>>, Option<Limit<'_, (K, V)>>) {
        let limit = |bound: Bound<&K>| match bound {
            Bound::Included(key) => Some(self.limit(key.clone(), true)),
            Bound::Excluded(key) => Some(self.limit(key.clone(), false)),
            Bound::Unbounded => None,
        };
        (limit(range.start_bound()), limit(range.end_bound()))
    }

    fn limit(&self, key: K, inclusive: bool) -> Limit<'_, (K, V)> {
        let comparator = self.comparator();
        Limit::new(
            move |(stored, _): &(K, V)| comparator.compare(&key, stored),
            inclusive,
        )
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`], in key order.
pub struct Entries<'a, K, V> {
    scan: Scan<'a, (K, V)>,
}

impl<'a, K, V> Entries<'a, K, V> {
    const fn new(scan: Scan<'a, (K, V)>) -> Self {
        Self { scan }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.scan.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.scan.size_hint()
    }
}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Compare<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::default().put_all(iter)
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.scan()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K: Hash, V: Hash, C> Hash for OrderedMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.hash(state);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for OrderedMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<'a, K: Sync + 'a, V: Sync + 'a, C> IntoParallelIterator for &'a OrderedMap<K, V, C> {
    type Iter = rayon::vec::IntoIter<(&'a K, &'a V)>;
    type Item = (&'a K, &'a V);

    fn into_par_iter(self) -> Self::Iter {
        self.iter().collect::<Vec<_>>().into_par_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize, C> serde::Serialize for OrderedMap<K, V, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<fn() -> OrderedMap<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for OrderedMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Compare<K> + Default,
{
    type Value = OrderedMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = OrderedMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map = map.put(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for OrderedMap<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
