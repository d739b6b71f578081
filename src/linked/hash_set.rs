//! Insertion-ordered hash set.
//!
//! This module provides [`LinkedHashSet`], a mutable set that remembers the
//! order in which its elements were first inserted.
//!
//! # Overview
//!
//! `LinkedHashSet` couples two structures:
//!
//! - a hash index from each element to the node that stores it
//! - a doubly-linked sequence of nodes recording insertion order
//!
//! Because the index hands out node handles rather than positions, removing
//! an element unlinks its node directly without scanning the sequence.
//!
//! # Ordering Rules
//!
//! - An element receives its position when it is added while absent.
//! - Adding an element that is already present changes nothing, including
//!   its position.
//! - Removing an element discards its position; adding it again appends it
//!   to the tail.
//!
//! # Time Complexity
//!
//! | Operation   | Complexity        |
//! |-------------|-------------------|
//! | `add`       | O(1) amortized    |
//! | `remove`    | O(1) amortized    |
//! | `contains`  | O(1) expected     |
//! | `len`       | O(1)              |
//! | `iter`      | O(1) + O(n)       |
//! | `clear`     | O(n)              |
//!
//! # Examples
//!
//! ```rust
//! use linkset::LinkedHashSet;
//!
//! let mut set = LinkedHashSet::new();
//! set.add(1);
//! set.add(10);
//! set.add(5);
//!
//! // Re-adding an element does not move it
//! assert!(!set.add(1));
//!
//! let elements: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(elements, vec![1, 10, 5]);
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use super::arena::{Cursor, NodeArena, NodeIndex};
use super::index::HashIndex;
use crate::equivalence::{Equivalence, NaturalEquivalence};
use crate::error::{SetError, SetResult};

// =============================================================================
// LinkedHashSet Definition
// =============================================================================

/// A hash set that iterates in insertion order.
///
/// Element identity is decided by an [`Equivalence`] strategy, which defaults
/// to the element type's own `Eq` and `Hash`.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `E` - The equality and hashing strategy
///
/// # Examples
///
/// ```rust
/// use linkset::LinkedHashSet;
///
/// let set: LinkedHashSet<&str> = ["pear", "apple", "pear", "fig"].into_iter().collect();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["pear", "apple", "fig"]);
/// ```
#[derive(Clone)]
pub struct LinkedHashSet<T, E = NaturalEquivalence> {
    pub(super) nodes: NodeArena<T>,
    pub(super) index: HashIndex,
    pub(super) equivalence: E,
}

impl<T: Hash + Eq> LinkedHashSet<T> {
    /// Creates a new empty set using the natural equality of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = LinkedHashSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_equivalence(NaturalEquivalence::new())
    }

    /// Creates a new empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equivalence(capacity, NaturalEquivalence::new())
    }
}

impl<T, E> LinkedHashSet<T, E> {
    /// Creates a new empty set that identifies elements through `equivalence`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::{KeyEquivalence, LinkedHashSet};
    ///
    /// let mut set = LinkedHashSet::with_equivalence(KeyEquivalence::new(|value: &i32| value.abs()));
    /// set.add(-3);
    /// assert!(set.contains(&3));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_equivalence(equivalence: E) -> Self {
        Self {
            nodes: NodeArena::new(),
            index: HashIndex::new(),
            equivalence,
        }
    }

    /// Creates a new empty set with room for at least `capacity` elements,
    /// identifying elements through `equivalence`.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_equivalence(capacity: usize, equivalence: E) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            index: HashIndex::with_capacity(capacity),
            equivalence,
        }
    }

    /// Returns the strategy this set uses to identify elements.
    #[inline]
    #[must_use]
    pub const fn equivalence(&self) -> &E {
        &self.equivalence
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Returns the number of elements the set can hold without reallocating
    /// its node storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns an iterator over the elements in insertion order.
    ///
    /// Every call starts from the current head. The iterator borrows the set,
    /// so the set cannot be modified while the iterator is alive; collect a
    /// [`snapshot`](Self::snapshot) first if you need to mutate while walking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = [3, 1, 2].into_iter().collect();
    /// let forward: Vec<&i32> = set.iter().collect();
    /// let backward: Vec<&i32> = set.iter().rev().collect();
    ///
    /// assert_eq!(forward, vec![&3, &1, &2]);
    /// assert_eq!(backward, vec![&2, &1, &3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.nodes.cursor(),
        }
    }

    /// Returns the oldest element, if any.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.nodes.head().and_then(|head| self.nodes.value(head))
    }

    /// Returns the most recently inserted element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.nodes.tail().and_then(|tail| self.nodes.value(tail))
    }

    /// Removes every element.
    ///
    /// Allocated capacity is retained.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Copies the elements, in iteration order, into a new `Vec`.
    ///
    /// The result is independent of the set and may be used while the set is
    /// mutated.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Writes the elements, in iteration order, into `buffer` starting at
    /// `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::OutOfBounds`] if `buffer` cannot hold `len()`
    /// elements from `offset`. The buffer is untouched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::{LinkedHashSet, SetError};
    ///
    /// let set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
    ///
    /// let mut buffer = [0; 4];
    /// set.copy_into(&mut buffer, 1).unwrap();
    /// assert_eq!(buffer, [0, 1, 10, 5]);
    ///
    /// let mut small = [0; 2];
    /// assert!(matches!(set.copy_into(&mut small, 0), Err(SetError::OutOfBounds { .. })));
    /// ```
    pub fn copy_into(&self, buffer: &mut [T], offset: usize) -> SetResult<()>
    where
        T: Clone,
    {
        let required = self.len();
        let fits = offset
            .checked_add(required)
            .is_some_and(|end| end <= buffer.len());
        if !fits {
            return Err(SetError::OutOfBounds {
                offset,
                required,
                capacity: buffer.len(),
            });
        }

        for (target, element) in buffer[offset..].iter_mut().zip(self.iter()) {
            target.clone_from(element);
        }
        Ok(())
    }
}

impl<T, E: Equivalence<T>> LinkedHashSet<T, E> {
    /// Finds the node holding an element equivalent to `value`.
    fn locate(&self, hash: u64, value: &T) -> Option<NodeIndex> {
        self.index
            .find(hash, |slot| {
                self.nodes
                    .value(NodeIndex::new(slot))
                    .is_some_and(|stored| self.equivalence.equivalent(stored, value))
            })
            .map(NodeIndex::new)
    }

    /// Unlinks the node at `index` and drops its index entry.
    pub(super) fn remove_node(&mut self, index: NodeIndex) -> Option<T> {
        let hash = self.equivalence.hash_of(self.nodes.value(index)?);
        let indexed = self.index.remove(hash, index.slot());
        debug_assert!(indexed, "every live node must be indexed");
        self.nodes.unlink(index)
    }

    /// Returns `true` if the set contains an element equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = [1, 2].into_iter().collect();
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&3));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.locate(self.equivalence.hash_of(value), value).is_some()
    }

    /// Returns the stored element equivalent to `value`.
    ///
    /// With a non-natural strategy the stored element may differ from
    /// `value`; it is always the one that was added first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::{KeyEquivalence, LinkedHashSet};
    ///
    /// let mut set = LinkedHashSet::with_equivalence(KeyEquivalence::new(|value: &String| {
    ///     value.to_lowercase()
    /// }));
    /// set.add("Hello".to_string());
    /// set.add("HELLO".to_string());
    ///
    /// assert_eq!(set.get(&"hello".to_string()), Some(&"Hello".to_string()));
    /// ```
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.locate(self.equivalence.hash_of(value), value)
            .and_then(|index| self.nodes.value(index))
    }

    /// Adds `value` to the set.
    ///
    /// If no equivalent element is present, `value` becomes the new last
    /// element and `true` is returned. Otherwise the set is left exactly as
    /// it was, including the position of the existing element, and `false`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set = LinkedHashSet::new();
    /// assert!(set.add(1));
    /// assert!(set.add(10));
    /// assert!(!set.add(1));
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 10]);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        let hash = self.equivalence.hash_of(&value);
        if self.locate(hash, &value).is_some() {
            return false;
        }
        let index = self.nodes.push_back(value);
        self.index.insert(hash, index.slot());
        true
    }

    /// Removes the element equivalent to `value`. Returns `true` if one was
    /// present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the stored element equivalent to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let index = self.locate(self.equivalence.hash_of(value), value)?;
        self.remove_node(index)
    }

    /// Keeps only the elements for which `predicate` returns `true`.
    ///
    /// Survivors keep their relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [5, 2, 8, 1].into_iter().collect();
    /// set.retain(|value| *value > 1);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 2, 8]);
    /// ```
    pub fn retain<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        let mut rejected = Vec::new();
        let mut cursor = self.nodes.cursor();
        while let Some((index, value)) = cursor.next_front() {
            if !predicate(value) {
                rejected.push(index);
            }
        }
        for index in rejected {
            self.remove_node(index);
        }
    }

    /// Reserves capacity for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
        self.index.reserve(additional);
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to the elements of a [`LinkedHashSet`], in
/// insertion order.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_front().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.cursor.remaining()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
        }
    }
}

/// Owning iterator over the elements of a [`LinkedHashSet`], in insertion
/// order.
pub struct IntoIter<T> {
    nodes: NodeArena<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.nodes.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, E: Default> Default for LinkedHashSet<T, E> {
    #[inline]
    fn default() -> Self {
        Self::with_equivalence(E::default())
    }
}

impl<T, E: Equivalence<T> + Default> FromIterator<T> for LinkedHashSet<T, E> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, E: Equivalence<T>> Extend<T> for LinkedHashSet<T, E> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);
        for element in iter {
            self.add(element);
        }
    }
}

impl<'a, T: Copy + 'a, E: Equivalence<T>> Extend<&'a T> for LinkedHashSet<T, E> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, E> IntoIterator for LinkedHashSet<T, E> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { nodes: self.nodes }
    }
}

impl<'a, T, E> IntoIterator for &'a LinkedHashSet<T, E> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Set equality: the same elements, in any order.
impl<T, E: Equivalence<T>> PartialEq for LinkedHashSet<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T, E: Equivalence<T>> Eq for LinkedHashSet<T, E> {}

impl<T: fmt::Debug, E> fmt::Debug for LinkedHashSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, E> fmt::Display for LinkedHashSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, E> serde::Serialize for LinkedHashSet<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// Upper bound on capacity reserved up front from an untrusted length hint.
#[cfg(feature = "serde")]
const PREALLOCATION_LIMIT: usize = 4096;

#[cfg(feature = "serde")]
struct LinkedHashSetVisitor<T, E> {
    marker: std::marker::PhantomData<fn() -> LinkedHashSet<T, E>>,
}

#[cfg(feature = "serde")]
impl<T, E> LinkedHashSetVisitor<T, E> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::de::Visitor<'de> for LinkedHashSetVisitor<T, E>
where
    T: serde::Deserialize<'de>,
    E: Equivalence<T> + Default,
{
    type Value = LinkedHashSet<T, E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Duplicates collapse onto their first occurrence, as with `add`.
        let mut set = LinkedHashSet::with_capacity_and_equivalence(
            seq.size_hint().unwrap_or(0).min(PREALLOCATION_LIMIT),
            E::default(),
        );
        while let Some(element) = seq.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::Deserialize<'de> for LinkedHashSet<T, E>
where
    T: serde::Deserialize<'de>,
    E: Equivalence<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(LinkedHashSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
