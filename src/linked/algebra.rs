//! Order-preserving set algebra for [`LinkedHashSet`].
//!
//! Every operation takes `other` as an arbitrary sequence: it may contain
//! duplicates, which count as a single element, and it may have been
//! produced from this very set (for example through a snapshot). Whenever a
//! decision depends on the whole of `other`, `other` is materialised before
//! `self` is touched.
//!
//! # Ordering Contracts
//!
//! | Operation               | Resulting order                                                     |
//! |-------------------------|---------------------------------------------------------------------|
//! | `union_with`            | `self` unchanged, then new elements in first-occurrence order of `other` |
//! | `intersect_with`        | survivors in their original `self` order                           |
//! | `except_with`           | survivors in their original `self` order                           |
//! | `symmetric_except_with` | `self` survivors in `self` order, then new elements in `other` order |
//!
//! # Examples
//!
//! ```rust
//! use linkset::LinkedHashSet;
//!
//! let mut set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
//! set.union_with([10, 30, 15]);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 10, 5, 30, 15]);
//!
//! let mut set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
//! set.symmetric_except_with([1, 10, 3, 9]);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 3, 9]);
//! ```

use std::borrow::Borrow;

use super::LinkedHashSet;
use super::index::Membership;
use crate::equivalence::Equivalence;

impl<T, E: Equivalence<T>> LinkedHashSet<T, E> {
    fn membership_of<I>(&self, other: I) -> Membership<'_, T, I::Item, E>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Membership::collect(&self.equivalence, other)
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Adds every element of `other` that is not already present.
    ///
    /// Existing elements keep their positions. New elements are appended in
    /// the order they first appear in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
    /// set.union_with([10, 30, 15, 30]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 10, 5, 30, 15]);
    /// ```
    pub fn union_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.len();
        self.extend(other);
        log::trace!("union_with: {before} -> {} elements", self.len());
    }

    /// Keeps only the elements that also occur in `other`.
    ///
    /// Survivors keep the order they had in `self`; the order of `other` is
    /// irrelevant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [1, 10, 5, 7, 8, 9].into_iter().collect();
    /// set.intersect_with([7, 10, 9, 18]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 7, 9]);
    /// ```
    pub fn intersect_with<I>(&mut self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        if self.is_empty() {
            return;
        }
        let before = self.len();
        let retained = self.membership_of(other);
        let mut rejected = Vec::new();
        let mut cursor = self.nodes.cursor();
        while let Some((index, value)) = cursor.next_front() {
            if !retained.contains(value) {
                rejected.push(index);
            }
        }
        drop(retained);
        for index in rejected {
            self.remove_node(index);
        }
        log::trace!("intersect_with: {before} -> {} elements", self.len());
    }

    /// Removes every element that occurs in `other`.
    ///
    /// Survivors keep the order they had in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [1, 10, 5, 7, 8, 9].into_iter().collect();
    /// set.except_with([7, 10, 9, 18]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 5, 8]);
    /// ```
    pub fn except_with<I>(&mut self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let before = self.len();
        for element in other {
            if self.is_empty() {
                break;
            }
            self.remove(<I::Item as Borrow<T>>::borrow(&element));
        }
        log::trace!("except_with: {before} -> {} elements", self.len());
    }

    /// Keeps the elements that occur in exactly one of `self` and `other`.
    ///
    /// The result is the elements of `self` that are not in `other`, in their
    /// original order, followed by the elements of `other` that were not in
    /// `self`, in the order they first appear in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let mut set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
    /// set.symmetric_except_with([1, 10, 3, 9, 3]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 3, 9]);
    /// ```
    pub fn symmetric_except_with<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.len();
        let distinct = self.membership_of(other).into_items();
        for element in distinct {
            if !self.remove(&element) {
                self.add(element);
            }
        }
        log::trace!("symmetric_except_with: {before} -> {} elements", self.len());
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    /// Returns `true` if every element of `self` occurs in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = [1, 2].into_iter().collect();
    /// assert!(set.is_subset_of([2, 3, 1]));
    /// assert!(!set.is_subset_of([2, 3]));
    /// ```
    #[must_use]
    pub fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        if self.is_empty() {
            return true;
        }
        let other = self.membership_of(other);
        other.len() >= self.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if every element of `other` occurs in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<&str> = ["one", "two", "three"].into_iter().collect();
    /// assert!(set.is_superset_of(["one", "two"]));
    /// assert!(!set.is_superset_of(["one", "four"]));
    /// ```
    #[must_use]
    pub fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        other
            .into_iter()
            .all(|element| self.contains(<I::Item as Borrow<T>>::borrow(&element)))
    }

    /// Returns `true` if `self` is a subset of `other` and `other` has more
    /// distinct elements.
    #[must_use]
    pub fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.membership_of(other);
        other.len() > self.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if `self` is a superset of `other` and has more elements
    /// than `other` has distinct elements.
    #[must_use]
    pub fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        if self.is_empty() {
            return false;
        }
        let other = self.membership_of(other);
        self.len() > other.len()
            && other
                .into_items()
                .iter()
                .all(|element| self.contains(<I::Item as Borrow<T>>::borrow(element)))
    }

    /// Returns `true` if `self` and `other` share at least one element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = [1, 2].into_iter().collect();
    /// assert!(set.overlaps([5, 2]));
    /// assert!(!set.overlaps([5, 6]));
    /// ```
    #[must_use]
    pub fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        if self.is_empty() {
            return false;
        }
        other
            .into_iter()
            .any(|element| self.contains(<I::Item as Borrow<T>>::borrow(&element)))
    }

    /// Returns `true` if `self` and `other` have the same distinct elements,
    /// in any order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::LinkedHashSet;
    ///
    /// let set: LinkedHashSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(set.set_equals([3, 2, 1, 3]));
    /// assert!(!set.set_equals([1, 2]));
    /// ```
    #[must_use]
    pub fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = self.membership_of(other);
        other.len() == self.len() && self.iter().all(|element| other.contains(element))
    }
}
