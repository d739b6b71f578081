//! The operation set shared by every set surface in this crate.
//!
//! [`SetCollection`] is implemented by [`LinkedHashSet`] itself and by the
//! wrappers that restrict or guard it. Generic code written against the
//! trait works unchanged over a plain set, a read-only view, or a
//! lock-guarded set.
//!
//! Mutating operations return [`SetResult`] because a wrapper may refuse
//! them; the plain set never does.
//!
//! # Examples
//!
//! ```rust
//! use linkset::{LinkedHashSet, SetCollection, SetResult};
//!
//! fn register<S: SetCollection<u32>>(set: &mut S, identifiers: &[u32]) -> SetResult<usize> {
//!     set.union_with(identifiers.iter().copied())?;
//!     Ok(set.len())
//! }
//!
//! let mut set = LinkedHashSet::new();
//! assert_eq!(register(&mut set, &[3, 1, 3]).unwrap(), 2);
//! ```

use std::borrow::Borrow;

use crate::equivalence::Equivalence;
use crate::error::SetResult;
use crate::linked::LinkedHashSet;

/// Queries and mutations common to every set type in this crate.
///
/// Ordering guarantees are those of the underlying [`LinkedHashSet`]; see
/// its documentation and the set algebra methods for the exact contracts.
pub trait SetCollection<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the set contains `value`.
    fn contains(&self, value: &T) -> bool;

    /// Returns `true` if every mutating operation is rejected.
    fn is_read_only(&self) -> bool {
        false
    }

    /// Returns the elements in iteration order as an independent `Vec`.
    fn snapshot(&self) -> Vec<T>
    where
        T: Clone;

    /// Writes the elements in iteration order into `buffer` from `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::OutOfBounds`](crate::SetError::OutOfBounds) if
    /// `buffer` is too small.
    fn copy_into(&self, buffer: &mut [T], offset: usize) -> SetResult<()>
    where
        T: Clone;

    /// Adds `value`; returns whether it was absent.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn add(&mut self, value: T) -> SetResult<bool>;

    /// Removes `value`; returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn remove(&mut self, value: &T) -> SetResult<bool>;

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn clear(&mut self) -> SetResult<()>;

    /// Adds every element of `other` not already present, appending new
    /// elements in first-occurrence order.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn union_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>;

    /// Keeps only elements that also occur in `other`, in their current order.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn intersect_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Removes every element that occurs in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn except_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Keeps the elements that occur in exactly one of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::UnsupportedOperation`](crate::SetError::UnsupportedOperation)
    /// on a read-only set.
    fn symmetric_except_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>;

    /// Returns `true` if every element occurs in `other`.
    fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Returns `true` if every element of `other` occurs in this set.
    fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Returns `true` for a subset of `other` with fewer distinct elements.
    fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Returns `true` for a superset of `other` with more elements than
    /// `other` has distinct elements.
    fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Returns `true` if at least one element is shared with `other`.
    fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Returns `true` if this set and `other` have the same distinct elements.
    fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>;
}

impl<T, E: Equivalence<T>> SetCollection<T> for LinkedHashSet<T, E> {
    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn contains(&self, value: &T) -> bool {
        Self::contains(self, value)
    }

    fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        Self::snapshot(self)
    }

    fn copy_into(&self, buffer: &mut [T], offset: usize) -> SetResult<()>
    where
        T: Clone,
    {
        Self::copy_into(self, buffer, offset)
    }

    #[inline]
    fn add(&mut self, value: T) -> SetResult<bool> {
        Ok(Self::add(self, value))
    }

    #[inline]
    fn remove(&mut self, value: &T) -> SetResult<bool> {
        Ok(Self::remove(self, value))
    }

    fn clear(&mut self) -> SetResult<()> {
        Self::clear(self);
        Ok(())
    }

    fn union_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        Self::union_with(self, other);
        Ok(())
    }

    fn intersect_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::intersect_with(self, other);
        Ok(())
    }

    fn except_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::except_with(self, other);
        Ok(())
    }

    fn symmetric_except_with<I>(&mut self, other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        Self::symmetric_except_with(self, other);
        Ok(())
    }

    fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::is_subset_of(self, other)
    }

    fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::is_superset_of(self, other)
    }

    fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::is_proper_subset_of(self, other)
    }

    fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::is_proper_superset_of(self, other)
    }

    fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::overlaps(self, other)
    }

    fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Self::set_equals(self, other)
    }
}
