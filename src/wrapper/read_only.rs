//! Read-only views over a set.
//!
//! A [`ReadOnlySet`] borrows the set it wraps. It never copies elements, so
//! a view over a [`SynchronizedSet`](crate::SynchronizedSet) observes changes
//! made through other handles to the same store.
//!
//! # Examples
//!
//! ```rust
//! use linkset::{LinkedHashSet, SetCollection, SetError};
//!
//! let set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();
//! let mut view = set.as_read_only();
//!
//! assert!(view.contains(&10));
//! assert_eq!(
//!     view.add(2),
//!     Err(SetError::UnsupportedOperation { operation: "add" })
//! );
//! assert_eq!(set.len(), 3);
//! ```

use std::borrow::Borrow;
use std::fmt;

use crate::collection::SetCollection;
use crate::equivalence::Equivalence;
use crate::error::{SetError, SetResult};
use crate::linked::{Iter, LinkedHashSet};

/// A view that forwards queries and rejects mutations.
///
/// Every mutating method of [`SetCollection`] returns
/// [`SetError::UnsupportedOperation`] and leaves the wrapped set untouched.
pub struct ReadOnlySet<'a, S: ?Sized> {
    inner: &'a S,
}

impl<'a, S: ?Sized> ReadOnlySet<'a, S> {
    /// Wraps `inner` in a read-only view.
    #[inline]
    pub const fn new(inner: &'a S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped set.
    #[inline]
    pub const fn get_ref(&self) -> &'a S {
        self.inner
    }
}

fn reject<R>(operation: &'static str) -> SetResult<R> {
    log::debug!("rejected {operation} on read-only set");
    Err(SetError::UnsupportedOperation { operation })
}

impl<'a, T, E> ReadOnlySet<'a, LinkedHashSet<T, E>> {
    /// Returns an iterator over the wrapped set in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'a, T> {
        self.inner.iter()
    }

    /// Returns the oldest element.
    #[inline]
    pub fn first(&self) -> Option<&'a T> {
        self.inner.first()
    }

    /// Returns the newest element.
    #[inline]
    pub fn last(&self) -> Option<&'a T> {
        self.inner.last()
    }
}

#[cfg(feature = "synchronized")]
impl<T, E> ReadOnlySet<'_, crate::SynchronizedSet<T, E>> {
    /// Runs `action` on the shared set while holding its lock.
    ///
    /// `action` only gets a shared reference, so the view stays read-only.
    /// It must not call back into the same handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::{LinkedHashSet, SynchronizedSet};
    ///
    /// let set = SynchronizedSet::new([3, 1, 2].into_iter().collect::<LinkedHashSet<_>>());
    /// let view = set.as_read_only();
    /// assert_eq!(view.read(|inner| inner.iter().copied().collect::<Vec<_>>()), vec![3, 1, 2]);
    /// ```
    pub fn read<R>(&self, action: impl FnOnce(&LinkedHashSet<T, E>) -> R) -> R {
        action(&self.inner.lock())
    }
}

impl<T, E> LinkedHashSet<T, E> {
    /// Returns a view of this set that rejects every mutation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use linkset::{LinkedHashSet, SetCollection};
    ///
    /// let set: LinkedHashSet<&str> = ["a", "b"].into_iter().collect();
    /// let view = set.as_read_only();
    /// assert!(view.is_read_only());
    /// assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    /// ```
    #[inline]
    pub const fn as_read_only(&self) -> ReadOnlySet<'_, Self> {
        ReadOnlySet::new(self)
    }
}

impl<S: ?Sized> Clone for ReadOnlySet<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ReadOnlySet<'_, S> {}

impl<'a, T, E> IntoIterator for &ReadOnlySet<'a, LinkedHashSet<T, E>> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, E> IntoIterator for ReadOnlySet<'a, LinkedHashSet<T, E>> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<S: fmt::Debug + ?Sized> fmt::Debug for ReadOnlySet<'_, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("ReadOnlySet").field(&self.inner).finish()
    }
}

impl<S: fmt::Display + ?Sized> fmt::Display for ReadOnlySet<'_, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner, formatter)
    }
}

// =============================================================================
// SetCollection Implementation
// =============================================================================

impl<T, S: SetCollection<T> + ?Sized> SetCollection<T> for ReadOnlySet<'_, S> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    #[inline]
    fn is_read_only(&self) -> bool {
        true
    }

    fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.snapshot()
    }

    fn copy_into(&self, buffer: &mut [T], offset: usize) -> SetResult<()>
    where
        T: Clone,
    {
        self.inner.copy_into(buffer, offset)
    }

    fn add(&mut self, _value: T) -> SetResult<bool> {
        reject("add")
    }

    fn remove(&mut self, _value: &T) -> SetResult<bool> {
        reject("remove")
    }

    fn clear(&mut self) -> SetResult<()> {
        reject("clear")
    }

    fn union_with<I>(&mut self, _other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        reject("union_with")
    }

    fn intersect_with<I>(&mut self, _other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        reject("intersect_with")
    }

    fn except_with<I>(&mut self, _other: I) -> SetResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        reject("except_with")
    }

    fn symmetric_except_with<I>(&mut self, _other: I) -> SetResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        reject("symmetric_except_with")
    }

    fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.is_subset_of(other)
    }

    fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.is_superset_of(other)
    }

    fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.is_proper_subset_of(other)
    }

    fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.is_proper_superset_of(other)
    }

    fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.overlaps(other)
    }

    fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.inner.set_equals(other)
    }
}

impl<T, E, F> PartialEq<LinkedHashSet<T, F>> for ReadOnlySet<'_, LinkedHashSet<T, E>>
where
    E: Equivalence<T>,
{
    fn eq(&self, other: &LinkedHashSet<T, F>) -> bool {
        self.inner.set_equals(other.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> LinkedHashSet<i32> {
        [1, 10, 5].into_iter().collect()
    }

    #[rstest]
    #[case::add("add")]
    #[case::remove("remove")]
    #[case::clear("clear")]
    #[case::union_with("union_with")]
    #[case::intersect_with("intersect_with")]
    #[case::except_with("except_with")]
    #[case::symmetric_except_with("symmetric_except_with")]
    fn test_mutator_is_rejected(#[case] operation: &'static str) {
        let set = sample();
        let mut view = set.as_read_only();

        let result = match operation {
            "add" => view.add(7).map(|_| ()),
            "remove" => view.remove(&1).map(|_| ()),
            "clear" => SetCollection::clear(&mut view),
            "union_with" => SetCollection::union_with(&mut view, [7]),
            "intersect_with" => SetCollection::intersect_with(&mut view, [1]),
            "except_with" => SetCollection::except_with(&mut view, [1]),
            "symmetric_except_with" => SetCollection::symmetric_except_with(&mut view, [7]),
            _ => unreachable!(),
        };

        assert_eq!(result, Err(SetError::UnsupportedOperation { operation }));
        assert_eq!(set.snapshot(), vec![1, 10, 5]);
    }

    #[rstest]
    fn test_queries_are_forwarded() {
        let set = sample();
        let view = set.as_read_only();

        assert_eq!(view.len(), 3);
        assert!(view.contains(&5));
        assert!(!view.contains(&2));
        assert!(view.is_read_only());
        assert_eq!(view.first(), Some(&1));
        assert_eq!(view.last(), Some(&5));
        assert!(view.is_subset_of([5, 10, 1, 0]));
        assert!(view.overlaps([5]));
        assert_eq!(view, sample());
    }

    #[rstest]
    fn test_formatting_matches_wrapped_set() {
        let set = sample();
        let view = set.as_read_only();

        assert_eq!(view.to_string(), "{1, 10, 5}");
        assert_eq!(format!("{view:?}"), "ReadOnlySet({1, 10, 5})");
    }

    #[rstest]
    fn test_copy_into_forwards_bounds_error() {
        let set = sample();
        let view = set.as_read_only();
        let mut buffer = [0; 2];

        assert_eq!(
            view.copy_into(&mut buffer, 0),
            Err(SetError::OutOfBounds {
                offset: 0,
                required: 3,
                capacity: 2
            })
        );
    }
}
