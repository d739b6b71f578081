//! A set shared between threads behind a single lock.
//!
//! [`SynchronizedSet`] is a cloneable handle to one [`LinkedHashSet`] guarded
//! by a [`parking_lot::Mutex`]. Each method holds the lock only for its own
//! duration. Any sequence supplied as `other` is drained into a buffer before
//! the lock is taken, so `other` may itself read the same set.
//!
//! Iteration is not guarded. Use [`SynchronizedSet::snapshot`] for a
//! consistent copy, or hold [`SynchronizedSet::sync_root`] for a multi-step
//! traversal.
//!
//! # Examples
//!
//! ```rust
//! use linkset::{LinkedHashSet, SynchronizedSet};
//! use std::thread;
//!
//! let set = SynchronizedSet::new(LinkedHashSet::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = set.clone();
//!         thread::spawn(move || {
//!             for value in 0..100 {
//!                 set.add(worker * 100 + value);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(set.len(), 400);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::collection::SetCollection;
use crate::equivalence::{Equivalence, NaturalEquivalence};
use crate::error::SetResult;
use crate::linked::LinkedHashSet;

/// A thread-safe handle to a shared [`LinkedHashSet`].
///
/// Cloning the handle shares the store and its lock.
pub struct SynchronizedSet<T, E = NaturalEquivalence> {
    shared: Arc<Mutex<LinkedHashSet<T, E>>>,
}

impl<T, E> SynchronizedSet<T, E> {
    /// Takes ownership of `set` and guards it with a new lock.
    #[must_use]
    pub fn new(set: LinkedHashSet<T, E>) -> Self {
        Self::from_shared(Arc::new(Mutex::new(set)))
    }

    /// Wraps a lock that other code may already hold handles to.
    #[must_use]
    pub const fn from_shared(shared: Arc<Mutex<LinkedHashSet<T, E>>>) -> Self {
        Self { shared }
    }

    /// Returns the lock that guards the set.
    ///
    /// Holding the guard excludes every other handle, so this is the way to
    /// iterate without interleaved mutation. The lock is not reentrant: while
    /// the guard is held, work through the guard and not through this
    /// handle's methods, which would wait on the same lock forever.
    /// Formatting the handle is the exception and prints `<locked>`.
    ///
    /// ```rust
    /// use linkset::{LinkedHashSet, SynchronizedSet};
    ///
    /// let set = SynchronizedSet::new([3, 1, 2].into_iter().collect::<LinkedHashSet<_>>());
    /// let total: i32 = set.sync_root().lock().iter().sum();
    /// assert_eq!(total, 6);
    /// ```
    #[inline]
    pub fn sync_root(&self) -> &Arc<Mutex<LinkedHashSet<T, E>>> {
        &self.shared
    }

    /// Acquires the lock and returns its guard.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, LinkedHashSet<T, E>> {
        self.shared.lock()
    }

    /// Returns the set if this is the only handle to it.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged while other handles exist.
    pub fn into_inner(self) -> Result<LinkedHashSet<T, E>, Self> {
        Arc::try_unwrap(self.shared)
            .map(Mutex::into_inner)
            .map_err(Self::from_shared)
    }

    /// Returns `true` if `self` and `other` guard the same store.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.shared.lock().len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shared.lock().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.shared.lock().clear();
    }

    /// Copies the elements in insertion order under a single lock.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.shared.lock().snapshot()
    }

    /// Writes the elements into `buffer` from `offset` under a single lock.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::OutOfBounds`](crate::SetError::OutOfBounds) if
    /// `buffer` is too small.
    pub fn copy_into(&self, buffer: &mut [T], offset: usize) -> SetResult<()>
    where
        T: Clone,
    {
        self.shared.lock().copy_into(buffer, offset)
    }

    /// Returns a read-only view of this handle.
    ///
    /// The view cannot hand out an iterator, since borrowed elements would
    /// outlive the lock. Use [`snapshot`](crate::SetCollection::snapshot)
    /// or [`ReadOnlySet::read`](crate::ReadOnlySet::read) to traverse it.
    #[cfg(feature = "read-only")]
    #[inline]
    pub const fn as_read_only(&self) -> crate::ReadOnlySet<'_, Self> {
        crate::ReadOnlySet::new(self)
    }
}

impl<T, E: Equivalence<T>> SynchronizedSet<T, E> {
    /// Returns `true` if the set contains `value`.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.shared.lock().contains(value)
    }

    /// Adds `value`; returns whether it was absent.
    pub fn add(&self, value: T) -> bool {
        self.shared.lock().add(value)
    }

    /// Removes `value`; returns whether it was present.
    pub fn remove(&self, value: &T) -> bool {
        self.shared.lock().remove(value)
    }

    /// See [`LinkedHashSet::union_with`].
    pub fn union_with<I>(&self, other: I)
    where
        I: IntoIterator<Item = T>,
    {
        let other = drain(other);
        self.shared.lock().union_with(other);
    }

    /// See [`LinkedHashSet::intersect_with`].
    pub fn intersect_with<I>(&self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().intersect_with(other);
    }

    /// See [`LinkedHashSet::except_with`].
    pub fn except_with<I>(&self, other: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().except_with(other);
    }

    /// See [`LinkedHashSet::symmetric_except_with`].
    pub fn symmetric_except_with<I>(&self, other: I)
    where
        I: IntoIterator<Item = T>,
    {
        let other = drain(other);
        self.shared.lock().symmetric_except_with(other);
    }

    /// See [`LinkedHashSet::is_subset_of`].
    pub fn is_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().is_subset_of(other)
    }

    /// See [`LinkedHashSet::is_superset_of`].
    pub fn is_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().is_superset_of(other)
    }

    /// See [`LinkedHashSet::is_proper_subset_of`].
    pub fn is_proper_subset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().is_proper_subset_of(other)
    }

    /// See [`LinkedHashSet::is_proper_superset_of`].
    pub fn is_proper_superset_of<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().is_proper_superset_of(other)
    }

    /// See [`LinkedHashSet::overlaps`].
    pub fn overlaps<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().overlaps(other)
    }

    /// See [`LinkedHashSet::set_equals`].
    pub fn set_equals<I>(&self, other: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let other = drain(other);
        self.shared.lock().set_equals(other)
    }
}

/// Buffers `other` so it is fully evaluated before the lock is taken.
fn drain<I: IntoIterator>(other: I) -> Vec<I::Item> {
    other.into_iter().collect()
}

impl<T, E> Clone for SynchronizedSet<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E: Default> Default for SynchronizedSet<T, E> {
    fn default() -> Self {
        Self::new(LinkedHashSet::default())
    }
}

impl<T, E> From<LinkedHashSet<T, E>> for SynchronizedSet<T, E> {
    fn from(set: LinkedHashSet<T, E>) -> Self {
        Self::new(set)
    }
}

/// Stands in for the contents while another guard holds the lock.
struct LockedPlaceholder;

impl fmt::Debug for LockedPlaceholder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<locked>")
    }
}

impl<T: fmt::Debug, E> fmt::Debug for SynchronizedSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = formatter.debug_tuple("SynchronizedSet");
        match self.shared.try_lock() {
            Some(guard) => tuple.field(&*guard),
            None => tuple.field(&LockedPlaceholder),
        };
        tuple.finish()
    }
}

impl<T: fmt::Display, E> fmt::Display for SynchronizedSet<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.try_lock() {
            Some(guard) => fmt::Display::fmt(&*guard, formatter),
            None => formatter.write_str("<locked>"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, E> serde::Serialize for SynchronizedSet<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&*self.shared.lock(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::Deserialize<'de> for SynchronizedSet<T, E>
where
    T: serde::Deserialize<'de>,
    E: Equivalence<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <LinkedHashSet<T, E> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::new)
    }
}

// =============================================================================
// SetCollection Implementation
// =============================================================================

impl<T, E: Equivalence<T>> SetCollection<T> for SynchronizedSet<T, E> {
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

    fn add(&mut self, value: T) -> SetResult<bool> {
        Ok(Self::add(self, value))
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use static_assertions::assert_impl_all;

    assert_impl_all!(SynchronizedSet<i32>: Send, Sync, Clone);
    assert_impl_all!(SynchronizedSet<String>: Send, Sync);

    fn sample() -> SynchronizedSet<i32> {
        SynchronizedSet::new([1, 10, 5].into_iter().collect())
    }

    #[rstest]
    fn test_clones_share_one_store() {
        let set = sample();
        let other = set.clone();

        other.add(30);

        assert!(set.ptr_eq(&other));
        assert_eq!(set.snapshot(), vec![1, 10, 5, 30]);
    }

    #[rstest]
    fn test_other_may_read_the_same_set() {
        let set = sample();
        let reader = set.clone();

        // `other` locks the set while it is drained; draining happens before
        // the bulk operation takes the lock.
        set.union_with((0..3).map(|offset| reader.len() as i32 + offset));

        assert_eq!(set.snapshot(), vec![1, 10, 5, 3, 4]);
    }

    #[rstest]
    fn test_into_inner_requires_unique_handle() {
        let set = sample();
        let other = set.clone();

        let set = set.into_inner().unwrap_err();
        drop(other);

        assert_eq!(set.into_inner().unwrap().snapshot(), vec![1, 10, 5]);
    }

    #[rstest]
    fn test_trait_mutators_succeed() {
        let mut set = sample();

        assert_eq!(SetCollection::add(&mut set, 2), Ok(true));
        assert_eq!(SetCollection::except_with(&mut set, [1]), Ok(()));
        assert!(!SetCollection::is_read_only(&set));
        assert_eq!(set.snapshot(), vec![10, 5, 2]);
    }

    #[rstest]
    fn test_formatting_locks_once() {
        let set = sample();

        assert_eq!(set.to_string(), "{1, 10, 5}");
        assert_eq!(format!("{set:?}"), "SynchronizedSet({1, 10, 5})");
    }

    #[rstest]
    fn test_formatting_while_guard_is_held() {
        let set = sample();
        let (sender, receiver) = std::sync::mpsc::channel();

        let worker = {
            let set = set.clone();
            std::thread::spawn(move || {
                let guard = set.sync_root().lock();
                let rendered = (format!("{set:?}"), set.to_string());
                drop(guard);
                sender.send(rendered).unwrap();
            })
        };

        let (debug, display) = receiver
            .recv_timeout(std::time::Duration::from_secs(3))
            .unwrap();
        worker.join().unwrap();

        assert_eq!(debug, "SynchronizedSet(<locked>)");
        assert_eq!(display, "<locked>");
        assert_eq!(set.to_string(), "{1, 10, 5}");
    }
}
