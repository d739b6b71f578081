//! Hash-keyed lookup from elements to their storage slots.
//!
//! The index never stores elements itself. It maps the strategy hash of an
//! element to the slots holding candidates with that hash; callers confirm a
//! hit by running the strategy's equality against the stored value. Most
//! buckets hold a single slot, so buckets are inline `SmallVec`s.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::equivalence::{DefaultHashBuilder, Equivalence};

/// Slots stored inline per bucket before spilling to the heap.
const INLINE_BUCKET: usize = 1;

type Bucket = SmallVec<[usize; INLINE_BUCKET]>;

/// Map from strategy hash to candidate slots.
#[derive(Clone, Default)]
pub(crate) struct HashIndex {
    buckets: HashMap<u64, Bucket, DefaultHashBuilder>,
}

impl HashIndex {
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: HashMap::with_capacity_and_hasher(capacity, DefaultHashBuilder::default()),
        }
    }

    #[inline]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.buckets.reserve(additional);
    }

    /// Returns the first slot under `hash` accepted by `is_match`.
    #[inline]
    pub(crate) fn find<P>(&self, hash: u64, mut is_match: P) -> Option<usize>
    where
        P: FnMut(usize) -> bool,
    {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|slot| is_match(*slot))
    }

    #[inline]
    pub(crate) fn insert(&mut self, hash: u64, slot: usize) {
        self.buckets.entry(hash).or_default().push(slot);
    }

    /// Removes `slot` from the bucket under `hash`. Returns `false` if it was
    /// not indexed there.
    pub(crate) fn remove(&mut self, hash: u64, slot: usize) -> bool {
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|candidate| *candidate == slot) else {
            return false;
        };
        bucket.swap_remove(position);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        true
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Total number of indexed slots.
    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> usize {
        self.buckets.values().map(SmallVec::len).sum()
    }
}

// =============================================================================
// Membership
// =============================================================================

/// A de-duplicated snapshot of an input sequence.
///
/// Items are kept in the order of their first occurrence; later occurrences
/// that the strategy considers equal are dropped. The snapshot owns (or
/// borrows, if `B` is a reference) the items, so it stays valid while the set
/// whose strategy it borrows is being mutated.
pub(crate) struct Membership<'e, T: ?Sized, B, E> {
    items: Vec<B>,
    index: HashIndex,
    equivalence: &'e E,
    marker: PhantomData<fn(&T)>,
}

impl<'e, T, B, E> Membership<'e, T, B, E>
where
    T: ?Sized,
    B: Borrow<T>,
    E: Equivalence<T>,
{
    /// Materialises `other` under `equivalence`.
    pub(crate) fn collect<I>(equivalence: &'e E, other: I) -> Self
    where
        I: IntoIterator<Item = B>,
    {
        let other = other.into_iter();
        let (lower, _) = other.size_hint();
        let mut membership = Self {
            items: Vec::with_capacity(lower),
            index: HashIndex::with_capacity(lower),
            equivalence,
            marker: PhantomData,
        };
        for item in other {
            membership.insert(item);
        }
        membership
    }

    fn insert(&mut self, item: B) -> bool {
        let value = <B as Borrow<T>>::borrow(&item);
        let hash = self.equivalence.hash_of(value);
        if self.position(hash, value).is_some() {
            return false;
        }
        self.index.insert(hash, self.items.len());
        self.items.push(item);
        true
    }

    fn position(&self, hash: u64, value: &T) -> Option<usize> {
        self.index.find(hash, |slot| {
            self.equivalence
                .equivalent(<B as Borrow<T>>::borrow(&self.items[slot]), value)
        })
    }

    #[inline]
    pub(crate) fn contains(&self, value: &T) -> bool {
        self.position(self.equivalence.hash_of(value), value).is_some()
    }

    /// Number of distinct items.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Distinct items in first-occurrence order.
    #[inline]
    pub(crate) fn into_items(self) -> Vec<B> {
        self.items
    }
}
