//! Pluggable equality and hashing strategies.
//!
//! A set decides whether two elements are "the same" through an
//! [`Equivalence`] rather than through `T: Eq` directly. This makes it
//! possible to build, for example, a case-insensitive set of strings
//! without wrapping every element in a newtype.
//!
//! - [`NaturalEquivalence`]: the element's own `Eq` and `Hash` (the default)
//! - [`KeyEquivalence`]: equality of a projected key
//!
//! # Hash Builders
//!
//! [`DefaultHashBuilder`] is the hasher used by [`NaturalEquivalence`] and by
//! every internal index. It is `std::hash::RandomState` unless one of the
//! `fxhash` or `ahash` features selects a faster builder.
//!
//! # Examples
//!
//! ```rust
//! use linkset::{KeyEquivalence, LinkedHashSet};
//!
//! let mut set = LinkedHashSet::with_equivalence(KeyEquivalence::new(|name: &String| {
//!     name.to_lowercase()
//! }));
//! assert!(set.add("Alice".to_string()));
//! assert!(!set.add("ALICE".to_string()));
//! assert_eq!(set.len(), 1);
//! ```

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

/// Hash builder used when no other builder is specified.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hash builder used when no other builder is specified.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hash builder used when no other builder is specified.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder = std::hash::RandomState;

/// A rule deciding when two values are the same element of a set.
///
/// # Laws
///
/// Implementations must satisfy, for all `a`, `b`, `c`:
///
/// - **Reflexivity**: `equivalent(a, a)`
/// - **Symmetry**: `equivalent(a, b) == equivalent(b, a)`
/// - **Transitivity**: `equivalent(a, b) && equivalent(b, c)` implies `equivalent(a, c)`
/// - **Hash consistency**: `equivalent(a, b)` implies `hash_of(a) == hash_of(b)`
///
/// A set built on a strategy that breaks these laws will not lose memory
/// safety, but membership answers become unspecified.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `left` and `right` denote the same element.
    fn equivalent(&self, left: &T, right: &T) -> bool;

    /// Returns the hash of `value`, consistent with [`Equivalence::equivalent`].
    fn hash_of(&self, value: &T) -> u64;
}

impl<T: ?Sized, E: Equivalence<T> + ?Sized> Equivalence<T> for &E {
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        (**self).equivalent(left, right)
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        (**self).hash_of(value)
    }
}

// =============================================================================
// NaturalEquivalence
// =============================================================================

/// Equality through the element type's own `Eq` and `Hash`.
///
/// # Examples
///
/// ```rust
/// use linkset::{Equivalence, NaturalEquivalence};
///
/// let equivalence: NaturalEquivalence = NaturalEquivalence::new();
/// assert!(equivalence.equivalent(&1, &1));
/// assert_eq!(equivalence.hash_of(&"a"), equivalence.hash_of(&"a"));
/// ```
#[derive(Clone, Default)]
pub struct NaturalEquivalence<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl NaturalEquivalence {
    /// Creates a strategy hashing through [`DefaultHashBuilder`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> NaturalEquivalence<S> {
    /// Creates a strategy that hashes through `hash_builder`.
    #[inline]
    #[must_use]
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the underlying hash builder.
    #[inline]
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<T: ?Sized + Hash + Eq, S: BuildHasher> Equivalence<T> for NaturalEquivalence<S> {
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        left == right
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.hash_builder.hash_one(value)
    }
}

impl<S> fmt::Debug for NaturalEquivalence<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("NaturalEquivalence")
    }
}

// =============================================================================
// KeyEquivalence
// =============================================================================

/// Equality of a key projected out of each element.
///
/// Two elements are the same when `key(left) == key(right)`. The projection
/// is evaluated on every comparison and every hash, so it should be cheap.
///
/// # Examples
///
/// ```rust
/// use linkset::{Equivalence, KeyEquivalence};
///
/// let by_length = KeyEquivalence::new(|word: &&str| word.len());
/// assert!(by_length.equivalent(&"cat", &"dog"));
/// assert!(!by_length.equivalent(&"cat", &"horse"));
/// ```
pub struct KeyEquivalence<F, K, S = DefaultHashBuilder> {
    key: F,
    hash_builder: S,
    marker: PhantomData<fn() -> K>,
}

impl<F, K> KeyEquivalence<F, K> {
    /// Creates a strategy comparing elements by `key`, hashing keys through
    /// [`DefaultHashBuilder`].
    ///
    /// `T` only pins the closure's argument type so `|value: &String| ..`
    /// infers without annotations at the call site.
    #[inline]
    #[must_use]
    pub fn new<T: ?Sized>(key: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        Self::with_hasher(key, DefaultHashBuilder::default())
    }
}

impl<F, K, S> KeyEquivalence<F, K, S> {
    /// Creates a strategy comparing elements by `key`, hashing keys through
    /// `hash_builder`.
    #[inline]
    #[must_use]
    pub const fn with_hasher(key: F, hash_builder: S) -> Self {
        Self {
            key,
            hash_builder,
            marker: PhantomData,
        }
    }
}

impl<T, F, K, S> Equivalence<T> for KeyEquivalence<F, K, S>
where
    T: ?Sized,
    F: Fn(&T) -> K,
    K: Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn equivalent(&self, left: &T, right: &T) -> bool {
        (self.key)(left) == (self.key)(right)
    }

    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.hash_builder.hash_one((self.key)(value))
    }
}

impl<F: Clone, K, S: Clone> Clone for KeyEquivalence<F, K, S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            hash_builder: self.hash_builder.clone(),
            marker: PhantomData,
        }
    }
}

impl<F, K, S> fmt::Debug for KeyEquivalence<F, K, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("KeyEquivalence")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, true)]
    #[case(1, 2, false)]
    #[case(-7, -7, true)]
    fn test_natural_equivalence_uses_eq(#[case] left: i32, #[case] right: i32, #[case] expected: bool) {
        let equivalence: NaturalEquivalence = NaturalEquivalence::new();
        assert_eq!(equivalence.equivalent(&left, &right), expected);
    }

    #[rstest]
    fn test_natural_equivalence_hash_is_deterministic() {
        let equivalence: NaturalEquivalence = NaturalEquivalence::new();
        assert_eq!(
            equivalence.hash_of("hello"),
            equivalence.hash_of(&*"hello".to_string())
        );
    }

    #[rstest]
    fn test_key_equivalence_hash_consistent_with_equality() {
        let equivalence = KeyEquivalence::new(|value: &String| value.to_lowercase());
        let upper = "HELLO".to_string();
        let lower = "hello".to_string();

        assert!(equivalence.equivalent(&upper, &lower));
        assert_eq!(equivalence.hash_of(&upper), equivalence.hash_of(&lower));
    }

    #[rstest]
    fn test_reference_delegates_to_strategy() {
        let equivalence = KeyEquivalence::new(|value: &i32| value.abs());
        let borrowed = &equivalence;

        assert!(borrowed.equivalent(&3, &-3));
        assert_eq!(borrowed.hash_of(&3), equivalence.hash_of(&-3));
    }
}
