//! Tests for the fast hash feature flags.
//!
//! `fxhash` and `ahash` only swap the default hash builder. Ordering and
//! membership must not depend on which builder is selected.

use linkset::{DefaultHashBuilder, LinkedHashSet, NaturalEquivalence};
use rstest::rstest;

// =============================================================================
// Builder Selection
// =============================================================================

#[cfg(feature = "fxhash")]
#[rstest]
fn test_fxhash_is_default_builder() {
    let builder: DefaultHashBuilder = rustc_hash::FxBuildHasher;
    let strategy = NaturalEquivalence::with_hasher(builder);

    let set: LinkedHashSet<u32, _> = {
        let mut set = LinkedHashSet::with_equivalence(strategy);
        set.extend([3, 1, 2]);
        set
    };
    assert_eq!(set.snapshot(), vec![3, 1, 2]);
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
#[rstest]
fn test_ahash_is_default_builder() {
    let builder: DefaultHashBuilder = ahash::RandomState::new();
    let set: LinkedHashSet<u32> = {
        let mut set = LinkedHashSet::with_equivalence(NaturalEquivalence::with_hasher(builder));
        set.extend([3, 1, 2]);
        set
    };
    assert_eq!(set.snapshot(), vec![3, 1, 2]);
}

// =============================================================================
// Builder Independence
// =============================================================================

#[rstest]
fn test_order_is_independent_of_hash_values() {
    let words = ["kiwi", "apple", "mango", "banana", "cherry", "apple", "kiwi"];

    let set: LinkedHashSet<&str> = words.into_iter().collect();

    assert_eq!(
        set.snapshot(),
        vec!["kiwi", "apple", "mango", "banana", "cherry"]
    );
}

#[rstest]
fn test_large_set_membership() {
    let mut set: LinkedHashSet<u64> = (0..10_000).collect();

    set.retain(|value| value % 3 != 0);

    assert_eq!(set.len(), 6_666);
    assert!(set.contains(&9_998));
    assert!(!set.contains(&9_999));
    assert_eq!(set.first(), Some(&1));
    assert_eq!(set.last(), Some(&9_998));
}

#[rstest]
fn test_default_builder_is_shared_by_default_sets() {
    let strategy: NaturalEquivalence<DefaultHashBuilder> = NaturalEquivalence::default();
    let mut set = LinkedHashSet::with_equivalence(strategy);

    set.union_with(["b", "a", "b"]);

    assert_eq!(set.snapshot(), vec!["b", "a"]);
}
