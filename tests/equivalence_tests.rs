//! Integration tests for pluggable equality strategies.

use std::hash::{BuildHasher, Hash, Hasher};

use linkset::{DefaultHashBuilder, Equivalence, KeyEquivalence, LinkedHashSet, NaturalEquivalence};
use rstest::rstest;

/// Compares integers by their remainder modulo `modulus`.
struct Modular {
    modulus: i64,
}

impl Equivalence<i64> for Modular {
    fn equivalent(&self, left: &i64, right: &i64) -> bool {
        left.rem_euclid(self.modulus) == right.rem_euclid(self.modulus)
    }

    fn hash_of(&self, value: &i64) -> u64 {
        value.rem_euclid(self.modulus).unsigned_abs()
    }
}

/// Sends every value to one bucket so lookups rely on equality alone.
struct Colliding;

impl Equivalence<String> for Colliding {
    fn equivalent(&self, left: &String, right: &String) -> bool {
        left == right
    }

    fn hash_of(&self, _value: &String) -> u64 {
        0
    }
}

// =============================================================================
// Custom Strategies
// =============================================================================

#[rstest]
fn test_custom_strategy_decides_identity() {
    let mut set = LinkedHashSet::with_equivalence(Modular { modulus: 5 });

    assert!(set.add(3));
    assert!(!set.add(8));
    assert!(!set.add(-2));
    assert!(set.add(4));

    assert_eq!(set.snapshot(), vec![3, 4]);
    assert!(set.contains(&13));
    assert_eq!(set.get(&13), Some(&3));
}

#[rstest]
fn test_algebra_uses_receiver_strategy() {
    let mut set = LinkedHashSet::with_equivalence(Modular { modulus: 10 });
    set.extend([1, 2, 3]);

    set.union_with([11, 14, 24, 5]);
    assert_eq!(set.snapshot(), vec![1, 2, 3, 14, 5]);

    set.intersect_with([22, 15, 33]);
    assert_eq!(set.snapshot(), vec![2, 3, 5]);

    set.symmetric_except_with([12, 16, 26]);
    assert_eq!(set.snapshot(), vec![3, 5, 16]);
}

#[rstest]
fn test_predicates_count_distinct_under_strategy() {
    let set: LinkedHashSet<i64, Modular> = {
        let mut set = LinkedHashSet::with_equivalence(Modular { modulus: 3 });
        set.extend([0, 1]);
        set
    };

    assert!(set.set_equals([3, 4, 6, 7]));
    assert!(!set.is_proper_subset_of([3, 4, 6, 7]));
    assert!(set.is_proper_subset_of([3, 4, 5]));
    assert!(set.is_proper_superset_of([9, 12]));
}

#[rstest]
fn test_colliding_hashes_keep_elements_distinct() {
    let mut set = LinkedHashSet::with_equivalence(Colliding);
    for word in ["delta", "alpha", "charlie", "bravo"] {
        set.add(word.to_string());
    }

    assert!(set.remove(&"alpha".to_string()));
    assert!(!set.contains(&"alpha".to_string()));
    assert!(set.contains(&"bravo".to_string()));
    assert_eq!(set.snapshot(), vec!["delta", "charlie", "bravo"]);
}

// =============================================================================
// Key Projection
// =============================================================================

#[rstest]
fn test_case_insensitive_strings() {
    let mut set = LinkedHashSet::with_equivalence(KeyEquivalence::new(|value: &String| {
        value.to_lowercase()
    }));
    set.extend(["Rust".to_string(), "Go".to_string(), "RUST".to_string()]);

    assert_eq!(set.snapshot(), vec!["Rust", "Go"]);
    assert_eq!(set.get(&"rust".to_string()).map(String::as_str), Some("Rust"));
    assert_eq!(set.take(&"GO".to_string()), Some("Go".to_string()));
}

#[rstest]
fn test_key_equivalence_with_explicit_hasher() {
    let strategy = KeyEquivalence::with_hasher(|pair: &(u8, char)| pair.0, DefaultHashBuilder::default());
    let mut set = LinkedHashSet::with_equivalence(strategy);

    set.extend([(1, 'a'), (2, 'b'), (1, 'c')]);

    assert_eq!(set.snapshot(), vec![(1, 'a'), (2, 'b')]);
}

// =============================================================================
// Natural Strategy
// =============================================================================

#[rstest]
fn test_natural_strategy_hash_matches_hasher() {
    let strategy = NaturalEquivalence::new();
    let mut hasher = strategy.hasher().build_hasher();
    42u32.hash(&mut hasher);

    assert_eq!(strategy.hash_of(&42u32), hasher.finish());
    assert!(strategy.equivalent(&"a", &"a"));
}

#[rstest]
fn test_borrowed_strategy_is_a_strategy() {
    let strategy = Modular { modulus: 2 };
    let mut set = LinkedHashSet::with_equivalence(&strategy);

    set.extend([1, 3, 4]);

    assert_eq!(set.len(), 2);
}
