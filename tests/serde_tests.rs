#![cfg(feature = "serde")]

//! Integration tests for serde support.
//!
//! A set serializes as a sequence in iteration order and deserializes by
//! adding elements in sequence order.

use linkset::{KeyEquivalence, LinkedHashSet};
use rstest::rstest;

// =============================================================================
// JSON Round Trips
// =============================================================================

#[rstest]
fn test_serializes_in_insertion_order() {
    let set: LinkedHashSet<i32> = [1, 10, 5].into_iter().collect();

    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,10,5]");
}

#[rstest]
fn test_json_roundtrip_preserves_order() {
    let mut set: LinkedHashSet<String> = ["pear", "apple", "fig"]
        .into_iter()
        .map(String::from)
        .collect();
    set.remove(&"pear".to_string());
    set.add("pear".to_string());

    let json = serde_json::to_string(&set).unwrap();
    let restored: LinkedHashSet<String> = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.snapshot(), vec!["apple", "fig", "pear"]);
    assert_eq!(restored, set);
}

#[rstest]
fn test_deserialize_collapses_duplicates() {
    let restored: LinkedHashSet<u8> = serde_json::from_str("[3, 1, 3, 2, 1]").unwrap();

    assert_eq!(restored.snapshot(), vec![3, 1, 2]);
}

#[rstest]
#[case::object("{\"a\": 1}")]
#[case::number("42")]
#[case::wrong_element("[1, \"two\"]")]
fn test_deserialize_rejects_non_sequence(#[case] input: &str) {
    let result: Result<LinkedHashSet<u8>, _> = serde_json::from_str(input);

    assert!(result.is_err());
}

#[rstest]
fn test_nested_sets() {
    let inner_one: LinkedHashSet<i32> = [2, 1].into_iter().collect();
    let inner_two: LinkedHashSet<i32> = [3].into_iter().collect();
    let outer: Vec<LinkedHashSet<i32>> = vec![inner_one, inner_two];

    let json = serde_json::to_string(&outer).unwrap();

    assert_eq!(json, "[[2,1],[3]]");
    let restored: Vec<LinkedHashSet<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored[0].snapshot(), vec![2, 1]);
}

#[rstest]
fn test_serialize_ignores_strategy() {
    let mut set = LinkedHashSet::with_equivalence(KeyEquivalence::new(|value: &String| {
        value.to_lowercase()
    }));
    set.extend(["B".to_string(), "a".to_string(), "b".to_string()]);

    assert_eq!(serde_json::to_string(&set).unwrap(), r#"["B","a"]"#);
}

// =============================================================================
// Synchronized Sets
// =============================================================================

#[cfg(feature = "synchronized")]
#[rstest]
fn test_synchronized_set_json_roundtrip() {
    use linkset::SynchronizedSet;

    let set = SynchronizedSet::new([1, 10, 5].into_iter().collect::<LinkedHashSet<i32>>());

    let json = serde_json::to_string(&set).unwrap();
    let restored: SynchronizedSet<i32> = serde_json::from_str(&json).unwrap();

    assert_eq!(json, "[1,10,5]");
    assert_eq!(restored.len(), 3);
    assert_eq!(restored.snapshot(), vec![1, 10, 5]);
    assert!(!restored.ptr_eq(&set));
}
