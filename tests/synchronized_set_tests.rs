#![cfg(feature = "synchronized")]

//! Integration tests for `SynchronizedSet` across threads.

use std::sync::{Arc, Barrier};
use std::thread;

use linkset::{LinkedHashSet, SetCollection, SynchronizedSet};
use rstest::rstest;

// =============================================================================
// Concurrent Mutation
// =============================================================================

#[rstest]
fn test_concurrent_adds_keep_every_element_once() {
    let set: SynchronizedSet<u32> = SynchronizedSet::default();
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let set = set.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..500).filter(|value| set.add(*value)).count()
            })
        })
        .collect();

    let inserted: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .sum();

    assert_eq!(inserted, 500);
    assert_eq!(set.len(), 500);
}

#[rstest]
fn test_per_thread_order_is_preserved() {
    let set = SynchronizedSet::new(LinkedHashSet::new());

    let handles: Vec<_> = (0..3u32)
        .map(|worker| {
            let set = set.clone();
            thread::spawn(move || {
                for value in 0..200 {
                    set.add((worker, value));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = set.snapshot();
    for worker in 0..3 {
        let values: Vec<u32> = snapshot
            .iter()
            .filter(|(owner, _)| *owner == worker)
            .map(|(_, value)| *value)
            .collect();
        assert_eq!(values, (0..200).collect::<Vec<_>>());
    }
}

#[rstest]
fn test_concurrent_bulk_operations() {
    let set: SynchronizedSet<i32> = SynchronizedSet::new((0..100).collect());

    let remover = {
        let set = set.clone();
        thread::spawn(move || set.except_with((0..100).filter(|value| value % 2 == 0)))
    };
    let adder = {
        let set = set.clone();
        thread::spawn(move || set.union_with(100..150))
    };
    remover.join().unwrap();
    adder.join().unwrap();

    assert_eq!(set.len(), 100);
    assert!(set.is_superset_of((100..150).collect::<Vec<_>>()));
    assert!(!set.overlaps((0..100).step_by(2).collect::<Vec<_>>()));
}

// =============================================================================
// Caller-Held Lock
// =============================================================================

#[rstest]
fn test_sync_root_excludes_writers_during_iteration() {
    let set: SynchronizedSet<i32> = SynchronizedSet::new((0..50).collect());
    let writer = set.clone();

    let guard = set.sync_root().lock();
    let handle = thread::spawn(move || {
        writer.add(50);
        writer.len()
    });

    let seen: Vec<i32> = guard.iter().copied().collect();
    drop(guard);

    assert_eq!(seen, (0..50).collect::<Vec<_>>());
    assert_eq!(handle.join().unwrap(), 51);
}

#[rstest]
fn test_from_shared_uses_existing_lock() {
    let shared = Arc::new(parking_lot::Mutex::new(LinkedHashSet::new()));
    let set = SynchronizedSet::from_shared(Arc::clone(&shared));

    set.add("x");
    shared.lock().add("y");

    assert_eq!(set.snapshot(), vec!["x", "y"]);
    assert!(Arc::ptr_eq(set.sync_root(), &shared));
}

#[rstest]
fn test_generic_code_accepts_synchronized_set() {
    fn fill<S: SetCollection<i32>>(set: &mut S) {
        set.union_with([1, 10, 5]).unwrap();
        set.symmetric_except_with([1, 10, 3, 9]).unwrap();
    }

    let mut set = SynchronizedSet::new(LinkedHashSet::new());
    fill(&mut set);

    assert_eq!(set.snapshot(), vec![5, 3, 9]);
}
