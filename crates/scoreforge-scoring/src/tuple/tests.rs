//! Tests for tuples, stores and lifecycle states.

use super::*;
use crate::error::TupleError;

// ============================================================================
// TupleStore
// ============================================================================

/// Runs the same operation sequence against every layout.
fn exercise_store(store_size: usize) -> Vec<Result<Option<i32>, TupleError>> {
    let mut store = TupleStore::with_size(store_size);
    let mut results = Vec::new();
    for index in 0..6 {
        results.push(store.checked_get(index).map(|v| v.copied()));
        results.push(store.checked_set(index, index as i32 * 10));
        results.push(store.checked_set(index, index as i32 * 10 + 1));
        results.push(store.checked_get(index).map(|v| v.copied()));
        results.push(store.checked_remove(index));
        results.push(store.checked_remove(index));
    }
    results
}

#[test]
fn test_store_layout_selection() {
    assert!(matches!(TupleStore::<i32>::with_size(0), TupleStore::Empty));
    assert!(matches!(TupleStore::<i32>::with_size(1), TupleStore::Single(None)));
    assert!(matches!(TupleStore::<i32>::with_size(2), TupleStore::Array(_)));
    assert_eq!(TupleStore::<i32>::with_size(5).size(), 5);
}

#[test]
fn test_store_layouts_are_equivalent() {
    for store_size in [0, 1, 2, 5] {
        let results = exercise_store(store_size);
        for (step, result) in results.iter().enumerate() {
            let index = step / 6;
            if index < store_size {
                let expected = match step % 6 {
                    0 => None,
                    1 => None,
                    2 => Some(index as i32 * 10),
                    3 => Some(index as i32 * 10 + 1),
                    4 => Some(index as i32 * 10 + 1),
                    _ => None,
                };
                assert_eq!(result, &Ok(expected), "size {} step {}", store_size, step);
            } else {
                assert_eq!(
                    result,
                    &Err(TupleError::IndexOutOfRange { index, store_size }),
                    "size {} step {}",
                    store_size,
                    step
                );
            }
        }
    }
}

#[test]
fn test_store_slots_are_independent() {
    let mut store = TupleStore::with_size(3);
    store.set(0, "left");
    store.set(2, "right");
    assert_eq!(store.get(0), Some(&"left"));
    assert_eq!(store.get(1), None);
    assert_eq!(store.get(2), Some(&"right"));

    if let Some(value) = store.get_mut(2) {
        *value = "changed";
    }
    assert_eq!(store.remove(2), Some("changed"));
    assert_eq!(store.get(0), Some(&"left"));
}

#[test]
#[should_panic(expected = "store index (0) is out of range for a tuple with store size (0)")]
fn test_empty_store_access_panics() {
    let store = TupleStore::<i32>::with_size(0);
    store.get(0);
}

#[test]
#[should_panic(expected = "store index (1) is out of range")]
fn test_single_store_out_of_range_panics() {
    let mut store = TupleStore::with_size(1);
    store.set(1, 7);
}

#[test]
#[should_panic(expected = "store index (5) is out of range")]
fn test_array_store_out_of_range_panics() {
    let mut store = TupleStore::<i32>::with_size(5);
    store.remove(5);
}

// ============================================================================
// TupleState
// ============================================================================

const ALL_STATES: [TupleState; 6] = [
    TupleState::Creating,
    TupleState::Updating,
    TupleState::Ok,
    TupleState::Dying,
    TupleState::Dead,
    TupleState::Aborting,
];

#[test]
fn test_state_flags() {
    let flags: Vec<(bool, bool)> = ALL_STATES
        .iter()
        .map(|s| (s.is_dirty(), s.is_active()))
        .collect();
    assert_eq!(
        flags,
        vec![
            (true, true),
            (true, true),
            (false, true),
            (true, false),
            (false, false),
            (true, false),
        ]
    );
}

#[test]
fn test_legal_transitions() {
    use TupleState::{Aborting, Creating, Dead, Dying, Updating};

    let legal = [
        (Creating, TupleState::Ok),
        (Creating, Aborting),
        (TupleState::Ok, Updating),
        (TupleState::Ok, Dying),
        (Updating, TupleState::Ok),
        (Updating, Dying),
        (Dying, Dead),
        (Aborting, Dead),
    ];
    for from in ALL_STATES {
        for to in ALL_STATES {
            assert_eq!(
                from.can_transition_to(to),
                legal.contains(&(from, to)),
                "{} -> {}",
                from,
                to
            );
        }
    }
}

#[test]
fn test_state_display() {
    assert_eq!(TupleState::Creating.to_string(), "CREATING");
    assert_eq!(TupleState::Aborting.to_string(), "ABORTING");
}

// ============================================================================
// Arity tuples
// ============================================================================

#[test]
fn test_new_tuple_is_creating() {
    let tuple: UniTuple<&str, ()> = UniTuple::new("lesson", 1);
    assert_eq!(tuple.state(), TupleState::Creating);
    assert_eq!(tuple.store_size(), 1);
    assert_eq!(<UniTuple<&str, ()> as Tuple>::ARITY, 1);
    assert_eq!(<QuadTuple<u8, u8, u8, u8, ()> as Tuple>::ARITY, 4);
}

#[test]
fn test_tuple_accepts_any_state() {
    let mut tuple: BiTuple<u32, u32, ()> = BiTuple::new(1, 2, 0);
    tuple.set_state(TupleState::Dead);
    tuple.set_state(TupleState::Creating);
    assert_eq!(tuple.state(), TupleState::Creating);
}

#[test]
fn test_fact_accessors() {
    let mut tuple: TriTuple<u32, &str, char, ()> = TriTuple::new(1, "x", 'c', 0);
    tuple.set_b("y");
    assert_eq!((*tuple.a(), *tuple.b(), *tuple.c()), (1, "y", 'c'));
}

#[test]
fn test_tuple_store_through_trait() {
    let mut tuple: BiTuple<u32, u32, String> = BiTuple::new(1, 2, 2);
    assert_eq!(tuple.set_store(1, "undo".to_string()), None);
    assert_eq!(tuple.get_store(1).map(String::as_str), Some("undo"));
    assert_eq!(tuple.remove_store(1), Some("undo".to_string()));
    assert!(tuple.checked_get_store(2).is_err());
    assert!(tuple.checked_set_store(2, String::new()).is_err());
    assert!(tuple.checked_remove_store(2).is_err());
}

#[test]
fn test_fill_from_narrower_tuples() {
    let uni: UniTuple<u32, ()> = UniTuple::new(1, 0);
    let mut bi: BiTuple<u32, u32, ()> = BiTuple::new(0, 0, 1);
    bi.fill_from(&uni, 2);
    assert_eq!((*bi.a(), *bi.b()), (1, 2));

    let mut tri: TriTuple<u32, u32, u32, ()> = TriTuple::new(0, 0, 0, 0);
    tri.fill_from(&bi, 3);
    assert_eq!((*tri.a(), *tri.b(), *tri.c()), (1, 2, 3));

    let mut quad: QuadTuple<u32, u32, u32, u32, ()> = QuadTuple::new(0, 0, 0, 0, 0);
    quad.fill_from(&tri, 4);
    assert_eq!((*quad.a(), *quad.b(), *quad.c(), *quad.d()), (1, 2, 3, 4));

    let right: BiTuple<u32, u32, ()> = BiTuple::new(7, 8, 0);
    quad.fill_from_pair(&bi, &right);
    assert_eq!((*quad.a(), *quad.b(), *quad.c(), *quad.d()), (1, 2, 7, 8));
}

#[test]
fn test_copy_facts_keeps_state_and_store() {
    let source: BiTuple<u32, u32, i64> = BiTuple::new(5, 6, 1);
    let mut target: BiTuple<u32, u32, i64> = BiTuple::new(0, 0, 1);
    target.set_state(TupleState::Ok);
    target.set_store(0, 42);

    target.copy_facts_from(&source);
    assert_eq!((*target.a(), *target.b()), (5, 6));
    assert_eq!(target.state(), TupleState::Ok);
    assert_eq!(target.get_store(0), Some(&42));
}

#[test]
fn test_debug_lists_facts() {
    let tuple: BiTuple<u32, &str, ()> = BiTuple::new(3, "room", 0);
    let debug = format!("{:?}", tuple);
    assert!(debug.starts_with("BiTuple"));
    assert!(debug.contains("room"));
    assert!(debug.contains("Creating"));
}
