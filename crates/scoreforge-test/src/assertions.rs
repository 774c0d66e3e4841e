//! Contract checks for `Ord`, `Eq` and `Hash` implementations.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Asserts that `items` is sorted strictly ascending, checking every pair
/// in both directions.
///
/// # Example
///
/// ```
/// use scoreforge_test::assert_compare_order;
///
/// assert_compare_order(&[-3, 0, 7]);
/// ```
pub fn assert_compare_order<T: Ord + Debug>(items: &[T]) {
    for (i, lower) in items.iter().enumerate() {
        assert_eq!(
            lower.cmp(lower),
            std::cmp::Ordering::Equal,
            "{:?} must equal itself",
            lower
        );
        for higher in &items[i + 1..] {
            assert!(lower < higher, "expected {:?} < {:?}", lower, higher);
            assert!(higher > lower, "expected {:?} > {:?}", higher, lower);
            assert_ne!(lower, higher);
        }
    }
}

/// Asserts that two values are equal and hash identically.
pub fn assert_objects_equal<T: PartialEq + Hash + Debug>(left: &T, right: &T) {
    assert_eq!(left, right);
    assert_eq!(right, left);
    assert_eq!(
        hash_of(left),
        hash_of(right),
        "equal values {:?} and {:?} must hash the same",
        left,
        right
    );
}

/// Asserts that two values differ in both directions.
pub fn assert_objects_not_equal<T: PartialEq + Debug>(left: &T, right: &T) {
    assert_ne!(left, right);
    assert_ne!(right, left);
}
