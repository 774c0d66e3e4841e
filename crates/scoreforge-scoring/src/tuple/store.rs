//! Per-tuple scratch storage for downstream nodes.

use crate::error::TupleError;

/// Indexed slots that downstream nodes use to remember per-tuple data.
///
/// The layout is chosen once from the store size and never resized:
/// no slots, one inline slot, or a boxed slice. All three behave
/// identically for callers.
///
/// Accessing an index at or past the store size is a wiring defect and
/// panics; the `checked_*` methods report it as [`TupleError`] instead.
///
/// # Examples
///
/// ```
/// use scoreforge_scoring::tuple::TupleStore;
///
/// let mut store = TupleStore::with_size(2);
/// assert_eq!(store.set(1, "match"), None);
/// assert_eq!(store.get(1), Some(&"match"));
/// assert_eq!(store.remove(1), Some("match"));
/// assert!(store.checked_get(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TupleStore<V> {
    /// Store size 0.
    Empty,
    /// Store size 1.
    Single(Option<V>),
    /// Store size 2 or more.
    Array(Box<[Option<V>]>),
}

impl<V> TupleStore<V> {
    /// Creates a store with `store_size` empty slots.
    pub fn with_size(store_size: usize) -> Self {
        match store_size {
            0 => TupleStore::Empty,
            1 => TupleStore::Single(None),
            n => TupleStore::Array((0..n).map(|_| None).collect()),
        }
    }

    /// Returns the number of slots.
    pub fn size(&self) -> usize {
        match self {
            TupleStore::Empty => 0,
            TupleStore::Single(_) => 1,
            TupleStore::Array(slots) => slots.len(),
        }
    }

    fn slot(&self, index: usize) -> Result<&Option<V>, TupleError> {
        match self {
            TupleStore::Single(value) if index == 0 => Ok(value),
            TupleStore::Array(slots) if index < slots.len() => Ok(&slots[index]),
            _ => Err(self.out_of_range(index)),
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<V>, TupleError> {
        let store_size = self.size();
        match self {
            TupleStore::Single(value) if index == 0 => Ok(value),
            TupleStore::Array(slots) if index < slots.len() => Ok(&mut slots[index]),
            _ => Err(TupleError::IndexOutOfRange { index, store_size }),
        }
    }

    fn out_of_range(&self, index: usize) -> TupleError {
        TupleError::IndexOutOfRange {
            index,
            store_size: self.size(),
        }
    }

    /// Returns the value in slot `index`.
    pub fn checked_get(&self, index: usize) -> Result<Option<&V>, TupleError> {
        self.slot(index).map(Option::as_ref)
    }

    /// Returns a mutable reference to the value in slot `index`.
    pub fn checked_get_mut(&mut self, index: usize) -> Result<Option<&mut V>, TupleError> {
        self.slot_mut(index).map(Option::as_mut)
    }

    /// Stores `value` in slot `index`, returning the previous value.
    pub fn checked_set(&mut self, index: usize, value: V) -> Result<Option<V>, TupleError> {
        self.slot_mut(index).map(|slot| slot.replace(value))
    }

    /// Empties slot `index`, returning its value.
    pub fn checked_remove(&mut self, index: usize) -> Result<Option<V>, TupleError> {
        self.slot_mut(index).map(Option::take)
    }

    /// Returns the value in slot `index`.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    pub fn get(&self, index: usize) -> Option<&V> {
        match self.checked_get(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns a mutable reference to the value in slot `index`.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        match self.checked_get_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }

    /// Stores `value` in slot `index`, returning the previous value.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    pub fn set(&mut self, index: usize, value: V) -> Option<V> {
        match self.checked_set(index, value) {
            Ok(previous) => previous,
            Err(e) => panic!("{}", e),
        }
    }

    /// Empties slot `index`, returning its value.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    pub fn remove(&mut self, index: usize) -> Option<V> {
        match self.checked_remove(index) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}
