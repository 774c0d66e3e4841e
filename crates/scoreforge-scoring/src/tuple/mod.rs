//! Tuples: the unit of propagation between nodes.
//!
//! A tuple pairs 1 to 4 fact references with a lifecycle [`TupleState`]
//! and a [`TupleStore`] of per-node scratch slots. The producing node owns
//! the tuple; consumers only touch the store slot they registered.
//! Tuples have identity, not value equality: two tuples may wrap the
//! same facts.

mod arity;
mod state;
mod store;

#[cfg(test)]
mod tests;

pub use arity::{BiTuple, QuadTuple, TriTuple, UniTuple};
pub use state::TupleState;
pub use store::TupleStore;

use crate::error::TupleError;

/// Capabilities shared by every tuple arity.
pub trait Tuple {
    /// The type downstream nodes keep in the store slots.
    type Value;

    /// Number of facts in this tuple.
    const ARITY: usize;

    fn state(&self) -> TupleState;

    fn set_state(&mut self, state: TupleState);

    fn store(&self) -> &TupleStore<Self::Value>;

    fn store_mut(&mut self) -> &mut TupleStore<Self::Value>;

    /// Returns the number of store slots, fixed at construction.
    fn store_size(&self) -> usize {
        self.store().size()
    }

    /// Returns the value in store slot `index`.
    ///
    /// # Panics
    /// Panics if `index >= store_size()`.
    fn get_store(&self, index: usize) -> Option<&Self::Value> {
        self.store().get(index)
    }

    /// Stores `value` in slot `index`, returning the previous value.
    ///
    /// # Panics
    /// Panics if `index >= store_size()`.
    fn set_store(&mut self, index: usize, value: Self::Value) -> Option<Self::Value> {
        self.store_mut().set(index, value)
    }

    /// Empties slot `index`, returning its value.
    ///
    /// # Panics
    /// Panics if `index >= store_size()`.
    fn remove_store(&mut self, index: usize) -> Option<Self::Value> {
        self.store_mut().remove(index)
    }

    fn checked_get_store(&self, index: usize) -> Result<Option<&Self::Value>, TupleError> {
        self.store().checked_get(index)
    }

    fn checked_set_store(
        &mut self,
        index: usize,
        value: Self::Value,
    ) -> Result<Option<Self::Value>, TupleError> {
        self.store_mut().checked_set(index, value)
    }

    fn checked_remove_store(&mut self, index: usize) -> Result<Option<Self::Value>, TupleError> {
        self.store_mut().checked_remove(index)
    }
}
