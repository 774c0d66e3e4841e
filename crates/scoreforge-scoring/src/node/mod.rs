//! Propagation queue for the tuples a node produces.
//!
//! A producing node keeps its tuples in a [`TupleArena`] and marks them as
//! inserted, updated or retracted while it processes fact changes. Nothing
//! reaches the downstream [`TupleSink`] until [`TupleArena::propagate`],
//! which visits only the tuples changed since the previous pass.

mod scorer;


pub use scorer::{Scorer, ScorerSink, UndoSlot};

use std::fmt;

use scoreforge_config::DEFAULT_DIRTY_QUEUE_CAPACITY;
use tracing::trace;

use crate::error::PropagationError;
use crate::tuple::{Tuple, TupleState};

/// Handle of a tuple inside a [`TupleArena`].
///
/// Slots of disposed tuples are reused; the generation tells a stale
/// handle apart from the tuple now living in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleId {
    index: usize,
    generation: u32,
}

impl TupleId {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for TupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}@{}", self.index, self.generation)
        }
    }
}

/// Downstream consumer of a tuple stream.
///
/// Each callback receives the tuple mutably so the consumer can reach the
/// store slot it registered. A sink must not change the tuple's state or
/// facts.
pub trait TupleSink<T> {
    /// The tuple was created and is seen for the first time.
    fn insert(&mut self, tuple: &mut T);

    /// The facts behind a previously inserted tuple changed.
    fn update(&mut self, tuple: &mut T);

    /// A previously inserted tuple is gone.
    fn retract(&mut self, tuple: &mut T);
}

/// Counts of what one [`TupleArena::propagate`] pass delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub inserted: usize,
    pub updated: usize,
    pub retracted: usize,
    /// Tuples created and retracted within the same pass, never seen downstream.
    pub aborted: usize,
}

impl PropagationStats {
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.retracted + self.aborted
    }
}

struct Slot<T> {
    generation: u32,
    tuple: Option<T>,
}

/// Owning storage for the tuples of one producing node, plus its dirty queue.
///
/// # Example
///
/// ```
/// use scoreforge_scoring::node::{TupleArena, TupleSink};
/// use scoreforge_scoring::tuple::{Tuple, TupleState, UniTuple};
///
/// #[derive(Default)]
/// struct Counter(i64);
///
/// impl TupleSink<UniTuple<i64, ()>> for Counter {
///     fn insert(&mut self, tuple: &mut UniTuple<i64, ()>) { self.0 += tuple.a(); }
///     fn update(&mut self, _: &mut UniTuple<i64, ()>) {}
///     fn retract(&mut self, tuple: &mut UniTuple<i64, ()>) { self.0 -= tuple.a(); }
/// }
///
/// let mut arena: TupleArena<UniTuple<i64, ()>> = TupleArena::new();
/// let mut sink = Counter::default();
///
/// let id = arena.insert(UniTuple::new(5, 0));
/// arena.insert(UniTuple::new(7, 0));
/// let stats = arena.propagate(&mut sink).unwrap();
/// assert_eq!(stats.inserted, 2);
/// assert_eq!(sink.0, 12);
/// assert_eq!(arena.get(id).unwrap().state(), TupleState::Ok);
///
/// arena.retract(id).unwrap();
/// arena.propagate(&mut sink).unwrap();
/// assert_eq!(sink.0, 7);
/// assert!(arena.get(id).is_none());
/// ```
pub struct TupleArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    dirty: Vec<TupleId>,
    live: usize,
    validating: bool,
}

impl<T: Tuple> Default for TupleArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tuple> TupleArena<T> {
    /// Creates an arena with the default dirty queue capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DIRTY_QUEUE_CAPACITY)
    }

    /// Creates an arena whose dirty queue starts with room for `capacity` tuples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            dirty: Vec::with_capacity(capacity),
            live: 0,
            validating: false,
        }
    }

    /// Checks every state change against the lifecycle transition table,
    /// and that sinks leave the tuple state alone.
    pub fn validating(mut self, validating: bool) -> Self {
        self.validating = validating;
        self
    }

    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Number of tuples in the arena, including dying ones not yet disposed.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of tuples waiting for the next propagation pass.
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    pub fn get(&self, id: TupleId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.tuple.as_ref())
    }

    /// Mutable access for changing facts in place before calling [`update`](Self::update).
    pub fn get_mut(&mut self, id: TupleId) -> Option<&mut T> {
        slot_tuple(&mut self.slots, id).ok()
    }

    /// Iterates over the tuples in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TupleId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.tuple.as_ref().map(|tuple| {
                (
                    TupleId {
                        index,
                        generation: slot.generation,
                    },
                    tuple,
                )
            })
        })
    }

    /// Takes ownership of a new tuple and queues its insertion.
    pub fn insert(&mut self, mut tuple: T) -> TupleId {
        tuple.set_state(TupleState::Creating);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.tuple = Some(tuple);
                TupleId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    tuple: Some(tuple),
                });
                TupleId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        self.dirty.push(id);
        id
    }

    /// Marks a tuple as changed.
    ///
    /// A tuple that is still queued (creating or updating) stays as it is;
    /// the pending propagation already covers the change.
    pub fn update(&mut self, id: TupleId) -> Result<(), PropagationError> {
        let tuple = slot_tuple(&mut self.slots, id)?;
        match tuple.state() {
            TupleState::Ok => {
                tuple.set_state(TupleState::Updating);
                self.dirty.push(id);
                Ok(())
            }
            TupleState::Creating | TupleState::Updating => Ok(()),
            state => Err(PropagationError::UnexpectedState {
                tuple: id,
                state,
                operation: "update",
            }),
        }
    }

    /// Marks a tuple as removed.
    ///
    /// A tuple retracted before its insertion was propagated is aborted:
    /// downstream never sees it.
    pub fn retract(&mut self, id: TupleId) -> Result<(), PropagationError> {
        let tuple = slot_tuple(&mut self.slots, id)?;
        match tuple.state() {
            TupleState::Creating => {
                tuple.set_state(TupleState::Aborting);
                Ok(())
            }
            TupleState::Ok => {
                tuple.set_state(TupleState::Dying);
                self.dirty.push(id);
                Ok(())
            }
            TupleState::Updating => {
                tuple.set_state(TupleState::Dying);
                Ok(())
            }
            state => Err(PropagationError::UnexpectedState {
                tuple: id,
                state,
                operation: "retract",
            }),
        }
    }

    /// Delivers every queued change to `sink`, in queue order.
    ///
    /// Retracted and aborted tuples are disposed of once delivered and
    /// their handles become stale. On error the tuples behind the failing
    /// one stay queued for the next pass.
    pub fn propagate<S>(&mut self, sink: &mut S) -> Result<PropagationStats, PropagationError>
    where
        S: TupleSink<T> + ?Sized,
    {
        let mut queue = std::mem::take(&mut self.dirty);
        let result = self.drain(&queue, sink);
        match &result {
            Ok(_) => queue.clear(),
            Err((failed, _)) => {
                queue.drain(..=*failed);
            }
        }
        self.dirty = queue;

        let stats = result.map_err(|(_, e)| e)?;
        trace!(
            event = "propagate",
            inserted = stats.inserted,
            updated = stats.updated,
            retracted = stats.retracted,
            aborted = stats.aborted,
        );
        Ok(stats)
    }

    /// Returns the queue position of the failing tuple on error.
    fn drain<S>(
        &mut self,
        queue: &[TupleId],
        sink: &mut S,
    ) -> Result<PropagationStats, (usize, PropagationError)>
    where
        S: TupleSink<T> + ?Sized,
    {
        let mut stats = PropagationStats::default();
        for (position, &id) in queue.iter().enumerate() {
            self.deliver(id, sink, &mut stats)
                .map_err(|e| (position, e))?;
        }
        Ok(stats)
    }

    fn deliver<S>(
        &mut self,
        id: TupleId,
        sink: &mut S,
        stats: &mut PropagationStats,
    ) -> Result<(), PropagationError>
    where
        S: TupleSink<T> + ?Sized,
    {
        let validating = self.validating;
        let tuple = slot_tuple(&mut self.slots, id)?;
        match tuple.state() {
            TupleState::Creating => {
                sink.insert(tuple);
                settle(tuple, id, TupleState::Creating, TupleState::Ok, "insert", validating)?;
                stats.inserted += 1;
            }
            TupleState::Updating => {
                sink.update(tuple);
                settle(tuple, id, TupleState::Updating, TupleState::Ok, "update", validating)?;
                stats.updated += 1;
            }
            TupleState::Dying => {
                sink.retract(tuple);
                settle(tuple, id, TupleState::Dying, TupleState::Dead, "retract", validating)?;
                self.dispose(id);
                stats.retracted += 1;
            }
            TupleState::Aborting => {
                settle(tuple, id, TupleState::Aborting, TupleState::Dead, "abort", validating)?;
                self.dispose(id);
                stats.aborted += 1;
            }
            state @ (TupleState::Ok | TupleState::Dead) => {
                return Err(PropagationError::UnexpectedState {
                    tuple: id,
                    state,
                    operation: "propagate",
                });
            }
        }
        Ok(())
    }

    fn dispose(&mut self, id: TupleId) {
        let slot = &mut self.slots[id.index];
        slot.tuple = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
    }
}

fn slot_tuple<T>(slots: &mut [Slot<T>], id: TupleId) -> Result<&mut T, PropagationError> {
    slots
        .get_mut(id.index)
        .filter(|slot| slot.generation == id.generation)
        .and_then(|slot| slot.tuple.as_mut())
        .ok_or(PropagationError::UnknownTuple(id))
}

/// Moves a delivered tuple from `expected` to `next`.
fn settle<T: Tuple>(
    tuple: &mut T,
    id: TupleId,
    expected: TupleState,
    next: TupleState,
    operation: &'static str,
    validating: bool,
) -> Result<(), PropagationError> {
    if validating {
        let state = tuple.state();
        if state != expected || !state.can_transition_to(next) {
            return Err(PropagationError::UnexpectedState {
                tuple: id,
                state,
                operation,
            });
        }
    }
    tuple.set_state(next);
    Ok(())
}
