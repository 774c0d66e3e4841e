//! Leaf node turning tuples into score impacts.

use std::marker::PhantomData;

use scoreforge_core::score::Score;
use scoreforge_core::ImpactType;

use super::TupleSink;
use crate::api::analysis::EntityRef;
use crate::inliner::{ScoreInliner, UndoHandle, WeightedImpacter};
use crate::tuple::Tuple;

/// Store slot value able to carry a scorer's undo handle.
///
/// Tuples whose store is shared by several node kinds use an enum as the
/// store value and implement this for it.
pub trait UndoSlot<Sc: Score>: Sized {
    fn from_undo(undo: UndoHandle<Sc>) -> Self;

    /// Returns the undo handle, `None` if the slot holds something else.
    fn into_undo(self) -> Option<UndoHandle<Sc>>;
}

impl<Sc: Score> UndoSlot<Sc> for UndoHandle<Sc> {
    fn from_undo(undo: UndoHandle<Sc>) -> Self {
        undo
    }

    fn into_undo(self) -> Option<UndoHandle<Sc>> {
        Some(self)
    }
}

fn no_justifications<T>(_: &T) -> Vec<EntityRef> {
    Vec::new()
}

/// Scores every tuple of a stream through one constraint's impacter.
///
/// The match weight comes from `weigher`; its sign is decided by the impact
/// type. The undo handle of each match lives in the tuple's store slot
/// `store_index` until the tuple is updated or retracted.
pub struct Scorer<T, Sc: Score, W, J> {
    impacter: WeightedImpacter<Sc>,
    impact_type: ImpactType,
    store_index: usize,
    weigher: W,
    justifier: J,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, Sc, W> Scorer<T, Sc, W, fn(&T) -> Vec<EntityRef>>
where
    Sc: Score,
    W: Fn(&T) -> i64,
{
    pub fn new(
        impacter: WeightedImpacter<Sc>,
        impact_type: ImpactType,
        store_index: usize,
        weigher: W,
    ) -> Self {
        Self {
            impacter,
            impact_type,
            store_index,
            weigher,
            justifier: no_justifications::<T>,
            _phantom: PhantomData,
        }
    }
}

impl<T, Sc, W, J> Scorer<T, Sc, W, J>
where
    Sc: Score,
    W: Fn(&T) -> i64,
    J: Fn(&T) -> Vec<EntityRef>,
{
    /// Replaces how matches are justified when constraint matching is enabled.
    pub fn with_justifier<J2>(self, justifier: J2) -> Scorer<T, Sc, W, J2>
    where
        J2: Fn(&T) -> Vec<EntityRef>,
    {
        Scorer {
            impacter: self.impacter,
            impact_type: self.impact_type,
            store_index: self.store_index,
            weigher: self.weigher,
            justifier,
            _phantom: PhantomData,
        }
    }

    pub fn impact_type(&self) -> ImpactType {
        self.impact_type
    }

    pub fn store_index(&self) -> usize {
        self.store_index
    }

    /// Binds the scorer to the inliner it applies impacts to.
    pub fn sink<'a>(&'a self, inliner: &'a mut ScoreInliner<Sc>) -> ScorerSink<'a, T, Sc, W, J> {
        ScorerSink {
            scorer: self,
            inliner,
        }
    }
}

/// A [`Scorer`] bound to an inliner for one propagation pass.
pub struct ScorerSink<'a, T, Sc: Score, W, J> {
    scorer: &'a Scorer<T, Sc, W, J>,
    inliner: &'a mut ScoreInliner<Sc>,
}

impl<T, Sc, W, J> ScorerSink<'_, T, Sc, W, J>
where
    T: Tuple,
    T::Value: UndoSlot<Sc>,
    Sc: Score,
    W: Fn(&T) -> i64,
    J: Fn(&T) -> Vec<EntityRef>,
{
    fn apply(&mut self, tuple: &mut T) {
        let scorer = self.scorer;
        let match_weight = scorer.impact_type.apply((scorer.weigher)(tuple));
        let justifications = if self.inliner.is_constraint_match_enabled() {
            (scorer.justifier)(tuple)
        } else {
            Vec::new()
        };
        let undo = scorer
            .impacter
            .impact(self.inliner, match_weight, justifications);
        let slot = <T::Value as UndoSlot<Sc>>::from_undo(undo);
        let previous = tuple.set_store(scorer.store_index, slot);
        debug_assert!(
            previous.is_none(),
            "store slot ({}) already held a value",
            scorer.store_index
        );
    }

    fn undo(&mut self, tuple: &mut T) {
        if let Some(undo) = tuple
            .remove_store(self.scorer.store_index)
            .and_then(<T::Value as UndoSlot<Sc>>::into_undo)
        {
            undo.undo(self.inliner);
        }
    }
}

impl<T, Sc, W, J> TupleSink<T> for ScorerSink<'_, T, Sc, W, J>
where
    T: Tuple,
    T::Value: UndoSlot<Sc>,
    Sc: Score,
    W: Fn(&T) -> i64,
    J: Fn(&T) -> Vec<EntityRef>,
{
    fn insert(&mut self, tuple: &mut T) {
        self.apply(tuple);
    }

    fn update(&mut self, tuple: &mut T) {
        self.undo(tuple);
        self.apply(tuple);
    }

    fn retract(&mut self, tuple: &mut T) {
        self.undo(tuple);
    }
}
