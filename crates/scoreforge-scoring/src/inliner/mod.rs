//! Incremental score ledger.
//!
//! A [`ScoreInliner`] keeps one running total per score level. Each
//! constraint gets a [`WeightedImpacter`], built once from the constraint's
//! weight, that adds `weight * match_weight` to the totals and hands back an
//! [`UndoHandle`] subtracting exactly that amount again. Apply and undo are
//! both O(number of non-zero weight levels), whatever the number of live
//! matches.

mod tracking;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::marker::PhantomData;

use scoreforge_core::score::Score;
use scoreforge_core::ConstraintRef;
use smallvec::SmallVec;
use tracing::debug;

use crate::api::analysis::{
    ConstraintAnalysis, ConstraintMatchTotal, EntityRef, Indictment, MatchId, ScoreExplanation,
};
use crate::error::InlinerError;
use tracking::MatchTracker;

/// Per-level running totals of one scoring session.
///
/// # Example
///
/// ```
/// use scoreforge_core::{ConstraintRef, HardSoftScore, Score};
/// use scoreforge_scoring::ScoreInliner;
///
/// let room = ConstraintRef::new("timetabling", "Room conflict");
/// let mut inliner = ScoreInliner::new(
///     HardSoftScore::ZERO,
///     [(room.clone(), HardSoftScore::of_hard(1))],
///     false,
/// )
/// .unwrap();
///
/// let impacter = inliner.build_weighted_impacter(&room).unwrap();
/// let undo = impacter.impact(&mut inliner, -2, Vec::new());
/// assert_eq!(inliner.extract_score(0), HardSoftScore::of_hard(-2));
///
/// undo.undo(&mut inliner);
/// assert!(inliner.extract_score(0).is_zero());
/// ```
pub struct ScoreInliner<Sc: Score> {
    zero: Sc,
    totals: SmallVec<[i64; 4]>,
    constraints: Vec<(ConstraintRef, Sc)>,
    index: HashMap<ConstraintRef, usize>,
    tracker: Option<MatchTracker<Sc>>,
}

impl<Sc: Score> ScoreInliner<Sc> {
    /// Creates an inliner with one weight per constraint.
    ///
    /// `zero` fixes the score shape; every weight must share it and carry
    /// an init score of 0. A constraint listed twice keeps its last weight.
    /// Zero weights are accepted here but cannot get an impacter.
    pub fn new<I>(zero: Sc, weights: I, constraint_match_enabled: bool) -> Result<Self, InlinerError>
    where
        I: IntoIterator<Item = (ConstraintRef, Sc)>,
    {
        let zero = zero.zero();
        let mut constraints: Vec<(ConstraintRef, Sc)> = Vec::new();
        let mut index: HashMap<ConstraintRef, usize> = HashMap::new();
        for (constraint, weight) in weights {
            if zero.ensure_compatible(&weight).is_err() {
                return Err(InlinerError::IncompatibleWeight {
                    constraint,
                    weight: weight.to_string(),
                    zero: zero.to_string(),
                });
            }
            if weight.init_score() != 0 {
                return Err(InlinerError::UninitializedWeight {
                    constraint,
                    weight: weight.to_string(),
                });
            }
            match index.get(&constraint).copied() {
                Some(position) => constraints[position].1 = weight,
                None => {
                    index.insert(constraint.clone(), constraints.len());
                    constraints.push((constraint, weight));
                }
            }
        }

        debug!(
            event = "inliner_built",
            constraints = constraints.len(),
            levels = zero.levels_count(),
            constraint_match_enabled,
        );

        let totals = SmallVec::from_elem(0, zero.levels_count());
        let tracker = constraint_match_enabled.then(|| MatchTracker::new(zero.clone()));
        Ok(Self {
            zero,
            totals,
            constraints,
            index,
            tracker,
        })
    }

    /// Builds the impacter of a configured constraint.
    ///
    /// The impacter remembers only the non-zero levels of the weight, so a
    /// hard-only constraint never touches the soft totals.
    pub fn build_weighted_impacter(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<WeightedImpacter<Sc>, InlinerError> {
        let &position = self
            .index
            .get(constraint)
            .ok_or_else(|| InlinerError::UnknownConstraint(constraint.clone()))?;
        let levels: SmallVec<[(usize, i64); 2]> = self.constraints[position]
            .1
            .to_level_numbers()
            .into_iter()
            .enumerate()
            .filter(|&(_, level)| level != 0)
            .collect();
        if levels.is_empty() {
            return Err(InlinerError::ZeroWeight(constraint.clone()));
        }
        Ok(WeightedImpacter {
            constraint: position,
            levels,
            _phantom: PhantomData,
        })
    }

    /// Returns the current score with the given init score.
    pub fn extract_score(&self, init_score: i32) -> Sc {
        self.zero.from_level_numbers(init_score, &self.totals)
    }

    /// Returns the zero score of this inliner's shape.
    pub fn zero(&self) -> &Sc {
        &self.zero
    }

    /// Returns the configured weight of a constraint.
    pub fn weight(&self, constraint: &ConstraintRef) -> Option<&Sc> {
        self.index
            .get(constraint)
            .map(|&position| &self.constraints[position].1)
    }

    /// Configured constraints with their weights, in configuration order.
    pub fn constraints(&self) -> impl Iterator<Item = (&ConstraintRef, &Sc)> {
        self.constraints.iter().map(|(constraint, weight)| (constraint, weight))
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_constraint_match_enabled(&self) -> bool {
        self.tracker.is_some()
    }

    /// Match totals of the constraints with at least one live match.
    pub fn constraint_match_totals(
        &self,
    ) -> Result<impl Iterator<Item = &ConstraintMatchTotal<Sc>>, InlinerError> {
        Ok(self.tracker()?.totals())
    }

    /// Match total of one constraint, `None` if it has no live match.
    pub fn constraint_match_total(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<Option<&ConstraintMatchTotal<Sc>>, InlinerError> {
        Ok(self.tracker()?.total(constraint))
    }

    /// Indictments of the entities involved in at least one live match.
    pub fn indictments(&self) -> Result<impl Iterator<Item = &Indictment<Sc>>, InlinerError> {
        Ok(self.tracker()?.indictments())
    }

    pub fn indictment(&self, entity: &EntityRef) -> Result<Option<&Indictment<Sc>>, InlinerError> {
        Ok(self.tracker()?.indictment(entity))
    }

    /// Breaks the current score down per configured constraint.
    pub fn explain(&self, init_score: i32) -> Result<ScoreExplanation<Sc>, InlinerError> {
        let tracker = self.tracker()?;
        let hard_levels = self.zero.hard_levels_count();
        let constraint_analyses = self
            .constraints
            .iter()
            .map(|(constraint, weight)| {
                let total = tracker.total(constraint);
                ConstraintAnalysis {
                    constraint_ref: constraint.clone(),
                    weight: weight.clone(),
                    score: total.map_or_else(|| self.zero.clone(), |t| t.score().clone()),
                    match_count: total.map_or(0, ConstraintMatchTotal::match_count),
                    is_hard: weight.to_level_numbers()[..hard_levels]
                        .iter()
                        .any(|&level| level != 0),
                }
            })
            .collect();
        Ok(ScoreExplanation {
            score: self.extract_score(init_score),
            constraint_analyses,
        })
    }

    fn tracker(&self) -> Result<&MatchTracker<Sc>, InlinerError> {
        self.tracker.as_ref().ok_or(InlinerError::MatchTrackingDisabled)
    }

    fn apply(&mut self, deltas: &[(usize, i64)]) {
        for &(level, delta) in deltas {
            self.totals[level] = self.totals[level].wrapping_add(delta);
        }
    }

    fn revert(&mut self, deltas: &[(usize, i64)]) {
        for &(level, delta) in deltas {
            self.totals[level] = self.totals[level].wrapping_sub(delta);
        }
    }
}

impl<Sc: Score> std::fmt::Debug for ScoreInliner<Sc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreInliner")
            .field("totals", &self.totals)
            .field("constraints", &self.constraints.len())
            .field("constraint_match_enabled", &self.tracker.is_some())
            .finish()
    }
}

/// Applies the weighted impact of one constraint.
///
/// Built by [`ScoreInliner::build_weighted_impacter`] and only valid for
/// the inliner that built it.
#[derive(Debug, Clone)]
pub struct WeightedImpacter<Sc: Score> {
    constraint: usize,
    levels: SmallVec<[(usize, i64); 2]>,
    _phantom: PhantomData<fn() -> Sc>,
}

impl<Sc: Score> WeightedImpacter<Sc> {
    /// Adds `weight * match_weight` to the inliner's totals.
    ///
    /// Level arithmetic wraps on overflow; undo reverses a wrapped impact
    /// exactly.
    ///
    /// `justifications` are recorded only when constraint matching is
    /// enabled.
    pub fn impact(
        &self,
        inliner: &mut ScoreInliner<Sc>,
        match_weight: i64,
        justifications: Vec<EntityRef>,
    ) -> UndoHandle<Sc> {
        let deltas: SmallVec<[(usize, i64); 2]> = self
            .levels
            .iter()
            .map(|&(level, weight)| (level, weight.wrapping_mul(match_weight)))
            .collect();
        inliner.apply(&deltas);

        let match_id = match inliner.tracker.as_mut() {
            Some(tracker) => {
                let (constraint, weight) = &inliner.constraints[self.constraint];
                let mut levels = vec![0; inliner.totals.len()];
                for &(level, delta) in &deltas {
                    levels[level] = delta;
                }
                let score = inliner.zero.from_level_numbers(0, &levels);
                Some(tracker.add_match(constraint, weight, score, justifications))
            }
            None => None,
        };

        UndoHandle {
            deltas,
            match_id,
            _phantom: PhantomData,
        }
    }

    /// Index of the constraint in the inliner's configuration order.
    pub fn constraint_index(&self) -> usize {
        self.constraint
    }
}

/// Reverses exactly one [`WeightedImpacter::impact`] call.
#[must_use = "dropping an undo handle leaves its impact in the score for good"]
#[derive(Debug)]
pub struct UndoHandle<Sc: Score> {
    deltas: SmallVec<[(usize, i64); 2]>,
    match_id: Option<MatchId>,
    _phantom: PhantomData<fn() -> Sc>,
}

impl<Sc: Score> UndoHandle<Sc> {
    pub fn undo(self, inliner: &mut ScoreInliner<Sc>) {
        inliner.revert(&self.deltas);
        if let (Some(id), Some(tracker)) = (self.match_id, inliner.tracker.as_mut()) {
            tracker.remove_match(id);
        }
    }
}
