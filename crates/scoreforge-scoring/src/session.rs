//! One scoring session: a score ledger bound to one candidate solution.

use scoreforge_config::{EnvironmentMode, SessionConfig};
use scoreforge_core::score::{ParseableScore, Score};
use scoreforge_core::ConstraintRef;
use tracing::debug;

use crate::api::analysis::ScoreExplanation;
use crate::api::weight_overrides::ConstraintWeightOverrides;
use crate::error::{InlinerError, SessionError};
use crate::inliner::{ScoreInliner, WeightedImpacter};
use crate::node::TupleArena;
use crate::tuple::Tuple;

/// Score ledger and init score of one candidate solution.
///
/// A session is driven by a single thread. Sessions share nothing, so
/// parallel searches each build their own.
///
/// # Example
///
/// ```
/// use scoreforge_config::SessionConfig;
/// use scoreforge_core::{ConstraintRef, HardSoftScore};
/// use scoreforge_scoring::ScoreSession;
///
/// let room = ConstraintRef::new("timetabling", "Room conflict");
/// let config = SessionConfig::new().with_constraint_weight("timetabling/Room conflict", "2hard/0soft");
/// let mut session = ScoreSession::new(
///     HardSoftScore::ZERO,
///     [(room.clone(), HardSoftScore::of_hard(1))],
///     &config,
/// )
/// .unwrap();
///
/// let impacter = session.build_impacter(&room).unwrap();
/// let _undo = impacter.impact(session.inliner_mut(), -1, Vec::new());
/// session.set_init_score(-1);
/// assert_eq!(session.calculate_score().to_string(), "-1init/[-2]hard/[0]soft");
/// ```
pub struct ScoreSession<Sc: Score> {
    inliner: ScoreInliner<Sc>,
    init_score: i32,
    environment_mode: EnvironmentMode,
    dirty_queue_capacity: usize,
}

impl<Sc: ParseableScore> ScoreSession<Sc> {
    /// Builds a session from the default constraint weights, replacing those
    /// overridden by `config`.
    pub fn new<I>(zero: Sc, default_weights: I, config: &SessionConfig) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = (ConstraintRef, Sc)>,
    {
        config.validate()?;
        let mut weights: Vec<(ConstraintRef, Sc)> = default_weights.into_iter().collect();
        ConstraintWeightOverrides::<Sc>::from_config(config)?.apply(&mut weights);
        let inliner = ScoreInliner::new(zero, weights, config.constraint_match_enabled)?;

        debug!(
            event = "session_built",
            environment_mode = ?config.environment_mode,
            constraints = inliner.constraint_count(),
            overrides = config.constraint_weights.len(),
        );

        Ok(Self {
            inliner,
            init_score: 0,
            environment_mode: config.environment_mode,
            dirty_queue_capacity: config.dirty_queue_capacity,
        })
    }
}

impl<Sc: Score> ScoreSession<Sc> {
    /// Returns the current score.
    ///
    /// # Panics
    /// In full assert mode with constraint matching enabled, panics if the
    /// running totals disagree with the sum of the constraint match totals.
    pub fn calculate_score(&self) -> Sc {
        let score = self.inliner.extract_score(self.init_score);
        if self.environment_mode.is_fully_asserted() {
            self.assert_match_totals(&score);
        }
        score
    }

    pub fn init_score(&self) -> i32 {
        self.init_score
    }

    /// Sets the negated count of uninitialized planning variables.
    pub fn set_init_score(&mut self, init_score: i32) {
        self.init_score = init_score;
    }

    pub fn inliner(&self) -> &ScoreInliner<Sc> {
        &self.inliner
    }

    pub fn inliner_mut(&mut self) -> &mut ScoreInliner<Sc> {
        &mut self.inliner
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn build_impacter(
        &self,
        constraint: &ConstraintRef,
    ) -> Result<WeightedImpacter<Sc>, InlinerError> {
        self.inliner.build_weighted_impacter(constraint)
    }

    /// Creates a tuple arena sized and validated as configured.
    pub fn new_arena<T: Tuple>(&self) -> TupleArena<T> {
        TupleArena::with_capacity(self.dirty_queue_capacity)
            .validating(self.environment_mode.is_asserted())
    }

    /// Breaks the current score down per constraint.
    pub fn explain(&self) -> Result<ScoreExplanation<Sc>, InlinerError> {
        self.inliner.explain(self.init_score)
    }

    fn assert_match_totals(&self, score: &Sc) {
        let Ok(totals) = self.inliner.constraint_match_totals() else {
            return;
        };
        let zero = self.inliner.zero().with_init_score(self.init_score);
        let from_matches = totals.fold(zero, |sum, total| sum + total.score().clone());
        if &from_matches != score {
            panic!(
                "Score corruption: the running score ({}) is not the sum of the constraint match totals ({})",
                score, from_matches
            );
        }
    }
}
