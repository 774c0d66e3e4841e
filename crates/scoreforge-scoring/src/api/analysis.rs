//! Score analysis types for constraint match tracking.
//!
//! These types are maintained by the score inliner when constraint matching
//! is enabled: which matches each constraint currently has, which entities
//! are involved in each match, and how much each entity costs.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use scoreforge_core::score::Score;
use scoreforge_core::ConstraintRef;

/// Reference to an entity involved in a constraint match.
///
/// Uses type erasure to allow storing references to different entity types
/// in a single collection. Equality and hashing use the type name and the
/// display string.
#[derive(Clone)]
pub struct EntityRef {
    /// Type name of the entity (e.g., "Lesson", "Room").
    pub type_name: String,
    /// String representation for display.
    pub display: String,
    /// Type-erased entity for programmatic access.
    entity: Arc<dyn Any + Send + Sync>,
}

impl EntityRef {
    /// Creates a new entity reference from a concrete entity.
    pub fn new<T: Clone + Debug + Send + Sync + 'static>(entity: &T) -> Self {
        Self::with_display(entity, format!("{:?}", entity))
    }

    /// Creates an entity reference with a custom display string.
    pub fn with_display<T: Clone + Send + Sync + 'static>(entity: &T, display: String) -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            display,
            entity: Arc::new(entity.clone()),
        }
    }

    /// Attempts to downcast to the concrete entity type.
    pub fn as_entity<T: 'static>(&self) -> Option<&T> {
        self.entity.downcast_ref::<T>()
    }

    /// Returns the short type name (without module path).
    pub fn short_type_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }
}

impl Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("type", &self.short_type_name())
            .field("display", &self.display)
            .finish()
    }
}

impl PartialEq for EntityRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.display == other.display
    }
}

impl Eq for EntityRef {}

impl Hash for EntityRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.display.hash(state);
    }
}

/// Identifies one live constraint match inside an inliner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(pub(crate) u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match#{}", self.0)
    }
}

/// A single live match of a constraint.
#[derive(Debug, Clone)]
pub struct ConstraintMatch<Sc: Score> {
    pub id: MatchId,
    /// Reference to the constraint that matched.
    pub constraint_ref: ConstraintRef,
    /// Score impact of this match.
    pub score: Sc,
    /// Entities involved in the match.
    pub justifications: Vec<EntityRef>,
}

impl<Sc: Score> ConstraintMatch<Sc> {
    /// Returns the involved entities joined by ", ".
    pub fn description(&self) -> String {
        if self.justifications.is_empty() {
            "No entities".to_string()
        } else {
            self.justifications
                .iter()
                .map(|e| e.display.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Running total of one constraint's live matches.
#[derive(Debug, Clone)]
pub struct ConstraintMatchTotal<Sc: Score> {
    constraint_ref: ConstraintRef,
    weight: Sc,
    score: Sc,
    matches: BTreeMap<MatchId, ConstraintMatch<Sc>>,
}

impl<Sc: Score> ConstraintMatchTotal<Sc> {
    pub(crate) fn new(constraint_ref: ConstraintRef, weight: Sc) -> Self {
        let score = weight.zero();
        Self {
            constraint_ref,
            weight,
            score,
            matches: BTreeMap::new(),
        }
    }

    pub(crate) fn add_match(&mut self, constraint_match: ConstraintMatch<Sc>) {
        self.score = self.score.clone() + constraint_match.score.clone();
        self.matches.insert(constraint_match.id, constraint_match);
    }

    pub(crate) fn remove_match(&mut self, id: MatchId) -> Option<ConstraintMatch<Sc>> {
        let removed = self.matches.remove(&id)?;
        self.score = self.score.clone() - removed.score.clone();
        Some(removed)
    }

    pub fn constraint_ref(&self) -> &ConstraintRef {
        &self.constraint_ref
    }

    /// The configured weight of the constraint.
    pub fn weight(&self) -> &Sc {
        &self.weight
    }

    /// Sum of the scores of all live matches.
    pub fn score(&self) -> &Sc {
        &self.score
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Live matches in the order they were made.
    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<Sc>> {
        self.matches.values()
    }
}

/// Analysis of how a single entity impacts the score.
#[derive(Debug, Clone)]
pub struct Indictment<Sc: Score> {
    /// The entity being analyzed.
    pub entity: EntityRef,
    /// Total score impact from this entity.
    pub score: Sc,
    matches: BTreeMap<MatchId, ConstraintMatch<Sc>>,
}

impl<Sc: Score> Indictment<Sc> {
    pub(crate) fn new(entity: EntityRef, zero: Sc) -> Self {
        Self {
            entity,
            score: zero,
            matches: BTreeMap::new(),
        }
    }

    pub(crate) fn add_match(&mut self, constraint_match: ConstraintMatch<Sc>) {
        self.score = self.score.clone() + constraint_match.score.clone();
        self.matches.insert(constraint_match.id, constraint_match);
    }

    pub(crate) fn remove_match(&mut self, id: MatchId) {
        if let Some(removed) = self.matches.remove(&id) {
            self.score = self.score.clone() - removed.score;
        }
    }

    /// Returns the number of live matches involving this entity.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Live matches involving this entity.
    pub fn matches(&self) -> impl Iterator<Item = &ConstraintMatch<Sc>> {
        self.matches.values()
    }

    /// Returns the distinct constraints this entity is matched by.
    pub fn violated_constraints(&self) -> Vec<&ConstraintRef> {
        let mut constraints: Vec<_> = self.matches.values().map(|m| &m.constraint_ref).collect();
        constraints.sort();
        constraints.dedup();
        constraints
    }

    /// Returns the number of distinct constraints violated.
    pub fn constraint_count(&self) -> usize {
        self.violated_constraints().len()
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis<Sc: Score> {
    /// Constraint reference.
    pub constraint_ref: ConstraintRef,
    /// Constraint weight (score per match).
    pub weight: Sc,
    /// Total score from this constraint.
    pub score: Sc,
    /// Number of live matches.
    pub match_count: usize,
    /// Whether the weight touches a hard level.
    pub is_hard: bool,
}

impl<Sc: Score> ConstraintAnalysis<Sc> {
    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone)]
pub struct ScoreExplanation<Sc: Score> {
    /// The total score.
    pub score: Sc,
    /// Per-constraint breakdown, one entry per configured constraint.
    pub constraint_analyses: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    /// Returns the total match count across all constraints.
    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .filter(|a| !a.score.is_zero())
            .collect()
    }

    /// Returns the analysis of one constraint.
    pub fn get(&self, constraint_ref: &ConstraintRef) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraint_analyses
            .iter()
            .find(|a| &a.constraint_ref == constraint_ref)
    }
}

impl<Sc: Score> fmt::Display for ScoreExplanation<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for analysis in &self.constraint_analyses {
            writeln!(
                f,
                "  {}: {} ({} matches)",
                analysis.constraint_ref,
                analysis.score.to_short_string(),
                analysis.match_count
            )?;
        }
        Ok(())
    }
}
