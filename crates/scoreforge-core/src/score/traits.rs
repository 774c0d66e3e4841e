//! Core Score trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

use super::util;
use super::ScoreLevel;
use crate::error::ScoreError;

/// Core trait for all score types in ScoreForge.
///
/// A score is an immutable vector of levels, ordered from most to least
/// significant, plus an `init_score` counting uninitialized planning
/// variables (0 for a fully initialized solution, negative otherwise).
///
/// All score implementations must be:
/// - Immutable (operations return new instances)
/// - Thread-safe (Send + Sync)
/// - Comparable (total ordering over `init_score` first, then the levels)
///
/// Combining two scores with a different level layout is an error. The
/// operator traits (`+`, `-`) panic on it; [`try_add`](Score::try_add) and
/// [`try_subtract`](Score::try_subtract) report it.
pub trait Score:
    Clone
    + Debug
    + Display
    + Send
    + Sync
    + PartialEq
    + Eq
    + Hash
    + PartialOrd
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns the negated count of uninitialized planning variables.
    fn init_score(&self) -> i32;

    /// Returns a copy of this score with another init score.
    fn with_init_score(&self, init_score: i32) -> Self;

    /// Returns true if no planning variable is left uninitialized.
    #[inline]
    fn is_solution_initialized(&self) -> bool {
        self.init_score() >= 0
    }

    /// Returns true if this score represents a feasible solution.
    ///
    /// A score is feasible when the solution is initialized
    /// (`init_score >= 0`) and every hard level is `>= 0`.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score with the same level layout as this score.
    fn zero(&self) -> Self;

    /// Returns true if every level and the init score are zero.
    fn is_zero(&self) -> bool {
        self.init_score() == 0 && self.to_level_numbers().iter().all(|&level| level == 0)
    }

    /// Returns the number of score levels (hard + medium + soft).
    fn levels_count(&self) -> usize;

    /// Returns the number of levels that count for feasibility.
    fn hard_levels_count(&self) -> usize;

    /// Returns the score values as a vector of i64.
    ///
    /// The order is from highest priority to lowest priority.
    /// For HardSoftScore: [hard, soft]
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Creates a score with the same layout as this one from level numbers.
    fn try_from_level_numbers(&self, init_score: i32, levels: &[i64]) -> Result<Self, ScoreError>;

    /// Creates a score with the same layout as this one from level numbers.
    ///
    /// # Panics
    /// Panics if the number of levels doesn't match `levels_count()`.
    fn from_level_numbers(&self, init_score: i32, levels: &[i64]) -> Self {
        match self.try_from_level_numbers(init_score, levels) {
            Ok(score) => score,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fails if `other` does not have the same level layout.
    fn ensure_compatible(&self, other: &Self) -> Result<(), ScoreError> {
        if self.hard_levels_count() != other.hard_levels_count()
            || self.levels_count() != other.levels_count()
        {
            return Err(ScoreError::Incompatible {
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(())
    }

    /// Adds two scores, failing if their layouts differ.
    fn try_add(&self, addend: &Self) -> Result<Self, ScoreError> {
        self.ensure_compatible(addend)?;
        Ok(self.clone() + addend.clone())
    }

    /// Subtracts two scores, failing if their layouts differ.
    fn try_subtract(&self, subtrahend: &Self) -> Result<Self, ScoreError> {
        self.ensure_compatible(subtrahend)?;
        Ok(self.clone() - subtrahend.clone())
    }

    /// Multiplies every level by a scalar, flooring the result.
    ///
    /// Flooring rounds toward negative infinity, so a penalty never
    /// rounds toward feasibility.
    fn multiply(&self, multiplicand: f64) -> Self;

    /// Divides every level by a scalar, flooring the result.
    fn divide(&self, divisor: f64) -> Self;

    /// Raises every level to a power, flooring the result.
    fn power(&self, exponent: f64) -> Self;

    /// Returns the absolute value of this score.
    fn abs(&self) -> Self;

    /// Returns the negated score.
    fn negate(&self) -> Self {
        -self.clone()
    }

    /// Returns the semantic label for the score level at the given index.
    ///
    /// Level indices follow the same order as `to_level_numbers()`:
    /// highest priority first.
    ///
    /// # Panics
    /// Panics if `index >= levels_count()`.
    fn level_label(&self, index: usize) -> ScoreLevel;

    /// Returns the text form without zero levels, `"0"` if everything is zero.
    fn to_short_string(&self) -> String;

    /// Divides this score level by level by `divisor`, treating a zero
    /// divisor level as 1.
    ///
    /// Used to normalize a score by another score in diagnostics, where a
    /// zero level must not turn the result into garbage.
    ///
    /// # Panics
    /// Panics if the layouts differ.
    fn divide_by_sanitized_divisor(&self, divisor: &Self) -> Self {
        if let Err(e) = self.ensure_compatible(divisor) {
            panic!("{}", e);
        }
        let init_score = util::floor_div(
            i64::from(self.init_score()),
            util::sanitize(i64::from(divisor.init_score())),
        );
        let levels: Vec<i64> = self
            .to_level_numbers()
            .into_iter()
            .zip(divisor.to_level_numbers())
            .map(|(dividend, divisor)| util::floor_div(dividend, util::sanitize(divisor)))
            .collect();
        self.from_level_numbers(util::narrow_init(init_score), &levels)
    }

    /// Compares two scores, returning the ordering.
    ///
    /// Default implementation uses the Ord trait.
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Returns true if this score is better than the other score.
    ///
    /// In optimization, "better" means higher score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is worse than the other score.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if this score is equal to the other score.
    fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }
}

/// Marker trait for scores that can be parsed from a string.
pub trait ParseableScore: Score {
    /// Parses a score from a string representation.
    ///
    /// # Format
    /// - SimpleScore: `"42"` or `"-7init/42"`
    /// - HardSoftScore: `"[0]hard/[-100]soft"` or `"-7init/[-1]hard/[0]soft"`
    /// - HardMediumSoftScore: `"0hard/0medium/-100soft"`
    /// - BendableScore: `"[0/-1]hard/[-10/-20/-30]soft"`
    ///
    /// A level written as `*` parses to `i64::MIN`.
    fn parse(s: &str) -> Result<Self, ScoreError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String {
        self.to_string()
    }
}
