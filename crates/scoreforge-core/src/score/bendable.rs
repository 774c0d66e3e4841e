//! BendableScore - Runtime-configurable multi-level score

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::traits::{ParseableScore, Score};
use super::util;
use super::ScoreLevel;
use crate::error::ScoreError;

/// A score with a configurable number of hard and soft levels.
///
/// Unlike `HardSoftScore`, the number of levels is determined at runtime.
/// This is useful when the constraint structure varies between problem instances.
/// Two bendable scores can only be combined or compared when they have the
/// same number of hard and soft levels.
///
/// # Examples
///
/// ```
/// use scoreforge_core::score::{BendableScore, Score};
///
/// // Create a score with 2 hard levels and 3 soft levels
/// let score = BendableScore::of(vec![-1, -2], vec![-10, -20, -30]);
///
/// assert_eq!(score.hard_levels_count(), 2);
/// assert_eq!(score.soft_levels_count(), 3);
/// assert!(!score.is_feasible());  // Negative hard scores
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BendableScore {
    init_score: i32,
    hard_scores: Vec<i64>,
    soft_scores: Vec<i64>,
}

impl BendableScore {
    /// Creates a new BendableScore with the given hard and soft score vectors.
    pub fn of(hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore::of_uninitialized(0, hard_scores, soft_scores)
    }

    /// Creates a score for a partially initialized solution.
    pub fn of_uninitialized(init_score: i32, hard_scores: Vec<i64>, soft_scores: Vec<i64>) -> Self {
        BendableScore {
            init_score,
            hard_scores,
            soft_scores,
        }
    }

    /// Creates a zero score with the specified number of levels.
    pub fn zero_with_levels(hard_levels: usize, soft_levels: usize) -> Self {
        BendableScore::of(vec![0; hard_levels], vec![0; soft_levels])
    }

    /// Creates a score with a single non-zero hard level.
    ///
    /// # Panics
    /// Panics if `level >= hard_levels`.
    pub fn of_hard(hard_levels: usize, soft_levels: usize, level: usize, score: i64) -> Self {
        let mut result = BendableScore::zero_with_levels(hard_levels, soft_levels);
        result.hard_scores[level] = score;
        result
    }

    /// Creates a score with a single non-zero soft level.
    ///
    /// # Panics
    /// Panics if `level >= soft_levels`.
    pub fn of_soft(hard_levels: usize, soft_levels: usize, level: usize, score: i64) -> Self {
        let mut result = BendableScore::zero_with_levels(hard_levels, soft_levels);
        result.soft_scores[level] = score;
        result
    }

    /// Creates a score with a single hard level penalty at the given index.
    pub fn one_hard(hard_levels: usize, soft_levels: usize, level: usize) -> Self {
        BendableScore::of_hard(hard_levels, soft_levels, level, 1)
    }

    /// Creates a score with a single soft level penalty at the given index.
    pub fn one_soft(hard_levels: usize, soft_levels: usize, level: usize) -> Self {
        BendableScore::of_soft(hard_levels, soft_levels, level, 1)
    }

    /// Returns the number of hard score levels.
    pub fn hard_levels_count(&self) -> usize {
        self.hard_scores.len()
    }

    /// Returns the number of soft score levels.
    pub fn soft_levels_count(&self) -> usize {
        self.soft_scores.len()
    }

    /// Returns the hard score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn hard_score(&self, level: usize) -> i64 {
        self.hard_scores[level]
    }

    /// Returns the soft score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn soft_score(&self, level: usize) -> i64 {
        self.soft_scores[level]
    }

    /// Returns all hard scores as a slice.
    pub fn hard_scores(&self) -> &[i64] {
        &self.hard_scores
    }

    /// Returns all soft scores as a slice.
    pub fn soft_scores(&self) -> &[i64] {
        &self.soft_scores
    }

    fn assert_compatible(&self, other: &Self) {
        if let Err(e) = self.ensure_compatible(other) {
            panic!("{}", e);
        }
    }

    fn map_levels(&self, init_score: i32, f: impl Fn(i64) -> i64) -> Self {
        BendableScore {
            init_score,
            hard_scores: self.hard_scores.iter().map(|&s| f(s)).collect(),
            soft_scores: self.soft_scores.iter().map(|&s| f(s)).collect(),
        }
    }

    fn zip_levels(&self, other: &Self, init_score: i32, f: impl Fn(i64, i64) -> i64) -> Self {
        self.assert_compatible(other);
        BendableScore {
            init_score,
            hard_scores: self
                .hard_scores
                .iter()
                .zip(&other.hard_scores)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            soft_scores: self
                .soft_scores
                .iter()
                .zip(&other.soft_scores)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl Default for BendableScore {
    fn default() -> Self {
        // Default to 1 hard + 1 soft level (like HardSoftScore)
        BendableScore::zero_with_levels(1, 1)
    }
}

impl Score for BendableScore {
    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        BendableScore {
            init_score,
            ..self.clone()
        }
    }

    fn is_feasible(&self) -> bool {
        self.init_score >= 0 && self.hard_scores.iter().all(|&s| s >= 0)
    }

    fn zero(&self) -> Self {
        BendableScore::zero_with_levels(self.hard_scores.len(), self.soft_scores.len())
    }

    fn levels_count(&self) -> usize {
        self.hard_scores.len() + self.soft_scores.len()
    }

    fn hard_levels_count(&self) -> usize {
        self.hard_scores.len()
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        let mut levels = self.hard_scores.clone();
        levels.extend(self.soft_scores.iter());
        levels
    }

    fn try_from_level_numbers(&self, init_score: i32, levels: &[i64]) -> Result<Self, ScoreError> {
        if levels.len() != self.levels_count() {
            return Err(ScoreError::LevelCount {
                expected: self.levels_count(),
                actual: levels.len(),
            });
        }
        let (hard, soft) = levels.split_at(self.hard_scores.len());
        Ok(BendableScore::of_uninitialized(
            init_score,
            hard.to_vec(),
            soft.to_vec(),
        ))
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        self.map_levels(
            util::floor_init(self.init_score as f64 * multiplicand),
            |s| util::floor_level(s as f64 * multiplicand),
        )
    }

    fn divide(&self, divisor: f64) -> Self {
        self.map_levels(util::floor_init(self.init_score as f64 / divisor), |s| {
            util::floor_level(s as f64 / divisor)
        })
    }

    fn power(&self, exponent: f64) -> Self {
        self.map_levels(
            util::floor_init((self.init_score as f64).powf(exponent)),
            |s| util::floor_level((s as f64).powf(exponent)),
        )
    }

    fn abs(&self) -> Self {
        self.map_levels(self.init_score.wrapping_abs(), i64::wrapping_abs)
    }

    fn level_label(&self, index: usize) -> ScoreLevel {
        if index < self.hard_scores.len() {
            ScoreLevel::Hard
        } else if index < self.levels_count() {
            ScoreLevel::Soft
        } else {
            panic!(
                "BendableScore has {} levels, got index {}",
                self.levels_count(),
                index
            )
        }
    }

    fn to_short_string(&self) -> String {
        let tier = |levels: &[i64], label| {
            (
                levels.iter().any(|&s| s != 0),
                util::bracketed(levels),
                label,
            )
        };
        util::build_short_string(
            self.init_score,
            [
                tier(&self.hard_scores, util::HARD_LABEL),
                tier(&self.soft_scores, util::SOFT_LABEL),
            ],
        )
    }
}

impl Ord for BendableScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.assert_compatible(other);

        // Init score first, then hard levels (highest priority first), then soft
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard_scores.cmp(&other.hard_scores))
            .then_with(|| self.soft_scores.cmp(&other.soft_scores))
    }
}

impl PartialOrd for BendableScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for BendableScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip_levels(&other, self.init_score.wrapping_add(other.init_score), i64::wrapping_add)
    }
}

impl Sub for BendableScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip_levels(&other, self.init_score.wrapping_sub(other.init_score), i64::wrapping_sub)
    }
}

impl Neg for BendableScore {
    type Output = Self;

    fn neg(self) -> Self {
        self.map_levels(self.init_score.wrapping_neg(), i64::wrapping_neg)
    }
}

impl fmt::Debug for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BendableScore(init: {}, hard: {:?}, soft: {:?})",
            self.init_score, self.hard_scores, self.soft_scores
        )
    }
}

impl fmt::Display for BendableScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[0/0]hard/[-10/-20/-30]soft"
        write!(
            f,
            "{}{}hard/{}soft",
            util::init_prefix(self.init_score),
            util::bracketed(&self.hard_scores),
            util::bracketed(&self.soft_scores)
        )
    }
}

impl ParseableScore for BendableScore {
    fn parse(s: &str) -> Result<Self, ScoreError> {
        const NAME: &str = "BendableScore";
        let s = s.trim();

        let (init_token, hard_tokens, soft_tokens) = util::parse_bendable_score_tokens(NAME, s)?;
        let init_score = util::parse_init_score(NAME, s, init_token)?;
        let hard_scores = hard_tokens
            .into_iter()
            .map(|token| util::parse_level(NAME, s, token))
            .collect::<Result<Vec<_>, _>>()?;
        let soft_scores = soft_tokens
            .into_iter()
            .map(|token| util::parse_level(NAME, s, token))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BendableScore::of_uninitialized(
            init_score,
            hard_scores,
            soft_scores,
        ))
    }
}
