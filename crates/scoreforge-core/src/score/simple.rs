//! SimpleScore - Single-level score implementation

use std::fmt;

use super::traits::Score;
use super::ScoreLevel;

/// A simple score with a single integer value.
///
/// This is the simplest score type, useful when there's only one
/// type of constraint to optimize. Its single level counts as hard
/// for feasibility.
///
/// # Examples
///
/// ```
/// use scoreforge_core::{SimpleScore, Score};
///
/// let score1 = SimpleScore::of(-5);
/// let score2 = SimpleScore::of(-3);
///
/// assert!(score2 > score1);  // -3 is better than -5
/// assert!(!score1.is_feasible());  // Negative scores are not feasible
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore {
    init_score: i32,
    score: i64,
}

impl SimpleScore {
    /// The zero score.
    pub const ZERO: SimpleScore = SimpleScore {
        init_score: 0,
        score: 0,
    };

    /// A score of 1 (useful for incrementing).
    pub const ONE: SimpleScore = SimpleScore {
        init_score: 0,
        score: 1,
    };

    /// Creates a new SimpleScore with the given value.
    #[inline]
    pub const fn of(score: i64) -> Self {
        SimpleScore {
            init_score: 0,
            score,
        }
    }

    /// Creates a score for a partially initialized solution.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, score: i64) -> Self {
        SimpleScore { init_score, score }
    }

    /// Returns the score value.
    #[inline]
    pub const fn score(&self) -> i64 {
        self.score
    }
}

impl Score for SimpleScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score >= 0 && self.score >= 0
    }

    #[inline]
    fn levels_count(&self) -> usize {
        1
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        1
    }

    impl_score_scale!(SimpleScore { score });

    fn level_label(&self, index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Hard,
            _ => panic!("SimpleScore has 1 level, got index {}", index),
        }
    }

    fn to_short_string(&self) -> String {
        self.build_short_string()
    }
}

impl_score_ops!(SimpleScore { score });

impl fmt::Debug for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.init_score == 0 {
            write!(f, "SimpleScore({})", self.score)
        } else {
            write!(f, "SimpleScore({}init, {})", self.init_score, self.score)
        }
    }
}

impl_score_parse!(SimpleScore { score => "" });
