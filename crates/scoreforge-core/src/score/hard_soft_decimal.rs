//! HardSoftDecimalScore - Two-level score with i64 precision and ×100000 scaling
//!
//! This score type represents a decimal score without heap allocation.
//! Internal values are scaled by 100000 to provide 5 decimal places of precision.
//! Level numbers exposed through [`Score`] are the scaled values.

use std::fmt;

use super::traits::{ParseableScore, Score};
use super::util;
use super::ScoreLevel;
use crate::error::ScoreError;

/// Scale factor for 5 decimal places of precision.
const SCALE: i64 = 100_000;
const SCALE_DIGITS: usize = 5;

/// A score with separate hard and soft constraint levels, using i64 with ×100000 scaling.
///
/// Internal values are stored pre-scaled. Use [`of`](Self::of) for unscaled input
/// or [`of_scaled`](Self::of_scaled) for pre-scaled values.
///
/// # Examples
///
/// ```
/// use scoreforge_core::{HardSoftDecimalScore, Score};
///
/// // Create from unscaled values (automatically multiplied by 100000)
/// let score1 = HardSoftDecimalScore::of(-1, -100);
/// assert_eq!(score1.hard_scaled(), -100000);
/// assert_eq!(score1.soft_scaled(), -10000000);
///
/// // Create from pre-scaled values (for minute-based penalties)
/// let score2 = HardSoftDecimalScore::of_scaled(-3050000, 0);  // -30.5 hard
/// assert!(!score2.is_feasible());
///
/// // Display shows values (trailing zeros stripped)
/// let score3 = HardSoftDecimalScore::of_scaled(-150000, -250000);
/// assert_eq!(format!("{}", score3), "-1.5hard/-2.5soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftDecimalScore {
    init_score: i32,
    hard: i64,
    soft: i64,
}

impl HardSoftDecimalScore {
    /// The zero score.
    pub const ZERO: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(0, 0);

    /// One hard constraint penalty (scaled).
    pub const ONE_HARD: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(SCALE, 0);

    /// One soft constraint penalty (scaled).
    pub const ONE_SOFT: HardSoftDecimalScore = HardSoftDecimalScore::of_scaled(0, SCALE);

    /// Creates a new score from unscaled values.
    ///
    /// The values are automatically multiplied by 100000.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreforge_core::HardSoftDecimalScore;
    ///
    /// let score = HardSoftDecimalScore::of(-2, -100);
    /// assert_eq!(score.hard_scaled(), -200000);
    /// assert_eq!(score.soft_scaled(), -10000000);
    /// ```
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore::of_scaled(hard * SCALE, soft * SCALE)
    }

    /// Creates a new score from pre-scaled values.
    ///
    /// ```
    /// use scoreforge_core::HardSoftDecimalScore;
    ///
    /// // -30.5 hard constraint (overlap of 30.5 minutes)
    /// let score = HardSoftDecimalScore::of_scaled(-3050000, 0);
    /// assert_eq!(score.hard_scaled(), -3050000);
    /// ```
    #[inline]
    pub const fn of_scaled(hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore::of_uninitialized(0, hard, soft)
    }

    /// Creates a partially initialized score from pre-scaled values.
    #[inline]
    pub const fn of_uninitialized(init_score: i32, hard: i64, soft: i64) -> Self {
        HardSoftDecimalScore {
            init_score,
            hard,
            soft,
        }
    }

    /// Creates a score with only a hard component (unscaled input).
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftDecimalScore::of_scaled(hard * SCALE, 0)
    }

    /// Creates a score with only a soft component (unscaled input).
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftDecimalScore::of_scaled(0, soft * SCALE)
    }

    /// Creates a score with only a hard component (pre-scaled input).
    #[inline]
    pub const fn of_hard_scaled(hard: i64) -> Self {
        HardSoftDecimalScore::of_scaled(hard, 0)
    }

    /// Creates a score with only a soft component (pre-scaled input).
    #[inline]
    pub const fn of_soft_scaled(soft: i64) -> Self {
        HardSoftDecimalScore::of_scaled(0, soft)
    }

    /// Returns the scaled hard score component.
    #[inline]
    pub const fn hard_scaled(&self) -> i64 {
        self.hard
    }

    /// Returns the scaled soft score component.
    #[inline]
    pub const fn soft_scaled(&self) -> i64 {
        self.soft
    }

    /// Returns the hard score as a new HardSoftDecimalScore.
    pub const fn hard_score(&self) -> HardSoftDecimalScore {
        HardSoftDecimalScore::of_scaled(self.hard, 0)
    }

    /// Returns the soft score as a new HardSoftDecimalScore.
    pub const fn soft_score(&self) -> HardSoftDecimalScore {
        HardSoftDecimalScore::of_scaled(0, self.soft)
    }

    /// Returns true if this score has a non-zero hard component.
    #[inline]
    pub const fn has_hard_component(&self) -> bool {
        self.hard != 0
    }
}

#[cfg(feature = "decimal")]
impl HardSoftDecimalScore {
    /// Creates a score from decimal values, flooring anything past 5 decimal places.
    ///
    /// Returns `None` if a scaled value does not fit in an `i64`.
    pub fn from_decimals(
        hard: rust_decimal::Decimal,
        soft: rust_decimal::Decimal,
    ) -> Option<Self> {
        use rust_decimal::prelude::ToPrimitive;

        let scale = rust_decimal::Decimal::from(SCALE);
        let hard = hard.checked_mul(scale)?.floor().to_i64()?;
        let soft = soft.checked_mul(scale)?.floor().to_i64()?;
        Some(HardSoftDecimalScore::of_scaled(hard, soft))
    }

    /// Returns the hard score as a decimal.
    pub fn hard_decimal(&self) -> rust_decimal::Decimal {
        rust_decimal::Decimal::new(self.hard, SCALE_DIGITS as u32).normalize()
    }

    /// Returns the soft score as a decimal.
    pub fn soft_decimal(&self) -> rust_decimal::Decimal {
        rust_decimal::Decimal::new(self.soft, SCALE_DIGITS as u32).normalize()
    }
}

impl Score for HardSoftDecimalScore {
    #[inline]
    fn init_score(&self) -> i32 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i32) -> Self {
        HardSoftDecimalScore::of_uninitialized(init_score, self.hard, self.soft)
    }

    #[inline]
    fn is_feasible(&self) -> bool {
        self.init_score >= 0 && self.hard >= 0
    }

    #[inline]
    fn zero(&self) -> Self {
        HardSoftDecimalScore::ZERO
    }

    #[inline]
    fn levels_count(&self) -> usize {
        2
    }

    #[inline]
    fn hard_levels_count(&self) -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    fn try_from_level_numbers(&self, init_score: i32, levels: &[i64]) -> Result<Self, ScoreError> {
        match *levels {
            [hard, soft] => Ok(HardSoftDecimalScore::of_uninitialized(init_score, hard, soft)),
            _ => Err(ScoreError::LevelCount {
                expected: 2,
                actual: levels.len(),
            }),
        }
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        HardSoftDecimalScore::of_uninitialized(
            util::floor_init(self.init_score as f64 * multiplicand),
            util::floor_level(self.hard as f64 * multiplicand),
            util::floor_level(self.soft as f64 * multiplicand),
        )
    }

    fn divide(&self, divisor: f64) -> Self {
        HardSoftDecimalScore::of_uninitialized(
            util::floor_init(self.init_score as f64 / divisor),
            util::floor_level(self.hard as f64 / divisor),
            util::floor_level(self.soft as f64 / divisor),
        )
    }

    fn power(&self, exponent: f64) -> Self {
        let scale = SCALE as f64;
        let pow = |scaled: i64| util::floor_level((scaled as f64 / scale).powf(exponent) * scale);
        HardSoftDecimalScore::of_uninitialized(
            util::floor_init((self.init_score as f64).powf(exponent)),
            pow(self.hard),
            pow(self.soft),
        )
    }

    fn abs(&self) -> Self {
        HardSoftDecimalScore::of_uninitialized(
            self.init_score.wrapping_abs(),
            self.hard.wrapping_abs(),
            self.soft.wrapping_abs(),
        )
    }

    fn level_label(&self, index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Hard,
            1 => ScoreLevel::Soft,
            _ => panic!("HardSoftDecimalScore has 2 levels, got index {}", index),
        }
    }

    fn to_short_string(&self) -> String {
        util::build_short_string(
            self.init_score,
            [
                (self.hard != 0, format_scaled(self.hard), util::HARD_LABEL),
                (self.soft != 0, format_scaled(self.soft), util::SOFT_LABEL),
            ],
        )
    }

    /// Levels are scaled, so a zero divisor level stands for 1.0.
    fn divide_by_sanitized_divisor(&self, divisor: &Self) -> Self {
        let level = |dividend: i64, divisor: i64| {
            let divisor = if divisor == 0 { SCALE } else { divisor };
            let quotient = i128::from(dividend) * i128::from(SCALE);
            let floored = quotient.div_euclid(i128::from(divisor));
            // div_euclid rounds up for negative divisors
            let floored = if divisor < 0 && quotient.rem_euclid(i128::from(divisor)) != 0 {
                floored - 1
            } else {
                floored
            };
            floored.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
        };
        let init_score = util::floor_div(
            i64::from(self.init_score),
            util::sanitize(i64::from(divisor.init_score)),
        );
        HardSoftDecimalScore::of_uninitialized(
            util::narrow_init(init_score),
            level(self.hard, divisor.hard),
            level(self.soft, divisor.soft),
        )
    }
}

impl_score_ops!(HardSoftDecimalScore { hard, soft });

/// Renders a scaled value with trailing zeros stripped.
fn format_scaled(scaled: i64) -> String {
    let sign = if scaled < 0 { "-" } else { "" };
    let magnitude = scaled.unsigned_abs();
    let whole = magnitude / SCALE as u64;
    let fraction = magnitude % SCALE as u64;
    if fraction == 0 {
        format!("{}{}", sign, whole)
    } else {
        let digits = format!("{:0width$}", fraction, width = SCALE_DIGITS);
        format!("{}{}.{}", sign, whole, digits.trim_end_matches('0'))
    }
}

/// Parses `"-30.5"` into `-3050000` without going through floating point.
fn parse_scaled(input: &str, token: &str) -> Result<i64, ScoreError> {
    const NAME: &str = "HardSoftDecimalScore";
    if token == util::WILDCARD {
        return Ok(i64::MIN);
    }
    let invalid = |reason: &str| {
        ScoreError::parse(
            input,
            NAME,
            format!("the level ({}) is not a valid decimal: {}", token, reason),
        )
    };

    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid("unexpected character"));
    }
    if fraction.len() > SCALE_DIGITS {
        return Err(invalid("more than 5 decimal places"));
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("out of range"))?
    };
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = SCALE_DIGITS);
        padded.parse().map_err(|_| invalid("out of range"))?
    };
    let scaled = whole
        .checked_mul(SCALE)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| invalid("out of range"))?;
    Ok(if negative { -scaled } else { scaled })
}

impl fmt::Debug for HardSoftDecimalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HardSoftDecimalScore({}init, {}, {})",
            self.init_score,
            format_scaled(self.hard),
            format_scaled(self.soft)
        )
    }
}

impl fmt::Display for HardSoftDecimalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}hard/{}soft",
            util::init_prefix(self.init_score),
            format_scaled(self.hard),
            format_scaled(self.soft)
        )
    }
}

impl ParseableScore for HardSoftDecimalScore {
    fn parse(s: &str) -> Result<Self, ScoreError> {
        const NAME: &str = "HardSoftDecimalScore";
        let s = s.trim();

        // Format: "0.000hard/-100.500soft" or "-2init/-1hard/0soft"
        let (init_token, tokens) =
            util::parse_score_tokens(NAME, s, &[util::HARD_LABEL, util::SOFT_LABEL])?;
        let init_score = util::parse_init_score(NAME, s, init_token)?;
        let [hard, soft] = tokens[..] else {
            return Err(ScoreError::parse(s, NAME, "wrong number of levels"));
        };

        Ok(HardSoftDecimalScore::of_uninitialized(
            init_score,
            parse_scaled(s, hard)?,
            parse_scaled(s, soft)?,
        ))
    }
}
