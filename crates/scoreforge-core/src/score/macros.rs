//! Declarative macros for reducing score type boilerplate.
//!
//! These macros generate the repetitive trait implementations that all
//! field-based score types share: ordering, arithmetic ops,
//! multiply/divide/power, and slash-separated parsing.
//!
//! Every field-based score type stores `init_score: i32` followed by its
//! `i64` level fields, and has an `of_uninitialized(init_score, levels..)`
//! constructor taking them in that order.

/// Generates `Ord`, `PartialOrd`, `Add`, `Sub`, and `Neg` for a field-based score type.
///
/// Ordering compares `init_score` first, then the fields in the order listed.
/// Arithmetic wraps on overflow, so the `i64::MIN` sentinel negates to itself.
///
/// # Usage
/// ```ignore
/// impl_score_ops!(HardSoftScore { hard, soft });
/// ```
macro_rules! impl_score_ops {
    ($type:ident { $($field:ident),+ }) => {
        impl Ord for $type {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.init_score
                    .cmp(&other.init_score)
                    $(.then_with(|| self.$field.cmp(&other.$field)))+
            }
        }

        impl PartialOrd for $type {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl std::ops::Add for $type {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                $type::of_uninitialized(
                    self.init_score.wrapping_add(other.init_score),
                    $(self.$field.wrapping_add(other.$field)),+
                )
            }
        }

        impl std::ops::Sub for $type {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                $type::of_uninitialized(
                    self.init_score.wrapping_sub(other.init_score),
                    $(self.$field.wrapping_sub(other.$field)),+
                )
            }
        }

        impl std::ops::Neg for $type {
            type Output = Self;

            fn neg(self) -> Self {
                $type::of_uninitialized(
                    self.init_score.wrapping_neg(),
                    $(self.$field.wrapping_neg()),+
                )
            }
        }
    };
}

/// Generates the level accessors and `multiply`, `divide`, `power`, `abs`
/// for the `Score` trait impl.
///
/// Intended to be used *inside* an `impl Score for Type { ... }` block.
/// Scalar results are floored, never truncated.
///
/// # Usage
/// ```ignore
/// impl Score for HardSoftScore {
///     // ...other methods...
///     impl_score_scale!(HardSoftScore { hard, soft });
/// }
/// ```
macro_rules! impl_score_scale {
    ($type:ident { $($field:ident),+ }) => {
        #[inline]
        fn init_score(&self) -> i32 {
            self.init_score
        }

        fn with_init_score(&self, init_score: i32) -> Self {
            $type::of_uninitialized(init_score, $(self.$field),+)
        }

        fn zero(&self) -> Self {
            $type::ZERO
        }

        fn to_level_numbers(&self) -> Vec<i64> {
            vec![$(self.$field),+]
        }

        fn try_from_level_numbers(
            &self,
            init_score: i32,
            levels: &[i64],
        ) -> Result<Self, $crate::error::ScoreError> {
            match *levels {
                [$($field),+] => Ok($type::of_uninitialized(init_score, $($field),+)),
                _ => Err($crate::error::ScoreError::LevelCount {
                    expected: [$(stringify!($field)),+].len(),
                    actual: levels.len(),
                }),
            }
        }

        fn multiply(&self, multiplicand: f64) -> Self {
            $type::of_uninitialized(
                $crate::score::util::floor_init(self.init_score as f64 * multiplicand),
                $($crate::score::util::floor_level(self.$field as f64 * multiplicand)),+
            )
        }

        fn divide(&self, divisor: f64) -> Self {
            $type::of_uninitialized(
                $crate::score::util::floor_init(self.init_score as f64 / divisor),
                $($crate::score::util::floor_level(self.$field as f64 / divisor)),+
            )
        }

        fn power(&self, exponent: f64) -> Self {
            $type::of_uninitialized(
                $crate::score::util::floor_init((self.init_score as f64).powf(exponent)),
                $($crate::score::util::floor_level((self.$field as f64).powf(exponent))),+
            )
        }

        fn abs(&self) -> Self {
            $type::of_uninitialized(
                self.init_score.wrapping_abs(),
                $(self.$field.wrapping_abs()),+
            )
        }
    };
}

/// Generates `ParseableScore` impl for scores using the `"[Ninit/]Xsuffix/Ysuffix"` format.
///
/// Each field maps to a suffix label (e.g., `hard => "hard"`, `soft => "soft"`).
/// All values are parsed as `i64`, `*` standing for `i64::MIN`. The
/// `bracketed` form renders every tier as `[X]suffix`; parsing accepts
/// levels with or without brackets either way.
///
/// # Usage
/// ```ignore
/// impl_score_parse!(HardMediumSoftScore { hard => "hard", medium => "medium", soft => "soft" });
/// impl_score_parse!(bracketed HardSoftScore { hard => "hard", soft => "soft" });
/// ```
macro_rules! impl_score_parse {
    ($type:ident { $($field:ident => $suffix:literal),+ }) => {
        impl_score_parse!(@impl $type, false, { $($field => $suffix),+ });
    };
    (bracketed $type:ident { $($field:ident => $suffix:literal),+ }) => {
        impl_score_parse!(@impl $type, true, { $($field => $suffix),+ });
    };
    (@impl $type:ident, $bracketed:literal, { $($field:ident => $suffix:literal),+ }) => {
        impl $crate::score::traits::ParseableScore for $type {
            fn parse(s: &str) -> Result<Self, $crate::error::ScoreError> {
                let name = stringify!($type);
                let s = s.trim();
                let suffixes: &[&str] = &[ $($suffix),+ ];
                let (init_token, tokens) =
                    $crate::score::util::parse_score_tokens(name, s, suffixes)?;
                let init_score = $crate::score::util::parse_init_score(name, s, init_token)?;

                let [$($field),+] = tokens[..] else {
                    return Err($crate::error::ScoreError::parse(s, name, "wrong number of levels"));
                };
                $(
                    let $field = $crate::score::util::parse_level(name, s, $field)?;
                )+

                Ok($type::of_uninitialized(init_score, $($field),+))
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let levels: Vec<String> = vec![$(format!(
                    "{}{}",
                    $crate::score::util::render_level(self.$field, $bracketed),
                    $suffix
                )),+];
                write!(
                    f,
                    "{}{}",
                    $crate::score::util::init_prefix(self.init_score),
                    levels.join("/")
                )
            }
        }

        impl $type {
            fn build_short_string(&self) -> String {
                $crate::score::util::build_short_string(
                    self.init_score,
                    vec![$((self.$field != 0, self.$field.to_string(), $suffix)),+],
                )
            }
        }
    };
}

// Macros are used via #[macro_use] on the module declaration.
