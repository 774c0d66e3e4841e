//! Shared parsing, formatting and rounding helpers for score types.

use crate::error::ScoreError;

pub(crate) const INIT_LABEL: &str = "init";
pub(crate) const HARD_LABEL: &str = "hard";
pub(crate) const SOFT_LABEL: &str = "soft";

/// Level token standing for the minimum level value.
pub(crate) const WILDCARD: &str = "*";

/// Returns `"{init}init/"`, or an empty string for an init score of 0.
pub(crate) fn init_prefix(init_score: i32) -> String {
    if init_score == 0 {
        String::new()
    } else {
        format!("{}{}/", init_score, INIT_LABEL)
    }
}

/// Builds a pattern like `999hard/999soft` for error messages.
pub(crate) fn score_pattern(bendable: bool, suffixes: &[&str]) -> String {
    let level = if bendable { "[999/.../999]" } else { "999" };
    suffixes
        .iter()
        .map(|suffix| format!("{}{}", level, suffix))
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits `"[Ninit/]Xa/Yb"` into the init token and one token per suffix.
pub(crate) fn parse_score_tokens<'a>(
    score_type: &'static str,
    input: &'a str,
    suffixes: &[&str],
) -> Result<(&'a str, Vec<&'a str>), ScoreError> {
    let parts: Vec<&str> = input.split('/').collect();
    let (init_token, level_parts) = if parts.len() == suffixes.len() + 1 {
        let init_token = parts[0].strip_suffix(INIT_LABEL).ok_or_else(|| {
            ScoreError::parse(
                input,
                score_type,
                format!(
                    "doesn't follow the pattern ({}): the token ({}) does not end with ({})",
                    score_pattern(false, suffixes),
                    parts[0],
                    INIT_LABEL
                ),
            )
        })?;
        (init_token, &parts[1..])
    } else if parts.len() == suffixes.len() {
        ("0", &parts[..])
    } else {
        return Err(ScoreError::parse(
            input,
            score_type,
            format!(
                "doesn't follow the pattern ({}): expected {} or {} parts separated by '/', got {}",
                score_pattern(false, suffixes),
                suffixes.len(),
                suffixes.len() + 1,
                parts.len()
            ),
        ));
    };

    let mut tokens = Vec::with_capacity(suffixes.len());
    for (part, suffix) in level_parts.iter().zip(suffixes) {
        let token = part.strip_suffix(suffix).ok_or_else(|| {
            ScoreError::parse(
                input,
                score_type,
                format!(
                    "doesn't follow the pattern ({}): the token ({}) does not end with ({})",
                    score_pattern(false, suffixes),
                    part,
                    suffix
                ),
            )
        })?;
        tokens.push(unbracket(token));
    }
    Ok((init_token, tokens))
}

/// Strips one pair of enclosing brackets from a single-level token.
fn unbracket(token: &str) -> &str {
    token
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(token)
}

/// Renders a single level, as `[X]` when `bracketed`.
pub(crate) fn render_level(level: i64, bracketed: bool) -> String {
    if bracketed {
        format!("[{}]", level)
    } else {
        level.to_string()
    }
}

/// Splits `"[Ninit/][a/b]hard/[c/d]soft"` into the init token and the
/// hard and soft level tokens.
pub(crate) fn parse_bendable_score_tokens<'a>(
    score_type: &'static str,
    input: &'a str,
) -> Result<(&'a str, Vec<&'a str>, Vec<&'a str>), ScoreError> {
    let suffixes = [HARD_LABEL, SOFT_LABEL];
    let pattern = score_pattern(true, &suffixes);

    let (init_token, rest) = match input.find(INIT_LABEL) {
        Some(end) => {
            let rest = input[end + INIT_LABEL.len()..]
                .strip_prefix('/')
                .ok_or_else(|| {
                    ScoreError::parse(
                        input,
                        score_type,
                        format!("doesn't follow the pattern ({}): missing '/' after init", pattern),
                    )
                })?;
            (&input[..end], rest)
        }
        None => ("0", input),
    };

    let (hard_part, soft_part) = rest.split_once("hard/").ok_or_else(|| {
        ScoreError::parse(
            input,
            score_type,
            format!(
                "doesn't follow the pattern ({}): the levelSuffix (hard) isn't in ({})",
                pattern, rest
            ),
        )
    })?;
    let soft_part = soft_part.strip_suffix(SOFT_LABEL).ok_or_else(|| {
        ScoreError::parse(
            input,
            score_type,
            format!(
                "doesn't follow the pattern ({}): ({}) does not end with (soft)",
                pattern, soft_part
            ),
        )
    })?;

    let hard_tokens = bracketed_tokens(score_type, input, &pattern, hard_part)?;
    let soft_tokens = bracketed_tokens(score_type, input, &pattern, soft_part)?;
    Ok((init_token, hard_tokens, soft_tokens))
}

fn bracketed_tokens<'a>(
    score_type: &'static str,
    input: &str,
    pattern: &str,
    part: &'a str,
) -> Result<Vec<&'a str>, ScoreError> {
    let inner = part
        .strip_prefix('[')
        .and_then(|p| p.strip_suffix(']'))
        .ok_or_else(|| {
            ScoreError::parse(
                input,
                score_type,
                format!(
                    "doesn't follow the pattern ({}): ({}) does not start and end with \"[\" and \"]\"",
                    pattern, part
                ),
            )
        })?;
    if inner.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(inner.split('/').collect())
    }
}

pub(crate) fn parse_init_score(
    score_type: &'static str,
    input: &str,
    token: &str,
) -> Result<i32, ScoreError> {
    token.parse::<i32>().map_err(|e| {
        ScoreError::parse(
            input,
            score_type,
            format!("the initScore ({}) is not a valid integer: {}", token, e),
        )
    })
}

pub(crate) fn parse_level(
    score_type: &'static str,
    input: &str,
    token: &str,
) -> Result<i64, ScoreError> {
    if token == WILDCARD {
        return Ok(i64::MIN);
    }
    token.parse::<i64>().map_err(|e| {
        ScoreError::parse(
            input,
            score_type,
            format!("the level ({}) is not a valid integer: {}", token, e),
        )
    })
}

/// Joins the non-zero levels as `{value}{label}`, keeping the init prefix.
pub(crate) fn build_short_string<'a>(
    init_score: i32,
    levels: impl IntoIterator<Item = (bool, String, &'a str)>,
) -> String {
    let mut short = String::new();
    if init_score != 0 {
        short.push_str(&init_score.to_string());
        short.push_str(INIT_LABEL);
    }
    for (non_zero, rendered, label) in levels {
        if !non_zero {
            continue;
        }
        if !short.is_empty() {
            short.push('/');
        }
        short.push_str(&rendered);
        short.push_str(label);
    }
    if short.is_empty() {
        "0".to_string()
    } else {
        short
    }
}

/// Renders `[a/b/c]`.
pub(crate) fn bracketed(levels: &[i64]) -> String {
    let joined: Vec<String> = levels.iter().map(|l| l.to_string()).collect();
    format!("[{}]", joined.join("/"))
}

#[inline]
pub(crate) fn floor_level(value: f64) -> i64 {
    value.floor() as i64
}

#[inline]
pub(crate) fn floor_init(value: f64) -> i32 {
    value.floor() as i32
}

/// Integer division rounding toward negative infinity.
///
/// `i64::MIN / -1` wraps to `i64::MIN`.
#[inline]
pub(crate) fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend.wrapping_div(divisor);
    if dividend.wrapping_rem(divisor) != 0 && ((dividend < 0) != (divisor < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// Maps a zero divisor to 1.
#[inline]
pub(crate) fn sanitize(divisor: i64) -> i64 {
    if divisor == 0 {
        1
    } else {
        divisor
    }
}

#[inline]
pub(crate) fn narrow_init(init_score: i64) -> i32 {
    init_score.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
