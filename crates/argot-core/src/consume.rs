//! Conversion for parameters that claim more than one token.
//!
//! Remaining-consuming types ([`Sentence`], [`Splitter`]) take every token
//! that is left. [`Duration`] reads as many leading tokens as form a valid
//! duration expression and reports how many it used.
//!
//! [`Sentence`]: crate::ParameterType::Sentence
//! [`Splitter`]: crate::ParameterType::Splitter
//! [`Duration`]: crate::ParameterType::Duration

use std::time::Duration;

/// Joins tokens with single spaces.
pub fn sentence(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Joins tokens like [`sentence`], then splits on `separator`.
///
/// Parts are trimmed. Input without the separator yields a single part.
pub fn splitter(tokens: &[String], separator: char) -> Vec<String> {
    let joined = sentence(tokens);
    if !joined.contains(separator) {
        return vec![joined];
    }
    joined
        .split(separator)
        .map(|part| part.trim().to_string())
        .collect()
}

/// Reads a duration from the leading tokens.
///
/// Accepts compact elements (`1h`, `1h30m`, `1.5d`) and spaced elements
/// (`2 hours`), in any mix, and sums them. Reading stops at the first token
/// that does not continue the expression.
///
/// Returns the duration and the number of tokens consumed, or `None` if the
/// first token does not start a duration.
pub fn duration(tokens: &[String]) -> Option<(Duration, usize)> {
    let mut total = 0.0;
    let mut used = 0;

    while let Some(token) = tokens.get(used) {
        if let Some(secs) = compact_seconds(token) {
            total += secs;
            used += 1;
            continue;
        }

        let Some(amount) = parse_amount(token) else {
            break;
        };
        let Some(unit) = tokens.get(used + 1).and_then(|t| unit_seconds(t)) else {
            break;
        };
        total += amount * unit;
        used += 2;
    }

    if used == 0 {
        return None;
    }
    Duration::try_from_secs_f64(total)
        .ok()
        .map(|d| (d, used))
}

/// Seconds in one of the given unit, if it is a known unit name.
fn unit_seconds(unit: &str) -> Option<f64> {
    let secs = match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0,
        "d" | "day" | "days" => 86_400.0,
        "w" | "wk" | "wks" | "week" | "weeks" => 604_800.0,
        _ => return None,
    };
    Some(secs)
}

fn parse_amount(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parses a token made only of `<amount><unit>` pairs, such as `1h30m`.
fn compact_seconds(token: &str) -> Option<f64> {
    let mut rest = token;
    let mut total = 0.0;

    while !rest.is_empty() {
        let amount_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let amount = parse_amount(&rest[..amount_end])?;
        rest = &rest[amount_end..];

        let unit_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return None;
        }
        total += amount * unit_seconds(&rest[..unit_end])?;
        rest = &rest[unit_end..];
    }

    (!token.is_empty()).then_some(total)
}
