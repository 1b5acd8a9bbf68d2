//! Total coercions over loosely-typed JSON.
//!
//! Every function here accepts any [`Value`] and returns `None` (or a documented default)
//! instead of failing. The normalizer builds all of its fallback rules out of these.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Walk `path` from `value`. Missing keys, non-objects and out-of-range indices yield `Null`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> &'a Value {
    let mut cur = value;
    for key in path {
        cur = match cur {
            Value::Object(map) => map.get(*key).unwrap_or(&NULL),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .unwrap_or(&NULL),
            _ => &NULL,
        };
    }
    cur
}

/// Trimmed, non-empty text.
///
/// Numbers render as their JSON text, objects resolve through a `name` key. Booleans,
/// arrays and null are `None`.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("name").and_then(text),
        _ => None,
    }
}

/// First candidate that coerces to non-empty [`text`].
pub fn first_text<'a>(candidates: impl IntoIterator<Item = &'a Value>) -> Option<String> {
    candidates.into_iter().find_map(text)
}

/// Integer from a JSON integer, an integral float, or an integer string.
pub fn int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Finite float from a JSON number or a numeric string. Empty strings are `None`.
pub fn float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

/// Boolean from a JSON bool or a `"true"`/`"false"` string.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Non-negative count from a JSON number (integers, or integral floats).
pub fn count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(_) => int(value).and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

/// First whitespace-delimited token parsed as a non-negative integer.
///
/// `"2 (agg)"` gives `Some(2)`; `"abc"` and `""` give `None`.
pub fn leading_int(s: &str) -> Option<u32> {
    s.split_whitespace().next()?.parse::<u32>().ok()
}

/// ISO-8601 timestamp converted to UTC.
///
/// A trailing `Z` means UTC, explicit offsets are converted, and timestamps without any
/// offset are taken as UTC. A bare date is midnight UTC.
pub fn utc_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/coerce.rs"]
mod tests;
