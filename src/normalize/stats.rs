use serde_json::Value;

use crate::{
    foundation::coerce::{lookup, text},
    model::MatchStat,
};

/// Number of stats kept when the caller does not ask for specific titles.
pub const DEFAULT_STAT_LIMIT: usize = 8;

/// Extract head-to-head stats.
///
/// Without `desired_titles` (or with an empty list) the first [`DEFAULT_STAT_LIMIT`] valid
/// entries are returned in feed order. With titles, matches are case-insensitive and the
/// result follows the caller's order; titles with no match are left out.
pub fn parse_stats(raw: &Value, desired_titles: Option<&[String]>) -> Vec<MatchStat> {
    let entries = stat_entries(raw);

    let desired = match desired_titles {
        Some(titles) if !titles.is_empty() => titles,
        _ => {
            return entries
                .into_iter()
                .filter_map(parse_entry)
                .take(DEFAULT_STAT_LIMIT)
                .collect();
        }
    };

    let valid: Vec<MatchStat> = entries.into_iter().filter_map(parse_entry).collect();
    let mut out = Vec::with_capacity(desired.len());
    for wanted in desired {
        let wanted = wanted.trim().to_lowercase();
        if out
            .iter()
            .any(|s: &MatchStat| s.title.to_lowercase() == wanted)
        {
            continue;
        }
        if let Some(stat) = valid.iter().find(|s| s.title.to_lowercase() == wanted) {
            out.push(stat.clone());
        }
    }
    out
}

/// Flattened entry list. Groups (entries whose `stats` hold titled objects) are expanded in
/// place.
fn stat_entries(raw: &Value) -> Vec<&Value> {
    let list = [
        lookup(raw, &["content", "stats", "Periods", "All", "stats"]),
        lookup(raw, &["content", "stats", "stats"]),
        lookup(raw, &["content", "matchFacts", "stats"]),
    ]
    .into_iter()
    .find(|v| v.is_array())
    .unwrap_or(&Value::Null);

    let mut out = Vec::new();
    if let Value::Array(items) = list {
        for item in items {
            flatten_into(item, &mut out);
        }
    }
    out
}

fn flatten_into<'a>(item: &'a Value, out: &mut Vec<&'a Value>) {
    match item.get("stats") {
        Some(Value::Array(children)) if children.iter().any(is_entry) => {
            for child in children.iter().filter(|c| is_entry(c)) {
                flatten_into(child, out);
            }
        }
        _ => out.push(item),
    }
}

fn is_entry(value: &Value) -> bool {
    value.get("title").is_some()
}

fn parse_entry(entry: &Value) -> Option<MatchStat> {
    let title = text(lookup(entry, &["title"]))?;
    let [home, away] = lookup(entry, &["stats"]).as_array()?.as_slice() else {
        return None;
    };
    let is_percentage = text(lookup(entry, &["type"]))
        .is_some_and(|t| t.eq_ignore_ascii_case("percentage"));

    Some(MatchStat {
        title,
        home_value: stat_value(home)?,
        away_value: stat_value(away)?,
        is_percentage,
    })
}

/// Display text of one side's value; `{"value": ..}` wrappers are unwrapped.
fn stat_value(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(if *b { "yes" } else { "no" }.to_string()),
        Value::Object(map) => map.get("value").and_then(stat_value),
        other => text(other),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/stats.rs"]
mod tests;
