use serde_json::Value;

use crate::foundation::coerce::{flag, lookup, text};

/// One fixture from a league's match listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeagueMatch {
    pub id: String,
    pub home: String,
    pub away: String,
    pub finished: bool,
}

/// Fixtures from a league listing, under `matches` or `matches.allMatches`.
///
/// Entries without an id are dropped; a missing `status.finished` reads as not finished.
pub fn parse_league_matches(raw: &Value) -> Vec<LeagueMatch> {
    let entries = [
        lookup(raw, &["matches"]),
        lookup(raw, &["matches", "allMatches"]),
        lookup(raw, &["fixtures", "allMatches"]),
    ]
    .into_iter()
    .find_map(Value::as_array);
    let Some(entries) = entries else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = text(lookup(entry, &["id"]))?;
            Some(LeagueMatch {
                id,
                home: text(lookup(entry, &["home", "name"])).unwrap_or_default(),
                away: text(lookup(entry, &["away", "name"])).unwrap_or_default(),
                finished: flag(lookup(entry, &["status", "finished"])) == Some(true),
            })
        })
        .collect()
}

/// Keep only finished fixtures, in listing order.
pub fn finished_matches(matches: Vec<LeagueMatch>) -> Vec<LeagueMatch> {
    matches.into_iter().filter(|m| m.finished).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/source/league.rs"]
mod tests;
