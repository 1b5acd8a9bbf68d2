use serde_json::Value;

use crate::{
    foundation::coerce::{count, first_text, flag, int, leading_int, lookup, text, utc_timestamp},
    foundation::error::{PitchcardError, PitchcardResult},
    model::{MatchMetadata, TeamInfo},
};

/// Extract header facts and both teams.
///
/// Fails with [`PitchcardError::Schema`] unless `header.teams` lists exactly two teams. Every
/// other field falls back to a default instead of failing.
pub fn parse_metadata(raw: &Value) -> PitchcardResult<MatchMetadata> {
    let teams: &[Value] = match lookup(raw, &["header", "teams"]) {
        Value::Array(items) => items.as_slice(),
        _ => &[],
    };
    let [first, last] = teams else {
        return Err(PitchcardError::schema(format!(
            "expected exactly 2 teams in header.teams, found {}",
            teams.len()
        )));
    };

    let (home_raw, away_raw) = resolve_sides(first, last);

    let general = lookup(raw, &["general"]);
    let header = lookup(raw, &["header"]);
    let status = lookup(header, &["status"]);

    let match_id = first_text([
        lookup(general, &["matchId"]),
        lookup(header, &["matchId"]),
        lookup(raw, &["matchId"]),
    ])
    .unwrap_or_default();
    let competition = first_text([
        lookup(general, &["leagueName"]),
        lookup(header, &["leagueName"]),
    ])
    .unwrap_or_default();
    let round = first_text([
        lookup(general, &["matchRound"]),
        lookup(general, &["cupRound"]),
        lookup(header, &["matchRound"]),
        lookup(header, &["cupRound"]),
    ]);
    let venue = first_text([
        lookup(general, &["venue"]),
        lookup(header, &["stadium"]),
        lookup(raw, &["content", "matchFacts", "infoBox", "Stadium"]),
    ]);
    let start_time = first_text([
        lookup(general, &["matchTimeUTCDate"]),
        lookup(header, &["startTimeUTC"]),
        lookup(status, &["utcTime"]),
    ])
    .and_then(|s| utc_timestamp(&s));
    let status_text = first_text([
        lookup(status, &["text"]),
        lookup(status, &["statusText"]),
        lookup(header, &["statusText"]),
        lookup(status, &["reason", "long"]),
    ])
    .unwrap_or_default();

    Ok(MatchMetadata {
        match_id,
        competition,
        round,
        venue,
        start_time,
        status: status_text,
        home: parse_team(home_raw),
        away: parse_team(away_raw),
    })
}

/// Home is the first team flagged `isHome` (or `isHomeTeam`), else the first listed. Away is the other team
/// when exactly one is flagged, else the last listed.
fn resolve_sides<'a>(first: &'a Value, last: &'a Value) -> (&'a Value, &'a Value) {
    let is_home = |t: &Value| {
        [lookup(t, &["isHome"]), lookup(t, &["isHomeTeam"])]
            .into_iter()
            .any(|v| flag(v) == Some(true))
    };
    match (is_home(first), is_home(last)) {
        (false, true) => (last, first),
        _ => (first, last),
    }
}

fn parse_team(raw: &Value) -> TeamInfo {
    let name = first_text([lookup(raw, &["name"])]).unwrap_or_default();
    let short_name = first_text([lookup(raw, &["shortName"])]).unwrap_or_else(|| name.clone());
    TeamInfo {
        id: int(lookup(raw, &["id"]))
            .or_else(|| int(lookup(raw, &["teamId"])))
            .unwrap_or(0),
        name,
        short_name,
        score: resolve_score(raw),
    }
}

/// Explicit numeric `score`, else the leading integer of `scoreStr`, else 0.
fn resolve_score(raw: &Value) -> u32 {
    count(lookup(raw, &["score"]))
        .or_else(|| text(lookup(raw, &["scoreStr"])).and_then(|s| leading_int(&s)))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/metadata.rs"]
mod tests;
