use serde_json::Value;

use crate::{
    foundation::coerce::{flag, float, int, lookup, text},
    model::ShotEvent,
};

/// Extract shots, dropping only the entries that cannot be placed.
///
/// An entry needs an integer `teamId` and numeric `x`/`y`; anything else about it is
/// optional. Malformed entries never affect their neighbours.
pub fn parse_shots(raw: &Value) -> Vec<ShotEvent> {
    let shotmap = lookup(raw, &["content", "shotmap"]);
    let list: &[Value] = match lookup(shotmap, &["shots"]) {
        Value::Array(items) => items.as_slice(),
        _ => shotmap.as_array().map(Vec::as_slice).unwrap_or(&[]),
    };

    list.iter().filter_map(parse_shot).collect()
}

fn parse_shot(entry: &Value) -> Option<ShotEvent> {
    let team_id = int(lookup(entry, &["teamId"]))?;
    let x = float(lookup(entry, &["x"]))?.clamp(0.0, 100.0);
    let y = float(lookup(entry, &["y"]))?.clamp(0.0, 100.0);

    let is_goal = flag(lookup(entry, &["isGoal"])) == Some(true)
        || text(lookup(entry, &["eventType"])).is_some_and(|t| t.eq_ignore_ascii_case("goal"));

    Some(ShotEvent {
        team_id,
        x,
        y,
        is_goal,
        is_on_target: flag(lookup(entry, &["isOnTarget"])),
        expected_goals: float(lookup(entry, &["expectedGoals"])),
        player_name: text(lookup(entry, &["playerName"])),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/shots.rs"]
mod tests;
