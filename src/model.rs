//! Domain entities produced by the normalizer.
//!
//! All values are immutable once built; optional facts are `Option`, never sentinels.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One side of a fixture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TeamInfo {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub score: u32,
}

/// Header facts for a single match. Home and away are always both present.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchMetadata {
    pub match_id: String,
    pub competition: String,
    pub round: Option<String>,
    pub venue: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub status: String,
    pub home: TeamInfo,
    pub away: TeamInfo,
}

/// A head-to-head statistic with one value per side, kept as display text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchStat {
    pub title: String,
    pub home_value: String,
    pub away_value: String,
    pub is_percentage: bool,
}

/// A single shot in pitch-space (`x`, `y` in `[0, 100]`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShotEvent {
    pub team_id: i64,
    pub x: f64,
    pub y: f64,
    pub is_goal: bool,
    /// `None` when the feed does not say.
    pub is_on_target: Option<bool>,
    pub expected_goals: Option<f64>,
    pub player_name: Option<String>,
}

/// Everything the composer needs for one graphic.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchReport {
    pub metadata: MatchMetadata,
    pub stats: Vec<MatchStat>,
    pub shots: Vec<ShotEvent>,
}

impl MatchReport {
    /// Shots taken by `team_id`, in feed order.
    pub fn shots_for(&self, team_id: i64) -> impl Iterator<Item = &ShotEvent> {
        self.shots.iter().filter(move |s| s.team_id == team_id)
    }
}
