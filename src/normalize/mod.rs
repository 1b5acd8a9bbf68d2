//! Raw payload -> domain model.
//!
//! The only failure is structural (team count); every field-level anomaly is absorbed by
//! the coercions in [`crate::foundation::coerce`].

mod metadata;
mod shots;
mod stats;

pub use metadata::parse_metadata;
pub use shots::parse_shots;
pub use stats::{DEFAULT_STAT_LIMIT, parse_stats};

use serde_json::Value;

use crate::{foundation::error::PitchcardResult, model::MatchReport};

/// Run all three parsers over one payload.
#[tracing::instrument(skip(raw))]
pub fn normalize_report(
    raw: &Value,
    desired_titles: Option<&[String]>,
) -> PitchcardResult<MatchReport> {
    let metadata = parse_metadata(raw)?;
    let stats = parse_stats(raw, desired_titles);
    let shots = parse_shots(raw);

    tracing::debug!(
        match_id = %metadata.match_id,
        stats = stats.len(),
        shots = shots.len(),
        "normalized match payload"
    );

    Ok(MatchReport {
        metadata,
        stats,
        shots,
    })
}
