//! Raw payload sources.
//!
//! A source only retrieves the loose JSON document for a match; normalizing it is someone
//! else's job.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::foundation::error::{PitchcardError, PitchcardResult};

#[cfg(feature = "http")]
mod fotmob;
pub mod league;

#[cfg(feature = "http")]
pub use fotmob::FotmobSource;
pub use league::{LeagueMatch, finished_matches, parse_league_matches};

/// Supplies the raw payload for a match identifier.
pub trait MatchSource {
    fn fetch(&self, match_id: &str) -> PitchcardResult<Value>;
}

/// A source that can also list a league's fixtures.
pub trait LeagueSource: MatchSource {
    fn league_matches(&self, league_id: u32) -> PitchcardResult<Vec<LeagueMatch>>;

    /// Finished fixtures of `league_id`, in listing order.
    fn completed_matches(&self, league_id: u32) -> PitchcardResult<Vec<LeagueMatch>> {
        let matches = self.league_matches(league_id)?;
        let total = matches.len();
        let finished = finished_matches(matches);
        tracing::debug!(league_id, total, finished = finished.len(), "listed league fixtures");
        Ok(finished)
    }
}

/// Reads payloads from disk, either `<dir>/<match_id>.json` or one fixed file.
#[derive(Clone, Debug)]
pub enum FileSource {
    Dir(PathBuf),
    File(PathBuf),
}

impl FileSource {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::Dir(dir.into())
    }

    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Path the payload for `match_id` is read from.
    pub fn path_for(&self, match_id: &str) -> PitchcardResult<PathBuf> {
        match self {
            Self::File(path) => Ok(path.clone()),
            Self::Dir(dir) => {
                let id = validate_match_id(match_id)?;
                Ok(dir.join(format!("{id}.json")))
            }
        }
    }
}

impl MatchSource for FileSource {
    #[tracing::instrument(skip(self))]
    fn fetch(&self, match_id: &str) -> PitchcardResult<Value> {
        let path = self.path_for(match_id)?;
        read_payload(&path)
    }
}

impl LeagueSource for FileSource {
    /// Reads `<dir>/league_<id>.json`; a single-file source has no listing.
    #[tracing::instrument(skip(self))]
    fn league_matches(&self, league_id: u32) -> PitchcardResult<Vec<LeagueMatch>> {
        match self {
            Self::Dir(dir) => {
                let raw = read_payload(&dir.join(format!("league_{league_id}.json")))?;
                Ok(parse_league_matches(&raw))
            }
            Self::File(path) => Err(PitchcardError::source(format!(
                "'{}' is a single match payload, not a league listing",
                path.display()
            ))),
        }
    }
}

fn read_payload(path: &Path) -> PitchcardResult<Value> {
    let bytes = std::fs::read(path)
        .map_err(|e| PitchcardError::source(format!("read '{}': {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| PitchcardError::source(format!("parse '{}': {e}", path.display())))
}

/// Match ids are opaque but must be a single non-empty token of ASCII letters, digits,
/// `-` or `_`.
pub fn validate_match_id(match_id: &str) -> PitchcardResult<&str> {
    let id = match_id.trim();
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(id)
    } else {
        Err(PitchcardError::source(format!("invalid match id '{match_id}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/mod.rs"]
mod tests;
