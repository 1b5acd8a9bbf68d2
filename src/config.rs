//! Environment-driven settings for the external collaborators.

use std::path::PathBuf;
use std::time::Duration;

use crate::{foundation::error::PitchcardResult, source::validate_match_id};

pub const DEFAULT_SOURCE_BASE_URL: &str = "https://www.fotmob.com/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LEDGER_PATH: &str = "posted_matches.json";

pub const ENV_SOURCE_BASE_URL: &str = "PITCHCARD_SOURCE_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "PITCHCARD_HTTP_TIMEOUT_SECS";
pub const ENV_WEBHOOK_URL: &str = "PITCHCARD_WEBHOOK_URL";
pub const ENV_WEBHOOK_TOKEN: &str = "PITCHCARD_WEBHOOK_TOKEN";
pub const ENV_LEAGUE_ID: &str = "PITCHCARD_LEAGUE_ID";
pub const ENV_LEDGER_PATH: &str = "PITCHCARD_LEDGER_PATH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base of the match-details API, without a trailing slash.
    pub source_base_url: String,
    /// Applies to every HTTP request made by a source or publisher.
    pub http_timeout: Duration,
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
    /// League polled when the CLI runs in league mode without an explicit id.
    pub league_id: Option<u32>,
    /// Where already-published match ids are remembered.
    pub ledger_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            webhook_url: None,
            webhook_token: None,
            league_id: None,
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
        }
    }
}

impl Settings {
    /// Read settings from the process environment; unset or invalid values take defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let source_base_url = non_empty(ENV_SOURCE_BASE_URL)
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SOURCE_BASE_URL.to_string());
        let timeout_secs = non_empty(ENV_HTTP_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            source_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
            webhook_url: non_empty(ENV_WEBHOOK_URL),
            webhook_token: non_empty(ENV_WEBHOOK_TOKEN),
            league_id: non_empty(ENV_LEAGUE_ID).and_then(|v| v.parse::<u32>().ok()),
            ledger_path: non_empty(ENV_LEDGER_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH)),
        }
    }
}

/// `match_<id>.png`, relative to the current directory.
///
/// The id must pass [`validate_match_id`], so the name never leaves the directory.
pub fn default_output_path(match_id: &str) -> PitchcardResult<PathBuf> {
    let id = validate_match_id(match_id)?;
    Ok(PathBuf::from(format!("match_{id}.png")))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
