use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    foundation::{
        coerce::text,
        error::{PitchcardError, PitchcardResult},
    },
    render::ensure_parent_dir,
};

/// Match ids that have already been published, persisted as a JSON array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostedLedger {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl PostedLedger {
    /// An empty ledger that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: BTreeSet::new(),
        }
    }

    /// Load the ledger at `path`. A missing file is an empty ledger.
    ///
    /// A file that is not a JSON array is an error rather than an empty ledger, so a damaged
    /// ledger never leads to matches being posted twice.
    pub fn load(path: impl Into<PathBuf>) -> PitchcardResult<Self> {
        let path = path.into();
        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no posted-match ledger yet");
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(PitchcardError::io(&path, e)),
        };

        let entries: Vec<Value> = serde_json::from_slice(&raw).map_err(|e| {
            PitchcardError::publish(format!("ledger '{}' is not a JSON array: {e}", path.display()))
        })?;
        let ids: BTreeSet<String> = entries.iter().filter_map(text).collect();
        tracing::info!(posted = ids.len(), "loaded posted-match ledger");
        Ok(Self { path, ids })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.ids.contains(match_id.trim())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add `match_id` and persist the ledger. Returns `false` when it was already recorded.
    pub fn record(&mut self, match_id: &str) -> PitchcardResult<bool> {
        if !self.ids.insert(match_id.trim().to_string()) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Write the ledger through a sibling temp file, then swap it into place.
    pub fn save(&self) -> PitchcardResult<()> {
        ensure_parent_dir(&self.path)?;
        let json = serde_json::to_vec_pretty(&self.ids)
            .map_err(|e| PitchcardError::publish(format!("serialize ledger: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| PitchcardError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| PitchcardError::io(&self.path, e))?;
        tracing::debug!(posted = self.ids.len(), "saved posted-match ledger");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/publish/ledger.rs"]
mod tests;
