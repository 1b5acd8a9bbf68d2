use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::{core::Rgba8, error::PitchcardResult};

/// Colour configuration for one graphic.
///
/// Passed by reference into the composer; nothing reads a process-wide palette. Every field
/// is optional in JSON and falls back to the house style.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: Rgba8,
    pub band: Rgba8,
    pub text: Rgba8,
    pub muted_text: Rgba8,
    pub pitch_surface: Rgba8,
    pub pitch_line: Rgba8,
    pub home: Rgba8,
    pub away: Rgba8,
    pub goal: Rgba8,
    pub on_target: Rgba8,
    pub off_target: Rgba8,
    pub marker_outline: Rgba8,
    pub bar_track: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x1e, 0x1f, 0x2a),
            band: Rgba8::rgb(0x26, 0x28, 0x36),
            text: Rgba8::rgb(0xf1, 0xf1, 0xf1),
            muted_text: Rgba8::rgb(0x9a, 0x9c, 0xab),
            pitch_surface: Rgba8::rgb(0x11, 0x14, 0x18),
            pitch_line: Rgba8::rgb(0xd4, 0xd4, 0xd4),
            home: Rgba8::rgb(0xff, 0xd7, 0x00),
            away: Rgba8::rgb(0x00, 0x57, 0xff),
            goal: Rgba8::rgb(0x2e, 0xcc, 0x71),
            on_target: Rgba8::rgb(0xf3, 0x9c, 0x12),
            off_target: Rgba8::rgb(0x7f, 0x8c, 0x8d).with_alpha(0xcc),
            marker_outline: Rgba8::rgb(0xff, 0xff, 0xff),
            bar_track: Rgba8::rgb(0x3a, 0x3d, 0x4d),
        }
    }
}

impl Palette {
    pub fn from_json_str(s: &str) -> PitchcardResult<Self> {
        Ok(serde_json::from_str(s).context("parse palette json")?)
    }

    pub fn from_path(path: &Path) -> PitchcardResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read palette '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/palette.rs"]
mod tests;
