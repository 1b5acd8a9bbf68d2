//! pitchcard turns a loosely-structured football match payload into a single-image match
//! report: scoreboard, key stats and a pair of mirrored shot maps.
//!
//! # Pipeline overview
//!
//! 1. **Source**: `match id -> serde_json::Value` ([`MatchSource`]; local file or FotMob over HTTP)
//! 2. **Normalize**: `Value -> MatchReport` (total coercions; only a wrong team count fails)
//! 3. **Compose**: `MatchReport + Palette -> RenderPlan` (pure, fixed 1600x900 layout)
//! 4. **Render**: `RenderPlan -> PNG` (CPU backend, premultiplied RGBA8 internally)
//! 5. **Publish** (optional): post the PNG with a caption ([`Publisher`])
//!
//! Normalizing and composing never touch the outside world; identical inputs give identical
//! plans.
//!
//! [`generate_batch`] runs the same steps over a list of matches (typically a league's finished
//! fixtures from a [`LeagueSource`]), skipping ids already recorded in a [`PostedLedger`].
#![forbid(unsafe_code)]

pub mod compose;
pub mod config;
pub mod foundation;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod publish;
pub mod render;
pub mod source;

pub use compose::{DrawOp, Palette, RenderPlan, compose_match_graphic};
pub use config::{Settings, default_output_path};
pub use foundation::core::{Canvas, Rgba8};
pub use foundation::error::{PitchcardError, PitchcardResult};
pub use model::{MatchMetadata, MatchReport, MatchStat, ShotEvent, TeamInfo};
pub use normalize::{normalize_report, parse_metadata, parse_shots, parse_stats};
pub use pipeline::{
    BatchJob, BatchSummary, GeneratedGraphic, create_match_graphic, generate_batch,
    generate_from_payload, generate_from_source,
};
pub use publish::{
    PostedLedger, PublishReceipt, Publisher, compose_caption, create_publisher, publish_match,
};
pub use render::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend, render_to_path,
};
pub use source::{FileSource, LeagueMatch, LeagueSource, MatchSource};

#[cfg(feature = "cpu")]
pub use render::CpuBackend;
#[cfg(feature = "http")]
pub use publish::WebhookPublisher;
#[cfg(feature = "http")]
pub use source::FotmobSource;
