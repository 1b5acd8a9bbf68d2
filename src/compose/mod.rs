//! Layout composer: turns a [`MatchReport`](crate::model::MatchReport) into a
//! backend-agnostic [`RenderPlan`].

pub mod encoding;
pub mod geometry;
pub mod layout;
pub mod palette;
pub mod pitch;
pub mod plan;

pub use layout::{NO_SHOTS_TEXT, NO_STATS_TEXT, compose_match_graphic};
pub use palette::Palette;
pub use plan::{DrawOp, FontWeight, RenderPlan, TextAnchor};
