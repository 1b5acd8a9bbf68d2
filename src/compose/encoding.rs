use crate::{
    compose::{
        geometry::{DPI, PanelSide, PitchFrame},
        palette::Palette,
    },
    foundation::core::{Point, Rgba8},
    model::ShotEvent,
};

pub const MARKER_SIZE_MIN: f64 = 30.0;
pub const MARKER_SIZE_MAX: f64 = 180.0;
const MARKER_SIZE_PER_XG: f64 = 400.0;

/// Shot result as far as the marker colour is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    Goal,
    OnTarget,
    OffTarget,
}

impl ShotOutcome {
    /// Goal beats on-target; an unknown on-target flag counts as off target.
    pub fn of(shot: &ShotEvent) -> Self {
        if shot.is_goal {
            ShotOutcome::Goal
        } else if shot.is_on_target == Some(true) {
            ShotOutcome::OnTarget
        } else {
            ShotOutcome::OffTarget
        }
    }

    pub fn color(self, palette: &Palette) -> Rgba8 {
        match self {
            ShotOutcome::Goal => palette.goal,
            ShotOutcome::OnTarget => palette.on_target,
            ShotOutcome::OffTarget => palette.off_target,
        }
    }
}

/// Marker area in points², `clamp(xg * 400, 30, 180)`; unknown xG takes the minimum.
pub fn marker_size(expected_goals: Option<f64>) -> f64 {
    match expected_goals {
        Some(xg) if xg.is_finite() => {
            (xg * MARKER_SIZE_PER_XG).clamp(MARKER_SIZE_MIN, MARKER_SIZE_MAX)
        }
        _ => MARKER_SIZE_MIN,
    }
}

/// Screen radius for a marker of `size` points², at [`DPI`].
pub fn marker_radius_px(size: f64) -> f64 {
    size.sqrt() / 2.0 * DPI / 72.0
}

/// A shot with its final placement and encodings.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedShot {
    pub center: Point,
    pub size: f64,
    pub radius_px: f64,
    pub outcome: ShotOutcome,
    pub color: Rgba8,
}

/// Place `shots` on one panel, mirroring x on the away side.
pub fn place_shots<'a>(
    shots: impl IntoIterator<Item = &'a ShotEvent>,
    side: PanelSide,
    palette: &Palette,
) -> Vec<PlacedShot> {
    let frame = PitchFrame::for_side(side);
    shots
        .into_iter()
        .map(|shot| {
            let size = marker_size(shot.expected_goals);
            let outcome = ShotOutcome::of(shot);
            PlacedShot {
                center: frame.place(side.mirror_x(shot.x), shot.y),
                size,
                radius_px: marker_radius_px(size),
                outcome,
                color: outcome.color(palette),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/encoding.rs"]
mod tests;
