//! Standard pitch markings in pitch-space.
//!
//! Dimensions come from a 105m x 68m pitch and are converted into the 100x100 logical
//! space, so circles become ellipses there and turn round again once the panel's 105:68
//! aspect is applied.

use kurbo::{Arc, BezPath, Ellipse, Line, Shape, Stroke, StrokeOpts};

use crate::compose::geometry::PitchFrame;

const LENGTH_M: f64 = 105.0;
const WIDTH_M: f64 = 68.0;

const PENALTY_AREA_DEPTH_M: f64 = 16.5;
const PENALTY_AREA_WIDTH_M: f64 = 40.32;
const SIX_YARD_DEPTH_M: f64 = 5.5;
const SIX_YARD_WIDTH_M: f64 = 18.32;
const PENALTY_SPOT_M: f64 = 11.0;
const CIRCLE_RADIUS_M: f64 = 9.15;

/// Radius of the centre and penalty spots, in canvas pixels.
pub const SPOT_RADIUS_PX: f64 = 2.5;
pub const LINE_WIDTH_PX: f64 = 2.0;

const TOLERANCE: f64 = 0.1;

fn sx(m: f64) -> f64 {
    m * 100.0 / LENGTH_M
}

fn sy(m: f64) -> f64 {
    m * 100.0 / WIDTH_M
}

/// Line work (boundary, halfway line, boxes, centre circle, arcs) as outline paths in
/// pitch-space, not yet stroked.
pub fn marking_outlines() -> Vec<BezPath> {
    let mut out = vec![
        kurbo::Rect::new(0.0, 0.0, 100.0, 100.0).to_path(TOLERANCE),
        Line::new((50.0, 0.0), (50.0, 100.0)).to_path(TOLERANCE),
        Ellipse::new(
            (50.0, 50.0),
            (sx(CIRCLE_RADIUS_M), sy(CIRCLE_RADIUS_M)),
            0.0,
        )
        .to_path(TOLERANCE),
    ];

    for (goal_x, inward) in [(0.0, 1.0), (100.0, -1.0)] {
        out.push(goal_box(goal_x, inward, PENALTY_AREA_DEPTH_M, PENALTY_AREA_WIDTH_M));
        out.push(goal_box(goal_x, inward, SIX_YARD_DEPTH_M, SIX_YARD_WIDTH_M));
        out.push(penalty_arc(goal_x, inward));
    }
    out
}

/// Centre spot and both penalty spots in pitch-space.
pub fn spot_centres() -> [kurbo::Point; 3] {
    [
        kurbo::Point::new(50.0, 50.0),
        kurbo::Point::new(sx(PENALTY_SPOT_M), 50.0),
        kurbo::Point::new(100.0 - sx(PENALTY_SPOT_M), 50.0),
    ]
}

/// All markings for one panel as filled canvas-space paths.
pub fn marking_fills(frame: PitchFrame) -> Vec<BezPath> {
    let to_screen = frame.to_screen();
    let stroke = Stroke::new(LINE_WIDTH_PX);
    let opts = StrokeOpts::default();

    let mut out: Vec<BezPath> = marking_outlines()
        .into_iter()
        .map(|outline| kurbo::stroke(to_screen * outline, &stroke, &opts, TOLERANCE))
        .collect();
    out.extend(spot_centres().into_iter().map(|c| {
        kurbo::Circle::new(to_screen * c, SPOT_RADIUS_PX).to_path(TOLERANCE)
    }));
    out
}

/// Three-sided box open towards the goal line at `goal_x`.
fn goal_box(goal_x: f64, inward: f64, depth_m: f64, width_m: f64) -> BezPath {
    let half = sy(width_m) / 2.0;
    let inner_x = goal_x + inward * sx(depth_m);
    let mut p = BezPath::new();
    p.move_to((goal_x, 50.0 - half));
    p.line_to((inner_x, 50.0 - half));
    p.line_to((inner_x, 50.0 + half));
    p.line_to((goal_x, 50.0 + half));
    p
}

/// The part of the penalty-spot circle that lies outside the penalty area.
fn penalty_arc(goal_x: f64, inward: f64) -> BezPath {
    let spot_x = goal_x + inward * sx(PENALTY_SPOT_M);
    let half_sweep = ((PENALTY_AREA_DEPTH_M - PENALTY_SPOT_M) / CIRCLE_RADIUS_M).acos();
    let facing = if inward > 0.0 { 0.0 } else { std::f64::consts::PI };
    Arc {
        center: kurbo::Point::new(spot_x, 50.0),
        radii: kurbo::Vec2::new(sx(CIRCLE_RADIUS_M), sy(CIRCLE_RADIUS_M)),
        start_angle: facing - half_sweep,
        sweep_angle: 2.0 * half_sweep,
        x_rotation: 0.0,
    }
    .to_path(TOLERANCE)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pitch.rs"]
mod tests;
