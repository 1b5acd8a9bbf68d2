use kurbo::{Circle, Shape};

use crate::{
    compose::{
        encoding::{MARKER_SIZE_MAX, MARKER_SIZE_MIN, ShotOutcome, marker_radius_px, place_shots},
        geometry::{
            CANVAS, LEGEND_COLUMN, PANEL_LABEL_Y, PanelSide, PitchFrame, SCOREBOARD_BAND,
            STATS_BAND, STATS_COLUMN, STATS_ROW_PAD, distribute_rows,
        },
        palette::Palette,
        pitch::marking_fills,
        plan::{DrawOp, FontWeight, RenderPlan, TextAnchor},
    },
    foundation::core::{BezPath, Point, Rect, Rgba8},
    model::{MatchMetadata, MatchReport, MatchStat, ShotEvent, TeamInfo},
};

pub const NO_STATS_TEXT: &str = "No stats available";
pub const NO_SHOTS_TEXT: &str = "No shots";

const Z_BAND: i32 = 0;
const Z_PITCH: i32 = 10;
const Z_MARKINGS: i32 = 20;
const Z_MARKERS: i32 = 30;
const Z_TEXT: i32 = 100;

const TOLERANCE: f64 = 0.1;
const ACCENT_STRIP_PX: f64 = 10.0;
const GOAL_RING_PX: f64 = 2.0;
const STAT_BAR_INSET: f64 = 140.0;
const STAT_BAR_OFFSET_Y: f64 = 13.0;
const STAT_BAR_HEIGHT: f64 = 5.0;

/// Lay out the whole graphic.
///
/// Pure: the same report and palette always produce an equal plan.
#[tracing::instrument(skip_all, fields(match_id = %report.metadata.match_id))]
pub fn compose_match_graphic(report: &MatchReport, palette: &Palette) -> RenderPlan {
    let mut painter = Painter::new(palette);

    scoreboard(&mut painter, &report.metadata);
    stats_band(&mut painter, &report.stats);

    let meta = &report.metadata;
    // Two teams sharing an id leave no way to tell whose shot is whose.
    let ambiguous = meta.home.id == meta.away.id;
    let (home_shots, away_shots): (Vec<&ShotEvent>, Vec<&ShotEvent>) = if ambiguous {
        (Vec::new(), Vec::new())
    } else {
        (
            report.shots_for(meta.home.id).collect(),
            report.shots_for(meta.away.id).collect(),
        )
    };
    shot_panel(&mut painter, &meta.home, home_shots, PanelSide::Home, palette.home);
    shot_panel(&mut painter, &meta.away, away_shots, PanelSide::Away, palette.away);
    legend(&mut painter);

    let skipped = report
        .shots
        .iter()
        .filter(|s| ambiguous || (s.team_id != meta.home.id && s.team_id != meta.away.id))
        .count();
    if skipped > 0 {
        tracing::debug!(skipped, ambiguous, "shots without a resolvable team were not placed");
    }

    RenderPlan {
        canvas: CANVAS,
        background: palette.background,
        ops: painter.ops,
    }
}

struct Painter<'a> {
    palette: &'a Palette,
    ops: Vec<DrawOp>,
}

impl<'a> Painter<'a> {
    fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            ops: Vec::new(),
        }
    }

    fn fill(&mut self, path: BezPath, color: Rgba8, z: i32) {
        self.ops.push(DrawOp::FillPath { path, color, z });
    }

    fn rect(&mut self, rect: Rect, color: Rgba8, z: i32) {
        self.fill(rect.to_path(TOLERANCE), color, z);
    }

    fn circle(&mut self, center: Point, radius: f64, color: Rgba8, z: i32) {
        self.fill(Circle::new(center, radius).to_path(TOLERANCE), color, z);
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        text: impl Into<String>,
        origin: impl Into<Point>,
        size_px: f64,
        anchor: TextAnchor,
        weight: FontWeight,
        color: Rgba8,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            origin: origin.into(),
            size_px,
            anchor,
            weight,
            color,
            z: Z_TEXT,
        });
    }
}

fn scoreboard(p: &mut Painter<'_>, meta: &MatchMetadata) {
    let band = SCOREBOARD_BAND;
    let (text, muted) = (p.palette.text, p.palette.muted_text);
    let cx = band.center().x;

    p.rect(band, p.palette.band, Z_BAND);
    p.rect(
        Rect::new(band.x0, band.y0, band.x0 + ACCENT_STRIP_PX, band.y1),
        p.palette.home,
        Z_BAND,
    );
    p.rect(
        Rect::new(band.x1 - ACCENT_STRIP_PX, band.y0, band.x1, band.y1),
        p.palette.away,
        Z_BAND,
    );

    let heading = join_present([Some(meta.competition.as_str()), meta.round.as_deref()]);
    if !heading.is_empty() {
        p.text(heading, (cx, 32.0), 20.0, TextAnchor::Middle, FontWeight::Regular, muted);
    }

    p.text(&meta.home.name, (cx - 140.0, 100.0), 40.0, TextAnchor::End, FontWeight::Bold, text);
    p.text(
        format!("{} - {}", meta.home.score, meta.away.score),
        (cx, 100.0),
        64.0,
        TextAnchor::Middle,
        FontWeight::Bold,
        text,
    );
    p.text(&meta.away.name, (cx + 140.0, 100.0), 40.0, TextAnchor::Start, FontWeight::Bold, text);

    if !meta.status.is_empty() {
        p.text(&meta.status, (cx, 150.0), 20.0, TextAnchor::Middle, FontWeight::Regular, muted);
    }

    let kickoff = meta
        .start_time
        .map(|t| t.format("%d %b %Y %H:%M UTC").to_string());
    let details = join_present([meta.venue.as_deref(), kickoff.as_deref()]);
    if !details.is_empty() {
        p.text(details, (cx, 176.0), 16.0, TextAnchor::Middle, FontWeight::Regular, muted);
    }
}

fn stats_band(p: &mut Painter<'_>, stats: &[MatchStat]) {
    let column = STATS_COLUMN;
    let cx = column.center().x;

    if stats.is_empty() {
        p.text(
            NO_STATS_TEXT,
            STATS_BAND.center(),
            22.0,
            TextAnchor::Middle,
            FontWeight::Regular,
            p.palette.muted_text,
        );
        return;
    }

    let rows = distribute_rows(stats.len(), STATS_BAND, STATS_ROW_PAD);
    for (stat, y) in stats.iter().zip(rows) {
        let text = p.palette.text;
        p.text(&stat.home_value, (column.x0, y), 18.0, TextAnchor::Start, FontWeight::Bold, text);
        p.text(&stat.title, (cx, y), 16.0, TextAnchor::Middle, FontWeight::Regular, text);
        p.text(&stat.away_value, (column.x1, y), 18.0, TextAnchor::End, FontWeight::Bold, text);

        if let Some(share) = home_share(stat) {
            let bar = Rect::new(
                column.x0 + STAT_BAR_INSET,
                y + STAT_BAR_OFFSET_Y,
                column.x1 - STAT_BAR_INSET,
                y + STAT_BAR_OFFSET_Y + STAT_BAR_HEIGHT,
            );
            let split = bar.x0 + bar.width() * share;
            p.rect(bar, p.palette.bar_track, Z_BAND);
            p.rect(Rect::new(bar.x0, bar.y0, split, bar.y1), p.palette.home, Z_BAND);
            p.rect(Rect::new(split, bar.y0, bar.x1, bar.y1), p.palette.away, Z_BAND);
        }
    }
}

/// Home fraction of the combined value, when both sides read as non-negative numbers.
fn home_share(stat: &MatchStat) -> Option<f64> {
    let home = stat_number(&stat.home_value)?;
    let away = stat_number(&stat.away_value)?;
    let total = home + away;
    (home >= 0.0 && away >= 0.0 && total > 0.0).then(|| home / total)
}

/// Leading numeric token of a stat value, ignoring a trailing `%`: `"58%"` and
/// `"14 (6)"` read as 58 and 14.
pub(crate) fn stat_number(value: &str) -> Option<f64> {
    let token = value.split_whitespace().next()?.trim_end_matches('%');
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn shot_panel(
    p: &mut Painter<'_>,
    team: &TeamInfo,
    shots: Vec<&ShotEvent>,
    side: PanelSide,
    accent: Rgba8,
) {
    let frame = PitchFrame::for_side(side);
    let rect = frame.rect;

    let total_xg: Option<f64> = shots
        .iter()
        .filter_map(|s| s.expected_goals)
        .fold(None, |acc, xg| Some(acc.unwrap_or(0.0) + xg));
    let shot_count = match shots.len() {
        1 => "1 shot".to_string(),
        n => format!("{n} shots"),
    };
    let xg_label = total_xg.map(|xg| format!("{xg:.2} xG"));
    let label = join_present([
        Some(team.short_name.as_str()),
        Some(shot_count.as_str()),
        xg_label.as_deref(),
    ]);
    p.text(
        label,
        (rect.center().x, PANEL_LABEL_Y),
        18.0,
        TextAnchor::Middle,
        FontWeight::Bold,
        accent,
    );

    p.rect(rect, p.palette.pitch_surface, Z_PITCH);
    for marking in marking_fills(frame) {
        p.fill(marking, p.palette.pitch_line, Z_MARKINGS);
    }

    if shots.is_empty() {
        p.text(
            NO_SHOTS_TEXT,
            rect.center(),
            22.0,
            TextAnchor::Middle,
            FontWeight::Regular,
            p.palette.muted_text,
        );
        return;
    }

    for placed in place_shots(shots, side, p.palette) {
        if placed.outcome == ShotOutcome::Goal {
            p.circle(
                placed.center,
                placed.radius_px + GOAL_RING_PX,
                p.palette.marker_outline,
                Z_MARKERS,
            );
        }
        p.circle(placed.center, placed.radius_px, placed.color, Z_MARKERS);
    }
}

fn legend(p: &mut Painter<'_>) {
    let col = LEGEND_COLUMN;
    let cx = col.center().x;
    let (text, muted) = (p.palette.text, p.palette.muted_text);

    p.text("Shot map", (cx, col.y0 + 15.0), 16.0, TextAnchor::Middle, FontWeight::Bold, muted);

    let swatch_r = marker_radius_px(MARKER_SIZE_MIN + 30.0);
    let outcomes = [
        (ShotOutcome::Goal, "Goal"),
        (ShotOutcome::OnTarget, "On target"),
        (ShotOutcome::OffTarget, "Off target"),
    ];
    for (i, (outcome, label)) in outcomes.into_iter().enumerate() {
        let y = col.y0 + 50.0 + 30.0 * i as f64;
        let color = outcome.color(p.palette);
        p.circle(Point::new(cx - 65.0, y), swatch_r, color, Z_MARKERS);
        p.text(label, (cx - 45.0, y), 15.0, TextAnchor::Start, FontWeight::Regular, text);
    }

    let y = col.y0 + 170.0;
    let neutral = p.palette.muted_text;
    p.circle(Point::new(cx - 40.0, y), marker_radius_px(MARKER_SIZE_MIN), neutral, Z_MARKERS);
    p.circle(Point::new(cx + 40.0, y), marker_radius_px(MARKER_SIZE_MAX), neutral, Z_MARKERS);
    p.text("Low xG", (cx - 40.0, y + 30.0), 13.0, TextAnchor::Middle, FontWeight::Regular, muted);
    p.text("High xG", (cx + 40.0, y + 30.0), 13.0, TextAnchor::Middle, FontWeight::Regular, muted);
}

fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("  ·  ")
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
