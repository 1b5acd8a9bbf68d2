//! Fixed canvas geometry. None of this is user-configurable.

use crate::foundation::core::{Affine, Canvas, Point, Rect};

pub const CANVAS: Canvas = Canvas {
    width: 1600,
    height: 900,
};

/// Nominal output resolution; marker sizes are specified in points at this DPI.
pub const DPI: f64 = 100.0;

pub const SCOREBOARD_BAND: Rect = Rect::new(0.0, 0.0, 1600.0, 190.0);
pub const STATS_BAND: Rect = Rect::new(0.0, 190.0, 1600.0, 480.0);
pub const PITCH_BAND: Rect = Rect::new(0.0, 480.0, 1600.0, 900.0);

/// Gap kept between the stats band edges and the first/last row.
pub const STATS_ROW_PAD: f64 = 28.0;
pub const STATS_COLUMN: Rect = Rect::new(420.0, 190.0, 1180.0, 480.0);

/// Pitch panels keep the 105:68 proportions of a real pitch.
pub const HOME_PANEL: Rect = Rect::new(115.0, 510.0, 685.0, 880.0);
pub const AWAY_PANEL: Rect = Rect::new(915.0, 510.0, 1485.0, 880.0);
pub const PANEL_LABEL_Y: f64 = 495.0;

/// Column between the two panels holding the legend.
pub const LEGEND_COLUMN: Rect = Rect::new(685.0, 560.0, 915.0, 840.0);

/// Side of the pair of mirrored pitch panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelSide {
    Home,
    Away,
}

impl PanelSide {
    pub fn rect(self) -> Rect {
        match self {
            PanelSide::Home => HOME_PANEL,
            PanelSide::Away => AWAY_PANEL,
        }
    }

    /// Away x-coordinates are mirrored so both panels attack the same way on screen.
    pub fn mirror_x(self, x: f64) -> f64 {
        match self {
            PanelSide::Home => x,
            PanelSide::Away => 100.0 - x,
        }
    }
}

/// Mapping from a panel's logical 100x100 pitch-space onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchFrame {
    pub rect: Rect,
}

impl PitchFrame {
    pub fn for_side(side: PanelSide) -> Self {
        Self { rect: side.rect() }
    }

    pub fn to_screen(self) -> Affine {
        Affine::translate((self.rect.x0, self.rect.y0))
            * Affine::scale_non_uniform(self.rect.width() / 100.0, self.rect.height() / 100.0)
    }

    pub fn place(self, x: f64, y: f64) -> Point {
        self.to_screen() * Point::new(x, y)
    }
}

/// Evenly distribute `n` row centres over `band`, preserving order.
///
/// One row sits on the band's midline; more rows run from `top + pad` to `bottom - pad`
/// inclusive.
pub fn distribute_rows(n: usize, band: Rect, pad: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![band.center().y],
        _ => {
            let top = band.y0 + pad;
            let span = (band.height() - 2.0 * pad).max(0.0);
            let step = span / (n - 1) as f64;
            (0..n).map(|i| top + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/geometry.rs"]
mod tests;
