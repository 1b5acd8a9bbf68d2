use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};

/// Backend-agnostic description of one finished graphic.
///
/// Paths are already in canvas pixel space. Ops are listed in paint order; `z` only
/// matters to backends that batch by layer (text is always the top layer).
#[derive(Clone, Debug, PartialEq)]
pub struct RenderPlan {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub ops: Vec<DrawOp>,
}

/// Horizontal alignment of a text op relative to its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Draw operation emitted by the composer.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        color: Rgba8,
        z: i32,
    },
    /// Single line of text, vertically centred on `origin.y`.
    Text {
        text: String,
        origin: Point,
        size_px: f64,
        anchor: TextAnchor,
        weight: FontWeight,
        color: Rgba8,
        z: i32,
    },
}

impl DrawOp {
    pub fn z(&self) -> i32 {
        match self {
            DrawOp::FillPath { z, .. } | DrawOp::Text { z, .. } => *z,
        }
    }
}

impl RenderPlan {
    pub fn new(canvas: Canvas, background: Rgba8) -> Self {
        Self {
            canvas,
            background,
            ops: Vec::new(),
        }
    }

    /// Text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::FillPath { .. } => None,
        })
    }

    /// Fill ops ordered by `z`, stable within a layer.
    pub fn fills_by_layer(&self) -> Vec<(&BezPath, Rgba8)> {
        let mut fills: Vec<(i32, &BezPath, Rgba8)> = self
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillPath { path, color, z } => Some((*z, path, *color)),
                DrawOp::Text { .. } => None,
            })
            .collect();
        fills.sort_by_key(|(z, _, _)| *z);
        fills.into_iter().map(|(_, p, c)| (p, c)).collect()
    }
}
