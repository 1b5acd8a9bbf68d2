use std::fmt::Write as _;
use std::sync::Arc;

use crate::{
    compose::plan::{DrawOp, FontWeight, RenderPlan, TextAnchor},
    foundation::{
        core::{BezPath, Rgba8},
        error::{PitchcardError, PitchcardResult},
    },
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
};

/// Family requested for every text op; resolution falls back to any installed face.
pub const TEXT_FAMILY: &str = "sans-serif";

/// CPU backend powered by `vello_cpu` for shapes and `resvg` for text.
pub struct CpuBackend {
    settings: RenderSettings,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl CpuBackend {
    /// Create a backend that loads system fonts on first use.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            fontdb: None,
        }
    }

    /// Create a backend with a prepared font database.
    pub fn with_fontdb(settings: RenderSettings, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            settings,
            fontdb: Some(fontdb),
        }
    }

    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        self.fontdb.get_or_insert_with(build_fontdb).clone()
    }

    /// Rasterize all text ops into one premultiplied RGBA8 layer, or `None` when there is
    /// nothing to draw or no font to draw it with.
    fn text_layer(&mut self, plan: &RenderPlan) -> PitchcardResult<Option<Vec<u8>>> {
        let Some(svg) = text_overlay_svg(plan) else {
            return Ok(None);
        };
        let fontdb = self.fontdb();
        if fontdb.faces().next().is_none() {
            tracing::warn!("no fonts available; text is skipped");
            return Ok(None);
        }

        let opts = usvg::Options {
            fontdb,
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
            .map_err(|e| PitchcardError::render(format!("parse text overlay: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(plan.canvas.width, plan.canvas.height)
            .ok_or_else(|| PitchcardError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(Some(pixmap.data().to_vec()))
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &RenderPlan) -> PitchcardResult<FrameRGBA> {
        let (width, height) = (plan.canvas.width, plan.canvas.height);
        if width == 0 || height == 0 {
            return Err(PitchcardError::render("canvas must be non-empty"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| PitchcardError::render("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| PitchcardError::render("canvas height exceeds u16"))?;

        let clear = self
            .settings
            .clear_rgba
            .map(|[r, g, b, a]| Rgba8::rgba(r, g, b, a))
            .unwrap_or(plan.background);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(clear));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        for (path, color) in plan.fills_by_layer() {
            ctx.set_paint(color_to_cpu(color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        let mut data = pixmap.data_as_u8_slice().to_vec();

        if let Some(text) = self.text_layer(plan)? {
            premul_over_in_place(&mut data, &text)?;
        }

        Ok(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        })
    }
}

/// One SVG document holding every text op of `plan` in `z` order.
pub fn text_overlay_svg(plan: &RenderPlan) -> Option<String> {
    let mut texts: Vec<&DrawOp> = plan
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Text { text, .. } if !text.trim().is_empty()))
        .collect();
    if texts.is_empty() {
        return None;
    }
    texts.sort_by_key(|op| op.z());

    let (w, h) = (plan.canvas.width, plan.canvas.height);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for op in texts {
        let DrawOp::Text {
            text,
            origin,
            size_px,
            anchor,
            weight,
            color,
            ..
        } = op
        else {
            continue;
        };
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = match weight {
            FontWeight::Regular => "normal",
            FontWeight::Bold => "bold",
        };
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-family="{TEXT_FAMILY}" font-size="{:.2}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="central" fill="{}" fill-opacity="{:.3}">{}</text>"#,
            origin.x,
            origin.y,
            size_px,
            color.to_hex_rgb(),
            color.opacity(),
            escape_xml(text),
        );
    }
    svg.push_str("</svg>");
    Some(svg)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

fn build_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> PitchcardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PitchcardError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        d[3] = s[3].saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            d[c] = s[c].saturating_add(mul_div255_u8(u16::from(d[c]), inv));
        }
    }
    Ok(())
}

fn mul_div255_u8(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
