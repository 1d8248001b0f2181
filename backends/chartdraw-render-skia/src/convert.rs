//! Translating chartdraw values into tiny-skia's

use kurbo::{BezPath, PathEl};
use tiny_skia::{Paint, PathBuilder, Stroke, StrokeDash};

use chartdraw_core::{Color, LineCap, LineJoin, LineStyle};

/// Convert a kurbo path; `None` when there is nothing to draw
pub(crate) fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

pub(crate) fn paint_for(color: Color, anti_alias: bool) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint {
        anti_alias,
        ..Default::default()
    };
    paint.set_color_rgba8(r, g, b, a);
    paint
}

pub(crate) fn stroke_for(style: &LineStyle) -> Stroke {
    Stroke {
        width: style.width as f32,
        line_cap: match style.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        },
        line_join: match style.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        },
        dash: dash_for(&style.dashes),
        ..Default::default()
    }
}

/// tiny-skia wants an even number of intervals; an odd list is repeated
/// once, so `[4]` means four on, four off
fn dash_for(dashes: &[f64]) -> Option<StrokeDash> {
    if dashes.is_empty() {
        return None;
    }
    let mut intervals: Vec<f32> = dashes.iter().map(|&d| d as f32).collect();
    if intervals.len() % 2 == 1 {
        intervals.extend_from_within(..);
    }
    let dash = StrokeDash::new(intervals, 0.0);
    if dash.is_none() {
        // All-zero patterns have no defined period
        log::debug!("Skia: ignoring degenerate dash pattern {:?}", dashes);
    }
    dash
}
