//! Demo scenes, drawn through any backend

use std::f64::consts::TAU;

use chartdraw::prelude::*;

use crate::cli::Scene;

const PANEL_MARGIN: f64 = 10.0;

/// Draw `scene` filling a `width` x `height` surface
pub fn draw<B: Backend>(b: &mut B, scene: Scene, width: f64, height: f64, font: &str) -> Result<()> {
    log::debug!("drawing {:?} scene at {}x{}", scene, width, height);
    match scene {
        Scene::Triangle => triangle(b, width, height),
        Scene::Circle => circle(b, width, height),
        Scene::Markers => markers(b, width, height),
        Scene::Text => text(b, width, height, font),
        Scene::All => grid(b, width, height, font),
    }
}

fn triangle<B: Backend>(b: &mut B, width: f64, height: f64) -> Result<()> {
    let side = (width.min(height) - 2.0 * PANEL_MARGIN).max(0.0);
    let (x0, y0) = (PANEL_MARGIN, PANEL_MARGIN);
    b.with_line_style(LineStyle::solid(2.0, BLACK).with_join(LineJoin::Round), |b| {
        b.new_path()?;
        b.move_to(Point::new(x0, y0))?;
        b.line_to(Point::new(x0 + side, y0))?;
        b.line_to(Point::new(x0 + side, y0 + side))?;
        b.close_path()?;
        b.stroke()
    })
}

fn circle<B: Backend>(b: &mut B, width: f64, height: f64) -> Result<()> {
    let radius = (width.min(height) / 2.0 - PANEL_MARGIN).max(0.0);
    let center = Point::new(width / 2.0, height / 2.0);
    b.with_fill_style(FillStyle::solid(RED), |b| {
        b.new_path()?;
        b.arc(center, radius, 0.0, TAU)?;
        b.fill_preserve()?;
        b.with_line_style(LineStyle::solid(1.0, BLACK), |b| b.stroke())
    })
}

fn markers<B: Backend>(b: &mut B, width: f64, height: f64) -> Result<()> {
    let styles = [
        PointStyle::filled(6.0, BLUE, 1.0, BLACK),
        PointStyle::hollow(6.0, 1.5, BLUE),
        PointStyle::polygon(7.0, 3, true, GREEN, 1.0, BLACK),
        PointStyle::polygon(7.0, 4, false, RED, 1.0, BLACK),
        PointStyle::plusses(6.0, 1.5, BLACK),
        PointStyle::exes(6.0, 1.5, BLACK),
        PointStyle::stars(6.0, 1.5, GREY),
    ];
    let step = width / (styles.len() + 1) as f64;
    let y = height / 2.0;

    // A faint baseline so the pixel snapping is visible
    b.with_line_style(LineStyle::dashed(1.0, GREY, vec![4.0, 2.0]), |b| {
        stroke_polyline(b, &[Point::new(0.0, y), Point::new(width, y)])
    })?;
    for (i, style) in styles.iter().enumerate() {
        b.draw_point(style, Point::new(step * (i + 1) as f64, y))?;
    }
    Ok(())
}

fn text<B: Backend>(b: &mut B, width: f64, height: f64, font: &str) -> Result<()> {
    let centre = Point::new(width / 2.0, height / 2.0);
    let label_font = FontStyle::new(font, 14.0);

    b.with_font_style(label_font.clone(), |b| {
        // Crosshair marking the anchor point
        b.with_line_style(LineStyle::solid(1.0, GREY), |b| {
            stroke_polyline(b, &[Point::new(centre.x, 0.0), Point::new(centre.x, height)])?;
            stroke_polyline(b, &[Point::new(0.0, centre.y), Point::new(width, centre.y)])
        })?;

        let anchored = [
            (HTextAnchor::Left, VTextAnchor::Bottom, "left/bottom"),
            (HTextAnchor::Right, VTextAnchor::Top, "right/top"),
        ];
        for (h, v, label) in anchored {
            let rect = text_rect(b, h, v, centre, label)?;
            b.with_line_style(LineStyle::solid(0.5, BLUE), |b| stroke_rect(b, rect))?;
            draw_text(b, h, v, centre, label)?;
        }

        b.with_font_style(label_font.clone().with_weight(FontWeight::Bold).with_color(RED), |b| {
            draw_text(
                b,
                HTextAnchor::Centre,
                VTextAnchor::Top,
                Point::new(centre.x, PANEL_MARGIN),
                "Title\nsubtitle",
            )
        })?;

        draw_text_rotated(
            b,
            HTextAnchor::Centre,
            VTextAnchor::Top,
            -90.0,
            Point::new(PANEL_MARGIN, centre.y),
            "rotated axis",
        )
    })
}

/// Every scene in its own clipped, translated panel
fn grid<B: Backend>(b: &mut B, width: f64, height: f64, font: &str) -> Result<()> {
    let (w, h) = (width / 2.0, height / 2.0);
    let panels = [Scene::Triangle, Scene::Circle, Scene::Markers, Scene::Text];
    for (i, scene) in panels.into_iter().enumerate() {
        let origin = Vector::new(w * (i % 2) as f64, h * (i / 2) as f64);
        b.with_local_scope(|b| {
            b.translate(origin)?;
            b.with_clip_region(Rect::from_xywh(0.0, 0.0, w, h), |b| {
                draw(b, scene, w, h, font)?;
                b.with_line_style(LineStyle::solid(1.0, GREY), |b| {
                    stroke_rect(b, Rect::from_xywh(0.0, 0.0, w, h))
                })
            })
        })?;
    }
    Ok(())
}
