//! Integration tests for the Skia backend: drawn scenes checked pixel by pixel

use std::f64::consts::TAU;
use std::sync::Arc;

use chartdraw_core::{
    draw_text, run_backend, Backend, FillStyle, FontExtents, FontProvider, FontStyle,
    HTextAnchor, LineStyle, Point, PointStyle, Rect, Result, VTextAnchor, Vector, BLACK, BLUE,
    RED,
};
use chartdraw_fontdb::FontBook;
use chartdraw_render_skia::{RasterOptions, RasterOutput, SkiaBackend};

const WHITE_PX: [u8; 4] = [255, 255, 255, 255];
const BLACK_PX: [u8; 4] = [0, 0, 0, 255];
const RED_PX: [u8; 4] = [255, 0, 0, 255];
const BLUE_PX: [u8; 4] = [0, 0, 255, 255];

/// Measures but cannot outline; enough for everything except show_text
struct StubFonts;

impl FontProvider for StubFonts {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn font_extents(&self, style: &FontStyle) -> Result<FontExtents> {
        Ok(FontExtents {
            ascent: style.size * 0.8,
            descent: style.size * 0.2,
            height: style.size,
            max_x_advance: style.size,
            max_y_advance: 0.0,
        })
    }

    fn text_advance(&self, style: &FontStyle, text: &str) -> Result<f64> {
        Ok(text.chars().count() as f64 * style.size * 0.5)
    }
}

fn surface(width: u32, height: u32) -> SkiaBackend {
    let _ = env_logger::builder().is_test(true).try_init();
    SkiaBackend::new(RasterOptions::new(width, height), Arc::new(StubFonts)).unwrap()
}

fn draw<F>(width: u32, height: u32, program: F) -> RasterOutput
where
    F: FnOnce(&mut SkiaBackend) -> Result<()>,
{
    run_backend(surface(width, height), program).unwrap()
}

fn px(output: &RasterOutput, x: u32, y: u32) -> [u8; 4] {
    output.pixel(x, y).unwrap()
}

#[test]
fn test_renderer_creation() {
    let backend = surface(8, 8);
    assert_eq!(backend.name(), "skia");
    assert_eq!(backend.options().width, 8);
}

#[test]
fn test_empty_rendering() {
    let output = draw(5, 7, |_| Ok(()));
    assert_eq!((output.width(), output.height()), (5, 7));
    assert_eq!(px(&output, 4, 6), WHITE_PX);
}

#[test]
fn test_triangle_outline() {
    let output = draw(24, 24, |b| {
        // Half-pixel offset so one-unit strokes cover whole pixel rows
        b.translate(Vector::new(5.5, 5.5))?;
        b.with_line_style(LineStyle::solid(1.0, BLACK), |b| {
            b.new_path()?;
            b.move_to(Point::new(0.0, 0.0))?;
            b.line_to(Point::new(10.0, 0.0))?;
            b.line_to(Point::new(10.0, 10.0))?;
            b.close_path()?;
            b.stroke()
        })
    });

    // Top edge and right edge
    assert_eq!(px(&output, 10, 5), BLACK_PX);
    assert_eq!(px(&output, 15, 10), BLACK_PX);
    // The diagonal passes through this pixel's centre
    assert!(px(&output, 10, 10)[0] < 128);
    // Inside and outside stay untouched
    assert_eq!(px(&output, 13, 8), WHITE_PX);
    assert_eq!(px(&output, 7, 12), WHITE_PX);
    assert_eq!(px(&output, 20, 20), WHITE_PX);
}

#[test]
fn test_filled_red_circle() {
    let output = draw(20, 20, |b| {
        b.with_fill_style(FillStyle::solid(RED), |b| {
            b.new_path()?;
            b.arc(Point::new(5.0, 5.0), 5.0, 0.0, TAU)?;
            b.fill()
        })?;
        // Outer fill style is back to its default after the scope
        assert_eq!(b.state().fill_style(), &FillStyle::default());
        Ok(())
    });

    assert_eq!(px(&output, 5, 5), RED_PX);
    assert_eq!(px(&output, 2, 5), RED_PX);
    assert_eq!(px(&output, 0, 0), WHITE_PX);
    assert_eq!(px(&output, 15, 15), WHITE_PX);
}

#[test]
fn test_plus_marker_snaps_to_pixel_centre() {
    let style = PointStyle::plusses(3.0, 1.0, BLACK);
    let output = draw(20, 20, |b| b.draw_point(&style, Point::new(10.2, 10.7)));

    // Centre snaps to (10.5, 10.5): the arms cover row 10 and column 10
    for i in 8..=12 {
        assert_eq!(px(&output, i, 10), BLACK_PX, "horizontal arm at x={i}");
        assert_eq!(px(&output, 10, i), BLACK_PX, "vertical arm at y={i}");
    }
    assert_eq!(px(&output, 8, 8), WHITE_PX);
    assert_eq!(px(&output, 15, 10), WHITE_PX);
}

#[test]
fn test_filled_marker() {
    let style = PointStyle::filled(4.0, BLUE, 0.0, BLACK);
    let output = draw(20, 20, |b| b.draw_point(&style, Point::new(10.0, 10.0)));
    assert_eq!(px(&output, 10, 10), BLUE_PX);
    assert_eq!(px(&output, 1, 1), WHITE_PX);
}

#[test]
fn test_clip_region() {
    let output = draw(20, 20, |b| {
        b.with_source_color(RED, |b| {
            b.with_clip_region(Rect::from_xywh(0.0, 0.0, 10.0, 20.0), |b| b.paint())
        })
    });
    assert_eq!(px(&output, 5, 5), RED_PX);
    assert_eq!(px(&output, 15, 5), WHITE_PX);
}

#[test]
fn test_nested_clips_intersect_and_restore() {
    let output = draw(20, 20, |b| {
        b.with_fill_style(FillStyle::solid(BLUE), |b| {
            b.with_clip_region(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), |b| {
                b.with_clip_region(Rect::from_xywh(5.0, 5.0, 10.0, 10.0), |b| b.paint())
            })
        })?;
        // Clip is gone again: this fill reaches the far corner
        b.with_fill_style(FillStyle::solid(RED), |b| {
            chartdraw_core::fill_rect(b, Rect::from_xywh(16.0, 16.0, 4.0, 4.0))
        })
    });
    assert_eq!(px(&output, 7, 7), BLUE_PX);
    assert_eq!(px(&output, 2, 2), WHITE_PX);
    assert_eq!(px(&output, 12, 12), WHITE_PX);
    assert_eq!(px(&output, 18, 18), RED_PX);
}

#[test]
fn test_zero_width_stroke_draws_nothing() {
    let output = draw(10, 10, |b| {
        b.with_line_style(LineStyle::solid(0.0, BLACK), |b| {
            b.new_path()?;
            b.move_to(Point::new(0.0, 5.0))?;
            b.line_to(Point::new(10.0, 5.0))?;
            b.stroke()
        })
    });
    for x in 0..10 {
        assert_eq!(px(&output, x, 5), WHITE_PX);
        assert_eq!(px(&output, x, 4), WHITE_PX);
    }
}

#[test]
fn test_png_roundtrip_to_disk() {
    let output = draw(4, 4, |b| b.paint());
    let dir = std::env::temp_dir().join(format!("chartdraw-skia-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("paint.png");
    output.save_png(&file).unwrap();
    let bytes = std::fs::read(&file).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_text_with_system_fonts() {
    let book = FontBook::system();
    if book.face_count() == 0 {
        eprintln!("no system fonts installed, skipping");
        return;
    }
    let font = FontStyle::new("sans-serif", 24.0);
    if book.font_extents(&font).is_err() {
        eprintln!("no sans-serif fallback configured, skipping");
        return;
    }

    let backend = SkiaBackend::new(RasterOptions::new(60, 40), Arc::new(book)).unwrap();
    let output = run_backend(backend, |b| {
        b.with_font_style(font, |b| {
            draw_text(
                b,
                HTextAnchor::Centre,
                VTextAnchor::Centre,
                Point::new(30.0, 20.0),
                "H",
            )
        })
    })
    .unwrap();

    let mut inked = 0;
    for y in 0..40 {
        for x in 0..60 {
            if px(&output, x, y)[0] < 128 {
                inked += 1;
            }
        }
    }
    assert!(inked > 10, "expected a visible glyph, found {inked} dark pixels");
    // Centred text keeps the corners clear
    assert_eq!(px(&output, 0, 0), WHITE_PX);
    assert_eq!(px(&output, 59, 39), WHITE_PX);
}
