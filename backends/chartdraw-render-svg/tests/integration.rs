//! Integration tests for the SVG backend: document structure per scene

use std::f64::consts::TAU;
use std::sync::Arc;

use chartdraw_core::{
    draw_text_rotated, run_backend, Backend, DrawError, FillStyle, FontError, FontExtents,
    FontProvider, FontStyle, FontWeight, HTextAnchor, LineStyle, Point, PointStyle, Rect, Result,
    VTextAnchor, Vector, BLACK, BLUE, RED,
};
use chartdraw_render_svg::{SvgBackend, SvgOptions};

struct FixedPitch;

impl FontProvider for FixedPitch {
    fn name(&self) -> &'static str {
        "fixed-pitch"
    }

    fn font_extents(&self, style: &FontStyle) -> Result<FontExtents> {
        if style.name == "Missing Sans" {
            return Err(FontError::NotFound(style.name.clone()).into());
        }
        Ok(FontExtents {
            ascent: style.size * 0.8,
            descent: style.size * 0.2,
            height: style.size,
            max_x_advance: style.size * 0.5,
            max_y_advance: 0.0,
        })
    }

    fn text_advance(&self, style: &FontStyle, text: &str) -> Result<f64> {
        Ok(text.chars().count() as f64 * style.size * 0.5)
    }
}

fn render<F>(program: F) -> String
where
    F: FnOnce(&mut SvgBackend) -> Result<()>,
{
    let _ = env_logger::builder().is_test(true).try_init();
    let options = SvgOptions::new(100.0, 100.0).with_background(None);
    run_backend(SvgBackend::new(options, Arc::new(FixedPitch)), program).unwrap()
}

#[test]
fn test_triangle_outline() {
    let svg = render(|b| {
        b.with_line_style(LineStyle::solid(1.0, BLACK), |b| {
            b.new_path()?;
            b.move_to(Point::new(0.0, 0.0))?;
            b.line_to(Point::new(10.0, 0.0))?;
            b.line_to(Point::new(10.0, 10.0))?;
            b.close_path()?;
            b.stroke()
        })
    });
    assert!(
        svg.contains(r##"<path d="M0,0 L10,0 L10,10 Z" fill="none" stroke="#000000" stroke-width="1"/>"##),
        "{svg}"
    );
}

#[test]
fn test_red_circle() {
    let svg = render(|b| {
        b.with_fill_style(FillStyle::solid(RED), |b| {
            b.new_path()?;
            b.arc(Point::new(5.0, 5.0), 5.0, 0.0, TAU)?;
            b.fill()
        })
    });
    let path = svg
        .lines()
        .find(|l| l.contains("<path"))
        .expect("a path element");
    assert!(path.contains(r##"fill="#ff0000""##));
    assert!(path.contains("d=\"M10,5 C"));
    assert!(!path.contains("stroke"));
}

#[test]
fn test_markers() {
    let svg = render(|b| {
        b.draw_point(&PointStyle::plusses(3.0, 1.0, BLUE), Point::new(20.0, 20.0))?;
        b.draw_point(
            &PointStyle::polygon(4.0, 3, true, RED, 0.0, BLACK),
            Point::new(50.0, 50.0),
        )
    });
    let paths: Vec<&str> = svg.lines().filter(|l| l.contains("<path")).collect();
    assert_eq!(paths.len(), 2);
    // Vector output is not pixel-aligned
    assert!(paths[0].contains("M23,20 L17,20 M20,17 L20,23"), "{}", paths[0]);
    assert!(paths[0].contains(r#"fill="none""#));
    assert!(paths[0].contains(r##"stroke="#0000ff""##));
    // Pointing-up triangle: first vertex straight above the centre
    assert!(paths[1].contains("M50,46"), "{}", paths[1]);
    assert!(paths[1].contains(r##"fill="#ff0000""##));
    assert!(!paths[1].contains("stroke"));
}

#[test]
fn test_clip_groups_nest() {
    let svg = render(|b| {
        b.with_clip_region(Rect::from_xywh(0.0, 0.0, 50.0, 50.0), |b| {
            b.with_clip_region(Rect::from_xywh(25.0, 25.0, 50.0, 50.0), |b| b.paint())?;
            b.paint()
        })?;
        b.paint()
    });
    assert_eq!(svg.matches("<clipPath").count(), 2);
    assert_eq!(svg.matches("<g clip-path").count(), 2);
    assert_eq!(svg.matches("</g>").count(), 2);
    assert!(svg.contains(r#"id="clip0""#));
    assert!(svg.contains(r#"id="clip1""#));
    assert!(svg.contains(r#"<clipPath id="clip0"><path d="M0,0 L50,0 L50,50 L0,50 Z"/></clipPath>"#));

    // The last paint sits outside every group
    let last_rect = svg.rfind("<rect").unwrap();
    let last_close = svg.rfind("</g>").unwrap();
    assert!(last_rect > last_close);
}

#[test]
fn test_text_element() {
    let svg = render(|b| {
        b.with_font_style(
            FontStyle::new("Helvetica", 12.0).with_weight(FontWeight::Bold),
            |b| {
                b.with_source_color(RED, |b| {
                    b.translate(Vector::new(10.0, 20.0))?;
                    b.show_text("a < b")
                })
            },
        )
    });
    assert!(svg.contains(r#"transform="matrix(1 0 0 1 10 20)""#), "{svg}");
    assert!(svg.contains(r#"font-family="Helvetica""#));
    assert!(svg.contains(r#"font-size="12""#));
    assert!(svg.contains(r#"font-weight="bold""#));
    // An explicit font style beats the source colour
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.contains(">a &lt; b</text>"));
}

#[test]
fn test_unavailable_font_fails_the_program() {
    let options = SvgOptions::new(10.0, 10.0);
    let result = run_backend(SvgBackend::new(options, Arc::new(FixedPitch)), |b| {
        b.with_font_style(FontStyle::new("Missing Sans", 12.0), |b| b.show_text("x"))
    });
    assert!(matches!(result, Err(DrawError::Font(FontError::NotFound(_)))));
}

#[test]
fn test_rotated_label() {
    let svg = render(|b| {
        draw_text_rotated(
            b,
            HTextAnchor::Left,
            VTextAnchor::Baseline,
            90.0,
            Point::new(30.0, 40.0),
            "y",
        )
    });
    assert!(svg.contains(r#"transform="matrix(0 1 -1 0 30 40)""#), "{svg}");
}

#[test]
fn test_precision() {
    let options = SvgOptions::new(10.0, 10.0)
        .with_precision(1)
        .with_background(None);
    let svg = run_backend(SvgBackend::new(options, Arc::new(FixedPitch)), |b| {
        b.new_path()?;
        b.move_to(Point::new(1.234, 5.678))?;
        b.line_to(Point::new(2.0, 2.0))?;
        b.stroke()
    })
    .unwrap();
    assert!(svg.contains("M1.2,5.7 L2,2"), "{svg}");
}

#[test]
fn test_scope_state_restored_after_error() {
    let mut backend = SvgBackend::new(SvgOptions::default(), Arc::new(FixedPitch));
    let result: Result<()> = backend.with_clip_region(Rect::from_xywh(0.0, 0.0, 5.0, 5.0), |b| {
        b.line_to(Point::new(1.0, 1.0))
    });
    assert!(result.is_err());
    assert_eq!(backend.scope_depth(), 0);
    let svg = backend.finish().unwrap();
    assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
}
