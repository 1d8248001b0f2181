//! Attribute and path-data formatting

use std::fmt::Write as FmtWrite;

use kurbo::{BezPath, PathEl};

use chartdraw_core::{Color, FontSlant, FontStyle, FontWeight, LineCap, LineJoin, LineStyle};

/// Fixed-precision number without trailing zeros
pub(crate) fn num(v: f64, precision: usize) -> String {
    let mut s = format!("{:.*}", precision, v);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// SVG path data for a device-space path
pub(crate) fn path_data(path: &BezPath, precision: usize) -> String {
    let n = |v: f64| num(v, precision);
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        // Writing into a String cannot fail
        let _ = match *el {
            PathEl::MoveTo(p) => write!(d, "M{},{}", n(p.x), n(p.y)),
            PathEl::LineTo(p) => write!(d, "L{},{}", n(p.x), n(p.y)),
            PathEl::QuadTo(c, p) => write!(d, "Q{},{} {},{}", n(c.x), n(c.y), n(p.x), n(p.y)),
            PathEl::CurveTo(c0, c1, p) => write!(
                d,
                "C{},{} {},{} {},{}",
                n(c0.x),
                n(c0.y),
                n(c1.x),
                n(c1.y),
                n(p.x),
                n(p.y)
            ),
            PathEl::ClosePath => write!(d, "Z"),
        };
    }
    d
}

/// `name="#rrggbb"` plus an opacity attribute when not opaque
pub(crate) fn paint_attrs(name: &str, color: Color) -> String {
    let mut out = format!(r#"{}="{}""#, name, color.to_hex());
    if color.a < 1.0 {
        let _ = write!(out, r#" {}-opacity="{}""#, name, num(color.a.clamp(0.0, 1.0), 3));
    }
    out
}

pub(crate) fn stroke_attrs(style: &LineStyle, precision: usize) -> String {
    let mut out = paint_attrs("stroke", style.color);
    let _ = write!(out, r#" stroke-width="{}""#, num(style.width, precision));
    match style.cap {
        LineCap::Butt => {},
        LineCap::Round => out.push_str(r#" stroke-linecap="round""#),
        LineCap::Square => out.push_str(r#" stroke-linecap="square""#),
    }
    match style.join {
        LineJoin::Miter => {},
        LineJoin::Round => out.push_str(r#" stroke-linejoin="round""#),
        LineJoin::Bevel => out.push_str(r#" stroke-linejoin="bevel""#),
    }
    if !style.dashes.is_empty() {
        let dashes: Vec<String> = style.dashes.iter().map(|&d| num(d, precision)).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, dashes.join(" "));
    }
    out
}

pub(crate) fn font_attrs(font: &FontStyle, precision: usize) -> String {
    let mut out = format!(
        r#"font-family="{}" font-size="{}""#,
        escape(&font.name),
        num(font.size, precision)
    );
    match font.slant {
        FontSlant::Normal => {},
        FontSlant::Italic => out.push_str(r#" font-style="italic""#),
        FontSlant::Oblique => out.push_str(r#" font-style="oblique""#),
    }
    if font.weight == FontWeight::Bold {
        out.push_str(r#" font-weight="bold""#);
    }
    out.push(' ');
    out.push_str(&paint_attrs("fill", font.color));
    out
}

/// Escape text for element content and attribute values
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartdraw_core::{BLACK, RED};

    #[test]
    fn test_num_trims() {
        assert_eq!(num(1.5, 2), "1.5");
        assert_eq!(num(2.0, 2), "2");
        assert_eq!(num(0.126, 2), "0.13");
        assert_eq!(num(-0.0001, 2), "0");
        assert_eq!(num(10.0, 0), "10");
    }

    #[test]
    fn test_path_data() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.5));
        path.close_path();
        assert_eq!(path_data(&path, 2), "M0,0 L10,0.5 Z");
    }

    #[test]
    fn test_paint_attrs_opacity() {
        assert_eq!(paint_attrs("fill", RED), r##"fill="#ff0000""##);
        assert_eq!(
            paint_attrs("fill", RED.with_alpha(0.5)),
            r##"fill="#ff0000" fill-opacity="0.5""##
        );
    }

    #[test]
    fn test_stroke_attrs() {
        let style = LineStyle::dashed(1.5, BLACK, vec![4.0, 2.0]).with_cap(LineCap::Round);
        let attrs = stroke_attrs(&style, 2);
        assert!(attrs.contains(r#"stroke-width="1.5""#));
        assert!(attrs.contains(r#"stroke-linecap="round""#));
        assert!(attrs.contains(r#"stroke-dasharray="4 2""#));
        assert!(!attrs.contains("linejoin"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c""#), "a&lt;b &amp; &quot;c&quot;");
    }
}
