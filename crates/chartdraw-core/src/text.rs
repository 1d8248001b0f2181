//! Anchored layout for multi-line text blocks
//!
//! Given the width of each line and the active font extents, work out
//! where every baseline goes relative to the anchor point, and the box the
//! whole block occupies. Device space is y-down.

use crate::geometry::{Point, Rect};
use crate::style::{FontExtents, HTextAnchor, VTextAnchor};

/// One laid-out line
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout<'a> {
    pub text: &'a str,
    /// Baseline-left position relative to the anchor point
    pub origin: Point,
    pub width: f64,
}

/// A laid-out block of text, relative to its anchor point
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout<'a> {
    pub lines: Vec<LineLayout<'a>>,
    pub bounds: Rect,
}

/// Split text the way the block layout does
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Anchor a block of lines with the given measured widths
///
/// Each line is `extents.height` tall and aligned on its own by `h`. The
/// block's vertical anchor picks the top edge, middle, bottom edge or the
/// first baseline.
pub fn layout_lines<'a>(
    lines: &[&'a str],
    widths: &[f64],
    extents: &FontExtents,
    h: HTextAnchor,
    v: VTextAnchor,
) -> TextLayout<'a> {
    let line_height = extents.height;
    let total_height = line_height * lines.len() as f64;
    let block_width = widths.iter().copied().fold(0.0, f64::max);

    let top = match v {
        VTextAnchor::Top => 0.0,
        VTextAnchor::Centre => -total_height / 2.0,
        VTextAnchor::Bottom => -total_height,
        VTextAnchor::Baseline => -extents.ascent,
    };

    let lines = lines
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (&text, &width))| LineLayout {
            text,
            origin: Point::new(
                h_offset(h, width),
                top + extents.ascent + line_height * i as f64,
            ),
            width,
        })
        .collect();

    TextLayout {
        lines,
        bounds: Rect::from_xywh(h_offset(h, block_width), top, block_width, total_height),
    }
}

fn h_offset(h: HTextAnchor, width: f64) -> f64 {
    match h {
        HTextAnchor::Left => 0.0,
        HTextAnchor::Centre => -width / 2.0,
        HTextAnchor::Right => -width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents() -> FontExtents {
        FontExtents {
            ascent: 8.0,
            descent: 2.0,
            height: 12.0,
            max_x_advance: 6.0,
            max_y_advance: 0.0,
        }
    }

    #[test]
    fn test_single_line_top_left() {
        let layout = layout_lines(&["abc"], &[18.0], &extents(), HTextAnchor::Left, VTextAnchor::Top);
        assert_eq!(layout.bounds, Rect::from_xywh(0.0, 0.0, 18.0, 12.0));
        assert_eq!(layout.lines[0].origin, Point::new(0.0, 8.0));
    }

    #[test]
    fn test_baseline_anchor() {
        let layout = layout_lines(
            &["abc"],
            &[18.0],
            &extents(),
            HTextAnchor::Right,
            VTextAnchor::Baseline,
        );
        assert_eq!(layout.lines[0].origin, Point::new(-18.0, 0.0));
        assert_eq!(layout.bounds.min_y(), -8.0);
    }

    #[test]
    fn test_multi_line_centred() {
        let lines = split_lines("wide line\nshort");
        let layout = layout_lines(
            &lines,
            &[30.0, 10.0],
            &extents(),
            HTextAnchor::Centre,
            VTextAnchor::Centre,
        );
        assert_eq!(layout.bounds, Rect::from_xywh(-15.0, -12.0, 30.0, 24.0));
        assert_eq!(layout.lines[0].origin, Point::new(-15.0, -4.0));
        assert_eq!(layout.lines[1].origin, Point::new(-5.0, 8.0));
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(split_lines(""), vec![""]);
    }
}
