//! Operations built purely on top of [`Backend`]
//!
//! Nothing here touches backend internals, so every backend gets these
//! for free and the trait stays small.

use crate::error::{DrawError, Result};
use crate::geometry::{Point, Rect, Vector};
use crate::style::{HTextAnchor, VTextAnchor};
use crate::text::{layout_lines, split_lines, TextLayout};
use crate::traits::Backend;

/// Run a complete drawing program and collect the backend's output
///
/// This is the one sanctioned way to get output out of a session. A
/// program that leaves scopes open is rejected rather than finished.
pub fn run_backend<B, F>(mut backend: B, program: F) -> Result<B::Output>
where
    B: Backend,
    F: FnOnce(&mut B) -> Result<()>,
{
    log::debug!("{}: session started", backend.name());
    program(&mut backend)?;

    let open = backend.scope_depth();
    if open != 0 {
        return Err(DrawError::UnbalancedScope { open });
    }

    let output = backend.finish()?;
    log::debug!("session finished");
    Ok(output)
}

/// Measure and anchor `text` without drawing anything
fn layout<'a, B: Backend>(
    backend: &mut B,
    h: HTextAnchor,
    v: VTextAnchor,
    text: &'a str,
) -> Result<TextLayout<'a>> {
    let extents = backend.font_extents()?;
    let lines = split_lines(text);
    let widths = lines
        .iter()
        .map(|line| backend.text_size(line).map(|size| size.width))
        .collect::<Result<Vec<_>>>()?;
    Ok(layout_lines(&lines, &widths, &extents, h, v))
}

/// The box `draw_text` would fill for these anchors, without drawing
///
/// The anchor-designated edge, centre or baseline of the returned
/// rectangle passes through `p`.
pub fn text_rect<B: Backend>(
    backend: &mut B,
    h: HTextAnchor,
    v: VTextAnchor,
    p: Point,
    text: &str,
) -> Result<Rect> {
    let layout = layout(backend, h, v, text)?;
    let bounds = layout.bounds;
    Ok(Rect::new(
        Point::new(p.x + bounds.origin.x, p.y + bounds.origin.y),
        bounds.size,
    ))
}

/// Draw possibly multi-line text anchored at `p`, rotated about `p`
///
/// The rotation runs in the same angular direction as [`Backend::rotate`].
pub fn draw_text_rotated<B: Backend>(
    backend: &mut B,
    h: HTextAnchor,
    v: VTextAnchor,
    angle_deg: f64,
    p: Point,
    text: &str,
) -> Result<()> {
    let layout = layout(backend, h, v, text)?;
    backend.with_local_scope(|b| {
        b.translate(Vector::new(p.x, p.y))?;
        b.rotate(angle_deg.to_radians())?;
        for line in &layout.lines {
            b.with_local_scope(|b| {
                b.translate(Vector::new(line.origin.x, line.origin.y))?;
                b.show_text(line.text)
            })?;
        }
        Ok(())
    })
}

/// Unrotated text anchored at `p`
pub fn draw_text<B: Backend>(
    backend: &mut B,
    h: HTextAnchor,
    v: VTextAnchor,
    p: Point,
    text: &str,
) -> Result<()> {
    draw_text_rotated(backend, h, v, 0.0, p, text)
}

/// Start a fresh path through `points` and stroke it
pub fn stroke_polyline<B: Backend>(backend: &mut B, points: &[Point]) -> Result<()> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    backend.new_path()?;
    backend.move_to(*first)?;
    for p in rest {
        backend.line_to(*p)?;
    }
    backend.stroke()
}

fn rect_path<B: Backend>(backend: &mut B, rect: Rect) -> Result<()> {
    let [a, b, c, d] = rect.corners();
    backend.new_path()?;
    backend.move_to(a)?;
    backend.line_to(b)?;
    backend.line_to(c)?;
    backend.line_to(d)?;
    backend.close_path()
}

/// Fill a rectangle with the active fill style
pub fn fill_rect<B: Backend>(backend: &mut B, rect: Rect) -> Result<()> {
    rect_path(backend, rect)?;
    backend.fill()
}

/// Outline a rectangle with the active line style
pub fn stroke_rect<B: Backend>(backend: &mut B, rect: Rect) -> Result<()> {
    rect_path(backend, rect)?;
    backend.stroke()
}
