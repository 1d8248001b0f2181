// this_file: crates/chartdraw-core/src/traits.rs

//! The contracts that bind every backend together
//!
//! - [`Backend`] - What a drawing surface must be able to do
//! - [`FontProvider`] - Where text metrics and glyph outlines come from
//!
//! Chart layout code is written once against [`Backend`]; raster, vector
//! and recording surfaces each implement it on their own.

use kurbo::BezPath;

use crate::color::Color;
use crate::environment::RenderEnvironment;
use crate::error::{FontError, Result};
use crate::geometry::{Point, Rect, Vector};
use crate::state::ScopeFrame;
use crate::style::{FillStyle, FontExtents, FontStyle, LineStyle, PointStyle, TextSize};

/// Every drawing surface speaks this vocabulary
///
/// Path construction, transforms, painting, text and markers are the
/// required primitives. Scoped overrides are provided on top of two
/// primitives, [`Backend::enter_scope`] and [`Backend::exit_scope`], so
/// the restore-on-every-exit guarantee is written once.
///
/// ```ignore
/// use chartdraw_core::{run_backend, Backend, Point, LineStyle, BLACK};
///
/// let image = run_backend(backend, |b| {
///     b.with_line_style(LineStyle::solid(1.0, BLACK), |b| {
///         b.new_path()?;
///         b.move_to(Point::new(0.0, 0.0))?;
///         b.line_to(Point::new(10.0, 10.0))?;
///         b.stroke()
///     })
/// })?;
/// ```
pub trait Backend {
    /// What a finished session produces
    type Output;

    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// The innermost active environment
    fn environment(&self) -> &RenderEnvironment;

    // Path construction

    /// Discard the current path and start an empty one
    fn new_path(&mut self) -> Result<()>;

    /// Close the current sub-path back to its start point
    fn close_path(&mut self) -> Result<()>;

    fn move_to(&mut self, p: Point) -> Result<()>;

    fn line_to(&mut self, p: Point) -> Result<()>;

    fn relative_line_to(&mut self, delta: Vector) -> Result<()>;

    /// Circular arc swept with increasing angle (radians)
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()>;

    /// Circular arc swept with decreasing angle (radians)
    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()>;

    // Transform

    fn translate(&mut self, delta: Vector) -> Result<()>;

    fn rotate(&mut self, angle: f64) -> Result<()>;

    // Painting

    /// Stroke the current path with the active line style; clears the path
    fn stroke(&mut self) -> Result<()>;

    /// Fill the current path with the active fill style; clears the path
    fn fill(&mut self) -> Result<()>;

    /// Fill the current path and keep it for a following operation
    fn fill_preserve(&mut self) -> Result<()>;

    /// Fill the whole clip region with the active fill style
    fn paint(&mut self) -> Result<()>;

    // Scopes

    /// Save the drawing state and apply `frame`
    fn enter_scope(&mut self, frame: ScopeFrame) -> Result<()>;

    /// Restore the state saved by the matching `enter_scope`
    fn exit_scope(&mut self) -> Result<()>;

    /// How many scopes are open right now
    fn scope_depth(&self) -> usize;

    // Text and markers

    /// Extents of one line of text in the active font
    fn text_size(&mut self, text: &str) -> Result<TextSize>;

    /// Metrics of the active font
    fn font_extents(&mut self) -> Result<FontExtents>;

    /// Draw one line with its baseline-left at the user-space origin
    fn show_text(&mut self, text: &str) -> Result<()>;

    /// Draw one marker at `position`, aligned with `point_align`
    fn draw_point(&mut self, style: &PointStyle, position: Point) -> Result<()>;

    /// Produce the session's output; called by [`crate::run_backend`]
    fn finish(self) -> Result<Self::Output>
    where
        Self: Sized;

    // Provided scoped overrides

    /// Run `body` inside a scope; the scope is closed whether `body`
    /// succeeds or fails, and the body's error wins over a close error
    fn with_scope<R, F>(&mut self, frame: ScopeFrame, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.enter_scope(frame)?;
        let result = body(self);
        let exited = self.exit_scope();
        match result {
            Ok(value) => exited.map(|()| value),
            Err(err) => {
                if let Err(exit_err) = exited {
                    log::warn!("{}: scope exit failed during error exit: {}", self.name(), exit_err);
                }
                Err(err)
            },
        }
    }

    /// Isolate every drawing change `body` makes, the path included
    fn with_local_scope<R, F>(&mut self, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Local, body)
    }

    fn with_source_color<R, F>(&mut self, color: Color, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::SourceColor(color), body)
    }

    fn with_font_style<R, F>(&mut self, style: FontStyle, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Font(style), body)
    }

    fn with_fill_style<R, F>(&mut self, style: FillStyle, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Fill(style), body)
    }

    fn with_line_style<R, F>(&mut self, style: LineStyle, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Line(style), body)
    }

    /// Intersect the clip with `rect` while `body` runs
    fn with_clip_region<R, F>(&mut self, rect: Rect, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Clip(rect), body)
    }

    /// Replace the render environment while `body` runs
    fn with_environment<R, F>(&mut self, environment: RenderEnvironment, body: F) -> Result<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R>,
    {
        self.with_scope(ScopeFrame::Environment(environment), body)
    }
}

/// Your window into font metrics
///
/// Backends never parse fonts themselves; they ask a provider. Resolution
/// failures are errors, never zero-sized answers, because a zero extent
/// would quietly corrupt layout maths downstream.
///
/// ```ignore
/// struct FixedPitch;
///
/// impl FontProvider for FixedPitch {
///     fn name(&self) -> &'static str {
///         "fixed-pitch"
///     }
///
///     fn font_extents(&self, style: &FontStyle) -> Result<FontExtents> {
///         Ok(FontExtents { ascent: style.size * 0.8, descent: style.size * 0.2,
///                          height: style.size, max_x_advance: style.size * 0.6,
///                          max_y_advance: 0.0 })
///     }
///
///     fn text_advance(&self, style: &FontStyle, text: &str) -> Result<f64> {
///         Ok(text.chars().count() as f64 * style.size * 0.6)
///     }
/// }
/// ```
pub trait FontProvider: Send + Sync {
    /// Who are you? Used for debugging and logging
    fn name(&self) -> &'static str;

    /// Metrics of the font `style` resolves to
    fn font_extents(&self, style: &FontStyle) -> Result<FontExtents>;

    /// Horizontal advance of one line of text
    fn text_advance(&self, style: &FontStyle, text: &str) -> Result<f64>;

    /// Glyph outlines for one line of text
    ///
    /// Coordinates are y-down, scaled to `style.size`, with the baseline
    /// at y = 0 and the pen starting at x = 0.
    fn text_outline(&self, style: &FontStyle, text: &str) -> Result<BezPath> {
        let _ = (style, text);
        Err(FontError::Backend(format!("{} does not provide glyph outlines", self.name())).into())
    }

    /// Width of the line and the font's line height
    fn text_size(&self, style: &FontStyle, text: &str) -> Result<TextSize> {
        let extents = self.font_extents(style)?;
        let width = self.text_advance(style, text)?;
        Ok(TextSize {
            width,
            height: extents.height,
        })
    }
}
