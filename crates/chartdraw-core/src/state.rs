// this_file: crates/chartdraw-core/src/state.rs

//! Drawing state a backend can embed
//!
//! Every backend tracks the same things: the current path, the current
//! transform, the active styles, the clip stack and the render
//! environment, all saved and restored as scopes come and go. [`DrawState`]
//! does that bookkeeping once. A backend keeps one, forwards the path and
//! scope primitives to it, and only has to turn the resulting device-space
//! paths into pixels, markup or records.
//!
//! Paths are stored in device space: each coordinate is aligned with the
//! active environment, then mapped through the transform current at the
//! time it is appended. Later transform changes never move existing
//! segments.

use std::f64::consts::TAU;

use kurbo::{Affine, BezPath, PathEl, Vec2};

use crate::color::Color;
use crate::environment::RenderEnvironment;
use crate::error::{DrawError, Result, StyleError};
use crate::geometry::{Point, Rect, Vector};
use crate::marker::{marker_path, MarkerPath, CURVE_TOLERANCE};
use crate::style::{FillStyle, FontStyle, LineStyle, PointStyle};

/// One scoped override, as pushed by the `with_*` operations
#[derive(Debug, Clone)]
pub enum ScopeFrame {
    /// Isolate everything, the current path included
    Local,
    SourceColor(Color),
    Font(FontStyle),
    Fill(FillStyle),
    Line(LineStyle),
    /// Intersect the clip with this rectangle (user space)
    Clip(Rect),
    Environment(RenderEnvironment),
}

impl ScopeFrame {
    pub fn kind(&self) -> ScopeKind {
        match self {
            ScopeFrame::Local => ScopeKind::Local,
            ScopeFrame::SourceColor(_) => ScopeKind::SourceColor,
            ScopeFrame::Font(_) => ScopeKind::Font,
            ScopeFrame::Fill(_) => ScopeKind::Fill,
            ScopeFrame::Line(_) => ScopeKind::Line,
            ScopeFrame::Clip(_) => ScopeKind::Clip,
            ScopeFrame::Environment(_) => ScopeKind::Environment,
        }
    }
}

/// Which kind of scope was entered or left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Local,
    SourceColor,
    Font,
    Fill,
    Line,
    Clip,
    Environment,
}

/// A clip rectangle after mapping through the transform active when it
/// was set; rotation turns it into a general quadrilateral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    pub corners: [Point; 4],
}

impl ClipRegion {
    fn from_rect(rect: Rect, transform: Affine) -> Self {
        let corners = rect
            .corners()
            .map(|c| Point::from(transform * kurbo::Point::from(c)));
        Self { corners }
    }

    /// Closed outline of the region
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (i, c) in self.corners.iter().enumerate() {
            if i == 0 {
                path.move_to(kurbo::Point::from(*c));
            } else {
                path.line_to(kurbo::Point::from(*c));
            }
        }
        path.close_path();
        path
    }

    /// Axis-aligned bounds of the region
    pub fn bounds(&self) -> Rect {
        let xs = self.corners.map(|c| c.x);
        let ys = self.corners.map(|c| c.y);
        let min = |v: [f64; 4]| v.into_iter().fold(f64::INFINITY, f64::min);
        let max = |v: [f64; 4]| v.into_iter().fold(f64::NEG_INFINITY, f64::max);
        Rect::from_corners(Point::new(min(xs), min(ys)), Point::new(max(xs), max(ys)))
    }
}

/// Everything a scope saves and restores
#[derive(Debug, Clone)]
struct GraphicsState {
    transform: Affine,
    line_style: LineStyle,
    fill_style: FillStyle,
    font_style: FontStyle,
    // Set when the style came from an active with_*_style scope
    line_explicit: bool,
    fill_explicit: bool,
    font_explicit: bool,
    source_color: Option<Color>,
    clip: Vec<ClipRegion>,
    environment: RenderEnvironment,
}

/// The path under construction
#[derive(Debug, Clone, Default)]
struct PathState {
    path: BezPath,
    open: bool,
    current: Option<kurbo::Point>,
    subpath_start: Option<kurbo::Point>,
}

#[derive(Debug)]
struct SavedScope {
    kind: ScopeKind,
    graphics: GraphicsState,
    // Only local scopes restore the path
    path: Option<PathState>,
}

/// Path, transform, style, clip and environment tracking for one session
#[derive(Debug)]
pub struct DrawState {
    graphics: GraphicsState,
    path: PathState,
    saved: Vec<SavedScope>,
}

impl DrawState {
    /// Fresh state: identity transform, default styles, no clip
    pub fn new(environment: RenderEnvironment) -> Self {
        Self {
            graphics: GraphicsState {
                transform: Affine::IDENTITY,
                line_style: LineStyle::default(),
                fill_style: FillStyle::default(),
                font_style: FontStyle::default(),
                line_explicit: false,
                fill_explicit: false,
                font_explicit: false,
                source_color: None,
                clip: Vec::new(),
                environment,
            },
            path: PathState::default(),
            saved: Vec::new(),
        }
    }

    // Read what's active

    pub fn environment(&self) -> &RenderEnvironment {
        &self.graphics.environment
    }

    pub fn transform(&self) -> Affine {
        self.graphics.transform
    }

    pub fn line_style(&self) -> &LineStyle {
        &self.graphics.line_style
    }

    pub fn fill_style(&self) -> &FillStyle {
        &self.graphics.fill_style
    }

    pub fn font_style(&self) -> &FontStyle {
        &self.graphics.font_style
    }

    pub fn source_color(&self) -> Option<Color> {
        self.graphics.source_color
    }

    pub fn clip_regions(&self) -> &[ClipRegion] {
        &self.graphics.clip
    }

    /// Number of scopes currently open
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn has_open_path(&self) -> bool {
        self.path.open
    }

    /// Current point in device space, if the path has one
    pub fn current_point(&self) -> Option<Point> {
        self.path.current.map(Point::from)
    }

    // Colour resolution: an explicitly scoped style beats the source
    // colour, which beats the default style

    pub fn stroke_color(&self) -> Color {
        resolve(
            self.graphics.line_explicit,
            self.graphics.line_style.color,
            self.graphics.source_color,
        )
    }

    pub fn fill_color(&self) -> Color {
        resolve(
            self.graphics.fill_explicit,
            self.graphics.fill_style.color(),
            self.graphics.source_color,
        )
    }

    pub fn text_color(&self) -> Color {
        resolve(
            self.graphics.font_explicit,
            self.graphics.font_style.color,
            self.graphics.source_color,
        )
    }

    /// The active line style with its colour resolved for stroking
    pub fn resolved_line_style(&self) -> LineStyle {
        LineStyle {
            color: self.stroke_color(),
            ..self.graphics.line_style.clone()
        }
    }

    /// The active font style with its colour resolved for text
    pub fn resolved_font_style(&self) -> FontStyle {
        FontStyle {
            color: self.text_color(),
            ..self.graphics.font_style.clone()
        }
    }

    // Scopes

    /// Save the state and apply `frame`
    ///
    /// Styles are validated first; an invalid style leaves the state
    /// untouched and opens no scope.
    pub fn enter(&mut self, frame: ScopeFrame) -> Result<()> {
        match &frame {
            ScopeFrame::Line(style) => style.validate()?,
            ScopeFrame::Font(style) => style.validate()?,
            ScopeFrame::Clip(rect) => {
                if !rect.origin.is_finite()
                    || !rect.size.width.is_finite()
                    || !rect.size.height.is_finite()
                {
                    return Err(StyleError::NonFinite("clip rectangle").into());
                }
            },
            _ => {},
        }

        let kind = frame.kind();
        self.saved.push(SavedScope {
            kind,
            graphics: self.graphics.clone(),
            path: matches!(kind, ScopeKind::Local).then(|| self.path.clone()),
        });

        let gs = &mut self.graphics;
        match frame {
            ScopeFrame::Local => {},
            ScopeFrame::SourceColor(color) => gs.source_color = Some(color),
            ScopeFrame::Font(style) => {
                gs.font_style = style;
                gs.font_explicit = true;
            },
            ScopeFrame::Fill(style) => {
                gs.fill_style = style;
                gs.fill_explicit = true;
            },
            ScopeFrame::Line(style) => {
                gs.line_style = style;
                gs.line_explicit = true;
            },
            ScopeFrame::Clip(rect) => {
                let region = ClipRegion::from_rect(rect, gs.transform);
                gs.clip.push(region);
            },
            ScopeFrame::Environment(env) => gs.environment = env,
        }

        log::trace!("enter {:?} scope (depth {})", kind, self.saved.len());
        Ok(())
    }

    /// Restore the state saved by the matching [`DrawState::enter`]
    pub fn exit(&mut self) -> Result<ScopeKind> {
        let saved = self.saved.pop().ok_or(DrawError::ScopeUnderflow)?;
        self.graphics = saved.graphics;
        if let Some(path) = saved.path {
            self.path = path;
        }
        log::trace!("exit {:?} scope (depth {})", saved.kind, self.saved.len());
        Ok(saved.kind)
    }

    // Path construction

    pub fn new_path(&mut self) {
        self.path = PathState {
            open: true,
            ..PathState::default()
        };
    }

    pub fn close_path(&mut self) -> Result<()> {
        self.require_open()?;
        if let Some(start) = self.path.subpath_start {
            self.path.path.close_path();
            self.path.current = Some(start);
        }
        Ok(())
    }

    pub fn move_to(&mut self, p: Point) -> Result<()> {
        self.require_open()?;
        let device = self.map_coord(p)?;
        self.path.path.move_to(device);
        self.path.current = Some(device);
        self.path.subpath_start = Some(device);
        Ok(())
    }

    /// Extends the path; acts as `move_to` when there is no current point
    pub fn line_to(&mut self, p: Point) -> Result<()> {
        self.require_open()?;
        if self.path.current.is_none() {
            return self.move_to(p);
        }
        let device = self.map_coord(p)?;
        self.path.path.line_to(device);
        self.path.current = Some(device);
        Ok(())
    }

    /// Offsets are rotated with the transform but never aligned
    pub fn relative_line_to(&mut self, delta: Vector) -> Result<()> {
        self.require_open()?;
        if !delta.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite offset {:?}",
                delta
            )));
        }
        let current = self.path.current.ok_or(DrawError::NoCurrentPoint)?;
        let offset = self.map_offset(delta);
        let device = current + offset;
        self.path.path.line_to(device);
        self.path.current = Some(device);
        Ok(())
    }

    /// Arc swept with increasing angle
    pub fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()> {
        self.append_arc(center, radius, start, end, false)
    }

    /// Arc swept with decreasing angle
    pub fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()> {
        self.append_arc(center, radius, start, end, true)
    }

    fn append_arc(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        negative: bool,
    ) -> Result<()> {
        self.require_open()?;
        if !radius.is_finite() {
            return Err(StyleError::NonFinite("arc radius").into());
        }
        if radius < 0.0 {
            return Err(StyleError::NegativeRadius(radius).into());
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite arc angles {start}..{end}"
            )));
        }

        let sweep = capped_sweep(normalize_end_angle(start, end, negative) - start);
        let end = start + sweep;
        let center = self.aligned(center)?;
        let arc = kurbo::Arc {
            center: center.into(),
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };

        let transform = self.graphics.transform;
        let on_circle = |angle: f64| {
            transform
                * kurbo::Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
        };
        let arc_start = on_circle(start);
        if self.path.current.is_some() {
            self.path.path.line_to(arc_start);
        } else {
            self.path.path.move_to(arc_start);
            self.path.subpath_start = Some(arc_start);
        }
        for el in arc.append_iter(CURVE_TOLERANCE) {
            self.path.path.push(transform * el);
        }
        self.path.current = Some(on_circle(end));
        Ok(())
    }

    // Transform

    pub fn translate(&mut self, delta: Vector) -> Result<()> {
        if !delta.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite translation {:?}",
                delta
            )));
        }
        self.graphics.transform = self.graphics.transform * Affine::translate(Vec2::from(delta));
        Ok(())
    }

    pub fn rotate(&mut self, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite rotation {angle}"
            )));
        }
        self.graphics.transform = self.graphics.transform * Affine::rotate(angle);
        Ok(())
    }

    // Consuming the path

    /// Hand the path to a consuming paint operation and return to idle
    pub fn take_path(&mut self) -> Result<BezPath> {
        self.require_open()?;
        let path = std::mem::take(&mut self.path).path;
        Ok(path)
    }

    /// Borrow the path for a preserving paint operation
    pub fn path(&self) -> Result<&BezPath> {
        self.require_open()?;
        Ok(&self.path.path)
    }

    // Markers

    /// Device-space outline of a marker at `position`
    ///
    /// The position goes through `point_align`, not `coord_align`.
    pub fn marker(&self, style: &PointStyle, position: Point) -> Result<MarkerPath> {
        style.validate()?;
        if !position.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite marker position {:?}",
                position
            )));
        }
        let center = self.graphics.environment.align_point(position);
        let mut marker = marker_path(style.shape, center, style.radius);
        marker.path.apply_affine(self.graphics.transform);
        Ok(marker)
    }

    fn require_open(&self) -> Result<()> {
        if self.path.open {
            Ok(())
        } else {
            Err(DrawError::NoCurrentPath)
        }
    }

    fn aligned(&self, p: Point) -> Result<Point> {
        if !p.is_finite() {
            return Err(DrawError::InvalidArgument(format!(
                "non-finite coordinate {:?}",
                p
            )));
        }
        Ok(self.graphics.environment.align_coord(p))
    }

    fn map_coord(&self, p: Point) -> Result<kurbo::Point> {
        let aligned = self.aligned(p)?;
        Ok(self.graphics.transform * kurbo::Point::from(aligned))
    }

    fn map_offset(&self, delta: Vector) -> Vec2 {
        let t = self.graphics.transform;
        let tip = t * kurbo::Point::new(delta.dx, delta.dy);
        let origin = t * kurbo::Point::ORIGIN;
        tip - origin
    }
}

fn resolve(explicit: bool, style_color: Color, source: Option<Color>) -> Color {
    if explicit {
        style_color
    } else {
        source.unwrap_or(style_color)
    }
}

/// Move `end` by whole turns so the sweep runs in the requested direction
/// Extra turns retrace the same circle; keep one full turn plus the remainder
fn capped_sweep(sweep: f64) -> f64 {
    let magnitude = sweep.abs();
    if magnitude <= TAU {
        return sweep;
    }
    (TAU + magnitude.rem_euclid(TAU)).copysign(sweep)
}

fn normalize_end_angle(start: f64, end: f64, negative: bool) -> f64 {
    if !negative && end < start {
        let turns = ((start - end) / TAU).ceil();
        let mut end = end + turns * TAU;
        if end < start {
            end += TAU;
        }
        end
    } else if negative && end > start {
        let turns = ((end - start) / TAU).ceil();
        let mut end = end - turns * TAU;
        if end > start {
            end -= TAU;
        }
        end
    } else {
        end
    }
}

/// Segment endpoints of a path, for tests and debugging
pub fn path_points(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(Point::from(*p)),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(Point::from(*p)),
            PathEl::ClosePath => None,
        })
        .collect()
}
