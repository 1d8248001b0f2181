// this_file: backends/chartdraw-render-json/src/lib.rs

//! JSON Recorder - When you need to see what the chart really drew
//!
//! Pixels hide mistakes: a label one unit off or a stroke in the wrong
//! colour is hard to spot in a PNG. This backend draws nothing. It records
//! every paint operation with its device-space geometry and the colour and
//! style it resolved to, so tests and tools can inspect the output
//! directly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use chartdraw_core::{
    error::{RenderError, Result},
    kurbo::{self, BezPath, PathEl},
    Backend, Color, DrawState, FontExtents, FontProvider, FontStyle, LineStyle, Point,
    PointShape, PointStyle, RenderEnvironment, ScopeFrame, TextSize, Vector,
};

/// Schema version for the recording format
pub const JSON_SCHEMA_VERSION: &str = "1.0";

/// One path element in device space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

impl Segment {
    /// Where the segment ends, if it moves the pen
    pub fn end(&self) -> Option<Point> {
        match self {
            Segment::MoveTo(p) | Segment::LineTo(p) => Some(*p),
            Segment::QuadTo(_, p) | Segment::CurveTo(_, _, p) => Some(*p),
            Segment::Close => None,
        }
    }
}

/// A device-space path as a list of segments
pub type PathRecord = Vec<Segment>;

fn record_path(path: &BezPath) -> PathRecord {
    path.elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => Segment::MoveTo(p.into()),
            PathEl::LineTo(p) => Segment::LineTo(p.into()),
            PathEl::QuadTo(c, p) => Segment::QuadTo(c.into(), p.into()),
            PathEl::CurveTo(c0, c1, p) => Segment::CurveTo(c0.into(), c1.into(), p.into()),
            PathEl::ClosePath => Segment::Close,
        })
        .collect()
}

/// A recorded paint operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Stroke {
        path: PathRecord,
        /// Line style with its colour already resolved
        style: LineStyle,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        clip: Vec<[Point; 4]>,
    },
    Fill {
        path: PathRecord,
        color: Color,
        /// True for `fill_preserve`
        preserve: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        clip: Vec<[Point; 4]>,
    },
    Paint {
        color: Color,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        clip: Vec<[Point; 4]>,
    },
    Text {
        text: String,
        /// Font style with its colour already resolved
        font: FontStyle,
        /// Affine coefficients `[a, b, c, d, e, f]` mapping the text's
        /// baseline-left origin into device space
        transform: [f64; 6],
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        clip: Vec<[Point; 4]>,
    },
    Marker {
        shape: PointShape,
        /// Aligned, transformed centre
        center: Point,
        radius: f64,
        path: PathRecord,
        /// Present for closed shapes
        fill: Option<Color>,
        /// Absent when the border width is zero
        border: Option<LineStyle>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        clip: Vec<[Point; 4]>,
    },
}

/// Everything a session drew, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Schema version for forward compatibility
    pub schema_version: String,
    pub commands: Vec<DrawCommand>,
}

impl Recording {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RenderError::Encoding(e.to_string()).into())
    }

    /// Parse a recording produced by [`Recording::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::Encoding(e.to_string()).into())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The backend that turns draw calls into data
pub struct RecordingBackend {
    state: DrawState,
    fonts: Arc<dyn FontProvider>,
    commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    /// Records in user space: the identity environment, no snapping
    pub fn new(fonts: Arc<dyn FontProvider>) -> Self {
        Self::with_base_environment(fonts, RenderEnvironment::identity())
    }

    /// Records with a different outermost environment, e.g. to check
    /// what a raster surface would receive
    pub fn with_base_environment(fonts: Arc<dyn FontProvider>, env: RenderEnvironment) -> Self {
        log::debug!(
            "RecordingBackend: new session ({} environment, {} fonts)",
            env.label(),
            fonts.name()
        );
        Self {
            state: DrawState::new(env),
            fonts,
            commands: Vec::new(),
        }
    }

    /// The live drawing state, for inspection between calls
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Commands recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    fn clip(&self) -> Vec<[Point; 4]> {
        self.state.clip_regions().iter().map(|r| r.corners).collect()
    }
}

impl Backend for RecordingBackend {
    type Output = Recording;

    fn name(&self) -> &'static str {
        "json"
    }

    fn environment(&self) -> &RenderEnvironment {
        self.state.environment()
    }

    fn new_path(&mut self) -> Result<()> {
        self.state.new_path();
        Ok(())
    }

    fn close_path(&mut self) -> Result<()> {
        self.state.close_path()
    }

    fn move_to(&mut self, p: Point) -> Result<()> {
        self.state.move_to(p)
    }

    fn line_to(&mut self, p: Point) -> Result<()> {
        self.state.line_to(p)
    }

    fn relative_line_to(&mut self, delta: Vector) -> Result<()> {
        self.state.relative_line_to(delta)
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()> {
        self.state.arc(center, radius, start, end)
    }

    fn arc_negative(&mut self, center: Point, radius: f64, start: f64, end: f64) -> Result<()> {
        self.state.arc_negative(center, radius, start, end)
    }

    fn translate(&mut self, delta: Vector) -> Result<()> {
        self.state.translate(delta)
    }

    fn rotate(&mut self, angle: f64) -> Result<()> {
        self.state.rotate(angle)
    }

    fn stroke(&mut self) -> Result<()> {
        let path = self.state.take_path()?;
        let command = DrawCommand::Stroke {
            path: record_path(&path),
            style: self.state.resolved_line_style(),
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        let path = self.state.take_path()?;
        let command = DrawCommand::Fill {
            path: record_path(&path),
            color: self.state.fill_color(),
            preserve: false,
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn fill_preserve(&mut self) -> Result<()> {
        let path = record_path(self.state.path()?);
        let command = DrawCommand::Fill {
            path,
            color: self.state.fill_color(),
            preserve: true,
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn paint(&mut self) -> Result<()> {
        let command = DrawCommand::Paint {
            color: self.state.fill_color(),
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn enter_scope(&mut self, frame: ScopeFrame) -> Result<()> {
        self.state.enter(frame)
    }

    fn exit_scope(&mut self) -> Result<()> {
        self.state.exit().map(|_| ())
    }

    fn scope_depth(&self) -> usize {
        self.state.depth()
    }

    fn text_size(&mut self, text: &str) -> Result<TextSize> {
        self.fonts.text_size(self.state.font_style(), text)
    }

    fn font_extents(&mut self) -> Result<FontExtents> {
        self.fonts.font_extents(self.state.font_style())
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        // An unavailable font fails here exactly as it would on a raster surface
        self.fonts.font_extents(self.state.font_style())?;
        let command = DrawCommand::Text {
            text: text.to_string(),
            font: self.state.resolved_font_style(),
            transform: self.state.transform().as_coeffs(),
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn draw_point(&mut self, style: &PointStyle, position: Point) -> Result<()> {
        let marker = self.state.marker(style, position)?;
        let center = self.state.environment().align_point(position);
        let center = Point::from(self.state.transform() * kurbo::Point::from(center));
        let command = DrawCommand::Marker {
            shape: style.shape,
            center,
            radius: style.radius,
            path: record_path(&marker.path),
            fill: marker.closed.then_some(style.fill_color),
            border: (style.border_width > 0.0).then(|| style.border_line()),
            clip: self.clip(),
        };
        self.commands.push(command);
        Ok(())
    }

    fn finish(self) -> Result<Recording> {
        log::debug!(
            "RecordingBackend: finished with {} commands",
            self.commands.len()
        );
        Ok(Recording {
            schema_version: JSON_SCHEMA_VERSION.to_string(),
            commands: self.commands,
        })
    }
}
