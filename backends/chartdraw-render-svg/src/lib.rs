// this_file: backends/chartdraw-render-svg/src/lib.rs

//! SVG Backend: where charts stay sharp at any zoom
//!
//! Every paint operation becomes one SVG element. Paths arrive from
//! [`DrawState`] already in device space, so elements carry no transforms
//! except `<text>`, which keeps its glyphs as live text and places them
//! with a `matrix(...)`.
//!
//! Clip scopes open a `<g clip-path="...">` group that closes when the
//! scope exits, so nested clips intersect the way SVG groups do.

mod markup;

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use chartdraw_core::{
    error::{RenderError, Result},
    Backend, Color, DrawState, FontExtents, FontProvider, LineStyle, Point, PointStyle,
    RenderEnvironment, ScopeFrame, ScopeKind, TextSize, Vector, WHITE,
};

use markup::{escape, font_attrs, num, paint_attrs, path_data, stroke_attrs};

/// Document configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    /// Decimal places for coordinates
    pub precision: usize,
    /// Background rectangle; `None` leaves the document transparent
    pub background: Option<Color>,
}

impl SvgOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            precision: 2,
            background: Some(WHITE),
        }
    }
}

/// SVG drawing session
pub struct SvgBackend {
    options: SvgOptions,
    state: DrawState,
    fonts: Arc<dyn FontProvider>,
    body: String,
    next_clip_id: usize,
    // Open clip groups; also the indent depth
    open_groups: usize,
}

impl SvgBackend {
    /// Creates a document in user-space coordinates (no alignment)
    pub fn new(options: SvgOptions, fonts: Arc<dyn FontProvider>) -> Self {
        Self::with_base_environment(options, fonts, RenderEnvironment::identity())
    }

    pub fn with_base_environment(
        options: SvgOptions,
        fonts: Arc<dyn FontProvider>,
        env: RenderEnvironment,
    ) -> Self {
        log::debug!(
            "SvgBackend: new {}x{} document ({} environment, {} fonts)",
            options.width,
            options.height,
            env.label(),
            fonts.name()
        );
        Self {
            options,
            state: DrawState::new(env),
            fonts,
            body: String::new(),
            next_clip_id: 0,
            open_groups: 0,
        }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Append one line of markup at the current nesting depth
    fn emit(&mut self, element: &str) -> Result<()> {
        let indent = "  ".repeat(self.open_groups + 1);
        writeln!(self.body, "{}{}", indent, element).map_err(|_| RenderError::PathBuilding)?;
        Ok(())
    }

    fn emit_path(&mut self, path: &kurbo::BezPath, paint: &str) -> Result<()> {
        if path.elements().is_empty() {
            return Ok(());
        }
        let d = path_data(path, self.options.precision);
        self.emit(&format!(r#"<path d="{}" {}/>"#, d, paint))
    }

    fn open_clip_group(&mut self) -> Result<()> {
        let Some(region) = self.state.clip_regions().last().copied() else {
            return Ok(());
        };
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        let d = path_data(&region.to_path(), self.options.precision);
        self.emit(&format!(
            r#"<clipPath id="{}"><path d="{}"/></clipPath>"#,
            id, d
        ))?;
        self.emit(&format!(r#"<g clip-path="url(#{})">"#, id))?;
        self.open_groups += 1;
        Ok(())
    }

    fn close_group(&mut self) -> Result<()> {
        self.open_groups = self.open_groups.saturating_sub(1);
        self.emit("</g>")
    }
}

impl Backend for SvgBackend {
    type Output = String;

    fn name(&self) -> &'static str {
        "svg"
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
        let style = self.state.resolved_line_style();
        if style.width <= 0.0 {
            return Ok(());
        }
        let paint = format!(
            r#"fill="none" {}"#,
            stroke_attrs(&style, self.options.precision)
        );
        self.emit_path(&path, &paint)
    }

    fn fill(&mut self) -> Result<()> {
        let path = self.state.take_path()?;
        let paint = paint_attrs("fill", self.state.fill_color());
        self.emit_path(&path, &paint)
    }

    fn fill_preserve(&mut self) -> Result<()> {
        let path = self.state.path()?.clone();
        let paint = paint_attrs("fill", self.state.fill_color());
        self.emit_path(&path, &paint)
    }

    fn paint(&mut self) -> Result<()> {
        let p = self.options.precision;
        let element = format!(
            r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
            num(self.options.width, p),
            num(self.options.height, p),
            paint_attrs("fill", self.state.fill_color())
        );
        self.emit(&element)
    }

    fn enter_scope(&mut self, frame: ScopeFrame) -> Result<()> {
        let clips = frame.kind() == ScopeKind::Clip;
        self.state.enter(frame)?;
        if clips {
            self.open_clip_group()?;
        }
        Ok(())
    }

    fn exit_scope(&mut self) -> Result<()> {
        if self.state.exit()? == ScopeKind::Clip {
            self.close_group()?;
        }
        Ok(())
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
        if text.is_empty() {
            return Ok(());
        }
        let p = self.options.precision;
        let font = self.state.resolved_font_style();
        // Rotation coefficients need more digits than coordinates
        let [a, b, c, d, e, f] = self.state.transform().as_coeffs();
        let r = p + 4;
        let element = format!(
            r#"<text transform="matrix({} {} {} {} {} {})" {}>{}</text>"#,
            num(a, r),
            num(b, r),
            num(c, r),
            num(d, r),
            num(e, p),
            num(f, p),
            font_attrs(&font, p),
            escape(text)
        );
        self.emit(&element)
    }

    fn draw_point(&mut self, style: &PointStyle, position: Point) -> Result<()> {
        let marker = self.state.marker(style, position)?;
        let fill = if marker.closed {
            paint_attrs("fill", style.fill_color)
        } else {
            r#"fill="none""#.to_string()
        };
        let paint = if style.border_width > 0.0 {
            let border: LineStyle = style.border_line();
            format!("{} {}", fill, stroke_attrs(&border, self.options.precision))
        } else {
            fill
        };
        self.emit_path(&marker.path, &paint)
    }

    fn finish(mut self) -> Result<String> {
        // A session finished with clip scopes still open still yields
        // well-formed markup
        while self.open_groups > 0 {
            self.close_group()?;
        }

        let p = self.options.precision;
        let (w, h) = (num(self.options.width, p), num(self.options.height, p));
        let mut svg = String::new();
        writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)
            .map_err(|_| RenderError::PathBuilding)?;
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )
        .map_err(|_| RenderError::PathBuilding)?;
        if let Some(background) = self.options.background {
            writeln!(
                svg,
                r#"  <rect width="100%" height="100%" {}/>"#,
                paint_attrs("fill", background)
            )
            .map_err(|_| RenderError::PathBuilding)?;
        }
        svg.push_str(&self.body);
        writeln!(svg, "</svg>").map_err(|_| RenderError::PathBuilding)?;

        log::debug!("SvgBackend: finished document ({} bytes)", svg.len());
        Ok(svg)
    }
}
