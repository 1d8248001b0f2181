// this_file: backends/chartdraw-render-skia/src/lib.rs

//! Skia Backend - Where charts become pixels
//!
//! This backend paints straight into a `tiny_skia::Pixmap`. Path geometry,
//! transforms, styles and scopes are tracked by [`DrawState`]; this crate
//! only turns finished device-space paths into pixels.
//!
//! ## Pixel alignment
//!
//! Raster output defaults to [`RenderEnvironment::pixel_grid`]: path
//! coordinates snap to whole pixels and point markers to pixel centres, so
//! a one-pixel line lands on exactly one row of pixels instead of smearing
//! across two.
//!
//! ## Text
//!
//! Text is drawn as filled glyph outlines fetched from the
//! [`FontProvider`], so a provider without outline support can measure
//! text but not draw it.

mod convert;

use std::path::Path;
use std::sync::Arc;

use tiny_skia::{FillRule, Mask, Pixmap, Transform};

use chartdraw_core::{
    error::{RenderError, Result},
    Backend, Color, DrawState, FontExtents, FontProvider, LineStyle, Point, PointStyle,
    RenderEnvironment, ScopeFrame, ScopeKind, TextSize, Vector, WHITE,
};

use convert::{paint_for, stroke_for, to_skia_path};

/// Surface configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    /// Painted over the whole surface before drawing starts; `None` leaves
    /// it transparent
    pub background: Option<Color>,
    pub anti_alias: bool,
}

impl RasterOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Some(WHITE),
            anti_alias: true,
        }
    }
}

/// The finished image
pub struct RasterOutput {
    pub pixmap: Pixmap,
}

impl RasterOutput {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encoding(e.to_string()).into())
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Raster drawing session
pub struct SkiaBackend {
    options: RasterOptions,
    state: DrawState,
    fonts: Arc<dyn FontProvider>,
    pixmap: Pixmap,
    // Intersection of all active clip regions; None means unclipped
    clip_mask: Option<Mask>,
}

impl SkiaBackend {
    /// Creates a pixel-aligned surface
    pub fn new(options: RasterOptions, fonts: Arc<dyn FontProvider>) -> Result<Self> {
        Self::with_base_environment(options, fonts, RenderEnvironment::pixel_grid())
    }

    /// Creates a surface with a different outermost environment
    pub fn with_base_environment(
        options: RasterOptions,
        fonts: Arc<dyn FontProvider>,
        env: RenderEnvironment,
    ) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(options.width, options.height).ok_or(RenderError::SurfaceAllocation {
                width: options.width,
                height: options.height,
            })?;
        if let Some(background) = options.background {
            let [r, g, b, a] = background.to_rgba8();
            pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        }
        log::debug!(
            "Skia: new {}x{} surface ({} environment, {} fonts)",
            options.width,
            options.height,
            env.label(),
            fonts.name()
        );
        Ok(Self {
            options,
            state: DrawState::new(env),
            fonts,
            pixmap,
            clip_mask: None,
        })
    }

    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    fn rebuild_clip_mask(&mut self) -> Result<()> {
        let regions = self.state.clip_regions();
        if regions.is_empty() {
            self.clip_mask = None;
            return Ok(());
        }
        let mut mask = Mask::new(self.options.width, self.options.height).ok_or(
            RenderError::SurfaceAllocation {
                width: self.options.width,
                height: self.options.height,
            },
        )?;
        for (i, region) in regions.iter().enumerate() {
            let Some(path) = to_skia_path(&region.to_path()) else {
                // A degenerate region clips everything away
                mask = Mask::new(self.options.width, self.options.height).ok_or(
                    RenderError::SurfaceAllocation {
                        width: self.options.width,
                        height: self.options.height,
                    },
                )?;
                break;
            };
            if i == 0 {
                mask.fill_path(&path, FillRule::Winding, self.options.anti_alias, Transform::identity());
            } else {
                mask.intersect_path(&path, FillRule::Winding, self.options.anti_alias, Transform::identity());
            }
        }
        log::trace!("Skia: clip mask rebuilt from {} regions", regions.len());
        self.clip_mask = Some(mask);
        Ok(())
    }

    fn fill_device_path(&mut self, path: &kurbo::BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = paint_for(color, self.options.anti_alias);
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }

    fn stroke_device_path(&mut self, path: &kurbo::BezPath, style: &LineStyle) {
        // tiny-skia draws width 0 as a hairline; a zero-width line draws nothing
        if style.width <= 0.0 {
            return;
        }
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let paint = paint_for(style.color, self.options.anti_alias);
        let stroke = stroke_for(style);
        self.pixmap.stroke_path(
            &path,
            &paint,
            &stroke,
            Transform::identity(),
            self.clip_mask.as_ref(),
        );
    }
}

impl Backend for SkiaBackend {
    type Output = RasterOutput;

    fn name(&self) -> &'static str {
        "skia"
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
        self.stroke_device_path(&path, &style);
        Ok(())
    }

    fn fill(&mut self) -> Result<()> {
        let path = self.state.take_path()?;
        let color = self.state.fill_color();
        self.fill_device_path(&path, color);
        Ok(())
    }

    fn fill_preserve(&mut self) -> Result<()> {
        let path = self.state.path()?.clone();
        let color = self.state.fill_color();
        self.fill_device_path(&path, color);
        Ok(())
    }

    fn paint(&mut self) -> Result<()> {
        let rect = tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            self.options.width as f32,
            self.options.height as f32,
        )
        .ok_or(RenderError::PathBuilding)?;
        let paint = paint_for(self.state.fill_color(), self.options.anti_alias);
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), self.clip_mask.as_ref());
        Ok(())
    }

    fn enter_scope(&mut self, frame: ScopeFrame) -> Result<()> {
        let clips = frame.kind() == ScopeKind::Clip;
        self.state.enter(frame)?;
        if clips {
            if let Err(e) = self.rebuild_clip_mask() {
                // Keep the scope stack consistent with what the caller sees
                self.state.exit()?;
                return Err(e);
            }
        }
        Ok(())
    }

    fn exit_scope(&mut self) -> Result<()> {
        if self.state.exit()? == ScopeKind::Clip {
            self.rebuild_clip_mask()?;
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
        let font = self.state.resolved_font_style();
        let mut outline = self.fonts.text_outline(&font, text)?;
        outline.apply_affine(self.state.transform());
        self.fill_device_path(&outline, font.color);
        Ok(())
    }

    fn draw_point(&mut self, style: &PointStyle, position: Point) -> Result<()> {
        let marker = self.state.marker(style, position)?;
        if marker.closed {
            self.fill_device_path(&marker.path, style.fill_color);
        }
        self.stroke_device_path(&marker.path, &style.border_line());
        Ok(())
    }

    fn finish(self) -> Result<RasterOutput> {
        log::debug!(
            "Skia: finished {}x{} surface",
            self.pixmap.width(),
            self.pixmap.height()
        );
        Ok(RasterOutput {
            pixmap: self.pixmap,
        })
    }
}
