//! Line, fill, font and point styles
//!
//! Every draw call is parameterized by one of these. They are plain data:
//! construction never fails and never checks anything. Call
//! [`LineStyle::validate`] and friends when you want to fail fast; the
//! backend operations that consume a style run the same checks at the
//! call site.

use serde::{Deserialize, Serialize};

use crate::color::{Color, BLACK, WHITE};
use crate::error::StyleError;

/// How the ends of open strokes are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// How stroke segments meet at corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Everything a stroke needs to know
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
    pub color: Color,
    /// Alternating dash/gap lengths; empty means a solid line
    pub dashes: Vec<f64>,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl LineStyle {
    /// A solid line with butt caps and miter joins
    pub fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dashes: Vec::new(),
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }

    /// A dashed line with butt caps and miter joins
    pub fn dashed(width: f64, color: Color, dashes: Vec<f64>) -> Self {
        Self {
            dashes,
            ..Self::solid(width, color)
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.width.is_finite() {
            return Err(StyleError::NonFinite("line width"));
        }
        if self.width < 0.0 {
            return Err(StyleError::NegativeWidth(self.width));
        }
        for &dash in &self.dashes {
            if !dash.is_finite() {
                return Err(StyleError::NonFinite("dash length"));
            }
            if dash < 0.0 {
                return Err(StyleError::NegativeDash(dash));
            }
        }
        Ok(())
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(1.0, BLACK)
    }
}

/// How areas are painted
///
/// Only solid fills exist today; gradients and patterns would join as
/// further variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FillStyle {
    Solid(Color),
}

impl FillStyle {
    pub const fn solid(color: Color) -> Self {
        FillStyle::Solid(color)
    }

    /// The colour this fill paints with
    pub fn color(&self) -> Color {
        match self {
            FillStyle::Solid(c) => *c,
        }
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Solid(WHITE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Which font to draw text with, and in what colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    /// Family name, or a generic family such as `sans-serif`
    pub name: String,
    pub size: f64,
    pub slant: FontSlant,
    pub weight: FontWeight,
    pub color: Color,
}

impl FontStyle {
    pub fn new(name: impl Into<String>, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_slant(mut self, slant: FontSlant) -> Self {
        self.slant = slant;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.size.is_finite() {
            return Err(StyleError::NonFinite("font size"));
        }
        if self.size <= 0.0 {
            return Err(StyleError::NonPositiveFontSize(self.size));
        }
        Ok(())
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            name: "sans-serif".to_string(),
            size: 10.0,
            slant: FontSlant::Normal,
            weight: FontWeight::Normal,
            color: BLACK,
        }
    }
}

/// Metrics of the active font, as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FontExtents {
    /// Distance from the baseline to the top of the tallest glyphs
    pub ascent: f64,
    /// Distance from the baseline down to the lowest glyphs (positive)
    pub descent: f64,
    /// Recommended baseline-to-baseline distance
    pub height: f64,
    pub max_x_advance: f64,
    pub max_y_advance: f64,
}

/// Measured extents of one line of text
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Marker outlines for scatter points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointShape {
    Circle,
    /// Regular polygon; with `pointing_up` a vertex sits straight above the centre
    Polygon { vertices: u32, pointing_up: bool },
    Plus,
    Cross,
    Star,
}

impl PointShape {
    /// Closed shapes are filled before their border is stroked
    pub fn is_closed(&self) -> bool {
        matches!(self, PointShape::Circle | PointShape::Polygon { .. })
    }
}

/// How a single data point is marked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub radius: f64,
    pub shape: PointShape,
}

impl PointStyle {
    /// A filled circle with a border
    pub fn filled(radius: f64, fill_color: Color, border_width: f64, border_color: Color) -> Self {
        Self {
            fill_color,
            border_color,
            border_width,
            radius,
            shape: PointShape::Circle,
        }
    }

    /// A circle outline with a transparent interior
    pub fn hollow(radius: f64, border_width: f64, color: Color) -> Self {
        Self::filled(radius, crate::color::TRANSPARENT, border_width, color)
    }

    /// A filled regular polygon
    pub fn polygon(
        radius: f64,
        vertices: u32,
        pointing_up: bool,
        fill_color: Color,
        border_width: f64,
        border_color: Color,
    ) -> Self {
        Self {
            shape: PointShape::Polygon {
                vertices,
                pointing_up,
            },
            ..Self::filled(radius, fill_color, border_width, border_color)
        }
    }

    pub fn plusses(radius: f64, width: f64, color: Color) -> Self {
        Self {
            shape: PointShape::Plus,
            ..Self::hollow(radius, width, color)
        }
    }

    pub fn exes(radius: f64, width: f64, color: Color) -> Self {
        Self {
            shape: PointShape::Cross,
            ..Self::hollow(radius, width, color)
        }
    }

    pub fn stars(radius: f64, width: f64, color: Color) -> Self {
        Self {
            shape: PointShape::Star,
            ..Self::hollow(radius, width, color)
        }
    }

    pub fn validate(&self) -> Result<(), StyleError> {
        if !self.radius.is_finite() {
            return Err(StyleError::NonFinite("point radius"));
        }
        if self.radius < 0.0 {
            return Err(StyleError::NegativeRadius(self.radius));
        }
        if !self.border_width.is_finite() {
            return Err(StyleError::NonFinite("border width"));
        }
        if self.border_width < 0.0 {
            return Err(StyleError::NegativeWidth(self.border_width));
        }
        if let PointShape::Polygon { vertices, .. } = self.shape {
            if vertices < 3 {
                return Err(StyleError::TooFewVertices(vertices));
            }
        }
        Ok(())
    }

    /// The line style used for the marker border
    pub fn border_line(&self) -> LineStyle {
        LineStyle::solid(self.border_width, self.border_color)
    }
}

impl Default for PointStyle {
    fn default() -> Self {
        Self::filled(1.0, BLACK, 0.0, BLACK)
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HTextAnchor {
    Left,
    Centre,
    Right,
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VTextAnchor {
    Top,
    Centre,
    Bottom,
    Baseline,
}
