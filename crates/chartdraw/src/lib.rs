// this_file: crates/chartdraw/src/lib.rs

//! chartdraw - Backend-agnostic drawing for charts
//!
//! Chart code talks to one [`Backend`](chartdraw_core::Backend) interface:
//! paths, transforms, scoped styles and clips, anchored text and point
//! markers. What comes out depends on which backend runs the session:
//!
//! - `render-skia`: anti-aliased pixels via tiny-skia, PNG export
//! - `render-svg`: a standalone SVG document
//! - `render-json`: a structured recording of every paint operation
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chartdraw::prelude::*;
//! use chartdraw::fontdb::FontBook;
//! use chartdraw::render_skia::{RasterOptions, SkiaBackend};
//!
//! let fonts = Arc::new(FontBook::system());
//! let backend = SkiaBackend::new(RasterOptions::new(200, 100), fonts)?;
//! let image = run_backend(backend, |b| {
//!     b.with_fill_style(FillStyle::solid(RED), |b| {
//!         b.new_path()?;
//!         b.arc(Point::new(50.0, 50.0), 20.0, 0.0, std::f64::consts::TAU)?;
//!         b.fill()
//!     })?;
//!     draw_text(b, HTextAnchor::Centre, VTextAnchor::Top, Point::new(100.0, 10.0), "Title")
//! })?;
//! image.save_png("chart.png")?;
//! ```
//!
//! # Feature Flags
//!
//! - `fontdb`: system font discovery and measurement
//! - `render-skia`, `render-svg`, `render-json`: the backends above
//! - `minimal`: core only, for custom backends
//! - `full`: everything

pub use chartdraw_core::{
    color, drawing, environment, error, geometry, kurbo, marker, state, style, text, traits,
};

#[cfg(feature = "fontdb")]
pub use chartdraw_fontdb as fontdb;

#[cfg(feature = "render-json")]
pub use chartdraw_render_json as render_json;

#[cfg(feature = "render-skia")]
pub use chartdraw_render_skia as render_skia;

#[cfg(feature = "render-svg")]
pub use chartdraw_render_svg as render_svg;

/// Names of the backends compiled into this build
pub fn available_backends() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut names = Vec::new();
    #[cfg(feature = "render-skia")]
    names.push("skia");
    #[cfg(feature = "render-svg")]
    names.push("svg");
    #[cfg(feature = "render-json")]
    names.push("json");
    names
}

/// Common imports for typical usage
pub mod prelude {
    pub use chartdraw_core::{
        draw_text, draw_text_rotated, fill_rect, run_backend, stroke_polyline, stroke_rect,
        text_rect, Backend, Color, DrawError, FillStyle, FontProvider, FontSlant, FontStyle,
        FontWeight, HTextAnchor, LineCap, LineJoin, LineStyle, Point, PointShape, PointStyle,
        Rect, RenderEnvironment, Result, Size, VTextAnchor, Vector, BLACK, BLUE, GREEN, GREY,
        RED, TRANSPARENT, WHITE,
    };
}
