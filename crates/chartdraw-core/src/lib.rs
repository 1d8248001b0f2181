// this_file: crates/chartdraw-core/src/lib.rs

//! Chartdraw Core: one drawing vocabulary, any surface
//!
//! Chart layout code wants to say "stroke this line in red, put this
//! label centred above that point" without caring whether the result ends
//! up as pixels, an SVG file or a list of recorded commands. This crate
//! holds the contract that makes that possible.
//!
//! ## The Pieces
//!
//! - [`geometry`] and [`style`] - plain value types every call is
//!   parameterized by: points, rectangles, line/fill/font/point styles,
//!   text anchors
//! - [`environment`] - the alignment functions applied to coordinates
//!   just before they reach a surface
//! - [`Backend`] - the capability interface a surface implements
//! - [`drawing`] - operations derived from the interface: anchored text,
//!   [`run_backend`]
//! - [`DrawState`] - bookkeeping a backend can embed so it only has to
//!   deal with its own output format
//!
//! ## Scopes
//!
//! Style, clip, transform and environment changes only happen inside
//! scopes. Every `with_*` operation runs a closure and restores the outer
//! state when the closure returns, whether it returned `Ok` or `Err`:
//!
//! ```rust,ignore
//! use chartdraw_core::{Backend, FillStyle, Point, RED};
//!
//! backend.with_fill_style(FillStyle::solid(RED), |b| {
//!     b.new_path()?;
//!     b.arc(Point::new(5.0, 5.0), 5.0, 0.0, std::f64::consts::TAU)?;
//!     b.fill()
//! })?;
//! ```
//!
//! ## Colour precedence
//!
//! When a stroke, fill or text is drawn, its colour comes from the style
//! of the matching kind if one was set by an active `with_*_style` scope,
//! otherwise from the innermost `with_source_color`, otherwise from the
//! default style.
//!
//! ## Paths
//!
//! `stroke` and `fill` consume the current path; `fill_preserve` is the
//! only paint operation that keeps it. Path construction requires an
//! open path (`new_path`), and misuse is reported as
//! [`DrawError::NoCurrentPath`].

pub mod color;
pub mod drawing;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod marker;
pub mod state;
pub mod style;
pub mod text;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use color::{Color, BLACK, BLUE, GREEN, GREY, RED, TRANSPARENT, WHITE};
pub use drawing::{
    draw_text, draw_text_rotated, fill_rect, run_backend, stroke_polyline, stroke_rect, text_rect,
};
pub use environment::RenderEnvironment;
pub use error::{DrawError, FontError, RenderError, Result, StyleError};
pub use geometry::{Point, Rect, Size, Vector};
pub use state::{ClipRegion, DrawState, ScopeFrame, ScopeKind};
pub use style::{
    FillStyle, FontExtents, FontSlant, FontStyle, FontWeight, HTextAnchor, LineCap, LineJoin,
    LineStyle, PointShape, PointStyle, TextSize, VTextAnchor,
};
pub use traits::{Backend, FontProvider};

/// Re-exported so backends and tests agree on the path type
pub use kurbo;
