//! Outlines for point markers
//!
//! Every backend that implements `draw_point` needs the same shapes, so
//! the geometry lives here. Coordinates are y-down: "up" is negative y.

use std::f64::consts::{PI, SQRT_2};

use kurbo::{BezPath, Shape};

use crate::geometry::Point;
use crate::style::PointShape;

/// Accuracy used when flattening circles into cubic segments
pub const CURVE_TOLERANCE: f64 = 0.01;

/// A marker outline ready to paint
#[derive(Debug, Clone)]
pub struct MarkerPath {
    pub path: BezPath,
    /// Closed markers get filled before their border is stroked
    pub closed: bool,
}

/// Outline of `shape` with the given radius around `center`
///
/// Polygon vertex counts are not checked here; `PointStyle::validate`
/// rejects anything below three before a backend gets this far.
pub fn marker_path(shape: PointShape, center: Point, radius: f64) -> MarkerPath {
    let (x, y) = (center.x, center.y);
    let path = match shape {
        PointShape::Circle => kurbo::Circle::new((x, y), radius).to_path(CURVE_TOLERANCE),
        PointShape::Polygon {
            vertices,
            pointing_up,
        } => {
            let mut path = BezPath::new();
            let step = 2.0 * PI / vertices.max(1) as f64;
            let offset = if pointing_up { 0.0 } else { step / 2.0 };
            for n in 0..vertices {
                let theta = offset + step * n as f64;
                let vertex = (x + radius * theta.sin(), y - radius * theta.cos());
                if n == 0 {
                    path.move_to(vertex);
                } else {
                    path.line_to(vertex);
                }
            }
            path.close_path();
            path
        },
        PointShape::Plus => {
            let mut path = BezPath::new();
            push_plus(&mut path, x, y, radius);
            path
        },
        PointShape::Cross => {
            let mut path = BezPath::new();
            push_cross(&mut path, x, y, radius / SQRT_2);
            path
        },
        PointShape::Star => {
            let mut path = BezPath::new();
            push_plus(&mut path, x, y, radius);
            push_cross(&mut path, x, y, radius / SQRT_2);
            path
        },
    };
    MarkerPath {
        path,
        closed: shape.is_closed(),
    }
}

fn push_plus(path: &mut BezPath, x: f64, y: f64, r: f64) {
    path.move_to((x + r, y));
    path.line_to((x - r, y));
    path.move_to((x, y - r));
    path.line_to((x, y + r));
}

fn push_cross(path: &mut BezPath, x: f64, y: f64, d: f64) {
    path.move_to((x + d, y + d));
    path.line_to((x - d, y - d));
    path.move_to((x + d, y - d));
    path.line_to((x - d, y + d));
}
