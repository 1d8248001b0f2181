//! The render environment: alignment applied just before drawing
//!
//! Raster surfaces look crisper when strokes and markers land on the
//! pixel grid; vector surfaces want coordinates untouched. The
//! environment carries both adjustments so layout code never has to know
//! which kind of surface it is talking to.

use std::fmt;
use std::sync::Arc;

use crate::geometry::Point;

/// A pure, total point adjustment
pub type AlignFn = Arc<dyn Fn(Point) -> Point + Send + Sync>;

/// Alignment functions active for a rendering session
///
/// Cloning is cheap. An environment is never mutated; a nested scope
/// replaces it with a new value (see `Backend::with_environment`).
#[derive(Clone)]
pub struct RenderEnvironment {
    point_align: AlignFn,
    coord_align: AlignFn,
    label: &'static str,
}

impl RenderEnvironment {
    /// Custom alignment functions
    pub fn new<P, C>(point_align: P, coord_align: C) -> Self
    where
        P: Fn(Point) -> Point + Send + Sync + 'static,
        C: Fn(Point) -> Point + Send + Sync + 'static,
    {
        Self {
            point_align: Arc::new(point_align),
            coord_align: Arc::new(coord_align),
            label: "custom",
        }
    }

    /// Leaves every coordinate untouched
    pub fn identity() -> Self {
        Self {
            point_align: Arc::new(|p| p),
            coord_align: Arc::new(|p| p),
            label: "identity",
        }
    }

    /// Snaps markers to pixel centres and path coordinates to pixel edges
    ///
    /// A 1-unit stroke centred on a pixel centre covers exactly one pixel
    /// column; path corners on integer coordinates keep fills crisp.
    pub fn pixel_grid() -> Self {
        Self {
            point_align: Arc::new(|p: Point| Point::new(p.x.floor() + 0.5, p.y.floor() + 0.5)),
            coord_align: Arc::new(|p: Point| Point::new(p.x.round(), p.y.round())),
            label: "pixel-grid",
        }
    }

    /// Adjust a marker position
    pub fn align_point(&self, p: Point) -> Point {
        (self.point_align)(p)
    }

    /// Adjust a path coordinate
    pub fn align_coord(&self, p: Point) -> Point {
        (self.coord_align)(p)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Default for RenderEnvironment {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for RenderEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnvironment")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_leaves_points() {
        let env = RenderEnvironment::identity();
        let p = Point::new(1.25, -3.75);
        assert_eq!(env.align_point(p), p);
        assert_eq!(env.align_coord(p), p);
    }

    #[test]
    fn test_pixel_grid_values() {
        let env = RenderEnvironment::pixel_grid();
        assert_eq!(env.align_point(Point::new(0.0, 0.0)), Point::new(0.5, 0.5));
        assert_eq!(env.align_point(Point::new(3.9, -0.2)), Point::new(3.5, -0.5));
        assert_eq!(env.align_coord(Point::new(3.4, 3.6)), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_pixel_grid_is_idempotent() {
        let env = RenderEnvironment::pixel_grid();
        let samples = [
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(-7.3, 12.51),
            Point::new(1e6 + 0.49, -1e6 - 0.5),
        ];
        for p in samples {
            let once = env.align_point(p);
            assert_eq!(env.align_point(once), once);
            let once = env.align_coord(p);
            assert_eq!(env.align_coord(once), once);
        }
    }

    #[test]
    fn test_custom_environment() {
        let env = RenderEnvironment::new(|p| Point::new(p.x * 2.0, p.y), |p| p);
        assert_eq!(env.align_point(Point::new(1.0, 1.0)), Point::new(2.0, 1.0));
        assert_eq!(env.label(), "custom");
    }
}
