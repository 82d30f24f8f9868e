//! Upright and rotated rectangles in pixel coordinates.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a frame or mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with integer origin and extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top_left(&self) -> Point2<i32> {
        Point2::new(self.x, self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: Point2<i32>) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    /// Clip the rectangle into `[0, bounds]`: the origin is clamped per axis
    /// and the extents are shrunk so the rectangle never exceeds `bounds`.
    /// A rectangle entirely outside the bounds collapses to an empty one.
    pub fn clamped_to(&self, bounds: Size) -> Rect {
        let mut r = *self;
        r.x = r.x.clamp(0, bounds.width);
        r.y = r.y.clamp(0, bounds.height);
        if r.x + r.width > bounds.width {
            r.width = bounds.width - r.x;
        }
        if r.y + r.height > bounds.height {
            r.height = bounds.height - r.y;
        }
        r.width = r.width.max(0);
        r.height = r.height.max(0);
        r
    }

    /// Resize about the rectangle's own center by per-axis factors.
    /// A factor of 1.0 is a no-op; factors below one shrink, above one grow.
    pub fn scaled(&self, width_factor: f64, height_factor: f64) -> Rect {
        let dw = self.width as f64 * (width_factor - 1.0);
        let dh = self.height as f64 * (height_factor - 1.0);
        Rect {
            x: self.x - (dw / 2.0).round() as i32,
            y: self.y - (dh / 2.0).round() as i32,
            width: (self.width as f64 * width_factor).round() as i32,
            height: (self.height as f64 * height_factor).round() as i32,
        }
    }
}

/// Minimum-area rectangle of a contour: center, extents and the orientation
/// of the `width` edge, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl RotatedRect {
    /// Reconstruct the rectangle from four corners in edge order
    /// (consecutive corners share an edge).
    pub fn from_corners(corners: &[Point2<f64>; 4]) -> Self {
        let center = Point2::new(
            corners.iter().map(|c| c.x).sum::<f64>() / 4.0,
            corners.iter().map(|c| c.y).sum::<f64>() / 4.0,
        );
        let ex = corners[1] - corners[0];
        let ey = corners[2] - corners[1];
        Self {
            center,
            width: ex.norm(),
            height: ey.norm(),
            angle: ex.y.atan2(ex.x),
        }
    }

    /// The four corners in edge order.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let ux = (cos * self.width / 2.0, sin * self.width / 2.0);
        let uy = (-sin * self.height / 2.0, cos * self.height / 2.0);
        let c = self.center;
        [
            Point2::new(c.x - ux.0 - uy.0, c.y - ux.1 - uy.1),
            Point2::new(c.x + ux.0 - uy.0, c.y + ux.1 - uy.1),
            Point2::new(c.x + ux.0 + uy.0, c.y + ux.1 + uy.1),
            Point2::new(c.x - ux.0 + uy.0, c.y - ux.1 + uy.1),
        ]
    }

    /// Upright bounding rectangle covering every pixel touched by the
    /// rotated rectangle (inclusive of the far corner's pixel row/column).
    pub fn bounding_rect(&self) -> Rect {
        let corners = self.corners();
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for c in &corners {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        let x = min_x.floor() as i32;
        let y = min_y.floor() as i32;
        Rect {
            x,
            y,
            width: max_x.ceil() as i32 - x + 1,
            height: max_y.ceil() as i32 - y + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_moves_negative_origin() {
        let r = Rect::new(-5, -3, 20, 10).clamped_to(Size::new(100, 50));
        assert_eq!(r, Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn clamp_shrinks_overflowing_extent() {
        let r = Rect::new(90, 45, 20, 10).clamped_to(Size::new(100, 50));
        assert_eq!(r, Rect::new(90, 45, 10, 5));
    }

    #[test]
    fn clamp_collapses_fully_outside_rect() {
        let r = Rect::new(120, 60, 20, 10).clamped_to(Size::new(100, 50));
        assert!(r.is_empty());
    }

    #[test]
    fn scale_identity_is_noop() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.scaled(1.0, 1.0), r);
    }

    #[test]
    fn scale_grows_about_center() {
        let r = Rect::new(10, 10, 20, 10).scaled(2.0, 2.0);
        assert_eq!(r, Rect::new(0, 5, 40, 20));
    }

    #[test]
    fn scale_shrinks_about_center() {
        let r = Rect::new(0, 0, 40, 20).scaled(0.5, 0.5);
        assert_eq!(r, Rect::new(10, 5, 20, 10));
    }

    #[test]
    fn rotated_rect_roundtrips_through_corners() {
        let rect = RotatedRect {
            center: Point2::new(50.0, 40.0),
            width: 20.0,
            height: 10.0,
            angle: 0.3,
        };
        let back = RotatedRect::from_corners(&rect.corners());
        assert!((back.center - rect.center).norm() < 1e-9);
        assert!((back.width - rect.width).abs() < 1e-9);
        assert!((back.height - rect.height).abs() < 1e-9);
        assert!((back.angle - rect.angle).abs() < 1e-9);
    }

    #[test]
    fn axis_aligned_bounding_rect_covers_far_pixels() {
        let rect = RotatedRect {
            center: Point2::new(5.0, 5.0),
            width: 10.0,
            height: 10.0,
            angle: 0.0,
        };
        assert_eq!(rect.bounding_rect(), Rect::new(0, 0, 11, 11));
    }
}
