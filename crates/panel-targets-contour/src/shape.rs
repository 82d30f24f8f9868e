//! Minimum-area rectangles and the standardized shape feature derived
//! from them.

use imageproc::geometry::min_area_rect;
use imageproc::point::Point as IpPoint;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use panel_targets_core::RotatedRect;

/// Minimum-area rotated rectangle of a point set (rotating calipers over
/// the convex hull). Degenerate sets (fewer than three points, or a zero
/// width/height spread) fall back to the axis-aligned bounding box.
pub fn min_area_rotated_rect(points: &[Point2<i32>]) -> RotatedRect {
    if points.is_empty() {
        return RotatedRect {
            center: Point2::new(0.0, 0.0),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
        };
    }

    let (mut min_x, mut min_y) = (points[0].x, points[0].y);
    let (mut max_x, mut max_y) = (min_x, min_y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    if points.len() < 3 || min_x == max_x || min_y == max_y {
        return RotatedRect {
            center: Point2::new(
                (min_x + max_x) as f64 / 2.0,
                (min_y + max_y) as f64 / 2.0,
            ),
            width: (max_x - min_x) as f64,
            height: (max_y - min_y) as f64,
            angle: 0.0,
        };
    }

    let raw: Vec<IpPoint<i32>> = points.iter().map(|p| IpPoint::new(p.x, p.y)).collect();
    let corners = min_area_rect(&raw);
    let corners = [
        Point2::new(corners[0].x as f64, corners[0].y as f64),
        Point2::new(corners[1].x as f64, corners[1].y as f64),
        Point2::new(corners[2].x as f64, corners[2].y as f64),
        Point2::new(corners[3].x as f64, corners[3].y as f64),
    ];
    RotatedRect::from_corners(&corners)
}

/// Standardized descriptor of a minimum-area rectangle.
///
/// Detection treats this as an opaque, comparable per-element payload; the
/// fields are normalized so two rectangles of the same physical shape
/// compare equal regardless of corner ordering or 90-degree flips.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RectFeature {
    pub long_side: f64,
    pub short_side: f64,
    pub aspect: f64,
    /// Orientation of the long side, folded into `[0, 90)` degrees.
    pub angle_deg: f64,
}

impl RectFeature {
    pub fn standardize(rect: &RotatedRect) -> Self {
        let long_side = rect.width.max(rect.height);
        let short_side = rect.width.min(rect.height);
        let aspect = if short_side > 0.0 {
            long_side / short_side
        } else {
            0.0
        };

        let mut angle_deg = if rect.width >= rect.height {
            rect.angle.to_degrees()
        } else {
            rect.angle.to_degrees() + 90.0
        };
        angle_deg = angle_deg.rem_euclid(180.0);
        if angle_deg >= 90.0 {
            angle_deg -= 90.0;
        }

        Self {
            long_side,
            short_side,
            aspect,
            angle_deg,
        }
    }
}
