//! Discrete polygon moments and the circularity score derived from them.

use nalgebra::Point2;

/// Errors from moment-based computations on degenerate input.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// The point set encloses no area (empty or collinear contour).
    #[error("degenerate contour: zero enclosed area")]
    DegenerateContour,
}

/// Raw polygon moments (m00, m10, m01) via Green's theorem.
///
/// The sign of m00 depends on winding order; callers that need an area take
/// the magnitude, callers that need a centroid divide it out.
fn polygon_moments(points: &[Point2<i32>]) -> (f64, f64, f64) {
    let n = points.len();
    let mut m00 = 0.0f64;
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = (p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64) as f64;
        m00 += cross;
        m10 += (p.x + q.x) as f64 * cross;
        m01 += (p.y + q.y) as f64 * cross;
    }
    (m00 / 2.0, m10 / 6.0, m01 / 6.0)
}

/// Enclosed area of a closed contour (shoelace magnitude, non-negative).
pub fn contour_area(points: &[Point2<i32>]) -> f64 {
    polygon_moments(points).0.abs()
}

/// Area-weighted centroid of a closed contour, rounded to the nearest
/// integer coordinate.
///
/// Fails on contours enclosing no area; upstream extraction is expected to
/// guard against passing degenerate input where a centroid is required.
pub fn contour_centroid(points: &[Point2<i32>]) -> Result<Point2<i32>, GeometryError> {
    let (m00, m10, m01) = polygon_moments(points);
    if m00 == 0.0 {
        return Err(GeometryError::DegenerateContour);
    }
    Ok(Point2::new(
        (m10 / m00).round() as i32,
        (m01 / m00).round() as i32,
    ))
}

/// Circularity score of a closed contour: the population standard deviation
/// of the squared point-to-centroid distances divided by their mean.
///
/// A sampled circle boundary scores near zero; elongated or irregular shapes
/// score higher. Lower is more circular; the score is not bounded to [0, 1].
pub fn circularity_deviation(points: &[Point2<i32>]) -> Result<f64, GeometryError> {
    let center = contour_centroid(points)?;
    let n = points.len() as f64;

    let mut mean = 0.0f64;
    for p in points {
        let dx = (p.x - center.x) as f64;
        let dy = (p.y - center.y) as f64;
        mean += dx * dx + dy * dy;
    }
    mean /= n;
    if mean == 0.0 {
        return Err(GeometryError::DegenerateContour);
    }

    let mut var = 0.0f64;
    for p in points {
        let dx = (p.x - center.x) as f64;
        let dy = (p.y - center.y) as f64;
        let d = dx * dx + dy * dy - mean;
        var += d * d;
    }
    Ok((var / n).sqrt() / mean)
}
