//! Pure 2D geometry helpers for marker quadrilaterals.

use nalgebra::{Point2, Vector2};

/// Area and apparent width of a detected marker quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadMetrics {
    /// Product of the two adjacent edge lengths, pixels².
    pub area: f64,
    /// Length of the `corners[1] -> corners[2]` edge, pixels.
    pub width: f64,
}

/// Compute area and width of a marker quadrilateral from its four corners.
///
/// The edge `corners[0] -> corners[1]` is taken as the height, the adjacent
/// edge `corners[1] -> corners[2]` as the width, and the area is their
/// product. Corner ordering is the caller's responsibility. A degenerate
/// (collinear or zero-length) quad yields zero area and falls out at the
/// caller's area threshold.
pub fn quad_metrics(corners: &[Point2<f64>; 4]) -> QuadMetrics {
    let height = (corners[0] - corners[1]).norm();
    let width = (corners[1] - corners[2]).norm();
    QuadMetrics {
        area: height * width,
        width,
    }
}

/// Coordinate-wise mean of the four corners.
pub fn quad_center(corners: &[Point2<f64>; 4]) -> Point2<f64> {
    let sum: Vector2<f64> = corners.iter().map(|c| c.coords).sum();
    Point2::from(sum / 4.0)
}
