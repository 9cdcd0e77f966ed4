use galaxy_core::Point;

/// Planar Euclidean distance between two embedding positions.
#[must_use]
pub fn euclidean(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
