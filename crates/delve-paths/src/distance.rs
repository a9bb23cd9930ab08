use delve_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance: the number of 8-way steps between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Cheapest cost between two points on an open 8-way grid where a straight
/// step costs `cardinal` and a diagonal step costs `diagonal`.
///
/// Admissible as long as `diagonal <= 2 * cardinal` and no step costs less
/// than its base weight.
#[inline]
pub fn octile(a: Point, b: Point, cardinal: i32, diagonal: i32) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    let straight = dx.max(dy) - diag;
    diag * diagonal + straight * cardinal
}
