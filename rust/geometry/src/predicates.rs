// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D geometric predicates
//!
//! Orientation, segment intersection, point-in-polygon, winding and
//! collinearity tests shared by every stage of the sector pipeline.
//! All functions are pure and work on `f64` points.

use std::f64::consts::{PI, TAU};

use crate::Point2;

/// Relative tolerance for "lies on this segment" tests.
const TOUCH_TOLERANCE: f64 = 1e-9;

/// Twice the signed area of triangle (a, b, c).
///
/// Positive when `c` lies counter-clockwise of the directed segment a→b.
#[inline]
pub fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (c.y - a.y) * (b.x - a.x) - (b.y - a.y) * (c.x - a.x)
}

/// True if `c` is strictly counter-clockwise of a→b.
#[inline]
pub fn ccw(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    orientation(a, b, c) > 0.0
}

/// Segment AB crosses segment CD.
///
/// Uses differing orientation tests on both segment pairs. Collinear points
/// count as "not counter-clockwise", so a segment ending exactly on the other
/// is treated with a half-open rule; ray casting relies on this.
#[inline]
pub fn segments_intersect(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Segment AB and CD cross at a single point interior to both.
#[inline]
pub fn segments_cross_properly(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

/// `p` lies on segment AB, strictly between its endpoints.
#[inline]
pub fn touches_segment(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> bool {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return false;
    }
    if orientation(a, b, p).abs() > TOUCH_TOLERANCE * len_sq {
        return false;
    }
    let t = (p - a).dot(&ab) / len_sq;
    t > 0.0 && t < 1.0
}

/// Chord AB meets edge CD: a proper crossing, or an endpoint of CD lying on
/// the chord's interior.
///
/// This is the stricter variant used when testing a candidate chord against a
/// polygon's own edges, where a vertex grazing the chord must also block it.
#[inline]
pub fn chord_meets_edge(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
    d: Point2<f64>,
) -> bool {
    segments_cross_properly(a, b, c, d) || touches_segment(c, a, b) || touches_segment(d, a, b)
}

/// Ray-casting point-in-polygon test.
///
/// Casts a ray from `point` to a spot left of the polygon's bounds and counts
/// crossings with the polygon's edges; odd parity means inside. With
/// `ignore_touching`, a point coinciding with any polygon vertex is outside.
pub fn point_in_polygon(point: Point2<f64>, polygon: &[Point2<f64>], ignore_touching: bool) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    if ignore_touching && polygon.iter().any(|p| *p == point) {
        return false;
    }

    let min_x = polygon.iter().fold(point.x, |acc, p| acc.min(p.x));
    let left = Point2::new(min_x - 1.0, point.y);

    let mut crossings = 0usize;
    for i in 0..n {
        let j = (i + 1) % n;
        if segments_intersect(left, point, polygon[i], polygon[j]) {
            crossings += 1;
        }
    }

    crossings % 2 == 1
}

/// Signed area via the shoelace formula. Negative for clockwise loops.
pub fn signed_area(polygon: &[Point2<f64>]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        let p = polygon[i];
        let q = polygon[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum * 0.5
}

/// Clockwise by the signed-area convention (area <= 0).
#[inline]
pub fn is_clockwise(polygon: &[Point2<f64>]) -> bool {
    signed_area(polygon) <= 0.0
}

/// Direction angle of a→b in radians.
#[inline]
pub fn line_angle(a: Point2<f64>, b: Point2<f64>) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Absolute difference between two direction angles, wrapped into [0, π].
#[inline]
pub fn angle_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % TAU;
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// b lies on the straight path a→b→c, within `epsilon` radians.
#[inline]
pub fn collinear(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, epsilon: f64) -> bool {
    angle_difference(line_angle(a, b), line_angle(b, c)) < epsilon
}

/// Intersection of the infinite lines through p1p2 and p3p4.
pub fn line_intersection(
    p1: Point2<f64>,
    p2: Point2<f64>,
    p3: Point2<f64>,
    p4: Point2<f64>,
) -> Option<Point2<f64>> {
    let d12 = p2 - p1;
    let d34 = p4 - p3;

    let denominator = d12.y * d34.x - d12.x * d34.y;
    if denominator == 0.0 {
        return None;
    }

    let t = ((p1.x - p3.x) * d34.y + (p3.y - p1.y) * d34.x) / denominator;
    Some(p1 + d12 * t)
}

/// `p` strictly inside triangle (a, b, c), of either winding.
pub fn point_in_triangle(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    let d1 = orientation(a, b, p);
    let d2 = orientation(b, c, p);
    let d3 = orientation(c, a, p);
    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Convexity class of a closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convexity {
    /// Every turn goes the same way, loop wound clockwise.
    ConvexClockwise,
    /// Every turn goes the same way, loop wound counter-clockwise.
    ConvexCounterClockwise,
    Concave,
    /// No turn at all (every point collinear).
    Degenerate,
}

/// Classify a loop by the sign of its turns.
///
/// Zero turns are ignored, so collinear runs do not make a loop concave.
pub fn convexity(points: &[Point2<f64>]) -> Convexity {
    let n = points.len();
    let mut got_negative = false;
    let mut got_positive = false;

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];

        // Z of (A - B) x (C - B): positive for a clockwise turn at B
        let ba = a - b;
        let bc = c - b;
        let cross = ba.x * bc.y - ba.y * bc.x;

        if cross < 0.0 {
            got_negative = true;
        } else if cross > 0.0 {
            got_positive = true;
        }
        if got_negative && got_positive {
            return Convexity::Concave;
        }
    }

    match (got_positive, got_negative) {
        (true, false) => Convexity::ConvexClockwise,
        (false, true) => Convexity::ConvexCounterClockwise,
        _ => Convexity::Degenerate,
    }
}

/// Index of the vertex with the largest x (first one on ties).
pub fn rightmost_vertex(polygon: &[Point2<f64>]) -> usize {
    let mut best = 0;
    for (i, p) in polygon.iter().enumerate().skip(1) {
        if p.x > polygon[best].x {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_ccw() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_orientation_sign() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert!(ccw(a, b, Point2::new(0.5, 1.0)));
        assert!(!ccw(a, b, Point2::new(0.5, -1.0)));
        assert!(!ccw(a, b, Point2::new(2.0, 0.0)));
        assert_relative_eq!(orientation(a, b, Point2::new(0.0, 2.0)), 2.0);
    }

    #[test]
    fn test_segments_intersect() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 10.0);
        assert!(segments_intersect(a, b, Point2::new(0.0, 10.0), Point2::new(10.0, 0.0)));
        assert!(!segments_intersect(a, b, Point2::new(20.0, 0.0), Point2::new(30.0, 5.0)));
        // Parallel
        assert!(!segments_intersect(a, b, Point2::new(0.0, 1.0), Point2::new(10.0, 11.0)));
    }

    #[test]
    fn test_proper_crossing_excludes_shared_endpoints() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        assert!(!segments_cross_properly(a, b, b, Point2::new(10.0, 10.0)));
        assert!(segments_cross_properly(a, b, Point2::new(5.0, -5.0), Point2::new(5.0, 5.0)));
    }

    #[test]
    fn test_chord_meets_edge_on_touch() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        // Edge ends exactly on the chord
        assert!(chord_meets_edge(a, b, Point2::new(5.0, 0.0), Point2::new(5.0, 5.0)));
        // Edge ends on the chord's endpoint only
        assert!(!chord_meets_edge(a, b, b, Point2::new(5.0, 5.0)));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = square_ccw();
        assert!(point_in_polygon(Point2::new(5.0, 5.0), &square, false));
        assert!(!point_in_polygon(Point2::new(15.0, 5.0), &square, false));
        assert!(!point_in_polygon(Point2::new(-1.0, 5.0), &square, false));
        // Ray passes exactly through a vertex height
        assert!(point_in_polygon(Point2::new(5.0, 10.0 - 1e-9), &square, false));
    }

    #[test]
    fn test_point_in_polygon_far_from_origin() {
        let square: Vec<_> = square_ccw()
            .into_iter()
            .map(|p| Point2::new(p.x - 30000.0, p.y + 30000.0))
            .collect();
        assert!(point_in_polygon(Point2::new(-29995.0, 30005.0), &square, false));
    }

    #[test]
    fn test_point_in_polygon_ignore_touching() {
        let square = square_ccw();
        let corner = Point2::new(10.0, 10.0);
        assert!(!point_in_polygon(corner, &square, true));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 30.0),
            Point2::new(20.0, 30.0),
            Point2::new(20.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 30.0),
            Point2::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(Point2::new(5.0, 20.0), &u, false));
        assert!(!point_in_polygon(Point2::new(15.0, 20.0), &u, false));
        assert!(point_in_polygon(Point2::new(25.0, 20.0), &u, false));
    }

    #[test]
    fn test_signed_area_and_winding() {
        let square = square_ccw();
        assert_relative_eq!(signed_area(&square), 100.0);
        assert!(!is_clockwise(&square));

        let mut reversed = square;
        reversed.reverse();
        assert_relative_eq!(signed_area(&reversed), -100.0);
        assert!(is_clockwise(&reversed));
    }

    #[test]
    fn test_collinear() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(5.0, 0.0);
        assert!(collinear(a, b, Point2::new(10.0, 0.0), 0.05));
        assert!(collinear(a, b, Point2::new(10.0, 0.1), 0.05));
        assert!(!collinear(a, b, Point2::new(10.0, 5.0), 0.05));
        // A reversal is not a straight line
        assert!(!collinear(a, b, Point2::new(1.0, 0.0), 0.05));
    }

    #[test]
    fn test_collinear_across_angle_wrap() {
        // Heading in -x, just above and just below the ±π seam
        let a = Point2::new(10.0, 0.0);
        let b = Point2::new(5.0, 0.01);
        let c = Point2::new(0.0, 0.0);
        assert!(collinear(a, b, c, 0.05));
    }

    #[test]
    fn test_line_intersection() {
        let p = line_intersection(
            Point2::new(0.0, 5.0),
            Point2::new(100.0, 5.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        )
        .unwrap();
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 5.0);

        assert!(line_intersection(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn test_point_in_triangle_is_strict() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(0.0, 10.0);
        assert!(point_in_triangle(Point2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Point2::new(2.0, 2.0), a, c, b));
        assert!(!point_in_triangle(Point2::new(5.0, 0.0), a, b, c));
        assert!(!point_in_triangle(Point2::new(8.0, 8.0), a, b, c));
    }

    #[test]
    fn test_convexity() {
        let square = square_ccw();
        assert_eq!(convexity(&square), Convexity::ConvexCounterClockwise);

        let mut cw = square.clone();
        cw.reverse();
        assert_eq!(convexity(&cw), Convexity::ConvexClockwise);

        let arrow = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(0.0, 10.0),
            Point2::new(3.0, 5.0),
        ];
        assert_eq!(convexity(&arrow), Convexity::Concave);

        let line = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(convexity(&line), Convexity::Degenerate);
    }

    #[test]
    fn test_rightmost_vertex_prefers_first() {
        let square = square_ccw();
        assert_eq!(rightmost_vertex(&square), 1);
    }
}
