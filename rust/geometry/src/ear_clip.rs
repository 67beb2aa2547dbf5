// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ear-clipping triangulation of simple polygons
//!
//! Convex polygons are fanned from their first vertex. Everything else goes
//! through a guarded ear search that tolerates the zero-width seams left by
//! hole bridging: coincident vertices are never treated as blocking an ear.
//!
//! Output triangles are always wound clockwise.

use crate::config::{ClipPolicy, TriangulationConfig};
use crate::error::{Error, Result};
use crate::predicates::{
    convexity, is_clockwise, orientation, point_in_triangle, segments_cross_properly,
    segments_intersect, touches_segment, Convexity,
};
use crate::Point2;

/// Triangulate a simple polygon into a flat list of index triples.
///
/// A polygon of `n` points yields `n - 2` triangles unless clipping runs out
/// of attempts under [`ClipPolicy::BestEffort`], in which case the triangles
/// found so far are returned.
pub fn ear_clip(points: &[Point2<f64>], config: &TriangulationConfig) -> Result<Vec<usize>> {
    let n = points.len();
    if n < 3 {
        return Err(Error::DegenerateLoop { points: n });
    }

    let clockwise = match convexity(points) {
        Convexity::ConvexClockwise => return Ok(fan(n, true)),
        Convexity::ConvexCounterClockwise => return Ok(fan(n, false)),
        Convexity::Degenerate => return Err(Error::DegenerateLoop { points: n }),
        Convexity::Concave => is_clockwise(points),
    };

    let mut ring = Ring::new(points);
    let mut indices = Vec::with_capacity((n - 2) * 3);
    let mut current = 0;
    let mut attempts = 0usize;
    let mut misses_in_a_row = 0usize;
    let mut complete = true;

    while ring.len > 3 {
        let a = current;
        let b = ring.next[a];
        let c = ring.next[b];

        if ring.is_ear(a, b, c, clockwise) {
            indices.extend_from_slice(&[a, b, c]);
            ring.remove(b);
            misses_in_a_row = 0;
            continue;
        }

        attempts += 1;
        misses_in_a_row += 1;
        // A full lap without an ear means none will ever be found
        if attempts >= config.max_clip_attempts || misses_in_a_row > ring.len {
            let triangles = indices.len() / 3;
            match config.clip_policy {
                ClipPolicy::Strict => {
                    return Err(Error::ClipOverrun {
                        limit: config.max_clip_attempts,
                        triangles,
                        expected: n - 2,
                    });
                }
                ClipPolicy::BestEffort => {
                    tracing::warn!(
                        triangles,
                        expected = n - 2,
                        attempts,
                        "ear clipping gave up, keeping partial triangulation"
                    );
                    complete = false;
                    break;
                }
            }
        }
        current = b;
    }

    if complete {
        let b = ring.next[current];
        let c = ring.next[b];
        indices.extend_from_slice(&[current, b, c]);
    }

    if !clockwise {
        indices.reverse();
    }
    Ok(indices)
}

/// Fan from vertex 0, flipped to clockwise if needed.
fn fan(n: usize, clockwise: bool) -> Vec<usize> {
    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }
    if !clockwise {
        indices.reverse();
    }
    indices
}

/// Doubly linked ring over the polygon's points; clipped vertices are
/// unlinked.
struct Ring<'a> {
    points: &'a [Point2<f64>],
    next: Vec<usize>,
    prev: Vec<usize>,
    len: usize,
    /// X coordinate left of every point, start of inside-test rays.
    left: f64,
}

impl<'a> Ring<'a> {
    fn new(points: &'a [Point2<f64>]) -> Self {
        let n = points.len();
        let left = points.iter().fold(f64::INFINITY, |acc, p| acc.min(p.x)) - 1.0;
        Self {
            points,
            next: (0..n).map(|i| (i + 1) % n).collect(),
            prev: (0..n).map(|i| (i + n - 1) % n).collect(),
            len: n,
            left,
        }
    }

    fn remove(&mut self, i: usize) {
        let (p, n) = (self.prev[i], self.next[i]);
        self.next[p] = n;
        self.prev[n] = p;
        self.len -= 1;
    }

    /// Remaining vertices, starting at `start`.
    fn walk(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(start), move |&i| {
            let next = self.next[i];
            (next != start).then_some(next)
        })
    }

    /// Remaining edges as point pairs.
    fn edges(&self, start: usize) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.walk(start)
            .map(move |i| (self.points[i], self.points[self.next[i]]))
    }

    fn is_ear(&self, ia: usize, ib: usize, ic: usize, clockwise: bool) -> bool {
        let (a, b, c) = (self.points[ia], self.points[ib], self.points[ic]);

        // Must turn the same way as the polygon, which also rules out
        // collinear triples. Exact sign, not an angle tolerance: nearly
        // straight ears are allowed.
        let turn = orientation(a, b, c);
        if (clockwise && turn >= 0.0) || (!clockwise && turn <= 0.0) {
            return false;
        }

        // No other remaining vertex inside the triangle or on the chord.
        // Copies of a corner (bridge seams) are skipped.
        for k in self.walk(self.next[ic]) {
            if k == ia {
                break;
            }
            let p = self.points[k];
            if p == a || p == b || p == c {
                continue;
            }
            if point_in_triangle(p, a, b, c) || touches_segment(p, a, c) {
                return false;
            }
        }

        // The chord may not cross any remaining edge
        let crosses = self.edges(ia).any(|(p, q)| {
            p != a && p != c && q != a && q != c && segments_cross_properly(a, c, p, q)
        });
        if crosses {
            return false;
        }

        // Its midpoint must be inside the remaining polygon
        let mid = Point2::new((a.x + c.x) * 0.5, (a.y + c.y) * 0.5);
        let ray_start = Point2::new(self.left, mid.y);
        let crossings = self
            .edges(ia)
            .filter(|&(p, q)| segments_intersect(ray_start, mid, p, q))
            .count();
        crossings % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::signed_area;
    use approx::assert_relative_eq;

    fn triangle_area(points: &[Point2<f64>], t: &[usize]) -> f64 {
        orientation(points[t[0]], points[t[1]], points[t[2]]) * 0.5
    }

    fn check(points: &[Point2<f64>]) -> Vec<usize> {
        let indices = ear_clip(points, &TriangulationConfig::default()).unwrap();
        assert_eq!(indices.len(), (points.len() - 2) * 3);

        let mut total = 0.0;
        for t in indices.chunks(3) {
            let area = triangle_area(points, t);
            // Clockwise and non-degenerate
            assert!(area < 0.0, "triangle {:?} has area {}", t, area);
            total += area.abs();
        }
        assert_relative_eq!(total, signed_area(points).abs(), epsilon = 1e-6);
        indices
    }

    #[test]
    fn test_convex_square_clockwise() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
        ];
        assert_eq!(check(&points), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_convex_square_counter_clockwise() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        check(&points);
    }

    #[test]
    fn test_concave_l_shape() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 20.0),
            Point2::new(10.0, 20.0),
            Point2::new(10.0, 10.0),
            Point2::new(20.0, 10.0),
            Point2::new(20.0, 0.0),
        ];
        check(&points);
    }

    #[test]
    fn test_concave_comb_counter_clockwise() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 30.0),
            Point2::new(40.0, 30.0),
            Point2::new(40.0, 10.0),
            Point2::new(30.0, 10.0),
            Point2::new(30.0, 30.0),
            Point2::new(20.0, 30.0),
            Point2::new(20.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 30.0),
            Point2::new(0.0, 30.0),
        ];
        check(&points);
    }

    #[test]
    fn test_keyhole_seam() {
        // Square ring welded at (64, 64)-(48, 48)
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 64.0),
            Point2::new(64.0, 64.0),
            Point2::new(48.0, 48.0),
            Point2::new(16.0, 48.0),
            Point2::new(16.0, 16.0),
            Point2::new(48.0, 16.0),
            Point2::new(48.0, 48.0),
            Point2::new(64.0, 64.0),
            Point2::new(64.0, 0.0),
        ];
        let indices = ear_clip(&points, &TriangulationConfig::default()).unwrap();
        assert_eq!(indices.len(), 8 * 3);
        assert!(indices.chunks(3).all(|t| triangle_area(&points, t) < 0.0));
        let total: f64 = indices
            .chunks(3)
            .map(|t| triangle_area(&points, t).abs())
            .sum();
        assert_relative_eq!(total, 64.0 * 64.0 - 32.0 * 32.0, epsilon = 1e-6);
    }

    #[test]
    fn test_too_few_points() {
        let err = ear_clip(&[Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)], &Default::default())
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateLoop { points: 2 }));
    }

    #[test]
    fn test_flat_polygon_is_degenerate() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let err = ear_clip(&points, &Default::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateLoop { points: 3 }));
    }

    fn bow_tie() -> Vec<Point2<f64>> {
        // Self-intersecting: no valid ear sequence exists
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 2.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_overrun_best_effort_is_partial() {
        let indices = ear_clip(&bow_tie(), &TriangulationConfig::default()).unwrap();
        assert!(indices.len() < 3 * 3);
        assert_eq!(indices.len() % 3, 0);
    }

    #[test]
    fn test_overrun_strict_fails() {
        let config = TriangulationConfig::default().strict();
        let err = ear_clip(&bow_tie(), &config).unwrap_err();
        assert!(matches!(err, Error::ClipOverrun { expected: 3, .. }));
        assert!(err.is_overrun());
    }
}
