// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keyhole hole bridging
//!
//! Welds every hole of an island into its shell through a zero-width seam,
//! producing one simple polygon the ear clipper can handle directly.
//!
//! For each hole, rightmost first:
//! 1. cast a ray from the hole's rightmost vertex `M` toward +x
//! 2. take the nearest shell edge it hits, and that edge's rightmost endpoint
//! 3. while some shell edge blocks the segment from `M` to that point, move
//!    to the blocking edge's rightmost endpoint instead
//! 4. if earlier seams left several copies of that point, pick the copy
//!    whose corner opens toward `M`
//! 5. splice the hole in at that point, wound against the shell

use crate::config::TriangulationConfig;
use crate::error::{Error, Result};
use crate::island::Island;
use crate::predicates::{
    chord_meets_edge, is_clockwise, line_intersection, orientation, rightmost_vertex,
    segments_intersect,
};
use crate::Point2;

/// Merge an island's holes into its shell.
///
/// Returns the shell unchanged when there are no holes.
pub fn cut_island(island: Island, config: &TriangulationConfig) -> Result<Vec<Point2<f64>>> {
    let Island { mut shell, mut holes } = island;

    if holes.len() > config.max_bridges_per_island {
        return Err(Error::BridgeOverrun {
            limit: config.max_bridges_per_island,
        });
    }

    holes.sort_by(|a, b| rightmost_x(b).total_cmp(&rightmost_x(a)));

    for mut hole in holes {
        if hole.len() < 3 {
            continue;
        }

        let mut anchor = rightmost_vertex(&hole);
        if is_clockwise(&hole) == is_clockwise(&shell) {
            hole.reverse();
            anchor = hole.len() - 1 - anchor;
        }

        let m = hole[anchor];
        let hit = cast_ray(&shell, m).ok_or(Error::NoVisibleBridge { x: m.x, y: m.y })?;
        let bridge = visible_bridge(&shell, m, hit)?;
        let bridge = seam_side(&shell, bridge, m);

        shell = splice(&shell, bridge, &hole, anchor);
    }

    Ok(shell)
}

fn rightmost_x(points: &[Point2<f64>]) -> f64 {
    points
        .iter()
        .map(|p| p.x)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Shell vertex index where a ray from `m` toward +x first meets the shell.
///
/// A shell vertex lying exactly on the ray wins over an edge crossing at the
/// same distance. For a crossed edge, its endpoint with the larger x is
/// returned.
fn cast_ray(shell: &[Point2<f64>], m: Point2<f64>) -> Option<usize> {
    let n = shell.len();
    let reach = Point2::new(rightmost_x(shell).max(m.x) + 1.0, m.y);

    // (distance, vertex hit before edge hit, shell index)
    let mut best: Option<(f64, bool, usize)> = None;
    let mut consider = |distance: f64, on_vertex: bool, index: usize| {
        let better = match best {
            None => true,
            Some((d, v, _)) => distance < d || (distance == d && on_vertex && !v),
        };
        if better {
            best = Some((distance, on_vertex, index));
        }
    };

    for i in 0..n {
        let j = (i + 1) % n;
        let (a, b) = (shell[i], shell[j]);

        if a.y == m.y && a.x > m.x {
            consider(a.x - m.x, true, i);
            continue;
        }
        if a.x <= m.x && b.x <= m.x {
            continue;
        }
        if a.y == m.y || b.y == m.y {
            continue;
        }
        if segments_intersect(m, reach, a, b) {
            if let Some(hit) = line_intersection(m, reach, a, b) {
                let index = if b.x > a.x { j } else { i };
                consider(hit.x - m.x, false, index);
            }
        }
    }

    best.map(|(_, _, index)| index)
}

/// Repair a bridge candidate until no shell edge blocks `m`–`shell[index]`.
///
/// Each blocked attempt moves to the blocking edge's rightmost endpoint.
/// Bounded by the shell's edge count.
fn visible_bridge(shell: &[Point2<f64>], m: Point2<f64>, mut index: usize) -> Result<usize> {
    let n = shell.len();

    for _ in 0..=n {
        let target = shell[index];
        let blocker = (0..n).find(|&i| {
            let (a, b) = (shell[i], shell[(i + 1) % n]);
            a != target && b != target && chord_meets_edge(m, target, a, b)
        });

        let Some(i) = blocker else {
            return Ok(index);
        };

        let j = (i + 1) % n;
        let next = if shell[j].x > shell[i].x { j } else { i };
        if shell[next] == target {
            break;
        }
        tracing::trace!(from = index, to = next, "bridge blocked, redirecting");
        index = next;
    }

    Err(Error::NoVisibleBridge { x: m.x, y: m.y })
}

/// Among the copies of `shell[index]`, the one whose corner contains `m`.
///
/// Seams from earlier holes duplicate their bridge vertex, one copy on each
/// side of the zero-width gap. Splicing at the wrong copy folds the new hole
/// across the old seam.
fn seam_side(shell: &[Point2<f64>], index: usize, m: Point2<f64>) -> usize {
    let target = shell[index];
    let copies: Vec<usize> = (0..shell.len()).filter(|&k| shell[k] == target).collect();
    if copies.len() < 2 {
        return index;
    }

    let clockwise = is_clockwise(shell);
    copies
        .into_iter()
        .find(|&k| corner_contains(shell, k, m, clockwise))
        .unwrap_or(index)
}

/// `p` lies inside the polygon's interior angle at vertex `k`, boundary
/// included.
fn corner_contains(shell: &[Point2<f64>], k: usize, p: Point2<f64>, clockwise: bool) -> bool {
    let n = shell.len();
    let (a, b, c) = (shell[(k + n - 1) % n], shell[k], shell[(k + 1) % n]);
    // Interior lies on the right of each edge for clockwise loops
    let side = if clockwise { -1.0 } else { 1.0 };

    let inside_incoming = side * orientation(a, b, p) >= 0.0;
    let inside_outgoing = side * orientation(b, c, p) >= 0.0;
    if side * orientation(a, b, c) > 0.0 {
        inside_incoming && inside_outgoing
    } else {
        inside_incoming || inside_outgoing
    }
}

/// Shell up to and including the bridge vertex, the hole from its anchor all
/// the way round back to the anchor, then the bridge vertex again and the
/// rest of the shell. Adds `hole.len() + 2` points.
fn splice(
    shell: &[Point2<f64>],
    bridge: usize,
    hole: &[Point2<f64>],
    anchor: usize,
) -> Vec<Point2<f64>> {
    let mut out = Vec::with_capacity(shell.len() + hole.len() + 2);
    out.extend_from_slice(&shell[..=bridge]);
    out.extend_from_slice(&hole[anchor..]);
    out.extend_from_slice(&hole[..anchor]);
    out.push(hole[anchor]);
    out.push(shell[bridge]);
    out.extend_from_slice(&shell[bridge + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ear_clip::ear_clip;
    use crate::island::make_clockwise;
    use crate::predicates::{segments_cross_properly, signed_area};
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2<f64>> {
        let mut points = vec![
            Point2::new(x, y),
            Point2::new(x + size, y),
            Point2::new(x + size, y + size),
            Point2::new(x, y + size),
        ];
        make_clockwise(&mut points);
        points
    }

    fn no_proper_crossings(points: &[Point2<f64>]) -> bool {
        let n = points.len();
        for i in 0..n {
            for j in i + 1..n {
                let (a, b) = (points[i], points[(i + 1) % n]);
                let (c, d) = (points[j], points[(j + 1) % n]);
                if segments_cross_properly(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_no_holes_is_identity() {
        let shell = square(0.0, 0.0, 10.0);
        let cut = cut_island(Island::new(shell.clone()), &TriangulationConfig::default()).unwrap();
        assert_eq!(cut, shell);
    }

    #[test]
    fn test_donut_splice() {
        let island = Island {
            shell: square(0.0, 0.0, 64.0),
            holes: vec![square(16.0, 16.0, 32.0)],
        };
        let cut = cut_island(island, &TriangulationConfig::default()).unwrap();

        assert_eq!(cut.len(), 10);
        assert!(no_proper_crossings(&cut));
        // Seam edges cancel, leaving the ring area
        assert_relative_eq!(signed_area(&cut).abs(), 64.0 * 64.0 - 32.0 * 32.0);
    }

    #[test]
    fn test_two_holes() {
        let island = Island {
            shell: square(0.0, 0.0, 100.0),
            holes: vec![square(10.0, 40.0, 20.0), square(60.0, 40.0, 20.0)],
        };
        let cut = cut_island(island, &TriangulationConfig::default()).unwrap();

        assert_eq!(cut.len(), 4 + 6 + 6);
        assert!(no_proper_crossings(&cut));
        assert_relative_eq!(signed_area(&cut).abs(), 10000.0 - 800.0);
    }

    #[test]
    fn test_bridge_around_blocking_notch() {
        // Shell with a notch cutting in from the right at the hole's height
        let mut shell = vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 45.0),
            Point2::new(60.0, 45.0),
            Point2::new(60.0, 55.0),
            Point2::new(100.0, 55.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ];
        make_clockwise(&mut shell);
        let island = Island {
            shell,
            holes: vec![square(20.0, 40.0, 20.0)],
        };
        let cut = cut_island(island, &TriangulationConfig::default()).unwrap();

        assert_eq!(cut.len(), 8 + 6);
        assert!(no_proper_crossings(&cut));
    }

    #[test]
    fn test_bridge_through_earlier_seam() {
        // Both holes bridge to the slanted edge's bottom corner; the lower
        // hole's ray lands on the upper hole's seam
        let mut shell = vec![
            Point2::new(0.0, 0.0),
            Point2::new(120.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ];
        make_clockwise(&mut shell);
        let mut upper = vec![
            Point2::new(60.0, 40.0),
            Point2::new(80.0, 40.0),
            Point2::new(80.0, 60.0),
            Point2::new(60.0, 60.0),
        ];
        make_clockwise(&mut upper);
        let mut lower = vec![
            Point2::new(60.0, 10.0),
            Point2::new(78.0, 10.0),
            Point2::new(78.0, 30.0),
            Point2::new(60.0, 30.0),
        ];
        make_clockwise(&mut lower);

        let island = Island {
            shell,
            holes: vec![upper, lower],
        };
        let config = TriangulationConfig::default().strict();
        let cut = cut_island(island, &config).unwrap();

        assert_eq!(cut.len(), 16);
        assert!(no_proper_crossings(&cut));

        // The lower hole hangs off the corner copy below the first seam
        let corner = Point2::new(120.0, 0.0);
        let copies: Vec<usize> = (0..cut.len()).filter(|&i| cut[i] == corner).collect();
        assert_eq!(copies.len(), 3);
        assert_eq!(cut[copies[1] + 1], Point2::new(78.0, 30.0));
        assert_eq!(cut[copies[2] + 1], Point2::new(0.0, 0.0));

        let indices = ear_clip(&cut, &config).unwrap();
        assert_eq!(indices.len() / 3, cut.len() - 2);
        let covered: f64 = indices
            .chunks(3)
            .map(|t| orientation(cut[t[0]], cut[t[1]], cut[t[2]]).abs() * 0.5)
            .sum();
        assert_relative_eq!(covered, 11000.0 - 400.0 - 360.0, epsilon = 1e-6);
    }

    #[test]
    fn test_corner_contains() {
        let shell = square(0.0, 0.0, 10.0);
        let clockwise = is_clockwise(&shell);
        let corner = shell.iter().position(|p| *p == Point2::new(0.0, 0.0)).unwrap();

        assert!(corner_contains(&shell, corner, Point2::new(5.0, 5.0), clockwise));
        assert!(!corner_contains(&shell, corner, Point2::new(-5.0, 5.0), clockwise));
        assert!(!corner_contains(&shell, corner, Point2::new(-5.0, -5.0), clockwise));
    }

    #[test]
    fn test_bridge_limit() {
        let island = Island {
            shell: square(0.0, 0.0, 100.0),
            holes: vec![square(10.0, 10.0, 10.0), square(50.0, 50.0, 10.0)],
        };
        let config = TriangulationConfig::default().with_max_bridges_per_island(1);
        let err = cut_island(island, &config).unwrap_err();
        assert!(matches!(err, Error::BridgeOverrun { limit: 1 }));
    }

    #[test]
    fn test_hole_outside_shell_has_no_bridge() {
        let island = Island {
            shell: square(0.0, 0.0, 10.0),
            holes: vec![square(50.0, 0.0, 10.0)],
        };
        let err = cut_island(island, &TriangulationConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NoVisibleBridge { x, .. } if x == 60.0));
    }

    #[test]
    fn test_splice_layout() {
        let shell = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let hole = vec![
            Point2::new(10.0, 0.0),
            Point2::new(11.0, 0.0),
            Point2::new(12.0, 0.0),
        ];
        let out = splice(&shell, 1, &hole, 2);
        let xs: Vec<f64> = out.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 12.0, 10.0, 11.0, 12.0, 1.0, 2.0]);
    }
}
