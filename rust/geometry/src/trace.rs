// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop tracing
//!
//! Rebuilds closed vertex loops from an unordered edge set. Edges live in a
//! slot map and are removed as they are walked, so the walk ends exactly
//! when the map is empty.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::boundary::{Edge, SectorBoundary};
use crate::config::TriangulationConfig;
use crate::error::{Error, Result};
use crate::predicates::{angle_difference, line_angle};
use crate::Point2;

new_key_type! {
    /// Key for an edge that has not been walked yet.
    struct EdgeKey;
}

/// Edges remaining to be walked, with per-vertex incidence lists.
struct EdgeSet {
    edges: SlotMap<EdgeKey, Edge>,
    incident: Vec<SmallVec<[EdgeKey; 4]>>,
    /// Edge keys in canonical order, for picking trace seeds.
    seeds: Vec<EdgeKey>,
    seed_cursor: usize,
}

impl EdgeSet {
    fn new(boundary: &SectorBoundary) -> Self {
        let mut edges = SlotMap::with_capacity_and_key(boundary.edges.len());
        let mut incident = vec![SmallVec::new(); boundary.vertices.len()];
        let mut seeds = Vec::with_capacity(boundary.edges.len());

        for edge in &boundary.edges {
            let key = edges.insert(*edge);
            incident[edge.start].push(key);
            incident[edge.end].push(key);
            seeds.push(key);
        }

        Self {
            edges,
            incident,
            seeds,
            seed_cursor: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.edges.len()
    }

    /// Take the first unwalked edge in canonical order.
    fn take_seed(&mut self) -> Option<Edge> {
        while let Some(&key) = self.seeds.get(self.seed_cursor) {
            self.seed_cursor += 1;
            if let Some(edge) = self.edges.remove(key) {
                return Some(edge);
            }
        }
        None
    }

    /// Unwalked edges touching `vertex`.
    fn candidates(&self, vertex: usize) -> impl Iterator<Item = (EdgeKey, Edge)> + '_ {
        self.incident[vertex]
            .iter()
            .filter_map(|&key| self.edges.get(key).map(|edge| (key, *edge)))
    }
}

/// Trace every closed loop in a canonical boundary.
///
/// Loops are returned as point sequences, implicitly closed. Fails with
/// [`Error::UnclosedSector`] before tracing if any vertex has an odd number
/// of incident edges.
pub fn trace_loops(
    boundary: &SectorBoundary,
    config: &TriangulationConfig,
) -> Result<Vec<Vec<Point2<f64>>>> {
    check_closure(boundary)?;

    let vertices = &boundary.vertices;
    let mut set = EdgeSet::new(boundary);
    let mut loops = Vec::new();

    while set.remaining() > 0 {
        if loops.len() >= config.max_traced_loops {
            return Err(Error::TraceOverrun {
                limit: config.max_traced_loops,
                remaining_edges: set.remaining(),
            });
        }

        let Some(seed) = set.take_seed() else {
            break;
        };

        let origin = seed.start;
        let mut previous = seed.start;
        let mut current = seed.end;
        let mut points = vec![vertices[origin]];
        let mut steps = 0usize;

        while current != origin {
            steps += 1;
            if steps > config.max_walk_steps {
                return Err(Error::TraceOverrun {
                    limit: config.max_walk_steps,
                    remaining_edges: set.remaining(),
                });
            }

            points.push(vertices[current]);

            let Some(key) = pick_next(&set, vertices, previous, current) else {
                let p = vertices[current];
                return Err(Error::UnclosedSector {
                    open_vertices: 1,
                    x: p.x,
                    y: p.y,
                });
            };
            let Some(edge) = set.edges.remove(key) else {
                break;
            };

            previous = current;
            current = edge.other(current);
        }

        loops.push(points);
    }

    tracing::debug!(loops = loops.len(), "traced sector loops");
    Ok(loops)
}

/// Every referenced vertex must have an even, non-zero edge count.
fn check_closure(boundary: &SectorBoundary) -> Result<()> {
    let mut incidence = vec![0usize; boundary.vertices.len()];
    for edge in &boundary.edges {
        incidence[edge.start] += 1;
        incidence[edge.end] += 1;
    }

    let mut open = incidence
        .iter()
        .enumerate()
        .filter(|(_, &count)| count % 2 == 1);

    if let Some((first, _)) = open.next() {
        let p = boundary.vertices[first];
        return Err(Error::UnclosedSector {
            open_vertices: 1 + open.count(),
            x: p.x,
            y: p.y,
        });
    }

    Ok(())
}

/// Choose the edge leaving `current` after arriving from `previous`.
///
/// With several candidates (a vertex where loops touch), the edge whose
/// direction toward `current` is closest to the incoming direction wins, so
/// the walk turns as sharply as possible. Ties keep the first candidate.
fn pick_next(
    set: &EdgeSet,
    vertices: &[Point2<f64>],
    previous: usize,
    current: usize,
) -> Option<EdgeKey> {
    let mut candidates = set.candidates(current);
    let (first_key, first_edge) = candidates.next()?;

    let here = vertices[current];
    let incoming = line_angle(vertices[previous], here);
    let deviation = |edge: &Edge| {
        angle_difference(incoming, line_angle(vertices[edge.other(current)], here))
    };

    let mut best = (first_key, deviation(&first_edge));
    for (key, edge) in candidates {
        let d = deviation(&edge);
        if d < best.1 {
            best = (key, d);
        }
    }

    Some(best.0)
}
