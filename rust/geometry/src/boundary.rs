// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sector boundary edge sets.
//!
//! A [`SectorBoundary`] is the unordered set of edges bordering one sector,
//! plus the vertices they reference. It is what the triangulator consumes.
//! Before tracing, the boundary is put into canonical form: vertices are
//! identified by coordinate, zero-length edges are dropped and edges are
//! sorted, so the same geometry always traces the same way no matter how
//! its edges were ordered on input.

use rustc_hash::FxHashMap;
use sector_tess_core::{Linedef, MapData};

use crate::error::{Error, Result};
use crate::Point2;

/// An undirected boundary edge between two vertex indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The endpoint opposite `vertex`.
    #[inline]
    pub fn other(&self, vertex: usize) -> usize {
        if self.start == vertex {
            self.end
        } else {
            self.start
        }
    }
}

/// The boundary edges of one sector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorBoundary {
    pub vertices: Vec<Point2<f64>>,
    pub edges: Vec<Edge>,
}

impl SectorBoundary {
    pub fn new(vertices: Vec<Point2<f64>>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    /// Build a boundary from closed point loops (last point joins the first).
    pub fn from_loops(loops: &[Vec<Point2<f64>>]) -> Self {
        let mut boundary = Self::default();
        for points in loops {
            let base = boundary.vertices.len();
            let n = points.len();
            boundary.vertices.extend_from_slice(points);
            boundary
                .edges
                .extend((0..n).map(|i| Edge::new(base + i, base + (i + 1) % n)));
        }
        boundary
    }

    /// Boundary of `sector`, as selected by [`MapData::sector_linedefs`].
    pub fn from_map(map: &MapData, sector: usize) -> Result<Self> {
        let lines = map.sector_linedefs(sector)?;
        Self::from_linedefs(map, lines)
    }

    /// Boundary from an explicit set of linedefs.
    ///
    /// Only vertices referenced by the linedefs are kept; indices are
    /// renumbered in first-use order.
    pub fn from_linedefs<'a, I>(map: &MapData, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Linedef>,
    {
        let mut boundary = Self::default();
        let mut local: FxHashMap<usize, usize> = FxHashMap::default();

        for (edge, line) in lines.into_iter().enumerate() {
            let mut ends = [0usize; 2];
            for (slot, vertex) in [line.start, line.end].into_iter().enumerate() {
                let v = map.vertex(vertex).ok_or(Error::InvalidEdge {
                    edge,
                    vertex,
                    count: map.vertices.len(),
                })?;
                ends[slot] = *local.entry(vertex).or_insert_with(|| {
                    boundary.vertices.push(Point2::new(v.x, v.y));
                    boundary.vertices.len() - 1
                });
            }
            boundary.edges.push(Edge::new(ends[0], ends[1]));
        }

        Ok(boundary)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Canonical form used for tracing.
    ///
    /// - every edge index is checked against the vertex set
    /// - vertices at identical coordinates are merged (`-0.0` equals `0.0`)
    /// - vertex ids follow sorted coordinate order; unreferenced vertices go
    /// - zero-length edges are dropped
    /// - each edge is stored low id first, and the edge list is sorted
    pub fn canonicalize(&self) -> Result<SectorBoundary> {
        let count = self.vertices.len();
        for (i, edge) in self.edges.iter().enumerate() {
            for vertex in [edge.start, edge.end] {
                if vertex >= count {
                    return Err(Error::InvalidEdge {
                        edge: i,
                        vertex,
                        count,
                    });
                }
            }
        }

        let mut coords: Vec<Point2<f64>> = self
            .edges
            .iter()
            .flat_map(|e| [e.start, e.end])
            .map(|v| normalize(self.vertices[v]))
            .collect();
        coords.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        coords.dedup_by(|a, b| coord_key(*a) == coord_key(*b));

        let ids: FxHashMap<(u64, u64), usize> = coords
            .iter()
            .enumerate()
            .map(|(i, p)| (coord_key(*p), i))
            .collect();
        let id_of = |v: usize| ids.get(&coord_key(normalize(self.vertices[v]))).copied();

        let mut edges = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let (Some(a), Some(b)) = (id_of(edge.start), id_of(edge.end)) else {
                continue;
            };
            if a != b {
                edges.push(Edge::new(a.min(b), a.max(b)));
            }
        }
        edges.sort_unstable();

        Ok(SectorBoundary {
            vertices: coords,
            edges,
        })
    }
}

#[inline]
fn normalize(p: Point2<f64>) -> Point2<f64> {
    // Adding zero folds -0.0 into 0.0
    Point2::new(p.x + 0.0, p.y + 0.0)
}

#[inline]
fn coord_key(p: Point2<f64>) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}
