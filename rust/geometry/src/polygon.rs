// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulated polygon output.

use crate::predicates::{orientation, point_in_polygon, signed_area};
use crate::{Point2, Point3};

/// A simple polygon and its triangulation.
///
/// `indices` holds triangle triples into `points`, wound clockwise. For an
/// island with holes, `points` is the bridged outline and contains the seam
/// vertices twice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangulatedPolygon {
    pub points: Vec<Point2<f64>>,
    pub indices: Vec<usize>,
}

impl TriangulatedPolygon {
    pub fn new(points: Vec<Point2<f64>>, indices: Vec<usize>) -> Self {
        Self { points, indices }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Every point is covered: `n` points carry `n - 2` triangles.
    ///
    /// False when ear clipping gave up and kept a partial result.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.vertex_count() >= 3 && self.triangle_count() == self.vertex_count() - 2
    }

    /// Triangle index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Total area covered by the triangles.
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| orientation(self.points[a], self.points[b], self.points[c]).abs() * 0.5)
            .sum()
    }

    /// Area enclosed by the outline; bridge seams cancel out.
    pub fn outline_area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// Whether `point` lies inside the polygon (and outside its holes).
    pub fn contains_point(&self, point: Point2<f64>) -> bool {
        point_in_region(point, self)
    }

    /// Indices shifted by `offset`, for appending into a shared vertex buffer.
    pub fn offset_indices(&self, offset: usize) -> Vec<usize> {
        self.indices.iter().map(|i| i + offset).collect()
    }

    /// Indices with every triangle's winding reversed.
    ///
    /// Floors face up with the stored winding; ceilings use this.
    pub fn flipped_indices(&self) -> Vec<usize> {
        self.triangles().flat_map(|[a, b, c]| [c, b, a]).collect()
    }

    /// Points placed in 3D at height `z`.
    pub fn lift(&self, z: f64) -> Vec<Point3<f64>> {
        self.points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
    }
}

/// Whether `point` falls within a triangulated polygon.
///
/// Ray-casts against the polygon outline. Points exactly on the outline may
/// go either way.
pub fn point_in_region(point: Point2<f64>, polygon: &TriangulatedPolygon) -> bool {
    point_in_polygon(point, &polygon.points, false)
}
