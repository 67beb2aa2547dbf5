// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Report types for serialization.

use sector_tess_geometry::{TimingReport, TriangulatedPolygon};
use serde::{Serialize, Serializer};

/// A triangulated polygon in plain arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonData {
    /// Outline points (x, y).
    pub points: Vec<[f64; 2]>,
    /// Triangle indices into `points`, clockwise.
    pub indices: Vec<u32>,
}

impl From<&TriangulatedPolygon> for PolygonData {
    fn from(polygon: &TriangulatedPolygon) -> Self {
        Self {
            points: polygon.points.iter().map(|p| [p.x, p.y]).collect(),
            indices: polygon.indices.iter().map(|&i| i as u32).collect(),
        }
    }
}

fn serialize_polygons<S>(polygons: &[TriangulatedPolygon], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(polygons.iter().map(PolygonData::from))
}

/// Triangulated geometry of one sector.
#[derive(Debug, Clone, Serialize)]
pub struct SectorMesh {
    /// Sector index in the map.
    pub sector: usize,
    pub floor_height: i32,
    pub ceiling_height: i32,
    /// One polygon per island.
    #[serde(serialize_with = "serialize_polygons")]
    pub polygons: Vec<TriangulatedPolygon>,
    /// Ear clipping gave up on at least one polygon; only part of the
    /// sector is covered.
    pub partial: bool,
}

impl SectorMesh {
    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(|p| p.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.polygons.iter().map(|p| p.triangle_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.is_empty())
    }
}

/// A sector that could not be triangulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorFailure {
    pub sector: usize,
    pub error: String,
    /// An iteration limit was hit, rather than a defect found in the data.
    pub overrun: bool,
}

/// Stage timings in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StageTimingsMs {
    pub trace_ms: f64,
    pub simplify_ms: f64,
    pub islands_ms: f64,
    pub cut_ms: f64,
    pub clip_ms: f64,
}

impl From<TimingReport> for StageTimingsMs {
    fn from(report: TimingReport) -> Self {
        let ms = |d: std::time::Duration| d.as_secs_f64() * 1000.0;
        Self {
            trace_ms: ms(report.trace),
            simplify_ms: ms(report.simplify),
            islands_ms: ms(report.islands),
            cut_ms: ms(report.cut),
            clip_ms: ms(report.clip),
        }
    }
}

/// Processing statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    /// Sectors in the map.
    pub sectors: usize,
    /// Sectors that produced at least one triangle.
    pub triangulated: usize,
    /// Sectors without boundary lines, or whose triangulation came out empty.
    pub empty: usize,
    /// Sectors that failed.
    pub failed: usize,
    /// Triangulated sectors with incomplete coverage.
    pub partial: usize,
    pub polygons: usize,
    pub triangles: usize,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<StageTimingsMs>,
}

/// Result of triangulating a whole map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapTriangulation {
    pub map: String,
    /// Successfully processed sectors, in sector order.
    pub sectors: Vec<SectorMesh>,
    /// Failed sectors, in sector order.
    pub failures: Vec<SectorFailure>,
    pub stats: ProcessingStats,
}

impl MapTriangulation {
    /// Mesh for `sector`, if it was triangulated.
    pub fn sector(&self, sector: usize) -> Option<&SectorMesh> {
        self.sectors
            .binary_search_by_key(&sector, |mesh| mesh.sector)
            .ok()
            .map(|i| &self.sectors[i])
    }

    pub fn is_failed(&self, sector: usize) -> bool {
        self.failures.iter().any(|f| f.sector == sector)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
