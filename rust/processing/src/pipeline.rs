// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole-map triangulation with parallel per-sector processing.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use sector_tess_core::MapData;
use sector_tess_geometry::{SectorBoundary, SectorTriangulator, TriangulatedPolygon};

use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::types::{MapTriangulation, ProcessingStats, SectorFailure, SectorMesh, StageTimingsMs};

/// Parse and validate a JSON map document.
pub fn load_map(json: &str) -> Result<MapData> {
    let map = MapData::from_json(json)?;
    tracing::debug!(
        map = %map.name,
        vertices = map.vertices.len(),
        linedefs = map.linedefs.len(),
        sectors = map.sector_count(),
        things = map.things.len(),
        "Loaded map"
    );
    Ok(map)
}

/// Triangulate every sector of a map.
///
/// Sectors are independent: a sector that fails is recorded in
/// [`MapTriangulation::failures`] and the rest carry on.
pub fn process_map(map: &MapData, config: &ProcessingConfig) -> MapTriangulation {
    let total_start = std::time::Instant::now();

    tracing::info!(
        map = %map.name,
        sectors = map.sector_count(),
        linedefs = map.linedefs.len(),
        parallel = config.parallel,
        "Starting map triangulation"
    );

    let mut triangulator = SectorTriangulator::new(config.triangulation);
    if config.collect_timings {
        triangulator = triangulator.with_timings();
    }

    // Single pass over linedefs instead of one scan per sector
    let by_sector: FxHashMap<usize, Vec<usize>> = map.linedefs_by_sector();
    tracing::debug!(sectors_with_lines = by_sector.len(), "Built sector line index");

    let triangulate = |sector: usize| {
        let lines = by_sector.get(&sector).map(Vec::as_slice).unwrap_or_default();
        let result = SectorBoundary::from_linedefs(map, lines.iter().map(|&i| &map.linedefs[i]))
            .and_then(|boundary| triangulator.triangulate(&boundary));
        (sector, result)
    };

    let outcomes: Vec<_> = if config.parallel {
        (0..map.sector_count()).into_par_iter().map(triangulate).collect()
    } else {
        (0..map.sector_count()).map(triangulate).collect()
    };

    let mut sectors = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    let mut empty = 0usize;
    let mut partial = 0usize;

    for (sector, outcome) in outcomes {
        match outcome {
            Ok(polygons) => {
                let mesh = sector_mesh(map, sector, polygons);
                if mesh.is_empty() {
                    empty += 1;
                } else if mesh.partial {
                    tracing::warn!(
                        sector,
                        triangles = mesh.triangle_count(),
                        "Sector only partially triangulated"
                    );
                    partial += 1;
                }
                sectors.push(mesh);
            }
            Err(e) => {
                tracing::warn!(sector, error = %e, "Sector triangulation failed");
                failures.push(SectorFailure {
                    sector,
                    error: e.to_string(),
                    overrun: e.is_overrun(),
                });
            }
        }
    }

    let polygons: usize = sectors.iter().map(|s| s.polygons.len()).sum();
    let triangles: usize = sectors.iter().map(|s| s.triangle_count()).sum();
    let elapsed = total_start.elapsed();

    tracing::info!(
        sectors = map.sector_count(),
        failed = failures.len(),
        empty,
        partial,
        polygons,
        triangles,
        total_time_ms = elapsed.as_millis(),
        "Map triangulation complete"
    );

    let timings = triangulator.timings();
    if let Some(report) = &timings {
        report.log();
    }

    MapTriangulation {
        map: map.name.clone(),
        stats: ProcessingStats {
            sectors: map.sector_count(),
            triangulated: sectors.len() - empty,
            empty,
            failed: failures.len(),
            partial,
            polygons,
            triangles,
            elapsed_ms: elapsed.as_millis() as u64,
            timings: timings.map(StageTimingsMs::from),
        },
        sectors,
        failures,
    }
}

fn sector_mesh(map: &MapData, sector: usize, polygons: Vec<TriangulatedPolygon>) -> SectorMesh {
    let attributes = map.sectors.get(sector).copied().unwrap_or_default();
    SectorMesh {
        sector,
        floor_height: attributes.floor_height,
        ceiling_height: attributes.ceiling_height,
        partial: polygons.iter().any(|p| !p.is_complete()),
        polygons,
    }
}
