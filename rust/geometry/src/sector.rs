// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sector triangulation entry point
//!
//! Runs trace → simplify → islands → cut → clip over one sector's boundary.
//! A triangulator holds no per-sector state and may be shared between
//! threads; only the optional timing counters accumulate across calls.

use std::time::Instant;

use crate::boundary::SectorBoundary;
use crate::config::TriangulationConfig;
use crate::cut::cut_island;
use crate::ear_clip::ear_clip;
use crate::error::{Error, Result};
use crate::island::build_islands;
use crate::polygon::TriangulatedPolygon;
use crate::simplify::simplify_loop;
use crate::timing::{Stage, StageTimings, TimingReport};
use crate::trace::trace_loops;

/// Triangulates sector boundaries.
#[derive(Debug, Default)]
pub struct SectorTriangulator {
    config: TriangulationConfig,
    timings: Option<StageTimings>,
}

impl SectorTriangulator {
    pub fn new(config: TriangulationConfig) -> Self {
        Self {
            config,
            timings: None,
        }
    }

    /// Enable cumulative per-stage timing.
    pub fn with_timings(mut self) -> Self {
        self.timings = Some(StageTimings::new());
        self
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Timings so far, if enabled.
    pub fn timings(&self) -> Option<TimingReport> {
        self.timings.as_ref().map(StageTimings::report)
    }

    /// Triangulate one sector.
    ///
    /// Returns one polygon per island. An empty boundary gives no polygons.
    /// An island whose holes cannot be bridged is dropped with a warning; the
    /// sector only fails on it when no island survives.
    pub fn triangulate(&self, boundary: &SectorBoundary) -> Result<Vec<TriangulatedPolygon>> {
        let boundary = boundary.canonicalize()?;
        if boundary.is_empty() {
            return Ok(Vec::new());
        }

        let loops = self.timed(Stage::Trace, || trace_loops(&boundary, &self.config))?;

        let loops = self.timed(Stage::Simplify, || {
            loops
                .into_iter()
                .map(|points| simplify_loop(points, self.config.collinear_epsilon))
                .collect::<Result<Vec<_>>>()
        })?;

        let islands = self.timed(Stage::Islands, || build_islands(loops, &self.config))?;
        let island_count = islands.len();

        let (outlines, first_error) = self.timed(Stage::Cut, || {
            let mut outlines = Vec::with_capacity(island_count);
            let mut first_error: Option<Error> = None;
            for island in islands {
                match cut_island(island, &self.config) {
                    Ok(outline) => outlines.push(outline),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping island that could not be bridged");
                        first_error.get_or_insert(e);
                    }
                }
            }
            (outlines, first_error)
        });

        if outlines.is_empty() {
            if let Some(e) = first_error {
                return Err(e);
            }
        }

        let polygons = self.timed(Stage::Clip, || {
            outlines
                .into_iter()
                .map(|points| {
                    let indices = ear_clip(&points, &self.config)?;
                    Ok(TriangulatedPolygon::new(points, indices))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        if let Some(timings) = &self.timings {
            timings.record_sector();
        }

        tracing::debug!(
            islands = island_count,
            polygons = polygons.len(),
            triangles = polygons.iter().map(|p| p.triangle_count()).sum::<usize>(),
            "triangulated sector"
        );
        Ok(polygons)
    }

    fn timed<T>(&self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        if let Some(timings) = &self.timings {
            timings.record(stage, start.elapsed());
        }
        out
    }
}

/// Triangulate one sector with the default configuration.
pub fn triangulate_sector(boundary: &SectorBoundary) -> Result<Vec<TriangulatedPolygon>> {
    SectorTriangulator::default().triangulate(boundary)
}
