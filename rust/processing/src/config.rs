// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sector_tess_geometry::TriangulationConfig;

/// Whole-map processing options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingConfig {
    pub triangulation: TriangulationConfig,
    /// Accumulate per-stage timings into the report.
    pub collect_timings: bool,
    /// Triangulate sectors on the rayon pool.
    pub parallel: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            triangulation: TriangulationConfig::default(),
            collect_timings: false,
            parallel: true,
        }
    }
}

impl ProcessingConfig {
    pub fn with_triangulation(mut self, triangulation: TriangulationConfig) -> Self {
        self.triangulation = triangulation;
        self
    }

    pub fn with_timings(mut self, enabled: bool) -> Self {
        self.collect_timings = enabled;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
