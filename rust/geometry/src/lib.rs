// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sector-Tess Geometry
//!
//! Triangulation of map sectors from their unordered boundary edges:
//! closed loops are traced, simplified, grouped into shells with holes,
//! bridged into simple polygons and ear-clipped.
//!
//! ```rust
//! use sector_tess_geometry::{triangulate_sector, Point2, SectorBoundary};
//!
//! let outer = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(64.0, 0.0),
//!     Point2::new(64.0, 64.0),
//!     Point2::new(0.0, 64.0),
//! ];
//! let hole = vec![
//!     Point2::new(16.0, 16.0),
//!     Point2::new(48.0, 16.0),
//!     Point2::new(48.0, 48.0),
//!     Point2::new(16.0, 48.0),
//! ];
//!
//! let polygons = triangulate_sector(&SectorBoundary::from_loops(&[outer, hole])).unwrap();
//! assert_eq!(polygons.len(), 1);
//! assert_eq!(polygons[0].triangle_count(), 8);
//! ```

pub mod boundary;
pub mod config;
pub mod cut;
pub mod ear_clip;
pub mod error;
pub mod island;
pub mod polygon;
pub mod predicates;
pub mod sector;
pub mod simplify;
pub mod timing;
pub mod trace;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};

pub use boundary::{Edge, SectorBoundary};
pub use config::{ClipPolicy, TriangulationConfig};
pub use cut::cut_island;
pub use ear_clip::ear_clip;
pub use error::{Error, Result};
pub use island::{build_islands, Island};
pub use polygon::{point_in_region, TriangulatedPolygon};
pub use sector::{triangulate_sector, SectorTriangulator};
pub use simplify::simplify_loop;
pub use timing::{Stage, StageTimings, TimingReport};
pub use trace::trace_loops;
