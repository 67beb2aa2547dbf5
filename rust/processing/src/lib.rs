// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map processing pipeline
//!
//! Runs the sector triangulator over every sector of a map, keeps going past
//! sectors that fail, places things into the resulting geometry and collects
//! everything into a serializable report.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod things;
pub mod types;

pub use config::ProcessingConfig;
pub use error::{Error, Result};
pub use pipeline::{load_map, process_map};
pub use things::{assign_things, ThingPlacement};
pub use types::{
    MapTriangulation, PolygonData, ProcessingStats, SectorFailure, SectorMesh, StageTimingsMs,
};
