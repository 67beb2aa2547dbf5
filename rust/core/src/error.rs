// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for map data loading and validation.

/// Result type alias for map data operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying map data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON map document could not be parsed.
    #[error("map JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A linedef references a vertex that does not exist.
    #[error("linedef {linedef} references vertex {vertex}, but the map has {count} vertices")]
    VertexOutOfRange {
        linedef: usize,
        vertex: usize,
        count: usize,
    },

    /// A linedef references a sidedef that does not exist.
    #[error("linedef {linedef} references sidedef {sidedef}, but the map has {count} sidedefs")]
    SidedefOutOfRange {
        linedef: usize,
        sidedef: usize,
        count: usize,
    },

    /// A sidedef (or a caller) references a sector that does not exist.
    #[error("sector {sector} out of range: the map has {count} sectors")]
    SectorOutOfRange { sector: usize, count: usize },
}
