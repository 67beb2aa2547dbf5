// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for triangulation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while triangulating a sector.
///
/// Every variant is scoped to the sector being triangulated; none of them
/// should abort processing of other sectors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unclosed sector: {open_vertices} vertices are not joined to an even number of boundary edges (first at ({x}, {y}))")]
    UnclosedSector { open_vertices: usize, x: f64, y: f64 },

    #[error("Loop tracing exceeded its limit of {limit} iterations ({remaining_edges} edges left)")]
    TraceOverrun { limit: usize, remaining_edges: usize },

    #[error("Island classification exceeded its limit of {limit} iterations")]
    ClassificationOverrun { limit: usize },

    #[error("No shell vertex is visible from the hole anchored at ({x}, {y})")]
    NoVisibleBridge { x: f64, y: f64 },

    #[error("Hole bridging exceeded its limit of {limit} holes per island")]
    BridgeOverrun { limit: usize },

    #[error("Ear clipping exceeded its limit of {limit} attempts after {triangles} of {expected} triangles")]
    ClipOverrun {
        limit: usize,
        triangles: usize,
        expected: usize,
    },

    #[error("Degenerate loop: {points} points left after simplification")]
    DegenerateLoop { points: usize },

    #[error("Edge {edge} references vertex {vertex}, but only {count} vertices were supplied")]
    InvalidEdge {
        edge: usize,
        vertex: usize,
        count: usize,
    },

    #[error("Map data error: {0}")]
    CoreError(#[from] sector_tess_core::Error),
}

impl Error {
    /// True when an iteration ceiling was hit rather than a data defect found.
    pub fn is_overrun(&self) -> bool {
        matches!(
            self,
            Error::TraceOverrun { .. }
                | Error::ClassificationOverrun { .. }
                | Error::BridgeOverrun { .. }
                | Error::ClipOverrun { .. }
        )
    }
}
