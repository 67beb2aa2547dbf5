// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a whole map from being processed.
///
/// Per-sector triangulation failures are not errors at this level; they are
/// collected into [`crate::MapTriangulation::failures`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Map error: {0}")]
    Map(#[from] sector_tess_core::Error),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
