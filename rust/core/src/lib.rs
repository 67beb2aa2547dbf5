// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Sector-Tess Core
//!
//! Map data model shared by the triangulation and processing crates.
//!
//! The map is held as flat index-linked tables (vertices, linedefs, sidedefs,
//! sectors, things). This crate loads those tables from a JSON document,
//! validates their cross-references and answers the one structural query the
//! triangulator needs: which linedefs bound a given sector.
//!
//! ```rust
//! use sector_tess_core::MapData;
//!
//! let json = r#"{
//!     "vertices": [{"x": 0, "y": 0}, {"x": 64, "y": 0}, {"x": 64, "y": 64}, {"x": 0, "y": 64}],
//!     "linedefs": [
//!         {"start": 0, "end": 1, "front": 0, "back": 65535},
//!         {"start": 1, "end": 2, "front": 0},
//!         {"start": 2, "end": 3, "front": 0, "back": -1},
//!         {"start": 3, "end": 0, "front": 0, "back": null}
//!     ],
//!     "sidedefs": [{"sector": 0}],
//!     "sectors": [{"floor_height": 0, "ceiling_height": 128}]
//! }"#;
//!
//! let map = MapData::from_json(json).unwrap();
//! assert_eq!(map.sector_linedefs(0).unwrap().len(), 4);
//! ```

pub mod bounds;
pub mod error;
pub mod map;

pub use bounds::MapBounds;
pub use error::{Error, Result};
pub use map::{Linedef, MapData, Sector, Sidedef, Thing, Vertex, NO_SIDEDEF};
