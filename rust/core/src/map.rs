// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map data tables.
//!
//! A map is a set of flat tables cross-referencing each other by index:
//! linedefs join two vertices and carry up to two sidedefs, and every sidedef
//! names the sector it faces. A sector's boundary is therefore never stored
//! directly; it is recovered by collecting the linedefs that have a side in
//! that sector (see [`MapData::sector_linedefs`]).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::bounds::MapBounds;
use crate::error::{Error, Result};

/// Legacy "no sidedef" marker used by 16-bit map formats.
pub const NO_SIDEDEF: i64 = 0xFFFF;

/// A map vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line between two vertices with an optional sidedef on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Linedef {
    pub start: usize,
    pub end: usize,
    #[serde(default, deserialize_with = "deserialize_side")]
    pub front: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_side")]
    pub back: Option<usize>,
}

impl Linedef {
    /// One-sided linedef (a wall with nothing behind it).
    pub fn one_sided(start: usize, end: usize, front: usize) -> Self {
        Self {
            start,
            end,
            front: Some(front),
            back: None,
        }
    }

    pub fn two_sided(start: usize, end: usize, front: usize, back: usize) -> Self {
        Self {
            start,
            end,
            front: Some(front),
            back: Some(back),
        }
    }
}

/// One side of a linedef, facing into a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidedef {
    pub sector: usize,
}

/// Sector attributes. Only the values downstream consumers need are kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sector {
    pub floor_height: i32,
    pub ceiling_height: i32,
    pub light_level: u8,
    pub tag: u16,
}

impl Default for Sector {
    fn default() -> Self {
        Self {
            floor_height: 0,
            ceiling_height: 128,
            light_level: 160,
            tag: 0,
        }
    }
}

/// A point object placed in the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(rename = "type", default)]
    pub kind: u16,
    #[serde(default)]
    pub flags: u16,
}

/// Complete map: all tables needed to recover sector boundaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub sectors: Vec<Sector>,
    #[serde(default)]
    pub things: Vec<Thing>,
}

/// Accepts `null`, a missing field, `-1` or `0xFFFF` as "no sidedef".
fn deserialize_side<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<i64> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(-1) | Some(NO_SIDEDEF) => None,
        Some(v) if v < 0 => None,
        Some(v) => Some(v as usize),
    })
}

impl MapData {
    /// Parse a JSON map document and validate its cross-references.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: MapData = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    /// Check that every table index points at an existing entry.
    pub fn validate(&self) -> Result<()> {
        for (i, line) in self.linedefs.iter().enumerate() {
            for vertex in [line.start, line.end] {
                if vertex >= self.vertices.len() {
                    return Err(Error::VertexOutOfRange {
                        linedef: i,
                        vertex,
                        count: self.vertices.len(),
                    });
                }
            }
            for sidedef in [line.front, line.back].into_iter().flatten() {
                if sidedef >= self.sidedefs.len() {
                    return Err(Error::SidedefOutOfRange {
                        linedef: i,
                        sidedef,
                        count: self.sidedefs.len(),
                    });
                }
            }
        }

        for side in &self.sidedefs {
            if side.sector >= self.sectors.len() {
                return Err(Error::SectorOutOfRange {
                    sector: side.sector,
                    count: self.sectors.len(),
                });
            }
        }

        Ok(())
    }

    #[inline]
    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Sector faced by a sidedef.
    #[inline]
    pub fn side_sector(&self, sidedef: Option<usize>) -> Option<usize> {
        sidedef
            .and_then(|s| self.sidedefs.get(s))
            .map(|side| side.sector)
    }

    /// Front and back sectors of a linedef.
    #[inline]
    pub fn linedef_sectors(&self, line: &Linedef) -> (Option<usize>, Option<usize>) {
        (self.side_sector(line.front), self.side_sector(line.back))
    }

    /// A linedef with the same sector on both sides lies inside that sector
    /// and is not part of its boundary.
    pub fn is_internal(&self, line: &Linedef) -> bool {
        let (front, back) = self.linedef_sectors(line);
        front.is_some() && front == back
    }

    /// Linedefs bounding `sector`: every linedef with a side in the sector,
    /// minus the internal ones.
    pub fn sector_linedefs(&self, sector: usize) -> Result<Vec<&Linedef>> {
        if sector >= self.sectors.len() {
            return Err(Error::SectorOutOfRange {
                sector,
                count: self.sectors.len(),
            });
        }

        Ok(self
            .linedefs
            .iter()
            .filter(|line| {
                let (front, back) = self.linedef_sectors(line);
                (front == Some(sector) || back == Some(sector)) && !self.is_internal(line)
            })
            .collect())
    }

    /// Boundary linedef indices for every sector, built in one pass over the
    /// linedef table.
    pub fn linedefs_by_sector(&self) -> FxHashMap<usize, Vec<usize>> {
        let mut index: FxHashMap<usize, Vec<usize>> = FxHashMap::default();

        for (i, line) in self.linedefs.iter().enumerate() {
            if self.is_internal(line) {
                continue;
            }
            let (front, back) = self.linedef_sectors(line);
            if let Some(sector) = front {
                index.entry(sector).or_default().push(i);
            }
            if let Some(sector) = back {
                if Some(sector) != front {
                    index.entry(sector).or_default().push(i);
                }
            }
        }

        index
    }

    /// Bounding box of all vertices.
    pub fn bounds(&self) -> MapBounds {
        let mut bounds = MapBounds::new();
        for v in &self.vertices {
            bounds.expand(v.x, v.y);
        }
        bounds
    }
}
