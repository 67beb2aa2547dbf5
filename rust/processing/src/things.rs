// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thing-to-sector assignment.

use sector_tess_core::MapData;
use sector_tess_geometry::Point2;
use serde::Serialize;

use crate::types::MapTriangulation;

/// Which sector each thing stands in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThingPlacement {
    /// Sector per thing, by thing index.
    pub sectors: Vec<Option<usize>>,
    /// Indices of things that fall in no triangulated sector.
    pub unclaimed: Vec<usize>,
}

impl ThingPlacement {
    /// Thing indices placed in `sector`.
    pub fn things_in(&self, sector: usize) -> impl Iterator<Item = usize> + '_ {
        self.sectors
            .iter()
            .enumerate()
            .filter(move |(_, s)| **s == Some(sector))
            .map(|(i, _)| i)
    }

    pub fn claimed_count(&self) -> usize {
        self.sectors.len() - self.unclaimed.len()
    }
}

/// Assign every thing to the first sector, in sector order, whose geometry
/// contains it.
///
/// Failed sectors have no geometry, so things standing in them come out
/// unclaimed. Each unclaimed thing is logged.
pub fn assign_things(map: &MapData, triangulation: &MapTriangulation) -> ThingPlacement {
    let mut placement = ThingPlacement {
        sectors: Vec::with_capacity(map.things.len()),
        unclaimed: Vec::new(),
    };

    for (index, thing) in map.things.iter().enumerate() {
        let point = Point2::new(thing.x, thing.y);
        let sector = triangulation
            .sectors
            .iter()
            .find(|mesh| mesh.polygons.iter().any(|p| p.contains_point(point)))
            .map(|mesh| mesh.sector);

        if sector.is_none() {
            tracing::warn!(
                thing = index,
                kind = thing.kind,
                x = thing.x,
                y = thing.y,
                "Thing is not inside any sector"
            );
            placement.unclaimed.push(index);
        }
        placement.sectors.push(sector);
    }

    tracing::debug!(
        things = map.things.len(),
        unclaimed = placement.unclaimed.len(),
        "Assigned things to sectors"
    );
    placement
}
