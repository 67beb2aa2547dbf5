// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Island classification
//!
//! Groups traced loops into islands: an outer shell with the hole loops it
//! contains. Holes are siblings; a loop inside a hole is not a hole of the
//! same island.

use crate::config::TriangulationConfig;
use crate::error::{Error, Result};
use crate::predicates::{is_clockwise, point_in_polygon};
use crate::Point2;

/// One shell and the holes inside it. All loops are wound clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Island {
    pub shell: Vec<Point2<f64>>,
    pub holes: Vec<Vec<Point2<f64>>>,
}

impl Island {
    pub fn new(shell: Vec<Point2<f64>>) -> Self {
        Self {
            shell,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Whether `candidate` lies inside the shell and outside every hole.
    fn encloses(&self, candidate: &[Point2<f64>]) -> bool {
        let Some(probe) = probe_point(candidate, &self.shell) else {
            return false;
        };
        point_in_polygon(probe, &self.shell, true)
            && !self.holes.iter().any(|hole| point_in_polygon(probe, hole, true))
    }
}

/// First point of `candidate` not shared with `other`.
///
/// Loops that touch share vertices; testing a shared vertex would say
/// nothing about containment.
fn probe_point(candidate: &[Point2<f64>], other: &[Point2<f64>]) -> Option<Point2<f64>> {
    candidate.iter().copied().find(|p| !other.contains(p))
}

/// Reverse `points` in place unless already clockwise.
pub fn make_clockwise(points: &mut [Point2<f64>]) {
    if !is_clockwise(points) {
        points.reverse();
    }
}

/// Classify loops into islands.
///
/// The first loop seeds the first island. Each further loop becomes a hole
/// of the first island enclosing it. If instead it encloses a hole-less
/// island's shell, it takes over as that island's shell, and any other
/// hole-less islands it encloses become holes too. Otherwise it starts a
/// new island.
pub fn build_islands(
    mut loops: Vec<Vec<Point2<f64>>>,
    config: &TriangulationConfig,
) -> Result<Vec<Island>> {
    for points in &mut loops {
        make_clockwise(points);
    }

    if loops.len() <= 1 {
        return Ok(loops.into_iter().map(Island::new).collect());
    }

    let mut loops = loops.into_iter();
    let mut islands: Vec<Island> = loops.next().map(Island::new).into_iter().collect();

    for (pass, candidate) in loops.enumerate() {
        if pass >= config.max_classification_passes {
            return Err(Error::ClassificationOverrun {
                limit: config.max_classification_passes,
            });
        }

        if let Some(island) = islands.iter_mut().find(|island| island.encloses(&candidate)) {
            island.holes.push(candidate);
            continue;
        }

        let swallowed = islands.iter().position(|island| {
            !island.has_holes()
                && probe_point(&island.shell, &candidate)
                    .is_some_and(|p| point_in_polygon(p, &candidate, true))
        });

        match swallowed {
            Some(index) => {
                let old = std::mem::replace(&mut islands[index].shell, candidate);
                islands[index].holes.push(old);
                absorb_enclosed(&mut islands, index);
            }
            None => islands.push(Island::new(candidate)),
        }
    }

    tracing::debug!(
        islands = islands.len(),
        holes = islands.iter().map(|i| i.holes.len()).sum::<usize>(),
        "classified sector loops"
    );
    Ok(islands)
}

/// Move hole-less islands enclosed by `islands[target]`'s shell into its holes.
fn absorb_enclosed(islands: &mut Vec<Island>, target: usize) {
    let mut i = 0;
    while i < islands.len() {
        if i != target && !islands[i].has_holes() && islands[target].encloses(&islands[i].shell) {
            let inner = islands.remove(i);
            let target = if i < target { target - 1 } else { target };
            islands[target].holes.push(inner.shell);
            return absorb_enclosed(islands, target);
        }
        i += 1;
    }
}
