// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loop simplification: drops repeated and collinear points.

use crate::error::{Error, Result};
use crate::predicates::collinear;
use crate::Point2;

/// Remove repeated points and points collinear with their neighbours.
///
/// Removal repeats until the loop is stable. A loop left with fewer than three
/// points fails with [`Error::DegenerateLoop`].
pub fn simplify_loop(mut points: Vec<Point2<f64>>, epsilon: f64) -> Result<Vec<Point2<f64>>> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    loop {
        if points.len() < 3 {
            return Err(Error::DegenerateLoop {
                points: points.len(),
            });
        }

        let before = points.len();
        let mut i = 0;
        while i < points.len() && points.len() >= 3 {
            let n = points.len();
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            if collinear(prev, points[i], next, epsilon) {
                points.remove(i);
            } else {
                i += 1;
            }
        }

        if points.len() == before {
            return Ok(points);
        }
    }
}
