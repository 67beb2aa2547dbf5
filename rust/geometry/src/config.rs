// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulation limits and tolerances.
//!
//! The iteration ceilings are the only termination guarantee the pipeline has
//! on malformed input (cyclic edge graphs, self-overlapping loops). Hitting one
//! is always reported as its own error variant, never as a silently truncated
//! result, with the single exception of [`ClipPolicy::BestEffort`].

/// Maximum number of loops traced from one sector's edges
pub const MAX_TRACED_LOOPS: usize = 1000;
/// Maximum number of steps in a single loop walk
pub const MAX_WALK_STEPS: usize = 1000;
/// Maximum number of loops classified into islands
pub const MAX_CLASSIFICATION_PASSES: usize = 10_000;
/// Maximum number of holes bridged into one island
pub const MAX_BRIDGES_PER_ISLAND: usize = 100;
/// Maximum number of rejected ear candidates before clipping gives up
pub const MAX_CLIP_ATTEMPTS: usize = 5000;
/// Angle (radians) under which three points count as collinear
pub const COLLINEAR_EPSILON: f64 = 0.05;

/// What to do when ear clipping runs out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipPolicy {
    /// Keep the triangles found so far and log a warning.
    #[default]
    BestEffort,
    /// Fail the sector with [`crate::Error::ClipOverrun`].
    Strict,
}

/// Triangulation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationConfig {
    pub max_traced_loops: usize,
    pub max_walk_steps: usize,
    pub max_classification_passes: usize,
    pub max_bridges_per_island: usize,
    pub max_clip_attempts: usize,
    pub collinear_epsilon: f64,
    pub clip_policy: ClipPolicy,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            max_traced_loops: MAX_TRACED_LOOPS,
            max_walk_steps: MAX_WALK_STEPS,
            max_classification_passes: MAX_CLASSIFICATION_PASSES,
            max_bridges_per_island: MAX_BRIDGES_PER_ISLAND,
            max_clip_attempts: MAX_CLIP_ATTEMPTS,
            collinear_epsilon: COLLINEAR_EPSILON,
            clip_policy: ClipPolicy::BestEffort,
        }
    }
}

impl TriangulationConfig {
    pub fn with_max_traced_loops(mut self, limit: usize) -> Self {
        self.max_traced_loops = limit;
        self
    }

    pub fn with_max_walk_steps(mut self, limit: usize) -> Self {
        self.max_walk_steps = limit;
        self
    }

    pub fn with_max_classification_passes(mut self, limit: usize) -> Self {
        self.max_classification_passes = limit;
        self
    }

    pub fn with_max_bridges_per_island(mut self, limit: usize) -> Self {
        self.max_bridges_per_island = limit;
        self
    }

    pub fn with_max_clip_attempts(mut self, limit: usize) -> Self {
        self.max_clip_attempts = limit;
        self
    }

    pub fn with_collinear_epsilon(mut self, epsilon: f64) -> Self {
        self.collinear_epsilon = epsilon;
        self
    }

    pub fn with_clip_policy(mut self, policy: ClipPolicy) -> Self {
        self.clip_policy = policy;
        self
    }

    /// Shorthand for `with_clip_policy(ClipPolicy::Strict)`.
    pub fn strict(self) -> Self {
        self.with_clip_policy(ClipPolicy::Strict)
    }
}
