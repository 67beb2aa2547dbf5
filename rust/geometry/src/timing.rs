// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cumulative per-stage timing counters.
//!
//! Counters are atomics so a single triangulator can be shared across worker
//! threads. They only ever grow until [`StageTimings::reset`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Trace,
    Simplify,
    Islands,
    Cut,
    Clip,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Trace,
        Stage::Simplify,
        Stage::Islands,
        Stage::Cut,
        Stage::Clip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Trace => "trace",
            Stage::Simplify => "simplify",
            Stage::Islands => "islands",
            Stage::Cut => "cut",
            Stage::Clip => "clip",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Accumulated nanoseconds per stage plus the number of sectors seen.
#[derive(Debug, Default)]
pub struct StageTimings {
    nanos: [AtomicU64; 5],
    sectors: AtomicU64,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, stage: Stage, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.nanos[stage.slot()].fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_sector(&self) {
        self.sectors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, stage: Stage) -> Duration {
        Duration::from_nanos(self.nanos[stage.slot()].load(Ordering::Relaxed))
    }

    pub fn report(&self) -> TimingReport {
        TimingReport {
            sectors: self.sectors.load(Ordering::Relaxed),
            trace: self.get(Stage::Trace),
            simplify: self.get(Stage::Simplify),
            islands: self.get(Stage::Islands),
            cut: self.get(Stage::Cut),
            clip: self.get(Stage::Clip),
        }
    }

    pub fn reset(&self) {
        for counter in &self.nanos {
            counter.store(0, Ordering::Relaxed);
        }
        self.sectors.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of [`StageTimings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingReport {
    pub sectors: u64,
    pub trace: Duration,
    pub simplify: Duration,
    pub islands: Duration,
    pub cut: Duration,
    pub clip: Duration,
}

impl TimingReport {
    pub fn stage(&self, stage: Stage) -> Duration {
        match stage {
            Stage::Trace => self.trace,
            Stage::Simplify => self.simplify,
            Stage::Islands => self.islands,
            Stage::Cut => self.cut,
            Stage::Clip => self.clip,
        }
    }

    pub fn total(&self) -> Duration {
        Stage::ALL.iter().map(|&s| self.stage(s)).sum()
    }

    /// Emit the report at info level.
    pub fn log(&self) {
        tracing::info!(
            sectors = self.sectors,
            trace_ms = self.trace.as_secs_f64() * 1000.0,
            simplify_ms = self.simplify.as_secs_f64() * 1000.0,
            islands_ms = self.islands.as_secs_f64() * 1000.0,
            cut_ms = self.cut.as_secs_f64() * 1000.0,
            clip_ms = self.clip.as_secs_f64() * 1000.0,
            total_ms = self.total().as_secs_f64() * 1000.0,
            "Sector triangulation timings"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_report() {
        let timings = StageTimings::new();
        timings.record(Stage::Trace, Duration::from_millis(3));
        timings.record(Stage::Trace, Duration::from_millis(2));
        timings.record(Stage::Clip, Duration::from_millis(1));
        timings.record_sector();

        let report = timings.report();
        assert_eq!(report.sectors, 1);
        assert_eq!(report.trace, Duration::from_millis(5));
        assert_eq!(report.clip, Duration::from_millis(1));
        assert_eq!(report.cut, Duration::ZERO);
        assert_eq!(report.total(), Duration::from_millis(6));
    }

    #[test]
    fn test_reset() {
        let timings = StageTimings::new();
        timings.record(Stage::Cut, Duration::from_millis(4));
        timings.record_sector();
        timings.reset();
        assert_eq!(timings.report(), TimingReport::default());
    }

    #[test]
    fn test_shared_across_threads() {
        let timings = StageTimings::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        timings.record(Stage::Islands, Duration::from_nanos(10));
                        timings.record_sector();
                    }
                });
            }
        });
        let report = timings.report();
        assert_eq!(report.sectors, 400);
        assert_eq!(report.islands, Duration::from_nanos(4000));
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["trace", "simplify", "islands", "cut", "clip"]);
    }
}
