use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;

use crate::{geom::Axis, report::Placement};

/// Per-axis outcome tallies.
#[derive(Default)]
struct AxisCounters {
    flipped: AtomicU64,
    clamped: AtomicU64,
}

impl AxisCounters {
    fn record(&self, flipped: bool, clamped: bool) {
        if flipped {
            self.flipped.fetch_add(1, Ordering::Relaxed);
        }
        if clamped {
            self.clamped.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> AxisSnapshot {
        AxisSnapshot {
            flipped: self.flipped.load(Ordering::Relaxed),
            clamped: self.clamped.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.flipped.store(0, Ordering::Relaxed);
        self.clamped.store(0, Ordering::Relaxed);
    }
}

/// Aggregate counters for solves and placements.
#[derive(Default)]
pub(crate) struct PlacementCounters {
    solves: AtomicU64,
    x: AxisCounters,
    y: AxisCounters,
    rule_solves: AtomicU64,
    rule_unsatisfied: AtomicU64,
    placed: AtomicU64,
    callbacks: AtomicU64,
    failures: AtomicU64,
}

impl PlacementCounters {
    fn axis(&self, axis: Axis) -> &AxisCounters {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub(crate) fn record_solve(&self, p: &Placement) {
        self.solves.fetch_add(1, Ordering::Relaxed);
        self.axis(Axis::X).record(p.flipped_x, p.offset_x != 0);
        self.axis(Axis::Y).record(p.flipped_y, p.offset_y != 0);
    }

    pub(crate) fn record_rule_solve(&self, satisfied: bool) {
        self.rule_solves.fetch_add(1, Ordering::Relaxed);
        if !satisfied {
            self.rule_unsatisfied.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_placed(&self, notified: bool) {
        self.placed.fetch_add(1, Ordering::Relaxed);
        if notified {
            self.callbacks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PlacementCountersSnapshot {
        PlacementCountersSnapshot {
            solves: self.solves.load(Ordering::Relaxed),
            x: self.x.snapshot(),
            y: self.y.snapshot(),
            rule_solves: self.rule_solves.load(Ordering::Relaxed),
            rule_unsatisfied: self.rule_unsatisfied.load(Ordering::Relaxed),
            placed: self.placed.load(Ordering::Relaxed),
            callbacks: self.callbacks.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.solves.store(0, Ordering::Relaxed);
        self.x.reset();
        self.y.reset();
        self.rule_solves.store(0, Ordering::Relaxed);
        self.rule_unsatisfied.store(0, Ordering::Relaxed);
        self.placed.store(0, Ordering::Relaxed);
        self.callbacks.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

/// Per-axis flip and clamp totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisSnapshot {
    /// Solves that adopted the flipped candidate on this axis.
    pub flipped: u64,
    /// Solves that had to clamp on this axis.
    pub clamped: u64,
}

/// Snapshot of placement counters for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementCountersSnapshot {
    /// Anchor solves completed.
    pub solves: u64,
    /// Horizontal outcomes.
    pub x: AxisSnapshot,
    /// Vertical outcomes.
    pub y: AxisSnapshot,
    /// Rule-based solves attempted.
    pub rule_solves: u64,
    /// Rule-based solves that found no non-conflicting pair.
    pub rule_unsatisfied: u64,
    /// Windows moved by `place_window` or `rules::move_window`.
    pub placed: u64,
    /// Position callbacks invoked.
    pub callbacks: u64,
    /// `place_window` calls that returned an error.
    pub failures: u64,
}

pub(crate) static PLACEMENT_COUNTERS: Lazy<PlacementCounters> =
    Lazy::new(PlacementCounters::default);

/// Current placement counters.
pub fn placement_counters_snapshot() -> PlacementCountersSnapshot {
    PLACEMENT_COUNTERS.snapshot()
}

/// Zero all placement counters.
pub fn placement_counters_reset() {
    PLACEMENT_COUNTERS.reset();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_counters_track_axes() {
        let c = PlacementCounters::default();
        c.record_solve(&Placement {
            flipped_y: true,
            offset_x: 3,
            ..Placement::default()
        });
        c.record_solve(&Placement::default());
        c.record_rule_solve(false);
        c.record_placed(true);
        let s = c.snapshot();
        assert_eq!(s.solves, 2);
        assert_eq!(s.x, AxisSnapshot { flipped: 0, clamped: 1 });
        assert_eq!(s.y, AxisSnapshot { flipped: 1, clamped: 0 });
        assert_eq!((s.rule_solves, s.rule_unsatisfied), (1, 1));
        assert_eq!((s.placed, s.callbacks), (1, 1));
        c.reset();
        assert_eq!(c.snapshot(), PlacementCountersSnapshot::default());
    }
}
