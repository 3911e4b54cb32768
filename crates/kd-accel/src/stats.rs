//! Ray traversal counters.

use std::ops::Sub;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by every KD-tree query.
///
/// Passed by reference into each query rather than kept in global state.
/// Increments are atomic, so one instance may be shared by queries running
/// on several threads.
#[derive(Debug, Default)]
pub struct TraversalStats {
    intersection_tests: AtomicU64,
    intersections_found: AtomicU64,
}

impl TraversalStats {
    /// Creates a new set of zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one ray/triangle test.
    #[inline]
    pub fn record_test(&self) {
        self.intersection_tests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one successful ray/triangle test.
    #[inline]
    pub fn record_hit(&self) {
        self.intersections_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of ray/triangle tests attempted.
    pub fn intersection_tests(&self) -> u64 {
        self.intersection_tests.load(Ordering::Relaxed)
    }

    /// Returns the number of ray/triangle tests that found a hit.
    pub fn intersections_found(&self) -> u64 {
        self.intersections_found.load(Ordering::Relaxed)
    }

    /// Reads both counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            intersection_tests: self.intersection_tests(),
            intersections_found: self.intersections_found(),
        }
    }

    /// Resets both counters to zero.
    pub fn reset(&self) {
        self.intersection_tests.store(0, Ordering::Relaxed);
        self.intersections_found.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`TraversalStats`].
///
/// Subtracting two snapshots gives the counter deltas between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub intersection_tests: u64,
    pub intersections_found: u64,
}

impl Sub for StatsSnapshot {
    type Output = StatsSnapshot;

    fn sub(self, rhs: StatsSnapshot) -> StatsSnapshot {
        StatsSnapshot {
            intersection_tests: self.intersection_tests.saturating_sub(rhs.intersection_tests),
            intersections_found: self
                .intersections_found
                .saturating_sub(rhs.intersections_found),
        }
    }
}
