//! Per-run assignment counters.
//!
//! Workers are immutable inputs; how many shifts each one holds is a
//! side-table keyed by name. Every search iteration owns a fresh table, and
//! alternatives re-derive theirs from the grid on selection.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ScheduleGrid, Worker};

/// Worker name → number of shifts assigned in the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCounts {
    counts: HashMap<String, u32>,
}

impl AssignmentCounts {
    /// All workers at zero.
    pub fn zeroed(workers: &[Worker]) -> Self {
        Self {
            counts: workers.iter().map(|w| (w.name.clone(), 0)).collect(),
        }
    }

    /// Counts derived from a grid.
    ///
    /// Every listed worker gets an entry (zero if absent from the grid).
    pub fn from_grid(grid: &ScheduleGrid, workers: &[Worker]) -> Self {
        let mut counts = Self::zeroed(workers);
        for slot in grid.slots() {
            for name in grid.assigned(slot) {
                *counts.counts.entry(name.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Shifts held by `worker`.
    #[inline]
    pub fn get(&self, worker: &str) -> u32 {
        self.counts.get(worker).copied().unwrap_or(0)
    }

    /// Records one more shift for `worker`.
    pub fn increment(&mut self, worker: &str) {
        match self.counts.get_mut(worker) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(worker.to_string(), 1);
            }
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        self.counts.values_mut().for_each(|n| *n = 0);
    }

    /// `assigned / max(1, desired)`; 1.0 means the wish is met.
    pub fn satisfaction_ratio(&self, worker: &Worker) -> f64 {
        self.get(&worker.name) as f64 / worker.desired_shifts.max(1) as f64
    }

    /// Whether `worker` still wants more shifts.
    #[inline]
    pub fn below_desired(&self, worker: &Worker) -> bool {
        self.get(&worker.name) < worker.desired_shifts
    }

    /// Iterates `(name, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SiteConfig, SlotRef};

    #[test]
    fn test_zeroed_and_increment() {
        let workers = vec![Worker::new("Ana", 2), Worker::new("Ben", 0)];
        let mut counts = AssignmentCounts::zeroed(&workers);
        assert_eq!(counts.get("Ana"), 0);

        counts.increment("Ana");
        counts.increment("Ana");
        assert_eq!(counts.get("Ana"), 2);
        assert!(!counts.below_desired(&workers[0]));

        counts.reset();
        assert_eq!(counts.get("Ana"), 0);
        assert!(counts.below_desired(&workers[0]));
    }

    #[test]
    fn test_from_grid() {
        let site = SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22"]);
        let workers = vec![Worker::new("Ana", 2), Worker::new("Ben", 2)];
        let mut grid = ScheduleGrid::empty(&site);
        grid.assign(SlotRef::new(0, 0), "Ana");
        grid.assign(SlotRef::new(1, 1), "Ana");

        let counts = AssignmentCounts::from_grid(&grid, &workers);
        assert_eq!(counts.get("Ana"), 2);
        assert_eq!(counts.get("Ben"), 0);
        assert_eq!(counts.iter().count(), 2);
    }

    #[test]
    fn test_satisfaction_ratio() {
        let keen = Worker::new("Ana", 4);
        let none = Worker::new("Ben", 0);
        let mut counts = AssignmentCounts::zeroed(&[keen.clone(), none.clone()]);
        counts.increment("Ana");
        counts.increment("Ben");

        assert!((counts.satisfaction_ratio(&keen) - 0.25).abs() < 1e-10);
        // desired 0 divides by 1
        assert!((counts.satisfaction_ratio(&none) - 1.0).abs() < 1e-10);
    }
}
