//! Equivalent-quality alternatives and their navigation.
//!
//! The search keeps every distinct grid scoring within a tolerance of the
//! best one. Callers browse them cyclically; each selection hands out an
//! independent copy of the grid together with counts re-derived from it.

use serde::Serialize;
use std::collections::HashSet;

use crate::constraints::Evaluator;
use crate::models::{AssignmentCounts, GridSignature, ScheduleGrid, SiteConfig, SlotRef, Worker};

/// One stored alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    /// The grid.
    pub grid: ScheduleGrid,
    /// Its score.
    pub score: f64,
}

/// What [`AlternativeSet::consider`] did with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consideration {
    /// New best; the set now holds only this grid.
    Improved,
    /// Within tolerance and new; appended.
    Added,
    /// Within tolerance but already stored.
    Duplicate,
    /// Too far below the best.
    Rejected,
}

/// A grid handed out by navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Deep copy of the selected alternative.
    pub grid: ScheduleGrid,
    /// Counts recomputed from `grid`.
    pub counts: AssignmentCounts,
    /// Score of the selected alternative.
    pub score: f64,
}

/// Position summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlternativeInfo {
    /// Number of stored alternatives.
    pub total: usize,
    /// 1-based cursor position (0 when empty).
    pub position: usize,
    /// Best score seen.
    pub best_score: f64,
}

/// Deduplicated set of near-best grids with a cyclic cursor.
///
/// The first entry is always the best grid found so far.
#[derive(Debug, Clone)]
pub struct AlternativeSet {
    entries: Vec<Alternative>,
    signatures: HashSet<GridSignature>,
    best_score: f64,
    cursor: usize,
    tolerance: f64,
    epsilon: f64,
}

impl AlternativeSet {
    /// Empty set with the given tolerance and improvement margin.
    pub fn new(tolerance: f64, epsilon: f64) -> Self {
        Self {
            entries: Vec::new(),
            signatures: HashSet::new(),
            best_score: f64::NEG_INFINITY,
            cursor: 0,
            tolerance,
            epsilon,
        }
    }

    /// Folds one scored candidate into the set.
    pub fn consider(&mut self, grid: ScheduleGrid, score: f64) -> Consideration {
        if score > self.best_score + self.epsilon {
            self.signatures.clear();
            self.signatures.insert(grid.signature());
            self.entries.clear();
            self.entries.push(Alternative { grid, score });
            self.best_score = score;
            self.cursor = 0;
            return Consideration::Improved;
        }
        if (score - self.best_score).abs() > self.tolerance {
            return Consideration::Rejected;
        }
        if !self.signatures.insert(grid.signature()) {
            return Consideration::Duplicate;
        }
        self.entries.push(Alternative { grid, score });
        Consideration::Added
    }

    /// Number of stored grids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score seen (−∞ when empty).
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    /// The best stored alternative.
    pub fn best(&self) -> Option<&Alternative> {
        self.entries.first()
    }

    /// The alternative under the cursor.
    pub fn current(&self) -> Option<&Alternative> {
        self.entries.get(self.cursor)
    }

    /// All stored alternatives, best first.
    pub fn iter(&self) -> impl Iterator<Item = &Alternative> {
        self.entries.iter()
    }

    /// Moves the cursor forward (wrapping) and returns the new selection.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, workers: &[Worker]) -> Option<Selection> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.select(workers)
    }

    /// Moves the cursor backward (wrapping) and returns the new selection.
    pub fn previous(&mut self, workers: &[Worker]) -> Option<Selection> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + self.entries.len() - 1) % self.entries.len();
        self.select(workers)
    }

    /// Copy of the alternative under the cursor.
    pub fn select(&self, workers: &[Worker]) -> Option<Selection> {
        let entry = self.current()?;
        let grid = entry.grid.clone();
        let counts = AssignmentCounts::from_grid(&grid, workers);
        Some(Selection {
            grid,
            counts,
            score: entry.score,
        })
    }

    /// Cursor summary.
    pub fn info(&self) -> AlternativeInfo {
        AlternativeInfo {
            total: self.entries.len(),
            position: if self.entries.is_empty() {
                0
            } else {
                self.cursor + 1
            },
            best_score: self.best_score,
        }
    }
}

/// Neighbours of `grid` obtained by moving one worker to another shift of
/// the same day.
///
/// A move needs a vacancy in the target shift, the worker's availability for
/// it, room under the target label's weekly cap, and no adjacency conflict
/// once the worker has left the source shift. Day membership is unchanged, so
/// same-day and consecutive-day rules hold by construction.
///
/// A grid not shaped like `site` has no neighbours.
pub fn same_day_swaps(site: &SiteConfig, workers: &[Worker], grid: &ScheduleGrid) -> Vec<ScheduleGrid> {
    let eval = Evaluator::new(site);
    let mut neighbours = Vec::new();
    if !grid.matches(site) {
        return neighbours;
    }

    for day in 0..site.day_count() {
        for from in 0..site.shift_count() {
            let source = SlotRef::new(day, from);
            for to in (0..site.shift_count()).filter(|&to| to != from) {
                let target = SlotRef::new(day, to);
                if grid.vacancies(target, site) == 0 {
                    continue;
                }
                for name in grid.assigned(source) {
                    let Some(worker) = workers.iter().find(|w| &w.name == name) else {
                        continue;
                    };
                    if !eval.is_available(worker, target) {
                        continue;
                    }
                    let mut candidate = grid.clone();
                    candidate.unassign(source, name);
                    if eval.has_adjacent_shift(name, target, &candidate)
                        || !eval.respects_weekly_cap(name, target, &candidate)
                    {
                        continue;
                    }
                    candidate.assign(target, name.clone());
                    neighbours.push(candidate);
                }
            }
        }
    }

    neighbours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22", "22-06"])
    }

    fn grid_with(site: &SiteConfig, cells: &[(usize, usize, &str)]) -> ScheduleGrid {
        let mut grid = ScheduleGrid::empty(site);
        for &(d, s, name) in cells {
            grid.assign(SlotRef::new(d, s), name);
        }
        grid
    }

    #[test]
    fn test_improvement_resets_set() {
        let site = site();
        let mut set = AlternativeSet::new(20.0, 1e-6);
        assert_eq!(set.consider(grid_with(&site, &[(0, 0, "A")]), -100.0), Consideration::Improved);
        assert_eq!(set.consider(grid_with(&site, &[(0, 1, "A")]), -110.0), Consideration::Added);
        assert_eq!(set.len(), 2);

        assert_eq!(set.consider(grid_with(&site, &[(1, 0, "A")]), -50.0), Consideration::Improved);
        assert_eq!(set.len(), 1);
        assert!((set.best_score() - -50.0).abs() < 1e-10);
    }

    #[test]
    fn test_tolerance_and_dedup() {
        let site = site();
        let mut set = AlternativeSet::new(20.0, 1e-6);
        set.consider(grid_with(&site, &[(0, 0, "A")]), -100.0);

        assert_eq!(set.consider(grid_with(&site, &[(0, 0, "A")]), -100.0), Consideration::Duplicate);
        assert_eq!(set.consider(grid_with(&site, &[(0, 2, "A")]), -121.0), Consideration::Rejected);
        assert_eq!(set.consider(grid_with(&site, &[(0, 2, "A")]), -120.0), Consideration::Added);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_epsilon_is_not_improvement() {
        let site = site();
        let mut set = AlternativeSet::new(20.0, 1e-6);
        set.consider(grid_with(&site, &[(0, 0, "A")]), -100.0);
        assert_eq!(set.consider(grid_with(&site, &[(0, 1, "A")]), -100.0 + 1e-9), Consideration::Added);
        assert_eq!(set.best().unwrap().grid, grid_with(&site, &[(0, 0, "A")]));
    }

    #[test]
    fn test_cyclic_navigation() {
        let site = site();
        let workers = vec![Worker::new("A", 1)];
        let mut set = AlternativeSet::new(20.0, 1e-6);
        set.consider(grid_with(&site, &[(0, 0, "A")]), -10.0);
        set.consider(grid_with(&site, &[(0, 1, "A")]), -12.0);
        set.consider(grid_with(&site, &[(0, 2, "A")]), -15.0);

        assert_eq!(set.info().position, 1);
        let sel = set.next(&workers).unwrap();
        assert_eq!(sel.grid.get("Mon", "14-22").unwrap(), ["A"]);
        assert_eq!(sel.counts.get("A"), 1);
        assert_eq!(set.info().position, 2);

        set.next(&workers);
        let wrapped = set.next(&workers).unwrap();
        assert_eq!(set.info().position, 1);
        assert!((wrapped.score - -10.0).abs() < 1e-10);

        let back = set.previous(&workers).unwrap();
        assert_eq!(set.info().position, 3);
        assert!((back.score - -15.0).abs() < 1e-10);
        assert_eq!(set.info().total, 3);
    }

    #[test]
    fn test_selection_is_independent_copy() {
        let site = site();
        let mut set = AlternativeSet::new(20.0, 1e-6);
        set.consider(grid_with(&site, &[(0, 0, "A")]), -10.0);
        let mut sel = set.select(&[]).unwrap();
        sel.grid.assign(SlotRef::new(1, 1), "B");
        assert_eq!(set.current().unwrap().grid.assignment_count(), 1);
    }

    #[test]
    fn test_empty_set_navigation() {
        let mut set = AlternativeSet::new(20.0, 1e-6);
        assert!(set.next(&[]).is_none());
        assert!(set.previous(&[]).is_none());
        assert_eq!(set.info().position, 0);
        assert_eq!(set.info().total, 0);
    }

    #[test]
    fn test_same_day_swaps() {
        let site = site();
        let workers = vec![
            Worker::new("A", 1).available_for_all(&site),
            Worker::new("B", 1).with_availability("Tue", ["22-06"]),
        ];
        // A may move to either other Mon shift; B can only work where it is
        let grid = grid_with(&site, &[(0, 0, "A"), (1, 2, "B")]);
        let swaps = same_day_swaps(&site, &workers, &grid);

        assert_eq!(swaps.len(), 2);
        for swap in &swaps {
            assert_eq!(swap.assignment_count(), 2);
            assert!(swap.works_day("A", 0));
            assert!(!swap.occupies("A", SlotRef::new(0, 0)));
        }
    }

    #[test]
    fn test_swap_respects_weekly_cap() {
        let site = site().with_weekly_cap("22-06", 1);
        let workers = vec![Worker::new("A", 2).available_for_all(&site)];
        // A already holds its one Tue 22-06, so Mon 14-22 may only go to 06-14
        let grid = grid_with(&site, &[(0, 1, "A"), (1, 2, "A")]);
        let swaps = same_day_swaps(&site, &workers, &grid);

        assert!(swaps
            .iter()
            .all(|g| !g.occupies("A", SlotRef::new(0, 2))));
        assert!(swaps.iter().any(|g| g.occupies("A", SlotRef::new(0, 0))));
    }

    #[test]
    fn test_swaps_of_misshapen_grid() {
        let workers = vec![Worker::new("A", 1).available_for_all(&site())];
        let json = r#"{"days":["Mon","Tue"],"shifts":["06-14","14-22","22-06"],"cells":[["A"]]}"#;
        let grid: ScheduleGrid = serde_json::from_str(json).unwrap();
        assert!(same_day_swaps(&site(), &workers, &grid).is_empty());
    }

    #[test]
    fn test_swap_respects_adjacency() {
        let site = site();
        let workers = vec![Worker::new("A", 2).available_for_all(&site)];
        // A on Mon 06-14 and Tue 06-14: moving Mon → 22-06 touches Tue 06-14
        let grid = grid_with(&site, &[(0, 0, "A"), (1, 0, "A")]);
        let swaps = same_day_swaps(&site, &workers, &grid);

        assert!(swaps
            .iter()
            .all(|g| !g.occupies("A", SlotRef::new(0, 2))));
    }
}
