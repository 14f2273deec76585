//! Gap filling over an existing grid.
//!
//! Runs after construction or after manual edits. Every remaining vacancy is
//! offered first to workers satisfying every hard rule, then, if nobody
//! qualifies, to workers satisfying only availability, same-day exclusivity
//! and the rest chain. The desired-count goal is ignored in both tiers but
//! still decides precedence: workers below their wish go first, then the
//! usual fairness order.
//!
//! Existing assignments are never touched.

use serde::Serialize;
use tracing::{debug, info};

use crate::constraints::{EligibilityRules, Evaluator};
use crate::error::RosterError;
use crate::models::{AssignmentCounts, ScheduleGrid, SiteConfig, SlotRef, Worker};
use crate::scheduler::FairnessKey;
use crate::validation::validate_input;

/// Result of [`fill_gaps`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapFillOutcome {
    /// The grid with vacancies filled where possible.
    pub grid: ScheduleGrid,
    /// Counts derived from `grid`.
    pub counts: AssignmentCounts,
    /// Units filled by this pass.
    pub filled: usize,
    /// Units that were vacant when the pass started.
    pub attempted: usize,
}

impl GapFillOutcome {
    /// Units still vacant.
    pub fn remaining(&self) -> usize {
        self.attempted - self.filled
    }
}

/// Fills vacancies of `grid` without removing any assignment.
///
/// # Errors
/// [`RosterError::InvalidConfiguration`] if the site or workers fail
/// validation, [`RosterError::GridMismatch`] if `grid` wasn't built for
/// `site`.
///
/// # Example
///
/// ```
/// use shift_roster::fill_gaps;
/// use shift_roster::models::{ScheduleGrid, SiteConfig, Worker};
///
/// let site = SiteConfig::new(["Mon", "Tue"], ["08-16"]);
/// let workers = vec![Worker::new("Ana", 1).available_for_all(&site)];
///
/// let outcome = fill_gaps(&site, &workers, &ScheduleGrid::empty(&site)).unwrap();
/// assert_eq!(outcome.attempted, 2);
/// assert_eq!(outcome.filled, 2);
/// ```
pub fn fill_gaps(
    site: &SiteConfig,
    workers: &[Worker],
    grid: &ScheduleGrid,
) -> Result<GapFillOutcome, RosterError> {
    validate_input(site, workers)?;
    if !grid.matches(site) {
        return Err(RosterError::GridMismatch(format!(
            "expected days {:?} and shifts {:?}, got {:?} and {:?}",
            site.days,
            site.shifts,
            grid.days(),
            grid.shifts()
        )));
    }

    let eval = Evaluator::new(site);
    let mut grid = grid.clone();
    let mut counts = AssignmentCounts::from_grid(&grid, workers);
    let attempted = grid.missing_slots(site);
    let mut filled = 0;

    for slot in site.slots() {
        for _ in 0..grid.vacancies(slot, site) {
            match pick(&eval, workers, slot, &grid, &counts) {
                Some(worker) => {
                    grid.assign(slot, worker.name.clone());
                    counts.increment(&worker.name);
                    filled += 1;
                }
                None => {
                    for worker in workers {
                        let report = eval.explain(worker, slot, &grid, &counts);
                        debug!(?report, "no eligible worker for vacancy");
                    }
                    break;
                }
            }
        }
    }

    info!(filled, attempted, "gap filling finished");
    Ok(GapFillOutcome {
        grid,
        counts,
        filled,
        attempted,
    })
}

fn pick<'w>(
    eval: &Evaluator<'_>,
    workers: &'w [Worker],
    slot: SlotRef,
    grid: &ScheduleGrid,
    counts: &AssignmentCounts,
) -> Option<&'w Worker> {
    [EligibilityRules::STRICT_FILL, EligibilityRules::RELAXED_FILL]
        .into_iter()
        .find_map(|rules| {
            workers
                .iter()
                .filter(|w| eval.is_eligible(w, slot, grid, counts, rules))
                .min_by_key(|w| (!counts.below_desired(w), FairnessKey::of(w, counts)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_site() -> SiteConfig {
        SiteConfig::new(["Mon", "Tue", "Wed"], ["06-14", "14-22"])
    }

    #[test]
    fn test_fills_ignoring_desired_count() {
        let site = SiteConfig::new(["Mon", "Tue"], ["08-16"]);
        let workers = vec![Worker::new("Ana", 1).available_for_all(&site)];
        let mut grid = ScheduleGrid::empty(&site);
        grid.assign(SlotRef::new(0, 0), "Ana");

        let outcome = fill_gaps(&site, &workers, &grid).unwrap();
        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.filled, 1);
        assert_eq!(outcome.remaining(), 0);
        assert_eq!(outcome.grid.get("Tue", "08-16").unwrap(), ["Ana"]);
        assert_eq!(outcome.counts.get("Ana"), 2);
    }

    #[test]
    fn test_prefers_worker_below_desired() {
        let site = SiteConfig::new(["Mon"], ["08-16"]);
        let workers = vec![
            Worker::new("Ana", 0).available_for_all(&site),
            Worker::new("Ben", 3).available_for_all(&site),
        ];
        let outcome = fill_gaps(&site, &workers, &ScheduleGrid::empty(&site)).unwrap();
        assert_eq!(outcome.grid.get("Mon", "08-16").unwrap(), ["Ben"]);
    }

    #[test]
    fn test_relaxed_tier_breaks_weekly_cap() {
        let site = SiteConfig::new(["Mon", "Tue"], ["08-16"]).with_weekly_cap("08-16", 1);
        let workers = vec![Worker::new("Ana", 2).available_for_all(&site)];
        let mut grid = ScheduleGrid::empty(&site);
        grid.assign(SlotRef::new(0, 0), "Ana");

        let outcome = fill_gaps(&site, &workers, &grid).unwrap();
        assert_eq!(outcome.filled, 1);
        assert_eq!(outcome.grid.count_for("Ana"), 2);
    }

    #[test]
    fn test_never_breaks_adjacency_or_same_day() {
        let site = week_site();
        let workers = vec![Worker::new("Ana", 6).available_for_all(&site)];
        let mut grid = ScheduleGrid::empty(&site);
        grid.assign(SlotRef::new(0, 1), "Ana");

        let outcome = fill_gaps(&site, &workers, &grid).unwrap();
        // Mon 06-14 shares the day, Tue 06-14 and Wed 06-14 touch Ana's shifts
        assert_eq!(outcome.filled, 2);
        assert_eq!(outcome.grid.get("Tue", "14-22").unwrap(), ["Ana"]);
        assert_eq!(outcome.grid.get("Wed", "14-22").unwrap(), ["Ana"]);
        for day in 0..site.day_count() {
            let shifts = (0..site.shift_count())
                .filter(|&s| outcome.grid.occupies("Ana", SlotRef::new(day, s)))
                .count();
            assert!(shifts <= 1);
        }
        for slot in site.slots() {
            if let Some(next) = site.successor(slot) {
                assert!(!(outcome.grid.occupies("Ana", slot) && outcome.grid.occupies("Ana", next)));
            }
        }
        assert_eq!(outcome.attempted, 5);
        assert_eq!(outcome.filled + outcome.remaining(), 5);
    }

    #[test]
    fn test_keeps_existing_assignments() {
        let site = week_site();
        let workers = vec![
            Worker::new("Ana", 3).available_for_all(&site),
            Worker::new("Ben", 3).available_for_all(&site),
        ];
        let mut grid = ScheduleGrid::empty(&site);
        grid.assign(SlotRef::new(1, 0), "Zoe");

        let outcome = fill_gaps(&site, &workers, &grid).unwrap();
        assert_eq!(outcome.grid.get("Tue", "06-14").unwrap(), ["Zoe"]);
        for slot in grid.slots() {
            for name in grid.assigned(slot) {
                assert!(outcome.grid.occupies(name, slot));
            }
        }
    }

    #[test]
    fn test_grid_mismatch() {
        let site = week_site();
        let other = SiteConfig::new(["Mon"], ["06-14", "14-22"]);
        let err = fill_gaps(&site, &[], &ScheduleGrid::empty(&other)).unwrap_err();
        assert!(matches!(err, RosterError::GridMismatch(_)));
    }

    #[test]
    fn test_short_celled_grid_is_mismatch() {
        let site = SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22"]);
        let workers = vec![Worker::new("A", 2).available_for_all(&site)];
        let json = r#"{"days":["Mon","Tue"],"shifts":["06-14","14-22"],"cells":[["A"]]}"#;
        let grid: ScheduleGrid = serde_json::from_str(json).unwrap();

        let err = fill_gaps(&site, &workers, &grid).unwrap_err();
        assert!(matches!(err, RosterError::GridMismatch(_)));
    }

    #[test]
    fn test_invalid_configuration() {
        let site = SiteConfig::new(["Mon"], ["06-14"]).with_headcount("Mon", "06-14", 0);
        let err = fill_gaps(&site, &[], &ScheduleGrid::empty(&site)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
    }
}
