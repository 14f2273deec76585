//! Roster quality score.
//!
//! A grid's score is the negative weighted sum of its penalty terms, so
//! higher is better and a perfect roster scores 0.
//!
//! # Terms
//!
//! | Term | Definition |
//! |------|-----------|
//! | Missing | Unfilled capacity units |
//! | Adjacent | (worker, slot) pairs whose worker also holds a chain neighbour |
//! | Deviation | Σ \|assigned − desired\| over workers |
//! | Weekly cap excess | Σ max(0, count − cap) per worker and capped label |
//! | Consecutive excess | (worker, day) pairs inside a run longer than the cap |
//! | Inequity | Σ \|ratio − mean ratio\| over workers |
//! | Concentration | Σ max(0, holes on day − 1) over days |
//!
//! Scoring is pure: the same inputs always give the same value.

use serde::Serialize;
use std::collections::BTreeSet;

use super::config::{ScoreWeights, ShiftMode};
use crate::constraints::Evaluator;
use crate::models::{ScheduleGrid, SiteConfig, Worker};

/// Raw penalty terms of one grid, plus the weighted total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Unfilled capacity units.
    pub missing: usize,
    /// Adjacent-shift violations.
    pub adjacent: usize,
    /// Sum of |assigned − desired|.
    pub deviation: u32,
    /// Shifts beyond weekly caps.
    pub weekly_cap_excess: u32,
    /// (worker, day) pairs past the consecutive-day cap.
    pub consecutive_excess: u32,
    /// Spread of satisfaction ratios around their mean.
    pub inequity: f64,
    /// Holes beyond the first on each day.
    pub concentration: usize,
    total: f64,
}

impl ScoreBreakdown {
    /// Computes every term for `grid`.
    pub fn calculate(
        site: &SiteConfig,
        workers: &[Worker],
        grid: &ScheduleGrid,
        mode: ShiftMode,
        weights: &ScoreWeights,
    ) -> Self {
        let eval = Evaluator::new(site);
        let names: BTreeSet<&str> = grid
            .slots()
            .flat_map(|slot| grid.assigned(slot).iter().map(String::as_str))
            .collect();

        let missing = grid.missing_slots(site);

        // A shared link is seen from both of its slots.
        let adjacent: usize = grid
            .slots()
            .map(|slot| {
                grid.assigned(slot)
                    .iter()
                    .filter(|name| eval.has_adjacent_shift(name, slot, grid))
                    .count()
            })
            .sum();

        let deviation: u32 = workers
            .iter()
            .map(|w| grid.count_for(&w.name).abs_diff(w.desired_shifts))
            .sum();

        let mut weekly_cap_excess = 0;
        for (s, label) in site.shifts.iter().enumerate() {
            let cap = site.weekly_cap(label);
            if cap == 0 {
                continue;
            }
            for name in &names {
                weekly_cap_excess += grid.count_for_shift(name, s).saturating_sub(cap);
            }
        }

        let mut consecutive_excess = 0;
        for name in &names {
            for day in 0..site.day_count() {
                if eval.consecutive_day_count(name, day, grid) > site.max_consecutive_days {
                    consecutive_excess += 1;
                }
            }
        }

        let inequity = if workers.is_empty() {
            0.0
        } else {
            let ratios: Vec<f64> = workers
                .iter()
                .map(|w| grid.count_for(&w.name) as f64 / w.desired_shifts.max(1) as f64)
                .collect();
            let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
            ratios.iter().map(|r| (r - mean).abs()).sum()
        };

        let concentration: usize = grid
            .holes_per_day(site)
            .into_iter()
            .map(|holes| holes.saturating_sub(1))
            .sum();

        let penalty = missing as f64 * weights.missing
            + adjacent as f64 * weights.adjacent_weight(mode)
            + f64::from(consecutive_excess) * weights.consecutive
            + f64::from(weekly_cap_excess) * weights.weekly_cap
            + inequity * weights.inequity
            + f64::from(deviation) * weights.deviation
            + concentration as f64 * weights.concentration;

        Self {
            missing,
            adjacent,
            deviation,
            weekly_cap_excess,
            consecutive_excess,
            inequity,
            concentration,
            total: -penalty,
        }
    }

    /// Weighted score (higher is better, 0 is perfect).
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Whether no hard term (missing, adjacent, caps) is violated.
    pub fn is_clean(&self) -> bool {
        self.missing == 0
            && self.adjacent == 0
            && self.weekly_cap_excess == 0
            && self.consecutive_excess == 0
    }
}

/// Every penalty term of `grid`.
pub fn score_breakdown(
    site: &SiteConfig,
    workers: &[Worker],
    grid: &ScheduleGrid,
    mode: ShiftMode,
    weights: &ScoreWeights,
) -> ScoreBreakdown {
    ScoreBreakdown::calculate(site, workers, grid, mode, weights)
}

/// Weighted score of `grid`.
pub fn score(
    site: &SiteConfig,
    workers: &[Worker],
    grid: &ScheduleGrid,
    mode: ShiftMode,
    weights: &ScoreWeights,
) -> f64 {
    ScoreBreakdown::calculate(site, workers, grid, mode, weights).total()
}
