//! Eligibility predicates over a candidate grid.
//!
//! Every predicate is pure and read-only: it inspects a worker, a target
//! slot and the grid under evaluation, and never mutates either. The search
//! engine and the post-processing passes compose them through
//! [`Evaluator::is_eligible`] with an [`EligibilityRules`] tier.
//!
//! | Predicate | Rule |
//! |-----------|------|
//! | `is_available` | worker declared the (day, shift) |
//! | `works_day` | worker already holds a cell that day (one shift per day) |
//! | `has_adjacent_shift` | worker holds the chain predecessor or successor (rest) |
//! | `respects_weekly_cap` | one more of this shift label stays within the cap |
//! | `consecutive_day_count` | length of the worked run ending at a day |

use serde::Serialize;

use crate::models::{AssignmentCounts, ScheduleGrid, SiteConfig, SlotRef, Worker};

/// Which predicates an eligibility check enforces.
///
/// Availability, same-day exclusivity and the rest chain are always
/// enforced; only the caps and the desired-count goal can be relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Enforce the per-shift-label weekly cap.
    pub weekly_cap: bool,
    /// Enforce the consecutive-day cap.
    pub consecutive_days: bool,
    /// Require the worker to be below their desired shift count.
    pub below_desired: bool,
}

impl EligibilityRules {
    /// Primary construction: every rule, including the desired-count goal.
    pub const CONSTRUCTION: Self = Self {
        weekly_cap: true,
        consecutive_days: true,
        below_desired: true,
    };

    /// First gap-filling tier: every hard rule, desired count ignored.
    pub const STRICT_FILL: Self = Self {
        weekly_cap: true,
        consecutive_days: true,
        below_desired: false,
    };

    /// Second gap-filling tier: caps relaxed, rest and same-day kept.
    pub const RELAXED_FILL: Self = Self {
        weekly_cap: false,
        consecutive_days: false,
        below_desired: false,
    };
}

/// Outcome of every predicate for one (worker, slot), for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    /// Worker name.
    pub worker: String,
    /// Day label of the slot.
    pub day: String,
    /// Shift label of the slot.
    pub shift: String,
    /// Declared available.
    pub available: bool,
    /// Already works that day.
    pub works_day: bool,
    /// Holds a chain-adjacent slot.
    pub adjacent_shift: bool,
    /// One more of this label stays within the weekly cap.
    pub within_weekly_cap: bool,
    /// Run of consecutive days the assignment would produce.
    pub run_if_assigned: u32,
    /// Shifts currently held.
    pub assigned: u32,
    /// Shifts wanted.
    pub desired: u32,
}

/// Evaluates eligibility predicates against one site.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    site: &'a SiteConfig,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for `site`.
    pub fn new(site: &'a SiteConfig) -> Self {
        Self { site }
    }

    /// The site this evaluator checks against.
    pub fn site(&self) -> &'a SiteConfig {
        self.site
    }

    /// Whether the shift label is in the worker's availability for that day.
    #[inline]
    pub fn is_available(&self, worker: &Worker, slot: SlotRef) -> bool {
        worker.is_available(self.site.day_label(slot), self.site.shift_label(slot))
    }

    /// Whether the worker holds the slot immediately before or after `slot`.
    pub fn has_adjacent_shift(&self, worker: &str, slot: SlotRef, grid: &ScheduleGrid) -> bool {
        self.site
            .neighbors(slot)
            .any(|neighbor| grid.occupies(worker, neighbor))
    }

    /// Whether the worker already holds any slot on `day`.
    #[inline]
    pub fn works_day(&self, worker: &str, day: usize, grid: &ScheduleGrid) -> bool {
        grid.works_day(worker, day)
    }

    /// Whether one more `slot.shift` assignment stays within the weekly cap.
    pub fn respects_weekly_cap(&self, worker: &str, slot: SlotRef, grid: &ScheduleGrid) -> bool {
        let cap = self.site.weekly_cap(self.site.shift_label(slot));
        cap == 0 || grid.count_for_shift(worker, slot.shift) < cap
    }

    /// Days worked in an unbroken run ending at `day` (inclusive).
    ///
    /// Counts backward in chain order and stops at the first day off, so a
    /// day the worker doesn't work yields 0.
    pub fn consecutive_day_count(&self, worker: &str, day: usize, grid: &ScheduleGrid) -> u32 {
        if day >= self.site.day_count() {
            return 0;
        }
        (0..=day)
            .rev()
            .take_while(|&d| grid.works_day(worker, d))
            .count() as u32
    }

    /// Length of the worked run that would contain `day` if the worker took it.
    ///
    /// Joins the run ending the day before with the run starting the day
    /// after; days are filled out of order, so both sides may be staffed.
    pub fn run_length_if_assigned(&self, worker: &str, day: usize, grid: &ScheduleGrid) -> u32 {
        let before = if day == 0 {
            0
        } else {
            self.consecutive_day_count(worker, day - 1, grid)
        };
        let after = (day + 1..self.site.day_count())
            .take_while(|&d| grid.works_day(worker, d))
            .count() as u32;
        before + 1 + after
    }

    /// Whether taking `day` keeps the worker within the consecutive-day cap.
    #[inline]
    pub fn respects_consecutive_cap(&self, worker: &str, day: usize, grid: &ScheduleGrid) -> bool {
        self.run_length_if_assigned(worker, day, grid) <= self.site.max_consecutive_days
    }

    /// Composed eligibility filter.
    pub fn is_eligible(
        &self,
        worker: &Worker,
        slot: SlotRef,
        grid: &ScheduleGrid,
        counts: &AssignmentCounts,
        rules: EligibilityRules,
    ) -> bool {
        let name = worker.name.as_str();
        self.is_available(worker, slot)
            && !self.works_day(name, slot.day, grid)
            && !self.has_adjacent_shift(name, slot, grid)
            && (!rules.weekly_cap || self.respects_weekly_cap(name, slot, grid))
            && (!rules.below_desired || counts.below_desired(worker))
            && (!rules.consecutive_days || self.respects_consecutive_cap(name, slot.day, grid))
    }

    /// Evaluates every predicate, for diagnostics.
    pub fn explain(
        &self,
        worker: &Worker,
        slot: SlotRef,
        grid: &ScheduleGrid,
        counts: &AssignmentCounts,
    ) -> EligibilityReport {
        let name = worker.name.as_str();
        EligibilityReport {
            worker: worker.name.clone(),
            day: self.site.day_label(slot).to_string(),
            shift: self.site.shift_label(slot).to_string(),
            available: self.is_available(worker, slot),
            works_day: self.works_day(name, slot.day, grid),
            adjacent_shift: self.has_adjacent_shift(name, slot, grid),
            within_weekly_cap: self.respects_weekly_cap(name, slot, grid),
            run_if_assigned: self.run_length_if_assigned(name, slot.day, grid),
            assigned: counts.get(name),
            desired: worker.desired_shifts,
        }
    }
}
