//! Schedule grid (solution) model.
//!
//! A grid maps every (day, shift) of a site to the ordered list of worker
//! names filling it. Workers are referenced by name only, so cloning a grid
//! is a cheap, fully independent deep copy: stored candidates, alternatives
//! and the active roster never alias each other.
//!
//! # Invariants
//! Maintained by the search and post-processing passes (not by the type):
//! - no name appears twice among the cells of one day;
//! - a cell never holds more names than its slot capacity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{SiteConfig, SlotRef};

/// A (possibly partial) weekly roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    days: Vec<String>,
    shifts: Vec<String>,
    /// Row-major `days × shifts` cells.
    cells: Vec<Vec<String>>,
}

/// Canonical structural key of a grid, used to deduplicate alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridSignature(Vec<Vec<String>>);

impl ScheduleGrid {
    /// Creates an empty grid shaped like `site`.
    pub fn empty(site: &SiteConfig) -> Self {
        Self {
            days: site.days.clone(),
            shifts: site.shifts.clone(),
            cells: vec![Vec::new(); site.days.len() * site.shifts.len()],
        }
    }

    /// Day labels in configured order.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Shift labels in configured order.
    pub fn shifts(&self) -> &[String] {
        &self.shifts
    }

    /// Whether this grid has the same days and shifts as `site` and one cell
    /// per (day, shift).
    ///
    /// Deserialized grids are only safe to index after this check.
    pub fn matches(&self, site: &SiteConfig) -> bool {
        self.days == site.days
            && self.shifts == site.shifts
            && self.cells.len() == self.days.len() * self.shifts.len()
    }

    #[inline]
    fn index(&self, slot: SlotRef) -> usize {
        slot.day * self.shifts.len() + slot.shift
    }

    /// Names assigned to a slot, in assignment order.
    #[inline]
    pub fn assigned(&self, slot: SlotRef) -> &[String] {
        &self.cells[self.index(slot)]
    }

    /// Label lookup of a cell. Unknown labels yield `None`.
    pub fn get(&self, day: &str, shift: &str) -> Option<&[String]> {
        let d = self.days.iter().position(|x| x == day)?;
        let s = self.shifts.iter().position(|x| x == shift)?;
        Some(self.assigned(SlotRef::new(d, s)))
    }

    /// Whether `worker` fills `slot`.
    #[inline]
    pub fn occupies(&self, worker: &str, slot: SlotRef) -> bool {
        self.assigned(slot).iter().any(|n| n == worker)
    }

    /// Whether `worker` fills any cell of `day`.
    pub fn works_day(&self, worker: &str, day: usize) -> bool {
        (0..self.shifts.len()).any(|s| self.occupies(worker, SlotRef::new(day, s)))
    }

    /// Appends `worker` to a slot.
    pub fn assign(&mut self, slot: SlotRef, worker: impl Into<String>) {
        let idx = self.index(slot);
        self.cells[idx].push(worker.into());
    }

    /// Removes `worker` from a slot, returning the position it held.
    pub fn unassign(&mut self, slot: SlotRef, worker: &str) -> Option<usize> {
        let idx = self.index(slot);
        let pos = self.cells[idx].iter().position(|n| n == worker)?;
        self.cells[idx].remove(pos);
        Some(pos)
    }

    /// Puts `worker` back at `position` (used to roll back a trial move).
    pub(crate) fn restore(&mut self, slot: SlotRef, position: usize, worker: impl Into<String>) {
        let idx = self.index(slot);
        let pos = position.min(self.cells[idx].len());
        self.cells[idx].insert(pos, worker.into());
    }

    /// All slots in chain order.
    pub fn slots(&self) -> impl Iterator<Item = SlotRef> + '_ {
        let shifts = self.shifts.len();
        (0..self.days.len()).flat_map(move |d| (0..shifts).map(move |s| SlotRef::new(d, s)))
    }

    /// Unfilled capacity units of one slot.
    #[inline]
    pub fn vacancies(&self, slot: SlotRef, site: &SiteConfig) -> usize {
        site.capacity(slot).saturating_sub(self.assigned(slot).len())
    }

    /// Unfilled capacity units across the whole grid.
    pub fn missing_slots(&self, site: &SiteConfig) -> usize {
        self.slots().map(|slot| self.vacancies(slot, site)).sum()
    }

    /// Unfilled capacity units per day, indexed like `days()`.
    pub fn holes_per_day(&self, site: &SiteConfig) -> Vec<usize> {
        (0..self.days.len())
            .map(|d| {
                (0..self.shifts.len())
                    .map(|s| self.vacancies(SlotRef::new(d, s), site))
                    .sum()
            })
            .collect()
    }

    /// Number of cells `worker` fills.
    pub fn count_for(&self, worker: &str) -> u32 {
        self.cells
            .iter()
            .filter(|cell| cell.iter().any(|n| n == worker))
            .count() as u32
    }

    /// Number of cells `worker` fills with a given shift label.
    pub fn count_for_shift(&self, worker: &str, shift: usize) -> u32 {
        (0..self.days.len())
            .filter(|&d| self.occupies(worker, SlotRef::new(d, shift)))
            .count() as u32
    }

    /// Shift label → number of cells `worker` fills with it.
    pub fn count_by_shift(&self, worker: &str) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for (s, label) in self.shifts.iter().enumerate() {
            let n = self.count_for_shift(worker, s);
            if n > 0 {
                counts.insert(label.clone(), n);
            }
        }
        counts
    }

    /// Total number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Canonical signature for deduplication.
    pub fn signature(&self) -> GridSignature {
        GridSignature(self.cells.clone())
    }
}
