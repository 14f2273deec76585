//! Site configuration model.
//!
//! A site defines the shape of the week: an ordered list of days, an ordered
//! list of shift labels, how many people each (day, shift) needs, and the
//! per-worker caps that apply to every run.
//!
//! # Chain order
//! Slots form a single chain: every shift of the first day in configured
//! order, then every shift of the second day, and so on. The chain is used
//! for rest checks (a worker may not hold two neighbouring links). It does
//! not wrap around the week.
//!
//! Sites with a single shift per day have no cross-day links: working the
//! same shift on consecutive days is limited by `max_consecutive_days`, not
//! by the rest chain.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default cap on consecutive working days.
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 6;

/// Position of one (day, shift) cell, as indices into a [`SiteConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotRef {
    /// Index into `SiteConfig::days`.
    pub day: usize,
    /// Index into `SiteConfig::shifts`.
    pub shift: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    #[inline]
    pub fn new(day: usize, shift: usize) -> Self {
        Self { day, shift }
    }
}

/// Configuration of one staffed site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Ordered, distinct day labels.
    pub days: Vec<String>,
    /// Ordered, distinct shift labels (e.g. `"06-14"`).
    pub shifts: Vec<String>,
    /// Day → shift → number of people required. Missing entries mean 1.
    #[serde(default)]
    pub headcount: HashMap<String, HashMap<String, i32>>,
    /// Shift label → max times one worker may take it (0 or missing = unlimited).
    #[serde(default)]
    pub weekly_caps: HashMap<String, u32>,
    /// Longest allowed run of consecutive working days.
    #[serde(default = "default_max_consecutive_days")]
    pub max_consecutive_days: u32,
}

fn default_max_consecutive_days() -> u32 {
    DEFAULT_MAX_CONSECUTIVE_DAYS
}

impl SiteConfig {
    /// Creates a site with headcount 1 everywhere and no weekly caps.
    pub fn new<D, S>(days: D, shifts: S) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            shifts: shifts.into_iter().map(Into::into).collect(),
            headcount: HashMap::new(),
            weekly_caps: HashMap::new(),
            max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
        }
    }

    /// Sets the headcount of one (day, shift).
    pub fn with_headcount(
        mut self,
        day: impl Into<String>,
        shift: impl Into<String>,
        people: i32,
    ) -> Self {
        self.headcount
            .entry(day.into())
            .or_default()
            .insert(shift.into(), people);
        self
    }

    /// Sets the same headcount for `shift` on every day.
    pub fn with_uniform_headcount(mut self, shift: impl Into<String>, people: i32) -> Self {
        let shift = shift.into();
        for day in &self.days {
            self.headcount
                .entry(day.clone())
                .or_default()
                .insert(shift.clone(), people);
        }
        self
    }

    /// Caps how many times one worker may take `shift` in the period.
    pub fn with_weekly_cap(mut self, shift: impl Into<String>, cap: u32) -> Self {
        self.weekly_caps.insert(shift.into(), cap);
        self
    }

    /// Sets the consecutive-day cap.
    pub fn with_max_consecutive_days(mut self, days: u32) -> Self {
        self.max_consecutive_days = days;
        self
    }

    /// Number of days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of shifts per day.
    #[inline]
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    /// Index of a day label.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Index of a shift label.
    pub fn shift_index(&self, shift: &str) -> Option<usize> {
        self.shifts.iter().position(|s| s == shift)
    }

    /// Resolves a (day, shift) label pair.
    pub fn slot(&self, day: &str, shift: &str) -> Option<SlotRef> {
        Some(SlotRef::new(self.day_index(day)?, self.shift_index(shift)?))
    }

    /// Day label of a slot.
    #[inline]
    pub fn day_label(&self, slot: SlotRef) -> &str {
        &self.days[slot.day]
    }

    /// Shift label of a slot.
    #[inline]
    pub fn shift_label(&self, slot: SlotRef) -> &str {
        &self.shifts[slot.shift]
    }

    /// Raw configured headcount (may be invalid; see `validation`).
    pub fn headcount_for(&self, day: &str, shift: &str) -> i32 {
        self.headcount
            .get(day)
            .and_then(|m| m.get(shift))
            .copied()
            .unwrap_or(1)
    }

    /// Number of people a slot can hold.
    pub fn capacity(&self, slot: SlotRef) -> usize {
        self.headcount_for(self.day_label(slot), self.shift_label(slot))
            .max(0) as usize
    }

    /// Weekly cap for a shift label (0 = unlimited).
    pub fn weekly_cap(&self, shift: &str) -> u32 {
        self.weekly_caps.get(shift).copied().unwrap_or(0)
    }

    /// Total capacity units across the period (each slot counts at least once).
    pub fn total_required_slots(&self) -> usize {
        self.slots().map(|slot| self.capacity(slot).max(1)).sum()
    }

    /// All slots in chain order.
    pub fn slots(&self) -> impl Iterator<Item = SlotRef> + '_ {
        (0..self.days.len())
            .flat_map(move |d| (0..self.shifts.len()).map(move |s| SlotRef::new(d, s)))
    }

    /// The slot immediately before `slot` in chain order.
    pub fn predecessor(&self, slot: SlotRef) -> Option<SlotRef> {
        if slot.day >= self.days.len() || slot.shift >= self.shifts.len() {
            return None;
        }
        if slot.shift > 0 {
            Some(SlotRef::new(slot.day, slot.shift - 1))
        } else if slot.day > 0 && self.shifts.len() > 1 {
            Some(SlotRef::new(slot.day - 1, self.shifts.len() - 1))
        } else {
            None
        }
    }

    /// The slot immediately after `slot` in chain order.
    pub fn successor(&self, slot: SlotRef) -> Option<SlotRef> {
        if slot.day >= self.days.len() || slot.shift >= self.shifts.len() {
            return None;
        }
        if slot.shift + 1 < self.shifts.len() {
            Some(SlotRef::new(slot.day, slot.shift + 1))
        } else if slot.day + 1 < self.days.len() && self.shifts.len() > 1 {
            Some(SlotRef::new(slot.day + 1, 0))
        } else {
            None
        }
    }

    /// Both chain neighbours of `slot`.
    pub fn neighbors(&self, slot: SlotRef) -> impl Iterator<Item = SlotRef> {
        self.predecessor(slot).into_iter().chain(self.successor(slot))
    }

    /// Label form of [`predecessor`](Self::predecessor).
    ///
    /// Unknown labels yield `None`.
    pub fn previous_shift(&self, day: &str, shift: &str) -> Option<(&str, &str)> {
        let prev = self.predecessor(self.slot(day, shift)?)?;
        Some((self.day_label(prev), self.shift_label(prev)))
    }

    /// Label form of [`successor`](Self::successor).
    ///
    /// Unknown labels yield `None`.
    pub fn next_shift(&self, day: &str, shift: &str) -> Option<(&str, &str)> {
        let next = self.successor(self.slot(day, shift)?)?;
        Some((self.day_label(next), self.shift_label(next)))
    }
}
