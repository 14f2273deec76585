//! Worker model.
//!
//! A worker is an immutable fact for the duration of a search: a unique
//! name, the (day, shift) cells they may be placed in, and the number of
//! shifts they would like to work over the period.
//!
//! How many shifts a worker currently holds is *not* stored here. Counts are
//! a derived, per-run view kept in [`AssignmentCounts`](super::AssignmentCounts)
//! so that parallel search iterations never share mutable worker state.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::SiteConfig;

/// A person who can be placed on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique name within a site. Grids refer to workers by this name only.
    pub name: String,
    /// Day label → shift labels the worker may be assigned on that day.
    pub availability: HashMap<String, HashSet<String>>,
    /// Target number of shifts for the period (soft goal).
    pub desired_shifts: u32,
}

impl Worker {
    /// Creates a worker with no availability.
    pub fn new(name: impl Into<String>, desired_shifts: u32) -> Self {
        Self {
            name: name.into(),
            availability: HashMap::new(),
            desired_shifts,
        }
    }

    /// Adds shifts the worker may take on `day`.
    ///
    /// Repeated calls for the same day accumulate.
    pub fn with_availability<I, S>(mut self, day: impl Into<String>, shifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.availability
            .entry(day.into())
            .or_default()
            .extend(shifts.into_iter().map(Into::into));
        self
    }

    /// Marks the worker available for every (day, shift) of a site.
    pub fn available_for_all(mut self, site: &SiteConfig) -> Self {
        for day in &site.days {
            self.availability
                .entry(day.clone())
                .or_default()
                .extend(site.shifts.iter().cloned());
        }
        self
    }

    /// Whether the worker may be assigned `shift` on `day`.
    #[inline]
    pub fn is_available(&self, day: &str, shift: &str) -> bool {
        self.availability
            .get(day)
            .is_some_and(|shifts| shifts.contains(shift))
    }

    /// Number of (day, shift) cells the worker declared.
    pub fn availability_count(&self) -> usize {
        self.availability.values().map(HashSet::len).sum()
    }
}
