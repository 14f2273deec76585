//! Weekly shift rostering.
//!
//! Builds a staffing grid for a site (ordered days × ordered shifts, each
//! needing a number of people) from a list of workers with per-day
//! availability and a desired number of shifts, then lets callers browse
//! equally good alternatives and top up gaps after manual edits.
//!
//! Hard rules: one shift per worker per day, no back-to-back shifts along the
//! day/shift chain, per-label weekly caps, and a cap on consecutive working
//! days. Everything else (shortfall, fairness, spread of holes) is scored.
//!
//! # Modules
//!
//! - **`models`**: `Worker`, `SiteConfig`, `ScheduleGrid`, `AssignmentCounts`
//! - **`validation`**: Input integrity checks (empty lists, duplicates, bad headcounts)
//! - **`constraints`**: Eligibility predicates and their tiers
//! - **`scheduler`**: Scoring and the parallel multi-start search
//! - **`postprocess`**: Hole redistribution, alternatives, gap filling
//!
//! # Example
//!
//! ```
//! use shift_roster::{build_schedule, fill_gaps};
//! use shift_roster::models::{SiteConfig, Worker};
//! use shift_roster::scheduler::ShiftMode;
//!
//! let site = SiteConfig::new(["Mon", "Tue", "Wed"], ["06-14", "14-22", "22-06"])
//!     .with_weekly_cap("22-06", 1);
//! let workers: Vec<Worker> = ["Ana", "Ben", "Cid", "Dov"]
//!     .into_iter()
//!     .map(|name| Worker::new(name, 2).available_for_all(&site))
//!     .collect();
//!
//! let mut outcome = build_schedule(&site, &workers, ShiftMode::Standard).unwrap();
//! assert_eq!(outcome.breakdown.adjacent, 0);
//!
//! let filled = fill_gaps(&site, &workers, &outcome.grid).unwrap();
//! assert!(filled.grid.missing_slots(&site) <= outcome.grid.missing_slots(&site));
//!
//! let info = outcome.alternatives.info();
//! if let Some(next) = outcome.alternatives.next(&workers) {
//!     assert!((next.score - info.best_score).abs() <= 20.0);
//! }
//! ```
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications"

pub mod constraints;
pub mod error;
pub mod models;
pub mod postprocess;
pub mod scheduler;
pub mod validation;

pub use error::RosterError;
pub use postprocess::{fill_gaps, GapFillOutcome};
pub use scheduler::{build_schedule, RosterSearch, SearchOutcome, ShiftMode};
