//! Randomized multi-start roster construction.
//!
//! # Algorithm
//!
//! Each iteration builds one complete grid from scratch:
//!
//! 1. Start from an empty grid and zeroed counts.
//! 2. Shuffle the day order (shift order stays as configured).
//! 3. For every capacity unit of every slot, collect the workers that pass
//!    every construction rule, rank them by
//!    [`FairnessKey`](super::FairnessKey) (random order among ties) and
//!    assign the first one. Units nobody can take stay empty.
//! 4. Spread holes with [`redistribute_holes`] and score the grid.
//!
//! Iterations are independent: each owns its RNG (seeded from the run seed
//! and the iteration index), grid and counts. They run in parallel batches
//! and are folded into the [`AlternativeSet`] in iteration order, so a fixed
//! seed reproduces the same outcome whatever the thread count.
//!
//! After the last batch, same-day-swap neighbours of the best grid are folded
//! in under the same tolerance rule.
//!
//! # Complexity
//! O(I × U × W × S) where I=iterations, U=capacity units, W=workers,
//! S=shifts per day.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, info, trace};

use super::config::{IterationBudget, SearchConfig, ShiftMode};
use super::fairness::rank_by_fairness;
use super::score::{score, score_breakdown, ScoreBreakdown};
use crate::constraints::{EligibilityRules, Evaluator};
use crate::error::RosterError;
use crate::models::{AssignmentCounts, ScheduleGrid, SiteConfig, SlotRef, Worker};
use crate::postprocess::{redistribute_holes, same_day_swaps, AlternativeSet, Consideration};
use crate::validation::validate_input;

/// Shared flag for stopping a run between iterations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Iterations already started still finish.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress report passed to the callback after each batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchProgress {
    /// Iterations completed so far.
    pub completed: usize,
    /// Iterations planned.
    pub total: usize,
    /// Best score so far.
    pub best_score: f64,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best grid found.
    pub grid: ScheduleGrid,
    /// Its score.
    pub score: f64,
    /// Its penalty terms.
    pub breakdown: ScoreBreakdown,
    /// Counts derived from `grid`.
    pub counts: AssignmentCounts,
    /// Near-best grids, best first.
    pub alternatives: AlternativeSet,
    /// Iterations actually run.
    pub iterations: usize,
    /// Whether the run stopped early (cancel token or time limit).
    pub cancelled: bool,
}

/// Configurable multi-start search.
///
/// # Example
///
/// ```
/// use shift_roster::models::{SiteConfig, Worker};
/// use shift_roster::scheduler::{RosterSearch, ShiftMode};
///
/// let site = SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22"]);
/// let workers = vec![
///     Worker::new("Ana", 2).available_for_all(&site),
///     Worker::new("Ben", 2).available_for_all(&site),
/// ];
///
/// let outcome = RosterSearch::new(&site, &workers, ShiftMode::Standard)
///     .with_seed(42)
///     .with_iterations(50)
///     .run()
///     .unwrap();
/// assert_eq!(outcome.breakdown.missing, 0);
/// assert_eq!(outcome.breakdown.adjacent, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RosterSearch<'a> {
    site: &'a SiteConfig,
    workers: &'a [Worker],
    mode: ShiftMode,
    config: SearchConfig,
    cancel: Option<CancelToken>,
}

impl<'a> RosterSearch<'a> {
    /// A search with default configuration.
    pub fn new(site: &'a SiteConfig, workers: &'a [Worker], mode: ShiftMode) -> Self {
        Self {
            site,
            workers,
            mode,
            config: SearchConfig::default(),
            cancel: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Runs exactly `iterations` iterations (clamped to the hard ceiling).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.budget = IterationBudget::fixed(iterations);
        self
    }

    /// Stops starting new iterations after `limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Stops starting new iterations once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search.
    ///
    /// # Errors
    /// [`RosterError::InvalidConfiguration`] if the site or workers fail
    /// validation; nothing is searched in that case.
    pub fn run(&self) -> Result<SearchOutcome, RosterError> {
        self.run_with_progress(|_| {})
    }

    /// Runs the search, reporting progress after each batch.
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<SearchOutcome, RosterError>
    where
        F: FnMut(SearchProgress),
    {
        validate_input(self.site, self.workers)?;

        let total_slots = self.site.total_required_slots();
        let total = self.config.budget.iterations_for(total_slots);
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let batch_size = self.config.batch_size.max(1);

        let span = debug_span!(
            "roster_search",
            iterations = total,
            total_slots,
            workers = self.workers.len(),
            seed
        );
        let _guard = span.enter();
        debug!(mode = ?self.mode, "search started");

        let started = Instant::now();
        let mut alternatives = AlternativeSet::new(self.config.tolerance, self.config.epsilon);
        let mut completed = 0;
        let mut cancelled = false;

        while completed < total {
            if self.should_stop(started) {
                cancelled = true;
                break;
            }
            let end = (completed + batch_size).min(total);
            let batch: Vec<(ScheduleGrid, f64)> = (completed..end)
                .into_par_iter()
                .filter_map(|index| {
                    if self.should_stop(started) {
                        None
                    } else {
                        Some(self.construct(iteration_seed(seed, index)))
                    }
                })
                .collect();

            let planned = end - completed;
            let produced = batch.len();
            completed += produced;
            for (grid, score) in batch {
                if alternatives.consider(grid, score) == Consideration::Improved {
                    trace!(score, "new best");
                }
            }
            progress(SearchProgress {
                completed,
                total,
                best_score: alternatives.best_score(),
            });
            if produced < planned {
                cancelled = true;
                break;
            }
        }

        if alternatives.is_empty() {
            let empty = ScheduleGrid::empty(self.site);
            let value = self.score(&empty);
            alternatives.consider(empty, value);
        }
        let best = alternatives
            .best()
            .map(|best| best.grid.clone())
            .unwrap_or_else(|| ScheduleGrid::empty(self.site));

        for neighbour in same_day_swaps(self.site, self.workers, &best) {
            let value = self.score(&neighbour);
            alternatives.consider(neighbour, value);
        }

        let (grid, score) = alternatives
            .best()
            .map(|best| (best.grid.clone(), best.score))
            .unwrap_or((best, f64::NEG_INFINITY));
        let breakdown = score_breakdown(
            self.site,
            self.workers,
            &grid,
            self.mode,
            &self.config.weights,
        );
        let counts = AssignmentCounts::from_grid(&grid, self.workers);

        info!(
            score,
            iterations = completed,
            alternatives = alternatives.len(),
            missing = breakdown.missing,
            cancelled,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(SearchOutcome {
            grid,
            score,
            breakdown,
            counts,
            alternatives,
            iterations: completed,
            cancelled,
        })
    }

    fn should_stop(&self, started: Instant) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
            || self
                .config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
    }

    fn score(&self, grid: &ScheduleGrid) -> f64 {
        score(self.site, self.workers, grid, self.mode, &self.config.weights)
    }

    /// One complete construction iteration.
    fn construct(&self, seed: u64) -> (ScheduleGrid, f64) {
        let site = self.site;
        let eval = Evaluator::new(site);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = ScheduleGrid::empty(site);
        let mut counts = AssignmentCounts::zeroed(self.workers);

        let mut days: Vec<usize> = (0..site.day_count()).collect();
        days.shuffle(&mut rng);

        for &day in &days {
            for shift in 0..site.shift_count() {
                let slot = SlotRef::new(day, shift);
                for _ in 0..site.capacity(slot) {
                    let mut candidates: Vec<&Worker> = self
                        .workers
                        .iter()
                        .filter(|w| {
                            eval.is_eligible(w, slot, &grid, &counts, EligibilityRules::CONSTRUCTION)
                        })
                        .collect();
                    candidates.shuffle(&mut rng);
                    rank_by_fairness(&mut candidates, &counts);

                    let chosen = candidates.into_iter().find(|w| {
                        !grid.occupies(&w.name, slot)
                            && !grid.works_day(&w.name, day)
                            && !eval.has_adjacent_shift(&w.name, slot, &grid)
                    });
                    let Some(worker) = chosen else {
                        break;
                    };
                    grid.assign(slot, worker.name.clone());
                    counts.increment(&worker.name);
                }
            }
        }

        redistribute_holes(site, self.workers, &mut grid, self.config.redistribution_passes);
        let value = self.score(&grid);
        (grid, value)
    }
}

/// Independent per-iteration seed.
fn iteration_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64)
        .wrapping_add(1)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Runs the full pipeline with default configuration.
///
/// # Errors
/// [`RosterError::InvalidConfiguration`] if the site or workers fail
/// validation.
///
/// # Example
///
/// ```
/// use shift_roster::build_schedule;
/// use shift_roster::models::{SiteConfig, Worker};
/// use shift_roster::scheduler::ShiftMode;
///
/// let site = SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22"]);
/// let workers = vec![
///     Worker::new("Ana", 2).available_for_all(&site),
///     Worker::new("Ben", 2).available_for_all(&site),
/// ];
///
/// let outcome = build_schedule(&site, &workers, ShiftMode::Standard).unwrap();
/// assert_eq!(outcome.grid.missing_slots(&site), 0);
/// assert_eq!(outcome.alternatives.info().position, 1);
/// ```
pub fn build_schedule(
    site: &SiteConfig,
    workers: &[Worker],
    mode: ShiftMode,
) -> Result<SearchOutcome, RosterError> {
    RosterSearch::new(site, workers, mode).run()
}
