//! Search configuration.
//!
//! All knobs of a run are plain serde data with defaults, so callers can
//! keep them next to their site definitions and override only what they need.
//!
//! # Usage
//!
//! ```
//! use shift_roster::scheduler::{SearchConfig, ShiftMode};
//!
//! let config = SearchConfig::default().with_seed(7).with_tolerance(10.0);
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.weights.adjacent_weight(ShiftMode::Standard), 1000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on iterations, whatever the budget says.
pub const HARD_ITERATION_CEILING: usize = 20_000;

/// How the adjacency term is weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftMode {
    /// 8-hour shifts: back-to-back shifts are effectively forbidden.
    #[default]
    Standard,
    /// 12-hour shifts: back-to-back links are expected and only lightly penalized.
    TwelveHour,
}

/// Penalty weights of the scoring function.
///
/// Defaults keep the relative order: shortfall and adjacency dominate, then
/// consecutive runs, caps and inequity, then desired-count deviation, then
/// hole concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per unfilled capacity unit.
    pub missing: f64,
    /// Per adjacent (worker, slot) pair in [`ShiftMode::Standard`].
    pub adjacent_standard: f64,
    /// Per adjacent (worker, slot) pair in [`ShiftMode::TwelveHour`].
    pub adjacent_twelve_hour: f64,
    /// Per (worker, day) inside an over-long run.
    pub consecutive: f64,
    /// Per shift over a weekly cap.
    pub weekly_cap: f64,
    /// Per unit of satisfaction-ratio spread.
    pub inequity: f64,
    /// Per shift away from the desired count.
    pub deviation: f64,
    /// Per extra hole on an already-holed day.
    pub concentration: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            missing: 500.0,
            adjacent_standard: 1000.0,
            adjacent_twelve_hour: 10.0,
            consecutive: 200.0,
            weekly_cap: 200.0,
            inequity: 30.0,
            deviation: 5.0,
            concentration: 3.0,
        }
    }
}

impl ScoreWeights {
    /// Adjacency weight for a mode.
    pub fn adjacent_weight(&self, mode: ShiftMode) -> f64 {
        match mode {
            ShiftMode::Standard => self.adjacent_standard,
            ShiftMode::TwelveHour => self.adjacent_twelve_hour,
        }
    }
}

/// How many construction iterations a run performs.
///
/// `iterations = min(upper_bound, base + per_slot × total_required_slots)`,
/// unless `fixed` is set. Both forms are clamped to
/// [`HARD_ITERATION_CEILING`] and to at least one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationBudget {
    /// Iterations for an empty site.
    pub base: usize,
    /// Extra iterations per required capacity unit.
    pub per_slot: usize,
    /// Cap on the derived count.
    pub upper_bound: usize,
    /// Explicit count overriding the formula.
    pub fixed: Option<usize>,
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self {
            base: 200,
            per_slot: 60,
            upper_bound: 5000,
            fixed: None,
        }
    }
}

impl IterationBudget {
    /// A budget of exactly `iterations` (still clamped).
    pub fn fixed(iterations: usize) -> Self {
        Self {
            fixed: Some(iterations),
            ..Self::default()
        }
    }

    /// Iterations for a site with `total_required_slots` capacity units.
    pub fn iterations_for(&self, total_required_slots: usize) -> usize {
        let derived = match self.fixed {
            Some(n) => n,
            None => self
                .base
                .saturating_add(self.per_slot.saturating_mul(total_required_slots))
                .min(self.upper_bound),
        };
        derived.clamp(1, HARD_ITERATION_CEILING)
    }
}

/// Parameters of one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Iteration budget.
    pub budget: IterationBudget,
    /// Score distance from the best within which a grid is an alternative.
    pub tolerance: f64,
    /// Margin a score must beat the best by to count as an improvement.
    pub epsilon: f64,
    /// Passes of hole redistribution per candidate.
    pub redistribution_passes: usize,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    /// Wall-clock limit checked before each iteration.
    pub time_limit: Option<Duration>,
    /// Penalty weights.
    pub weights: ScoreWeights,
    /// Iterations dispatched per parallel batch.
    pub batch_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: IterationBudget::default(),
            tolerance: 20.0,
            epsilon: 1e-6,
            redistribution_passes: 10,
            seed: None,
            time_limit: None,
            weights: ScoreWeights::default(),
            batch_size: 64,
        }
    }
}

impl SearchConfig {
    /// Sets the iteration budget.
    pub fn with_budget(mut self, budget: IterationBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the alternative tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the number of redistribution passes.
    pub fn with_redistribution_passes(mut self, passes: usize) -> Self {
        self.redistribution_passes = passes;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the parallel batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}
