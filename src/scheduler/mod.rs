//! Multi-start roster search and scoring.
//!
//! # Algorithm
//!
//! [`RosterSearch`] runs many randomized greedy constructions in parallel
//! and keeps the best-scoring grid together with every distinct grid scoring
//! within a tolerance of it. Construction is fairness-driven: each vacancy
//! goes to the eligible worker furthest from their desired shift count.
//!
//! # Score
//!
//! [`ScoreBreakdown`] weighs capacity shortfall and adjacent shifts above
//! consecutive runs, weekly caps and inequity, then desired-count deviation,
//! then hole concentration.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

mod config;
mod fairness;
mod score;
mod search;

pub use config::{IterationBudget, ScoreWeights, SearchConfig, ShiftMode, HARD_ITERATION_CEILING};
pub use fairness::{rank_by_fairness, FairnessKey};
pub use score::{score, score_breakdown, ScoreBreakdown};
pub use search::{
    build_schedule, CancelToken, RosterSearch, SearchOutcome, SearchProgress,
};
