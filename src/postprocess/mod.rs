//! Passes that run on a finished grid.
//!
//! - [`redistribute_holes`]: spreads unfilled units across days.
//! - [`same_day_swaps`] and [`AlternativeSet`]: near-best alternatives and
//!   their cyclic navigation.
//! - [`fill_gaps`]: two-tier gap filling over an existing grid.
//!
//! All of them work on one grid at a time, single-threaded.

mod alternatives;
mod gap_fill;
mod redistribute;

pub use alternatives::{
    same_day_swaps, Alternative, AlternativeInfo, AlternativeSet, Consideration, Selection,
};
pub use gap_fill::{fill_gaps, GapFillOutcome};
pub use redistribute::redistribute_holes;
