//! Hole redistribution.
//!
//! When one day carries several unfilled units while another is fully
//! staffed, moving a single occupant across spreads the shortfall and lowers
//! the hole-concentration penalty without changing the total number of holes.
//!
//! # Algorithm
//!
//! Each pass looks for one legal move, from a hole-free day into a vacant
//! unit on a day with more than one hole, and applies it. A trial move is
//! made on the grid and rolled back when it breaks a rule, so a rejected
//! move leaves the grid untouched. Stops after `passes` passes or when no
//! legal move exists.

use std::collections::HashMap;

use tracing::trace;

use crate::constraints::Evaluator;
use crate::models::{ScheduleGrid, SiteConfig, SlotRef, Worker};

/// Spreads holes across days. Returns the number of moves applied.
pub fn redistribute_holes(
    site: &SiteConfig,
    workers: &[Worker],
    grid: &mut ScheduleGrid,
    passes: usize,
) -> usize {
    let eval = Evaluator::new(site);
    let by_name: HashMap<&str, &Worker> = workers.iter().map(|w| (w.name.as_str(), w)).collect();
    let mut moves = 0;

    for _ in 0..passes {
        let holes = grid.holes_per_day(site);
        let crowded: Vec<usize> = (0..holes.len()).filter(|&d| holes[d] > 1).collect();
        let staffed: Vec<usize> = (0..holes.len()).filter(|&d| holes[d] == 0).collect();
        if crowded.is_empty() || staffed.is_empty() {
            break;
        }

        if !try_one_move(&eval, &by_name, grid, &crowded, &staffed) {
            break;
        }
        moves += 1;
    }

    moves
}

fn try_one_move(
    eval: &Evaluator<'_>,
    by_name: &HashMap<&str, &Worker>,
    grid: &mut ScheduleGrid,
    crowded: &[usize],
    staffed: &[usize],
) -> bool {
    let site = eval.site();
    for &target_day in crowded {
        for ts in 0..site.shift_count() {
            let target = SlotRef::new(target_day, ts);
            if grid.vacancies(target, site) == 0 {
                continue;
            }
            for &source_day in staffed {
                for ss in 0..site.shift_count() {
                    let source = SlotRef::new(source_day, ss);
                    let occupants = grid.assigned(source).to_vec();
                    for name in occupants {
                        let Some(worker) = by_name.get(name.as_str()) else {
                            continue;
                        };
                        if !eval.is_available(worker, target) {
                            continue;
                        }
                        let Some(position) = grid.unassign(source, &name) else {
                            continue;
                        };
                        if can_land(eval, &name, target, grid) {
                            trace!(worker = %name, from = ?source, to = ?target, "moved assignment to spread holes");
                            grid.assign(target, name);
                            return true;
                        }
                        grid.restore(source, position, name);
                    }
                }
            }
        }
    }
    false
}

fn can_land(eval: &Evaluator<'_>, name: &str, target: SlotRef, grid: &ScheduleGrid) -> bool {
    !grid.works_day(name, target.day)
        && eval.respects_weekly_cap(name, target, grid)
        && !eval.has_adjacent_shift(name, target, grid)
        && eval.respects_consecutive_cap(name, target.day, grid)
}
