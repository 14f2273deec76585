//! Fairness ranking of candidate workers.
//!
//! Candidates for a slot are ordered ascending by
//! `(satisfaction ratio, deficit, assigned)`: whoever is furthest from their
//! wish goes first, then whoever is furthest below it in absolute shifts,
//! then whoever holds fewest shifts overall.

use std::cmp::Ordering;

use crate::models::{AssignmentCounts, Worker};

/// Sort key of one candidate. Smaller ranks earlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FairnessKey {
    /// `assigned / max(1, desired)`.
    pub ratio: f64,
    /// `assigned - desired` (negative while below the wish).
    pub deficit: i64,
    /// Shifts currently held.
    pub assigned: u32,
}

impl FairnessKey {
    /// Computes the key of `worker` under `counts`.
    pub fn of(worker: &Worker, counts: &AssignmentCounts) -> Self {
        let assigned = counts.get(&worker.name);
        Self {
            ratio: counts.satisfaction_ratio(worker),
            deficit: i64::from(assigned) - i64::from(worker.desired_shifts),
            assigned,
        }
    }
}

impl Eq for FairnessKey {}

impl PartialOrd for FairnessKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FairnessKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio
            .total_cmp(&other.ratio)
            .then(self.deficit.cmp(&other.deficit))
            .then(self.assigned.cmp(&other.assigned))
    }
}

/// Stable-sorts candidates by fairness, keeping incoming order on ties.
pub fn rank_by_fairness(candidates: &mut [&Worker], counts: &AssignmentCounts) {
    candidates.sort_by_cached_key(|w| FairnessKey::of(w, counts));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_dominates() {
        let a = Worker::new("Ana", 4);
        let b = Worker::new("Ben", 1);
        let mut counts = AssignmentCounts::zeroed(&[a.clone(), b.clone()]);
        counts.increment("Ana");
        counts.increment("Ana");
        // Ana 2/4 = 0.5, Ben 0/1 = 0.0
        assert!(FairnessKey::of(&b, &counts) < FairnessKey::of(&a, &counts));
    }

    #[test]
    fn test_deficit_breaks_ratio_tie() {
        let a = Worker::new("Ana", 4);
        let b = Worker::new("Ben", 2);
        let counts = AssignmentCounts::zeroed(&[a.clone(), b.clone()]);
        // both at ratio 0; Ana is 4 short, Ben 2 short
        let ka = FairnessKey::of(&a, &counts);
        let kb = FairnessKey::of(&b, &counts);
        assert_eq!(ka.deficit, -4);
        assert!(ka < kb);
    }

    #[test]
    fn test_rank_is_stable() {
        let workers = vec![
            Worker::new("Ana", 2),
            Worker::new("Ben", 2),
            Worker::new("Cid", 1),
        ];
        let mut counts = AssignmentCounts::zeroed(&workers);
        counts.increment("Ana");

        let mut ranked: Vec<&Worker> = workers.iter().collect();
        rank_by_fairness(&mut ranked, &counts);
        let names: Vec<&str> = ranked.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Ben", "Cid", "Ana"]);
    }
}
