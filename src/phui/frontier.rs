use std::cmp::Ordering;

use serde::Serialize;

use super::profile::{Token, UtilityProfile};

/// One reported itemset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinedItemset {
    pub itemset: Vec<String>,
    pub total_utility: i64,
    pub total_probability: f64,
}

/// Lightweight summary of a profile held by the frontier; the full utility
/// list stays in the catalog.
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub itemset: Vec<Token>,
    pub sum_utility: i64,
    pub sum_probability: f64,
}

impl FrontierEntry {
    pub fn of(profile: &UtilityProfile) -> Self {
        Self {
            itemset: profile.itemset.clone(),
            sum_utility: profile.sum_utility,
            sum_probability: profile.sum_probability,
        }
    }

    /// Total order used everywhere results are ranked: utility descending,
    /// ties by lexicographic itemset order.
    fn ranks_before(&self, other: &FrontierEntry) -> bool {
        match self.sum_utility.cmp(&other.sum_utility) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.itemset < other.itemset,
        }
    }
}

/// Capacity-bounded collection of the best profiles seen so far, kept in
/// rank order. Its threshold is the single global pruning bound and never
/// decreases over the lifetime of a frontier.
#[derive(Debug)]
pub struct TopKFrontier {
    capacity: usize,
    entries: Vec<FrontierEntry>,
}

impl TopKFrontier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Utility of the weakest held member once the frontier is full,
    /// otherwise an effectively minus-infinite sentinel.
    pub fn threshold(&self) -> i64 {
        if self.entries.len() < self.capacity {
            return i64::MIN;
        }
        self.entries.last().map_or(i64::MIN, |entry| entry.sum_utility)
    }

    /// Admit the entry if the frontier still has room or it outranks the
    /// weakest member. Returns whether it was inserted.
    pub fn consider(&mut self, entry: FrontierEntry) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.entries.iter().any(|held| held.itemset == entry.itemset) {
            return false;
        }
        if self.entries.len() == self.capacity {
            match self.entries.last() {
                Some(weakest) if entry.ranks_before(weakest) => {
                    self.entries.pop();
                }
                _ => return false,
            }
        }
        let at = self.entries.partition_point(|held| held.ranks_before(&entry));
        self.entries.insert(at, entry);
        true
    }

    /// A profile failing this test can never reach the frontier, nor can any
    /// of its extensions.
    pub fn promising(&self, utility_bound: i64) -> bool {
        utility_bound >= self.threshold()
    }

    /// Final result sequence, best first.
    pub fn into_results(self) -> Vec<MinedItemset> {
        self.entries
            .into_iter()
            .map(|entry| MinedItemset {
                itemset: entry.itemset.iter().map(|token| token.to_string()).collect(),
                total_utility: entry.sum_utility,
                total_probability: entry.sum_probability,
            })
            .collect()
    }
}
