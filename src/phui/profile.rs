use std::sync::Arc;

/// Opaque item or bundle identifier. Bundle tokens such as "(CD)" are atomic
/// and never decomposed.
pub type Token = Arc<str>;

/// Ordinal position of a transaction within the mined database.
pub type TransactionId = usize;

/// One (itemset, transaction) measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityRecord {
    pub utility: i64,
    pub remaining_utility: i64,
    pub probability: f64,
}

/// Utility list for one itemset: a record per transaction the itemset occurs
/// in, plus aggregates maintained incrementally as records are inserted.
/// Aggregates are never recomputed by rescanning the records.
#[derive(Debug, Clone)]
pub struct UtilityProfile {
    /// Sorted, deduplicated token sequence, fixed at creation. The sorted
    /// order is the canonical itemset identity used by the catalog and the
    /// frontier tie-break.
    pub itemset: Vec<Token>,
    /// Records in ascending transaction order.
    records: Vec<(TransactionId, UtilityRecord)>,
    pub sum_utility: i64,
    pub sum_remaining_utility: i64,
    pub sum_probability: f64,
    pub max_probability: f64,
}

impl UtilityProfile {
    pub fn new(itemset: Vec<Token>) -> Self {
        Self {
            itemset,
            records: Vec::new(),
            sum_utility: 0,
            sum_remaining_utility: 0,
            sum_probability: 0.0,
            max_probability: 0.0,
        }
    }

    /// Store a record and fold it into the aggregates. A record whose
    /// probability is within `tolerance` of zero is treated as non-existent
    /// and contributes nothing. Records must arrive in ascending transaction
    /// order.
    pub fn insert(&mut self, tid: TransactionId, record: UtilityRecord, tolerance: f64) {
        if record.probability.abs() <= tolerance {
            return;
        }
        debug_assert!(self.records.last().map_or(true, |&(last, _)| last < tid));
        self.sum_utility += record.utility;
        self.sum_remaining_utility += record.remaining_utility;
        self.sum_probability += record.probability;
        if record.probability > self.max_probability {
            self.max_probability = record.probability;
        }
        self.records.push((tid, record));
    }

    pub fn record(&self, tid: TransactionId) -> Option<&UtilityRecord> {
        self.records
            .binary_search_by_key(&tid, |&(t, _)| t)
            .ok()
            .map(|at| &self.records[at].1)
    }

    pub fn records(&self) -> impl Iterator<Item = (TransactionId, &UtilityRecord)> + '_ {
        self.records.iter().map(|(tid, record)| (*tid, record))
    }

    /// Number of transactions with a stored record.
    pub fn occurrences(&self) -> usize {
        self.records.len()
    }

    /// True when both itemsets occur in at least one common transaction.
    /// Cheap pre-check before a combine attempt.
    pub fn co_occurs(&self, other: &UtilityProfile) -> bool {
        let mut mine = 0;
        let mut theirs = 0;
        while mine < self.records.len() && theirs < other.records.len() {
            match self.records[mine].0.cmp(&other.records[theirs].0) {
                std::cmp::Ordering::Less => mine += 1,
                std::cmp::Ordering::Greater => theirs += 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
        false
    }

    /// Upper bound on the utility reachable by this itemset or any of its
    /// extensions; the quantity tested against the top-k threshold.
    pub fn utility_bound(&self) -> i64 {
        self.sum_utility.saturating_add(self.sum_remaining_utility)
    }
}
