use super::catalog::ProfileCatalog;
use super::config::RemainingUtilityPolicy;
use super::profile::{TransactionId, UtilityRecord};
use super::transaction::Transaction;

/// Whole-database figures used by heuristic scoring. Computed unboosted and
/// ignoring probabilities; never themselves subject to pruning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    pub database_utility: i64,
    pub transaction_count: usize,
}

/// Bundle detection the way the reference datasets mark bundles: any token
/// carrying a parenthesis, e.g. "(CD)".
pub fn is_bracketed_bundle(token: &str) -> bool {
    token.contains('(')
}

/// Builds the initial single-token utility profiles from raw transactions
/// under a configurable remaining-utility policy.
pub struct Preprocessor {
    policy: RemainingUtilityPolicy,
    tolerance: f64,
}

impl Preprocessor {
    pub fn new(policy: RemainingUtilityPolicy, tolerance: f64) -> Self {
        Self { policy, tolerance }
    }

    /// One pass over the database: a profile per distinct token plus the
    /// database-level aggregates. Transactions are referenced, never copied.
    pub fn build<F>(&self, transactions: &[Transaction], is_bundle: F) -> (ProfileCatalog, DatabaseStats)
    where
        F: Fn(&str) -> bool,
    {
        let mut catalog = ProfileCatalog::new();
        let mut stats = DatabaseStats {
            database_utility: 0,
            transaction_count: transactions.len(),
        };
        for (tid, transaction) in transactions.iter().enumerate() {
            stats.database_utility += transaction.total_utility();
            match self.policy {
                RemainingUtilityPolicy::Forward => {
                    self.scan_forward(&mut catalog, tid, transaction);
                }
                RemainingUtilityPolicy::BackwardWeighted {
                    utility_boost,
                    probability_boost,
                } => {
                    self.scan_backward(
                        &mut catalog,
                        tid,
                        transaction,
                        utility_boost,
                        probability_boost,
                        &is_bundle,
                    );
                }
            }
        }
        (catalog, stats)
    }

    fn scan_forward(&self, catalog: &mut ProfileCatalog, tid: TransactionId, transaction: &Transaction) {
        let mut remaining = transaction.total_utility();
        for entry in transaction.entries() {
            let utility = entry.utility();
            remaining -= utility;
            catalog.single_profile_mut(&entry.token).insert(
                tid,
                UtilityRecord {
                    utility,
                    remaining_utility: remaining,
                    probability: entry.probability,
                },
                self.tolerance,
            );
        }
    }

    fn scan_backward<F>(
        &self,
        catalog: &mut ProfileCatalog,
        tid: TransactionId,
        transaction: &Transaction,
        utility_boost: f64,
        probability_boost: f64,
        is_bundle: &F,
    ) where
        F: Fn(&str) -> bool,
    {
        // Register tokens in entry order before the reverse record pass:
        // candidate arrival order must follow the transaction order the
        // remaining utilities are derived from, or the search engine's
        // pruning bound stops covering join partners.
        for entry in transaction.entries() {
            catalog.single_profile_mut(&entry.token);
        }
        let mut accumulated = 0i64;
        for entry in transaction.entries().iter().rev() {
            let bundled = is_bundle(&entry.token);
            let utility = if bundled {
                (entry.utility() as f64 * utility_boost).round() as i64
            } else {
                entry.utility()
            };
            let probability = if bundled {
                entry.probability * probability_boost
            } else {
                entry.probability
            };
            catalog.single_profile_mut(&entry.token).insert(
                tid,
                UtilityRecord {
                    utility,
                    remaining_utility: accumulated,
                    probability,
                },
                self.tolerance,
            );
            accumulated += utility;
        }
    }
}
