use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::MiningError;

/// How the preprocessor assigns per-entry remaining utility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemainingUtilityPolicy {
    /// Entries processed in original order; remaining utility of the entry
    /// at position i is the transaction total minus the cumulative utility
    /// of entries at positions <= i.
    Forward,
    /// Entries processed in reverse; remaining utility of entry i is the sum
    /// of utilities of entries after i in original order. Bundle tokens have
    /// their utility and probability scaled by the boost factors (1.0 is
    /// neutral).
    BackwardWeighted {
        utility_boost: f64,
        probability_boost: f64,
    },
}

/// How the search engine orders each candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringPolicy {
    /// Keep arrival order. Searches more of the lattice but returns the same
    /// top-k set as `Heuristic`.
    Naive,
    /// Descending by an estimate of how quickly the candidate could raise
    /// the top-k threshold.
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinerConfig {
    pub top_k: usize,
    pub min_support: f64,
    pub policy: RemainingUtilityPolicy,
    pub scoring: ScoringPolicy,
    /// Probabilities within this distance of zero are treated as absent.
    pub probability_tolerance: f64,
    /// Split the root candidate list across rayon workers.
    pub parallel: bool,
    /// Best-effort cutoff: when exceeded, the current frontier contents are
    /// returned as a possibly incomplete answer.
    pub deadline: Option<Duration>,
}

impl MinerConfig {
    pub fn new(top_k: usize, min_support: f64) -> Self {
        Self {
            top_k,
            min_support,
            policy: RemainingUtilityPolicy::Forward,
            scoring: ScoringPolicy::Heuristic,
            probability_tolerance: 1e-9,
            parallel: false,
            deadline: None,
        }
    }

    pub fn with_policy(mut self, policy: RemainingUtilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> Result<(), MiningError> {
        if self.top_k == 0 {
            return Err(MiningError::InvalidTopK(self.top_k));
        }
        if !self.min_support.is_finite() || !(0.0..=1.0).contains(&self.min_support) {
            return Err(MiningError::InvalidMinSupport(self.min_support));
        }
        if !self.probability_tolerance.is_finite() || self.probability_tolerance < 0.0 {
            return Err(MiningError::InvalidTolerance(self.probability_tolerance));
        }
        if let RemainingUtilityPolicy::BackwardWeighted {
            utility_boost,
            probability_boost,
        } = self.policy
        {
            for boost in [utility_boost, probability_boost] {
                if !boost.is_finite() || boost <= 0.0 {
                    return Err(MiningError::InvalidBoost(boost));
                }
            }
        }
        Ok(())
    }
}
