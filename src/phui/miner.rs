use serde::Serialize;

use super::config::MinerConfig;
use super::error::MiningError;
use super::frontier::{MinedItemset, TopKFrontier};
use super::preprocess::{is_bracketed_bundle, Preprocessor};
use super::search::{SearchEngine, SearchStats};
use super::transaction::Transaction;

/// Result sequence plus the exploration counters of the run that produced
/// it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningOutcome {
    pub results: Vec<MinedItemset>,
    pub stats: SearchStats,
}

/// Mine the top-k highest-utility itemsets, detecting bundle tokens by the
/// bracket convention of the reference datasets.
pub fn mine(
    transactions: &[Transaction],
    config: &MinerConfig,
) -> Result<Vec<MinedItemset>, MiningError> {
    Ok(mine_with(transactions, config, is_bracketed_bundle)?.results)
}

/// Full pipeline with a caller-supplied bundle predicate. The predicate is
/// only consulted by the backward-weighted remaining-utility policy.
pub fn mine_with<F>(
    transactions: &[Transaction],
    config: &MinerConfig,
    is_bundle: F,
) -> Result<MiningOutcome, MiningError>
where
    F: Fn(&str) -> bool,
{
    config.validate()?;
    let preprocessor = Preprocessor::new(config.policy, config.probability_tolerance);
    let (mut catalog, db) = preprocessor.build(transactions, is_bundle);
    let mut frontier = TopKFrontier::new(config.top_k);
    let engine = SearchEngine::new(config, &db);
    let stats = engine.run(&mut catalog, &mut frontier)?;
    Ok(MiningOutcome {
        results: frontier.into_results(),
        stats,
    })
}
