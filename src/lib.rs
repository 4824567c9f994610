//! Top-k probabilistic high-utility itemset mining.
//!
//! Every item occurrence in a transaction carries a quantity, a unit profit
//! and an existence probability. The miner reports the K itemsets of highest
//! total utility among those whose aggregate existence probability reaches a
//! minimum support, using utility-list joins and anytime branch-and-bound
//! search under a monotonically rising utility threshold instead of
//! exhaustive enumeration.
//!
//! ```
//! use uplift::{mine, MinerConfig, Transaction};
//!
//! let transactions = vec![
//!     Transaction::from_columns(
//!         &["A", "B", "(CD)"],
//!         &[2, 1, 3],
//!         &[6, 5, 9],
//!         &[0.8, 0.75, 0.6],
//!     )
//!     .unwrap(),
//!     Transaction::from_columns(&["A", "B"], &[1, 2], &[6, 5], &[0.85, 0.7]).unwrap(),
//! ];
//!
//! let results = mine(&transactions, &MinerConfig::new(5, 0.5)).unwrap();
//! assert!(results.len() <= 5);
//! assert!(results.windows(2).all(|pair| pair[0].total_utility >= pair[1].total_utility));
//! ```

pub mod phui;

pub use phui::{
    mine, mine_with, MinedItemset, MinerConfig, MiningError, MiningOutcome,
    RemainingUtilityPolicy, ScoringPolicy, SearchStats, Transaction, TransactionEntry,
};
