pub mod catalog;
pub mod combine;
pub mod config;
pub mod error;
pub mod frontier;
pub mod miner;
pub mod preprocess;
pub mod profile;
pub mod search;
pub mod transaction;


pub use catalog::{CatalogOverlay, ProfileCatalog, ProfileId, ProfileStore};
pub use combine::combine;
pub use config::{MinerConfig, RemainingUtilityPolicy, ScoringPolicy};
pub use error::MiningError;
pub use frontier::{FrontierEntry, MinedItemset, TopKFrontier};
pub use miner::{mine, mine_with, MiningOutcome};
pub use preprocess::{is_bracketed_bundle, DatabaseStats, Preprocessor};
pub use profile::{Token, TransactionId, UtilityProfile, UtilityRecord};
pub use search::{SearchEngine, SearchStats};
pub use transaction::{Transaction, TransactionEntry};
