use super::error::MiningError;
use super::profile::Token;

/// One item occurrence inside a transaction.
#[derive(Debug, Clone)]
pub struct TransactionEntry {
    pub token: Token,
    pub quantity: u32,
    pub unit_profit: i32,
    pub probability: f64,
}

impl TransactionEntry {
    pub fn new(token: &str, quantity: u32, unit_profit: i32, probability: f64) -> Self {
        Self {
            token: Token::from(token),
            quantity,
            unit_profit,
            probability,
        }
    }

    /// Unboosted utility of this occurrence.
    pub fn utility(&self) -> i64 {
        i64::from(self.quantity) * i64::from(self.unit_profit)
    }
}

/// An ordered sequence of item occurrences. Entry order is significant: it
/// fixes the remaining-utility bound the preprocessor derives. Immutable
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    entries: Vec<TransactionEntry>,
}

impl Transaction {
    /// Validates at ingestion: probabilities within [0, 1] and no repeated
    /// token.
    pub fn new(entries: Vec<TransactionEntry>) -> Result<Self, MiningError> {
        for (at, entry) in entries.iter().enumerate() {
            if !entry.probability.is_finite() || !(0.0..=1.0).contains(&entry.probability) {
                return Err(MiningError::InvalidProbability {
                    token: entry.token.to_string(),
                    probability: entry.probability,
                });
            }
            if entries[..at].iter().any(|seen| seen.token == entry.token) {
                return Err(MiningError::DuplicateToken {
                    token: entry.token.to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Build a transaction from parallel per-attribute columns, the shape the
    /// reference datasets come in. Misaligned lengths are an error, never
    /// truncated to the shortest column.
    pub fn from_columns(
        tokens: &[&str],
        quantities: &[u32],
        unit_profits: &[i32],
        probabilities: &[f64],
    ) -> Result<Self, MiningError> {
        if quantities.len() != tokens.len()
            || unit_profits.len() != tokens.len()
            || probabilities.len() != tokens.len()
        {
            return Err(MiningError::MisalignedColumns {
                tokens: tokens.len(),
                quantities: quantities.len(),
                unit_profits: unit_profits.len(),
                probabilities: probabilities.len(),
            });
        }
        let entries = tokens
            .iter()
            .zip(quantities)
            .zip(unit_profits)
            .zip(probabilities)
            .map(|(((token, &quantity), &unit_profit), &probability)| {
                TransactionEntry::new(token, quantity, unit_profit, probability)
            })
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[TransactionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unboosted total utility of the transaction.
    pub fn total_utility(&self) -> i64 {
        self.entries.iter().map(TransactionEntry::utility).sum()
    }
}
