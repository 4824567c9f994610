#[derive(Debug, Clone, PartialEq)]
pub enum MiningError {
    /// Per-transaction attribute columns of different lengths. Rejected at
    /// ingestion instead of being truncated to the shortest column.
    MisalignedColumns {
        tokens: usize,
        quantities: usize,
        unit_profits: usize,
        probabilities: usize,
    },
    /// The same token appears twice in one transaction.
    DuplicateToken { token: String },
    /// Existence probability outside [0, 1] or not finite.
    InvalidProbability { token: String, probability: f64 },
    InvalidTopK(usize),
    InvalidMinSupport(f64),
    InvalidBoost(f64),
    InvalidTolerance(f64),
    /// A tail token with no single-token profile in the catalog. The
    /// preprocessor creates one profile per token, so this can only signal
    /// an internal invariant violation.
    MissingTailProfile(String),
}

impl std::fmt::Display for MiningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiningError::MisalignedColumns {
                tokens,
                quantities,
                unit_profits,
                probabilities,
            } => {
                write!(
                    f,
                    "misaligned transaction columns: {} tokens, {} quantities, {} unit profits, {} probabilities",
                    tokens, quantities, unit_profits, probabilities
                )
            }
            MiningError::DuplicateToken { token } => {
                write!(f, "token '{}' appears more than once in a transaction", token)
            }
            MiningError::InvalidProbability { token, probability } => {
                write!(
                    f,
                    "existence probability {} for token '{}' is outside [0, 1]",
                    probability, token
                )
            }
            MiningError::InvalidTopK(k) => {
                write!(f, "top-k must be greater than zero, got {}", k)
            }
            MiningError::InvalidMinSupport(min_sup) => {
                write!(f, "minimum support must be within [0, 1], got {}", min_sup)
            }
            MiningError::InvalidBoost(boost) => {
                write!(f, "bundle boost factor must be positive and finite, got {}", boost)
            }
            MiningError::InvalidTolerance(tolerance) => {
                write!(
                    f,
                    "probability tolerance must be non-negative and finite, got {}",
                    tolerance
                )
            }
            MiningError::MissingTailProfile(token) => {
                write!(
                    f,
                    "internal invariant violated: no single-token profile for tail '{}'",
                    token
                )
            }
        }
    }
}

impl std::error::Error for MiningError {}
