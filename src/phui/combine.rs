use super::catalog::ProfileStore;
use super::error::MiningError;
use super::profile::{Token, UtilityProfile, UtilityRecord};

/// Join two related profiles into the profile for their union itemset.
///
/// `left` acts as the prefix: `right`'s itemset with `left`'s tokens removed
/// must leave exactly one token, the tail. The tail's single-token profile
/// is consulted by direct lookup per transaction, never iterated.
///
/// Returns `Ok(None)` when the operands are not combinable or the joined
/// support cannot reach `min_support` — a pruned branch, not a failure.
pub fn combine<S: ProfileStore>(
    left: &UtilityProfile,
    right: &UtilityProfile,
    store: &S,
    min_support: f64,
    tolerance: f64,
) -> Result<Option<UtilityProfile>, MiningError> {
    let Some(tail_token) = single_difference(right, left) else {
        return Ok(None);
    };

    let mut itemset = left.itemset.clone();
    itemset.push(tail_token.clone());
    itemset.sort();

    // The operand with fewer records drives iteration; the per-transaction
    // sums are the same in either orientation.
    let (driver, lookup_token) = if left.occurrences() <= right.occurrences() {
        (left, tail_token)
    } else {
        match single_difference(left, right) {
            Some(mirror) => (right, mirror),
            None => (left, tail_token),
        }
    };

    let tail = store
        .tail_profile(&lookup_token)
        .ok_or_else(|| MiningError::MissingTailProfile(lookup_token.to_string()))?;

    let mut joined = UtilityProfile::new(itemset);
    let mut processed_probability = 0.0;
    for (tid, record) in driver.records() {
        if let Some(tail_record) = tail.record(tid) {
            joined.insert(
                tid,
                UtilityRecord {
                    utility: record.utility + tail_record.utility,
                    remaining_utility: record.remaining_utility.min(tail_record.remaining_utility),
                    probability: record.probability * tail_record.probability,
                },
                tolerance,
            );
        }
        processed_probability += record.probability;
        // Even if every unprocessed driver transaction co-occurred with the
        // tail at its maximum probability, the support target is already out
        // of reach.
        let unprocessed = driver.sum_probability - processed_probability;
        if min_support - joined.sum_probability > unprocessed * tail.max_probability {
            return Ok(None);
        }
    }

    if joined.sum_probability >= min_support {
        Ok(Some(joined))
    } else {
        Ok(None)
    }
}

/// The single token of `of` absent from `base`, if there is exactly one.
fn single_difference(of: &UtilityProfile, base: &UtilityProfile) -> Option<Token> {
    let mut found = None;
    for token in &of.itemset {
        if !base.itemset.contains(token) {
            if found.is_some() {
                return None;
            }
            found = Some(token.clone());
        }
    }
    found
}
