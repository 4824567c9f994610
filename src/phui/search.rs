use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use super::catalog::{CatalogOverlay, ProfileCatalog, ProfileId, ProfileStore};
use super::combine::combine;
use super::config::{MinerConfig, ScoringPolicy};
use super::error::MiningError;
use super::frontier::{FrontierEntry, TopKFrontier};
use super::preprocess::DatabaseStats;
use super::profile::UtilityProfile;

/// Exploration counters for one run. Scoring policies change these, never
/// the mined result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub combinations_attempted: u64,
    pub combinations_accepted: u64,
    pub candidates_pruned: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.combinations_attempted += other.combinations_attempted;
        self.combinations_accepted += other.combinations_accepted;
        self.candidates_pruned += other.candidates_pruned;
    }
}

/// One depth of the lattice. `ids` keeps arrival order, which join
/// partnership depends on: a candidate only combines with candidates that
/// arrived after it, so the remaining-utility bound of the earliest member
/// of an itemset always covers the whole itemset. The scoring policy
/// controls `visit`, the order candidates are expanded in, and therefore
/// only how soon the threshold rises.
struct CandidateList {
    ids: Vec<ProfileId>,
    visit: Vec<usize>,
}

/// Frontier shared across branches: structural mutation behind a mutex, the
/// threshold mirrored into an atomic so promising-tests never block. A stale
/// threshold read only costs a pruning opportunity, never correctness.
struct SharedFrontier<'a> {
    inner: Mutex<&'a mut TopKFrontier>,
    threshold: AtomicI64,
}

impl<'a> SharedFrontier<'a> {
    fn new(frontier: &'a mut TopKFrontier) -> Self {
        let threshold = AtomicI64::new(frontier.threshold());
        Self {
            inner: Mutex::new(frontier),
            threshold,
        }
    }

    fn promising(&self, utility_bound: i64) -> bool {
        utility_bound >= self.threshold.load(Ordering::Relaxed)
    }

    fn consider(&self, entry: FrontierEntry) -> bool {
        let mut frontier = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let admitted = frontier.consider(entry);
        self.threshold.store(frontier.threshold(), Ordering::Relaxed);
        admitted
    }
}

/// Branch-and-bound driver over the itemset lattice. Holds no search state
/// of its own: the catalog and frontier are threaded through explicitly.
pub struct SearchEngine<'a> {
    config: &'a MinerConfig,
    db: &'a DatabaseStats,
}

impl<'a> SearchEngine<'a> {
    pub fn new(config: &'a MinerConfig, db: &'a DatabaseStats) -> Self {
        Self { config, db }
    }

    /// Run to completion (or deadline), mutating the catalog additively and
    /// raising the frontier threshold as better itemsets are found.
    pub fn run(
        &self,
        catalog: &mut ProfileCatalog,
        frontier: &mut TopKFrontier,
    ) -> Result<SearchStats, MiningError> {
        let started = Instant::now();

        // A registered token whose every record fell below tolerance has no
        // support at all; at min_support 0 the sum test alone would let it
        // through with utility 0.
        let survivors: Vec<ProfileId> = catalog
            .ids()
            .filter(|&id| {
                let profile = catalog.profile(id);
                profile.occurrences() > 0 && profile.sum_probability >= self.config.min_support
            })
            .collect();
        for &id in &survivors {
            frontier.consider(FrontierEntry::of(catalog.profile(id)));
        }

        // Survivors below the seeded threshold still serve as join partners
        // for earlier candidates; the promising test only decides whether a
        // candidate is expanded, at visit time.
        let shared = SharedFrontier::new(frontier);
        let initial = survivors;

        let mut stats = SearchStats::default();
        if self.config.parallel {
            let base: &ProfileCatalog = catalog;
            let outcomes: Vec<Result<(Vec<UtilityProfile>, SearchStats), MiningError>> = initial
                .par_iter()
                .enumerate()
                .map(|(position, &root)| {
                    let mut overlay = CatalogOverlay::new(base);
                    let mut branch_stats = SearchStats::default();
                    let produced = self.expand_one(
                        &mut overlay,
                        &shared,
                        root,
                        &initial[position + 1..],
                        &mut branch_stats,
                    )?;
                    self.descend(&mut overlay, &shared, produced, started, &mut branch_stats)?;
                    Ok((overlay.into_local(), branch_stats))
                })
                .collect();
            for outcome in outcomes {
                let (local, branch_stats) = outcome?;
                for profile in local {
                    catalog.insert(profile);
                }
                stats.merge(branch_stats);
            }
        } else {
            self.descend(catalog, &shared, initial, started, &mut stats)?;
        }
        Ok(stats)
    }

    /// Depth-first exploration with an explicit work stack over an arena of
    /// candidate lists; no native recursion, so lattice depth is bounded by
    /// memory rather than the call stack.
    fn descend<S: ProfileStore>(
        &self,
        store: &mut S,
        frontier: &SharedFrontier,
        initial: Vec<ProfileId>,
        started: Instant,
        stats: &mut SearchStats,
    ) -> Result<(), MiningError> {
        if initial.is_empty() {
            return Ok(());
        }
        let mut lists: Vec<CandidateList> = vec![self.make_list(&*store, initial)];
        let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
        loop {
            let Some(frame) = stack.last_mut() else { break };
            let (list, cursor) = *frame;
            frame.1 += 1;
            if cursor >= lists[list].visit.len() {
                stack.pop();
                continue;
            }
            if self.past_deadline(started) {
                // Best effort: report whatever the frontier holds now.
                return Ok(());
            }
            let arrival = lists[list].visit[cursor];
            let current = lists[list].ids[arrival];
            let produced = self.expand_one(
                store,
                frontier,
                current,
                &lists[list].ids[arrival + 1..],
                stats,
            )?;
            if !produced.is_empty() {
                let next = self.make_list(&*store, produced);
                lists.push(next);
                stack.push((lists.len() - 1, 0));
            }
        }
        Ok(())
    }

    /// Combine one retained candidate against every candidate that arrived
    /// after it in the same list, registering accepted joins and offering
    /// them to the frontier. Returns the candidate list for the next depth
    /// in arrival order.
    fn expand_one<S: ProfileStore>(
        &self,
        store: &mut S,
        frontier: &SharedFrontier,
        current: ProfileId,
        rest: &[ProfileId],
        stats: &mut SearchStats,
    ) -> Result<Vec<ProfileId>, MiningError> {
        // The threshold may have risen since this list was built.
        if !frontier.promising(store.profile(current).utility_bound()) {
            stats.candidates_pruned += 1;
            return Ok(Vec::new());
        }
        let mut produced = Vec::new();
        for &partner in rest {
            if !store.profile(current).co_occurs(store.profile(partner)) {
                continue;
            }
            stats.combinations_attempted += 1;
            let Some(joined) = combine(
                store.profile(current),
                store.profile(partner),
                &*store,
                self.config.min_support,
                self.config.probability_tolerance,
            )?
            else {
                continue;
            };
            stats.combinations_accepted += 1;
            if store.lookup(&joined.itemset).is_some() {
                // Already reached along another branch.
                continue;
            }
            frontier.consider(FrontierEntry::of(&joined));
            let id = store.insert(joined);
            produced.push(id);
        }
        Ok(produced)
    }

    fn make_list<S: ProfileStore>(&self, store: &S, ids: Vec<ProfileId>) -> CandidateList {
        let mut visit: Vec<usize> = (0..ids.len()).collect();
        if ids.len() > 1 && self.config.scoring == ScoringPolicy::Heuristic {
            let scores: Vec<f64> = ids
                .iter()
                .map(|&id| self.score(store.profile(id)))
                .collect();
            // Stable sort keeps arrival order among equal scores.
            visit.sort_by(|&a, &b| {
                scores[b]
                    .partial_cmp(&scores[a])
                    .unwrap_or(CmpOrdering::Equal)
            });
        }
        CandidateList { ids, visit }
    }

    /// Estimate of how quickly expanding this candidate could raise the
    /// threshold: its utility bound relative to the whole database plus how
    /// often it occurs.
    fn score(&self, profile: &UtilityProfile) -> f64 {
        let mut score = 0.0;
        if self.db.database_utility != 0 {
            score += profile.utility_bound() as f64 / self.db.database_utility as f64;
        }
        if self.db.transaction_count != 0 {
            score += profile.occurrences() as f64 / self.db.transaction_count as f64;
        }
        score
    }

    fn past_deadline(&self, started: Instant) -> bool {
        self.config
            .deadline
            .map_or(false, |deadline| started.elapsed() >= deadline)
    }
}
