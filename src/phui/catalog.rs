use rustc_hash::FxHashMap;

use super::profile::{Token, UtilityProfile};

/// Index of a profile within its catalog arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(pub usize);

/// Lookup surface shared by the catalog and its worker-local overlay. The
/// search engine is generic over this seam so parallel branches can combine
/// against a frozen base catalog without cloning it.
pub trait ProfileStore {
    fn profile(&self, id: ProfileId) -> &UtilityProfile;

    fn lookup(&self, itemset: &[Token]) -> Option<ProfileId>;

    /// Register a profile, returning the existing id if the itemset is
    /// already present. Stored profiles are never replaced or altered.
    fn insert(&mut self, profile: UtilityProfile) -> ProfileId;

    /// Single-token profile consulted by the combine operator's tail lookup.
    fn tail_profile(&self, token: &Token) -> Option<&UtilityProfile> {
        self.lookup(std::slice::from_ref(token))
            .map(|id| self.profile(id))
    }
}

/// Arena of every profile created during one mining run, keyed by the sorted
/// token sequence of the itemset. Populated with single-token profiles by
/// the preprocessor, then extended additively by the search engine.
#[derive(Debug, Default)]
pub struct ProfileCatalog {
    profiles: Vec<UtilityProfile>,
    index: FxHashMap<Vec<Token>, ProfileId>,
}

impl ProfileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ProfileId> {
        (0..self.profiles.len()).map(ProfileId)
    }

    /// Fetch or create the profile for a single token, for incremental
    /// construction by the preprocessor.
    pub(crate) fn single_profile_mut(&mut self, token: &Token) -> &mut UtilityProfile {
        let id = match self.index.get(std::slice::from_ref(token)) {
            Some(&id) => id,
            None => {
                let itemset = vec![token.clone()];
                let id = ProfileId(self.profiles.len());
                self.index.insert(itemset.clone(), id);
                self.profiles.push(UtilityProfile::new(itemset));
                id
            }
        };
        &mut self.profiles[id.0]
    }
}

impl ProfileStore for ProfileCatalog {
    fn profile(&self, id: ProfileId) -> &UtilityProfile {
        &self.profiles[id.0]
    }

    fn lookup(&self, itemset: &[Token]) -> Option<ProfileId> {
        self.index.get(itemset).copied()
    }

    fn insert(&mut self, profile: UtilityProfile) -> ProfileId {
        if let Some(&id) = self.index.get(profile.itemset.as_slice()) {
            return id;
        }
        let id = ProfileId(self.profiles.len());
        self.index.insert(profile.itemset.clone(), id);
        self.profiles.push(profile);
        id
    }
}

/// Worker-local extension of a frozen base catalog. New profiles take ids
/// past the end of the base arena; the local arena is merged back into the
/// base under a single writer once the branch completes.
#[derive(Debug)]
pub struct CatalogOverlay<'a> {
    base: &'a ProfileCatalog,
    local: Vec<UtilityProfile>,
    local_index: FxHashMap<Vec<Token>, ProfileId>,
}

impl<'a> CatalogOverlay<'a> {
    pub fn new(base: &'a ProfileCatalog) -> Self {
        Self {
            base,
            local: Vec::new(),
            local_index: FxHashMap::default(),
        }
    }

    pub fn into_local(self) -> Vec<UtilityProfile> {
        self.local
    }
}

impl ProfileStore for CatalogOverlay<'_> {
    fn profile(&self, id: ProfileId) -> &UtilityProfile {
        if id.0 < self.base.len() {
            self.base.profile(id)
        } else {
            &self.local[id.0 - self.base.len()]
        }
    }

    fn lookup(&self, itemset: &[Token]) -> Option<ProfileId> {
        self.local_index
            .get(itemset)
            .copied()
            .or_else(|| self.base.lookup(itemset))
    }

    fn insert(&mut self, profile: UtilityProfile) -> ProfileId {
        if let Some(id) = self.lookup(&profile.itemset) {
            return id;
        }
        let id = ProfileId(self.base.len() + self.local.len());
        self.local_index.insert(profile.itemset.clone(), id);
        self.local.push(profile);
        id
    }
}
