use std::collections::HashMap;
use std::hash::Hash;

/// Strict one-to-one mapping between positions and identities
///
/// Both directions are kept in their own `HashMap` so lookups are O(1).
/// Installing a pair evicts whatever either side was previously paired with,
/// so no identity or position is ever mapped twice.
#[derive(Debug, Clone)]
pub struct BiMap<P, O> {
    by_identity: HashMap<O, P>,
    by_position: HashMap<P, O>,
}

impl<P, O> Default for BiMap<P, O> {
    fn default() -> Self {
        Self {
            by_identity: HashMap::new(),
            by_position: HashMap::new(),
        }
    }
}

impl<P, O> BiMap<P, O>
where
    P: Hash + Eq + Clone,
    O: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_identity: HashMap::with_capacity(capacity),
            by_position: HashMap::with_capacity(capacity),
        }
    }

    /// Pair `identity` with `position`
    ///
    /// Any position previously held by `identity` and any identity previously
    /// held at `position` are dropped first.
    pub fn put(&mut self, identity: O, position: P) {
        if let Some(stale_position) = self.by_identity.remove(&identity) {
            self.by_position.remove(&stale_position);
        }
        if let Some(stale_identity) = self.by_position.remove(&position) {
            self.by_identity.remove(&stale_identity);
        }
        self.by_identity.insert(identity.clone(), position.clone());
        self.by_position.insert(position, identity);
    }

    pub fn position_of(&self, identity: &O) -> Option<&P> {
        self.by_identity.get(identity)
    }

    pub fn identity_at(&self, position: &P) -> Option<&O> {
        self.by_position.get(position)
    }

    pub fn contains_identity(&self, identity: &O) -> bool {
        self.by_identity.contains_key(identity)
    }

    pub fn contains_position(&self, position: &P) -> bool {
        self.by_position.contains_key(position)
    }

    /// Remove the pair holding `identity`, returning its position
    pub fn remove_identity(&mut self, identity: &O) -> Option<P> {
        let position = self.by_identity.remove(identity)?;
        self.by_position.remove(&position);
        Some(position)
    }

    /// Remove the pair held at `position`, returning its identity
    pub fn remove_position(&mut self, position: &P) -> Option<O> {
        let identity = self.by_position.remove(position)?;
        self.by_identity.remove(&identity);
        Some(identity)
    }

    pub fn clear(&mut self) {
        self.by_identity.clear();
        self.by_position.clear();
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Iterate `(position, identity)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&P, &O)> {
        self.by_position.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = &P> {
        self.by_position.keys()
    }

    /// Drain every remaining pair, leaving the map empty
    pub fn drain(&mut self) -> Vec<(P, O)> {
        self.by_identity.clear();
        self.by_position.drain().collect()
    }
}

impl<P, O> FromIterator<(O, P)> for BiMap<P, O>
where
    P: Hash + Eq + Clone,
    O: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (O, P)>>(iter: I) -> Self {
        let mut map = BiMap::new();
        for (identity, position) in iter {
            map.put(identity, position);
        }
        map
    }
}
