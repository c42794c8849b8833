//! Per-cycle accumulator of membership outcomes.

use std::fmt;
use std::hash::Hash;

use crate::collections::{BiMap, OrderedUniqueList};

/// Inserted / updated / deleted identities of one reconciliation cycle
///
/// `P` is the position type: an item [`IndexPath`](crate::IndexPath) for
/// object-level sets, a section ordinal for the section-level set. Updated and
/// deleted identities remember their *prior* position; inserted identities
/// have none. The three buckets are disjoint: the diff classifies every
/// identity into exactly one of them.
#[derive(Debug, Clone)]
pub struct ChangeSet<O, P> {
    inserted: OrderedUniqueList<O>,
    updated: BiMap<P, O>,
    deleted: BiMap<P, O>,
}

impl<O, P> Default for ChangeSet<O, P> {
    fn default() -> Self {
        Self {
            inserted: OrderedUniqueList::default(),
            updated: BiMap::default(),
            deleted: BiMap::default(),
        }
    }
}

impl<O, P> ChangeSet<O, P>
where
    O: Hash + Eq + Clone,
    P: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity is in the new snapshot and was absent from the old one
    pub fn mark_inserted(&mut self, identity: O) {
        debug_assert!(
            !self.updated.contains_identity(&identity) && !self.deleted.contains_identity(&identity),
            "identity classified twice"
        );
        self.inserted.append(identity);
    }

    /// Identity is in both snapshots and the store reports changed content
    pub fn mark_updated(&mut self, identity: O, old_position: P) {
        debug_assert!(
            !self.inserted.contains(&identity) && !self.deleted.contains_identity(&identity),
            "identity classified twice"
        );
        self.updated.put(identity, old_position);
    }

    /// Identity was in the old snapshot and is absent from the new one
    pub fn mark_deleted(&mut self, identity: O, old_position: P) {
        debug_assert!(
            !self.inserted.contains(&identity) && !self.updated.contains_identity(&identity),
            "identity classified twice"
        );
        self.deleted.put(identity, old_position);
    }

    pub fn reset(&mut self) {
        self.inserted.clear();
        self.updated.clear();
        self.deleted.clear();
    }

    pub fn inserted(&self) -> &OrderedUniqueList<O> {
        &self.inserted
    }

    pub fn updated(&self) -> &BiMap<P, O> {
        &self.updated
    }

    pub fn deleted(&self) -> &BiMap<P, O> {
        &self.deleted
    }

    pub fn is_inserted(&self, identity: &O) -> bool {
        self.inserted.contains(identity)
    }

    pub fn is_updated(&self, identity: &O) -> bool {
        self.updated.contains_identity(identity)
    }

    pub fn is_deleted(&self, identity: &O) -> bool {
        self.deleted.contains_identity(identity)
    }

    /// Total number of classified identities
    pub fn len(&self) -> usize {
        self.inserted.len() + self.updated.len() + self.deleted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<O, P> fmt::Display for ChangeSet<O, P>
where
    O: Hash + Eq + Clone,
    P: Hash + Eq + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Change Set: {} Updated, {} Inserted, {} Deleted",
            self.updated.len(),
            self.inserted.len(),
            self.deleted.len()
        )
    }
}
