use std::collections::HashSet;
use std::hash::Hash;

use crate::collections::{ComparatorChain, OrderedUniqueList};
use crate::model::FetchedRecord;

use super::SectionedSnapshot;

/// What happened to a record pushed into a [`SnapshotBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Accepted,
    /// The identity was already placed earlier in this result set
    DroppedDuplicate,
}

/// Result of building a snapshot from one fetch
#[derive(Debug, Clone)]
pub struct SnapshotBuild<O, S, C> {
    pub snapshot: SectionedSnapshot<O, S, C>,
    /// Identities the store flagged as content-changed
    pub changed: HashSet<O>,
    /// Identities whose later duplicate records were dropped
    pub dropped: Vec<O>,
}

/// Assembles a [`SectionedSnapshot`] from store records in arrival order
///
/// The store's ordering and grouping are taken as-is. An identity seen a
/// second time (in the same or another section) is dropped; the first
/// occurrence wins. With a section order set, sections are arranged by that
/// comparator chain instead of first appearance.
#[derive(Debug)]
pub struct SnapshotBuilder<O, S, C> {
    snapshot: SectionedSnapshot<O, S, C>,
    changed: HashSet<O>,
    dropped: Vec<O>,
    section_order: Option<ComparatorChain<S>>,
}

impl<O, S, C> Default for SnapshotBuilder<O, S, C>
where
    O: Hash + Eq + Clone,
    S: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<O, S, C> SnapshotBuilder<O, S, C>
where
    O: Hash + Eq + Clone,
    S: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            snapshot: SectionedSnapshot::new(),
            changed: HashSet::new(),
            dropped: Vec::new(),
            section_order: None,
        }
    }

    pub fn with_section_order(mut self, chain: ComparatorChain<S>) -> Self {
        self.section_order = Some(chain);
        self
    }

    pub fn push(&mut self, record: FetchedRecord<O, S, C>) -> PushOutcome {
        let FetchedRecord {
            object,
            section,
            content,
            changed,
        } = record;

        if self.snapshot.membership.contains_key(&object) {
            self.dropped.push(object);
            return PushOutcome::DroppedDuplicate;
        }

        self.snapshot.sections.append(section.clone());
        self.snapshot
            .objects
            .entry(section.clone())
            .or_default()
            .append(object.clone());
        self.snapshot.membership.insert(object.clone(), section);
        if changed {
            self.changed.insert(object.clone());
        }
        self.snapshot.contents.insert(object, content);
        PushOutcome::Accepted
    }

    pub fn extend<I: IntoIterator<Item = FetchedRecord<O, S, C>>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }

    pub fn finish(mut self) -> SnapshotBuild<O, S, C> {
        if let Some(chain) = &self.section_order {
            let arrival = std::mem::take(&mut self.snapshot.sections);
            let mut ordered = OrderedUniqueList::with_capacity(arrival.len());
            ordered.insert_sorted_all(arrival.into_vec(), chain);
            self.snapshot.sections = ordered;
        }
        SnapshotBuild {
            snapshot: self.snapshot,
            changed: self.changed,
            dropped: self.dropped,
        }
    }
}
