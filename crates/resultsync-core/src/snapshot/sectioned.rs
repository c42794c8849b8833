use std::collections::HashMap;
use std::hash::Hash;

use crate::collections::OrderedUniqueList;
use crate::model::IndexPath;

/// Ordered sections, each holding an ordered list of object identities
///
/// Invariant: an object identity appears at exactly one position in exactly
/// one section. Contents are kept alongside so consumers can read the object
/// behind an index path.
#[derive(Debug, Clone)]
pub struct SectionedSnapshot<O, S, C> {
    pub(crate) sections: OrderedUniqueList<S>,
    pub(crate) objects: HashMap<S, OrderedUniqueList<O>>,
    pub(crate) contents: HashMap<O, C>,
    pub(crate) membership: HashMap<O, S>,
}

impl<O, S, C> Default for SectionedSnapshot<O, S, C> {
    fn default() -> Self {
        Self {
            sections: OrderedUniqueList::default(),
            objects: HashMap::new(),
            contents: HashMap::new(),
            membership: HashMap::new(),
        }
    }
}

impl<O, S, C> SectionedSnapshot<O, S, C>
where
    O: Hash + Eq + Clone,
    S: Hash + Eq + Clone,
{
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of objects across all sections
    pub fn object_count(&self) -> usize {
        self.membership.len()
    }

    /// Number of objects in the section at `section`; 0 if out of range
    pub fn object_count_in(&self, section: usize) -> usize {
        self.objects_at(section).map_or(0, |objects| objects.len())
    }

    pub fn sections(&self) -> &OrderedUniqueList<S> {
        &self.sections
    }

    pub fn section_at(&self, section: usize) -> Option<&S> {
        self.sections.get(section)
    }

    pub fn section_ordinal(&self, section: &S) -> Option<usize> {
        self.sections.index_of(section)
    }

    pub fn objects_in(&self, section: &S) -> Option<&OrderedUniqueList<O>> {
        self.objects.get(section)
    }

    pub fn objects_at(&self, section: usize) -> Option<&OrderedUniqueList<O>> {
        self.section_at(section)
            .and_then(|section| self.objects.get(section))
    }

    pub fn object_at(&self, index_path: IndexPath) -> Option<&O> {
        self.objects_at(index_path.section)
            .and_then(|objects| objects.get(index_path.item))
    }

    pub fn contains_object(&self, object: &O) -> bool {
        self.membership.contains_key(object)
    }

    pub fn section_of(&self, object: &O) -> Option<&S> {
        self.membership.get(object)
    }

    pub fn index_path_of(&self, object: &O) -> Option<IndexPath> {
        let section = self.membership.get(object)?;
        let section_ordinal = self.sections.index_of(section)?;
        let item = self.objects.get(section)?.index_of(object)?;
        Some(IndexPath::new(section_ordinal, item))
    }

    pub fn content_of(&self, object: &O) -> Option<&C> {
        self.contents.get(object)
    }

    pub fn content_at(&self, index_path: IndexPath) -> Option<&C> {
        self.object_at(index_path)
            .and_then(|object| self.contents.get(object))
    }

    /// Sections in order, each with its objects in order
    pub fn iter_sections(&self) -> impl Iterator<Item = (&S, &OrderedUniqueList<O>)> {
        self.sections
            .iter()
            .filter_map(|section| self.objects.get(section).map(|objects| (section, objects)))
    }

    /// Owned `(section, objects)` layout, the shape a list renderer displays
    pub fn layout(&self) -> Vec<(S, Vec<O>)> {
        self.iter_sections()
            .map(|(section, objects)| (section.clone(), objects.as_slice().to_vec()))
            .collect()
    }
}
