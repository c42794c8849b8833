use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Index;

use super::ComparatorChain;

/// Insertion-ordered collection of unique elements with O(1) index lookup
///
/// The sequence defines display order; a side index maps each element to its
/// ordinal. Every mutation keeps the side index the exact inverse of the
/// sequence by re-indexing the suffix that shifted.
///
/// Positional operations (`element_at`, `insert`, `remove_at`) treat an
/// out-of-range ordinal as a contract violation and panic. Lookups by element
/// return `None` when the element is absent.
#[derive(Debug, Clone)]
pub struct OrderedUniqueList<E> {
    data: Vec<E>,
    index: HashMap<E, usize>,
}

impl<E> Default for OrderedUniqueList<E> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E> OrderedUniqueList<E>
where
    E: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Build from a vector, keeping the first occurrence of each element
    pub fn from_vec(elements: Vec<E>) -> Self {
        elements.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, element: &E) -> bool {
        self.index.contains_key(element)
    }

    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.index.get(element).copied()
    }

    /// Element at `ordinal`
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= len()`.
    pub fn element_at(&self, ordinal: usize) -> &E {
        match self.data.get(ordinal) {
            Some(element) => element,
            None => panic!(
                "element_at: ordinal {} out of range for length {}",
                ordinal,
                self.data.len()
            ),
        }
    }

    pub fn get(&self, ordinal: usize) -> Option<&E> {
        self.data.get(ordinal)
    }

    pub fn first(&self) -> Option<&E> {
        self.data.first()
    }

    pub fn last(&self) -> Option<&E> {
        self.data.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<E> {
        self.data
    }

    // ===== Inserting & Removing =====

    /// Append `element`; returns `false` (and does nothing) if already present
    pub fn append(&mut self, element: E) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.index.insert(element.clone(), self.data.len());
        self.data.push(element);
        true
    }

    /// Append every element not already present; returns how many were added
    pub fn append_all<I: IntoIterator<Item = E>>(&mut self, elements: I) -> usize {
        elements
            .into_iter()
            .filter(|element| self.append(element.clone()))
            .count()
    }

    /// Splice `element` in at `ordinal`; returns `false` if already present
    ///
    /// # Panics
    ///
    /// Panics if `ordinal > len()`.
    pub fn insert(&mut self, element: E, ordinal: usize) -> bool {
        self.assert_insertion_point(ordinal, "insert");
        if self.contains(&element) {
            return false;
        }
        self.data.insert(ordinal, element);
        self.reindex_from(ordinal);
        true
    }

    /// Splice every absent element in at `ordinal`, preserving their order
    ///
    /// The suffix is re-indexed once. Returns the elements actually inserted.
    ///
    /// # Panics
    ///
    /// Panics if `ordinal > len()`.
    pub fn insert_all_at<I: IntoIterator<Item = E>>(&mut self, elements: I, ordinal: usize) -> Vec<E> {
        self.assert_insertion_point(ordinal, "insert_all_at");
        let mut inserted = Vec::new();
        for element in elements {
            if self.contains(&element) {
                continue;
            }
            self.data.insert(ordinal + inserted.len(), element.clone());
            // placeholder so later duplicates in the batch are rejected
            self.index.insert(element.clone(), usize::MAX);
            inserted.push(element);
        }
        if !inserted.is_empty() {
            self.reindex_from(ordinal);
        }
        inserted
    }

    /// Remove and return the element at `ordinal`
    ///
    /// # Panics
    ///
    /// Panics if `ordinal >= len()`.
    pub fn remove_at(&mut self, ordinal: usize) -> E {
        if ordinal >= self.data.len() {
            panic!(
                "remove_at: ordinal {} out of range for length {}",
                ordinal,
                self.data.len()
            );
        }
        let element = self.data.remove(ordinal);
        self.index.remove(&element);
        self.reindex_from(ordinal);
        element
    }

    /// Remove `element`, returning the ordinal it occupied
    pub fn remove(&mut self, element: &E) -> Option<usize> {
        let ordinal = self.index_of(element)?;
        self.remove_at(ordinal);
        Some(ordinal)
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.index.clear();
    }

    // ===== Sorted insertion =====

    /// Insert `element` before the first element the chain ranks after it
    ///
    /// An element that is already present is taken out and re-inserted at its
    /// sorted position. Returns the new ordinal, or `None` when the element was
    /// already exactly where sorted insertion would put it (nothing changed).
    ///
    /// The list must already be sorted under `chain` for the result to stay
    /// sorted; do not mix chains between calls without a [`sort`](Self::sort).
    pub fn insert_sorted(&mut self, element: E, chain: &ComparatorChain<E>) -> Option<usize> {
        let previous = self.index.remove(&element);
        if let Some(ordinal) = previous {
            self.data.remove(ordinal);
        }
        let ordinal = self.sorted_position(&element, chain);
        self.data.insert(ordinal, element);
        let disturbed = previous.map_or(ordinal, |p| p.min(ordinal));
        self.reindex_from(disturbed);

        match previous {
            Some(p) if p == ordinal => None,
            _ => Some(ordinal),
        }
    }

    /// Sorted insertion of many elements with a single re-index pass
    ///
    /// Elements already present are re-positioned. Returns the lowest ordinal
    /// whose element changed, or `None` if no element moved or arrived
    /// (including when `elements` was empty).
    pub fn insert_sorted_all<I>(&mut self, elements: I, chain: &ComparatorChain<E>) -> Option<usize>
    where
        I: IntoIterator<Item = E>,
    {
        let mut seen = HashSet::new();
        let incoming: Vec<E> = elements
            .into_iter()
            .filter(|element| seen.insert(element.clone()))
            .collect();
        if incoming.is_empty() {
            return None;
        }

        let mut lowest = usize::MAX;
        let mut previous = HashMap::new();
        for element in &incoming {
            if let Some(ordinal) = self.index.remove(element) {
                lowest = lowest.min(ordinal);
                previous.insert(element.clone(), ordinal);
            }
        }
        if lowest != usize::MAX {
            self.data.retain(|element| !seen.contains(element));
        }

        for element in incoming {
            let ordinal = self.sorted_position(&element, chain);
            lowest = lowest.min(ordinal);
            self.data.insert(ordinal, element);
        }

        let changed = self
            .data
            .iter()
            .enumerate()
            .skip(lowest)
            .find(|&(offset, element)| {
                self.index.get(element).or_else(|| previous.get(element)) != Some(&offset)
            })
            .map(|(offset, _)| offset);
        self.reindex_from(lowest);
        changed
    }

    /// Stable sort under `chain`, rebuilding the side index from scratch
    ///
    /// An empty chain leaves the order untouched.
    pub fn sort(&mut self, chain: &ComparatorChain<E>) {
        if chain.is_empty() {
            return;
        }
        self.data.sort_by(|a, b| chain.compare(a, b));
        self.index.clear();
        self.reindex_from(0);
    }

    /// Sorted copy of this list
    pub fn sorted(&self, chain: &ComparatorChain<E>) -> Self {
        let mut copy = self.clone();
        copy.sort(chain);
        copy
    }

    fn sorted_position(&self, element: &E, chain: &ComparatorChain<E>) -> usize {
        self.data
            .iter()
            .position(|existing| chain.compare(existing, element) == Ordering::Greater)
            .unwrap_or(self.data.len())
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, element) in self.data.iter().enumerate().skip(start) {
            self.index.insert(element.clone(), offset);
        }
    }

    fn assert_insertion_point(&self, ordinal: usize, op: &str) {
        if ordinal > self.data.len() {
            panic!(
                "{}: ordinal {} out of range for length {}",
                op,
                ordinal,
                self.data.len()
            );
        }
    }
}

impl<E: PartialEq> PartialEq for OrderedUniqueList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<E: Eq> Eq for OrderedUniqueList<E> {}

impl<E> Index<usize> for OrderedUniqueList<E> {
    type Output = E;

    fn index(&self, ordinal: usize) -> &E {
        &self.data[ordinal]
    }
}

impl<E> FromIterator<E> for OrderedUniqueList<E>
where
    E: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = OrderedUniqueList::new();
        list.append_all(iter);
        list
    }
}

impl<E> Extend<E> for OrderedUniqueList<E>
where
    E: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl<'a, E> IntoIterator for &'a OrderedUniqueList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
