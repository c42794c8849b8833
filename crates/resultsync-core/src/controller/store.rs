//! Store collaborator interface.

use std::fmt::Debug;
use std::hash::Hash;

use crate::model::FetchedRecord;

/// Source of ordered, grouped result sets
///
/// The store owns ordering, grouping and change detection: each fetch
/// returns records in display order, naming their section and flagging
/// content that changed since the previous fetch.
pub trait ResultsStore {
    type Object: Hash + Eq + Clone + Debug;
    type Section: Hash + Eq + Clone + Debug;
    type Content;
    type Error: std::error::Error;

    /// Name carried on fetch failures
    fn name(&self) -> &str {
        "store"
    }

    /// Produce the complete current result set
    ///
    /// # Errors
    ///
    /// Returns the store's own error when no result set can be produced; the
    /// controller aborts the cycle without notifying.
    fn fetch(
        &mut self,
    ) -> Result<Vec<FetchedRecord<Self::Object, Self::Section, Self::Content>>, Self::Error>;
}
