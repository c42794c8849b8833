//! Edit script output types.

use serde::{Deserialize, Serialize};

use crate::controller::ResultsDelegate;
use crate::model::ChangeType;

/// A change to one section identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionChange<S> {
    pub section: S,
    pub change: ChangeType,
}

/// A change to one object identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectChange<O> {
    pub object: O,
    pub change: ChangeType,
}

/// Tally of one cycle's outcomes
///
/// The `*_with_sections` counters cover objects that arrived or left together
/// with a whole section; they are not emitted individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub sections_inserted: usize,
    pub sections_deleted: usize,
    pub sections_moved: usize,
    pub objects_inserted: usize,
    pub objects_deleted: usize,
    pub objects_moved: usize,
    pub objects_updated: usize,
    pub objects_inserted_with_sections: usize,
    pub objects_deleted_with_sections: usize,
}

impl ChangeCounts {
    /// Number of section-level notifications
    pub fn section_edits(&self) -> usize {
        self.sections_inserted + self.sections_deleted + self.sections_moved
    }

    /// Number of object-level notifications
    pub fn object_edits(&self) -> usize {
        self.objects_inserted + self.objects_deleted + self.objects_moved + self.objects_updated
    }
}

/// Ordered edits turning one snapshot into the next
///
/// Changes are stored in emission order. All delete positions and move
/// sources refer to the old layout; all insert positions, move destinations
/// and update targets refer to the new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript<O, S> {
    pub section_changes: Vec<SectionChange<S>>,
    pub object_changes: Vec<ObjectChange<O>>,
    pub counts: ChangeCounts,
}

impl<O, S> Default for EditScript<O, S> {
    fn default() -> Self {
        Self {
            section_changes: Vec::new(),
            object_changes: Vec::new(),
            counts: ChangeCounts::default(),
        }
    }
}

impl<O, S> EditScript<O, S> {
    /// True if no notification besides will/did-change would be emitted
    pub fn is_empty(&self) -> bool {
        self.section_changes.is_empty() && self.object_changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.section_changes.len() + self.object_changes.len()
    }

    /// Drive `delegate` through the full notification sequence
    pub fn emit<D>(&self, delegate: &mut D)
    where
        D: ResultsDelegate<O, S> + ?Sized,
    {
        delegate.will_change_content();
        for change in &self.section_changes {
            delegate.did_change_section(&change.section, change.change);
        }
        for change in &self.object_changes {
            delegate.did_change_object(&change.object, change.change);
        }
        delegate.did_change_content();
    }
}
