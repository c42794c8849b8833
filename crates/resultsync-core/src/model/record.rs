use serde::{Deserialize, Serialize};

/// One row of a store result set
///
/// The store owns ordering and grouping: records arrive in display order and
/// name the section they belong to. `changed` is the store's own verdict on
/// whether the record's content differs from what it last reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedRecord<O, S, C> {
    pub object: O,
    pub section: S,
    pub content: C,
    #[serde(default)]
    pub changed: bool,
}

impl<O, S, C> FetchedRecord<O, S, C> {
    pub fn new(object: O, section: S, content: C) -> Self {
        Self {
            object,
            section,
            content,
            changed: false,
        }
    }

    /// Mark the record's content as changed since the previous fetch
    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }
}
